use core::{fmt, marker::PhantomData};
use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use crate::value::{Value, ValueKind};

/**
A typed view of an option's current value, returned when the option is
registered.

Handles share the value with the registry, so they reflect the result of the
most recent successful parse. They're cheap to clone, and they're
deliberately neither `Send` nor `Sync`.
 */
pub struct Handle<T> {
    value: Rc<RefCell<Value>>,
    kind: PhantomData<fn() -> T>,
}

impl<T: ValueKind> Handle<T> {
    pub(crate) fn new(value: Rc<RefCell<Value>>) -> Self {
        debug_assert_eq!(value.borrow().value_type(), T::TYPE);

        Self {
            value,
            kind: PhantomData,
        }
    }

    /// Borrow the current value. Don't hold the borrow across a call to
    /// `parse`; the parse will panic when it tries to store the new value.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, T> {
        Ref::map(self.value.borrow(), |value| match T::from_value(value) {
            Some(value) => value,
            None => unreachable!(
                "option value changed type from {} to {}",
                T::TYPE,
                value.value_type()
            ),
        })
    }
}

impl<T: ValueKind + Clone> Handle<T> {
    /// Get a copy of the current value
    #[must_use]
    pub fn get(&self) -> T {
        self.borrow().clone()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            kind: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.value.borrow()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_see_updates() {
        let shared = Rc::new(RefCell::new(Value::IntVec(vec![1])));
        let handle: Handle<Vec<i64>> = Handle::new(Rc::clone(&shared));
        let copy = handle.clone();

        *shared.borrow_mut() = Value::IntVec(vec![1, 3, 5]);

        assert_eq!(handle.get(), vec![1, 3, 5]);
        assert_eq!(copy.borrow().len(), 3);
    }
}
