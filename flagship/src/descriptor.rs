/*!
Option descriptors: everything the registry knows about a single option or
the positional slot.
 */

use core::fmt;
use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use crate::errors::DefinitionError;
use crate::help::Requirement;
use crate::value::{Value, ValueType};

/// Which parameter a descriptor (or an error) is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The single unnamed slot that collects free-standing values
    Positional,

    /// A named `--long` option, with its `-s` alias if it has one
    Option { long: String, short: Option<char> },
}

impl Slot {
    pub fn option(long: impl Into<String>, short: Option<char>) -> Self {
        Self::Option {
            long: long.into(),
            short,
        }
    }

    #[must_use]
    pub fn long(&self) -> Option<&str> {
        match self {
            Slot::Positional => None,
            Slot::Option { long, .. } => Some(long),
        }
    }

    #[must_use]
    pub fn short(&self) -> Option<char> {
        match *self {
            Slot::Positional => None,
            Slot::Option { short, .. } => short,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Positional => f.write_str("the positional argument"),
            Slot::Option { long, .. } => write!(f, "option '--{long}'"),
        }
    }
}

/// A type-erased validator. It sees the coerced value and returns a message
/// on rejection.
pub(crate) type Validator = Box<dyn Fn(&Value) -> Result<(), String>>;

/**
A registered option (or the positional slot).

The `current` value is shared with every [`Handle`][crate::Handle] for this
option, so a successful parse is visible through those handles immediately.
The variant of `current` always matches the variant of the default.
 */
pub struct OptionDescriptor {
    slot: Slot,
    default: Value,
    current: Rc<RefCell<Value>>,
    description: String,
    requirement: Requirement,
    validator: Option<Validator>,
}

impl OptionDescriptor {
    pub(crate) fn new(
        slot: Slot,
        default: Value,
        description: String,
        requirement: Requirement,
        validator: Option<Validator>,
    ) -> Self {
        Self {
            slot,
            current: Rc::new(RefCell::new(default.clone())),
            default,
            description,
            requirement,
            validator,
        }
    }

    #[inline]
    #[must_use]
    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    #[inline]
    #[must_use]
    pub fn long(&self) -> Option<&str> {
        self.slot.long()
    }

    #[inline]
    #[must_use]
    pub fn short(&self) -> Option<char> {
        self.slot.short()
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Borrow the current value. Don't hold on to this across a parse; the
    /// parse needs to write to it.
    #[must_use]
    pub fn current(&self) -> Ref<'_, Value> {
        self.current.borrow()
    }

    #[inline]
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.default.value_type()
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Mandatory
    }

    #[inline]
    #[must_use]
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Run the validator against the current value. The validator's message
    /// is returned as-is; with no validator this always succeeds.
    pub fn validate(&self) -> Result<(), String> {
        self.check(&self.current.borrow())
    }

    pub(crate) fn check(&self, value: &Value) -> Result<(), String> {
        match self.validator {
            Some(ref validator) => validator(value),
            None => Ok(()),
        }
    }

    pub(crate) fn commit(&self, value: Value) {
        debug_assert_eq!(value.value_type(), self.value_type());
        *self.current.borrow_mut() = value;
    }

    pub(crate) fn shared(&self) -> Rc<RefCell<Value>> {
        Rc::clone(&self.current)
    }
}

impl fmt::Debug for OptionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("slot", &self.slot)
            .field("default", &self.default)
            .field("current", &self.current.borrow())
            .field("description", &self.description)
            .field("requirement", &self.requirement)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// A one-line summary, like
/// `--age, -a (Int) = 21 [default: 18, optional, validated]: your age`
impl fmt::Display for OptionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Slot::Positional => f.write_str("<positional>")?,
            Slot::Option { ref long, short } => {
                write!(f, "--{long}")?;
                if let Some(short) = short {
                    write!(f, ", -{short}")?;
                }
            }
        }

        write!(
            f,
            " ({kind}) = {current} [default: {default}, {requirement}",
            kind = self.value_type(),
            current = self.current.borrow(),
            default = self.default,
            requirement = match self.requirement {
                Requirement::Mandatory => "required",
                Requirement::Optional => "optional",
            },
        )?;

        if self.validator.is_some() {
            f.write_str(", validated")?;
        }

        f.write_str("]")?;

        match self.description.as_str() {
            "" => Ok(()),
            description => write!(f, ": {description}"),
        }
    }
}

/// Long names start with an ASCII letter and can't contain whitespace or
/// `=`, which would make them impossible to type on the command line.
pub(crate) fn check_long(name: &str) -> Result<(), DefinitionError> {
    let mut chars = name.chars();

    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic() && chars.all(|c| !c.is_whitespace() && c != '=')
        }
        None => false,
    };

    match valid {
        true => Ok(()),
        false => Err(DefinitionError::InvalidLongName {
            name: name.to_owned(),
        }),
    }
}

pub(crate) fn check_short(long: &str, short: char) -> Result<(), DefinitionError> {
    match short.is_ascii_alphabetic() {
        true => Ok(()),
        false => Err(DefinitionError::InvalidShortName {
            long: long.to_owned(),
            short,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn height() -> OptionDescriptor {
        OptionDescriptor::new(
            Slot::option("height", Some('H')),
            Value::Float(170.0),
            "your height".to_owned(),
            Requirement::Optional,
            Some(Box::new(|value: &Value| match *value {
                Value::Float(height) if height > 0.0 => Ok(()),
                _ => Err("must be positive".to_owned()),
            })),
        )
    }

    #[test]
    fn current_starts_as_default() {
        let descriptor = height();
        assert_eq!(*descriptor.current(), Value::Float(170.0));
        assert_eq!(descriptor.value_type(), ValueType::Float);
    }

    #[test]
    fn validate_uses_current_value() {
        let descriptor = height();
        assert_eq!(descriptor.validate(), Ok(()));

        descriptor.commit(Value::Float(-5.0));
        assert_eq!(descriptor.validate(), Err("must be positive".to_owned()));
    }

    #[test]
    fn no_validator_always_passes() {
        let descriptor = OptionDescriptor::new(
            Slot::Positional,
            Value::StrVec(vec![]),
            String::new(),
            Requirement::Mandatory,
            None,
        );

        assert_eq!(descriptor.validate(), Ok(()));
        assert!(descriptor.is_required());
        assert!(!descriptor.has_validator());
    }

    #[test]
    fn summary() {
        let descriptor = height();
        descriptor.commit(Value::Float(174.5));

        assert_eq!(
            descriptor.to_string(),
            "--height, -H (Float) = 174.5 [default: 170, optional, validated]: your height"
        );
    }

    #[test]
    fn long_names() {
        assert!(check_long("age").is_ok());
        assert!(check_long("dry-run").is_ok());
        assert!(check_long("v2").is_ok());

        for bad in ["", "2fast", "-x", "a b", "a=b"] {
            assert_eq!(
                check_long(bad),
                Err(DefinitionError::InvalidLongName {
                    name: bad.to_owned()
                }),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn short_names() {
        assert!(check_short("age", 'a').is_ok());
        assert!(check_short("age", '1').is_err());
        assert!(check_short("age", 'é').is_err());
    }
}
