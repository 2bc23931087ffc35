/*!
Builders for registering options. Get one from
[`Registry::option`][crate::Registry::option] or
[`Registry::positional`][crate::Registry::positional], chain on whatever
settings you need, and finish with [`add`][OptionBuilder::add] or
[`try_add`][OptionBuilder::try_add].
 */

use core::fmt::Display;

use crate::descriptor::{Slot, Validator};
use crate::errors::DefinitionError;
use crate::handle::Handle;
use crate::help::Requirement;
use crate::registry::Registry;
use crate::value::{Value, ValueKind};

/// The settings shared by options and the positional slot
struct Draft<T> {
    default: T,
    description: String,
    requirement: Requirement,
    validator: Option<Validator>,
}

impl<T: ValueKind> Draft<T> {
    fn new(default: T) -> Self {
        Self {
            default,
            description: String::new(),
            requirement: Requirement::Optional,
            validator: None,
        }
    }

    fn validate<F, E>(&mut self, validator: F)
    where
        F: Fn(&T) -> Result<(), E> + 'static,
        E: Display,
    {
        self.validator = Some(Box::new(move |value: &Value| match T::from_value(value) {
            Some(value) => validator(value).map_err(|err| err.to_string()),
            None => unreachable!("validator for {} got a {}", T::TYPE, value.value_type()),
        }));
    }

    fn register(self, registry: &mut Registry, slot: Slot) -> Result<Handle<T>, DefinitionError> {
        registry
            .insert(
                slot,
                self.default.into_value(),
                self.description,
                self.requirement,
                self.validator,
            )
            .map(Handle::new)
    }
}

/// Builder for a named `--long` option
#[must_use = "the option isn't registered until you call `add` or `try_add`"]
pub struct OptionBuilder<'r, T> {
    registry: &'r mut Registry,
    long: String,
    short: Option<char>,
    draft: Draft<T>,
}

impl<'r, T: ValueKind> OptionBuilder<'r, T> {
    pub(crate) fn new(registry: &'r mut Registry, long: String, default: T) -> Self {
        Self {
            registry,
            long,
            short: None,
            draft: Draft::new(default),
        }
    }

    /// Give the option a single-letter alias, like `-a` for `--age`
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.draft.description = description.into();
        self
    }

    /// Make parsing fail unless this option appears with at least one value
    pub fn required(self) -> Self {
        self.requirement(Requirement::Mandatory)
    }

    pub fn requirement(mut self, requirement: Requirement) -> Self {
        self.draft.requirement = requirement;
        self
    }

    /// Check the parsed value. The validator only runs on values that came
    /// from the command line, never on the default. Its error message is
    /// reported to the user verbatim.
    pub fn validate<F, E>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> Result<(), E> + 'static,
        E: Display,
    {
        self.draft.validate(validator);
        self
    }

    /// Register the option, returning a handle to its value.
    pub fn try_add(self) -> Result<Handle<T>, DefinitionError> {
        let slot = Slot::option(self.long, self.short);
        self.draft.register(self.registry, slot)
    }

    /// Register the option, returning a handle to its value.
    ///
    /// # Panics
    ///
    /// Panics if the name is invalid or taken, or if the registry has already
    /// parsed. These are mistakes in the program, not in its input.
    #[track_caller]
    pub fn add(self) -> Handle<T> {
        match self.try_add() {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Builder for the positional slot, which collects every value that doesn't
/// follow an option.
#[must_use = "the positional argument isn't registered until you call `add` or `try_add`"]
pub struct PositionalBuilder<'r, T> {
    registry: &'r mut Registry,
    draft: Draft<T>,
}

impl<'r, T: ValueKind> PositionalBuilder<'r, T> {
    pub(crate) fn new(registry: &'r mut Registry, default: T) -> Self {
        Self {
            registry,
            draft: Draft::new(default),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.draft.description = description.into();
        self
    }

    pub fn required(self) -> Self {
        self.requirement(Requirement::Mandatory)
    }

    pub fn requirement(mut self, requirement: Requirement) -> Self {
        self.draft.requirement = requirement;
        self
    }

    pub fn validate<F, E>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> Result<(), E> + 'static,
        E: Display,
    {
        self.draft.validate(validator);
        self
    }

    pub fn try_add(self) -> Result<Handle<T>, DefinitionError> {
        self.draft.register(self.registry, Slot::Positional)
    }

    /// # Panics
    ///
    /// Panics if a positional argument is already registered, or if the
    /// registry has already parsed.
    #[track_caller]
    pub fn add(self) -> Handle<T> {
        match self.try_add() {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        }
    }
}
