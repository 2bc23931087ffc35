/*!
Error types for everything that can go wrong in [`flagship`][crate].

There are two families. [`ParseError`] covers bad user input, discovered while
parsing the command line; it's recoverable, and the usual response is to print
it and exit with a nonzero status. [`DefinitionError`] covers mistakes in how
the options were registered, like a duplicate name; those are bugs in the
calling program.
 */

use core::fmt::Display;

use crate::descriptor::Slot;
use crate::value::ValueType;

/// A raw token couldn't be converted into the value type of its option.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CoercionError {
    /// The option needs a value, and the command line didn't give it one
    #[error("expected a value of type {expected}, but none was given")]
    MissingToken { expected: ValueType },

    /// The token wasn't a valid instance of the type
    #[error("{token:?} is not a valid {expected}: {message}")]
    Invalid {
        token: String,
        expected: ValueType,
        message: String,
    },

    /// The token wasn't valid UTF-8. `token` is a lossy rendering of it.
    #[error("{token:?} is not valid UTF-8")]
    InvalidUtf8 { token: String, expected: ValueType },
}

impl CoercionError {
    pub fn invalid(token: &str, expected: ValueType, message: impl Display) -> Self {
        Self::Invalid {
            token: token.to_owned(),
            expected,
            message: message.to_string(),
        }
    }

    /// The offending token, if there was one
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::MissingToken { .. } => None,
            Self::Invalid { token, .. } | Self::InvalidUtf8 { token, .. } => Some(token),
        }
    }

    /// The type the token was supposed to be
    #[must_use]
    pub fn expected(&self) -> ValueType {
        match *self {
            Self::MissingToken { expected }
            | Self::Invalid { expected, .. }
            | Self::InvalidUtf8 { expected, .. } => expected,
        }
    }
}

/**
An error in the command-line arguments themselves. Every message names the
option (or positional slot) involved and ends with a pointer to `--help`.
 */
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// An option marker didn't match any registered long or short name
    #[error("unrecognized option '{token}'; use '--help' for more information")]
    UnknownOption { token: String },

    /// A required option was absent, or appeared without any values
    #[error("{slot} is required, but no value was given; use '--help' for more information")]
    MissingRequired { slot: Slot },

    /// A token couldn't be coerced into the option's type
    #[error("invalid value for {slot}: {error}; use '--help' for more information")]
    InvalidValue {
        slot: Slot,
        #[source]
        error: CoercionError,
    },

    /// The value coerced fine, but the option's validator rejected it
    #[error("invalid value for {slot}: {message}; use '--help' for more information")]
    ValidationFailed { slot: Slot, message: String },
}

impl ParseError {
    /// The option or positional slot this error is about, if any. Unknown
    /// options, by definition, don't have one.
    #[must_use]
    pub fn slot(&self) -> Option<&Slot> {
        match self {
            Self::UnknownOption { .. } => None,
            Self::MissingRequired { slot }
            | Self::InvalidValue { slot, .. }
            | Self::ValidationFailed { slot, .. } => Some(slot),
        }
    }
}

/**
A mistake in how options were registered. These indicate a bug in the
program, not bad input, so [`add`][crate::OptionBuilder::add] panics with
them; [`try_add`][crate::OptionBuilder::try_add] hands them back instead.
 */
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DefinitionError {
    #[error(
        "invalid option name {name:?}: long names must start with an ASCII letter \
        and can't contain whitespace or '='"
    )]
    InvalidLongName { name: String },

    #[error("invalid short name {short:?} for option '--{long}': short names must be a single ASCII letter")]
    InvalidShortName { long: String, short: char },

    #[error("option '--{name}' is already registered")]
    DuplicateLong { name: String },

    #[error("short name '-{short}' for option '--{long}' is already taken")]
    DuplicateShort { long: String, short: char },

    #[error("a positional argument is already registered")]
    DuplicatePositional,

    #[error("can't register {slot} after parsing has begun")]
    Frozen { slot: Slot },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_name_the_option_and_hint_at_help() {
        let error = ParseError::ValidationFailed {
            slot: Slot::option("height", None),
            message: "must be positive".to_owned(),
        };
        let message = error.to_string();

        assert!(message.contains("--height"), "{message}");
        assert!(message.contains("must be positive"), "{message}");
        assert!(message.contains("--help"), "{message}");
    }

    #[test]
    fn positional_slot_is_named() {
        let error = ParseError::MissingRequired {
            slot: Slot::Positional,
        };

        assert!(error.to_string().starts_with("the positional argument is required"));
    }

    #[test]
    fn coercion_error_message() {
        let error = CoercionError::invalid("tall", ValueType::Float, "invalid float literal");
        assert_eq!(
            error.to_string(),
            "\"tall\" is not a valid Float: invalid float literal"
        );
    }
}
