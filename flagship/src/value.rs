/*!
The typed values an option can hold.

Every option owns a [`Value`], and the variant of that value is fixed the
moment the option is registered. Callers never deal with [`Value`] directly
unless they want to; they register an option with a plain Rust default
(`i64`, `f64`, `bool`, `String`, or a `Vec` of one of those) and read it back
through a typed [`Handle`][crate::Handle]. The [`ValueKind`] and [`Scalar`]
traits describe that mapping.
 */

use core::fmt;

use joinery::JoinableIterator;

use crate::errors::CoercionError;
use crate::help::Repetition;

/// A typed option value. Scalars hold one item; the `*Vec` variants hold a
/// homogeneous, possibly empty, sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    IntVec(Vec<i64>),
    FloatVec(Vec<f64>),
    BoolVec(Vec<bool>),
    StrVec(Vec<String>),
}

/// The variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    Str,
    IntVec,
    FloatVec,
    BoolVec,
    StrVec,
}

impl ValueType {
    /// The stable, user-facing name of this type, used in help text and
    /// error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::Bool => "Bool",
            ValueType::Str => "String",
            ValueType::IntVec => "IntVec",
            ValueType::FloatVec => "FloatVec",
            ValueType::BoolVec => "BoolVec",
            ValueType::StrVec => "StringVec",
        }
    }

    /// The element type of a vector type. Scalars are their own element type.
    #[must_use]
    pub const fn element(self) -> ValueType {
        match self {
            ValueType::Int | ValueType::IntVec => ValueType::Int,
            ValueType::Float | ValueType::FloatVec => ValueType::Float,
            ValueType::Bool | ValueType::BoolVec => ValueType::Bool,
            ValueType::Str | ValueType::StrVec => ValueType::Str,
        }
    }

    #[must_use]
    pub const fn repetition(self) -> Repetition {
        match self {
            ValueType::Int | ValueType::Float | ValueType::Bool | ValueType::Str => {
                Repetition::Single
            }
            ValueType::IntVec | ValueType::FloatVec | ValueType::BoolVec | ValueType::StrVec => {
                Repetition::Multiple
            }
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Bool,
            Value::Str(_) => ValueType::Str,
            Value::IntVec(_) => ValueType::IntVec,
            Value::FloatVec(_) => ValueType::FloatVec,
            Value::BoolVec(_) => ValueType::BoolVec,
            Value::StrVec(_) => ValueType::StrVec,
        }
    }

    /// Shorthand for `self.value_type().name()`
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Render the value the way it appears in help text: scalars in their
    /// natural form, sequences as `[a, b, c]`.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /**
    Overwrite this value's payload from raw command-line tokens, keeping the
    variant.

    Scalars consume only the first token. With no tokens at all, a `Bool`
    becomes `true` (a bare `--flag` means "enabled") and every other scalar
    fails. Vectors consume every token, and an empty token list yields an
    empty vector.

    On failure the value is left untouched.
     */
    pub fn assign_from_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<(), CoercionError> {
        match self {
            Value::Int(slot) => *slot = scalar(tokens)?,
            Value::Float(slot) => *slot = scalar(tokens)?,
            Value::Bool(slot) => *slot = scalar(tokens)?,
            Value::Str(slot) => *slot = scalar(tokens)?,
            Value::IntVec(slot) => *slot = vector(tokens)?,
            Value::FloatVec(slot) => *slot = vector(tokens)?,
            Value::BoolVec(slot) => *slot = vector(tokens)?,
            Value::StrVec(slot) => *slot = vector(tokens)?,
        }

        Ok(())
    }
}

fn scalar<T: Scalar, S: AsRef<str>>(tokens: &[S]) -> Result<T, CoercionError> {
    match tokens.first() {
        Some(token) => T::parse_token(token.as_ref()),
        None => T::bare().ok_or(CoercionError::MissingToken { expected: T::TYPE }),
    }
}

fn vector<T: Scalar, S: AsRef<str>>(tokens: &[S]) -> Result<Vec<T>, CoercionError> {
    tokens
        .iter()
        .map(|token| T::parse_token(token.as_ref()))
        .collect()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            write!(f, "[{}]", items.iter().join_with(", "))
        }

        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
            Value::IntVec(values) => list(f, values),
            Value::FloatVec(values) => list(f, values),
            Value::BoolVec(values) => list(f, values),
            Value::StrVec(values) => list(f, values),
        }
    }
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

/**
A Rust type that can be stored in an option: `i64`, `f64`, `bool`, `String`,
or a `Vec` of any of those. The set is closed; each kind maps onto exactly one
[`Value`] variant.
 */
pub trait ValueKind: sealed::Sealed + Sized + 'static {
    /// The [`Value`] variant this type is stored as
    const TYPE: ValueType;

    fn into_value(self) -> Value;

    /// Borrow the payload out of a [`Value`], if it's the right variant
    fn from_value(value: &Value) -> Option<&Self>;
}

/**
The element types of option values. Each scalar knows how to parse itself
from a single token, and how to store a `Vec` of itself, which gives every
scalar a matching vector kind for free.
 */
pub trait Scalar: ValueKind + Clone + fmt::Display {
    /// The [`Value`] variant a `Vec` of this type is stored as
    const VEC_TYPE: ValueType;

    /// Parse a single command-line token
    fn parse_token(token: &str) -> Result<Self, CoercionError>;

    /// The value to use when the option appeared with no tokens at all, if
    /// that's allowed for this type.
    fn bare() -> Option<Self> {
        None
    }

    fn into_vec_value(values: Vec<Self>) -> Value;

    fn from_vec_value(value: &Value) -> Option<&Vec<Self>>;
}
