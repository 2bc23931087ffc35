/*!
Implementations of the [`value`][crate::value] traits for the four scalar
types and their vectors.
 */

use log::debug;

use crate::errors::CoercionError;
use crate::value::{Scalar, Value, ValueKind, ValueType, sealed::Sealed};

impl Sealed for i64 {}

impl ValueKind for i64 {
    const TYPE: ValueType = ValueType::Int;

    #[inline]
    fn into_value(self) -> Value {
        Value::Int(self)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Int(value) => Some(value),
            _ => None,
        }
    }
}

impl Scalar for i64 {
    const VEC_TYPE: ValueType = ValueType::IntVec;

    fn parse_token(token: &str) -> Result<Self, CoercionError> {
        token
            .parse()
            .map_err(|err| CoercionError::invalid(token, Self::TYPE, err))
    }

    #[inline]
    fn into_vec_value(values: Vec<Self>) -> Value {
        Value::IntVec(values)
    }

    #[inline]
    fn from_vec_value(value: &Value) -> Option<&Vec<Self>> {
        match value {
            Value::IntVec(values) => Some(values),
            _ => None,
        }
    }
}

impl Sealed for f64 {}

impl ValueKind for f64 {
    const TYPE: ValueType = ValueType::Float;

    #[inline]
    fn into_value(self) -> Value {
        Value::Float(self)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(value) => Some(value),
            _ => None,
        }
    }
}

impl Scalar for f64 {
    const VEC_TYPE: ValueType = ValueType::FloatVec;

    fn parse_token(token: &str) -> Result<Self, CoercionError> {
        token
            .parse()
            .map_err(|err| CoercionError::invalid(token, Self::TYPE, err))
    }

    #[inline]
    fn into_vec_value(values: Vec<Self>) -> Value {
        Value::FloatVec(values)
    }

    #[inline]
    fn from_vec_value(value: &Value) -> Option<&Vec<Self>> {
        match value {
            Value::FloatVec(values) => Some(values),
            _ => None,
        }
    }
}

impl Sealed for bool {}

impl ValueKind for bool {
    const TYPE: ValueType = ValueType::Bool;

    #[inline]
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Bool(value) => Some(value),
            _ => None,
        }
    }
}

/// Booleans accept `on`/`off`, `true`/`false`, and `1`/`0`, in any case. Any
/// other integer is also accepted, and is true if it's nonzero.
impl Scalar for bool {
    const VEC_TYPE: ValueType = ValueType::BoolVec;

    fn parse_token(token: &str) -> Result<Self, CoercionError> {
        match token.to_ascii_lowercase().as_str() {
            "on" | "1" | "true" => Ok(true),
            "off" | "0" | "false" => Ok(false),
            _ => match token.parse::<i64>() {
                Ok(number) => {
                    debug!("treating integer {number} as a boolean");
                    Ok(number != 0)
                }
                Err(_) => Err(CoercionError::invalid(
                    token,
                    Self::TYPE,
                    "expected on/off, true/false, or an integer",
                )),
            },
        }
    }

    #[inline]
    fn bare() -> Option<Self> {
        Some(true)
    }

    #[inline]
    fn into_vec_value(values: Vec<Self>) -> Value {
        Value::BoolVec(values)
    }

    #[inline]
    fn from_vec_value(value: &Value) -> Option<&Vec<Self>> {
        match value {
            Value::BoolVec(values) => Some(values),
            _ => None,
        }
    }
}

impl Sealed for String {}

impl ValueKind for String {
    const TYPE: ValueType = ValueType::Str;

    #[inline]
    fn into_value(self) -> Value {
        Value::Str(self)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl Scalar for String {
    const VEC_TYPE: ValueType = ValueType::StrVec;

    #[inline]
    fn parse_token(token: &str) -> Result<Self, CoercionError> {
        Ok(token.to_owned())
    }

    #[inline]
    fn into_vec_value(values: Vec<Self>) -> Value {
        Value::StrVec(values)
    }

    #[inline]
    fn from_vec_value(value: &Value) -> Option<&Vec<Self>> {
        match value {
            Value::StrVec(values) => Some(values),
            _ => None,
        }
    }
}

impl<T: Scalar> Sealed for Vec<T> {}

impl<T: Scalar> ValueKind for Vec<T> {
    const TYPE: ValueType = T::VEC_TYPE;

    #[inline]
    fn into_value(self) -> Value {
        T::into_vec_value(self)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<&Self> {
        T::from_vec_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_keywords_ignore_case() {
        for token in ["on", "ON", "1", "true", "True"] {
            assert_eq!(bool::parse_token(token), Ok(true), "{token}");
        }

        for token in ["off", "Off", "0", "false", "FALSE"] {
            assert_eq!(bool::parse_token(token), Ok(false), "{token}");
        }
    }

    #[test]
    fn boolean_numeric_fallback() {
        assert_eq!(bool::parse_token("42"), Ok(true));
        assert_eq!(bool::parse_token("-1"), Ok(true));
        assert_eq!(bool::parse_token("00"), Ok(false));
    }

    #[test]
    fn boolean_garbage_is_an_error() {
        let error = bool::parse_token("maybe").unwrap_err();
        assert_eq!(error.token(), Some("maybe"));
        assert_eq!(error.expected(), ValueType::Bool);
    }

    #[test]
    fn numbers() {
        assert_eq!(i64::parse_token("-5"), Ok(-5));
        assert_eq!(f64::parse_token("174.5"), Ok(174.5));
        assert!(i64::parse_token("5.5").is_err());
        assert!(i64::parse_token("twelve").is_err());
        assert!(f64::parse_token("").is_err());
    }

    #[test]
    fn vector_kinds_map_to_vector_variants() {
        assert_eq!(<Vec<i64>>::TYPE, ValueType::IntVec);
        assert_eq!(<Vec<String>>::TYPE, ValueType::StrVec);

        let value = vec![1.5_f64, 2.5].into_value();
        assert_eq!(<Vec<f64>>::from_value(&value), Some(&vec![1.5, 2.5]));
        assert_eq!(<Vec<bool>>::from_value(&value), None);
        assert_eq!(f64::from_value(&value), None);
    }
}
