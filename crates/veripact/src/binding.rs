//! Positional parameter binding: converting captured string tokens into the
//! typed arguments a state handler declares.
//!
//! The binder runs once per positional parameter, after capture extraction
//! and before the handler is invoked. Map-shaped and zero-argument handlers
//! never involve it.

use thiserror::Error;

use crate::definition::ParamType;
use crate::model::StateParams;

/// A typed argument bound from one captured token.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Token passed through unchanged.
    Str(String),
    /// Token parsed as `i32`.
    Int(i32),
    /// Token parsed as `i64`.
    Long(i64),
    /// Token parsed as `f32`.
    Float(f32),
    /// Token parsed as `f64`.
    Double(f64),
    /// Comma-separated token split into trimmed, non-empty pieces, in
    /// left-to-right order.
    List(Vec<String>),
}

impl ParamValue {
    /// The string form, when bound as a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The `i32` form, when bound as one.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The `i64` form, when bound as one.
    #[must_use]
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// The `f32` form, when bound as one.
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The `f64` form, when bound as one.
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// The list form, when bound as a string collection.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

/// Arguments passed to a state handler invocation.
#[derive(Debug)]
pub enum StateArgs<'a> {
    /// Zero-parameter handler.
    None,
    /// The provider state's parameter map, passed through unmodified.
    Map(&'a StateParams),
    /// Positionally bound arguments, in declaration order.
    Positional(Vec<ParamValue>),
}

impl StateArgs<'_> {
    /// The parameter map, for map-shaped invocations.
    #[must_use]
    pub fn param_map(&self) -> Option<&StateParams> {
        match self {
            Self::Map(params) => Some(params),
            _ => None,
        }
    }

    /// The positional arguments; empty for map-shaped and zero-argument
    /// invocations.
    #[must_use]
    pub fn positional(&self) -> &[ParamValue] {
        match self {
            Self::Positional(values) => values,
            _ => &[],
        }
    }
}

/// Errors raised while binding captured tokens to declared parameters.
///
/// Every variant carries the structured fields a handler author needs to fix
/// the declaration, not just a formatted message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindingError {
    /// Capture-group count differs from the handler's parameter count.
    #[error(
        "provider state '{state}' matches pattern '{pattern}' but the handler declares \
         {expected} parameter(s) while the pattern captures {actual}"
    )]
    ArgumentCountMismatch {
        /// Name of the provider state under resolution.
        state: String,
        /// The pattern that matched the state name.
        pattern: String,
        /// Parameter count the handler declares.
        expected: usize,
        /// Capture groups the pattern produced.
        actual: usize,
    },
    /// A token is not a valid literal of the declared numeric type.
    #[error("cannot convert token '{token}' for parameter {index} into {ty}")]
    TypeConversion {
        /// The captured token that failed to parse.
        token: String,
        /// Name of the declared type.
        ty: &'static str,
        /// Zero-based parameter index.
        index: usize,
    },
    /// The declared parameter type is not bindable.
    #[error(
        "parameter {index} declares unsupported type {ty}; supported types are strings, \
         i32/i64/f32/f64 numerics, and string collections"
    )]
    UnsupportedParameterType {
        /// Name of the offending type.
        ty: &'static str,
        /// Zero-based parameter index.
        index: usize,
    },
}

/// Convert one captured token into the declared parameter type.
///
/// # Errors
///
/// Returns [`BindingError::TypeConversion`] when a numeric token does not
/// parse at the declared width, and [`BindingError::UnsupportedParameterType`]
/// for declared types outside the supported set.
pub fn bind_token(ty: ParamType, token: &str, index: usize) -> Result<ParamValue, BindingError> {
    match ty {
        ParamType::Str => Ok(ParamValue::Str(token.to_string())),
        ParamType::Int => token
            .parse()
            .map(ParamValue::Int)
            .map_err(|_| conversion(ty, token, index)),
        ParamType::Long => token
            .parse()
            .map(ParamValue::Long)
            .map_err(|_| conversion(ty, token, index)),
        ParamType::Float => token
            .parse()
            .map(ParamValue::Float)
            .map_err(|_| conversion(ty, token, index)),
        ParamType::Double => token
            .parse()
            .map(ParamValue::Double)
            .map_err(|_| conversion(ty, token, index)),
        ParamType::StringList => Ok(ParamValue::List(split_list(token))),
        ParamType::Other(name) => Err(BindingError::UnsupportedParameterType { ty: name, index }),
    }
}

/// Bind every captured token against the declared positional types.
///
/// Token and type counts are equal by the time this runs; capture extraction
/// enforces the count beforehand.
///
/// # Errors
///
/// Propagates the first per-token failure from [`bind_token`].
pub fn bind_all(types: &[ParamType], tokens: &[String]) -> Result<Vec<ParamValue>, BindingError> {
    types
        .iter()
        .zip(tokens)
        .enumerate()
        .map(|(index, (&ty, token))| bind_token(ty, token, index))
        .collect()
}

fn conversion(ty: ParamType, token: &str, index: usize) -> BindingError {
    BindingError::TypeConversion {
        token: token.to_string(),
        ty: ty.name(),
        index,
    }
}

fn split_list(token: &str) -> Vec<String> {
    token
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn string_tokens_pass_through_unchanged() {
        assert_eq!(
            bind_token(ParamType::Str, " spaced ", 0),
            Ok(ParamValue::Str(" spaced ".into()))
        );
    }

    #[rstest]
    #[case(ParamType::Int, "42", ParamValue::Int(42))]
    #[case(ParamType::Long, "-9000000000", ParamValue::Long(-9_000_000_000))]
    #[case(ParamType::Float, "1.5", ParamValue::Float(1.5))]
    #[case(ParamType::Double, "2.25", ParamValue::Double(2.25))]
    fn numeric_tokens_round_trip_at_declared_width(
        #[case] ty: ParamType,
        #[case] token: &str,
        #[case] expected: ParamValue,
    ) {
        assert_eq!(bind_token(ty, token, 0), Ok(expected));
    }

    #[rstest]
    #[case(ParamType::Int, "forty-two", "i32")]
    #[case(ParamType::Int, "9000000000", "i32")]
    #[case(ParamType::Long, "1.5", "i64")]
    #[case(ParamType::Double, "not-a-number", "f64")]
    fn invalid_numeric_tokens_report_conversion_failures(
        #[case] ty: ParamType,
        #[case] token: &str,
        #[case] name: &'static str,
    ) {
        assert_eq!(
            bind_token(ty, token, 3),
            Err(BindingError::TypeConversion {
                token: token.into(),
                ty: name,
                index: 3,
            })
        );
    }

    #[test]
    fn list_tokens_split_on_commas_and_trim() {
        assert_eq!(
            bind_token(ParamType::StringList, "a, b ,c", 0),
            Ok(ParamValue::List(vec![
                "a".into(),
                "b".into(),
                "c".into()
            ]))
        );
    }

    #[test]
    fn list_tokens_drop_empty_pieces() {
        assert_eq!(
            bind_token(ParamType::StringList, "a,,b,", 0),
            Ok(ParamValue::List(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn unsupported_types_are_named_in_the_error() {
        assert_eq!(
            bind_token(ParamType::Other("uuid::Uuid"), "anything", 1),
            Err(BindingError::UnsupportedParameterType {
                ty: "uuid::Uuid",
                index: 1,
            })
        );
    }

    #[test]
    fn bind_all_reports_the_failing_index() {
        let types = [ParamType::Str, ParamType::Int];
        let tokens = vec!["fine".to_string(), "nope".to_string()];
        assert_eq!(
            bind_all(&types, &tokens),
            Err(BindingError::TypeConversion {
                token: "nope".into(),
                ty: "i32",
                index: 1,
            })
        );
    }
}
