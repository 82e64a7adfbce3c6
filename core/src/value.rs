//! Value kinds and typed values.
//!
//! [`ValueKind`] declares what an option's captured strings should convert
//! into; [`TypedValue`] is the converted result. The conversion itself lives
//! in the `argwalk-parse` crate, which keys its built-in converter table by
//! `ValueKind`.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declared output type for an option's values.
///
/// `Custom` kinds have no built-in converter; one must be registered with
/// the parser's converter registry before the first parse.
///
/// # Examples
///
/// ```
/// use argwalk_core::ValueKind;
///
/// assert_eq!(ValueKind::default(), ValueKind::Text);
///
/// let kind = ValueKind::Custom("ipv4".into());
/// assert_eq!(kind.label(), "ipv4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueKind {
    /// Plain string value (the default).
    #[default]
    Text,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit floating point number.
    Float,
    /// Boolean (`true/false`, `yes/no`, `on/off`, `1/0`).
    Boolean,
    /// Calendar date in ISO `YYYY-MM-DD` form.
    Date,
    /// Caller-defined kind, converted by a registered converter.
    Custom(String),
}

impl ValueKind {
    /// Stable string label for this kind, used in error messages and
    /// converter-registry bookkeeping.
    pub fn label(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Custom(name) => name,
        }
    }
}

/// A converted option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    /// String value.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// Calendar date.
    Date(NaiveDate),
}

impl TypedValue {
    /// Returns the string payload if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer payload if this is an `Integer` value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float payload if this is a `Float` value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean payload if this is a `Boolean` value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the date payload if this is a `Date` value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Date(value) => write!(f, "{value}"),
        }
    }
}

/// Single-value converter attached directly to one option.
///
/// Takes the captured raw string and produces a typed value or a reason
/// string explaining the failure. The parse crate wraps the reason into its
/// structured conversion error.
pub type Converter = Arc<dyn Fn(&str) -> Result<TypedValue, String> + Send + Sync>;

/// Post-conversion predicate attached to one option.
///
/// Invoked with each converted value before the option is marked handled; a
/// `false` result fails the parse with a restriction error naming the option.
pub type Restriction = Arc<dyn Fn(&TypedValue) -> bool + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_value_accessors() {
        assert_eq!(TypedValue::Integer(90).as_integer(), Some(90));
        assert_eq!(TypedValue::Integer(90).as_text(), None);
        assert_eq!(TypedValue::Boolean(true).as_boolean(), Some(true));
        assert_eq!(TypedValue::Text("a.png".into()).as_text(), Some("a.png"));
    }

    #[test]
    fn test_typed_value_display() {
        assert_eq!(TypedValue::Integer(-4).to_string(), "-4");
        assert_eq!(TypedValue::Text("x".into()).to_string(), "x");
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(TypedValue::Date(date).to_string(), "2024-01-01");
    }

    #[test]
    fn test_value_kind_round_trips_through_json() {
        let kind = ValueKind::Custom("ipv4".into());
        let json = serde_json::to_string(&kind).unwrap();
        let back: ValueKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
