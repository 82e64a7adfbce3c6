//! Conversion pipeline.
//!
//! Maps captured raw strings to [`TypedValue`]s. Resolution order per
//! option: an explicit converter attached to the spec, then a converter
//! registered here for the option's declared [`ValueKind`], then the
//! built-in table (text, integer, float, boolean, date). `Custom` kinds
//! have no built-in entry and fail with a no-converter error when
//! unregistered. Multi-value options map the same single-value converter
//! over each captured item, preserving input order.

use std::fmt;

use argwalk_core::{
    ConfigError, Converter, OptionKind, OptionSpec, TypedValue, ValueKind,
};
use chrono::NaiveDate;

use crate::error::{ParseError, Result};

/// Registered custom converters, keyed by value kind.
///
/// # Examples
///
/// ```
/// use argwalk_core::{TypedValue, ValueKind};
/// use argwalk_parse::ConverterRegistry;
///
/// let mut registry = ConverterRegistry::default();
/// registry
///     .register(ValueKind::Custom("upper".into()), |raw| {
///         Ok(TypedValue::Text(raw.to_uppercase()))
///     })
///     .unwrap();
///
/// // A second converter for the same kind is rejected.
/// let err = registry.register(ValueKind::Custom("upper".into()), |raw| {
///     Ok(TypedValue::Text(raw.into()))
/// });
/// assert!(err.is_err());
/// ```
#[derive(Default)]
pub struct ConverterRegistry {
    custom: Vec<(ValueKind, Converter)>,
}

impl ConverterRegistry {
    /// Registers a converter for a value kind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateConverter`] when the kind is already
    /// covered; converter output types must be pairwise distinct within one
    /// parser instance.
    pub fn register(
        &mut self,
        kind: ValueKind,
        converter: impl Fn(&str) -> std::result::Result<TypedValue, String> + Send + Sync + 'static,
    ) -> argwalk_core::Result<()> {
        if self.custom.iter().any(|(registered, _)| *registered == kind) {
            return Err(ConfigError::DuplicateConverter(kind.label().to_string()));
        }
        self.custom.push((kind, std::sync::Arc::new(converter)));
        Ok(())
    }

    /// Converts one captured raw value for `spec`.
    ///
    /// Flag-shaped kinds never capture values; when asked anyway they
    /// convert to boolean presence.
    ///
    /// # Errors
    ///
    /// - [`ParseError::ConversionFailed`] when the resolved converter
    ///   rejects the raw value, or a choice value is not one of the
    ///   accepted spellings.
    /// - [`ParseError::NoConverter`] for an unregistered `Custom` kind.
    pub fn convert_for(&self, spec: &OptionSpec, raw: &str) -> Result<TypedValue> {
        let option = spec.canonical_name();

        if let Some(converter) = spec.converter() {
            return converter(raw).map_err(|reason| ParseError::ConversionFailed {
                option: option.to_string(),
                value: raw.to_string(),
                reason,
            });
        }

        let Some(kind) = spec.kind().value_kind() else {
            return Ok(TypedValue::Boolean(true));
        };

        let converted = match self.lookup(&kind) {
            Some(converter) => converter(raw),
            None => match &kind {
                ValueKind::Custom(_) => {
                    return Err(ParseError::NoConverter {
                        option: option.to_string(),
                        kind: kind.label().to_string(),
                    });
                }
                _ => convert_builtin(&kind, raw),
            },
        };
        let value = converted.map_err(|reason| ParseError::ConversionFailed {
            option: option.to_string(),
            value: raw.to_string(),
            reason,
        })?;

        if let OptionKind::Choice { choices, .. } = spec.kind() {
            let accepted = value
                .as_text()
                .is_some_and(|text| choices.iter().any(|choice| choice == text));
            if !accepted {
                return Err(ParseError::ConversionFailed {
                    option: option.to_string(),
                    value: raw.to_string(),
                    reason: format!("expected one of: {}", choices.join(", ")),
                });
            }
        }

        Ok(value)
    }

    /// Converts a captured raw sequence in input order.
    pub fn convert_all(&self, spec: &OptionSpec, raws: &[String]) -> Result<Vec<TypedValue>> {
        raws.iter().map(|raw| self.convert_for(spec, raw)).collect()
    }

    fn lookup(&self, kind: &ValueKind) -> Option<&Converter> {
        self.custom
            .iter()
            .find(|(registered, _)| registered == kind)
            .map(|(_, converter)| converter)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self.custom.iter().map(|(kind, _)| kind.label()).collect();
        f.debug_struct("ConverterRegistry")
            .field("custom", &kinds)
            .finish()
    }
}

/// Built-in converter table. `Custom` kinds are resolved before this point.
fn convert_builtin(kind: &ValueKind, raw: &str) -> std::result::Result<TypedValue, String> {
    match kind {
        ValueKind::Text => Ok(TypedValue::Text(raw.to_string())),
        ValueKind::Integer => raw
            .parse::<i64>()
            .map(TypedValue::Integer)
            .map_err(|err| err.to_string()),
        ValueKind::Float => raw
            .parse::<f64>()
            .map(TypedValue::Float)
            .map_err(|err| err.to_string()),
        ValueKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(TypedValue::Boolean(true)),
            "false" | "no" | "off" | "0" => Ok(TypedValue::Boolean(false)),
            _ => Err(format!("not a boolean literal: {raw:?}")),
        },
        ValueKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(TypedValue::Date)
            .map_err(|err| err.to_string()),
        ValueKind::Custom(name) => Err(format!("no built-in converter for kind {name:?}")),
    }
}
