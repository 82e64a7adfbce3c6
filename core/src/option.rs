//! Option specifications.
//!
//! An [`OptionSpec`] is the declared contract for one command-line option:
//! its recognized names, behavioral flags, and an [`OptionKind`] carrying the
//! kind-specific pieces (capture policy, value kind, defaults, choices). The
//! kinds form a closed tagged union; the engine dispatches on the kind's
//! static capability surface ([`OptionKind::capture`],
//! [`OptionKind::accepts_value`], [`OptionKind::default_values`]) rather than
//! probing individual specs for optional members.
//!
//! A spec is built once at configuration time, queried many times during a
//! parse, and mutated only to flip its handled state and record bound raw
//! values.
//!
//! # Examples
//!
//! ```
//! use argwalk_core::{ContextCapture, OptionSpec, ValueKind};
//!
//! let angle = OptionSpec::value(None, Some("angle"), ValueKind::Integer, ContextCapture::ZeroOrOne)
//!     .required()
//!     .with_default("0");
//! assert_eq!(angle.canonical_name(), "angle");
//! assert!(angle.is_required());
//! assert!(!angle.is_handled());
//!
//! let verbose = OptionSpec::flag(Some("v"), Some("verbose")).with_alias("chatty");
//! assert!(verbose.matches("v"));
//! assert!(verbose.matches("chatty"));
//! assert!(!verbose.kind().accepts_value());
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::capture::ContextCapture;
use crate::value::{Converter, Restriction, TypedValue, ValueKind};

/// Closed set of option kinds.
///
/// Each variant carries exactly the fields its kind needs. Kinds without a
/// capture policy (flags, counters, help, version) implicitly use
/// [`ContextCapture::Empty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionKind {
    /// Boolean switch; presence means `true`.
    Flag,
    /// Switch whose repetitions are counted (e.g. `-vvv`).
    Counter,
    /// Help request; conventionally final.
    Help,
    /// Version request; conventionally final.
    Version,
    /// Single value converted to `value_kind`.
    Value {
        /// How many trailing tokens to capture.
        capture: ContextCapture,
        /// Declared output type.
        value_kind: ValueKind,
        /// Value injected when the option goes unhandled.
        default: Option<String>,
    },
    /// Ordered sequence of values, each converted to `value_kind`.
    MultiValue {
        /// How many trailing tokens to capture.
        capture: ContextCapture,
        /// Declared output type of each item.
        value_kind: ValueKind,
        /// Values injected when the option goes unhandled.
        default: Option<Vec<String>>,
    },
    /// Value restricted to a fixed set of spellings.
    Choice {
        /// How many trailing tokens to capture.
        capture: ContextCapture,
        /// Accepted spellings, compared exactly.
        choices: Vec<String>,
        /// Value injected when the option goes unhandled.
        default: Option<String>,
    },
}

impl OptionKind {
    /// The capture policy this kind applies to the token queue.
    pub fn capture(&self) -> ContextCapture {
        match self {
            Self::Flag | Self::Counter | Self::Help | Self::Version => ContextCapture::Empty,
            Self::Value { capture, .. }
            | Self::MultiValue { capture, .. }
            | Self::Choice { capture, .. } => *capture,
        }
    }

    /// Whether this kind carries values at all.
    pub fn accepts_value(&self) -> bool {
        matches!(
            self,
            Self::Value { .. } | Self::MultiValue { .. } | Self::Choice { .. }
        )
    }

    /// Whether this kind is a bare switch (captures nothing). Compound
    /// short-flag chaining only chains through flag-shaped kinds.
    pub fn is_flag_shaped(&self) -> bool {
        !self.accepts_value()
    }

    /// Declared output type for captured values, when the kind has one.
    /// `Choice` values convert as text before the membership check.
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Value { value_kind, .. } | Self::MultiValue { value_kind, .. } => {
                Some(value_kind.clone())
            }
            Self::Choice { .. } => Some(ValueKind::Text),
            _ => None,
        }
    }

    /// Declared default values, when the kind has a default slot and it is
    /// filled.
    pub fn default_values(&self) -> Option<Vec<String>> {
        match self {
            Self::Value { default, .. } | Self::Choice { default, .. } => {
                default.as_ref().map(|value| vec![value.clone()])
            }
            Self::MultiValue { default, .. } => default.clone(),
            _ => None,
        }
    }
}

/// Declared contract for one option.
///
/// Built with the kind-specific constructors ([`flag`](Self::flag),
/// [`value`](Self::value), [`multi_value`](Self::multi_value), ...) and
/// refined with chaining methods. At least one of the long and short names
/// must be non-empty; the option registry enforces this on registration.
#[derive(Clone)]
pub struct OptionSpec {
    long: Option<String>,
    short: Option<String>,
    aliases: Vec<String>,
    required: bool,
    hidden: bool,
    is_final: bool,
    kind: OptionKind,
    converter: Option<Converter>,
    restriction: Option<Restriction>,
    handled: bool,
    occurrences: u32,
    bound: Vec<String>,
}

impl OptionSpec {
    fn new(short: Option<&str>, long: Option<&str>, kind: OptionKind) -> Self {
        Self {
            long: long.map(String::from),
            short: short.map(String::from),
            aliases: Vec::new(),
            required: false,
            hidden: false,
            is_final: false,
            kind,
            converter: None,
            restriction: None,
            handled: false,
            occurrences: 0,
            bound: Vec::new(),
        }
    }

    /// Creates a boolean switch.
    pub fn flag(short: Option<&str>, long: Option<&str>) -> Self {
        Self::new(short, long, OptionKind::Flag)
    }

    /// Creates a counted switch (`-vvv` style).
    pub fn counter(short: Option<&str>, long: Option<&str>) -> Self {
        Self::new(short, long, OptionKind::Counter)
    }

    /// Creates the conventional help option (`?` / `help`), marked final.
    pub fn help() -> Self {
        Self::new(Some("?"), Some("help"), OptionKind::Help).final_option()
    }

    /// Creates the conventional version option, marked final.
    pub fn version() -> Self {
        Self::new(None, Some("version"), OptionKind::Version).final_option()
    }

    /// Creates a single-value option.
    pub fn value(
        short: Option<&str>,
        long: Option<&str>,
        value_kind: ValueKind,
        capture: ContextCapture,
    ) -> Self {
        Self::new(
            short,
            long,
            OptionKind::Value {
                capture,
                value_kind,
                default: None,
            },
        )
    }

    /// Creates a multiple-value option.
    pub fn multi_value(
        short: Option<&str>,
        long: Option<&str>,
        value_kind: ValueKind,
        capture: ContextCapture,
    ) -> Self {
        Self::new(
            short,
            long,
            OptionKind::MultiValue {
                capture,
                value_kind,
                default: None,
            },
        )
    }

    /// Creates an option restricted to a fixed set of spellings.
    pub fn choice(
        short: Option<&str>,
        long: Option<&str>,
        choices: &[&str],
        capture: ContextCapture,
    ) -> Self {
        Self::new(
            short,
            long,
            OptionKind::Choice {
                capture,
                choices: choices.iter().map(|c| c.to_string()).collect(),
                default: None,
            },
        )
    }

    /// Adds an alias. Aliases resolve exactly like primary names.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Marks the option required; an unhandled required option fails the
    /// end-of-parse sweep.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Hides the option from display surfaces. Parsing is unaffected.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Marks the option final: the walk stops right after it binds and the
    /// remaining tokens pass through as unrecognized.
    pub fn final_option(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Sets the default value. Has no effect on kinds without a default
    /// slot (flags, counters, help, version).
    pub fn with_default(mut self, value: &str) -> Self {
        match &mut self.kind {
            OptionKind::Value { default, .. } | OptionKind::Choice { default, .. } => {
                *default = Some(value.to_string());
            }
            OptionKind::MultiValue { default, .. } => {
                *default = Some(vec![value.to_string()]);
            }
            _ => {}
        }
        self
    }

    /// Sets multiple default values on a multiple-value option. Has no
    /// effect on other kinds.
    pub fn with_defaults(mut self, values: &[&str]) -> Self {
        if let OptionKind::MultiValue { default, .. } = &mut self.kind {
            *default = Some(values.iter().map(|v| v.to_string()).collect());
        }
        self
    }

    /// Attaches an explicit converter, bypassing kind-based resolution.
    pub fn with_converter(
        mut self,
        converter: impl Fn(&str) -> Result<TypedValue, String> + Send + Sync + 'static,
    ) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Attaches a post-conversion restriction predicate.
    pub fn with_restriction(
        mut self,
        restriction: impl Fn(&TypedValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.restriction = Some(Arc::new(restriction));
        self
    }

    /// Long name without prefix, if declared.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Short name without prefix, if declared.
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Registered aliases.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The option's kind and capability surface.
    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// Explicit converter, if one was attached.
    pub fn converter(&self) -> Option<&Converter> {
        self.converter.as_ref()
    }

    /// Whether the option must be handled for a parse to succeed.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the option is hidden from display surfaces.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether the option stops the walk once bound.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Canonical display name: long form preferred, then short, then the
    /// first alias.
    pub fn canonical_name(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .or_else(|| self.aliases.first().map(String::as_str))
            .unwrap_or("")
    }

    /// Whether `name` is one of this option's recognized names
    /// (case-sensitive, exact).
    pub fn matches(&self, name: &str) -> bool {
        self.long.as_deref() == Some(name)
            || self.short.as_deref() == Some(name)
            || self.aliases.iter().any(|alias| alias == name)
    }

    /// All recognized names, in long/short/alias order.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.long
            .as_deref()
            .into_iter()
            .chain(self.short.as_deref())
            .chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether the option has been bound during the current parse.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// How many times the option was sighted during the current parse.
    pub fn occurrences(&self) -> u32 {
        self.occurrences
    }

    /// Raw values bound during the current parse, in capture order.
    pub fn bound_raw(&self) -> &[String] {
        &self.bound
    }

    /// Records one sighting: increments the occurrence count and flips the
    /// handled state on the first sighting only. Returns `true` when this
    /// was the first.
    pub fn note_occurrence(&mut self) -> bool {
        self.occurrences += 1;
        if self.handled {
            false
        } else {
            self.handled = true;
            true
        }
    }

    /// Appends captured raw values to the bound record.
    pub fn bind_raw(&mut self, values: &[String]) {
        self.bound.extend_from_slice(values);
    }

    /// Applies the restriction predicate, vacuously true when none is
    /// attached.
    pub fn allows(&self, value: &TypedValue) -> bool {
        self.restriction.as_ref().is_none_or(|check| check(value))
    }

    /// Clears handled/occurrence/bound state so the spec can serve a fresh
    /// parse. Never called mid-parse.
    pub fn reset(&mut self) {
        self.handled = false;
        self.occurrences = 0;
        self.bound.clear();
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("long", &self.long)
            .field("short", &self.short)
            .field("aliases", &self.aliases)
            .field("required", &self.required)
            .field("hidden", &self.hidden)
            .field("is_final", &self.is_final)
            .field("kind", &self.kind)
            .field("has_converter", &self.converter.is_some())
            .field("has_restriction", &self.restriction.is_some())
            .field("handled", &self.handled)
            .field("occurrences", &self.occurrences)
            .field("bound", &self.bound)
            .finish()
    }
}
