//! Parse-time error types.
//!
//! Everything here is raised while a token queue is being walked (or during
//! the end-of-parse required sweep); configuration-time failures live in
//! `argwalk_core::ConfigError`. Each error aborts the current parse
//! synchronously — bindings made before the failure remain recorded, but the
//! error is what surfaces to the caller.

use thiserror::Error;

/// Errors raised while walking a token queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The capture policy needed more values than the queue offered.
    #[error("option '{option}' expects at least {expected} value(s), only {available} available")]
    NotEnoughValues {
        /// Canonical name of the option being bound.
        option: String,
        /// Minimum number of values the policy requires.
        expected: usize,
        /// Suitable values actually available.
        available: usize,
    },
    /// A captured raw value could not be converted to the declared kind.
    #[error("cannot convert '{value}' for option '{option}': {reason}")]
    ConversionFailed {
        /// Canonical name of the option being bound.
        option: String,
        /// The raw value that failed.
        value: String,
        /// Converter-supplied reason.
        reason: String,
    },
    /// The option declares a value kind with no built-in or registered
    /// converter.
    #[error("no converter found for value kind '{kind}' required by option '{option}'")]
    NoConverter {
        /// Canonical name of the option being bound.
        option: String,
        /// Label of the unconvertible kind.
        kind: String,
    },
    /// A converted value was rejected by the option's restriction predicate.
    #[error("value '{value}' rejected by restriction on option '{option}'")]
    RestrictionViolated {
        /// Canonical name of the option being bound.
        option: String,
        /// Display form of the rejected value.
        value: String,
    },
    /// An inline value was attached to an option that takes no values.
    #[error("option '{option}' does not take a value (got '{value}')")]
    UnexpectedInlineValue {
        /// Canonical name of the option being bound.
        option: String,
        /// The inline value that was supplied.
        value: String,
    },
    /// A required option in an entered scope was never handled.
    #[error("required option not specified: {0}")]
    RequiredOptionNotSpecified(String),
    /// A second member of a mutually-exclusive group was handled.
    #[error("options '{first}' and '{second}' in group '{group}' are mutually exclusive")]
    MutuallyExclusiveOptions {
        /// Name of the violated group.
        group: String,
        /// Member handled first.
        first: String,
        /// Member whose handling triggered the violation.
        second: String,
    },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
