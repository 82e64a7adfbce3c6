//! Context-capture policies.
//!
//! A capture policy decides how many trailing tokens an option consumes as
//! its values. Policies are stateless value objects; the actual counting
//! against a token queue happens in the `argwalk-parse` crate, which combines
//! a policy's bounds with the number of suitable values available.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// How many trailing tokens an option captures as its values.
///
/// # Examples
///
/// ```
/// use argwalk_core::ContextCapture;
///
/// let exactly_two = ContextCapture::fixed(2).unwrap();
/// assert_eq!(exactly_two.min_items(), 2);
/// assert_eq!(exactly_two.max_items(), Some(2));
///
/// assert_eq!(ContextCapture::ZeroOrMore.max_items(), None);
/// assert!(ContextCapture::fixed(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContextCapture {
    /// Captures nothing; the option is a bare switch (the default).
    #[default]
    Empty,
    /// Captures at most one value if one is available.
    ZeroOrOne,
    /// Captures every suitable value up to the next option or subcommand.
    ZeroOrMore,
    /// Like [`ZeroOrMore`](Self::ZeroOrMore) but at least one value must be
    /// available.
    OneOrMore,
    /// Captures exactly this many values; fewer available is an error.
    Fixed(usize),
}

impl ContextCapture {
    /// Creates a fixed-count capture. The count must be positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFixedCount`] for a zero count.
    pub fn fixed(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(ConfigError::InvalidFixedCount);
        }
        Ok(Self::Fixed(count))
    }

    /// Recognizes a policy from a raw `(min, max)` bounds pair.
    ///
    /// This is the lower-level configuration path: `None` stands for an
    /// unspecified/unbounded bound. Recognized pairs:
    ///
    /// | min       | max       | policy       |
    /// |-----------|-----------|--------------|
    /// | `None`    | `None`    | `Empty`      |
    /// | `Some(0)` | `Some(1)` | `ZeroOrOne`  |
    /// | `Some(0)` | `None`    | `ZeroOrMore` |
    /// | `Some(1)` | `None`    | `OneOrMore`  |
    /// | `Some(k)` | `Some(k)` | `Fixed(k)`   |
    ///
    /// # Examples
    ///
    /// ```
    /// use argwalk_core::ContextCapture;
    ///
    /// assert_eq!(
    ///     ContextCapture::from_bounds(Some(0), None).unwrap(),
    ///     ContextCapture::ZeroOrMore,
    /// );
    /// assert!(ContextCapture::from_bounds(Some(2), Some(5)).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Any other pair returns [`ConfigError::CaptureBoundsNotRecognized`].
    pub fn from_bounds(min: Option<usize>, max: Option<usize>) -> Result<Self> {
        match (min, max) {
            (None, None) => Ok(Self::Empty),
            (Some(0), Some(1)) => Ok(Self::ZeroOrOne),
            (Some(0), None) => Ok(Self::ZeroOrMore),
            (Some(1), None) => Ok(Self::OneOrMore),
            (Some(lo), Some(hi)) if lo == hi && lo > 0 => Ok(Self::Fixed(lo)),
            _ => Err(ConfigError::CaptureBoundsNotRecognized { min, max }),
        }
    }

    /// Minimum number of values the policy requires.
    pub fn min_items(&self) -> usize {
        match self {
            Self::Empty | Self::ZeroOrOne | Self::ZeroOrMore => 0,
            Self::OneOrMore => 1,
            Self::Fixed(count) => *count,
        }
    }

    /// Maximum number of values the policy accepts, `None` when unbounded.
    pub fn max_items(&self) -> Option<usize> {
        match self {
            Self::Empty => Some(0),
            Self::ZeroOrOne => Some(1),
            Self::ZeroOrMore | Self::OneOrMore => None,
            Self::Fixed(count) => Some(*count),
        }
    }
}
