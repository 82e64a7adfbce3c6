//! Parser settings.
//!
//! Controls the prefix conventions the token classifier recognizes and the
//! engine's pre-walk behavior. Defaults follow the common Unix convention:
//! `--name` long options, `-n` short options, `=` inline assignment, with
//! slash options and compound short flags disabled.

use argwalk_core::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Prefix, assignment, and engine configuration for one parser.
///
/// # Examples
///
/// ```
/// use argwalk_parse::ParserSettings;
///
/// let settings = ParserSettings::default();
/// assert_eq!(settings.long_prefix, '-');
/// assert_eq!(settings.assignment, '=');
/// assert!(settings.validate().is_ok());
///
/// let bad = ParserSettings { slash_prefix: '-', recognize_slash: true, ..Default::default() };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserSettings {
    /// Character doubled to form the long-option prefix (default `-`, so
    /// long options start with `--`).
    pub long_prefix: char,
    /// Single character forming the short-option prefix (default `-`).
    pub short_prefix: char,
    /// Single character forming the platform slash prefix (default `/`).
    pub slash_prefix: char,
    /// Inline assignment character splitting `name=value` (default `=`).
    pub assignment: char,
    /// Whether slash-prefixed tokens are recognized as options.
    pub recognize_slash: bool,
    /// Whether multi-character short tokens chain into single-character
    /// flags (`-vqf` as `-v -q -f`).
    pub compound_short_flags: bool,
    /// Leading tokens dropped before the walk begins (e.g. the program
    /// name).
    pub skip_tokens: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            long_prefix: '-',
            short_prefix: '-',
            slash_prefix: '/',
            assignment: '=',
            recognize_slash: false,
            compound_short_flags: false,
            skip_tokens: 0,
        }
    }
}

impl ParserSettings {
    /// Validates the configured characters.
    ///
    /// Prefix and assignment characters may not be letters or digits. The
    /// slash prefix must differ from both the long and short prefix
    /// characters, and the assignment character from all three. The long
    /// and short characters may coincide (the default): the doubled long
    /// prefix keeps the two forms distinguishable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettings`] describing the first
    /// violation found.
    pub fn validate(&self) -> Result<()> {
        for (label, ch) in [
            ("long prefix", self.long_prefix),
            ("short prefix", self.short_prefix),
            ("slash prefix", self.slash_prefix),
            ("assignment", self.assignment),
        ] {
            if ch.is_alphanumeric() {
                return Err(ConfigError::InvalidSettings(format!(
                    "{label} character {ch:?} may not be a letter or digit"
                )));
            }
        }
        if self.slash_prefix == self.long_prefix || self.slash_prefix == self.short_prefix {
            return Err(ConfigError::InvalidSettings(format!(
                "slash prefix {:?} must differ from the long and short prefixes",
                self.slash_prefix
            )));
        }
        if self.assignment == self.long_prefix
            || self.assignment == self.short_prefix
            || self.assignment == self.slash_prefix
        {
            return Err(ConfigError::InvalidSettings(format!(
                "assignment character {:?} must differ from every prefix character",
                self.assignment
            )));
        }
        Ok(())
    }
}
