//! Token classification.
//!
//! Decides, from one raw token and the active [`ParserSettings`], whether the
//! token denotes a long option, a short option, a slash option, or a plain
//! value — and splits an inline `name=value` form when the assignment
//! character appears. Classification is purely local: it never consults the
//! option registry, so an option-shaped token may still fail to resolve to a
//! declared option later in the walk.

use serde::{Deserialize, Serialize};

use crate::settings::ParserSettings;

/// Shape of one classified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Doubled-prefix long option (`--name`).
    LongOption,
    /// Single-prefix short option (`-n`).
    ShortOption,
    /// Platform slash option (`/name`), when recognition is enabled.
    SlashOption,
    /// Anything else: values, subcommand names, unrecognized input.
    PlainValue,
}

/// Classification result for one token. Created fresh per token and
/// discarded after use; the underlying token is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Token shape.
    pub kind: TokenKind,
    /// Name with the prefix stripped; the whole token for plain values.
    pub name: String,
    /// Value attached via the assignment character, if present. An inline
    /// value short-circuits context capture entirely.
    pub inline_value: Option<String>,
    /// The original token.
    pub raw: String,
}

impl Argument {
    /// Whether the token starts with a recognized option prefix.
    pub fn is_option_shaped(&self) -> bool {
        self.kind != TokenKind::PlainValue
    }
}

/// Classifies one raw token against the active prefix configuration.
///
/// A token matches an option shape when it starts with a recognized prefix
/// and carries at least one character after it; the doubled long prefix is
/// tried before the short prefix, so `--x` is long even though it also
/// starts with the short prefix character. Inline splitting happens at the
/// FIRST occurrence of the assignment character in the remainder.
///
/// # Examples
///
/// ```
/// use argwalk_parse::{classify, ParserSettings, TokenKind};
///
/// let settings = ParserSettings::default();
///
/// let arg = classify("--angle=90", &settings);
/// assert_eq!(arg.kind, TokenKind::LongOption);
/// assert_eq!(arg.name, "angle");
/// assert_eq!(arg.inline_value.as_deref(), Some("90"));
///
/// let arg = classify("a.png", &settings);
/// assert_eq!(arg.kind, TokenKind::PlainValue);
/// assert!(arg.inline_value.is_none());
/// ```
pub fn classify(token: &str, settings: &ParserSettings) -> Argument {
    let mut long_prefix = String::with_capacity(2);
    long_prefix.push(settings.long_prefix);
    long_prefix.push(settings.long_prefix);

    if let Some(rest) = token.strip_prefix(&long_prefix) {
        if !rest.is_empty() {
            return split_inline(TokenKind::LongOption, rest, token, settings);
        }
    }
    if let Some(rest) = token.strip_prefix(settings.short_prefix) {
        if !rest.is_empty() {
            return split_inline(TokenKind::ShortOption, rest, token, settings);
        }
    }
    if settings.recognize_slash {
        if let Some(rest) = token.strip_prefix(settings.slash_prefix) {
            if !rest.is_empty() {
                return split_inline(TokenKind::SlashOption, rest, token, settings);
            }
        }
    }

    Argument {
        kind: TokenKind::PlainValue,
        name: token.to_string(),
        inline_value: None,
        raw: token.to_string(),
    }
}

fn split_inline(kind: TokenKind, rest: &str, raw: &str, settings: &ParserSettings) -> Argument {
    let (name, inline_value) = match rest.split_once(settings.assignment) {
        Some((name, value)) => (name.to_string(), Some(value.to_string())),
        None => (rest.to_string(), None),
    };
    Argument {
        kind,
        name,
        inline_value,
        raw: raw.to_string(),
    }
}
