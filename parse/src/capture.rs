//! Capture evaluation against a token queue.
//!
//! Combines a [`ContextCapture`] policy's bounds with the number of suitable
//! values actually available at the front of the remaining queue. A token is
//! suitable while it neither looks like an option (declared or not) nor
//! names a direct child subcommand of the current scope.

use argwalk_core::{CommandScope, ContextCapture};

use crate::error::{ParseError, Result};
use crate::settings::ParserSettings;
use crate::token::classify;

/// Counts the values naturally available at the front of `remaining`.
///
/// Scanning stops at the first token that classifies as option-shaped —
/// whether or not it resolves to a declared option — or that names a direct
/// child of `scope`, or at end of queue.
///
/// # Examples
///
/// ```
/// use argwalk_core::CommandScope;
/// use argwalk_parse::{count_suitable_values, ParserSettings};
///
/// let scope = CommandScope::root();
/// let remaining: Vec<String> = ["a", "b", "--flag", "c"]
///     .iter().map(|t| t.to_string()).collect();
/// let n = count_suitable_values(&remaining, &scope, &ParserSettings::default());
/// assert_eq!(n, 2); // stops before "--flag"
/// ```
pub fn count_suitable_values(
    remaining: &[String],
    scope: &CommandScope,
    settings: &ParserSettings,
) -> usize {
    remaining
        .iter()
        .take_while(|token| {
            !classify(token, settings).is_option_shaped() && scope.find_child(token).is_none()
        })
        .count()
}

/// Computes how many tokens the given policy captures from `remaining`.
///
/// # Errors
///
/// Returns [`ParseError::NotEnoughValues`] when a `OneOrMore` or `Fixed`
/// policy finds fewer suitable values than its minimum; `option` names the
/// option being bound in that error.
pub fn items_to_capture(
    option: &str,
    capture: ContextCapture,
    remaining: &[String],
    scope: &CommandScope,
    settings: &ParserSettings,
) -> Result<usize> {
    let available = count_suitable_values(remaining, scope, settings);
    match capture {
        ContextCapture::Empty => Ok(0),
        ContextCapture::ZeroOrOne => Ok(available.min(1)),
        ContextCapture::ZeroOrMore => Ok(available),
        ContextCapture::OneOrMore => {
            if available < 1 {
                Err(ParseError::NotEnoughValues {
                    option: option.to_string(),
                    expected: 1,
                    available,
                })
            } else {
                Ok(available)
            }
        }
        ContextCapture::Fixed(count) => {
            if available < count {
                Err(ParseError::NotEnoughValues {
                    option: option.to_string(),
                    expected: count,
                    available,
                })
            } else {
                Ok(count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn scope_with_status_child() -> CommandScope {
        CommandScope::root()
            .with_subcommand(CommandScope::new("status").unwrap())
            .unwrap()
    }

    #[test]
    fn test_count_stops_at_option_shaped_token() {
        let scope = CommandScope::root();
        let remaining = tokens(&["a", "b", "--flag", "c"]);
        assert_eq!(
            count_suitable_values(&remaining, &scope, &ParserSettings::default()),
            2
        );
    }

    #[test]
    fn test_count_stops_at_undeclared_option_lookalike() {
        // The stop rule is shape-based, independent of the registry.
        let scope = CommandScope::root();
        let remaining = tokens(&["x", "--no-such-option", "y"]);
        assert_eq!(
            count_suitable_values(&remaining, &scope, &ParserSettings::default()),
            1
        );
    }

    #[test]
    fn test_count_stops_at_child_subcommand_name() {
        let scope = scope_with_status_child();
        let remaining = tokens(&["a.png", "status", "b.png"]);
        assert_eq!(
            count_suitable_values(&remaining, &scope, &ParserSettings::default()),
            1
        );
    }

    #[test]
    fn test_count_reaches_end_of_queue() {
        let scope = CommandScope::root();
        let remaining = tokens(&["a", "b", "c"]);
        assert_eq!(
            count_suitable_values(&remaining, &scope, &ParserSettings::default()),
            3
        );
    }

    #[test]
    fn test_policies_over_two_available_values() {
        let scope = CommandScope::root();
        let settings = ParserSettings::default();
        let remaining = tokens(&["a", "b", "--flag"]);

        let n = |capture| items_to_capture("input", capture, &remaining, &scope, &settings);
        assert_eq!(n(ContextCapture::Empty), Ok(0));
        assert_eq!(n(ContextCapture::ZeroOrOne), Ok(1));
        assert_eq!(n(ContextCapture::ZeroOrMore), Ok(2));
        assert_eq!(n(ContextCapture::OneOrMore), Ok(2));
        assert_eq!(n(ContextCapture::Fixed(2)), Ok(2));
    }

    #[test]
    fn test_one_or_more_shortfall() {
        let scope = CommandScope::root();
        let remaining = tokens(&["--next"]);
        assert_eq!(
            items_to_capture(
                "input",
                ContextCapture::OneOrMore,
                &remaining,
                &scope,
                &ParserSettings::default()
            ),
            Err(ParseError::NotEnoughValues {
                option: "input".into(),
                expected: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn test_fixed_shortfall() {
        let scope = CommandScope::root();
        let remaining = tokens(&["a", "b"]);
        assert_eq!(
            items_to_capture(
                "points",
                ContextCapture::Fixed(3),
                &remaining,
                &scope,
                &ParserSettings::default()
            ),
            Err(ParseError::NotEnoughValues {
                option: "points".into(),
                expected: 3,
                available: 2,
            })
        );
    }

    #[test]
    fn test_zero_or_more_captures_nothing_before_an_option() {
        let scope = CommandScope::root();
        let remaining = tokens(&["--next", "a"]);
        assert_eq!(
            items_to_capture(
                "tags",
                ContextCapture::ZeroOrMore,
                &remaining,
                &scope,
                &ParserSettings::default()
            ),
            Ok(0)
        );
    }
}
