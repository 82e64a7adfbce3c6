//! Traversal engine.
//!
//! Drives the token queue through the classifier, the subcommand tree, and
//! the capture policies, producing encounter-ordered [`Binding`] records and
//! a list of unrecognized tokens instead of invoking caller callbacks. The
//! engine owns the scope tree for the duration of a parse and mutates only
//! per-option handled/bound state, never the tree's shape.
//!
//! Walk order per token: subcommand descent takes precedence over option
//! recognition; descent is one-shot (the active scope only ever moves toward
//! deeper children within one parse, with no backtracking). Unresolvable
//! tokens are collected, not rejected — whether they are a hard error is the
//! caller's policy.

use std::collections::VecDeque;

use argwalk_core::{CommandScope, OptionKind, OptionSpec, TypedValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capture::items_to_capture;
use crate::convert::ConverterRegistry;
use crate::error::{ParseError, Result};
use crate::settings::ParserSettings;
use crate::token::{Argument, TokenKind, classify};

/// One option bound during a parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Canonical name of the bound option.
    pub option: String,
    /// Captured raw values, in capture order.
    pub raw_values: Vec<String>,
    /// Converted values, in the same order.
    pub values: Vec<TypedValue>,
    /// Whether this binding was synthesized from a declared default after
    /// the walk, rather than captured from the input.
    pub from_default: bool,
}

/// Immutable record of one traversal.
///
/// Bindings and entered subcommands appear in encounter order; default
/// bindings are appended after the walk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    /// Every option bound, in encounter order.
    pub bindings: Vec<Binding>,
    /// Tokens that resolved to neither a subcommand nor a declared option.
    pub unrecognized: Vec<String>,
    /// Names of subcommands entered, outermost first.
    pub command_path: Vec<String>,
}

impl ParseResult {
    /// First binding for the option with this canonical name.
    pub fn binding(&self, option: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.option == option)
    }

    /// All bindings for the option with this canonical name.
    pub fn bindings_for<'a>(&'a self, option: &'a str) -> impl Iterator<Item = &'a Binding> {
        self.bindings.iter().filter(move |b| b.option == option)
    }

    /// How many input-driven bindings the option received (defaults
    /// excluded). For counter options this is the count itself.
    pub fn occurrences_of(&self, option: &str) -> usize {
        self.bindings_for(option)
            .filter(|b| !b.from_default)
            .count()
    }

    /// Whether the option was bound at all (including from a default).
    pub fn is_bound(&self, option: &str) -> bool {
        self.binding(option).is_some()
    }

    /// First converted value of the first binding for this option.
    pub fn first_value(&self, option: &str) -> Option<&TypedValue> {
        self.binding(option).and_then(|b| b.values.first())
    }
}

/// Links recovered from one compound short token.
struct CompoundChain {
    flags: Vec<OptionSpec>,
    trailing: Option<(OptionSpec, Option<String>)>,
}

/// The traversal engine: owns the scope tree, settings, and converters for
/// a sequence of parses.
///
/// # Examples
///
/// ```
/// use argwalk_core::{CommandScope, ContextCapture, OptionSpec, TypedValue, ValueKind};
/// use argwalk_parse::Parser;
///
/// let root = CommandScope::root()
///     .with_option(
///         OptionSpec::multi_value(None, Some("input"), ValueKind::Text, ContextCapture::OneOrMore)
///             .required(),
///     )
///     .unwrap()
///     .with_option(
///         OptionSpec::value(None, Some("angle"), ValueKind::Integer, ContextCapture::ZeroOrOne)
///             .required(),
///     )
///     .unwrap();
///
/// let mut parser = Parser::new(root);
/// let tokens: Vec<String> = ["--input", "a.png", "b.png", "--angle", "90"]
///     .iter().map(|t| t.to_string()).collect();
/// let result = parser.parse(&tokens).unwrap();
///
/// assert_eq!(result.binding("input").unwrap().raw_values, ["a.png", "b.png"]);
/// assert_eq!(result.first_value("angle"), Some(&TypedValue::Integer(90)));
/// assert!(result.unrecognized.is_empty());
/// ```
#[derive(Debug)]
pub struct Parser {
    settings: ParserSettings,
    root: CommandScope,
    converters: ConverterRegistry,
}

impl Parser {
    /// Creates an engine over the given scope tree with default settings.
    pub fn new(root: CommandScope) -> Self {
        Self {
            settings: ParserSettings::default(),
            root,
            converters: ConverterRegistry::default(),
        }
    }

    /// Creates an engine with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns the settings' validation error, if any.
    pub fn with_settings(
        root: CommandScope,
        settings: ParserSettings,
    ) -> argwalk_core::Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            root,
            converters: ConverterRegistry::default(),
        })
    }

    /// Active settings.
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// The root scope, including any per-parse handled/bound state left by
    /// the most recent walk.
    pub fn root(&self) -> &CommandScope {
        &self.root
    }

    /// Converter registry for custom value kinds.
    pub fn converters_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }

    /// Walks one token sequence.
    ///
    /// Clears per-parse state first, drops the configured number of leading
    /// tokens, then consumes the queue front-to-back. On failure the walk
    /// aborts synchronously; handled/bound state accumulated before the
    /// failure is not rolled back.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]: capture shortfall, conversion failure,
    /// restriction rejection, mutual-exclusion violation, or an unmet
    /// required option at end of walk.
    pub fn parse(&mut self, tokens: &[String]) -> Result<ParseResult> {
        self.root.reset_handled();
        let mut queue: VecDeque<String> = tokens
            .iter()
            .skip(self.settings.skip_tokens)
            .cloned()
            .collect();
        let mut path: Vec<usize> = Vec::new();
        let mut result = ParseResult::default();
        let mut halted = false;

        while let Some(token) = queue.pop_front() {
            if halted {
                result.unrecognized.push(token);
                continue;
            }

            // Subcommand descent takes precedence over option recognition.
            if let Some(index) = self.scope(&path).position_of_child(&token) {
                debug!(subcommand = %token, "entering subcommand scope");
                path.push(index);
                result.command_path.push(token);
                continue;
            }

            let argument = classify(&token, &self.settings);
            if argument.is_option_shaped()
                && self.try_bind(&argument, &mut queue, &path, &mut result, &mut halted)?
            {
                continue;
            }

            debug!(token = %token, "unrecognized token");
            result.unrecognized.push(token);
        }

        if !halted {
            self.required_sweep(&path)?;
            self.inject_defaults(&path, &mut result)?;
        }

        Ok(result)
    }

    /// Resolves an option-shaped argument against the active registry and
    /// binds it. Returns `false` when nothing resolved, leaving the token
    /// for the unrecognized list.
    fn try_bind(
        &mut self,
        argument: &Argument,
        queue: &mut VecDeque<String>,
        path: &[usize],
        result: &mut ParseResult,
        halted: &mut bool,
    ) -> Result<bool> {
        let resolved = self.scope(path).options().find(&argument.name).cloned();
        if let Some(snapshot) = resolved {
            self.bind_spec(
                snapshot,
                argument.inline_value.clone(),
                queue,
                path,
                result,
                halted,
            )?;
            return Ok(true);
        }

        if argument.kind == TokenKind::ShortOption
            && self.settings.compound_short_flags
            && argument.inline_value.is_none()
            && argument.name.chars().count() > 1
        {
            if let Some(chain) = self.resolve_compound(&argument.name, path) {
                debug!(token = %argument.raw, flags = chain.flags.len(), "expanded compound short flags");
                for flag in chain.flags {
                    self.bind_spec(flag, None, queue, path, result, halted)?;
                }
                if let Some((spec, inline)) = chain.trailing {
                    self.bind_spec(spec, inline, queue, path, result, halted)?;
                }
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Resolves a multi-character short token into chained single-character
    /// flags. Chaining stops at the first character that is not a
    /// flag-shaped option: if that character resolves to a value-accepting
    /// option, the rest of the token becomes its inline value; if it
    /// resolves to nothing, the whole token is not an option.
    fn resolve_compound(&self, name: &str, path: &[usize]) -> Option<CompoundChain> {
        let registry = self.scope(path).options();
        let chars: Vec<char> = name.chars().collect();
        let mut flags = Vec::new();

        for (position, ch) in chars.iter().enumerate() {
            let key = ch.to_string();
            match registry.find(&key) {
                Some(spec) if spec.kind().is_flag_shaped() => flags.push(spec.clone()),
                Some(spec) => {
                    let suffix: String = chars[position + 1..].iter().collect();
                    let inline = (!suffix.is_empty()).then_some(suffix);
                    return Some(CompoundChain {
                        flags,
                        trailing: Some((spec.clone(), inline)),
                    });
                }
                None => return None,
            }
        }

        Some(CompoundChain {
            flags,
            trailing: None,
        })
    }

    /// Binds one resolved option: captures values (or takes the inline
    /// value), converts, checks the restriction and group constraints,
    /// marks the live spec handled, and records the binding.
    fn bind_spec(
        &mut self,
        snapshot: OptionSpec,
        inline: Option<String>,
        queue: &mut VecDeque<String>,
        path: &[usize],
        result: &mut ParseResult,
        halted: &mut bool,
    ) -> Result<()> {
        let canonical = snapshot.canonical_name().to_string();

        // Flags, counters, help, and version never carry a value, inline or
        // otherwise.
        if snapshot.kind().is_flag_shaped() {
            if let Some(value) = &inline {
                return Err(ParseError::UnexpectedInlineValue {
                    option: canonical,
                    value: value.clone(),
                });
            }
        }

        let raw_values: Vec<String> = match inline {
            // An inline value short-circuits the capture policy entirely.
            Some(value) => vec![value],
            None => {
                let remaining = queue.make_contiguous();
                let count = items_to_capture(
                    &canonical,
                    snapshot.kind().capture(),
                    remaining,
                    self.scope(path),
                    &self.settings,
                )?;
                queue.drain(..count).collect()
            }
        };

        let values: Vec<TypedValue> = if snapshot.kind().accepts_value() {
            self.converters.convert_all(&snapshot, &raw_values)?
        } else if matches!(snapshot.kind(), OptionKind::Counter) {
            Vec::new()
        } else {
            vec![TypedValue::Boolean(true)]
        };

        for value in &values {
            if !snapshot.allows(value) {
                return Err(ParseError::RestrictionViolated {
                    option: canonical,
                    value: value.to_string(),
                });
            }
        }

        if !snapshot.is_handled() {
            if let Some((group, first)) = self.scope(path).options().group_conflict(&canonical) {
                return Err(ParseError::MutuallyExclusiveOptions {
                    group,
                    first,
                    second: canonical,
                });
            }
        }

        // The snapshot came out of this registry, so the live lookup cannot
        // miss; a failure here is a programmer error.
        let live = self
            .scope_mut(path)
            .options_mut()
            .find_mut(&canonical)
            .expect("resolved option must exist in its registry");
        live.note_occurrence();
        live.bind_raw(&raw_values);

        debug!(option = %canonical, captured = raw_values.len(), "bound option");
        result.bindings.push(Binding {
            option: canonical.clone(),
            raw_values,
            values,
            from_default: false,
        });

        if snapshot.is_final() {
            debug!(option = %canonical, "final option halts the walk");
            *halted = true;
        }
        Ok(())
    }

    /// Required-option sweep over the entered path only: the root plus
    /// every scope actually descended into. Read-only on option state.
    fn required_sweep(&self, path: &[usize]) -> Result<()> {
        for depth in 0..=path.len() {
            let scope = self.scope(&path[..depth]);
            if let Some(name) = scope.options().unmet_required().into_iter().next() {
                return Err(ParseError::RequiredOptionNotSpecified(name));
            }
        }
        Ok(())
    }

    /// Synthesizes bindings for unhandled options with declared defaults in
    /// every entered scope. Does NOT mark them handled: default injection
    /// and required-option satisfaction are independent concerns.
    fn inject_defaults(&mut self, path: &[usize], result: &mut ParseResult) -> Result<()> {
        for depth in 0..=path.len() {
            let pending: Vec<OptionSpec> = self
                .scope(&path[..depth])
                .options()
                .iter()
                .filter(|spec| !spec.is_handled() && spec.kind().default_values().is_some())
                .cloned()
                .collect();
            for spec in pending {
                let raw_values = spec.kind().default_values().unwrap_or_default();
                let values = self.converters.convert_all(&spec, &raw_values)?;
                debug!(option = %spec.canonical_name(), "injected default value");
                result.bindings.push(Binding {
                    option: spec.canonical_name().to_string(),
                    raw_values,
                    values,
                    from_default: true,
                });
            }
        }
        Ok(())
    }

    fn scope(&self, path: &[usize]) -> &CommandScope {
        let mut scope = &self.root;
        for &index in path {
            // Path indices come from position_of_child on this same tree.
            scope = scope.child(index).expect("scope path index must be valid");
        }
        scope
    }

    fn scope_mut(&mut self, path: &[usize]) -> &mut CommandScope {
        let mut scope = &mut self.root;
        for &index in path {
            scope = scope
                .child_mut(index)
                .expect("scope path index must be valid");
        }
        scope
    }
}

#[cfg(test)]
mod tests {
    use argwalk_core::{ContextCapture, OptionGroup, ValueKind};

    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn root_with_flags() -> CommandScope {
        CommandScope::root()
            .with_option(OptionSpec::flag(Some("v"), Some("verbose")))
            .unwrap()
            .with_option(OptionSpec::flag(Some("q"), Some("quiet")))
            .unwrap()
            .with_option(OptionSpec::value(
                Some("o"),
                Some("output"),
                ValueKind::Text,
                ContextCapture::ZeroOrOne,
            ))
            .unwrap()
    }

    #[test]
    fn test_skip_tokens_drops_leading_input() {
        let settings = ParserSettings {
            skip_tokens: 1,
            ..Default::default()
        };
        let mut parser = Parser::with_settings(root_with_flags(), settings).unwrap();
        let result = parser.parse(&tokens(&["prog", "--verbose"])).unwrap();
        assert!(result.is_bound("verbose"));
        assert!(result.unrecognized.is_empty());
    }

    #[test]
    fn test_no_backtracking_after_descent() {
        // Once "status" is entered, the parent's options no longer resolve.
        let root = CommandScope::root()
            .with_option(OptionSpec::flag(None, Some("verbose")))
            .unwrap()
            .with_subcommand(CommandScope::new("status").unwrap())
            .unwrap();
        let mut parser = Parser::new(root);
        let result = parser.parse(&tokens(&["status", "--verbose"])).unwrap();
        assert_eq!(result.command_path, ["status"]);
        assert_eq!(result.unrecognized, ["--verbose"]);
        assert!(!result.is_bound("verbose"));
    }

    #[test]
    fn test_counter_option_counts_occurrences() {
        let root = CommandScope::root()
            .with_option(OptionSpec::counter(Some("v"), Some("verbose")))
            .unwrap();
        let mut parser = Parser::new(root);
        let result = parser.parse(&tokens(&["-v", "-v", "--verbose"])).unwrap();
        assert_eq!(result.occurrences_of("verbose"), 3);
        assert_eq!(
            parser.root().options().find("verbose").unwrap().occurrences(),
            3
        );
    }

    #[test]
    fn test_final_option_halts_and_passes_through() {
        let root = CommandScope::root()
            .with_option(OptionSpec::help())
            .unwrap()
            .with_option(
                OptionSpec::value(None, Some("angle"), ValueKind::Integer, ContextCapture::ZeroOrOne)
                    .required(),
            )
            .unwrap();
        let mut parser = Parser::new(root);
        // --angle is required but the final --help suppresses the sweep.
        let result = parser.parse(&tokens(&["--help", "whatever", "-x"])).unwrap();
        assert!(result.is_bound("help"));
        assert_eq!(result.unrecognized, ["whatever", "-x"]);
    }

    #[test]
    fn test_flag_shaped_option_rejects_inline_value() {
        let mut parser = Parser::new(root_with_flags());
        let err = parser.parse(&tokens(&["--verbose=yes"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedInlineValue {
                option: "verbose".into(),
                value: "yes".into(),
            }
        );
    }

    #[test]
    fn test_compound_short_flags_chain() {
        let settings = ParserSettings {
            compound_short_flags: true,
            ..Default::default()
        };
        let mut parser = Parser::with_settings(root_with_flags(), settings).unwrap();
        let result = parser.parse(&tokens(&["-vq"])).unwrap();
        assert!(result.is_bound("verbose"));
        assert!(result.is_bound("quiet"));
    }

    #[test]
    fn test_compound_trailing_value_option_takes_suffix() {
        let settings = ParserSettings {
            compound_short_flags: true,
            ..Default::default()
        };
        let mut parser = Parser::with_settings(root_with_flags(), settings).unwrap();
        let result = parser.parse(&tokens(&["-vqoout.txt"])).unwrap();
        assert!(result.is_bound("verbose"));
        assert!(result.is_bound("quiet"));
        assert_eq!(result.binding("output").unwrap().raw_values, ["out.txt"]);
    }

    #[test]
    fn test_compound_with_unresolved_char_is_not_an_option() {
        let settings = ParserSettings {
            compound_short_flags: true,
            ..Default::default()
        };
        let mut parser = Parser::with_settings(root_with_flags(), settings).unwrap();
        let result = parser.parse(&tokens(&["-vx"])).unwrap();
        assert_eq!(result.unrecognized, ["-vx"]);
        assert!(!result.is_bound("verbose"));
    }

    #[test]
    fn test_compound_disabled_leaves_token_unrecognized() {
        let mut parser = Parser::new(root_with_flags());
        let result = parser.parse(&tokens(&["-vq"])).unwrap();
        assert_eq!(result.unrecognized, ["-vq"]);
    }

    #[test]
    fn test_slash_option_resolves_by_long_or_short_name() {
        let settings = ParserSettings {
            recognize_slash: true,
            ..Default::default()
        };
        let mut parser = Parser::with_settings(root_with_flags(), settings).unwrap();
        let result = parser.parse(&tokens(&["/verbose", "/q"])).unwrap();
        assert!(result.is_bound("verbose"));
        assert!(result.is_bound("quiet"));
    }

    #[test]
    fn test_mutually_exclusive_group_fails_on_second_member() {
        let root = CommandScope::root()
            .with_option(OptionSpec::flag(None, Some("json")))
            .unwrap()
            .with_option(OptionSpec::flag(None, Some("yaml")))
            .unwrap()
            .with_group(OptionGroup::new("format", &["json", "yaml"]).mutually_exclusive())
            .unwrap();
        let mut parser = Parser::new(root);

        // One member alone is fine, repeated sightings of it as well.
        assert!(parser.parse(&tokens(&["--json", "--json"])).is_ok());

        let err = parser.parse(&tokens(&["--json", "--yaml"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::MutuallyExclusiveOptions {
                group: "format".into(),
                first: "json".into(),
                second: "yaml".into(),
            }
        );
    }

    #[test]
    fn test_no_rollback_of_bindings_before_a_failure() {
        let root = CommandScope::root()
            .with_option(OptionSpec::flag(None, Some("verbose")))
            .unwrap()
            .with_option(OptionSpec::value(
                None,
                Some("angle"),
                ValueKind::Integer,
                ContextCapture::ZeroOrOne,
            ))
            .unwrap();
        let mut parser = Parser::new(root);
        let err = parser
            .parse(&tokens(&["--verbose", "--angle", "ninety"]))
            .unwrap_err();
        assert!(matches!(err, ParseError::ConversionFailed { .. }));
        // The flag bound before the failure keeps its handled state.
        assert!(parser.root().options().find("verbose").unwrap().is_handled());
    }

    #[test]
    fn test_restriction_rejects_converted_value() {
        let root = CommandScope::root()
            .with_option(
                OptionSpec::value(None, Some("angle"), ValueKind::Integer, ContextCapture::ZeroOrOne)
                    .with_restriction(|value| {
                        value.as_integer().is_some_and(|n| (0..=360).contains(&n))
                    }),
            )
            .unwrap();
        let mut parser = Parser::new(root);
        assert!(parser.parse(&tokens(&["--angle", "90"])).is_ok());
        let err = parser.parse(&tokens(&["--angle", "720"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::RestrictionViolated {
                option: "angle".into(),
                value: "720".into(),
            }
        );
    }

    #[test]
    fn test_default_injected_without_marking_handled() {
        let root = CommandScope::root()
            .with_option(
                OptionSpec::value(None, Some("angle"), ValueKind::Integer, ContextCapture::ZeroOrOne)
                    .with_default("0"),
            )
            .unwrap();
        let mut parser = Parser::new(root);
        let result = parser.parse(&tokens(&[])).unwrap();
        let binding = result.binding("angle").unwrap();
        assert!(binding.from_default);
        assert_eq!(binding.values, [TypedValue::Integer(0)]);
        assert!(!parser.root().options().find("angle").unwrap().is_handled());
    }

    #[test]
    fn test_default_not_injected_when_option_was_handled() {
        let root = CommandScope::root()
            .with_option(
                OptionSpec::value(None, Some("angle"), ValueKind::Integer, ContextCapture::ZeroOrOne)
                    .with_default("0"),
            )
            .unwrap();
        let mut parser = Parser::new(root);
        let result = parser.parse(&tokens(&["--angle", "45"])).unwrap();
        assert_eq!(result.bindings_for("angle").count(), 1);
        assert_eq!(result.first_value("angle"), Some(&TypedValue::Integer(45)));
    }

    #[test]
    fn test_parse_resets_state_between_runs() {
        let mut parser = Parser::new(root_with_flags());
        parser.parse(&tokens(&["--verbose"])).unwrap();
        let result = parser.parse(&tokens(&["--quiet"])).unwrap();
        assert!(!result.is_bound("verbose"));
        assert!(!parser.root().options().find("verbose").unwrap().is_handled());
    }
}
