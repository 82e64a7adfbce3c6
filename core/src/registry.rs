//! Option registries, name verification, and option groups.
//!
//! A registry holds the declared options for one scope (the program root or
//! one subcommand level). Registration enforces name correctness and
//! case-sensitive uniqueness across every long name, short name, and alias
//! already present; a rejected registration leaves the registry unchanged.
//!
//! # Examples
//!
//! ```
//! use argwalk_core::{ConfigError, OptionRegistry, OptionSpec};
//!
//! let mut registry = OptionRegistry::default();
//! registry.add(OptionSpec::flag(Some("v"), Some("verbose"))).unwrap();
//!
//! // Second registration of any recognized name fails; the first wins.
//! let err = registry.add(OptionSpec::flag(None, Some("verbose"))).unwrap_err();
//! assert_eq!(err, ConfigError::DuplicateLongName("verbose".into()));
//! assert_eq!(registry.len(), 1);
//!
//! assert!(registry.has_option("v"));
//! assert!(registry.find("verbose").is_some());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConfigError, Result};
use crate::option::OptionSpec;

/// Identifier-like names: start with a letter, body of letters, digits,
/// `_`, or `-`, and never end with a separator.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]([A-Za-z0-9_-]*[A-Za-z0-9])?$").expect("static regex must compile")
});

/// Reserved help shorthand; bypasses the format check, never uniqueness.
pub const RESERVED_HELP_NAME: &str = "?";

/// Verifies that `name` is identifier-like per the registry rules.
///
/// The empty string and the reserved `?` token bypass the format check (they
/// are still subject to uniqueness on registration).
///
/// # Errors
///
/// Returns [`ConfigError::MalformedName`] when the check fails.
pub fn verify_name(name: &str) -> Result<()> {
    if name.is_empty() || name == RESERVED_HELP_NAME {
        return Ok(());
    }
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::MalformedName(name.to_string()))
    }
}

/// Named, ordered collection of options for display and validation.
///
/// A mutually-exclusive group permits at most one handled member per parse;
/// the engine fails the moment a second member binds.
#[derive(Debug, Clone, Default)]
pub struct OptionGroup {
    name: String,
    members: Vec<String>,
    mutually_exclusive: bool,
}

impl OptionGroup {
    /// Creates a plain (non-exclusive) group over the given member names.
    pub fn new(name: &str, members: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            mutually_exclusive: false,
        }
    }

    /// Marks the group mutually exclusive.
    pub fn mutually_exclusive(mut self) -> Self {
        self.mutually_exclusive = true;
        self
    }

    /// Group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member option names, in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Whether at most one member may be handled per parse.
    pub fn is_mutually_exclusive(&self) -> bool {
        self.mutually_exclusive
    }
}

/// Declared options for one scope.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    options: Vec<OptionSpec>,
    groups: Vec<OptionGroup>,
}

impl OptionRegistry {
    /// Registers an option.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingName`] when neither a long nor a short name
    ///   is declared non-empty.
    /// - [`ConfigError::MalformedName`] when any declared name fails the
    ///   format check (`?` and the empty string are exempt).
    /// - [`ConfigError::DuplicateLongName`] /
    ///   [`ConfigError::DuplicateShortName`] /
    ///   [`ConfigError::DuplicateAlias`] when a declared name collides with
    ///   any name or alias already registered, or with another name declared
    ///   on the same spec. The registry keeps the first registration.
    pub fn add(&mut self, spec: OptionSpec) -> Result<()> {
        let has_long = spec.long().is_some_and(|name| !name.is_empty());
        let has_short = spec.short().is_some_and(|name| !name.is_empty());
        if !has_long && !has_short {
            return Err(ConfigError::MissingName);
        }

        for name in spec.all_names() {
            verify_name(name)?;
        }

        if let (Some(long), Some(short)) = (spec.long(), spec.short()) {
            if long == short {
                return Err(ConfigError::DuplicateShortName(short.to_string()));
            }
        }
        for (position, alias) in spec.aliases().iter().enumerate() {
            if spec.long() == Some(alias.as_str())
                || spec.short() == Some(alias.as_str())
                || spec.aliases()[..position].contains(alias)
            {
                return Err(ConfigError::DuplicateAlias(alias.clone()));
            }
        }

        if let Some(long) = spec.long() {
            if self.is_taken(long) {
                return Err(ConfigError::DuplicateLongName(long.to_string()));
            }
        }
        if let Some(short) = spec.short() {
            if self.is_taken(short) {
                return Err(ConfigError::DuplicateShortName(short.to_string()));
            }
        }
        for alias in spec.aliases() {
            if self.is_taken(alias) {
                return Err(ConfigError::DuplicateAlias(alias.clone()));
            }
        }

        self.options.push(spec);
        Ok(())
    }

    /// Registers an option group.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateGroup`] when a group with this name exists.
    /// - [`ConfigError::UnknownGroupMember`] when a member does not resolve
    ///   to a registered option.
    pub fn add_group(&mut self, group: OptionGroup) -> Result<()> {
        if self.groups.iter().any(|g| g.name() == group.name()) {
            return Err(ConfigError::DuplicateGroup(group.name().to_string()));
        }
        for member in group.members() {
            if !self.has_option(member) {
                return Err(ConfigError::UnknownGroupMember {
                    group: group.name().to_string(),
                    member: member.clone(),
                });
            }
        }
        self.groups.push(group);
        Ok(())
    }

    /// Whether any registered option answers to `name`.
    pub fn has_option(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Finds an option by any recognized name or alias.
    pub fn find(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.matches(name))
    }

    /// Mutable lookup by any recognized name or alias.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut OptionSpec> {
        self.options.iter_mut().find(|spec| spec.matches(name))
    }

    /// Iterates registered options in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter()
    }

    /// Mutable iteration in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut OptionSpec> {
        self.options.iter_mut()
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the registry has no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Registered groups.
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// Checks whether handling `name` would violate a mutually-exclusive
    /// group. Returns the group name and the member already handled.
    pub fn group_conflict(&self, name: &str) -> Option<(String, String)> {
        let spec = self.find(name)?;
        for group in self.groups.iter().filter(|g| g.is_mutually_exclusive()) {
            if !group.members().iter().any(|member| spec.matches(member)) {
                continue;
            }
            let other = group
                .members()
                .iter()
                .filter(|member| !spec.matches(member))
                .find_map(|member| {
                    self.find(member)
                        .filter(|candidate| candidate.is_handled())
                });
            if let Some(other) = other {
                return Some((
                    group.name().to_string(),
                    other.canonical_name().to_string(),
                ));
            }
        }
        None
    }

    /// Canonical names of required options that were not handled. Read-only:
    /// running the sweep repeatedly yields the same outcome.
    pub fn unmet_required(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|spec| spec.is_required() && !spec.is_handled())
            .map(|spec| spec.canonical_name().to_string())
            .collect()
    }

    /// Clears per-parse state on every option so the registry can serve a
    /// fresh parse.
    pub fn reset_handled(&mut self) {
        for spec in &mut self.options {
            spec.reset();
        }
    }

    fn is_taken(&self, name: &str) -> bool {
        self.options
            .iter()
            .any(|spec| spec.all_names().any(|existing| existing == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ContextCapture;
    use crate::value::ValueKind;

    #[test]
    fn test_verify_name_accepts_identifier_like_names() {
        for name in ["angle", "dry-run", "log_level", "a", "v2", "input-1"] {
            assert!(verify_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_verify_name_rejects_malformed_names() {
        for name in ["-flag", "2fast", "end-", "end_", "has space", "über"] {
            assert_eq!(
                verify_name(name),
                Err(ConfigError::MalformedName(name.to_string())),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_verify_name_exempts_reserved_and_empty() {
        assert!(verify_name("?").is_ok());
        assert!(verify_name("").is_ok());
    }

    #[test]
    fn test_add_requires_at_least_one_name() {
        let mut registry = OptionRegistry::default();
        let err = registry
            .add(OptionSpec::flag(None, None))
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingName);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_uniqueness_spans_all_name_namespaces() {
        let mut registry = OptionRegistry::default();
        registry
            .add(OptionSpec::flag(Some("v"), Some("verbose")).with_alias("chatty"))
            .unwrap();

        // A short name colliding with an existing alias is still a clash.
        assert_eq!(
            registry.add(OptionSpec::flag(Some("chatty"), None)),
            Err(ConfigError::DuplicateShortName("chatty".into()))
        );
        // An alias colliding with an existing short name.
        assert_eq!(
            registry.add(OptionSpec::flag(None, Some("quiet")).with_alias("v")),
            Err(ConfigError::DuplicateAlias("v".into()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_within_one_spec_must_be_distinct() {
        let mut registry = OptionRegistry::default();
        assert_eq!(
            registry.add(OptionSpec::flag(Some("x"), Some("x"))),
            Err(ConfigError::DuplicateShortName("x".into()))
        );
        assert_eq!(
            registry.add(OptionSpec::flag(None, Some("verbose")).with_alias("verbose")),
            Err(ConfigError::DuplicateAlias("verbose".into()))
        );
        assert_eq!(
            registry.add(
                OptionSpec::flag(None, Some("quiet"))
                    .with_alias("q")
                    .with_alias("q")
            ),
            Err(ConfigError::DuplicateAlias("q".into()))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut registry = OptionRegistry::default();
        registry
            .add(OptionSpec::flag(None, Some("verbose")))
            .unwrap();
        assert!(registry.has_option("verbose"));
        assert!(!registry.has_option("Verbose"));
    }

    #[test]
    fn test_unmet_required_is_idempotent() {
        let mut registry = OptionRegistry::default();
        registry
            .add(
                OptionSpec::value(
                    None,
                    Some("angle"),
                    ValueKind::Integer,
                    ContextCapture::ZeroOrOne,
                )
                .required(),
            )
            .unwrap();
        registry
            .add(OptionSpec::flag(Some("v"), None))
            .unwrap();

        let first = registry.unmet_required();
        let second = registry.unmet_required();
        assert_eq!(first, vec!["angle".to_string()]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_group_conflict_reports_handled_member() {
        let mut registry = OptionRegistry::default();
        registry.add(OptionSpec::flag(None, Some("json"))).unwrap();
        registry.add(OptionSpec::flag(None, Some("yaml"))).unwrap();
        registry
            .add_group(OptionGroup::new("format", &["json", "yaml"]).mutually_exclusive())
            .unwrap();

        assert_eq!(registry.group_conflict("yaml"), None);
        registry.find_mut("json").unwrap().note_occurrence();
        assert_eq!(
            registry.group_conflict("yaml"),
            Some(("format".to_string(), "json".to_string()))
        );
        // Re-handling the same member is not a conflict.
        assert_eq!(registry.group_conflict("json"), None);
    }

    #[test]
    fn test_add_group_rejects_unknown_members() {
        let mut registry = OptionRegistry::default();
        registry.add(OptionSpec::flag(None, Some("json"))).unwrap();
        let err = registry
            .add_group(OptionGroup::new("format", &["json", "toml"]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownGroupMember {
                group: "format".into(),
                member: "toml".into(),
            }
        );
    }
}
