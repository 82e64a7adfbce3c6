//! Subcommand tree.
//!
//! A [`CommandScope`] is one level of the command hierarchy: it owns an
//! [`OptionRegistry`] and an ordered list of child scopes with sibling-unique
//! names. The tree is built once by the configuration layer; during a parse
//! the traversal engine only flips handled/bound state inside registries and
//! never changes the tree's shape.
//!
//! # Examples
//!
//! ```
//! use argwalk_core::{CommandScope, ContextCapture, OptionSpec, ValueKind};
//!
//! let root = CommandScope::root()
//!     .with_option(OptionSpec::flag(Some("v"), Some("verbose")))
//!     .unwrap()
//!     .with_subcommand(
//!         CommandScope::new("status")
//!             .unwrap()
//!             .with_option(
//!                 OptionSpec::value(None, Some("date"), ValueKind::Date, ContextCapture::ZeroOrOne)
//!                     .required(),
//!             )
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! assert!(root.find_child("status").is_some());
//! assert!(root.options().has_option("verbose"));
//! ```

use crate::error::{ConfigError, Result};
use crate::option::OptionSpec;
use crate::registry::{OptionGroup, OptionRegistry, RESERVED_HELP_NAME, verify_name};

/// One scope in the subcommand tree.
#[derive(Debug, Clone, Default)]
pub struct CommandScope {
    name: String,
    registry: OptionRegistry,
    children: Vec<CommandScope>,
}

impl CommandScope {
    /// Creates the unnamed root scope.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a named subcommand scope.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedName`] when the name is empty or
    /// fails the identifier check. The `?` carve-out applies to option
    /// names only; it is not a valid scope name.
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() || name == RESERVED_HELP_NAME {
            return Err(ConfigError::MalformedName(name.to_string()));
        }
        verify_name(name)?;
        Ok(Self {
            name: name.to_string(),
            ..Self::default()
        })
    }

    /// Scope name; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This scope's option registry.
    pub fn options(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Mutable access to this scope's option registry.
    pub fn options_mut(&mut self) -> &mut OptionRegistry {
        &mut self.registry
    }

    /// Registers an option in this scope.
    pub fn add_option(&mut self, spec: OptionSpec) -> Result<()> {
        self.registry.add(spec)
    }

    /// Builder form of [`add_option`](Self::add_option).
    pub fn with_option(mut self, spec: OptionSpec) -> Result<Self> {
        self.registry.add(spec)?;
        Ok(self)
    }

    /// Registers an option group in this scope.
    pub fn add_group(&mut self, group: OptionGroup) -> Result<()> {
        self.registry.add_group(group)
    }

    /// Builder form of [`add_group`](Self::add_group).
    pub fn with_group(mut self, group: OptionGroup) -> Result<Self> {
        self.registry.add_group(group)?;
        Ok(self)
    }

    /// Adds a child subcommand.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateSubcommand`] when a sibling already
    /// carries the child's name.
    pub fn add_subcommand(&mut self, child: CommandScope) -> Result<()> {
        if self.children.iter().any(|sib| sib.name == child.name) {
            return Err(ConfigError::DuplicateSubcommand(child.name));
        }
        self.children.push(child);
        Ok(())
    }

    /// Builder form of [`add_subcommand`](Self::add_subcommand).
    pub fn with_subcommand(mut self, child: CommandScope) -> Result<Self> {
        self.add_subcommand(child)?;
        Ok(self)
    }

    /// Direct children, in declaration order.
    pub fn subcommands(&self) -> &[CommandScope] {
        &self.children
    }

    /// Finds a direct child by exact name.
    pub fn find_child(&self, name: &str) -> Option<&CommandScope> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Index of a direct child by exact name.
    pub fn position_of_child(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|child| child.name == name)
    }

    /// Child at `index`, as recorded by
    /// [`position_of_child`](Self::position_of_child).
    pub fn child(&self, index: usize) -> Option<&CommandScope> {
        self.children.get(index)
    }

    /// Mutable child access by index.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut CommandScope> {
        self.children.get_mut(index)
    }

    /// Recursively clears per-parse option state in this scope and all
    /// descendants.
    pub fn reset_handled(&mut self) {
        self.registry.reset_handled();
        for child in &mut self.children {
            child.reset_handled();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_names() {
        assert!(CommandScope::new("status").is_ok());
        assert!(CommandScope::new("dry-run").is_ok());
        assert_eq!(
            CommandScope::new("2fast").unwrap_err(),
            ConfigError::MalformedName("2fast".into())
        );
        assert_eq!(
            CommandScope::new("trail-").unwrap_err(),
            ConfigError::MalformedName("trail-".into())
        );
        assert_eq!(
            CommandScope::new("").unwrap_err(),
            ConfigError::MalformedName(String::new())
        );
        // The reserved "?" shorthand belongs to option names, not scopes.
        assert_eq!(
            CommandScope::new("?").unwrap_err(),
            ConfigError::MalformedName("?".into())
        );
    }

    #[test]
    fn test_sibling_names_must_be_unique() {
        let mut root = CommandScope::root();
        root.add_subcommand(CommandScope::new("status").unwrap())
            .unwrap();
        let err = root
            .add_subcommand(CommandScope::new("status").unwrap())
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateSubcommand("status".into()));
        assert_eq!(root.subcommands().len(), 1);
    }

    #[test]
    fn test_child_lookup_by_name_and_index() {
        let root = CommandScope::root()
            .with_subcommand(CommandScope::new("remote").unwrap())
            .unwrap()
            .with_subcommand(CommandScope::new("status").unwrap())
            .unwrap();

        assert_eq!(root.position_of_child("status"), Some(1));
        assert_eq!(root.child(1).map(CommandScope::name), Some("status"));
        assert_eq!(root.position_of_child("push"), None);
    }

    #[test]
    fn test_reset_handled_reaches_descendants() {
        let mut root = CommandScope::root();
        let mut child = CommandScope::new("status").unwrap();
        child
            .add_option(OptionSpec::flag(Some("q"), Some("quiet")))
            .unwrap();
        root.add_subcommand(child).unwrap();

        root.child_mut(0)
            .unwrap()
            .options_mut()
            .find_mut("quiet")
            .unwrap()
            .note_occurrence();
        assert!(root.child(0).unwrap().options().find("quiet").unwrap().is_handled());

        root.reset_handled();
        assert!(!root.child(0).unwrap().options().find("quiet").unwrap().is_handled());
    }
}
