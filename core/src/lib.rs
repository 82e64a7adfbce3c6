//! Core option, subcommand, and capture-policy model for argument parsing.
//!
//! This crate defines the declarative side of argument parsing:
//!
//! - [`OptionSpec`] — one option's contract: names, aliases,
//!   required/hidden/final flags, and an [`OptionKind`] carrying the
//!   kind-specific fields.
//! - [`OptionKind`] — closed union of option kinds (flag, counter, help,
//!   version, value, multiple-value, choice).
//! - [`ContextCapture`] — how many trailing tokens an option consumes as its
//!   values.
//! - [`OptionRegistry`] / [`OptionGroup`] — the declared options for one
//!   scope, with name-uniqueness enforcement and mutual-exclusion groups.
//! - [`CommandScope`] — the subcommand tree; each node owns a registry and
//!   sibling-unique children.
//! - [`ValueKind`] / [`TypedValue`] — declared output types and converted
//!   values.
//!
//! The walking side — token classification, capture evaluation, traversal,
//! and conversion — lives in the `argwalk-parse` crate, which consumes these
//! types read-mostly and mutates only per-parse handled/bound state.
//!
//! # Example
//!
//! ```
//! use argwalk_core::*;
//!
//! let root = CommandScope::root()
//!     .with_option(
//!         OptionSpec::multi_value(Some("i"), Some("input"), ValueKind::Text, ContextCapture::OneOrMore)
//!             .required(),
//!     )
//!     .unwrap()
//!     .with_option(
//!         OptionSpec::value(None, Some("angle"), ValueKind::Integer, ContextCapture::ZeroOrOne),
//!     )
//!     .unwrap();
//!
//! assert!(root.options().has_option("i"));
//! assert_eq!(root.options().find("angle").unwrap().kind().capture(), ContextCapture::ZeroOrOne);
//! ```

mod capture;
mod command;
mod error;
mod option;
mod registry;
mod value;

pub use capture::ContextCapture;
pub use command::CommandScope;
pub use error::{ConfigError, Result};
pub use option::{OptionKind, OptionSpec};
pub use registry::{OptionGroup, OptionRegistry, RESERVED_HELP_NAME, verify_name};
pub use value::{Converter, Restriction, TypedValue, ValueKind};
