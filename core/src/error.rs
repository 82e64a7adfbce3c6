//! Configuration-time error types.
//!
//! Every error in this module is raised while a registry, scope tree, or
//! converter set is being built, never during a parse. Parse-time failures
//! live in the `argwalk-parse` crate.

use thiserror::Error;

/// Errors raised while registering options, subcommands, or converters.
///
/// Each variant carries the offending name or bounds so callers can
/// reconstruct a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An option was declared with neither a long nor a short name.
    #[error("option must define a long or short name")]
    MissingName,
    /// A name failed the identifier check (starts with a letter, body of
    /// letters/digits/`_`/`-`, may not end with `_` or `-`).
    #[error("malformed name: {0:?}")]
    MalformedName(String),
    /// The long name collides with a name or alias already registered.
    #[error("duplicate long name in registry: {0}")]
    DuplicateLongName(String),
    /// The short name collides with a name or alias already registered.
    #[error("duplicate short name in registry: {0}")]
    DuplicateShortName(String),
    /// An alias collides with a name or alias already registered.
    #[error("duplicate alias in registry: {0}")]
    DuplicateAlias(String),
    /// Two sibling subcommands share a name.
    #[error("duplicate subcommand in scope: {0}")]
    DuplicateSubcommand(String),
    /// A second converter was registered for a value kind already covered.
    #[error("a converter for value kind '{0}' is already registered")]
    DuplicateConverter(String),
    /// `ContextCapture::fixed` was given a zero item count.
    #[error("fixed capture requires a positive item count")]
    InvalidFixedCount,
    /// A raw `(min, max)` bounds pair matches no known capture policy.
    #[error("capture bounds ({min:?}, {max:?}) do not match any known policy")]
    CaptureBoundsNotRecognized {
        /// Lower bound as supplied, `None` meaning unspecified.
        min: Option<usize>,
        /// Upper bound as supplied, `None` meaning unbounded.
        max: Option<usize>,
    },
    /// An option group references an option that is not registered.
    #[error("option group '{group}' references unknown option: {member}")]
    UnknownGroupMember {
        /// Name of the group being registered.
        group: String,
        /// The member name that did not resolve.
        member: String,
    },
    /// Two option groups in one registry share a name.
    #[error("duplicate option group: {0}")]
    DuplicateGroup(String),
    /// Parser prefix/assignment characters are invalid or not distinct.
    #[error("invalid parser settings: {0}")]
    InvalidSettings(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
