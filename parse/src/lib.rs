//! Token classification, context capture, and traversal for argument
//! parsing.
//!
//! This crate walks a pre-split token sequence against a declared
//! [`CommandScope`](argwalk_core::CommandScope) tree and produces typed,
//! encounter-ordered results:
//!
//! - [`classify`] — decides whether one token is a long/short/slash option
//!   or a plain value, and splits inline `name=value` forms.
//! - [`count_suitable_values`] / [`items_to_capture`] — evaluate a capture
//!   policy against the remaining queue with local lookahead only.
//! - [`ConverterRegistry`] — maps captured raw strings to
//!   [`TypedValue`](argwalk_core::TypedValue)s, with a built-in table and
//!   caller-registered converters for custom kinds.
//! - [`Parser`] — the traversal engine; returns a [`ParseResult`] of
//!   [`Binding`] records and unrecognized tokens instead of invoking
//!   callbacks.
//!
//! The walk is single-threaded and synchronous: one queue, consumed
//! front-to-back, no I/O. Declarative types (options, subcommands, capture
//! policies) live in `argwalk-core`.
//!
//! # Example
//!
//! ```
//! use argwalk_core::{CommandScope, ContextCapture, OptionSpec, ValueKind};
//! use argwalk_parse::Parser;
//!
//! let root = CommandScope::root()
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
//! let mut parser = Parser::new(root);
//! let tokens: Vec<String> = ["status", "--date", "2024-01-01"]
//!     .iter().map(|t| t.to_string()).collect();
//! let result = parser.parse(&tokens).unwrap();
//!
//! assert_eq!(result.command_path, ["status"]);
//! assert!(result.is_bound("date"));
//! ```

mod capture;
mod convert;
mod engine;
mod error;
mod settings;
mod token;

pub use capture::{count_suitable_values, items_to_capture};
pub use convert::ConverterRegistry;
pub use engine::{Binding, ParseResult, Parser};
pub use error::{ParseError, Result};
pub use settings::ParserSettings;
pub use token::{Argument, TokenKind, classify};
