//! `strexpand_core` expands placeholders embedded in template strings at
//! runtime.
//!
//! A template mixes literal text with three kinds of tokens:
//!
//! - named placeholders such as `{DATE:yyyy-MM-dd}`, `{GUID-0:N}` or
//!   `{APP,-10}`, resolved through a [`Registry`] of expanders or through
//!   per-call [`NamedValues`].
//! - indexed placeholders such as `{0}` or `{1,8:x}`, bound to positional
//!   arguments.
//! - hex escapes such as `#41`, `#u{4100}` or `#U0041`, decoded as UTF-8,
//!   UTF-16LE or UTF-16BE text.
//!
//! ## Processing Pipeline
//!
//! ```text
//! template
//!   → lexer (logos anchors, one grammar per token family)
//!   → named pass (registry and per-call overrides, width adjustment)
//!   → hex pass (escapes in the partially expanded text)
//!   → indexed pass (positional arguments, width adjustment)
//! ```
//!
//! Text that does not resolve is left exactly as written.
//!
//! ## Quick Start
//!
//! ```rust
//! use strexpand_core::Expander;
//! use strexpand_core::NamedValues;
//! use strexpand_core::Registry;
//! use strexpand_core::Value;
//!
//! let registry = Registry::new();
//! registry.register("APP", Expander::value("demo"));
//!
//! let named = NamedValues::new().with("USER", Value::from("ada"));
//! let output = registry.expand_with(
//! 	"{APP}: {USER} has {0:N0} points #21",
//! 	Some(&named),
//! 	&[Value::from(12_345)],
//! )?;
//! assert_eq!(output, "demo: ada has 12,345 points !");
//! # Ok::<(), strexpand_core::ExpandError>(())
//! ```
//!
//! ## Configuration
//!
//! [`ExpandConfig`] loads static values and the initial counter from a
//! `strexpand.toml` file, see [`config`].

pub use config::*;
pub use engine::*;
pub use error::*;
pub use global::*;
pub use hex::*;
pub use lexer::tokenize;
pub use lexer::tokenize_family;
pub use registry::*;
pub use tokens::*;
pub use value::*;
pub use width::*;

pub mod builtins;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod format;
mod global;
mod hex;
mod lexer;
mod registry;
mod tokens;
mod value;
mod width;

#[cfg(test)]
mod __fixtures;
