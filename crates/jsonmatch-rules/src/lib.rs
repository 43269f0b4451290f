// SPDX-License-Identifier: MIT OR Apache-2.0
//! Builtin directives and the directive registry for jsonmatch
//!
//! - [`equal`] - strict key-set equality and its negation
//! - [`presence`] - nil, required, wildcard and emptiness checks
//! - [`pattern`] - regular expression matching
//! - [`collection`] - unordered element matching, length bounds, membership
//! - [`numeric`] - `<`, `<=`, `>`, `>=` bounds
//! - [`logic`] - `and`, `or`, `nor`, `not`
//! - [`registry`] - token table and JSON decoding
//!
//! ```
//! use jsonmatch_rules::Registry;
//!
//! let expected = Registry::builtin()
//!     .decode_str(r#"{"id": {"$gt": 0}, "tags": {"$length": {"gte": 1}}}"#)
//!     .unwrap();
//! assert!(matches!(expected, jsonmatch_core::Value::Document(_)));
//! ```

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

mod builtin;
/// Collection directives
pub mod collection;
/// Strict equality directives
pub mod equal;
/// Construction and decoding errors
pub mod error;
/// Logical combinators
pub mod logic;
/// Numeric bounds
pub mod numeric;
/// Regular expression matching
pub mod pattern;
/// Presence directives
pub mod presence;
/// Directive registry
pub mod registry;
#[cfg(test)]
mod testing;

pub use collection::{ElementsMatch, InSet, Length, LengthBounds};
pub use equal::{Equal, NotEqual};
pub use error::{DecodeError, RuleError};
pub use logic::{And, Nor, Not, Or};
pub use numeric::{Direction, NumericBound};
pub use pattern::MatchString;
pub use presence::{Any, Empty, Nil, Required};
pub use registry::{Constructor, Registry};
