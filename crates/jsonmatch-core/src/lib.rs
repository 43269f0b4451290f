// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types for jsonmatch
//!
//! This crate provides the foundation shared by the matcher and the rule set:
//!
//! - [`value`] - The JSON-like value tree ([`Value`], [`Document`])
//! - [`path`] - Traversal paths and their `.key[index]` rendering
//! - [`error`] - Mismatch errors and the aggregate error
//! - [`scalar`] - Fast scalar comparison and structural equality
//! - [`context`] - Path tracking and the fail-fast/aggregate policy
//! - [`rule`] - The [`Rule`] capability and the view rules get of a comparison

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

/// Comparison context
pub mod context;
/// Mismatch error types
pub mod error;
/// Traversal paths
pub mod path;
/// The rule capability
pub mod rule;
/// Scalar comparison
pub mod scalar;
/// Value tree
pub mod value;

// Re-exports for convenience
pub use context::{Context, Scope};
pub use error::{MismatchError, MultiError, TestError, TestResult};
pub use path::{Path, Segment};
pub use rule::{Matcher, Rule, RuleContext, RuleScope};
pub use scalar::{ScalarMatch, compare_scalars, deep_equal};
pub use value::{Document, Entry, Number, Value};
