// SPDX-License-Identifier: MIT OR Apache-2.0
//! # jsonmatch
//!
//! Structural assertions for JSON-like value trees.
//!
//! An expected tree describes what an actual tree must contain. Objects match
//! as subsets, arrays and scalars match exactly, and directive objects such
//! as `{"$regex": "^v\\d+$"}` or `{"$length": {"gte": 1}}` replace literal
//! values with rules. Every mismatch carries the path where it occurred.
//!
//! ```
//! use serde_json::json;
//!
//! let expected = json!({
//!     "id": {"$gt": 0},
//!     "name": {"$regex": "^[A-Z]"},
//!     "tags": {"$elementsMatch": ["b", "a"]},
//! });
//! let actual = json!({"id": 7, "name": "Ada", "tags": ["a", "b"], "extra": null});
//! assert!(jsonmatch::check_json(&expected, &actual).is_ok());
//!
//! let err = jsonmatch::check_json(&json!({"id": 1}), &json!({"id": 2})).unwrap_err();
//! assert_eq!(err.to_string(), ".id: expected int 1, got int 2");
//! ```
//!
//! The constituent crates are re-exported:
//!
//! - [`core`] - value tree, paths, errors, the [`Rule`] capability
//! - [`tester`] - the [`Tester`] and its options
//! - [`rules`] - builtin directives and the [`Registry`]

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

/// Re-export of jsonmatch-core.
pub use jsonmatch_core as core;
/// Re-export of jsonmatch-rules.
pub use jsonmatch_rules as rules;
/// Re-export of jsonmatch-tester.
pub use jsonmatch_tester as tester;

pub use jsonmatch_core::{
    Document, MismatchError, MultiError, Path, Rule, RuleContext, TestError, TestResult, Value,
};
pub use jsonmatch_rules::{DecodeError, Registry, RuleError};
pub use jsonmatch_tester::{Tester, TesterOptions, default_tester, set_default_tester, test};

use std::sync::LazyLock;
use thiserror::Error;

static BUILTIN: LazyLock<Registry> = LazyLock::new(Registry::builtin);

/// The builtin directive registry
#[must_use]
pub fn builtin_registry() -> &'static Registry {
    &BUILTIN
}

/// Failure of a JSON-level check
#[derive(Debug, Error)]
pub enum CheckError {
    /// The expected document could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The actual document does not satisfy the expected one
    #[error(transparent)]
    Mismatch(#[from] TestError),
}

impl CheckError {
    /// The mismatches, if the failure was a comparison failure
    #[must_use]
    pub fn mismatches(&self) -> &[MismatchError] {
        match self {
            Self::Mismatch(err) => err.mismatches(),
            Self::Decode(_) => &[],
        }
    }
}

/// Decode `expected` with the builtin directives and compare `actual`
/// against it with the default tester
///
/// # Errors
///
/// [`CheckError::Decode`] for a malformed directive in `expected`,
/// [`CheckError::Mismatch`] when `actual` does not satisfy it.
pub fn check_json(expected: &serde_json::Value, actual: &serde_json::Value) -> Result<(), CheckError> {
    check_json_with(&default_tester(), builtin_registry(), expected, actual)
}

/// [`check_json`] with an explicit tester and registry
///
/// # Errors
///
/// See [`check_json`].
pub fn check_json_with(
    tester: &Tester,
    registry: &Registry,
    expected: &serde_json::Value,
    actual: &serde_json::Value,
) -> Result<(), CheckError> {
    let expected = registry.decode(expected)?;
    let actual = Value::from(actual.clone());
    tester.test(&expected, &actual)?;
    Ok(())
}
