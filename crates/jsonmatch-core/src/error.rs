// SPDX-License-Identifier: MIT OR Apache-2.0
//! Comparison errors
//!
//! A comparison either succeeds, fails with a single [`MismatchError`], or,
//! when aggregation is enabled, fails with a [`MultiError`] listing every
//! mismatch in depth-first order. [`TestError`] is the union of the two.

use crate::path::Path;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result alias for comparisons
pub type TestResult = std::result::Result<(), TestError>;

/// A single path-qualified comparison failure
///
/// The path is a snapshot taken when the mismatch was built; later traversal
/// does not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MismatchError {
    /// Location of the failing node
    pub path: Path,
    /// Human-readable description
    pub message: String,
}

impl MismatchError {
    /// Build a mismatch at `path`
    #[must_use]
    pub fn new(path: Path, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Build a mismatch at the root path
    #[must_use]
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(Path::root(), message)
    }

    /// The same mismatch relocated under `prefix`
    #[must_use]
    pub fn prefixed(self, prefix: &Path) -> Self {
        if prefix.is_empty() {
            return self;
        }
        Self {
            path: prefix.join(&self.path),
            message: self.message,
        }
    }
}

impl fmt::Display for MismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for MismatchError {}

/// Every mismatch found by an aggregating comparison
///
/// Never empty; use [`MultiError::new`] which refuses an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MultiError {
    mismatches: Vec<MismatchError>,
}

impl MultiError {
    /// Wrap a list of mismatches, `None` if the list is empty
    #[must_use]
    pub fn new(mismatches: Vec<MismatchError>) -> Option<Self> {
        if mismatches.is_empty() {
            None
        } else {
            Some(Self { mismatches })
        }
    }

    /// Mismatches in traversal order
    #[must_use]
    pub fn mismatches(&self) -> &[MismatchError] {
        &self.mismatches
    }

    /// The first mismatch encountered
    #[must_use]
    pub fn first(&self) -> &MismatchError {
        &self.mismatches[0]
    }

    /// Number of mismatches (at least one)
    #[must_use]
    pub fn len(&self) -> usize {
        self.mismatches.len()
    }

    /// Always false; present for API symmetry with `len`
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Consume into the underlying list
    #[must_use]
    pub fn into_mismatches(self) -> Vec<MismatchError> {
        self.mismatches
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mismatches.len() == 1 {
            write!(f, "{}", self.first())
        } else {
            write!(
                f,
                "{} mismatches (first: {})",
                self.mismatches.len(),
                self.first()
            )
        }
    }
}

impl std::error::Error for MultiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.first())
    }
}

/// Failure outcome of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    /// Fail-fast mode: the first mismatch
    #[error(transparent)]
    Mismatch(#[from] MismatchError),
    /// Aggregate mode: every mismatch
    #[error(transparent)]
    Multi(#[from] MultiError),
}

impl TestError {
    /// Mismatches carried by this error, in order
    #[must_use]
    pub fn mismatches(&self) -> &[MismatchError] {
        match self {
            Self::Mismatch(single) => std::slice::from_ref(single),
            Self::Multi(multi) => multi.mismatches(),
        }
    }

    /// Consume into an owned list of mismatches
    #[must_use]
    pub fn into_mismatches(self) -> Vec<MismatchError> {
        match self {
            Self::Mismatch(single) => vec![single],
            Self::Multi(multi) => multi.into_mismatches(),
        }
    }

    /// The first mismatch
    #[must_use]
    pub fn first(&self) -> &MismatchError {
        match self {
            Self::Mismatch(single) => single,
            Self::Multi(multi) => multi.first(),
        }
    }
}
