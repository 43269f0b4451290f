// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tester configuration

use serde::{Deserialize, Serialize};

/// Default size cutoff for the linear document scan
pub const DEFAULT_LINEAR_THRESHOLD: i64 = 8;

/// Options fixed when a [`crate::Tester`] is built
///
/// ```
/// use jsonmatch_tester::TesterOptions;
///
/// let options = TesterOptions::default()
///     .with_linear_scan_threshold(4)
///     .with_collect_all();
/// assert!(options.collect_all);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TesterOptions {
    /// Documents with at most this many expected entries are matched with a
    /// nested scan; larger ones use a pooled key index. Negative values are
    /// treated as 0 when the tester is built.
    pub small_doc_linear_threshold: i64,
    /// Aggregate every mismatch into a `MultiError` instead of stopping at
    /// the first.
    pub collect_all: bool,
}

impl Default for TesterOptions {
    fn default() -> Self {
        Self {
            small_doc_linear_threshold: DEFAULT_LINEAR_THRESHOLD,
            collect_all: false,
        }
    }
}

impl TesterOptions {
    /// Set the inclusive size boundary between linear scan and key index
    #[must_use]
    pub const fn with_linear_scan_threshold(mut self, threshold: i64) -> Self {
        self.small_doc_linear_threshold = threshold;
        self
    }

    /// Aggregate all mismatches
    #[must_use]
    pub const fn with_collect_all(mut self) -> Self {
        self.collect_all = true;
        self
    }

    /// The threshold with negative values clamped to zero
    #[must_use]
    pub fn effective_threshold(&self) -> usize {
        usize::try_from(self.small_doc_linear_threshold.max(0)).unwrap_or(usize::MAX)
    }
}
