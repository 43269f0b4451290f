// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process-wide default tester

use crate::tester::Tester;
use jsonmatch_core::{TestResult, Value};
use parking_lot::RwLock;
use std::sync::{Arc, LazyLock};

static DEFAULT_TESTER: LazyLock<RwLock<Arc<Tester>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Tester::new())));

/// The shared tester used by [`test`]
#[must_use]
pub fn default_tester() -> Arc<Tester> {
    Arc::clone(&DEFAULT_TESTER.read())
}

/// Replace the shared tester
///
/// Comparisons already running keep the tester they started with.
pub fn set_default_tester(tester: Tester) {
    *DEFAULT_TESTER.write() = Arc::new(tester);
}

/// Compare with the shared default tester
///
/// # Errors
///
/// See [`Tester::test`].
pub fn test(expected: &Value, actual: &Value) -> TestResult {
    default_tester().test(expected, actual)
}
