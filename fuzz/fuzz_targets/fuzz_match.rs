#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for structural comparison
//!
//! The input is split at the first NUL byte into an expected and an actual
//! document.
//!
//! Tests:
//! - Fail-fast and aggregate modes agree on success
//! - An aggregate failure is never empty
//! - Linear scan and key index give the same outcome

use jsonmatch::{Tester, TesterOptions, Value, builtin_registry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Some(split) = data.iter().position(|&b| b == 0) else {
        return;
    };
    let (Ok(left), Ok(right)) = (
        std::str::from_utf8(&data[..split]),
        std::str::from_utf8(&data[split + 1..]),
    ) else {
        return;
    };
    let Ok(expected) = builtin_registry().decode_str(left) else {
        return;
    };
    let Ok(actual) = serde_json::from_str::<serde_json::Value>(right) else {
        return;
    };
    let actual = Value::from(actual);

    let fail_fast = Tester::new().test(&expected, &actual);
    let collected = Tester::with_options(TesterOptions::default().with_collect_all())
        .test(&expected, &actual);

    // === Contract: both modes agree ===
    assert_eq!(fail_fast.is_ok(), collected.is_ok());
    if let Err(all) = &collected {
        assert!(!all.mismatches().is_empty());
    }

    // === Contract: lookup strategy is unobservable ===
    let indexed = Tester::with_options(TesterOptions::default().with_linear_scan_threshold(0))
        .test(&expected, &actual);
    assert_eq!(fail_fast.is_ok(), indexed.is_ok());
});
