#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for directive decoding
//!
//! Tests:
//! - Registry decoding of arbitrary input never panics
//! - A decoded tree can be compared against the plain document
//! - Plain JSON always satisfies itself

use jsonmatch::{Tester, TesterOptions, Value, builtin_registry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // === Decoding may reject input but must not panic ===
    let Ok(expected) = builtin_registry().decode_str(input) else {
        return;
    };
    let Ok(json) = serde_json::from_str::<serde_json::Value>(input) else {
        return;
    };
    let plain = Value::from(json);

    let tester = Tester::with_options(TesterOptions::default().with_collect_all());
    let _ = tester.test(&expected, &plain);

    // === Contract: plain data satisfies itself ===
    assert!(tester.test(&plain, &plain).is_ok());
    assert_eq!(tester.outstanding_buffers(), 0);
});
