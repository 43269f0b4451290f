// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fast scalar comparison
//!
//! Leaves of a comparison are checked here before falling back to full
//! structural equality. Strings and booleans compare by type and value;
//! numbers compare across the integer/float split, in the `i64` domain when
//! both are integers and in the `f64` domain otherwise.

use crate::value::{Number, Value};
use std::sync::Arc;

/// Outcome of [`compare_scalars`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarMatch {
    /// Not a primitive pairing; use [`deep_equal`]
    Unrecognized,
    /// Evaluated and equal
    Equal,
    /// Evaluated and different, with a description
    Differs(String),
}

impl ScalarMatch {
    /// Whether the pair was evaluated and found equal
    #[must_use]
    pub const fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }
}

/// Compare two leaves without walking any structure
///
/// The pairing is recognized whenever `expected` is a string, a boolean or a
/// number. An `actual` of a different type is then an evaluated mismatch.
#[must_use]
pub fn compare_scalars(expected: &Value, actual: &Value) -> ScalarMatch {
    match expected {
        Value::String(want) => match actual {
            Value::String(got) if got == want => ScalarMatch::Equal,
            Value::String(got) => {
                ScalarMatch::Differs(format!("expected string {want:?}, got {got:?}"))
            }
            other => ScalarMatch::Differs(format!(
                "expected string {want:?}, got {}",
                other.kind()
            )),
        },
        Value::Bool(want) => match actual {
            Value::Bool(got) if got == want => ScalarMatch::Equal,
            Value::Bool(got) => ScalarMatch::Differs(format!("expected bool {want}, got {got}")),
            other => ScalarMatch::Differs(format!("expected bool {want}, got {}", other.kind())),
        },
        Value::Int(_) | Value::Float(_) => compare_numbers(expected, actual),
        _ => ScalarMatch::Unrecognized,
    }
}

fn compare_numbers(expected: &Value, actual: &Value) -> ScalarMatch {
    let Some(want) = expected.as_number() else {
        return ScalarMatch::Unrecognized;
    };
    let Some(got) = actual.as_number() else {
        let domain = match want {
            Number::Int(_) => "integer",
            Number::Float(_) => "float",
        };
        return ScalarMatch::Differs(format!(
            "expected {domain} ({want}), got {}",
            actual.kind()
        ));
    };
    if want == got {
        return ScalarMatch::Equal;
    }
    ScalarMatch::Differs(format!(
        "expected {} {want}, got {} {got}",
        expected.kind(),
        actual.kind()
    ))
}

/// Full structural equality
///
/// Documents compare entry by entry in order, arrays element by element,
/// scalar leaves through [`compare_scalars`]. Rules are equal only to the
/// same rule object.
#[must_use]
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Document(x), Value::Document(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|(l, r)| l.key == r.key && deep_equal(&l.value, &r.value))
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Rule(x), Value::Rule(y)) => Arc::ptr_eq(x, y),
        _ => compare_scalars(a, b).is_equal(),
    }
}
