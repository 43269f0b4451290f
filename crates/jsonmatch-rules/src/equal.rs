// SPDX-License-Identifier: MIT OR Apache-2.0
//! Strict equality and its negation

use ahash::AHashSet;
use jsonmatch_core::{Rule, RuleContext, ScalarMatch, TestResult, Value, compare_scalars, deep_equal};

/// Exact key-set matching for one level of the expected tree
///
/// A document payload requires the actual document to have exactly the same
/// keys. Values under shared keys are still compared with ordinary subset
/// semantics, so nested documents stay lenient unless wrapped as well.
/// Array and scalar payloads compare as usual.
#[derive(Debug)]
pub struct Equal {
    expected: Value,
}

impl Equal {
    /// Wrap `expected`
    #[must_use]
    pub const fn new(expected: Value) -> Self {
        Self { expected }
    }
}

impl Rule for Equal {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        let Value::Document(expected) = &self.expected else {
            return rc.test(&self.expected, actual);
        };
        let Value::Document(actual) = actual else {
            return Err(rc.fail(format!("expected document, got {}", actual.kind())));
        };

        for entry in expected {
            let mut scope = rc.push_key(&entry.key);
            match actual.get(&entry.key) {
                Some(value) => {
                    if let Err(err) = scope.test(&entry.value, value) {
                        scope.report(err)?;
                    }
                }
                None => scope.add("key not found")?,
            }
        }

        let known: AHashSet<&str> = expected.iter().map(|e| e.key.as_str()).collect();
        let mut reported = AHashSet::new();
        for entry in actual {
            let key = entry.key.as_str();
            if !known.contains(key) && reported.insert(key) {
                rc.push_key(key)
                    .add(format!("unexpected extra key {key:?} (strict $eq)"))?;
            }
        }
        Ok(())
    }
}

/// Fails when the actual value equals the payload
#[derive(Debug)]
pub struct NotEqual {
    expected: Value,
}

impl NotEqual {
    /// Forbid `expected`
    ///
    /// `expected` should be plain data: a rule inside it never compares
    /// equal, so the check would always pass. The `$ne` decoder rejects such
    /// payloads.
    #[must_use]
    pub const fn new(expected: Value) -> Self {
        Self { expected }
    }
}

impl Rule for NotEqual {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        match compare_scalars(&self.expected, actual) {
            ScalarMatch::Equal => Err(rc.fail(format!(
                "$ne failed: values are equal ({})",
                self.expected
            ))),
            ScalarMatch::Differs(_) => Ok(()),
            ScalarMatch::Unrecognized if deep_equal(&self.expected, actual) => Err(rc.fail(
                format!("$ne failed: values are deeply equal ({})", self.expected),
            )),
            ScalarMatch::Unrecognized => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{messages, run};
    use jsonmatch_core::Document;

    fn doc(pairs: &[(&str, i64)]) -> Value {
        Value::Document(pairs.iter().map(|&(k, v)| (k, v)).collect())
    }

    #[test]
    fn test_equal_rejects_extra_key() {
        let outcome = run(Equal::new(doc(&[("a", 1)])), &doc(&[("a", 1), ("b", 2)]), false);
        assert_eq!(
            messages(outcome),
            vec![r#".b: unexpected extra key "b" (strict $eq)"#]
        );
    }

    #[test]
    fn test_equal_exact_key_set_passes() {
        let outcome = run(Equal::new(doc(&[("a", 1), ("b", 2)])), &doc(&[("b", 2), ("a", 1)]), false);
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_equal_collects_missing_changed_and_extra() {
        let outcome = run(
            Equal::new(doc(&[("a", 1), ("b", 2)])),
            &doc(&[("a", 9), ("c", 3), ("c", 4)]),
            true,
        );
        assert_eq!(
            messages(outcome),
            vec![
                ".a: expected 1, got 9",
                ".b: key not found",
                r#".c: unexpected extra key "c" (strict $eq)"#,
            ]
        );
    }

    #[test]
    fn test_equal_non_document_actual() {
        let outcome = run(Equal::new(doc(&[("a", 1)])), &Value::Int(1), false);
        assert_eq!(messages(outcome), vec!["expected document, got int"]);
    }

    #[test]
    fn test_equal_scalar_delegates() {
        assert!(run(Equal::new(Value::Int(3)), &Value::Int(3), false).is_ok());
        assert!(run(Equal::new(Value::Int(3)), &Value::Int(4), false).is_err());
    }

    #[test]
    fn test_not_equal() {
        assert_eq!(
            messages(run(NotEqual::new(Value::Int(5)), &Value::Float(5.0), false)),
            vec!["$ne failed: values are equal (5)"]
        );
        assert!(run(NotEqual::new(Value::Int(5)), &Value::Int(6), false).is_ok());
        assert!(run(NotEqual::new(Value::Int(5)), &Value::from("5"), false).is_ok());
    }

    #[test]
    fn test_not_equal_structural() {
        let value = Value::Document(Document::new().with("a", vec![1, 2]));
        assert_eq!(
            messages(run(NotEqual::new(value.clone()), &value, false)),
            vec![r#"$ne failed: values are deeply equal ({"a": [1, 2]})"#]
        );
        assert!(run(NotEqual::new(Value::Null), &Value::Int(0), false).is_ok());
    }
}
