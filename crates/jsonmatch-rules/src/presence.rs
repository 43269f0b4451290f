// SPDX-License-Identifier: MIT OR Apache-2.0
//! Presence assertions: nil, required, any, empty

use jsonmatch_core::{Rule, RuleContext, TestResult, Value};

/// Nil-ness check with an explicit/implicit distinction
///
/// `target_nil` selects the polarity: `true` for "must be nil", `false` for
/// "must be non-nil". When `explicit` is set the polarity is enforced. When
/// it is not, a value that happens to have the target nil-ness is rejected,
/// asking the author to assert it explicitly, and any other value passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nil {
    target_nil: bool,
    explicit: bool,
}

impl Nil {
    /// The value must be nil
    #[must_use]
    pub const fn is_nil(explicit: bool) -> Self {
        Self {
            target_nil: true,
            explicit,
        }
    }

    /// The value must not be nil
    #[must_use]
    pub const fn not_nil(explicit: bool) -> Self {
        Self {
            target_nil: false,
            explicit,
        }
    }
}

impl Rule for Nil {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        let nil = actual.is_null();
        if !self.explicit {
            return match (nil == self.target_nil, nil) {
                (false, _) => Ok(()),
                (true, true) => Err(rc.fail(
                    "value is nil but expectation not explicitly asserted ($nil true required)",
                )),
                (true, false) => Err(rc.fail(
                    "value is non-nil but expectation not explicitly asserted ($nil false required)",
                )),
            };
        }
        match (self.target_nil, nil) {
            (true, false) => Err(rc.fail(format!(
                "expected nil ($nil true), got non-nil ({})",
                actual.kind()
            ))),
            (false, true) => Err(rc.fail("expected non-nil ($nil false), got nil")),
            _ => Ok(()),
        }
    }
}

/// The value must be present and not its type's zero value
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        if actual.is_zero() {
            return Err(rc.fail(format!(
                "required value missing or zero ({})",
                actual.kind()
            )));
        }
        Ok(())
    }
}

/// Wildcard
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl Rule for Any {
    fn test(&self, _rc: &mut RuleContext<'_>, _actual: &Value) -> TestResult {
        Ok(())
    }
}

/// Emptiness check; `want` selects empty (`true`) or non-empty (`false`)
#[derive(Debug, Clone, Copy)]
pub struct Empty {
    want: bool,
}

impl Empty {
    /// Require emptiness when `want`, non-emptiness otherwise
    #[must_use]
    pub const fn new(want: bool) -> Self {
        Self { want }
    }
}

impl Rule for Empty {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        match (self.want, actual.is_empty()) {
            (true, false) => Err(rc.fail(format!(
                "$empty true failed: value ({}){actual} not empty",
                actual.kind()
            ))),
            (false, true) => Err(rc.fail(format!(
                "$empty false failed: value ({}){actual} is empty",
                actual.kind()
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{messages, run};
    use jsonmatch_core::Document;

    #[test]
    fn test_nil_explicit() {
        assert!(run(Nil::is_nil(true), &Value::Null, false).is_ok());
        assert_eq!(
            messages(run(Nil::is_nil(true), &Value::Int(1), false)),
            vec!["expected nil ($nil true), got non-nil (int)"]
        );
        assert!(run(Nil::not_nil(true), &Value::Int(1), false).is_ok());
        assert_eq!(
            messages(run(Nil::not_nil(true), &Value::Null, false)),
            vec!["expected non-nil ($nil false), got nil"]
        );
    }

    #[test]
    fn test_nil_implicit_guard() {
        assert_eq!(
            messages(run(Nil::is_nil(false), &Value::Null, false)),
            vec!["value is nil but expectation not explicitly asserted ($nil true required)"]
        );
        assert!(run(Nil::is_nil(false), &Value::Int(1), false).is_ok());

        assert_eq!(
            messages(run(Nil::not_nil(false), &Value::from("x"), false)),
            vec!["value is non-nil but expectation not explicitly asserted ($nil false required)"]
        );
        assert!(run(Nil::not_nil(false), &Value::Null, false).is_ok());
    }

    #[test]
    fn test_required() {
        for zero in [Value::Null, Value::Bool(false), Value::Int(0), Value::Float(0.0), Value::from("")] {
            assert!(run(Required, &zero, false).is_err(), "{zero} should be rejected");
        }
        assert_eq!(
            messages(run(Required, &Value::from(""), false)),
            vec!["required value missing or zero (string)"]
        );
        assert!(run(Required, &Value::from("x"), false).is_ok());
        assert!(run(Required, &Value::Array(Vec::new()), false).is_ok());
    }

    #[test]
    fn test_any() {
        assert!(run(Any, &Value::Null, false).is_ok());
        assert!(run(Any, &Value::from(vec![1]), false).is_ok());
    }

    #[test]
    fn test_empty() {
        assert!(run(Empty::new(true), &Value::Array(Vec::new()), false).is_ok());
        assert!(run(Empty::new(true), &Value::Document(Document::new()), false).is_ok());
        assert!(run(Empty::new(true), &Value::Null, false).is_ok());
        assert!(run(Empty::new(true), &Value::Int(0), false).is_ok());
        assert_eq!(
            messages(run(Empty::new(true), &Value::from(vec![1]), false)),
            vec!["$empty true failed: value (array)[1] not empty"]
        );
        assert!(run(Empty::new(false), &Value::from("a"), false).is_ok());
        assert_eq!(
            messages(run(Empty::new(false), &Value::from(""), false)),
            vec![r#"$empty false failed: value (string)"" is empty"#]
        );
    }
}
