// SPDX-License-Identifier: MIT OR Apache-2.0
//! Stub matcher for rule unit tests

use jsonmatch_core::{Context, Matcher, Rule, RuleContext, TestResult, Value, deep_equal};

/// Literal equality, except that rule nodes are applied.
pub struct Literal;

impl Matcher for Literal {
    fn test_in(&self, cx: &mut Context, expected: &Value, actual: &Value) -> TestResult {
        match expected {
            Value::Rule(rule) => {
                let mut rc = RuleContext::new(self, cx.collects());
                let outcome = rule.test(&mut rc, actual);
                let prefix = cx.path().clone();
                for mismatch in rc.into_collected() {
                    cx.report(mismatch.prefixed(&prefix))?;
                }
                if let Err(err) = outcome {
                    for mismatch in err.into_mismatches() {
                        cx.report(mismatch.prefixed(&prefix))?;
                    }
                }
                Ok(())
            }
            _ if deep_equal(expected, actual) => Ok(()),
            _ => cx.report_here(format!("expected {expected}, got {actual}")),
        }
    }
}

pub fn run(rule: impl Rule + 'static, actual: &Value, collect: bool) -> TestResult {
    let expected = Value::rule(rule);
    let mut cx = Context::new(collect);
    let outcome = Literal.test_in(&mut cx, &expected, actual);
    cx.finish(outcome)
}

pub fn messages(outcome: TestResult) -> Vec<String> {
    outcome.map_or_else(
        |err| err.mismatches().iter().map(ToString::to_string).collect(),
        |()| Vec::new(),
    )
}
