// SPDX-License-Identifier: MIT OR Apache-2.0
//! The rule capability
//!
//! A [`Rule`] sits in the expected tree in place of a literal and decides for
//! itself whether the actual value satisfies it. Rules see the comparison
//! through a [`RuleContext`]: a rule-local path, the aggregation policy, and
//! a handle back to the [`Matcher`] for nested comparisons.
//!
//! Paths seen by a rule are relative to the rule's own position. The matcher
//! prefixes everything a rule reports with the ambient path.

use crate::context::Context;
use crate::error::{MismatchError, TestError, TestResult};
use crate::path::{Path, Segment};
use crate::value::Value;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A pluggable comparison operator
///
/// Return `Ok(())` on success, a [`TestError::Mismatch`] for a single failure
/// or a [`TestError::Multi`] for several. Mismatches recorded through
/// [`RuleContext::add`] or [`RuleContext::report`] are reported too, even
/// when the rule then returns `Ok(())`.
pub trait Rule: fmt::Debug + Send + Sync {
    /// Test `actual` against this rule
    ///
    /// # Errors
    ///
    /// The mismatch(es) describing why `actual` does not satisfy the rule.
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult;
}

/// Recursive comparison entry point handed to rules
pub trait Matcher {
    /// Compare `expected` against `actual` within `cx`
    ///
    /// # Errors
    ///
    /// The first mismatch in fail-fast mode; aggregate mode reports into
    /// `cx` and only errors on a mismatch the policy refuses to collect.
    fn test_in(&self, cx: &mut Context, expected: &Value, actual: &Value) -> TestResult;
}

/// Restricted view of the comparison context for a [`Rule`]
pub struct RuleContext<'m> {
    matcher: &'m dyn Matcher,
    cx: Context,
}

impl<'m> RuleContext<'m> {
    /// A context for a rule positioned at its own root
    #[must_use]
    pub fn new(matcher: &'m dyn Matcher, collect: bool) -> Self {
        Self {
            matcher,
            cx: Context::new(collect),
        }
    }

    /// Rule-local path
    #[must_use]
    pub const fn path(&self) -> &Path {
        self.cx.path()
    }

    /// Whether mismatches are aggregated
    #[must_use]
    pub const fn collects(&self) -> bool {
        self.cx.collects()
    }

    /// Push an object key; the guard pops it when dropped
    pub fn push_key(&mut self, key: &str) -> RuleScope<'_, 'm> {
        self.push(Segment::from(key))
    }

    /// Push an array index; the guard pops it when dropped
    pub fn push_index(&mut self, index: usize) -> RuleScope<'_, 'm> {
        self.push(Segment::Index(index))
    }

    fn push(&mut self, segment: Segment) -> RuleScope<'_, 'm> {
        self.cx.push_segment(segment);
        RuleScope { rc: self }
    }

    /// A mismatch at the current rule-local path
    #[must_use]
    pub fn mismatch(&self, message: impl Into<String>) -> MismatchError {
        self.cx.mismatch(message)
    }

    /// A single-mismatch error at the current rule-local path
    #[must_use]
    pub fn fail(&self, message: impl Into<String>) -> TestError {
        self.mismatch(message).into()
    }

    /// Record a mismatch at the current path
    ///
    /// # Errors
    ///
    /// Returns the mismatch when not aggregating so the rule can stop.
    pub fn add(&mut self, message: impl Into<String>) -> TestResult {
        self.cx.report_here(message)
    }

    /// Record every mismatch of a nested failure
    ///
    /// # Errors
    ///
    /// Returns `err` unchanged when not aggregating.
    pub fn report(&mut self, err: TestError) -> TestResult {
        self.cx.report_all(err)
    }

    /// Nested comparison at the current rule-local path
    ///
    /// Runs in an isolated child context: nothing is recorded here, the
    /// outcome (including every mismatch collected in aggregate mode) is
    /// returned to the caller to keep, report or discard.
    ///
    /// # Errors
    ///
    /// The nested comparison's mismatch(es).
    pub fn test(&self, expected: &Value, actual: &Value) -> TestResult {
        let mut child = self.cx.isolated();
        let outcome = self.matcher.test_in(&mut child, expected, actual);
        child.finish(outcome)
    }

    /// Mismatches recorded through [`RuleContext::add`] and
    /// [`RuleContext::report`]
    #[must_use]
    pub fn into_collected(self) -> Vec<MismatchError> {
        self.cx.into_collected()
    }
}

impl fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("path", self.cx.path())
            .field("collect", &self.cx.collects())
            .finish_non_exhaustive()
    }
}

/// Guard for a segment pushed by a rule
#[derive(Debug)]
pub struct RuleScope<'r, 'm> {
    rc: &'r mut RuleContext<'m>,
}

impl<'m> Deref for RuleScope<'_, 'm> {
    type Target = RuleContext<'m>;

    fn deref(&self) -> &RuleContext<'m> {
        self.rc
    }
}

impl<'m> DerefMut for RuleScope<'_, 'm> {
    fn deref_mut(&mut self) -> &mut RuleContext<'m> {
        self.rc
    }
}

impl Drop for RuleScope<'_, '_> {
    fn drop(&mut self) {
        self.rc.cx.pop_segment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::deep_equal;

    /// Compares literally and reports at the context's path.
    struct Literal;

    impl Matcher for Literal {
        fn test_in(&self, cx: &mut Context, expected: &Value, actual: &Value) -> TestResult {
            if deep_equal(expected, actual) {
                Ok(())
            } else {
                cx.report_here(format!("expected {expected}, got {actual}"))
            }
        }
    }

    #[test]
    fn test_nested_test_uses_local_path() {
        let mut rc = RuleContext::new(&Literal, false);
        let scope = rc.push_key("field");
        let err = scope.test(&Value::Int(1), &Value::Int(2)).unwrap_err();
        assert_eq!(err.to_string(), ".field: expected 1, got 2");
        drop(scope);
        assert!(rc.path().is_empty());
    }

    #[test]
    fn test_nested_test_is_isolated() {
        let rc = RuleContext::new(&Literal, true);
        let err = rc.test(&Value::Int(1), &Value::Int(2)).unwrap_err();
        assert!(matches!(err, TestError::Multi(_)));
        assert!(rc.into_collected().is_empty());
    }

    #[test]
    fn test_add_collects_or_fails() {
        let mut collecting = RuleContext::new(&Literal, true);
        collecting.add("one").unwrap();
        collecting.push_index(2).add("two").unwrap();
        let rendered: Vec<String> = collecting
            .into_collected()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["one", "[2]: two"]);

        let mut failing = RuleContext::new(&Literal, false);
        assert_eq!(failing.add("one").unwrap_err().to_string(), "one");
    }

    #[test]
    fn test_report_absorbs_nested_failures() {
        let mut rc = RuleContext::new(&Literal, true);
        let err = rc.test(&Value::Int(1), &Value::Int(2)).unwrap_err();
        rc.report(err).unwrap();
        assert_eq!(rc.into_collected().len(), 1);
    }
}
