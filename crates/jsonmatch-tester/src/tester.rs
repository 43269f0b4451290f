// SPDX-License-Identifier: MIT OR Apache-2.0
//! The structural matcher
//!
//! [`Tester`] walks the expected tree and decides, node by node, whether the
//! actual tree satisfies it:
//!
//! - documents use subset semantics: every expected key must be present and
//!   match, extra actual keys are ignored
//! - arrays must have the same length and match element by element
//! - rules decide for themselves
//! - scalars go through the fast comparator, then structural equality
//!
//! Document lookups switch from a nested scan to a pooled key index once the
//! expected document has more entries than the configured threshold.

use crate::config::TesterOptions;
use crate::index::{IndexMap, KeyIndex};
use ahash::RandomState;
use jsonmatch_core::{
    Context, Document, Matcher, Rule, RuleContext, ScalarMatch, TestResult, Value,
    compare_scalars, deep_equal,
};
use jsonmatch_pool::{PoolStrategy, SharedPool};
use std::fmt;
use tracing::{debug, trace};

/// Structural comparator with subset semantics for documents
///
/// A tester is immutable once built and can be shared between threads.
///
/// ```
/// use jsonmatch_core::{Document, Value};
/// use jsonmatch_tester::Tester;
///
/// let expected = Value::from(Document::new().with("id", 1));
/// let actual = Value::from(Document::new().with("id", 1).with("extra", true));
/// assert!(Tester::new().test(&expected, &actual).is_ok());
/// ```
pub struct Tester {
    options: TesterOptions,
    pool: SharedPool<IndexMap>,
    hasher: RandomState,
}

impl Tester {
    /// A tester with default options
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(TesterOptions::default())
    }

    /// A tester with `options`; a negative threshold is clamped to 0
    #[must_use]
    pub fn with_options(options: TesterOptions) -> Self {
        let options = TesterOptions {
            small_doc_linear_threshold: options.small_doc_linear_threshold.max(0),
            ..options
        };
        debug!(
            threshold = options.small_doc_linear_threshold,
            collect_all = options.collect_all,
            "tester configured"
        );
        Self {
            options,
            pool: SharedPool::new(PoolStrategy::default()),
            hasher: RandomState::new(),
        }
    }

    /// The options in effect, after clamping
    #[must_use]
    pub const fn options(&self) -> TesterOptions {
        self.options
    }

    /// Key index buffers currently checked out of the pool
    #[must_use]
    pub fn outstanding_buffers(&self) -> usize {
        self.pool.outstanding()
    }

    /// Key index buffers waiting in the pool for reuse
    #[must_use]
    pub fn idle_buffers(&self) -> usize {
        self.pool.idle_count()
    }

    /// Check whether `actual` satisfies `expected`
    ///
    /// # Errors
    ///
    /// A single `MismatchError` at the first failure, or, with
    /// `collect_all`, a `MultiError` holding every mismatch in traversal
    /// order.
    pub fn test(&self, expected: &Value, actual: &Value) -> TestResult {
        let mut cx = Context::new(self.options.collect_all);
        let outcome = self.test_in(&mut cx, expected, actual);
        let result = cx.finish(outcome);
        trace!(matched = result.is_ok(), "comparison finished");
        result
    }

    fn compare_document(&self, cx: &mut Context, expected: &Document, actual: &Value) -> TestResult {
        let Value::Document(actual) = actual else {
            return cx.report_here(format!("expected document, got {}", actual.kind()));
        };
        if expected.len() <= self.options.effective_threshold() {
            self.match_entries(cx, expected, |key| actual.get(key))
        } else {
            trace!(entries = expected.len(), "matching with key index");
            let index = KeyIndex::build(actual, self.pool.acquire(), &self.hasher);
            self.match_entries(cx, expected, |key| index.get(key))
        }
    }

    fn match_entries<'a>(
        &self,
        cx: &mut Context,
        expected: &Document,
        lookup: impl Fn(&str) -> Option<&'a Value>,
    ) -> TestResult {
        for entry in expected {
            match lookup(&entry.key) {
                Some(value) => {
                    let mut scope = cx.scope(entry.key.as_str());
                    self.test_in(&mut scope, &entry.value, value)?;
                }
                None => cx.report_at(entry.key.as_str(), "key not found")?,
            }
        }
        Ok(())
    }

    fn compare_array(&self, cx: &mut Context, expected: &[Value], actual: &Value) -> TestResult {
        let Value::Array(actual) = actual else {
            return cx.report_here(format!("expected array, got {}", actual.kind()));
        };
        if expected.len() != actual.len() {
            return cx.report_here(format!(
                "length mismatch: expected {}, got {}",
                expected.len(),
                actual.len()
            ));
        }
        for (i, (want, got)) in expected.iter().zip(actual).enumerate() {
            let mut scope = cx.scope(i);
            self.test_in(&mut scope, want, got)?;
        }
        Ok(())
    }

    fn apply_rule(&self, cx: &mut Context, rule: &dyn Rule, actual: &Value) -> TestResult {
        trace!(path = %cx.path(), ?rule, "applying rule");
        let mut rc = RuleContext::new(self, cx.collects());
        let outcome = rule.test(&mut rc, actual);
        let recorded = rc.into_collected();
        let prefix = cx.path().clone();
        for mismatch in recorded {
            cx.report(mismatch.prefixed(&prefix))?;
        }
        if let Err(err) = outcome {
            for mismatch in err.into_mismatches() {
                cx.report(mismatch.prefixed(&prefix))?;
            }
        }
        Ok(())
    }

    fn compare_scalar(cx: &mut Context, expected: &Value, actual: &Value) -> TestResult {
        match compare_scalars(expected, actual) {
            ScalarMatch::Equal => Ok(()),
            ScalarMatch::Differs(message) => cx.report_here(message),
            ScalarMatch::Unrecognized if deep_equal(expected, actual) => Ok(()),
            ScalarMatch::Unrecognized => cx.report_here(format!(
                "expected {}, got {}",
                describe(expected),
                describe(actual)
            )),
        }
    }
}

impl Matcher for Tester {
    fn test_in(&self, cx: &mut Context, expected: &Value, actual: &Value) -> TestResult {
        match expected {
            Value::Document(doc) => self.compare_document(cx, doc, actual),
            Value::Array(items) => self.compare_array(cx, items, actual),
            Value::Rule(rule) => self.apply_rule(cx, rule.as_ref(), actual),
            _ => Self::compare_scalar(cx, expected, actual),
        }
    }
}

impl Default for Tester {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tester")
            .field("options", &self.options)
            .field("idle_buffers", &self.pool.idle_count())
            .finish_non_exhaustive()
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        other => format!("{} {other}", other.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonmatch_core::{RuleContext, TestError};
    use proptest::prelude::*;

    fn doc<const N: usize>(entries: [(&str, Value); N]) -> Value {
        Value::Document(entries.into_iter().collect())
    }

    fn rendered(err: &TestError) -> Vec<String> {
        err.mismatches().iter().map(ToString::to_string).collect()
    }

    /// Fails at a fixed rule-local path.
    #[derive(Debug)]
    struct FailAt(&'static str);

    impl Rule for FailAt {
        fn test(&self, rc: &mut RuleContext<'_>, _actual: &Value) -> TestResult {
            Err(rc.push_key(self.0).fail("rule says no"))
        }
    }

    /// Records two mismatches and then succeeds.
    #[derive(Debug)]
    struct RecordTwice;

    impl Rule for RecordTwice {
        fn test(&self, rc: &mut RuleContext<'_>, _actual: &Value) -> TestResult {
            rc.add("first")?;
            rc.push_index(1).add("second")?;
            Ok(())
        }
    }

    #[test]
    fn test_subset_ignores_extra_keys() {
        let expected = doc([("a", 1.into())]);
        let actual = doc([("a", 1.into()), ("b", 2.into())]);
        assert!(Tester::new().test(&expected, &actual).is_ok());
    }

    #[test]
    fn test_missing_key() {
        let expected = doc([("user", doc([("name", "x".into())]))]);
        let actual = doc([("user", doc([]))]);
        let err = Tester::new().test(&expected, &actual).unwrap_err();
        assert_eq!(err.to_string(), ".user.name: key not found");
    }

    #[test]
    fn test_type_mismatch_on_document() {
        let err = Tester::new()
            .test(&doc([("a", 1.into())]), &Value::from(vec![1]))
            .unwrap_err();
        assert_eq!(err.to_string(), "expected document, got array");
    }

    #[test]
    fn test_array_length_mismatch_has_no_element_detail() {
        let tester = Tester::with_options(TesterOptions::default().with_collect_all());
        let err = tester
            .test(&Value::from(vec![1, 2]), &Value::from(vec![3]))
            .unwrap_err();
        assert_eq!(rendered(&err), vec!["length mismatch: expected 2, got 1"]);
    }

    #[test]
    fn test_array_elements_at_index() {
        let expected = doc([("tags", Value::from(vec!["a", "b"]))]);
        let actual = doc([("tags", Value::from(vec!["a", "c"]))]);
        let err = Tester::new().test(&expected, &actual).unwrap_err();
        assert_eq!(err.to_string(), r#".tags[1]: expected string "b", got "c""#);
    }

    #[test]
    fn test_int_matches_float() {
        assert!(Tester::new().test(&Value::Int(5), &Value::Float(5.0)).is_ok());
        assert!(Tester::new().test(&Value::Int(5), &Value::Float(5.1)).is_err());
    }

    #[test]
    fn test_null_fallback() {
        let tester = Tester::new();
        assert!(tester.test(&Value::Null, &Value::Null).is_ok());
        let err = tester.test(&Value::Null, &Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "expected null, got int 1");
    }

    #[test]
    fn test_collect_all_in_traversal_order() {
        let tester = Tester::with_options(TesterOptions::default().with_collect_all());
        let expected = doc([
            ("a", 1.into()),
            ("b", doc([("c", "x".into())])),
            ("d", Value::from(vec![1, 2])),
        ]);
        let actual = doc([("a", 2.into()), ("b", doc([])), ("d", Value::from(vec![1, 3]))]);
        let err = tester.test(&expected, &actual).unwrap_err();
        assert!(matches!(err, TestError::Multi(_)));
        assert_eq!(
            rendered(&err),
            vec![
                ".a: expected int 1, got int 2",
                ".b.c: key not found",
                ".d[1]: expected int 2, got int 3",
            ]
        );
    }

    #[test]
    fn test_fail_fast_stops_at_first() {
        let expected = doc([("a", 1.into()), ("b", 2.into())]);
        let actual = doc([]);
        let err = Tester::new().test(&expected, &actual).unwrap_err();
        assert!(matches!(err, TestError::Mismatch(_)));
        assert_eq!(err.to_string(), ".a: key not found");
    }

    #[test]
    fn test_rule_mismatch_is_prefixed() {
        let expected = doc([("outer", doc([("field", Value::rule(FailAt("inner")))]))]);
        let actual = doc([("outer", doc([("field", 1.into())]))]);
        let err = Tester::new().test(&expected, &actual).unwrap_err();
        assert_eq!(err.to_string(), ".outer.field.inner: rule says no");
    }

    #[test]
    fn test_rule_recorded_mismatches_are_reported() {
        let expected = doc([("x", Value::rule(RecordTwice))]);
        let actual = doc([("x", Value::Null)]);

        let collecting = Tester::with_options(TesterOptions::default().with_collect_all());
        let err = collecting.test(&expected, &actual).unwrap_err();
        assert_eq!(rendered(&err), vec![".x: first", ".x[1]: second"]);

        let err = Tester::new().test(&expected, &actual).unwrap_err();
        assert_eq!(err.to_string(), ".x: first");
    }

    #[test]
    fn test_negative_threshold_clamped() {
        let tester = Tester::with_options(TesterOptions::default().with_linear_scan_threshold(-3));
        assert_eq!(tester.options().small_doc_linear_threshold, 0);
        let expected = doc([("a", 1.into())]);
        assert!(tester.test(&expected, &doc([("a", 1.into())])).is_ok());
    }

    #[test]
    fn test_index_buffers_returned() {
        let tester = Tester::with_options(TesterOptions::default().with_linear_scan_threshold(0));
        let expected = doc([("a", 1.into()), ("b", 2.into())]);
        assert!(tester.test(&expected, &doc([("a", 1.into())])).is_err());
        assert!(tester.test(&expected, &doc([("a", 1.into()), ("b", 2.into())])).is_ok());
        assert_eq!(tester.outstanding_buffers(), 0);
        assert_eq!(tester.idle_buffers(), 1);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let tester = Tester::with_options(TesterOptions::default().with_linear_scan_threshold(2));
        let at_threshold = doc([("a", 1.into()), ("b", 2.into())]);
        assert!(tester.test(&at_threshold, &at_threshold).is_ok());
        assert_eq!(tester.idle_buffers(), 0);

        let above = doc([("a", 1.into()), ("b", 2.into()), ("c", 3.into())]);
        assert!(tester.test(&above, &above).is_ok());
        assert_eq!(tester.idle_buffers(), 1);
    }

    #[test]
    fn test_concurrent_comparisons_share_pool() {
        let tester = Tester::with_options(TesterOptions::default().with_linear_scan_threshold(0));
        let expected = doc([("a", 1.into()), ("b", 2.into())]);
        let good = doc([("b", 2.into()), ("a", 1.into()), ("c", 3.into())]);
        let bad = doc([("a", 1.into())]);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..200 {
                        assert!(tester.test(&expected, &good).is_ok());
                        assert!(tester.test(&expected, &bad).is_err());
                    }
                });
            }
        });
        assert_eq!(tester.outstanding_buffers(), 0);
        assert!(tester.idle_buffers() >= 1);
    }

    #[test]
    fn test_duplicate_keys_first_wins_both_strategies() {
        let expected = doc([("k", 1.into())]);
        let actual = doc([("k", 1.into()), ("k", 2.into())]);
        let linear = Tester::new();
        let indexed = Tester::with_options(TesterOptions::default().with_linear_scan_threshold(0));
        assert!(linear.test(&expected, &actual).is_ok());
        assert!(indexed.test(&expected, &actual).is_ok());
    }

    #[test]
    fn test_tester_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tester>();
    }

    fn small_document() -> impl Strategy<Value = Document> {
        prop::collection::vec(("[a-f]", 0i64..4), 0..12).prop_map(|pairs| pairs.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_strategy_does_not_change_result(expected in small_document(), actual in small_document()) {
            let expected = Value::Document(expected);
            let actual = Value::Document(actual);
            let linear = Tester::with_options(
                TesterOptions::default().with_linear_scan_threshold(i64::MAX).with_collect_all(),
            );
            let indexed = Tester::with_options(
                TesterOptions::default().with_linear_scan_threshold(0).with_collect_all(),
            );
            let left = linear.test(&expected, &actual).map_err(|e| rendered(&e));
            let right = indexed.test(&expected, &actual).map_err(|e| rendered(&e));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_document_satisfies_itself(
            entries in prop::collection::btree_map("[a-f]", 0i64..4, 0..6),
        ) {
            let value = Value::Document(entries.into_iter().collect());
            prop_assert!(Tester::new().test(&value, &value).is_ok());
        }
    }
}
