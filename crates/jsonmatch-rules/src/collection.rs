// SPDX-License-Identifier: MIT OR Apache-2.0
//! Collection directives: unordered matching, length bounds, membership

use crate::error::RuleError;
use jsonmatch_core::{Rule, RuleContext, TestResult, Value};

/// Order-insensitive one-to-one matching of array elements
///
/// Each expected element, in order, claims the first unclaimed actual
/// element it matches. Matching is greedy: an expected element never gives
/// up its claim for a later one.
#[derive(Debug)]
pub struct ElementsMatch {
    expected: Vec<Value>,
}

impl ElementsMatch {
    /// Match against `expected` in any order
    #[must_use]
    pub const fn new(expected: Vec<Value>) -> Self {
        Self { expected }
    }
}

impl Rule for ElementsMatch {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        let Value::Array(items) = actual else {
            return Err(rc.fail(format!(
                "$elementsMatch expects array, got {}",
                actual.kind()
            )));
        };
        if items.len() != self.expected.len() {
            return Err(rc.fail(format!(
                "$elementsMatch length mismatch: expected {} elements, got {}",
                self.expected.len(),
                items.len()
            )));
        }
        let mut claimed = vec![false; items.len()];
        for want in &self.expected {
            let found = items
                .iter()
                .zip(claimed.iter_mut())
                .find(|(item, taken)| !**taken && rc.test(want, item).is_ok());
            match found {
                Some((_, taken)) => *taken = true,
                None => {
                    return Err(rc.fail(format!(
                        "$elementsMatch could not find match for expected element {want}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Bounds on a length; every bound present must hold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthBounds {
    /// Exactly this length; excludes every other bound
    pub eq: Option<usize>,
    /// Strictly shorter than
    pub lt: Option<usize>,
    /// At most
    pub lte: Option<usize>,
    /// Strictly longer than
    pub gt: Option<usize>,
    /// At least
    pub gte: Option<usize>,
}

impl LengthBounds {
    /// Exactly `n`
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self {
            eq: Some(n),
            lt: None,
            lte: None,
            gt: None,
            gte: None,
        }
    }

    const fn has_relational(&self) -> bool {
        self.lt.is_some() || self.lte.is_some() || self.gt.is_some() || self.gte.is_some()
    }

    /// Reject an empty or contradictory set of bounds
    ///
    /// # Errors
    ///
    /// [`RuleError::NoLengthBound`] or [`RuleError::ExactWithRelational`].
    pub const fn validate(&self) -> Result<(), RuleError> {
        match (self.eq.is_some(), self.has_relational()) {
            (false, false) => Err(RuleError::NoLengthBound),
            (true, true) => Err(RuleError::ExactWithRelational),
            _ => Ok(()),
        }
    }

    fn checks(&self) -> [(&'static str, &'static str, Option<usize>, fn(usize, usize) -> bool); 5] {
        [
            ("eq", "==", self.eq, |len, n| len == n),
            ("lt", "<", self.lt, |len, n| len < n),
            ("lte", "<=", self.lte, |len, n| len <= n),
            ("gt", ">", self.gt, |len, n| len > n),
            ("gte", ">=", self.gte, |len, n| len >= n),
        ]
    }
}

/// Length of an array or document within bounds
#[derive(Debug, Clone, Copy)]
pub struct Length {
    bounds: LengthBounds,
}

impl Length {
    /// Build from validated bounds
    ///
    /// # Errors
    ///
    /// See [`LengthBounds::validate`].
    pub fn new(bounds: LengthBounds) -> Result<Self, RuleError> {
        bounds.validate()?;
        Ok(Self { bounds })
    }

    /// Exactly `n` elements
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self {
            bounds: LengthBounds::exactly(n),
        }
    }

    /// The bounds in effect
    #[must_use]
    pub const fn bounds(&self) -> LengthBounds {
        self.bounds
    }
}

impl Rule for Length {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        let Some(len) = actual.list_len() else {
            return Err(rc.fail(format!(
                "$length expects array or document, got {}",
                actual.kind()
            )));
        };
        for (name, op, bound, holds) in self.bounds.checks() {
            if let Some(n) = bound
                && !holds(len, n)
            {
                rc.add(format!("$length {name} failed: got {len}, expected {op} {n}"))?;
            }
        }
        Ok(())
    }
}

/// The value must match at least one candidate
#[derive(Debug)]
pub struct InSet {
    candidates: Vec<Value>,
}

impl InSet {
    /// Accept anything matching one of `candidates`
    ///
    /// # Errors
    ///
    /// [`RuleError::EmptyOperands`] when `candidates` is empty.
    pub fn new(candidates: Vec<Value>) -> Result<Self, RuleError> {
        if candidates.is_empty() {
            return Err(RuleError::EmptyOperands("$in"));
        }
        Ok(Self { candidates })
    }
}

impl Rule for InSet {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        if self
            .candidates
            .iter()
            .any(|candidate| rc.test(candidate, actual).is_ok())
        {
            return Ok(());
        }
        let listed: Vec<String> = self.candidates.iter().map(ToString::to_string).collect();
        Err(rc.fail(format!(
            "$in failed: value {actual} not in [{}]",
            listed.join(", ")
        )))
    }
}
