// SPDX-License-Identifier: MIT OR Apache-2.0
//! Logical combinators
//!
//! Operands are arbitrary expected values: literals compare with ordinary
//! matcher semantics and nested directives apply. Each operand is evaluated
//! in an isolated context, so an operand that fails leaves no trace unless
//! the combinator decides to surface it.

use crate::error::RuleError;
use jsonmatch_core::{Rule, RuleContext, TestResult, Value};

/// Every operand must match
#[derive(Debug)]
pub struct And {
    operands: Vec<Value>,
}

impl And {
    /// Require every one of `operands`
    ///
    /// # Errors
    ///
    /// [`RuleError::EmptyOperands`] when `operands` is empty.
    pub fn new(operands: Vec<Value>) -> Result<Self, RuleError> {
        non_empty("$and", operands).map(|operands| Self { operands })
    }
}

impl Rule for And {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        for operand in &self.operands {
            if let Err(err) = rc.test(operand, actual) {
                rc.report(err)?;
            }
        }
        Ok(())
    }
}

/// At least one operand must match
///
/// When every operand fails, aggregate mode surfaces all of their
/// mismatches; fail-fast mode reports the first.
#[derive(Debug)]
pub struct Or {
    operands: Vec<Value>,
}

impl Or {
    /// Require any one of `operands`
    ///
    /// # Errors
    ///
    /// [`RuleError::EmptyOperands`] when `operands` is empty.
    pub fn new(operands: Vec<Value>) -> Result<Self, RuleError> {
        non_empty("$or", operands).map(|operands| Self { operands })
    }
}

impl Rule for Or {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        let mut failures = Vec::with_capacity(self.operands.len());
        for operand in &self.operands {
            match rc.test(operand, actual) {
                Ok(()) => return Ok(()),
                Err(err) => failures.push(err),
            }
        }
        let Some(first) = failures.first() else {
            return Err(rc.fail("$or failed: no alternatives provided"));
        };
        if !rc.collects() {
            return Err(rc.fail(format!(
                "$or failed: value did not satisfy any alternative; first error: {first}"
            )));
        }
        for err in failures {
            rc.report(err)?;
        }
        Ok(())
    }
}

/// No operand may match
#[derive(Debug)]
pub struct Nor {
    operands: Vec<Value>,
}

impl Nor {
    /// Forbid every one of `operands`
    ///
    /// # Errors
    ///
    /// [`RuleError::EmptyOperands`] when `operands` is empty.
    pub fn new(operands: Vec<Value>) -> Result<Self, RuleError> {
        non_empty("$nor", operands).map(|operands| Self { operands })
    }
}

impl Rule for Nor {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        for (i, operand) in self.operands.iter().enumerate() {
            if rc.test(operand, actual).is_ok() {
                rc.add(format!("$nor failed: alternative {i} matched"))?;
            }
        }
        Ok(())
    }
}

/// Inverts one operand
#[derive(Debug)]
pub struct Not {
    operand: Value,
}

impl Not {
    /// Negate `operand`
    #[must_use]
    pub const fn new(operand: Value) -> Self {
        Self { operand }
    }
}

impl Rule for Not {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        if rc.test(&self.operand, actual).is_ok() {
            return Err(rc.fail("$not failed: value matched negated condition"));
        }
        Ok(())
    }
}

fn non_empty(directive: &'static str, operands: Vec<Value>) -> Result<Vec<Value>, RuleError> {
    if operands.is_empty() {
        Err(RuleError::EmptyOperands(directive))
    } else {
        Ok(operands)
    }
}
