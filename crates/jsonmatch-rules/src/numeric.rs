// SPDX-License-Identifier: MIT OR Apache-2.0
//! Numeric bounds

use jsonmatch_core::{Number, Rule, RuleContext, TestResult, Value};
use std::cmp::Ordering;

/// Which side of the reference the value must fall on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Below the reference
    Below,
    /// Above the reference
    Above,
}

/// `$lt`, `$lte`, `$gt` and `$gte`
///
/// Integers compare exactly against integer references; anything involving a
/// float compares as `f64`. NaN satisfies no bound.
#[derive(Debug, Clone, Copy)]
pub struct NumericBound {
    reference: Number,
    direction: Direction,
    inclusive: bool,
}

impl NumericBound {
    /// A bound on either side of `reference`, optionally inclusive
    #[must_use]
    pub fn new(reference: impl Into<Number>, direction: Direction, inclusive: bool) -> Self {
        Self {
            reference: reference.into(),
            direction,
            inclusive,
        }
    }

    /// `< reference`
    #[must_use]
    pub fn lt(reference: impl Into<Number>) -> Self {
        Self::new(reference, Direction::Below, false)
    }

    /// `<= reference`
    #[must_use]
    pub fn lte(reference: impl Into<Number>) -> Self {
        Self::new(reference, Direction::Below, true)
    }

    /// `> reference`
    #[must_use]
    pub fn gt(reference: impl Into<Number>) -> Self {
        Self::new(reference, Direction::Above, false)
    }

    /// `>= reference`
    #[must_use]
    pub fn gte(reference: impl Into<Number>) -> Self {
        Self::new(reference, Direction::Above, true)
    }

    /// The directive token for this bound
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match (self.direction, self.inclusive) {
            (Direction::Below, false) => "$lt",
            (Direction::Below, true) => "$lte",
            (Direction::Above, false) => "$gt",
            (Direction::Above, true) => "$gte",
        }
    }

    const fn operator(&self) -> &'static str {
        match (self.direction, self.inclusive) {
            (Direction::Below, false) => "<",
            (Direction::Below, true) => "<=",
            (Direction::Above, false) => ">",
            (Direction::Above, true) => ">=",
        }
    }

    fn admits(&self, value: Number) -> bool {
        match (value.compare(self.reference), self.direction) {
            (Some(Ordering::Less), Direction::Below) | (Some(Ordering::Greater), Direction::Above) => true,
            (Some(Ordering::Equal), _) => self.inclusive,
            _ => false,
        }
    }
}

impl Rule for NumericBound {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        let Some(value) = actual.as_number() else {
            return Err(rc.fail(format!(
                "{} expects numeric value, got {}",
                self.token(),
                actual.kind()
            )));
        };
        if self.admits(value) {
            return Ok(());
        }
        Err(rc.fail(format!(
            "{} failed: got {value}, expected {} {}",
            self.token(),
            self.operator(),
            self.reference
        )))
    }
}
