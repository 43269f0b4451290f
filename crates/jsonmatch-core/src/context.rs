// SPDX-License-Identifier: MIT OR Apache-2.0
//! Comparison context
//!
//! A [`Context`] lives for one top-level comparison. It holds the current
//! path and decides what happens to a mismatch: in fail-fast mode reporting
//! hands the mismatch back so the caller stops with `?`; in aggregate mode
//! it is appended to the collected list and traversal continues.
//!
//! Path segments are pushed through [`Context::scope`], whose guard pops on
//! drop, so the stack is balanced on every exit path.

use crate::error::{MismatchError, MultiError, TestError, TestResult};
use crate::path::{Path, Segment};
use std::ops::{Deref, DerefMut};

/// Path stack plus mismatch-reporting policy
#[derive(Debug, Clone, Default)]
pub struct Context {
    path: Path,
    collect: bool,
    mismatches: Vec<MismatchError>,
}

impl Context {
    /// A root context
    #[must_use]
    pub fn new(collect: bool) -> Self {
        Self::at(Path::root(), collect)
    }

    /// A context starting at `path`
    #[must_use]
    pub const fn at(path: Path, collect: bool) -> Self {
        Self {
            path,
            collect,
            mismatches: Vec::new(),
        }
    }

    /// A fresh context with the same path and policy and nothing collected
    #[must_use]
    pub fn isolated(&self) -> Self {
        Self::at(self.path.clone(), self.collect)
    }

    /// Current path
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Whether mismatches are aggregated
    #[must_use]
    pub const fn collects(&self) -> bool {
        self.collect
    }

    /// Mismatches collected so far
    #[must_use]
    pub fn collected(&self) -> &[MismatchError] {
        &self.mismatches
    }

    /// Push `segment`; the returned guard pops it when dropped
    pub fn scope(&mut self, segment: impl Into<Segment>) -> Scope<'_> {
        self.path.push(segment);
        Scope { cx: self }
    }

    pub(crate) fn push_segment(&mut self, segment: Segment) {
        self.path.push(segment);
    }

    pub(crate) fn pop_segment(&mut self) {
        self.path.pop();
    }

    /// A mismatch at the current path
    #[must_use]
    pub fn mismatch(&self, message: impl Into<String>) -> MismatchError {
        MismatchError::new(self.path.clone(), message)
    }

    /// Route a mismatch through the reporting policy
    ///
    /// # Errors
    ///
    /// Returns the mismatch when not aggregating.
    pub fn report(&mut self, mismatch: MismatchError) -> TestResult {
        if self.collect {
            self.mismatches.push(mismatch);
            Ok(())
        } else {
            Err(mismatch.into())
        }
    }

    /// Report every mismatch of `err`, stopping at the first in fail-fast mode
    ///
    /// # Errors
    ///
    /// Returns the first mismatch when not aggregating.
    pub fn report_all(&mut self, err: TestError) -> TestResult {
        if self.collect {
            self.mismatches.extend(err.into_mismatches());
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Report `message` at the current path
    ///
    /// # Errors
    ///
    /// Returns the mismatch when not aggregating.
    pub fn report_here(&mut self, message: impl Into<String>) -> TestResult {
        let mismatch = self.mismatch(message);
        self.report(mismatch)
    }

    /// Report `message` one `segment` below the current path
    ///
    /// # Errors
    ///
    /// Returns the mismatch when not aggregating.
    pub fn report_at(&mut self, segment: impl Into<Segment>, message: impl Into<String>) -> TestResult {
        let mismatch = {
            let scope = self.scope(segment);
            scope.mismatch(message)
        };
        self.report(mismatch)
    }

    /// Fold a traversal outcome and the collected list into the final result
    ///
    /// # Errors
    ///
    /// The traversal error if there was one, otherwise every collected
    /// mismatch as a [`MultiError`].
    pub fn finish(self, outcome: TestResult) -> TestResult {
        outcome?;
        MultiError::new(self.mismatches).map_or(Ok(()), |multi| Err(multi.into()))
    }

    /// Drain the collected list
    #[must_use]
    pub fn into_collected(self) -> Vec<MismatchError> {
        self.mismatches
    }
}

/// Guard for a pushed path segment
///
/// Dereferences to the underlying [`Context`]; pops the segment on drop.
#[derive(Debug)]
pub struct Scope<'c> {
    cx: &'c mut Context,
}

impl Deref for Scope<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.cx
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.cx
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.cx.path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_fast_returns_mismatch() {
        let mut cx = Context::new(false);
        let err = cx.report_at("a", "key not found").unwrap_err();
        assert_eq!(err.to_string(), ".a: key not found");
        assert!(cx.path().is_empty());
        assert!(cx.collected().is_empty());
    }

    #[test]
    fn test_collect_appends() {
        let mut cx = Context::new(true);
        cx.report_at("a", "x").unwrap();
        cx.report_at("b", "y").unwrap();
        let err = cx.finish(Ok(())).unwrap_err();
        let rendered: Vec<String> = err.mismatches().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec![".a: x", ".b: y"]);
    }

    #[test]
    fn test_finish_without_mismatches() {
        assert!(Context::new(true).finish(Ok(())).is_ok());
        assert!(Context::new(false).finish(Ok(())).is_ok());
    }

    #[test]
    fn test_scope_pops_on_early_return() {
        fn descend(cx: &mut Context) -> TestResult {
            let mut scope = cx.scope("outer");
            let mut inner = scope.scope(0usize);
            inner.report_here("boom")?;
            Ok(())
        }

        let mut cx = Context::new(false);
        let err = descend(&mut cx).unwrap_err();
        assert_eq!(err.to_string(), ".outer[0]: boom");
        assert!(cx.path().is_empty());
    }

    #[test]
    fn test_isolated_copies_path_only() {
        let mut cx = Context::new(true);
        cx.report_here("root").unwrap();
        let mut scope = cx.scope("k");
        let child = scope.isolated();
        assert_eq!(child.path().to_string(), ".k");
        assert!(child.collects());
        assert!(child.collected().is_empty());
        scope.report_here("inside").unwrap();
        drop(scope);
        assert_eq!(cx.collected().len(), 2);
    }
}
