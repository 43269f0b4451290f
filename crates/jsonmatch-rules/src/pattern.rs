// SPDX-License-Identifier: MIT OR Apache-2.0
//! Regular expression matching

use crate::error::RuleError;
use jsonmatch_core::{Rule, RuleContext, TestResult, Value};
use regex::Regex;

/// The value must be a string matching a compiled pattern
///
/// The pattern is unanchored; use `^` and `$` to match the whole string.
#[derive(Debug, Clone)]
pub struct MatchString {
    re: Regex,
}

impl MatchString {
    /// Compile `pattern`
    ///
    /// # Errors
    ///
    /// [`RuleError::Pattern`] if the pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        Ok(Self {
            re: Regex::new(pattern)?,
        })
    }

    /// The source pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.re.as_str()
    }
}

impl From<Regex> for MatchString {
    fn from(re: Regex) -> Self {
        Self { re }
    }
}

impl Rule for MatchString {
    fn test(&self, rc: &mut RuleContext<'_>, actual: &Value) -> TestResult {
        let Some(s) = actual.as_str() else {
            return Err(rc.fail(format!("$regex expects string, got {}", actual.kind())));
        };
        if self.re.is_match(s) {
            Ok(())
        } else {
            Err(rc.fail(format!(
                "string {s:?} does not match pattern {:?}",
                self.pattern()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{messages, run};

    #[test]
    fn test_matches() {
        let rule = MatchString::new(r"^\d{3}-\d{4}$").unwrap();
        assert!(run(rule, &Value::from("555-1234"), false).is_ok());
    }

    #[test]
    fn test_no_match_message() {
        let rule = MatchString::new("^a+$").unwrap();
        assert_eq!(
            messages(run(rule, &Value::from("abc"), false)),
            vec![r#"string "abc" does not match pattern "^a+$""#]
        );
    }

    #[test]
    fn test_non_string() {
        let rule = MatchString::new(".*").unwrap();
        assert_eq!(
            messages(run(rule, &Value::Int(1), false)),
            vec!["$regex expects string, got int"]
        );
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(MatchString::new("("), Err(RuleError::Pattern(_))));
    }
}
