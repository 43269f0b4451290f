// SPDX-License-Identifier: MIT OR Apache-2.0
//! Construction and decoding errors
//!
//! These are raised while the expected tree is being built, before any
//! comparison runs. Comparison failures are `TestError`s instead.

use jsonmatch_core::Path;
use thiserror::Error;

/// A directive could not be constructed from its payload
#[derive(Debug, Error)]
pub enum RuleError {
    /// The `$regex` pattern does not compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// `$required` was given `false`
    #[error("required directive must be true")]
    RequiredFalse,

    /// A length bound below zero
    #[error("length must be non-negative")]
    NegativeLength,

    /// A length bound with a fractional part
    #[error("length value must be integer")]
    FractionalLength,

    /// `$length` without any bound
    #[error("no length comparator provided")]
    NoLengthBound,

    /// `eq` together with `lt`, `lte`, `gt` or `gte`
    #[error("eq cannot be combined with other length comparators")]
    ExactWithRelational,

    /// A `$length` object key other than `eq`, `lt`, `lte`, `gt`, `gte`
    #[error("unknown length comparator {0:?}")]
    UnknownLengthBound(String),

    /// `$in`, `$and`, `$or` or `$nor` with no operands
    #[error("{0} directive requires non-empty array")]
    EmptyOperands(&'static str),

    /// The payload has the wrong JSON type
    #[error("expected {expected} payload, got {found}")]
    Payload {
        /// What the directive accepts
        expected: &'static str,
        /// What it was given
        found: &'static str,
    },

    /// A numeric bound whose reference is not a number
    #[error("expected numeric value, got {0}")]
    NotNumeric(&'static str),

    /// An operand nested in the payload failed to decode
    #[error(transparent)]
    Nested(#[from] Box<DecodeError>),
}

/// Failure to turn JSON into an expected tree
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A directive rejected its payload
    #[error("{}{token}: {source}", location(.path))]
    Directive {
        /// The directive token, e.g. `$length`
        token: String,
        /// Where the directive sits in the expected tree
        path: Path,
        /// Why construction failed
        source: RuleError,
    },
}

impl DecodeError {
    /// Re-root the error under `prefix`
    #[must_use]
    pub fn within(self, prefix: &Path) -> Self {
        match self {
            Self::Directive {
                token,
                path,
                source,
            } => Self::Directive {
                token,
                path: prefix.join(&path),
                source,
            },
            json @ Self::Json(_) => json,
        }
    }

    /// The directive token, if a directive failed
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Directive { token, .. } => Some(token),
            Self::Json(_) => None,
        }
    }
}

fn location(path: &Path) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("{path}: ")
    }
}

/// JSON type name used in payload errors
pub(crate) const fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
