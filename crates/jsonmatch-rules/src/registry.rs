// SPDX-License-Identifier: MIT OR Apache-2.0
//! Directive registry and JSON decoding
//!
//! A [`Registry`] maps directive tokens such as `$regex` to constructors.
//! Decoding walks a JSON tree and turns every object of the form
//! `{"<token>": payload}` with a registered token into a rule node; all
//! other objects become documents in source order.

use crate::builtin;
use crate::error::{DecodeError, RuleError};
use ahash::AHashMap;
use jsonmatch_core::{Document, Number, Path, Value};
use std::fmt;
use tracing::{debug, trace};

/// Builds a rule node from a directive payload
///
/// The registry is passed along so payloads holding expected values can be
/// decoded with the same directive set.
pub type Constructor = fn(&serde_json::Value, &Registry) -> Result<Value, RuleError>;

/// Directive token table
#[derive(Clone, Default)]
pub struct Registry {
    constructors: AHashMap<String, Constructor>,
}

impl Registry {
    /// A registry with no directives
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every builtin directive
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &(token, constructor) in builtin::CONSTRUCTORS {
            registry.register(token, constructor);
        }
        registry
    }

    /// Add or replace `token`, returning the constructor it replaced
    pub fn register(&mut self, token: impl Into<String>, constructor: Constructor) -> Option<Constructor> {
        let token = token.into();
        trace!(%token, "registering directive");
        self.constructors.insert(token, constructor)
    }

    /// Remove `token`
    pub fn unregister(&mut self, token: &str) -> Option<Constructor> {
        self.constructors.remove(token)
    }

    /// Whether `token` is registered
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.constructors.contains_key(token)
    }

    /// Registered tokens, sorted
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    /// Parse `text` as JSON and decode it
    ///
    /// # Errors
    ///
    /// [`DecodeError::Json`] for malformed text, otherwise see
    /// [`Registry::decode`].
    pub fn decode_str(&self, text: &str) -> Result<Value, DecodeError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        self.decode(&json)
    }

    /// Decode a JSON tree into an expected tree
    ///
    /// # Errors
    ///
    /// [`DecodeError::Directive`] naming the first directive whose payload
    /// was rejected and where it sits.
    pub fn decode(&self, json: &serde_json::Value) -> Result<Value, DecodeError> {
        let mut path = Path::root();
        self.decode_at(json, &mut path)
    }

    /// Decode a value nested inside a directive payload
    ///
    /// # Errors
    ///
    /// [`RuleError::Nested`] wrapping the decode failure.
    pub fn decode_operand(&self, json: &serde_json::Value) -> Result<Value, RuleError> {
        self.decode(json).map_err(|err| RuleError::Nested(Box::new(err)))
    }

    /// Decode each element of a payload array
    ///
    /// # Errors
    ///
    /// [`RuleError::Nested`] for the first element that fails, with the
    /// element index in its path.
    pub fn decode_operands(&self, items: &[serde_json::Value]) -> Result<Vec<Value>, RuleError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.decode(item).map_err(|err| {
                    let at: Path = std::iter::once(i).collect();
                    RuleError::Nested(Box::new(err.within(&at)))
                })
            })
            .collect()
    }

    fn decode_at(&self, json: &serde_json::Value, path: &mut Path) -> Result<Value, DecodeError> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => Ok(Number::from(n).into()),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    path.push(i);
                    let decoded = self.decode_at(item, path);
                    path.pop();
                    out.push(decoded?);
                }
                Ok(Value::Array(out))
            }
            serde_json::Value::Object(map) => {
                if let Some((token, constructor, payload)) = self.directive(map) {
                    let here: &Path = path;
                    return constructor(payload, self).map_err(|source| {
                        debug!(%token, path = %here, error = %source, "directive rejected");
                        match source {
                            RuleError::Nested(inner) => (*inner).within(here),
                            source => DecodeError::Directive {
                                token: token.to_owned(),
                                path: here.clone(),
                                source,
                            },
                        }
                    });
                }
                let mut doc = Document::new();
                for (key, value) in map {
                    path.push(key.as_str());
                    let decoded = self.decode_at(value, path);
                    path.pop();
                    doc.push(key.clone(), decoded?);
                }
                Ok(Value::Document(doc))
            }
        }
    }

    fn directive<'j>(
        &self,
        map: &'j serde_json::Map<String, serde_json::Value>,
    ) -> Option<(&'j str, Constructor, &'j serde_json::Value)> {
        if map.len() != 1 {
            return None;
        }
        let (token, payload) = map.iter().next()?;
        let constructor = *self.constructors.get(token.as_str())?;
        Some((token.as_str(), constructor, payload))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("tokens", &self.tokens())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_tokens() {
        let registry = Registry::builtin();
        assert_eq!(registry.tokens().len(), 19);
        for token in ["$eq", "$ne", "$nil", "$notNil", "$length", "$nor", "$not"] {
            assert!(registry.contains(token), "{token} missing");
        }
    }

    #[test]
    fn test_plain_json_decodes_to_document() {
        let value = Registry::new()
            .decode(&json!({"b": 1, "a": [true, null, "x", 1.5]}))
            .unwrap();
        assert_eq!(value.to_string(), r#"{"b": 1, "a": [true, null, "x", 1.5]}"#);
    }

    #[test]
    fn test_directive_object_becomes_rule() {
        let value = Registry::builtin().decode(&json!({"$any": null})).unwrap();
        assert!(matches!(value, Value::Rule(_)));
    }

    #[test]
    fn test_unregistered_or_multi_key_objects_stay_documents() {
        let registry = Registry::builtin();
        let value = registry.decode(&json!({"$unknown": 1})).unwrap();
        assert!(matches!(value, Value::Document(_)));
        let value = registry.decode(&json!({"$any": 1, "other": 2})).unwrap();
        assert!(matches!(value, Value::Document(_)));
    }

    #[test]
    fn test_error_carries_token_and_path() {
        let err = Registry::builtin()
            .decode(&json!({"user": {"tags": [1, {"$required": false}]}}))
            .unwrap_err();
        assert_eq!(err.token(), Some("$required"));
        assert_eq!(
            err.to_string(),
            ".user.tags[1]: $required: required directive must be true"
        );
    }

    #[test]
    fn test_nested_operand_error_is_rerooted() {
        let err = Registry::builtin()
            .decode(&json!({"a": {"$and": [{"$regex": "^ok$"}, {"$regex": "("}]}}))
            .unwrap_err();
        assert_eq!(err.token(), Some("$regex"));
        assert!(err.to_string().starts_with(".a[1]: $regex: invalid pattern"));
    }

    #[test]
    fn test_register_replaces() {
        fn always_any(_: &serde_json::Value, _: &Registry) -> Result<Value, RuleError> {
            Ok(Value::rule(crate::Any))
        }

        let mut registry = Registry::builtin();
        assert!(registry.register("$eq", always_any).is_some());
        assert!(registry.register("$custom", always_any).is_none());
        assert!(registry.contains("$custom"));
        assert!(registry.unregister("$custom").is_some());
    }

    #[test]
    fn test_decode_str_rejects_bad_json() {
        assert!(matches!(
            Registry::builtin().decode_str("{"),
            Err(DecodeError::Json(_))
        ));
    }
}
