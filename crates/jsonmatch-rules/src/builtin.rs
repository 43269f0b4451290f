// SPDX-License-Identifier: MIT OR Apache-2.0
//! Payload decoders for the builtin directives

use crate::collection::{ElementsMatch, InSet, Length, LengthBounds};
use crate::equal::{Equal, NotEqual};
use crate::error::{RuleError, json_kind};
use crate::logic::{And, Nor, Not, Or};
use crate::numeric::NumericBound;
use crate::pattern::MatchString;
use crate::presence::{Any, Empty, Nil, Required};
use crate::registry::{Constructor, Registry};
use jsonmatch_core::{Number, Value};
use serde_json::Value as Json;

/// Every builtin token and its constructor
pub const CONSTRUCTORS: &[(&str, Constructor)] = &[
    ("$eq", equal),
    ("$ne", not_equal),
    ("$nil", nil),
    ("$notNil", not_nil),
    ("$required", required),
    ("$any", any),
    ("$regex", regex),
    ("$elementsMatch", elements_match),
    ("$length", length),
    ("$empty", empty),
    ("$lt", lt),
    ("$lte", lte),
    ("$gt", gt),
    ("$gte", gte),
    ("$in", in_set),
    ("$and", and),
    ("$or", or),
    ("$nor", nor),
    ("$not", not),
];

fn equal(payload: &Json, registry: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(Equal::new(registry.decode_operand(payload)?)))
}

fn not_equal(payload: &Json, registry: &Registry) -> Result<Value, RuleError> {
    let forbidden = registry.decode_operand(payload)?;
    // Directives never compare equal to data, so `$ne` would always pass.
    if contains_rule(&forbidden) {
        return Err(RuleError::Payload {
            expected: "literal",
            found: "directive",
        });
    }
    Ok(Value::rule(NotEqual::new(forbidden)))
}

fn nil(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(Nil::is_nil(boolean(payload)?)))
}

fn not_nil(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(Nil::not_nil(boolean(payload)?)))
}

fn required(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    if boolean(payload)? {
        Ok(Value::rule(Required))
    } else {
        Err(RuleError::RequiredFalse)
    }
}

fn any(_: &Json, _: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(Any))
}

fn regex(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    let pattern = payload.as_str().ok_or_else(|| mistyped("string", payload))?;
    Ok(Value::rule(MatchString::new(pattern)?))
}

fn elements_match(payload: &Json, registry: &Registry) -> Result<Value, RuleError> {
    let items = registry.decode_operands(array(payload)?)?;
    Ok(Value::rule(ElementsMatch::new(items)))
}

fn length(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    let bounds = match payload {
        Json::Number(_) => LengthBounds::exactly(length_bound(payload)?),
        Json::Object(map) => {
            let mut bounds = LengthBounds::default();
            for (name, bound) in map {
                let slot = match name.as_str() {
                    "eq" => &mut bounds.eq,
                    "lt" => &mut bounds.lt,
                    "lte" => &mut bounds.lte,
                    "gt" => &mut bounds.gt,
                    "gte" => &mut bounds.gte,
                    other => return Err(RuleError::UnknownLengthBound(other.to_owned())),
                };
                *slot = Some(length_bound(bound)?);
            }
            bounds
        }
        other => return Err(mistyped("number or object", other)),
    };
    Ok(Value::rule(Length::new(bounds)?))
}

fn empty(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(Empty::new(boolean(payload)?)))
}

fn lt(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(NumericBound::lt(number(payload)?)))
}

fn lte(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(NumericBound::lte(number(payload)?)))
}

fn gt(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(NumericBound::gt(number(payload)?)))
}

fn gte(payload: &Json, _: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(NumericBound::gte(number(payload)?)))
}

fn in_set(payload: &Json, registry: &Registry) -> Result<Value, RuleError> {
    let candidates = registry.decode_operands(array(payload)?)?;
    Ok(Value::rule(InSet::new(candidates)?))
}

fn and(payload: &Json, registry: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(And::new(registry.decode_operands(array(payload)?)?)?))
}

fn or(payload: &Json, registry: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(Or::new(registry.decode_operands(array(payload)?)?)?))
}

fn nor(payload: &Json, registry: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(Nor::new(registry.decode_operands(array(payload)?)?)?))
}

fn not(payload: &Json, registry: &Registry) -> Result<Value, RuleError> {
    Ok(Value::rule(Not::new(registry.decode_operand(payload)?)))
}

fn contains_rule(value: &Value) -> bool {
    match value {
        Value::Rule(_) => true,
        Value::Array(items) => items.iter().any(contains_rule),
        Value::Document(doc) => doc.iter().any(|entry| contains_rule(&entry.value)),
        _ => false,
    }
}

fn mistyped(expected: &'static str, found: &Json) -> RuleError {
    RuleError::Payload {
        expected,
        found: json_kind(found),
    }
}

fn boolean(payload: &Json) -> Result<bool, RuleError> {
    payload.as_bool().ok_or_else(|| mistyped("boolean", payload))
}

fn array(payload: &Json) -> Result<&[Json], RuleError> {
    payload
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| mistyped("array", payload))
}

fn number(payload: &Json) -> Result<Number, RuleError> {
    match payload {
        Json::Number(n) => Ok(Number::from(n)),
        other => Err(RuleError::NotNumeric(json_kind(other))),
    }
}

/// A non-negative integral length; `2.0` is accepted, `2.5` and `-1` are not
fn length_bound(payload: &Json) -> Result<usize, RuleError> {
    let Json::Number(n) = payload else {
        return Err(mistyped("number", payload));
    };
    if let Some(u) = n.as_u64() {
        return usize::try_from(u).map_err(|_| mistyped("length within range", payload));
    }
    if n.as_i64().is_some() {
        return Err(RuleError::NegativeLength);
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() != 0.0 || !f.is_finite() {
        return Err(RuleError::FractionalLength);
    }
    if f < 0.0 {
        return Err(RuleError::NegativeLength);
    }
    if f > f64::from(u32::MAX) {
        return Err(mistyped("length within range", payload));
    }
    #[allow(clippy::cast_possible_truncation)]
    let len = f as usize;
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(payload: Json, constructor: Constructor) -> Result<Value, RuleError> {
        constructor(&payload, &Registry::builtin())
    }

    #[test]
    fn test_not_equal_rejects_directive_payload() {
        assert!(build(json!(5), not_equal).is_ok());
        assert!(build(json!({"a": [1, "x"]}), not_equal).is_ok());
        for payload in [json!({"$gt": 5}), json!({"a": [{"$any": null}]})] {
            let err = build(payload, not_equal).unwrap_err();
            assert_eq!(err.to_string(), "expected literal payload, got directive");
        }
    }

    #[test]
    fn test_required_false_rejected() {
        assert!(matches!(build(json!(false), required), Err(RuleError::RequiredFalse)));
        assert!(build(json!(true), required).is_ok());
    }

    #[test]
    fn test_length_payloads() {
        assert!(build(json!(3), length).is_ok());
        assert!(build(json!(3.0), length).is_ok());
        assert!(build(json!({"gte": 1, "lte": 3}), length).is_ok());
        assert!(matches!(build(json!(-1), length), Err(RuleError::NegativeLength)));
        assert!(matches!(build(json!(-1.0), length), Err(RuleError::NegativeLength)));
        assert!(matches!(build(json!(2.5), length), Err(RuleError::FractionalLength)));
        assert!(matches!(build(json!({}), length), Err(RuleError::NoLengthBound)));
        assert!(matches!(
            build(json!({"eq": 1, "lt": 4}), length),
            Err(RuleError::ExactWithRelational)
        ));
        assert!(matches!(
            build(json!({"gt": -2}), length),
            Err(RuleError::NegativeLength)
        ));
        assert!(matches!(
            build(json!({"between": 2}), length),
            Err(RuleError::UnknownLengthBound(_))
        ));
        assert!(matches!(
            build(json!("3"), length),
            Err(RuleError::Payload { found: "string", .. })
        ));
    }

    #[test]
    fn test_empty_operand_lists_rejected() {
        for constructor in [in_set as Constructor, and, or, nor] {
            assert!(matches!(
                build(json!([]), constructor),
                Err(RuleError::EmptyOperands(_))
            ));
        }
    }

    #[test]
    fn test_numeric_reference_must_be_number() {
        assert!(matches!(build(json!("5"), lt), Err(RuleError::NotNumeric("string"))));
        assert!(build(json!(5.5), gte).is_ok());
    }

    #[test]
    fn test_payload_type_errors() {
        assert_eq!(
            build(json!(1), nil).unwrap_err().to_string(),
            "expected boolean payload, got number"
        );
        assert_eq!(
            build(json!({"a": 1}), and).unwrap_err().to_string(),
            "expected array payload, got object"
        );
        assert!(matches!(build(json!(7), regex), Err(RuleError::Payload { .. })));
        assert!(matches!(build(json!("["), regex), Err(RuleError::Pattern(_))));
    }
}
