//! Shape validation of loosely-typed DN input
//!
//! Callers that hold a DN as JSON (or anything that converts to
//! `serde_json::Value`) hand it over as nested arrays of
//! `[type, value, flags]` triples. The whole structure is checked and
//! converted up front, so the builder only ever sees a typed [`Dn`].

use crate::constants::AvaFlags;
use crate::error::DnError;
use crate::types::{Ava, Dn, Rdn};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde_json::Value;

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert `[[[type, value, flags], ...], ...]` into a [`Dn`]
///
/// Triples may carry extra trailing elements, which are ignored. The first
/// element that does not fit fails the whole conversion.
pub fn dn_from_value(value: &Value) -> Result<Dn, DnError> {
    let rdns = value
        .as_array()
        .ok_or_else(|| DnError::type_mismatch(format!("{} at top level", kind(value))))?;

    let rdns = rdns
        .iter()
        .enumerate()
        .map(|(i, rdn)| rdn_from_value(rdn, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dn::new(rdns))
}

fn rdn_from_value(value: &Value, i: usize) -> Result<Rdn, DnError> {
    let avas = value
        .as_array()
        .ok_or_else(|| DnError::type_mismatch(format!("{} at [{}]", kind(value), i)))?;

    if avas.is_empty() {
        return Err(DnError::type_mismatch(format!("empty array at [{}]", i)));
    }

    let avas = avas
        .iter()
        .enumerate()
        .map(|(j, ava)| ava_from_value(ava, i, j))
        .collect::<Result<Vec<_>, _>>()?;

    Rdn::new(avas)
}

fn ava_from_value(value: &Value, i: usize, j: usize) -> Result<Ava, DnError> {
    let items = match value.as_array() {
        Some(items) if items.len() >= 3 => items,
        Some(items) => {
            return Err(DnError::type_mismatch(format!(
                "array of length {} at [{}][{}]",
                items.len(),
                i,
                j
            )))
        }
        None => {
            return Err(DnError::type_mismatch(format!(
                "{} at [{}][{}]",
                kind(value),
                i,
                j
            )))
        }
    };

    let field = |k: usize, expected: &str| {
        DnError::type_mismatch(format!(
            "{} instead of {} at [{}][{}][{}]",
            kind(&items[k]),
            expected,
            i,
            j,
            k
        ))
    };

    let attr_type = items[0].as_str().ok_or_else(|| field(0, "string"))?;
    let attr_value = items[1].as_str().ok_or_else(|| field(1, "string"))?;
    let flags = items[2]
        .as_u64()
        .and_then(|f| u32::try_from(f).ok())
        .ok_or_else(|| field(2, "integer"))?;

    Ok(Ava::with_flags(
        String::from(attr_type),
        String::from(attr_value),
        AvaFlags::new(flags),
    ))
}

/// Nested-triple form of a DN, as accepted by [`dn_from_value`]
pub fn dn_to_value(dn: &Dn) -> Value {
    Value::Array(
        dn.iter()
            .map(|rdn| {
                Value::Array(
                    rdn.iter()
                        .map(|ava| {
                            Value::Array(alloc::vec![
                                Value::String(ava.attr_type.clone()),
                                Value::String(ava.value.clone()),
                                Value::from(ava.flags.public().as_u32()),
                            ])
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}

impl TryFrom<&Value> for Dn {
    type Error = DnError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        dn_from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXPECTED_SHAPE;
    use serde_json::json;

    #[test]
    fn test_accepts_triples() {
        let dn = dn_from_value(&json!([[["a", "b", 1], ["c", "d", 1]], [["e", "f", 1]]])).unwrap();
        assert_eq!(dn.len(), 2);
        assert_eq!(dn.rdns()[0].len(), 2);
    }

    #[test]
    fn test_extra_elements_ignored() {
        let dn = dn_from_value(&json!([[["a", "b", 1, "extra", null]]])).unwrap();
        assert_eq!(dn.rdns()[0].first().value, "b");
    }

    #[test]
    fn test_not_a_sequence() {
        let err = dn_from_value(&json!("not-a-sequence")).unwrap_err();
        match err {
            DnError::TypeMismatch { expected, found } => {
                assert_eq!(expected, EXPECTED_SHAPE);
                assert_eq!(found, "string at top level");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_flags() {
        let err = dn_from_value(&json!([[["a", "b"]]])).unwrap_err();
        assert!(matches!(err, DnError::TypeMismatch { .. }));
    }

    #[test]
    fn test_wrong_element_kinds() {
        assert!(dn_from_value(&json!([[[1, "b", 1]]])).is_err());
        assert!(dn_from_value(&json!([[["a", "b", "1"]]])).is_err());
        assert!(dn_from_value(&json!([[["a", "b", -1]]])).is_err());
        assert!(dn_from_value(&json!([["a"]])).is_err());
        assert!(dn_from_value(&json!([[]])).is_err());
        assert!(dn_from_value(&json!({"rdns": []})).is_err());
    }

    #[test]
    fn test_first_bad_triple_fails_everything() {
        // a malformed triple in a later RDN rejects the whole structure
        let err = dn_from_value(&json!([[["a", "b", 1]], [["c", "d", 1], ["e"]]])).unwrap_err();
        match err {
            DnError::TypeMismatch { found, .. } => assert_eq!(found, "array of length 1 at [1][1]"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_value_round_trip() {
        let value = json!([[["cn", "John", 1]], [["dc", "com", 1]]]);
        let dn = Dn::try_from(&value).unwrap();
        assert_eq!(dn_to_value(&dn), value);
    }
}
