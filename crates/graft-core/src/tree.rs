//! Helpers for walking and growing `serde_json::Value` trees.
//!
//! Two notions of "nothing" show up while walking:
//! - *falsy*: `null`, `false`, `0`, `""` (what the collector drops);
//! - *blank*: falsy scalars, any number or boolean, and empty containers
//!   (what the walkers treat as "no node here").

use serde_json::{Map, Value};

/// True unless the value is `null`, `false`, a zero number or an empty string.
/// Empty arrays and objects are truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// True for values that carry no walkable content: `null`, booleans, numbers,
/// empty strings and empty containers.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Child of a mapping node. Sequences and scalars have no keyed children.
pub fn child<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(key),
        _ => None,
    }
}

/// Slot under `key`, inserted as `null` when missing.
pub fn slot<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Value {
    map.entry(key.to_string()).or_insert(Value::Null)
}

/// Make `slot` a sequence, replacing it unless it already is a non-empty one.
pub fn ensure_array(slot: &mut Value) -> &mut Vec<Value> {
    if !matches!(slot, Value::Array(items) if !items.is_empty()) {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot was just replaced with an array"),
    }
}

/// Make `slot` a mapping, replacing any non-mapping placeholder. Existing
/// mappings (empty or not) are kept.
pub fn ensure_object(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just replaced with an object"),
    }
}

/// Grow `items` to at least `len` slots; blank slots become empty mappings.
pub fn pad_with_objects(items: &mut Vec<Value>, len: usize) {
    for item in items.iter_mut().take(len) {
        if is_blank(item) {
            *item = Value::Object(Map::new());
        }
    }
    while items.len() < len {
        items.push(Value::Object(Map::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_loose_semantics() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn numbers_and_empty_containers_are_blank() {
        assert!(is_blank(&json!(5)));
        assert!(is_blank(&json!(true)));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!("x")));
        assert!(!is_blank(&json!([0])));
        assert!(!is_blank(&json!({"a": null})));
    }

    #[test]
    fn ensure_array_keeps_populated_sequences() {
        let mut populated = json!([1, 2]);
        ensure_array(&mut populated).push(json!(3));
        assert_eq!(populated, json!([1, 2, 3]));

        let mut scalar = json!("x");
        assert!(ensure_array(&mut scalar).is_empty());
    }

    #[test]
    fn pad_replaces_blank_slots_only() {
        let mut items = vec![json!({"a": 1}), json!(null)];
        pad_with_objects(&mut items, 3);
        assert_eq!(items, vec![json!({"a": 1}), json!({}), json!({})]);
    }
}
