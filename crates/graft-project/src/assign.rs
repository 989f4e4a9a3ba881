//! Value assigner: walk the destination prefix through the output and the
//! source in lockstep, then write (or clear) the leaf value.

use graft_core::tree::{child, ensure_array, ensure_object, slot};
use serde_json::{Map, Value};

/// Write `value` under `leaf` at every location `prefix` reaches; `None`
/// removes `leaf` there instead.
///
/// Crossing a source sequence writes the same value into each element's
/// slot. A prefix the source does not have is not created.
pub fn assign(
    out: &mut Map<String, Value>,
    source: &Value,
    prefix: &[String],
    leaf: &str,
    value: Option<&Value>,
) {
    let Some((tier, rest)) = prefix.split_first() else {
        match value {
            Some(value) => {
                out.insert(leaf.to_string(), value.clone());
            }
            None => {
                out.remove(leaf);
            }
        }
        return;
    };

    match child(source, tier) {
        Some(Value::Array(items)) => {
            let slots = ensure_array(slot(out, tier));
            while slots.len() < items.len() {
                slots.push(Value::Object(Map::new()));
            }
            for (item, target) in items.iter().zip(slots.iter_mut()) {
                // Scalar elements have nowhere to take a key.
                if let Value::Object(target) = target {
                    assign(target, item, rest, leaf, value);
                }
            }
        }
        Some(nested @ Value::Object(_)) => {
            assign(ensure_object(slot(out, tier)), nested, rest, leaf, value);
        }
        _ => {}
    }
}
