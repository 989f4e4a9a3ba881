//! Skeleton builder for thin mode: pre-create the containers along a
//! destination prefix, mirroring the source's sequence/mapping shape.

use graft_core::tree::{child, ensure_array, ensure_object, pad_with_objects, slot};
use serde_json::{Map, Value};

/// Ensure every container along `path` exists in `out`. Stops silently where
/// the source has no container. Never touches `source`.
pub fn build(out: &mut Map<String, Value>, source: &Value, path: &[String]) {
    let Some((tier, rest)) = path.split_first() else {
        return;
    };

    match child(source, tier) {
        Some(Value::Array(items)) => {
            let slots = ensure_array(slot(out, tier));
            pad_with_objects(slots, items.len());
            for (item, target) in items.iter().zip(slots.iter_mut()) {
                if let Value::Object(target) = target {
                    build(target, item, rest);
                }
            }
        }
        Some(nested @ Value::Object(_)) => {
            build(ensure_object(slot(out, tier)), nested, rest);
        }
        _ => {}
    }
}
