//! Overlap resolver.
//!
//! When a rule's destination prefix is also a leading prefix of its origin
//! (origin `items.a`, destination `items.label`), the rule is re-anchored:
//! both paths lose the shared prefix and the projection runs once per node
//! the prefix reaches, merging each result into the matching output node.

use graft_core::error::Result;
use graft_core::tree::{child, is_blank};
use graft_core::Rule;
use serde_json::{Map, Value};

use crate::projector::{Bound, Projector};

/// The shared prefix a rule re-anchors on, if any.
pub fn overlap_prefix(rule: &Rule) -> Result<Option<String>> {
    let bound = Bound::new(rule)?;
    Ok(bound
        .overlap_len()
        .map(|n| bound.field.segments()[..n].join(".")))
}

/// Re-run `rule` below its first `shared` destination segments.
pub(crate) fn resolve(
    projector: &Projector,
    source: &Value,
    out: &mut Map<String, Value>,
    rule: &Bound<'_>,
    shared: usize,
    fat: bool,
) -> Result<()> {
    let local = rule.reanchor(shared);
    let (prefix, _) = rule.field.split_leaf();

    let mut pairs = Vec::new();
    pair_nodes(source, out, &prefix[..shared], &mut pairs);

    #[cfg(feature = "tracing")]
    tracing::trace!(rule = %rule, nodes = pairs.len(), local = %local, "re-anchored rule");

    let (_, leaf) = local.field.split_leaf();
    for (node, target) in pairs {
        // Shallow merge, last write wins.
        let projected = projector.project_bound(node, std::slice::from_ref(&local), fat)?;
        if let Value::Object(projected) = projected {
            // An empty leaf clears the key the fat copy carried over.
            if !projected.contains_key(leaf) {
                target.remove(leaf);
            }
            target.extend(projected);
        }
    }
    Ok(())
}

/// Walk `path` through source and output together, collecting the
/// `(source node, output node)` pairs at its end. Arrays pair index by index;
/// absent or empty source nodes contribute nothing.
fn pair_nodes<'s, 'o>(
    source: &'s Value,
    out: &'o mut Map<String, Value>,
    path: &[String],
    pairs: &mut Vec<(&'s Value, &'o mut Map<String, Value>)>,
) {
    let Some((tier, rest)) = path.split_first() else {
        return;
    };
    let Some(node) = child(source, tier).filter(|v| !is_blank(v)) else {
        return;
    };
    let Some(target) = out.get_mut(tier.as_str()) else {
        return;
    };

    match (node, target) {
        (Value::Array(items), Value::Array(slots)) => {
            for (item, slot) in items.iter().zip(slots.iter_mut()) {
                if let Value::Object(slot) = slot {
                    if rest.is_empty() {
                        pairs.push((item, slot));
                    } else {
                        pair_nodes(item, slot, rest, pairs);
                    }
                }
            }
        }
        (Value::Object(_), Value::Object(slot)) => {
            if rest.is_empty() {
                pairs.push((node, slot));
            } else {
                pair_nodes(node, slot, rest, pairs);
            }
        }
        _ => {}
    }
}
