//! Value collector: walk an origin path and gather every reachable leaf.

use graft_core::tree::{child, is_blank, is_truthy};
use serde_json::Value;

use crate::bag::Bag;

/// Collect the values at `path` under `node`.
pub fn collect(node: &Value, path: &[String]) -> Bag {
    let mut bag = Bag::new();
    walk(node, path, &mut bag);
    bag
}

fn walk(node: &Value, path: &[String], bag: &mut Bag) {
    match path {
        [] => {}
        [key] => {
            if let Some(value) = child(node, key).filter(|v| is_truthy(v)) {
                bag.values.push(value.clone());
            }
        }
        [key, leaf] => match child(node, key) {
            None => {}
            Some(value) if is_blank(value) => {}
            Some(Value::Object(map)) => {
                if let Some(value) = map.get(leaf.as_str()) {
                    bag.values.push(value.clone());
                }
            }
            Some(Value::Array(items)) => {
                bag.values
                    .extend(items.iter().filter_map(|item| child(item, leaf)).cloned());
                bag.single = false;
            }
            Some(_) => {}
        },
        [key, rest @ ..] => match child(node, key) {
            None => {}
            Some(value) if is_blank(value) => {}
            Some(Value::Array(items)) => {
                bag.single = false;
                for item in items {
                    walk(item, rest, bag);
                }
            }
            Some(nested @ Value::Object(_)) => walk(nested, rest, bag),
            Some(_) => {}
        },
    }
}
