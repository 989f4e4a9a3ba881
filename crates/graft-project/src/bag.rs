//! The collected-value bag and its per-rule refinement.

use graft_core::error::{Error, Result};
use graft_core::tree::is_truthy;
use graft_core::{CoercionTable, Rule};
use serde_json::Value;

/// Values gathered by one collection pass.
///
/// `single` starts out `true` and drops to `false` once the walk crosses a
/// sequence, whatever its length.
#[derive(Debug, Clone, PartialEq)]
pub struct Bag {
    pub values: Vec<Value>,
    pub single: bool,
}

impl Default for Bag {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            single: true,
        }
    }
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop falsy values and remove one level of nesting, so sequence-valued
    /// leaves are concatenated into the bag.
    pub fn normalize(&mut self) {
        self.values.retain(is_truthy);
        if self.values.iter().any(Value::is_array) {
            let nested = std::mem::take(&mut self.values);
            for value in nested {
                match value {
                    Value::Array(items) => self.values.extend(items),
                    other => self.values.push(other),
                }
            }
        }
    }

    /// Apply the rule's filter, translate and coercion, in that order.
    pub fn refine(&mut self, rule: &Rule, coercions: &CoercionTable) -> Result<()> {
        if let Some(filter) = &rule.filter {
            let mut kept = Vec::with_capacity(self.values.len());
            for value in self.values.drain(..) {
                if filter(&value).map_err(Error::Callable)? {
                    kept.push(value);
                }
            }
            self.values = kept;
        }

        if let Some(translate) = &rule.translate {
            self.values = std::mem::take(&mut self.values)
                .into_iter()
                .map(|v| translate(v).map_err(Error::Callable))
                .collect::<Result<_>>()?;
        }

        if let Some(kind) = rule.kind {
            let coerce = coercions.get(kind).ok_or_else(|| {
                Error::config(rule.to_string(), format!("no coercion registered for `{kind}`"))
            })?;
            self.values = self
                .values
                .iter()
                .map(|v| coerce(v))
                .collect::<Result<_>>()?;
        }

        Ok(())
    }

    /// The value written at the destination; `None` clears it.
    ///
    /// An empty bag takes the rule's default. A singular bag (or a rule
    /// forcing `single`) yields its first value, otherwise the whole list.
    pub fn into_leaf(mut self, rule: &Rule) -> Option<Value> {
        if self.values.is_empty() {
            if let Some(default) = &rule.default {
                self.values.push(default.clone());
            }
        }
        if rule.single || self.single {
            self.values.into_iter().next()
        } else {
            Some(Value::Array(self.values))
        }
    }
}
