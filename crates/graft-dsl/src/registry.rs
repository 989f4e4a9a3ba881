//! Named `translate` and `filter` callables that rule documents refer to.

use std::collections::HashMap;
use std::sync::Arc;

use graft_core::rule::{FilterFn, TranslateFn};
use graft_core::BoxError;
use serde_json::Value;

#[derive(Clone, Default)]
pub struct Registry {
    translates: HashMap<String, TranslateFn>,
    filters: HashMap<String, FilterFn>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in callables:
    /// - translate: `trim`, `lowercase`, `uppercase`, `to_string`
    /// - filter: `present`, `numeric`, `nonblank`
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();

        reg.register_translate("trim", |v| Ok(map_text(v, |s| s.trim().to_string())));
        reg.register_translate("lowercase", |v| Ok(map_text(v, |s| s.to_lowercase())));
        reg.register_translate("uppercase", |v| Ok(map_text(v, |s| s.to_uppercase())));
        reg.register_translate("to_string", |v| match v {
            Value::String(_) => Ok(v),
            other => Ok(Value::String(serde_json::to_string(&other)?)),
        });

        reg.register_filter("present", |v| Ok(!v.is_null()));
        reg.register_filter("numeric", |v| {
            Ok(match v {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
                _ => false,
            })
        });
        reg.register_filter("nonblank", |v| {
            Ok(match v {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                Value::Array(items) => !items.is_empty(),
                Value::Object(map) => !map.is_empty(),
                Value::Bool(_) | Value::Number(_) => true,
            })
        });

        reg
    }

    pub fn register_translate<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.translates.insert(name.into(), Arc::new(f));
        self
    }

    pub fn register_filter<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(f));
        self
    }

    pub fn translate(&self, name: &str) -> Option<TranslateFn> {
        self.translates.get(name).cloned()
    }

    pub fn filter(&self, name: &str) -> Option<FilterFn> {
        self.filters.get(name).cloned()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut translates: Vec<_> = self.translates.keys().collect();
        translates.sort();
        let mut filters: Vec<_> = self.filters.keys().collect();
        filters.sort();
        f.debug_struct("Registry")
            .field("translates", &translates)
            .field("filters", &filters)
            .finish()
    }
}

fn map_text(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_translates_touch_text_only() {
        let reg = Registry::with_builtins();
        let trim = reg.translate("trim").unwrap();
        assert_eq!(trim(json!("  a ")).unwrap(), json!("a"));
        assert_eq!(trim(json!(3)).unwrap(), json!(3));
        let upper = reg.translate("uppercase").unwrap();
        assert_eq!(upper(json!("ab")).unwrap(), json!("AB"));
        let to_string = reg.translate("to_string").unwrap();
        assert_eq!(to_string(json!([1])).unwrap(), json!("[1]"));
    }

    #[test]
    fn builtin_filters() {
        let reg = Registry::with_builtins();
        let numeric = reg.filter("numeric").unwrap();
        assert!(numeric(&json!("4.5")).unwrap());
        assert!(!numeric(&json!("four")).unwrap());
        let nonblank = reg.filter("nonblank").unwrap();
        assert!(!nonblank(&json!("   ")).unwrap());
        assert!(nonblank(&json!(false)).unwrap());
    }

    #[test]
    fn unknown_names_are_absent() {
        assert!(Registry::new().translate("trim").is_none());
        assert!(Registry::with_builtins().filter("trim").is_none());
    }
}
