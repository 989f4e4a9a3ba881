//! Projection rules.
//!
//! A `Rule` is caller-owned input and is never written to by the engine:
//! destination defaulting and overlap re-anchoring work on derived paths.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce::CoercionKind;
use crate::error::{BoxError, Error, Result};
use crate::path::Path;

/// Per-value mapping applied after filtering and before coercion.
pub type TranslateFn = Arc<dyn Fn(Value) -> std::result::Result<Value, BoxError> + Send + Sync>;

/// Predicate keeping only accepted collected values.
pub type FilterFn = Arc<dyn Fn(&Value) -> std::result::Result<bool, BoxError> + Send + Sync>;

#[derive(Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Where to read from in the source tree, e.g. `product.tags.name`.
    pub origin: String,

    /// Where to write in the output tree; `origin` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CoercionKind>,

    /// Substituted when collection yields no values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Write only the first value even if the walk fanned out.
    #[serde(default)]
    pub single: bool,

    #[serde(skip)]
    pub translate: Option<TranslateFn>,

    #[serde(skip)]
    pub filter: Option<FilterFn>,
}

impl Rule {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            field: None,
            kind: None,
            default: None,
            single: false,
            translate: None,
            filter: None,
        }
    }

    /// Write to `field` instead of back to the origin path.
    pub fn to(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn kind(mut self, kind: CoercionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn translate<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.try_translate(move |v| Ok(f(v)))
    }

    pub fn try_translate<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.translate = Some(Arc::new(f));
        self
    }

    pub fn filter<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.try_filter(move |v| Ok(f(v)))
    }

    pub fn try_filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(f));
        self
    }

    /// Destination path text, defaulting to the origin.
    pub fn destination(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.origin)
    }

    pub fn origin_path(&self) -> Result<Path> {
        self.parse(&self.origin)
    }

    pub fn destination_path(&self) -> Result<Path> {
        self.parse(self.destination())
    }

    /// Check both paths are well formed.
    pub fn validate(&self) -> Result<()> {
        self.origin_path()?;
        self.destination_path()?;
        Ok(())
    }

    fn parse(&self, raw: &str) -> Result<Path> {
        Path::parse(raw).map_err(|e| match e {
            Error::Config { reason, .. } => Error::config(self.to_string(), reason),
            other => other,
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination())
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("origin", &self.origin)
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("single", &self.single)
            .field("translate", &self.translate.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// Rules applied together, with an optional output mode.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    /// `None` defers to `ProjectorConfig::fat`.
    pub fat: Option<bool>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules, fat: None }
    }

    pub fn fat(mut self) -> Self {
        self.fat = Some(true);
        self
    }

    pub fn thin(mut self) -> Self {
        self.fat = Some(false);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn validate(&self) -> Result<()> {
        self.rules.iter().try_for_each(Rule::validate)
    }
}
