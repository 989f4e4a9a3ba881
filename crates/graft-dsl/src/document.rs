//! YAML/JSON → `RuleSet` parser.
//!
//! Example:
//! ```yaml
//! fat: false
//! config:
//!   date_format: "%d/%m/%Y"
//! rules:
//!   - origin: items.price
//!     field: items.cost
//!     type: integer
//!     default: 0
//!   - origin: tags.name
//!     field: tags
//!     translate: lowercase
//!     filter: nonblank
//! ```
//!
//! A bare list of rules is accepted as well.

use serde::{Deserialize, Serialize};

use graft_core::prelude::{CoercionKind, ProjectorConfig, Rule, RuleSet, Value};

use crate::error::{DslError, Result};
use crate::registry::Registry;

/// One rule as written in a document; callables are referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDef {
    pub origin: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<CoercionKind>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub single: bool,
    #[serde(default)]
    pub translate: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
}

/// Projector settings a document may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    pub datetime_format: Option<String>,
    pub date_format: Option<String>,
    pub skip_empty_rules: Option<bool>,
}

impl DocumentConfig {
    /// Overlay the document's settings onto `cfg`.
    pub fn apply_to(&self, cfg: &mut ProjectorConfig) {
        if let Some(pattern) = &self.datetime_format {
            cfg.datetime_format = pattern.clone();
        }
        if let Some(pattern) = &self.date_format {
            cfg.date_format = pattern.clone();
        }
        if let Some(skip) = self.skip_empty_rules {
            cfg.skip_empty_rules = skip;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub fat: Option<bool>,
    #[serde(default)]
    pub config: Option<DocumentConfig>,
    pub rules: Vec<RuleDef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentForm {
    Full(RuleDocument),
    Bare(Vec<RuleDef>),
}

/// Parse a rule document from YAML or JSON text.
pub fn parse_rule_document(src: &str) -> Result<RuleDocument> {
    let doc = match serde_yaml::from_str::<DocumentForm>(src) {
        Ok(DocumentForm::Full(doc)) => doc,
        Ok(DocumentForm::Bare(rules)) => RuleDocument {
            rules,
            ..Default::default()
        },
        // Untagged errors are vague; re-parse as the full form for a useful message.
        Err(_) => serde_yaml::from_str::<RuleDocument>(src)?,
    };
    Ok(doc)
}

impl RuleDef {
    /// Resolve callable names and check both paths.
    pub fn bind(&self, registry: &Registry) -> Result<Rule> {
        let mut rule = Rule::new(self.origin.clone());
        rule.field = self.field.clone();
        rule.kind = self.kind;
        rule.default = self.default.clone();
        rule.single = self.single;

        if let Some(name) = &self.translate {
            rule.translate = Some(registry.translate(name).ok_or_else(|| {
                DslError::UnknownCallable {
                    rule: rule.to_string(),
                    role: "translate",
                    name: name.clone(),
                }
            })?);
        }
        if let Some(name) = &self.filter {
            rule.filter = Some(registry.filter(name).ok_or_else(|| DslError::UnknownCallable {
                rule: rule.to_string(),
                role: "filter",
                name: name.clone(),
            })?);
        }

        rule.validate()?;
        Ok(rule)
    }
}

impl RuleDocument {
    pub fn bind(&self, registry: &Registry) -> Result<RuleSet> {
        let rules = self
            .rules
            .iter()
            .map(|def| def.bind(registry))
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleSet {
            rules,
            fat: self.fat,
        })
    }
}
