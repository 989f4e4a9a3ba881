//! The projector: entry point that drives the four tree walks per rule.

use std::fmt;

use graft_core::error::{Error, Result};
use graft_core::{CoercionTable, Path, ProjectorConfig, Rule, RuleSet};
use serde_json::{Map, Value};

use crate::{assign, collect, overlap, skeleton};

/// A rule with its paths resolved for one invocation.
///
/// Destination defaulting and overlap re-anchoring happen here, so the
/// caller's `Rule` is only ever borrowed.
#[derive(Debug, Clone)]
pub(crate) struct Bound<'r> {
    pub rule: &'r Rule,
    pub origin: Path,
    pub field: Path,
}

impl<'r> Bound<'r> {
    pub fn new(rule: &'r Rule) -> Result<Self> {
        Ok(Self {
            rule,
            origin: rule.origin_path()?,
            field: rule.destination_path()?,
        })
    }

    /// Length of the destination prefix when it leads the origin path and
    /// the origin continues past it.
    pub fn overlap_len(&self) -> Option<usize> {
        let (prefix, _) = self.field.split_leaf();
        let overlaps = !prefix.is_empty()
            && self.origin.len() > prefix.len()
            && self.origin.starts_with(prefix);
        overlaps.then_some(prefix.len())
    }

    pub fn reanchor(&self, shared: usize) -> Self {
        Self {
            rule: self.rule,
            origin: self.origin.strip_prefix(shared),
            field: self.field.strip_prefix(shared),
        }
    }
}

impl fmt::Display for Bound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.field)
    }
}

/// Reshapes trees according to rules.
///
/// A projector holds no per-call state; one instance can serve any number
/// of concurrent calls.
#[derive(Debug, Clone)]
pub struct Projector {
    config: ProjectorConfig,
    coercions: CoercionTable,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            config: ProjectorConfig::default(),
            coercions: CoercionTable::default(),
        }
    }
}

impl Projector {
    /// Build a projector with the built-in coercions for `config`.
    pub fn new(config: ProjectorConfig) -> Result<Self> {
        let coercions = CoercionTable::from_config(&config)?;
        Ok(Self { config, coercions })
    }

    /// Build a projector with a caller-supplied coercion table.
    pub fn with_coercions(config: ProjectorConfig, coercions: CoercionTable) -> Self {
        Self { config, coercions }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    pub fn coercions(&self) -> &CoercionTable {
        &self.coercions
    }

    /// Project `source` through `rules`.
    ///
    /// A sequence source is projected element by element. In fat mode the
    /// output starts as a copy of each node; in thin mode it starts empty.
    pub fn project(&self, source: &Value, rules: &[Rule], fat: bool) -> Result<Value> {
        let bound = self.bind(rules)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(rules = bound.len(), fat, "projecting");

        self.project_bound(source, &bound, fat)
    }

    /// Like [`project`](Self::project) for a sequence source, but each
    /// element succeeds or fails on its own. Rule errors still fail the call.
    pub fn project_each(
        &self,
        source: &Value,
        rules: &[Rule],
        fat: bool,
    ) -> Result<Vec<Result<Value>>> {
        let bound = self.bind(rules)?;
        Ok(match source {
            Value::Array(items) => items
                .iter()
                .map(|item| self.project_bound(item, &bound, fat))
                .collect(),
            node => vec![self.project_bound(node, &bound, fat)],
        })
    }

    /// Project with a rule set, taking the mode from the set or the config.
    /// An empty set returns the input untouched when `skip_empty_rules` is on.
    pub fn apply(&self, source: &Value, set: &RuleSet) -> Result<Value> {
        if set.is_empty() && self.config.skip_empty_rules {
            return Ok(source.clone());
        }
        let fat = set.fat.unwrap_or(self.config.fat);
        self.project(source, &set.rules, fat)
    }

    fn bind<'r>(&self, rules: &'r [Rule]) -> Result<Vec<Bound<'r>>> {
        rules
            .iter()
            .map(|rule| {
                if let Some(kind) = rule.kind {
                    if !self.coercions.contains(kind) {
                        return Err(Error::config(
                            rule.to_string(),
                            format!("no coercion registered for `{kind}`"),
                        ));
                    }
                }
                Bound::new(rule)
            })
            .collect()
    }

    pub(crate) fn project_bound(
        &self,
        source: &Value,
        rules: &[Bound<'_>],
        fat: bool,
    ) -> Result<Value> {
        match source {
            Value::Array(items) => items
                .iter()
                .map(|item| self.project_bound(item, rules, fat))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            node => self.project_node(node, rules, fat).map(Value::Object),
        }
    }

    fn project_node(
        &self,
        node: &Value,
        rules: &[Bound<'_>],
        fat: bool,
    ) -> Result<Map<String, Value>> {
        let mut out = match (fat, node) {
            (true, Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        for rule in rules {
            self.apply_rule(node, &mut out, rule, fat)?;
        }
        Ok(out)
    }

    fn apply_rule(
        &self,
        node: &Value,
        out: &mut Map<String, Value>,
        rule: &Bound<'_>,
        fat: bool,
    ) -> Result<()> {
        let (prefix, leaf) = rule.field.split_leaf();

        if !fat {
            skeleton::build(out, node, prefix);
        }

        if let Some(shared) = rule.overlap_len() {
            return overlap::resolve(self, node, out, rule, shared, fat);
        }

        let mut bag = collect::collect(node, rule.origin.segments());
        bag.normalize();
        bag.refine(rule.rule, &self.coercions)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(rule = %rule, values = bag.values.len(), single = bag.single, "collected");

        let value = bag.into_leaf(rule.rule);
        assign::assign(out, node, prefix, leaf, value.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::CoercionKind;
    use serde_json::json;

    #[test]
    fn fat_mode_overlays_rule_output() {
        let source = json!({"id": 1, "user": {"name": "ada"}});
        let out = Projector::default()
            .project(&source, &[Rule::new("user.name").to("author")], true)
            .unwrap();
        assert_eq!(out, json!({"id": 1, "user": {"name": "ada"}, "author": "ada"}));
    }

    #[test]
    fn thin_mode_keeps_only_rule_fields() {
        let source = json!({"id": 1, "user": {"name": "ada"}});
        let out = Projector::default()
            .project(&source, &[Rule::new("user.name").to("author")], false)
            .unwrap();
        assert_eq!(out, json!({"author": "ada"}));
    }

    #[test]
    fn unregistered_kind_fails_before_walking() {
        let projector =
            Projector::with_coercions(ProjectorConfig::default(), CoercionTable::empty());
        let rules = [Rule::new("n").kind(CoercionKind::Integer)];
        let err = projector.project(&json!({}), &rules, true).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn malformed_paths_are_config_errors() {
        let err = Projector::default()
            .project(&json!({"a": 1}), &[Rule::new("a").to("b..c")], true)
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn apply_skips_empty_rule_sets() {
        let source = json!({"a": 1});
        let projector = Projector::default();
        assert_eq!(projector.apply(&source, &RuleSet::default().thin()).unwrap(), source);

        let strict = Projector::new(ProjectorConfig {
            skip_empty_rules: false,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(strict.apply(&source, &RuleSet::default().thin()).unwrap(), json!({}));
    }

    #[test]
    fn apply_falls_back_to_configured_mode() {
        let projector = Projector::new(ProjectorConfig {
            fat: false,
            ..Default::default()
        })
        .unwrap();
        let set = RuleSet::new(vec![Rule::new("a")]);
        assert_eq!(projector.apply(&json!({"a": 1, "b": 2}), &set).unwrap(), json!({"a": 1}));
        assert_eq!(
            projector.apply(&json!({"a": 1, "b": 2}), &set.clone().fat()).unwrap(),
            json!({"a": 1, "b": 2})
        );
    }

    #[test]
    fn scalar_sources_project_to_mappings() {
        let out = Projector::default()
            .project(&json!([5, {"a": 1}]), &[Rule::new("a")], true)
            .unwrap();
        assert_eq!(out, json!([{}, {"a": 1}]));
    }
}
