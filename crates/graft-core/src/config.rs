//! Projector configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Output mode for rule sets that do not pick one. `true` clones the
    /// source and overlays rule results; `false` emits only rule-touched paths.
    pub fat: bool,

    /// strftime pattern used by the `datetime` coercion.
    pub datetime_format: String,

    /// strftime pattern used by the `date` coercion.
    pub date_format: String,

    /// Return the input untouched when a rule set has no rules.
    pub skip_empty_rules: bool,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            fat: true,
            datetime_format: "%Y-%m-%d %H:%M".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            skip_empty_rules: true,
        }
    }
}

impl ProjectorConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `GRAFT_FAT`: `true`/`false`
    /// - `GRAFT_DATETIME_FORMAT`: strftime pattern for `datetime`
    /// - `GRAFT_DATE_FORMAT`: strftime pattern for `date`
    /// - `GRAFT_SKIP_EMPTY_RULES`: `true`/`false`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("GRAFT_FAT") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.fat = v;
            }
        }

        if let Some(s) = lookup("GRAFT_DATETIME_FORMAT") {
            cfg.datetime_format = s;
        }

        if let Some(s) = lookup("GRAFT_DATE_FORMAT") {
            cfg.date_format = s;
        }

        if let Some(s) = lookup("GRAFT_SKIP_EMPTY_RULES") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.skip_empty_rules = v;
            }
        }

        cfg
    }
}
