//! Convenient re-exports for downstream crates.

pub use crate::coerce::{CoercionKind, CoercionTable};
pub use crate::config::ProjectorConfig;
pub use crate::error::{BoxError, Error, Result};
pub use crate::path::Path;
pub use crate::rule::{Rule, RuleSet};
pub use serde_json::{Map, Value};
