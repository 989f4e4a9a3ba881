#![forbid(unsafe_code)]
//! graft-core: shared types for the graft projection engine.
//!
//! Design intent:
//! - Pure and synchronous; no IO here.
//! - Trees are plain `serde_json::Value`s; this crate adds the vocabulary the
//!   engine walks them with (paths, rules, coercions) plus config and errors.

pub mod coerce;
pub mod config;
pub mod error;
pub mod path;
pub mod prelude;
pub mod rule;
pub mod tree;

pub use coerce::{CoercionFn, CoercionKind, CoercionTable};
pub use config::ProjectorConfig;
pub use error::{BoxError, Error, Result};
pub use path::Path;
pub use rule::{FilterFn, Rule, RuleSet, TranslateFn};
