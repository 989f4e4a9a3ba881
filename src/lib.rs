#![forbid(unsafe_code)]
//! graft: declarative path-based projection of nested JSON-like trees.
//!
//! This facade re-exports the workspace crates:
//! - [`types`]: paths, rules, coercions, config and errors;
//! - [`project`]: the projection engine;
//! - [`dsl`]: YAML/JSON rule documents.

pub use graft_core as types;
pub use graft_dsl as dsl;
pub use graft_project as project;

pub use graft_core::{CoercionKind, CoercionTable, Error, ProjectorConfig, Result, Rule, RuleSet};
pub use graft_project::{Page, Projector};
