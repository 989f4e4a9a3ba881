#![forbid(unsafe_code)]
//! graft-dsl: declarative rule documents.
//!
//! Rules are written in YAML (or JSON, which parses as YAML) and bound to
//! real callables through a [`Registry`] of named `translate`/`filter`
//! functions.

pub mod document;
pub mod error;
pub mod registry;

pub use document::{parse_rule_document, DocumentConfig, RuleDef, RuleDocument};
pub use error::{DslError, Result};
pub use registry::Registry;
