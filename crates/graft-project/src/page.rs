//! Paged results: a slice of rows plus the total row count.

use graft_core::error::Result;
use graft_core::RuleSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::projector::Projector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub rows: Vec<Value>,
    pub count: u64,
}

impl Projector {
    /// Project every row of a page; the total count is carried over as-is.
    pub fn project_page(&self, page: Page, set: &RuleSet) -> Result<Page> {
        let rows = page
            .rows
            .iter()
            .map(|row| self.apply(row, set))
            .collect::<Result<Vec<_>>>()?;
        Ok(Page {
            rows,
            count: page.count,
        })
    }
}
