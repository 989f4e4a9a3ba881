//! Dot-delimited tree paths.

use std::fmt;

use crate::error::{Error, Result};

/// A parsed, non-empty path such as `items.tags.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parse a dot-delimited path. Empty paths and empty segments (`a..b`,
    /// `.a`, `a.`) are configuration errors.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::config(raw, "path is empty"));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::config(raw, format!("path `{raw}` has an empty segment")));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the container prefix and the leaf key written at its end.
    pub fn split_leaf(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((leaf, prefix)) => (prefix, leaf.as_str()),
            None => (&[], ""),
        }
    }

    /// Segment-wise prefix test: `items` prefixes `items.a` but not `itemsx.a`.
    pub fn starts_with(&self, prefix: &[String]) -> bool {
        self.segments.len() >= prefix.len() && self.segments[..prefix.len()] == *prefix
    }

    /// The path with its first `n` segments removed.
    pub fn strip_prefix(&self, n: usize) -> Path {
        Path {
            segments: self.segments[n.min(self.segments.len())..].to_vec(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
