//! Table-of-contents input model.
//!
//! The TOC arrives as a mapping from dot-delimited numeric identifiers
//! (`"01"`, `"02.10"`, `"02.10.01"`, ...) to records carrying a title, a
//! declared page range, and optionally nested child records of the same
//! shape. Nesting depth is unbounded; the hierarchy builder flattens it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A mapping from section identifier to TOC record, preserving the order
/// in which the records were declared.
pub type TocTable = IndexMap<String, TocEntry>;

/// A single table-of-contents record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    /// Section title; upstream detection occasionally leaves this null
    #[serde(default)]
    pub title: Option<String>,

    /// Declared start page (1-based, inclusive)
    #[serde(default)]
    pub start: Option<u32>,

    /// Declared end page (1-based, inclusive)
    #[serde(default)]
    pub end: Option<u32>,

    /// Nested child records, keyed by their own identifiers
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub sections: TocTable,
}

impl TocEntry {
    /// Create a leaf record with a title and page range.
    pub fn new(title: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            title: Some(title.into()),
            start: Some(start),
            end: Some(end),
            sections: TocTable::new(),
        }
    }

    /// Add a nested child record (builder style, used mostly by tests).
    pub fn with_section(mut self, identifier: impl Into<String>, entry: TocEntry) -> Self {
        self.sections.insert(identifier.into(), entry);
        self
    }
}
