//! The section tree: an arena of chapter/section nodes keyed by identifier.
//!
//! Chapters and all nested subsections share one flat namespace keyed by
//! their dot-delimited numeric identifier. Parent/child relationships are
//! stored as owned identifier lists plus a parent back-reference — no live
//! object references in either direction, so the tree serializes and
//! mutates without aliasing concerns.
//!
//! Ownership rules: only the hierarchy builder creates nodes and wires
//! edges; only the content assembler mutates the text/bookkeeping fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a node's text was carved out of the pages it claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplittingMethod {
    /// Every contested page was split at a located heading boundary
    BoundaryDetection,
    /// At least one page was duplicated wholesale (no locatable boundary,
    /// or three-plus simultaneous claimants)
    FullPageFallback,
}

impl Default for SplittingMethod {
    fn default() -> Self {
        SplittingMethod::BoundaryDetection
    }
}

/// A single chapter or section node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionNode {
    /// Dot-delimited numeric identifier, e.g. "02.10.01"
    pub identifier: String,

    /// Section title (empty when upstream detection produced none)
    pub title: String,

    /// Hierarchy depth: count of dot separators + 1
    pub depth: usize,

    /// Declared start page; None when the TOC record had no usable range
    pub start_page: Option<u32>,

    /// Declared end page; None when the TOC record had no usable range
    pub end_page: Option<u32>,

    /// Aggregated text, populated by the content assembler
    pub text: String,

    /// Unicode scalar count of `text` after the final trim
    pub character_count: usize,

    /// Pages whose content (whole or split) landed in this node
    pub pages_processed: Vec<u32>,

    /// How this node's pages were carved
    pub splitting_method: SplittingMethod,

    /// Identifiers of direct children, in arena insertion order
    pub children: Vec<String>,

    /// Identifier of the parent node, None for top-level chapters
    pub parent: Option<String>,
}

impl SectionNode {
    /// Create an empty node for the given identifier.
    ///
    /// Depth is derived from the identifier; range fields are filled in by
    /// the hierarchy builder after validation.
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let depth = identifier.matches('.').count() + 1;
        Self {
            identifier,
            title: title.into(),
            depth,
            start_page: None,
            end_page: None,
            text: String::new(),
            character_count: 0,
            pages_processed: Vec::new(),
            splitting_method: SplittingMethod::default(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// Whether this node carries a usable page range.
    pub fn has_range(&self) -> bool {
        self.start_page.is_some() && self.end_page.is_some()
    }

    /// Whether the given page falls inside this node's declared range.
    pub fn claims_page(&self, page: u32) -> bool {
        match (self.start_page, self.end_page) {
            (Some(start), Some(end)) => start <= page && page <= end,
            _ => false,
        }
    }
}

/// Arena of section nodes keyed by identifier, preserving insertion order.
///
/// Insertion order is the TOC declaration order (flattened depth-first),
/// which downstream stages rely on for deterministic output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionTree {
    nodes: IndexMap<String, SectionNode>,
}

impl SectionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node with this identifier exists.
    pub fn contains(&self, identifier: &str) -> bool {
        self.nodes.contains_key(identifier)
    }

    /// Look up a node by identifier.
    pub fn get(&self, identifier: &str) -> Option<&SectionNode> {
        self.nodes.get(identifier)
    }

    /// Look up a node mutably by identifier.
    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut SectionNode> {
        self.nodes.get_mut(identifier)
    }

    /// Insert a node under its identifier.
    ///
    /// Returns the displaced node if the identifier was already present;
    /// the hierarchy builder treats that as a fatal duplicate.
    pub fn insert(&mut self, node: SectionNode) -> Option<SectionNode> {
        self.nodes.insert(node.identifier.clone(), node)
    }

    /// Iterate nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SectionNode)> {
        self.nodes.iter()
    }

    /// Iterate nodes mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut SectionNode)> {
        self.nodes.iter_mut()
    }

    /// Identifiers in insertion order.
    pub fn identifiers(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_from_identifier() {
        assert_eq!(SectionNode::new("01", "A").depth, 1);
        assert_eq!(SectionNode::new("02.10", "B").depth, 2);
        assert_eq!(SectionNode::new("02.10.01", "C").depth, 3);
    }

    #[test]
    fn test_claims_page() {
        let mut node = SectionNode::new("01", "A");
        node.start_page = Some(3);
        node.end_page = Some(5);
        assert!(!node.claims_page(2));
        assert!(node.claims_page(3));
        assert!(node.claims_page(5));
        assert!(!node.claims_page(6));
    }

    #[test]
    fn test_rangeless_node_claims_nothing() {
        let node = SectionNode::new("01", "A");
        assert!(!node.has_range());
        assert!(!node.claims_page(1));
    }

    #[test]
    fn test_insert_reports_displacement() {
        let mut tree = SectionTree::new();
        assert!(tree.insert(SectionNode::new("01", "A")).is_none());
        assert!(tree.insert(SectionNode::new("01", "B")).is_some());
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let mut tree = SectionTree::new();
        tree.insert(SectionNode::new("02", "B"));
        tree.insert(SectionNode::new("01", "A"));
        let ids: Vec<&str> = tree.identifiers().map(String::as_str).collect();
        assert_eq!(ids, vec!["02", "01"]);
    }

    #[test]
    fn test_splitting_method_wire_names() {
        let json = serde_json::to_string(&SplittingMethod::BoundaryDetection).unwrap();
        assert_eq!(json, "\"boundary_detection\"");
        let json = serde_json::to_string(&SplittingMethod::FullPageFallback).unwrap();
        assert_eq!(json, "\"full_page_fallback\"");
    }
}
