//! Hierarchy construction: TOC records to a flat section-node arena.
//!
//! Construction is two-pass. Pass one recursively flattens every record
//! (any nesting depth) into the arena, rejecting duplicate identifiers.
//! Pass two wires parent/child edges purely from the identifier strings:
//! the parent of "02.10.01" is "02.10" when that node exists. Neither pass
//! depends on declaration order or on live object references.

use crate::error::{Error, Result};
use crate::section::{SectionNode, SectionTree};
use crate::toc::{TocEntry, TocTable};

/// Build the section tree from a table-of-contents structure.
///
/// Every record — chapters and arbitrarily nested sections — becomes one
/// node in a flat arena keyed by identifier. Records with an unusable page
/// range (missing, non-positive, or start > end) stay in the tree but are
/// marked rangeless and never claim pages; their text remains empty.
///
/// # Errors
///
/// [`Error::DuplicateIdentifier`] if two records share an identifier;
/// ownership would be ambiguous, so construction aborts.
pub fn build_tree(toc: &TocTable) -> Result<SectionTree> {
    let mut tree = SectionTree::new();
    flatten_into(toc, &mut tree)?;
    wire_edges(&mut tree);
    log::info!("Built section tree with {} nodes", tree.len());
    Ok(tree)
}

/// Pass one: depth-first flatten of the record table into the arena.
fn flatten_into(table: &TocTable, tree: &mut SectionTree) -> Result<()> {
    for (identifier, entry) in table {
        if tree.contains(identifier) {
            return Err(Error::DuplicateIdentifier {
                identifier: identifier.clone(),
            });
        }

        let mut node = SectionNode::new(
            identifier.clone(),
            entry.title.clone().unwrap_or_default(),
        );
        if let Some((start, end)) = usable_range(identifier, entry) {
            node.start_page = Some(start);
            node.end_page = Some(end);
        }
        tree.insert(node);

        flatten_into(&entry.sections, tree)?;
    }
    Ok(())
}

/// Validate a record's declared range, logging the reason when unusable.
fn usable_range(identifier: &str, entry: &TocEntry) -> Option<(u32, u32)> {
    match (entry.start, entry.end) {
        (Some(start), Some(end)) if start > 0 && start <= end => Some((start, end)),
        (Some(start), Some(end)) => {
            log::warn!(
                "Section '{}' has unusable page range {}..{}; excluded from page mapping",
                identifier,
                start,
                end
            );
            None
        },
        _ => {
            log::warn!(
                "Section '{}' lacks a page range; excluded from page mapping",
                identifier
            );
            None
        },
    }
}

/// Pass two: derive parent/child edges from identifier prefixes.
fn wire_edges(tree: &mut SectionTree) {
    // Collect the (child, parent) pairs first; the arena cannot be borrowed
    // mutably while scanning it.
    let pairs: Vec<(String, String)> = tree
        .identifiers()
        .filter_map(|id| parent_identifier(id).map(|p| (id.clone(), p)))
        .filter(|(_, parent)| tree.contains(parent))
        .collect();

    for (child, parent) in pairs {
        if let Some(node) = tree.get_mut(&child) {
            node.parent = Some(parent.clone());
        }
        if let Some(node) = tree.get_mut(&parent) {
            node.children.push(child);
        }
    }
}

/// The identifier minus its last dot-segment, if any.
fn parent_identifier(identifier: &str) -> Option<String> {
    identifier.rsplit_once('.').map(|(head, _)| head.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::TocEntry;

    fn sample_toc() -> TocTable {
        let mut toc = TocTable::new();
        toc.insert("01".to_string(), TocEntry::new("INTRO", 1, 2));
        toc.insert(
            "02".to_string(),
            TocEntry::new("STRUCTURE", 2, 10).with_section(
                "02.10",
                TocEntry::new("WALLS", 3, 8)
                    .with_section("02.10.01", TocEntry::new("Masonry", 3, 5)),
            ),
        );
        toc
    }

    #[test]
    fn test_flattens_nested_records() {
        let tree = build_tree(&sample_toc()).unwrap();
        assert_eq!(tree.len(), 4);
        assert!(tree.contains("01"));
        assert!(tree.contains("02"));
        assert!(tree.contains("02.10"));
        assert!(tree.contains("02.10.01"));
    }

    #[test]
    fn test_depth_matches_identifier_segments() {
        let tree = build_tree(&sample_toc()).unwrap();
        for (id, node) in tree.iter() {
            assert_eq!(node.depth, id.matches('.').count() + 1);
        }
    }

    #[test]
    fn test_parent_child_edges() {
        let tree = build_tree(&sample_toc()).unwrap();
        assert_eq!(tree.get("02.10").unwrap().parent.as_deref(), Some("02"));
        assert_eq!(
            tree.get("02.10.01").unwrap().parent.as_deref(),
            Some("02.10")
        );
        assert!(tree.get("01").unwrap().parent.is_none());
        assert_eq!(tree.get("02").unwrap().children, vec!["02.10".to_string()]);
        assert_eq!(
            tree.get("02.10").unwrap().children,
            vec!["02.10.01".to_string()]
        );
    }

    #[test]
    fn test_orphan_prefix_leaves_parent_unset() {
        // "03.10" declared without a "03" chapter record.
        let mut toc = TocTable::new();
        toc.insert("03.10".to_string(), TocEntry::new("ORPHAN", 1, 2));
        let tree = build_tree(&toc).unwrap();
        assert!(tree.get("03.10").unwrap().parent.is_none());
    }

    #[test]
    fn test_duplicate_identifier_is_fatal() {
        let mut toc = TocTable::new();
        toc.insert(
            "02".to_string(),
            TocEntry::new("A", 1, 2).with_section("02.10", TocEntry::new("B", 1, 2)),
        );
        // Same identifier nested under a different chapter.
        toc.insert(
            "03".to_string(),
            TocEntry::new("C", 3, 4).with_section("02.10", TocEntry::new("D", 3, 4)),
        );

        let err = build_tree(&toc).unwrap_err();
        match err {
            Error::DuplicateIdentifier { identifier } => assert_eq!(identifier, "02.10"),
            other => panic!("expected DuplicateIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn test_unusable_ranges_are_rangeless_not_fatal() {
        let mut toc = TocTable::new();
        toc.insert(
            "01".to_string(),
            TocEntry {
                title: Some("NO RANGE".to_string()),
                start: None,
                end: None,
                sections: TocTable::new(),
            },
        );
        toc.insert("02".to_string(), TocEntry::new("INVERTED", 9, 3));
        toc.insert("03".to_string(), TocEntry::new("ZERO", 0, 3));

        let tree = build_tree(&toc).unwrap();
        assert_eq!(tree.len(), 3);
        for (_, node) in tree.iter() {
            assert!(!node.has_range());
        }
    }
}
