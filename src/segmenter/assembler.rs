//! Content assembly: the single page walk that populates the section tree.
//!
//! Pages are visited exactly once, in ascending page-number order. Every
//! page's text (whole, or split at a detected boundary) is appended to the
//! sections that claim it, followed by a paragraph separator. All walk
//! state lives in one explicit accumulator threaded through the loop, so
//! the transformation stays a pure function of (pages, hierarchy).
//!
//! This is the only component that mutates section nodes, and it touches
//! only the text/bookkeeping fields — never the tree structure.

use crate::config::SegmenterConfig;
use crate::model::{ItemKind, Page};
use crate::section::{SectionTree, SplittingMethod};
use crate::segmenter::boundary::{resolve_roles, split_contested_page, BoundaryOutcome};
use crate::segmenter::heading::parse_heading;
use crate::segmenter::page_map::PageMap;
use serde::Serialize;

/// Counters accumulated over the page walk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssemblyStats {
    /// Pages visited
    pub pages_walked: usize,
    /// Contested pages split cleanly at a heading boundary
    pub boundary_pages: usize,
    /// Contested pages that fell back to full duplication
    pub fallback_pages: usize,
    /// Pages with three or more claimants (duplicated without splitting)
    pub crowded_pages: usize,
    /// Pages no section claimed
    pub uncovered_pages: usize,
    /// Unnumbered headings seen before any numbered heading had opened
    pub unanchored_headings: usize,
}

/// Stack of currently-open sections, keyed by heading level.
///
/// A new heading closes every open section at its own level or deeper
/// before opening itself, mirroring how numbered documents nest.
#[derive(Debug, Default)]
struct OpenSectionStack {
    entries: Vec<(u8, String)>,
}

impl OpenSectionStack {
    fn open(&mut self, level: u8, identifier: String) {
        while self
            .entries
            .last()
            .map(|(open_level, _)| *open_level >= level)
            .unwrap_or(false)
        {
            self.entries.pop();
        }
        self.entries.push((level, identifier));
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk all pages and populate the section tree.
///
/// After the walk, every node's aggregated text is trimmed exactly once
/// and its character count recomputed, so per-append separators never
/// accumulate at the edges.
pub fn assemble(
    pages: &[Page],
    tree: &mut SectionTree,
    map: &PageMap,
    config: &SegmenterConfig,
) -> AssemblyStats {
    let mut stats = AssemblyStats::default();
    let mut open_stack = OpenSectionStack::default();

    // Total order over pages; input emission order is not guaranteed.
    let mut ordered: Vec<&Page> = pages.iter().collect();
    ordered.sort_by_key(|p| p.page);

    for page in ordered {
        stats.pages_walked += 1;
        track_open_sections(page, &mut open_stack, &mut stats);

        let claimants = map.claimants(page.page);
        match claimants {
            [] => {
                stats.uncovered_pages += 1;
            },
            [only] => {
                append_fragment(tree, only, page.page, &page.text, config);
            },
            [first, second] => {
                assemble_contested(page, first, second, tree, config, &mut stats);
            },
            many => {
                // Three-plus claimants: boundary disambiguation is defined
                // only for the two-way case.
                log::warn!(
                    "Page {}: {} simultaneous claimants; duplicating full page",
                    page.page,
                    many.len()
                );
                stats.crowded_pages += 1;
                for identifier in many {
                    append_fragment(tree, identifier, page.page, &page.text, config);
                    mark_fallback(tree, identifier);
                }
            },
        }
    }

    finalize_text(tree);
    log::info!(
        "Assembled {} pages: {} boundary splits, {} fallbacks, {} crowded, {} uncovered",
        stats.pages_walked,
        stats.boundary_pages,
        stats.fallback_pages,
        stats.crowded_pages,
        stats.uncovered_pages
    );
    stats
}

/// Handle a page with exactly two claimants.
fn assemble_contested(
    page: &Page,
    first: &str,
    second: &str,
    tree: &mut SectionTree,
    config: &SegmenterConfig,
    stats: &mut AssemblyStats,
) {
    let outcome = match (tree.get(first), tree.get(second)) {
        (Some(a), Some(b)) => match resolve_roles(page.page, a, b) {
            Some((outgoing, incoming)) => {
                let outgoing_id = outgoing.identifier.clone();
                let incoming_id = incoming.identifier.clone();
                match split_contested_page(page, outgoing, incoming, config) {
                    BoundaryOutcome::Split {
                        outgoing_text,
                        incoming_text,
                    } => Some((outgoing_id, outgoing_text, incoming_id, incoming_text)),
                    BoundaryOutcome::Fallback => None,
                }
            },
            None => {
                log::warn!(
                    "Page {}: claimants '{}' and '{}' do not form an end/start boundary",
                    page.page,
                    first,
                    second
                );
                None
            },
        },
        _ => None,
    };

    match outcome {
        Some((outgoing_id, outgoing_text, incoming_id, incoming_text)) => {
            stats.boundary_pages += 1;
            append_fragment(tree, &outgoing_id, page.page, &outgoing_text, config);
            append_fragment(tree, &incoming_id, page.page, &incoming_text, config);
        },
        None => {
            stats.fallback_pages += 1;
            for identifier in [first, second] {
                append_fragment(tree, identifier, page.page, &page.text, config);
                mark_fallback(tree, identifier);
            }
        },
    }
}

/// Keep the open-section stack current and count unanchored headings.
///
/// Stack updates follow item emission order; only the boundary cut itself
/// is coordinate-based.
fn track_open_sections(page: &Page, stack: &mut OpenSectionStack, stats: &mut AssemblyStats) {
    for item in &page.items {
        if item.kind != ItemKind::Heading {
            continue;
        }
        match parse_heading(&item.value) {
            Some(parsed) => stack.open(parsed.level, parsed.number),
            None => {
                if stack.is_empty() {
                    // A preamble heading with nothing to anchor to; see the
                    // coverage report for the pages it may affect.
                    log::warn!(
                        "Page {}: unanchored heading '{}' before any numbered section",
                        page.page,
                        item.value
                    );
                    stats.unanchored_headings += 1;
                }
            },
        }
    }
}

/// Append one text fragment to a node, with separator and bookkeeping.
fn append_fragment(
    tree: &mut SectionTree,
    identifier: &str,
    page: u32,
    fragment: &str,
    config: &SegmenterConfig,
) {
    let Some(node) = tree.get_mut(identifier) else {
        return;
    };
    node.text.push_str(fragment);
    node.text.push_str(&config.paragraph_separator);
    node.character_count += fragment.chars().count();
    node.pages_processed.push(page);
}

/// Latch a node into the fallback splitting method.
fn mark_fallback(tree: &mut SectionTree, identifier: &str) {
    if let Some(node) = tree.get_mut(identifier) {
        node.splitting_method = SplittingMethod::FullPageFallback;
    }
}

/// Trim every node's aggregated text exactly once and settle the counts.
fn finalize_text(tree: &mut SectionTree) {
    for (_, node) in tree.iter_mut() {
        let trimmed = node.text.trim().to_string();
        node.text = trimmed;
        node.character_count = node.text.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::model::PageItem;
    use crate::segmenter::hierarchy::build_tree;
    use crate::toc::{TocEntry, TocTable};

    fn bbox_at(y: f32) -> Option<BBox> {
        Some(BBox::new(0.0, y, 500.0, 20.0))
    }

    fn two_section_toc() -> TocTable {
        let mut toc = TocTable::new();
        toc.insert("01".to_string(), TocEntry::new("INTRO", 1, 2));
        toc.insert("02".to_string(), TocEntry::new("BODY", 2, 3));
        toc
    }

    fn boundary_pages() -> Vec<Page> {
        vec![
            Page {
                page: 1,
                text: "intro text".to_string(),
                items: vec![
                    PageItem::heading("01. INTRO", 1, bbox_at(50.0)),
                    PageItem::text("intro text", bbox_at(100.0)),
                ],
            },
            Page {
                page: 2,
                text: "closing remarks\n02. BODY\nopening text".to_string(),
                items: vec![
                    PageItem::text("closing remarks", bbox_at(100.0)),
                    PageItem::heading("02. BODY", 1, bbox_at(400.0)),
                    PageItem::text("opening text", bbox_at(500.0)),
                ],
            },
            Page {
                page: 3,
                text: "body continues".to_string(),
                items: vec![PageItem::text("body continues", bbox_at(100.0))],
            },
        ]
    }

    #[test]
    fn test_exclusive_pages_get_full_text() {
        let mut tree = build_tree(&two_section_toc()).unwrap();
        let pages = boundary_pages();
        let map = PageMap::build(&tree, 3);
        let config = SegmenterConfig::default();

        assemble(&pages, &mut tree, &map, &config);

        let intro = tree.get("01").unwrap();
        assert!(intro.text.starts_with("intro text"));
        let body = tree.get("02").unwrap();
        assert!(body.text.ends_with("body continues"));
    }

    #[test]
    fn test_boundary_page_is_partitioned() {
        let mut tree = build_tree(&two_section_toc()).unwrap();
        let pages = boundary_pages();
        let map = PageMap::build(&tree, 3);
        let config = SegmenterConfig::default();

        let stats = assemble(&pages, &mut tree, &map, &config);
        assert_eq!(stats.boundary_pages, 1);
        assert_eq!(stats.fallback_pages, 0);

        let intro = tree.get("01").unwrap();
        assert!(intro.text.contains("closing remarks"));
        assert!(!intro.text.contains("opening text"));
        assert_eq!(intro.splitting_method, SplittingMethod::BoundaryDetection);

        let body = tree.get("02").unwrap();
        assert!(body.text.starts_with("02. BODY"));
        assert!(body.text.contains("opening text"));
        assert!(!body.text.contains("closing remarks"));
        assert_eq!(body.splitting_method, SplittingMethod::BoundaryDetection);
    }

    #[test]
    fn test_missing_boundary_duplicates_page() {
        let mut tree = build_tree(&two_section_toc()).unwrap();
        let mut pages = boundary_pages();
        // Remove the transition heading from page 2.
        pages[1].items[1] = PageItem::text("02. BODY", bbox_at(400.0));
        let map = PageMap::build(&tree, 3);
        let config = SegmenterConfig::default();

        let stats = assemble(&pages, &mut tree, &map, &config);
        assert_eq!(stats.boundary_pages, 0);
        assert_eq!(stats.fallback_pages, 1);

        let intro = tree.get("01").unwrap();
        let body = tree.get("02").unwrap();
        assert!(intro.text.contains("opening text"));
        assert!(body.text.contains("closing remarks"));
        assert_eq!(intro.splitting_method, SplittingMethod::FullPageFallback);
        assert_eq!(body.splitting_method, SplittingMethod::FullPageFallback);
    }

    #[test]
    fn test_crowded_page_duplicates_into_all() {
        let mut toc = two_section_toc();
        toc.insert("03".to_string(), TocEntry::new("EXTRA", 2, 4));
        let mut tree = build_tree(&toc).unwrap();
        let pages = boundary_pages();
        let map = PageMap::build(&tree, 3);
        let config = SegmenterConfig::default();

        let stats = assemble(&pages, &mut tree, &map, &config);
        assert_eq!(stats.crowded_pages, 1);

        for id in ["01", "02", "03"] {
            let node = tree.get(id).unwrap();
            assert!(node.text.contains("closing remarks"), "node {id}");
            assert_eq!(node.splitting_method, SplittingMethod::FullPageFallback);
        }
    }

    #[test]
    fn test_pages_processed_and_counts() {
        let mut tree = build_tree(&two_section_toc()).unwrap();
        let pages = boundary_pages();
        let map = PageMap::build(&tree, 3);
        let config = SegmenterConfig::default();

        assemble(&pages, &mut tree, &map, &config);

        let intro = tree.get("01").unwrap();
        assert_eq!(intro.pages_processed, vec![1, 2]);
        assert_eq!(intro.character_count, intro.text.chars().count());

        let body = tree.get("02").unwrap();
        assert_eq!(body.pages_processed, vec![2, 3]);
    }

    #[test]
    fn test_pages_walked_in_number_order() {
        let mut tree = build_tree(&two_section_toc()).unwrap();
        let mut pages = boundary_pages();
        pages.reverse(); // Emission order scrambled.
        let map = PageMap::build(&tree, 3);
        let config = SegmenterConfig::default();

        assemble(&pages, &mut tree, &map, &config);

        let body = tree.get("02").unwrap();
        assert_eq!(body.pages_processed, vec![2, 3]);
        assert!(body.text.ends_with("body continues"));
    }

    #[test]
    fn test_uncovered_page_is_counted() {
        let mut tree = build_tree(&two_section_toc()).unwrap();
        let mut pages = boundary_pages();
        pages.push(Page {
            page: 4,
            text: "orphan".to_string(),
            items: vec![],
        });
        let map = PageMap::build(&tree, 4);
        let config = SegmenterConfig::default();

        let stats = assemble(&pages, &mut tree, &map, &config);
        assert_eq!(stats.uncovered_pages, 1);
        for (_, node) in tree.iter() {
            assert!(!node.text.contains("orphan"));
        }
    }

    #[test]
    fn test_unanchored_heading_is_counted() {
        let mut toc = TocTable::new();
        toc.insert("01".to_string(), TocEntry::new("INTRO", 1, 1));
        let mut tree = build_tree(&toc).unwrap();
        let pages = vec![Page {
            page: 1,
            text: "COVER TITLE\n01. INTRO\nbody".to_string(),
            items: vec![
                PageItem::heading("COVER TITLE", 1, bbox_at(50.0)),
                PageItem::heading("01. INTRO", 1, bbox_at(200.0)),
                PageItem::heading("NOTES", 2, bbox_at(300.0)),
            ],
        }];
        let map = PageMap::build(&tree, 1);
        let config = SegmenterConfig::default();

        let stats = assemble(&pages, &mut tree, &map, &config);
        // "COVER TITLE" precedes any numbered heading; "NOTES" is anchored.
        assert_eq!(stats.unanchored_headings, 1);
    }

    #[test]
    fn test_text_trimmed_exactly_once() {
        let mut toc = TocTable::new();
        toc.insert("01".to_string(), TocEntry::new("A", 1, 1));
        let mut tree = build_tree(&toc).unwrap();
        let pages = vec![Page {
            page: 1,
            text: "  padded  ".to_string(),
            items: vec![],
        }];
        let map = PageMap::build(&tree, 1);
        let config = SegmenterConfig::default();

        assemble(&pages, &mut tree, &map, &config);

        let node = tree.get("01").unwrap();
        assert_eq!(node.text, "padded");
        assert_eq!(node.character_count, 6);
    }
}
