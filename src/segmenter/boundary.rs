//! Boundary splitting for pages contested by exactly two sections.
//!
//! At a section boundary the outgoing section's declared end page and the
//! incoming section's declared start page are the same physical page. The
//! splitter looks for the heading item that opens the incoming section and
//! uses its y-coordinate as the cut line, so each side of the page lands in
//! the right section instead of the whole page being duplicated into both.
//!
//! Items sharing the cut heading's exact y-coordinate go to the incoming
//! section: the boundary belongs to what follows.

use crate::config::SegmenterConfig;
use crate::model::{ItemKind, Page, PageItem};
use crate::section::SectionNode;
use crate::segmenter::heading::parse_heading;
use crate::utils::safe_float_cmp;

/// Result of attempting to split a contested page.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryOutcome {
    /// The transition heading was located; the page partitions cleanly.
    Split {
        /// Text above the cut line, for the outgoing section
        outgoing_text: String,
        /// Text at or below the cut line, for the incoming section
        incoming_text: String,
    },
    /// No locatable transition heading; callers duplicate the full page.
    Fallback,
}

/// Decide which of two claimants is outgoing and which is incoming.
///
/// The incoming section is the one whose declared start page equals the
/// contested page; the outgoing one ends there. Returns `None` when the
/// ranges do not form that pattern (the caller falls back to duplication).
pub fn resolve_roles<'a>(
    page: u32,
    first: &'a SectionNode,
    second: &'a SectionNode,
) -> Option<(&'a SectionNode, &'a SectionNode)> {
    let first_starts = first.start_page == Some(page);
    let second_starts = second.start_page == Some(page);
    match (first_starts, second_starts) {
        // Exactly one claimant starts here; the other is outgoing.
        (false, true) => Some((first, second)),
        (true, false) => Some((second, first)),
        _ => None,
    }
}

/// Split a contested page's items at the incoming section's heading.
///
/// Only items with bounding boxes participate: without coordinates an item
/// cannot be positioned against the cut line, and emission order is not
/// ground truth. If the incoming section's heading item cannot be located
/// among the positioned headings, returns [`BoundaryOutcome::Fallback`].
pub fn split_contested_page(
    page: &Page,
    outgoing: &SectionNode,
    incoming: &SectionNode,
    config: &SegmenterConfig,
) -> BoundaryOutcome {
    let mut positioned: Vec<&PageItem> =
        page.items.iter().filter(|item| item.b_box.is_some()).collect();
    positioned.sort_by(|a, b| {
        safe_float_cmp(a.y().unwrap_or(f32::MAX), b.y().unwrap_or(f32::MAX))
    });

    // The cut line: topmost heading item whose parsed number matches the
    // incoming identifier.
    let cut_y = positioned
        .iter()
        .filter(|item| item.kind == ItemKind::Heading)
        .filter(|item| {
            parse_heading(&item.value)
                .map(|h| h.number == incoming.identifier)
                .unwrap_or(false)
        })
        .filter_map(|item| item.y())
        .min_by(|a, b| safe_float_cmp(*a, *b));

    let Some(cut_y) = cut_y else {
        log::warn!(
            "Page {}: no heading item matching incoming section '{}'; duplicating full page \
             into '{}' and '{}'",
            page.page,
            incoming.identifier,
            outgoing.identifier,
            incoming.identifier
        );
        return BoundaryOutcome::Fallback;
    };

    let (above, below): (Vec<&PageItem>, Vec<&PageItem>) = positioned
        .into_iter()
        .partition(|item| item.y().map(|y| y < cut_y).unwrap_or(false));

    log::debug!(
        "Page {}: split at y={} between '{}' and '{}'",
        page.page,
        cut_y,
        outgoing.identifier,
        incoming.identifier
    );

    BoundaryOutcome::Split {
        outgoing_text: render_fragment(&above, config),
        incoming_text: render_fragment(&below, config),
    }
}

/// Concatenate the textual content of an item group.
///
/// Unnumbered headings are folded in with the markdown-style marker; table,
/// image and chart regions carry no prose and are skipped.
fn render_fragment(items: &[&PageItem], config: &SegmenterConfig) -> String {
    let parts: Vec<String> = items
        .iter()
        .filter(|item| item.kind.is_textual())
        .filter(|item| !item.value.trim().is_empty())
        .map(|item| {
            let value = item.value.trim();
            if item.kind == ItemKind::Heading && parse_heading(value).is_none() {
                format!("{}{}", config.unnumbered_marker, value)
            } else {
                value.to_string()
            }
        })
        .collect();
    parts.join(&config.paragraph_separator)
}
