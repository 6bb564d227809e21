//! Numbered-heading recognition and heading-level normalization.
//!
//! Technical documents in this corpus number their structure with groups of
//! two-or-more digits separated by dots: "01. SITE WORKS", "02.10. WALLS",
//! "02.10.01. Masonry". The parser extracts that numeric identifier, the
//! title and the hierarchy level. Heading strings without such a prefix are
//! *unnumbered headings* — they never create tree nodes and are folded into
//! the content of the nearest open section instead.
//!
//! Upstream layout passes routinely misreport heading levels (everything
//! tagged level 1). [`normalize_heading_levels`] rewrites declared levels
//! from the parsed numbering before any splitting happens, and
//! [`scan_heading_hierarchy`] reports level jumps left over after that.

use crate::model::{ItemKind, Page};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    /// One or more groups of 2+ digits separated by dots, an optional
    /// trailing dot, whitespace, then the title.
    static ref NUMBERED_HEADING: Regex =
        Regex::new(r"^(\d{2,}(?:\.\d{2,})*)\.?\s+(.*)$").expect("valid heading regex");
}

/// A successfully parsed numbered heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeading {
    /// The numeric identifier, e.g. "02.10.01"
    pub number: String,
    /// The title text after the number
    pub title: String,
    /// Hierarchy level: count of dot separators + 1
    pub level: u8,
}

/// Parse a raw heading string into (number, title, level).
///
/// Returns `None` for strings without a numbered prefix — the caller treats
/// those as unnumbered headings.
///
/// # Examples
///
/// ```
/// use doc_segmenter::segmenter::heading::parse_heading;
///
/// let h = parse_heading("02.10.01 TITLE").unwrap();
/// assert_eq!(h.number, "02.10.01");
/// assert_eq!(h.title, "TITLE");
/// assert_eq!(h.level, 3);
///
/// assert!(parse_heading("GENERAL NOTES").is_none());
/// ```
pub fn parse_heading(raw: &str) -> Option<ParsedHeading> {
    let caps = NUMBERED_HEADING.captures(raw.trim())?;
    let number = caps[1].to_string();
    let title = caps[2].trim().to_string();
    let level = (number.matches('.').count() + 1) as u8;
    Some(ParsedHeading {
        number,
        title,
        level,
    })
}

/// Summary of heading-level corrections applied to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCorrections {
    /// Total number of heading items whose level was rewritten
    pub total: usize,
    /// Correction counts keyed by (declared level, corrected level)
    pub by_transition: BTreeMap<(u8, u8), usize>,
}

/// Rewrite declared heading levels from parsed numbering.
///
/// For every heading item whose value parses as a numbered heading, the
/// declared `lvl` is replaced by the level derived from the numeric
/// identifier when the two disagree. Unnumbered headings keep whatever the
/// layout pass declared.
pub fn normalize_heading_levels(pages: &mut [Page]) -> LevelCorrections {
    let mut corrections = LevelCorrections::default();

    for page in pages.iter_mut() {
        for item in page.items.iter_mut() {
            if item.kind != ItemKind::Heading {
                continue;
            }
            let Some(parsed) = parse_heading(&item.value) else {
                continue;
            };
            let declared = item.lvl.unwrap_or(1);
            if declared != parsed.level {
                log::debug!(
                    "Page {}: heading '{}' level {} -> {}",
                    page.page,
                    item.value,
                    declared,
                    parsed.level
                );
                item.lvl = Some(parsed.level);
                corrections.total += 1;
                *corrections
                    .by_transition
                    .entry((declared, parsed.level))
                    .or_insert(0) += 1;
            }
        }
    }

    if corrections.total > 0 {
        log::info!("Normalized {} heading levels from numbering", corrections.total);
    }
    corrections
}

/// A suspicious level jump between consecutive headings on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelJump {
    /// Page on which the jump occurs
    pub page: u32,
    /// Level of the earlier heading
    pub from_level: u8,
    /// Level of the later heading
    pub to_level: u8,
    /// Value of the earlier heading
    pub from_value: String,
    /// Value of the later heading
    pub to_value: String,
}

/// Read-only diagnostics over the heading structure of a document.
#[derive(Debug, Clone, Default)]
pub struct HierarchyDiagnostics {
    /// Heading counts per level
    pub level_counts: BTreeMap<u8, usize>,
    /// Jumps of more than one level between consecutive headings
    pub jumps: Vec<LevelJump>,
}

/// Scan the heading sequence for level distribution and hierarchy jumps.
///
/// A jump of more than one level downward (e.g. level 1 directly to level 4)
/// usually means upstream misdetection survived normalization. Diagnostic
/// only; nothing is mutated.
pub fn scan_heading_hierarchy(pages: &[Page]) -> HierarchyDiagnostics {
    let mut diag = HierarchyDiagnostics::default();

    for page in pages {
        let mut prev: Option<(&str, u8)> = None;
        for item in &page.items {
            if item.kind != ItemKind::Heading {
                continue;
            }
            let level = item.lvl.unwrap_or(1);
            *diag.level_counts.entry(level).or_insert(0) += 1;

            if let Some((prev_value, prev_level)) = prev {
                if level > prev_level + 1 {
                    log::warn!(
                        "Page {}: heading level jump {} -> {} ('{}' -> '{}')",
                        page.page,
                        prev_level,
                        level,
                        prev_value,
                        item.value
                    );
                    diag.jumps.push(LevelJump {
                        page: page.page,
                        from_level: prev_level,
                        to_level: level,
                        from_value: prev_value.to_string(),
                        to_value: item.value.clone(),
                    });
                }
            }
            prev = Some((item.value.as_str(), level));
        }
    }

    diag
}
