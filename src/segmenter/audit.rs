//! Coverage auditing: read-only cross-check of the assembled tree against
//! the original flat OCR output.
//!
//! The auditor reports, it never repairs. Structural errors show up as a
//! low coverage ratio (text lost), a duplication factor above 1.0 (text
//! assigned to several sections), or uncovered pages (ranges with holes).

use crate::config::SegmenterConfig;
use crate::model::Page;
use crate::section::SectionTree;
use crate::segmenter::page_map::PageMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory verdict bands over the coverage ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Coverage ratio above the excellent threshold
    Excellent,
    /// Coverage ratio above the acceptable threshold
    Acceptable,
    /// Anything lower: the structure likely has holes
    NeedsInvestigation,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Excellent => write!(f, "excellent"),
            Verdict::Acceptable => write!(f, "acceptable"),
            Verdict::NeedsInvestigation => write!(f, "needs investigation"),
        }
    }
}

/// Diagnostic coverage report over a finished pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Sum of page text lengths over all input pages
    pub total_source_chars: usize,
    /// Sum of character counts over all section nodes
    pub total_assigned_chars: usize,
    /// assigned / source; 0.0 for an empty document
    pub coverage_ratio: f64,
    /// Pages claimed by no section, ascending
    pub uncovered_pages: Vec<u32>,
    /// Page-to-section assignments divided by uniquely claimed pages;
    /// 1.0 means no duplication
    pub duplication_factor: f64,
    /// Human-readable band for the coverage ratio
    pub verdict: Verdict,
}

/// Audit the assembled tree against the original page-level output.
///
/// Pure function of its inputs; nothing is mutated and nothing feeds back
/// into the pipeline.
pub fn audit(
    tree: &SectionTree,
    pages: &[Page],
    map: &PageMap,
    config: &SegmenterConfig,
) -> CoverageReport {
    let total_source_chars: usize = pages.iter().map(Page::char_count).sum();
    let total_assigned_chars: usize = tree.iter().map(|(_, node)| node.character_count).sum();

    let coverage_ratio = if total_source_chars > 0 {
        total_assigned_chars as f64 / total_source_chars as f64
    } else {
        0.0
    };

    let claimed = map.claimed_page_count();
    let duplication_factor = if claimed > 0 {
        map.total_assignments() as f64 / claimed as f64
    } else {
        0.0
    };

    let verdict = if coverage_ratio > config.excellent_threshold {
        Verdict::Excellent
    } else if coverage_ratio > config.acceptable_threshold {
        Verdict::Acceptable
    } else {
        Verdict::NeedsInvestigation
    };

    let uncovered_pages = map.uncovered_pages();
    if !uncovered_pages.is_empty() {
        log::warn!("{} pages claimed by no section: {:?}", uncovered_pages.len(), uncovered_pages);
    }
    log::info!(
        "Coverage {:.1}% ({} / {} chars), duplication factor {:.2}: {}",
        coverage_ratio * 100.0,
        total_assigned_chars,
        total_source_chars,
        duplication_factor,
        verdict
    );

    CoverageReport {
        total_source_chars,
        total_assigned_chars,
        coverage_ratio,
        uncovered_pages,
        duplication_factor,
        verdict,
    }
}
