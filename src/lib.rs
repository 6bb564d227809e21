//! # Doc Segmenter
//!
//! Reconstructs the logical structure of scanned technical documents from
//! page-level OCR/layout output.
//!
//! The input is a flat sequence of pages — each with its extracted text and
//! positioned layout items — plus a detected table of contents declaring
//! chapters and nested sections with page ranges. The output is a populated
//! section tree in which every node carries exactly the span of source text
//! that belongs to it.
//!
//! ## Pipeline
//!
//! - **Heading parsing**: numbered headings ("02.10.01 TITLE") yield an
//!   identifier, a title and a hierarchy level; level misdetections from
//!   the layout pass are normalized from the numbering.
//! - **Hierarchy construction**: the TOC is flattened into an arena of
//!   section nodes keyed by identifier, wired parent-to-child by
//!   identifier prefix.
//! - **Page-range mapping**: every page resolves to the ordered set of
//!   sections whose declared range contains it; overlaps at section
//!   boundaries are expected.
//! - **Boundary splitting**: a page shared by exactly two sections is split
//!   at the y-coordinate of the incoming section's heading item instead of
//!   being duplicated into both.
//! - **Content assembly**: one ordered page walk appends each page's text
//!   (whole or split) to the claiming sections.
//! - **Coverage audit**: the finished tree is cross-checked against the
//!   flat input — coverage ratio, uncovered pages, duplication factor.
//!
//! Degraded conditions (unparseable headings, missing ranges, unlocatable
//! boundaries) never abort the run: they degrade to conservative
//! over-inclusion and stay visible in the coverage report.
//!
//! ## Quick Start
//!
//! ```ignore
//! use doc_segmenter::pipeline::SegmentationPipeline;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = SegmentationPipeline::new();
//!     let output = pipeline.run_files("parsed_pages.json", "chapters.json")?;
//!
//!     output.write_json("chapters_with_text.json")?;
//!     println!(
//!         "coverage {:.1}%, duplication factor {:.2}",
//!         output.report.coverage_ratio * 100.0,
//!         output.report.duplication_factor
//!     );
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Input data model
pub mod geometry;
pub mod model;
pub mod toc;

// Section tree
pub mod section;

// Segmentation stages
pub mod segmenter;

// Pipeline wiring and boundary I/O
pub mod pipeline;

// Configuration
pub mod config;

// Re-exports
pub use config::SegmenterConfig;
pub use error::{Error, Result};
pub use geometry::BBox;
pub use model::{ItemKind, Page, PageItem, ParsedDocument};
pub use pipeline::{SectionRecord, SegmentationOutput, SegmentationPipeline};
pub use section::{SectionNode, SectionTree, SplittingMethod};
pub use segmenter::{AssemblyStats, CoverageReport, PageMap, Verdict};
pub use toc::{TocEntry, TocTable};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so sorting by y-coordinate never panics on malformed
    /// bounding boxes.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => {
                // Both are normal numbers, safe to unwrap
                a.partial_cmp(&b).unwrap()
            },
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "doc_segmenter");
    }
}
