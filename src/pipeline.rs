//! The segmentation pipeline: stage wiring and boundary I/O.
//!
//! Stages run strictly in sequence, each fully consuming its input before
//! the next starts; there is no concurrency and no feedback loop. The
//! pipeline always completes and emits an output tree as long as the input
//! files parse — every degraded condition degrades toward conservative
//! over-inclusion, visible in the coverage report.

use crate::config::SegmenterConfig;
use crate::error::{Error, Result};
use crate::model::ParsedDocument;
use crate::section::{SectionTree, SplittingMethod};
use crate::segmenter::{
    assemble, audit, build_tree, normalize_heading_levels, scan_heading_hierarchy, AssemblyStats,
    CoverageReport, HierarchyDiagnostics, LevelCorrections, PageMap,
};
use crate::toc::TocTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One section in the output mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Section title
    pub title: String,
    /// Declared start page, absent for rangeless records
    pub start_page: Option<u32>,
    /// Declared end page, absent for rangeless records
    pub end_page: Option<u32>,
    /// Aggregated section text
    pub text: String,
    /// Unicode scalar count of `text`
    pub character_count: usize,
    /// Pages whose content landed in this section
    pub pages_processed: Vec<u32>,
    /// How the section's pages were carved
    pub splitting_method: SplittingMethod,
}

/// Everything a pipeline run produces.
#[derive(Debug, Clone)]
pub struct SegmentationOutput {
    /// identifier → section record, in TOC declaration order
    pub sections: IndexMap<String, SectionRecord>,
    /// Diagnostic coverage report
    pub report: CoverageReport,
    /// Page-walk counters
    pub stats: AssemblyStats,
    /// Heading-level corrections applied before assembly
    pub corrections: LevelCorrections,
    /// Heading-structure diagnostics
    pub diagnostics: HierarchyDiagnostics,
}

impl SegmentationOutput {
    /// Serialize the section mapping as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.sections)?)
    }

    /// Write the section mapping to a file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Write the coverage report to a file.
    pub fn write_report_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(&self.report)?)?;
        Ok(())
    }
}

/// The segmentation pipeline.
///
/// # Example
///
/// ```
/// use doc_segmenter::model::{Page, ParsedDocument};
/// use doc_segmenter::pipeline::SegmentationPipeline;
/// use doc_segmenter::toc::{TocEntry, TocTable};
///
/// let mut toc = TocTable::new();
/// toc.insert("01".to_string(), TocEntry::new("INTRO", 1, 1));
///
/// let document = ParsedDocument::new(vec![Page {
///     page: 1,
///     text: "introduction text".to_string(),
///     items: vec![],
/// }]);
///
/// let pipeline = SegmentationPipeline::new();
/// let output = pipeline.run(document, &toc).unwrap();
/// assert_eq!(output.sections["01"].text, "introduction text");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SegmentationPipeline {
    config: SegmenterConfig,
}

impl SegmentationPipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self {
            config: SegmenterConfig::default(),
        }
    }

    /// Create a pipeline with a custom configuration.
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline on in-memory inputs.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateIdentifier`] when the TOC is ambiguous. All other
    /// degraded conditions recover locally.
    pub fn run(&self, document: ParsedDocument, toc: &TocTable) -> Result<SegmentationOutput> {
        let mut pages = document.pages;

        let corrections = normalize_heading_levels(&mut pages);
        let diagnostics = scan_heading_hierarchy(&pages);

        let mut tree = build_tree(toc)?;
        let max_page = pages.iter().map(|p| p.page).max().unwrap_or(0);
        let map = PageMap::build(&tree, max_page);

        let stats = assemble(&pages, &mut tree, &map, &self.config);
        let report = audit(&tree, &pages, &map, &self.config);

        Ok(SegmentationOutput {
            sections: to_records(&tree),
            report,
            stats,
            corrections,
            diagnostics,
        })
    }

    /// Run the pipeline on JSON input files.
    ///
    /// # Errors
    ///
    /// [`Error::MissingInput`] when either file is absent,
    /// [`Error::MalformedInput`] when either file fails to decode, plus
    /// everything [`SegmentationPipeline::run`] can return.
    pub fn run_files(
        &self,
        pages_path: impl AsRef<Path>,
        toc_path: impl AsRef<Path>,
    ) -> Result<SegmentationOutput> {
        let document = load_pages(pages_path)?;
        let toc = load_toc(toc_path)?;
        self.run(document, &toc)
    }
}

/// Load the page-level OCR/parse output from a JSON file.
pub fn load_pages(path: impl AsRef<Path>) -> Result<ParsedDocument> {
    let path = path.as_ref();
    let raw = read_input(path)?;
    let document = ParsedDocument::from_json_str(&raw).map_err(|source| Error::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded {} pages from {}", document.pages.len(), path.display());
    Ok(document)
}

/// Load the table-of-contents structure from a JSON file.
pub fn load_toc(path: impl AsRef<Path>) -> Result<TocTable> {
    let path = path.as_ref();
    let raw = read_input(path)?;
    let toc: TocTable = serde_json::from_str(&raw).map_err(|source| Error::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded {} top-level TOC records from {}", toc.len(), path.display());
    Ok(toc)
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::MissingInput {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Project the populated tree into the output mapping, preserving arena
/// insertion order.
fn to_records(tree: &SectionTree) -> IndexMap<String, SectionRecord> {
    tree.iter()
        .map(|(identifier, node)| {
            (
                identifier.clone(),
                SectionRecord {
                    title: node.title.clone(),
                    start_page: node.start_page,
                    end_page: node.end_page,
                    text: node.text.clone(),
                    character_count: node.character_count,
                    pages_processed: node.pages_processed.clone(),
                    splitting_method: node.splitting_method,
                },
            )
        })
        .collect()
}
