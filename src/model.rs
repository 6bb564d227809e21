//! Input data model: pages and layout items as produced by the upstream
//! OCR/parse stage.
//!
//! Pages are read-only once deserialized; the pipeline never mutates them.
//! Item order is whatever the layout pass emitted — usually top-to-bottom,
//! but not guaranteed, which is why boundary logic sorts by y-coordinate
//! instead of trusting the sequence.

use crate::geometry::BBox;
use serde::{Deserialize, Serialize};

/// The type of a layout item on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A detected section title, with a declared level
    Heading,
    /// A regular text block
    Text,
    /// A table region
    Table,
    /// An image region
    Image,
    /// A chart region
    Chart,
}

impl ItemKind {
    /// Whether this item kind carries text that belongs in section content.
    ///
    /// Tables, images and charts are positional regions only; their `value`
    /// is not prose and is excluded from aggregated section text.
    pub fn is_textual(&self) -> bool {
        matches!(self, ItemKind::Heading | ItemKind::Text)
    }
}

/// A single typed element on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageItem {
    /// Item type as reported by the layout pass
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Raw string value (heading text, text block content, ...)
    #[serde(default)]
    pub value: String,

    /// Declared heading level (1..6), present for headings only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lvl: Option<u8>,

    /// Bounding box in page-relative units; the layout pass may omit it
    #[serde(rename = "bBox", default, skip_serializing_if = "Option::is_none")]
    pub b_box: Option<BBox>,
}

impl PageItem {
    /// Create a heading item.
    pub fn heading(value: impl Into<String>, lvl: u8, b_box: Option<BBox>) -> Self {
        Self {
            kind: ItemKind::Heading,
            value: value.into(),
            lvl: Some(lvl),
            b_box,
        }
    }

    /// Create a text item.
    pub fn text(value: impl Into<String>, b_box: Option<BBox>) -> Self {
        Self {
            kind: ItemKind::Text,
            value: value.into(),
            lvl: None,
            b_box,
        }
    }

    /// The item's y-coordinate, if it carries a bounding box.
    pub fn y(&self) -> Option<f32> {
        self.b_box.map(|b| b.y)
    }
}

/// A single page of OCR/layout output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number, unique across the document
    pub page: u32,

    /// Full extracted text of the page
    #[serde(default)]
    pub text: String,

    /// Ordered layout items as emitted upstream
    #[serde(default)]
    pub items: Vec<PageItem>,
}

impl Page {
    /// Number of Unicode scalar values in the page text.
    ///
    /// Character counting is done in scalar values, not bytes, so the
    /// coverage ratio is not skewed on non-ASCII documents.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// The complete parsed document: every page of OCR/layout output.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// All pages, in upstream emission order
    pub pages: Vec<Page>,
}

/// On-disk shape of the parsed document. Current upstream runs wrap the
/// page list in `{ "pages": [...] }`; older runs emitted a bare array.
/// Both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum PagesOnDisk {
    Wrapped { pages: Vec<Page> },
    Bare(Vec<Page>),
}

impl ParsedDocument {
    /// Create from an already-deserialized page list.
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Decode from a JSON string (wrapped or bare page array).
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let on_disk: PagesOnDisk = serde_json::from_str(json)?;
        let pages = match on_disk {
            PagesOnDisk::Wrapped { pages } => pages,
            PagesOnDisk::Bare(pages) => pages,
        };
        Ok(Self { pages })
    }

    /// The highest page number present, or 0 for an empty document.
    pub fn max_page(&self) -> u32 {
        self.pages.iter().map(|p| p.page).max().unwrap_or(0)
    }

    /// Total source characters over all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(Page::char_count).sum()
    }
}
