//! Page-to-section range mapping.
//!
//! For every page in the universe 1..=max, the ordered list of section
//! identifiers whose declared [start, end] range contains that page. Ranges
//! deliberately overlap at chapter/section boundaries, so multi-claimant
//! pages are expected, not an error.

use crate::section::SectionTree;

/// How many sections claim a page, and what that means downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageClaim {
    /// No section's range contains this page
    Uncovered,
    /// Exactly one claimant: the full page text belongs to it
    Exclusive,
    /// Exactly two claimants: routed to boundary splitting
    Contested,
    /// Three or more claimants: full-page duplication, no splitting
    Crowded,
}

/// Page-number → claimant-identifier mapping over a fixed page universe.
#[derive(Debug, Clone)]
pub struct PageMap {
    /// claims[i] holds the claimants of page i+1, in arena insertion order
    claims: Vec<Vec<String>>,
}

impl PageMap {
    /// Build the mapping for pages 1..=max_page.
    ///
    /// Claimant lists preserve the arena's insertion order, which makes the
    /// whole pipeline deterministic for identical inputs.
    pub fn build(tree: &SectionTree, max_page: u32) -> Self {
        let mut claims = Vec::with_capacity(max_page as usize);
        for page in 1..=max_page {
            let claimants: Vec<String> = tree
                .iter()
                .filter(|(_, node)| node.claims_page(page))
                .map(|(id, _)| id.clone())
                .collect();
            claims.push(claimants);
        }
        let contested = claims.iter().filter(|c| c.len() >= 2).count();
        log::debug!(
            "Mapped {} pages, {} with multiple claimants",
            claims.len(),
            contested
        );
        Self { claims }
    }

    /// The page universe size.
    pub fn max_page(&self) -> u32 {
        self.claims.len() as u32
    }

    /// Claimants of a page, in arena insertion order. Empty for pages
    /// outside the universe.
    pub fn claimants(&self, page: u32) -> &[String] {
        if page == 0 {
            return &[];
        }
        self.claims
            .get((page - 1) as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Classify a page by claimant count.
    pub fn classify(&self, page: u32) -> PageClaim {
        match self.claimants(page).len() {
            0 => PageClaim::Uncovered,
            1 => PageClaim::Exclusive,
            2 => PageClaim::Contested,
            _ => PageClaim::Crowded,
        }
    }

    /// Pages with no claimant, ascending.
    pub fn uncovered_pages(&self) -> Vec<u32> {
        self.claims
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| (i + 1) as u32)
            .collect()
    }

    /// Sum of claimant counts over all pages (each page-to-section
    /// assignment counts once).
    pub fn total_assignments(&self) -> usize {
        self.claims.iter().map(Vec::len).sum()
    }

    /// Number of pages with at least one claimant.
    pub fn claimed_page_count(&self) -> usize {
        self.claims.iter().filter(|c| !c.is_empty()).count()
    }
}
