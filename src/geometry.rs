//! Geometric primitives for page layout positions.
//!
//! The upstream layout pass reports every page item with a bounding box in
//! page-relative units. Boundary disambiguation works exclusively on these
//! coordinates — emission order is not trusted.

use serde::{Deserialize, Serialize};

/// A bounding box in page-relative units.
///
/// Field names match the wire format of the upstream layout pass
/// (`bBox: { x, y, w, h }`). The y axis grows top to bottom, so a smaller
/// `y` means closer to the top of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// X coordinate of the top-left corner
    pub x: f32,
    /// Y coordinate of the top-left corner
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl BBox {
    /// Create a new bounding box.
    ///
    /// # Examples
    ///
    /// ```
    /// use doc_segmenter::geometry::BBox;
    ///
    /// let bbox = BBox::new(10.0, 400.0, 500.0, 24.0);
    /// assert_eq!(bbox.y, 400.0);
    /// ```
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_bottom() {
        let bbox = BBox::new(0.0, 100.0, 50.0, 20.0);
        assert_eq!(bbox.bottom(), 120.0);
    }

    #[test]
    fn test_bbox_wire_format() {
        let bbox: BBox = serde_json::from_str(r#"{"x":1.0,"y":2.0,"w":3.0,"h":4.0}"#).unwrap();
        assert_eq!(bbox, BBox::new(1.0, 2.0, 3.0, 4.0));
    }
}
