//! Configuration for the segmentation pipeline.

/// Segmentation configuration.
///
/// # Example
///
/// ```
/// use doc_segmenter::config::SegmenterConfig;
///
/// let config = SegmenterConfig::new()
///     .with_paragraph_separator("\n\n")
///     .with_excellent_threshold(0.97);
/// assert_eq!(config.excellent_threshold, 0.97);
/// ```
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Separator appended after every text fragment assigned to a section.
    pub paragraph_separator: String,

    /// Marker prefixed to unnumbered headings folded into section content.
    pub unnumbered_marker: String,

    /// Coverage ratio above which the audit verdict is "excellent".
    pub excellent_threshold: f64,

    /// Coverage ratio above which the audit verdict is "acceptable".
    pub acceptable_threshold: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmenterConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self {
            paragraph_separator: "\n\n".to_string(),
            unnumbered_marker: "### ".to_string(),
            excellent_threshold: 0.95,
            acceptable_threshold: 0.85,
        }
    }

    /// Set the separator appended after each assigned fragment.
    pub fn with_paragraph_separator(mut self, sep: impl Into<String>) -> Self {
        self.paragraph_separator = sep.into();
        self
    }

    /// Set the marker prefixed to unnumbered headings.
    pub fn with_unnumbered_marker(mut self, marker: impl Into<String>) -> Self {
        self.unnumbered_marker = marker.into();
        self
    }

    /// Set the "excellent" coverage threshold.
    pub fn with_excellent_threshold(mut self, threshold: f64) -> Self {
        self.excellent_threshold = threshold;
        self
    }

    /// Set the "acceptable" coverage threshold.
    pub fn with_acceptable_threshold(mut self, threshold: f64) -> Self {
        self.acceptable_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SegmenterConfig::default();
        assert_eq!(config.paragraph_separator, "\n\n");
        assert_eq!(config.unnumbered_marker, "### ");
        assert_eq!(config.excellent_threshold, 0.95);
        assert_eq!(config.acceptable_threshold, 0.85);
    }

    #[test]
    fn test_builder_methods() {
        let config = SegmenterConfig::new()
            .with_paragraph_separator("\n")
            .with_unnumbered_marker("## ");
        assert_eq!(config.paragraph_separator, "\n");
        assert_eq!(config.unnumbered_marker, "## ");
    }
}
