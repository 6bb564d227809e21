//! Error types for the segmentation library.
//!
//! This module defines all error types that can occur while building the
//! section hierarchy and running the segmentation pipeline.

use std::path::PathBuf;

/// Result type alias for segmentation library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document segmentation.
///
/// Degraded-but-recoverable conditions (malformed headings, unresolvable
/// page ranges, failed boundary resolution) are *not* errors: they are
/// handled locally, logged, and surfaced through the coverage report and
/// the per-section `splitting_method` tag. Only conditions that make the
/// run ambiguous or impossible are represented here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two table-of-contents records share the same identifier.
    ///
    /// Ownership of pages and text would be ambiguous, so hierarchy
    /// construction aborts immediately.
    #[error("Duplicate section identifier in table of contents: '{identifier}'")]
    DuplicateIdentifier {
        /// The identifier that appeared more than once
        identifier: String,
    },

    /// A required input file does not exist.
    #[error("Input file not found: {path}")]
    MissingInput {
        /// Path that was looked up
        path: PathBuf,
    },

    /// An input file exists but does not decode as the expected structure.
    #[error("Malformed input file {path}: {source}")]
    MalformedInput {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying decode error
        source: serde_json::Error,
    },

    /// Failure serializing the output tree or report.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error at the pipeline boundaries.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identifier_error() {
        let err = Error::DuplicateIdentifier {
            identifier: "02.10".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Duplicate section identifier"));
        assert!(msg.contains("02.10"));
    }

    #[test]
    fn test_missing_input_error() {
        let err = Error::MissingInput {
            path: PathBuf::from("/tmp/pages.json"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("not found"));
        assert!(msg.contains("/tmp/pages.json"));
    }

    #[test]
    fn test_malformed_input_error() {
        let bad: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err = Error::MalformedInput {
            path: PathBuf::from("/tmp/toc.json"),
            source: bad.unwrap_err(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Malformed input file"));
        assert!(msg.contains("/tmp/toc.json"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
