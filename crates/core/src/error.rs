//! Error types for hamus operations.
//!
//! This module defines the main error type [`HamusError`]. Only failures that
//! affect a whole batch surface here: a dataset missing required columns, an
//! unreadable input file, a resource that cannot be parsed. Problems with a
//! single text field of a single record never become errors; they degrade to
//! the sentinel value documented in [`crate::numeric`].
//!
//! # Example
//!
//! ```rust
//! use hamus_core::{Dataset, HamusError};
//!
//! let jsonl = r#"{"id": "1", "postText": ["Hello"]}"#;
//! match Dataset::from_jsonl_str(jsonl, None).and_then(|d| d.validate().map(|_| d)) {
//!     Err(HamusError::MissingColumns { missing }) => assert!(missing.contains(&"targetTitle".to_string())),
//!     other => panic!("unexpected {:?}", other.map(|d| d.len())),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for feature extraction operations.
#[derive(Error, Debug)]
pub enum HamusError {
    /// The dataset does not expose every required column.
    ///
    /// Raised once per batch, before any row is processed.
    #[error("Dataset does not contain all required columns (missing '{}')", missing.join("', '"))]
    MissingColumns { missing: Vec<String> },

    /// A line of a JSONL dataset could not be decoded into a record.
    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    /// Label factorization found more than two distinct classes.
    #[error("Expected a binary ground truth, found {} classes ({})", classes.len(), classes.join(", "))]
    TooManyClasses { classes: Vec<String> },

    /// A record produced a different feature key set than the first record.
    #[error("Record {row} produced a feature set inconsistent with the first record")]
    InconsistentFeatures { row: usize },

    /// Extraction was requested before a dataset was attached.
    #[error("No dataset defined, attach one with FeatureExtractor::set_dataset() first")]
    NoDataset,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A linguistic resource file could not be parsed.
    #[error("Resource error: {0}")]
    ResourceError(String),

    /// The text recognizer failed on an image.
    ///
    /// The media adapter absorbs this variant; it is only visible to callers
    /// that drive a [`crate::TextRecognizer`] directly.
    #[error("OCR failed: {0}")]
    OcrError(String),

    /// Standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding or encoding errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing errors.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for HamusError.
pub type Result<T> = std::result::Result<T, HamusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_display() {
        let err = HamusError::MissingColumns { missing: vec!["postText".to_string(), "targetTitle".to_string()] };
        let msg = err.to_string();
        assert!(msg.contains("'postText', 'targetTitle'"));
    }

    #[test]
    fn test_too_many_classes_display() {
        let err = HamusError::TooManyClasses {
            classes: vec!["clickbait".to_string(), "no-clickbait".to_string(), "maybe".to_string()],
        };
        assert!(err.to_string().contains("3 classes"));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_invalid_record_display() {
        let err = HamusError::InvalidRecord { line: 7, message: "expected value".to_string() };
        assert!(err.to_string().contains("line 7"));
    }
}
