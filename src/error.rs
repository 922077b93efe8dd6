//! Error types for the screenplay parser.
//!
//! This module defines all error types that can occur while recovering screenplay
//! structure. Classification ambiguity is deliberately absent: a line that fits no
//! rule becomes an `Unknown` element, never an error.

/// Result type alias for screenplay parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during screenplay parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input kind or file extension the engine cannot handle
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Structural failure inside an authoritative tagged format
    #[error("{adapter} parse error: {reason}")]
    TaggedFormat {
        /// Adapter that rejected the input (e.g. "fdx", "archive")
        adapter: &'static str,
        /// Underlying cause
        reason: String,
    },

    /// Positioned-element extraction collaborator failed
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// OCR collaborator failed
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Positioned elements violate the reading-order precondition
    #[error("Elements out of reading order at index {index}: {reason}")]
    UnorderedInput {
        /// Index of the first offending element
        index: usize,
        /// What was violated
        reason: String,
    },

    /// Layout profile with unusable bands
    #[error("Invalid layout profile: {0}")]
    InvalidProfile(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 decoding error
    #[error("UTF-8 decoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
}

impl Error {
    /// Build a tagged-format error for the given adapter.
    pub fn tagged(adapter: &'static str, reason: impl Into<String>) -> Self {
        Error::TaggedFormat {
            adapter,
            reason: reason.into(),
        }
    }
}
