//! Collaborator interfaces consumed by the engine.
//!
//! The engine does not read PDFs or run OCR itself. A [`PositionedExtractor`]
//! turns a document into positioned fragments, and a [`TextRecognizer`] turns it
//! into plain text per page. Both are called once per document, before the
//! classification pass begins.
//!
//! Extractors receive a filesystem path as well as the buffer. [`TempArtifact`]
//! materializes the buffer to a temporary file and removes it on every exit path.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::layout::PositionedElement;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Document-level metadata reported by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Creating application
    pub creator: Option<String>,
    /// Producing library
    pub producer: Option<String>,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
}

/// Output of a positioned extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Fragments in reading order
    pub elements: Vec<PositionedElement>,
    /// Document metadata
    pub info: DocumentInfo,
    /// Number of pages
    pub total_pages: u32,
}

impl Extraction {
    /// Whether any fragment carries text.
    pub fn has_text(&self) -> bool {
        self.elements.iter().any(|e| !e.is_blank())
    }
}

/// Turns a document into positioned text fragments.
///
/// Implementations must return fragments in reading order: pages ascending and,
/// within a page, top to bottom then left to right. The engine never sorts.
pub trait PositionedExtractor: Send + Sync {
    /// Extract positioned fragments.
    fn extract(&self, document: &Document, path: &Path) -> Result<Extraction>;

    /// Extract unpositioned text, used when positioned extraction fails.
    fn extract_text(&self, _document: &Document, _path: &Path) -> Result<String> {
        Err(Error::Extraction("plain-text extraction not supported".to_string()))
    }
}

/// Optical character recognition over a document's pages.
pub trait TextRecognizer: Send + Sync {
    /// Recognize text, one string per page.
    fn recognize(&self, document: &Document, language_hint: &str) -> Result<Vec<String>>;
}

/// A document buffer written to a temporary file.
///
/// The file is removed by [`close`](TempArtifact::close) or on drop, whichever
/// comes first. Removal failures are logged and never returned.
#[derive(Debug)]
pub struct TempArtifact {
    file: Option<NamedTempFile>,
    path: PathBuf,
}

impl TempArtifact {
    /// Write the document to a fresh temporary file, keeping its extension.
    pub fn materialize(document: &Document) -> Result<Self> {
        let mut file = match document.extension() {
            Some(ext) => NamedTempFile::with_suffix(format!(".{}", ext))?,
            None => NamedTempFile::new()?,
        };
        file.write_all(document.bytes())?;
        file.flush()?;

        let path = file.path().to_path_buf();
        log::debug!("Materialized {} bytes at {}", document.bytes().len(), path.display());
        Ok(Self { file: Some(file), path })
    }

    /// Path of the temporary file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now.
    pub fn close(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.close() {
                log::warn!("Failed to remove temporary file {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_removed_on_close() {
        let doc = Document::from_bytes(b"%PDF-1.4 test".to_vec()).with_name("script.pdf");
        let artifact = TempArtifact::materialize(&doc).unwrap();
        let path = artifact.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), doc.bytes());

        artifact.close();
        assert!(!path.exists());
    }

    #[test]
    fn test_artifact_removed_on_drop() {
        let doc = Document::from_bytes(vec![1, 2, 3]);
        let path = {
            let artifact = TempArtifact::materialize(&doc).unwrap();
            artifact.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_default_extract_text_fails() {
        struct Nothing;
        impl PositionedExtractor for Nothing {
            fn extract(&self, _document: &Document, _path: &Path) -> Result<Extraction> {
                Ok(Extraction::default())
            }
        }

        let doc = Document::from_bytes(Vec::new());
        let err = Nothing.extract_text(&doc, Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
        assert!(!Nothing.extract(&doc, Path::new("/nonexistent")).unwrap().has_text());
    }
}
