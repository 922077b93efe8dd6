//! Input documents and source kinds.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which engine a document is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Positioned text fragments from an extraction collaborator (PDF)
    Positioned,
    /// Final Draft XML
    TaggedXml,
    /// Zip archive with class-tagged script markup (Celtx)
    TaggedArchive,
    /// Plain text
    PlainText,
}

impl SourceKind {
    /// Infer the source kind from a file extension (case-insensitive, dot optional).
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::SourceKind;
    ///
    /// assert_eq!(SourceKind::from_extension("PDF").unwrap(), SourceKind::Positioned);
    /// assert_eq!(SourceKind::from_extension(".fdx").unwrap(), SourceKind::TaggedXml);
    /// assert_eq!(SourceKind::from_extension("celtx").unwrap(), SourceKind::TaggedArchive);
    /// assert_eq!(SourceKind::from_extension("fountain").unwrap(), SourceKind::PlainText);
    /// assert!(SourceKind::from_extension("docx").is_err());
    /// ```
    pub fn from_extension(extension: &str) -> Result<Self> {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Ok(SourceKind::Positioned),
            "fdx" => Ok(SourceKind::TaggedXml),
            "celtx" => Ok(SourceKind::TaggedArchive),
            "txt" | "fountain" | "spmd" => Ok(SourceKind::PlainText),
            _ => Err(Error::UnsupportedFormat(if ext.is_empty() {
                "(no extension)".to_string()
            } else {
                ext
            })),
        }
    }
}

/// A document buffer plus the name it came with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    bytes: Vec<u8>,
    name: Option<String>,
}

impl Document {
    /// Wrap a buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            name: None,
        }
    }

    /// Wrap a string.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_bytes(text.into().into_bytes())
    }

    /// Attach a file name (used for extension-based routing).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Read a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mut document = Self::from_bytes(bytes);
        document.name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        log::debug!("Read {} bytes from {}", document.bytes.len(), path.display());
        Ok(document)
    }

    /// Raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File name, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Lower-cased file extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }

    /// Source kind implied by the file name.
    pub fn source_kind(&self) -> Result<SourceKind> {
        SourceKind::from_extension(&self.extension().unwrap_or_default())
    }

    /// Content as UTF-8 text, byte-order mark removed.
    pub fn text(&self) -> Result<&str> {
        let text = std::str::from_utf8(&self.bytes)?;
        Ok(text.trim_start_matches('\u{feff}'))
    }
}
