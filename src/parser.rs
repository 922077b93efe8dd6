//! Engine entry point.
//!
//! [`ScreenplayParser::parse`] routes a document to one of four engines by
//! [`SourceKind`]:
//!
//! - `Positioned`: extraction collaborator → profile detection → line
//!   reconstruction → band classification → aggregation
//! - `TaggedXml` / `TaggedArchive`: the tagged adapters, whose structural errors
//!   are returned as-is
//! - `PlainText`: the fallback text engine
//!
//! When positioned extraction fails or yields no text, the parser degrades to
//! plain-text extraction, then OCR, then the document's own bytes read as text.
//! The step that finally succeeded is recorded in the screenplay metadata.

use crate::adapters::{ArchiveAdapter, ArchiveDecoder, FdxAdapter};
use crate::aggregator::SceneAggregator;
use crate::classifier::ElementClassifier;
use crate::config::ParserConfig;
use crate::document::{Document, SourceKind};
use crate::error::{Error, Result};
use crate::extraction::{DocumentInfo, Extraction, PositionedExtractor, TempArtifact, TextRecognizer};
use crate::fallback::FallbackTextEngine;
use crate::layout::{
    detect_profile, reconstruct_lines, validate_reading_order, LayoutProfile, ProfileRegistry,
};
use crate::screenplay::{ParsingMethod, Screenplay, ScreenplayMetadata};
use std::path::Path;

/// Screenplay parser with its collaborators.
///
/// # Examples
///
/// ```
/// use screenplay_oxide::{Document, ScreenplayParser, SourceKind};
///
/// let parser = ScreenplayParser::default();
/// let doc = Document::from_text("INT. LAB - NIGHT\n\nDR. WU\nIt's alive.\n");
/// let screenplay = parser.parse(&doc, SourceKind::PlainText).unwrap();
///
/// assert_eq!(screenplay.scenes[0].location, "LAB");
/// assert_eq!(screenplay.scenes[0].dialogue[0].character, "DR. WU");
/// ```
pub struct ScreenplayParser {
    config: ParserConfig,
    registry: ProfileRegistry,
    extractor: Option<Box<dyn PositionedExtractor>>,
    recognizer: Option<Box<dyn TextRecognizer>>,
    archive_decoder: Option<Box<dyn ArchiveDecoder>>,
}

impl std::fmt::Debug for ScreenplayParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenplayParser")
            .field("config", &self.config)
            .field("extractor", &self.extractor.is_some())
            .field("recognizer", &self.recognizer.is_some())
            .field("archive_decoder", &self.archive_decoder.is_some())
            .finish()
    }
}

impl Default for ScreenplayParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl ScreenplayParser {
    /// Create a parser without collaborators.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            registry: ProfileRegistry::new(),
            extractor: None,
            recognizer: None,
            archive_decoder: None,
        }
    }

    /// Attach the positioned extraction collaborator.
    pub fn with_extractor(mut self, extractor: Box<dyn PositionedExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Attach the OCR collaborator.
    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Attach an archive decoder, replacing the built-in zip decoder.
    pub fn with_archive_decoder(mut self, decoder: Box<dyn ArchiveDecoder>) -> Self {
        self.archive_decoder = Some(decoder);
        self
    }

    /// Replace the profile registry.
    pub fn with_registry(mut self, registry: ProfileRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a document with an explicit source kind.
    pub fn parse(&self, document: &Document, kind: SourceKind) -> Result<Screenplay> {
        log::info!(
            "Parsing {} ({} bytes) as {:?}",
            document.name().unwrap_or("<buffer>"),
            document.bytes().len(),
            kind
        );

        let screenplay = match kind {
            SourceKind::Positioned => self.parse_positioned(document)?,
            SourceKind::TaggedXml => FdxAdapter::new().parse_bytes(document.bytes())?,
            SourceKind::TaggedArchive => self.parse_archive(document)?,
            SourceKind::PlainText => self.parse_text(document.text()?, None),
        };

        log::info!(
            "Recovered {} scenes, {} characters via {}",
            screenplay.scenes.len(),
            screenplay.characters.len(),
            screenplay.metadata.parsing_method.name()
        );
        Ok(screenplay)
    }

    /// Parse a document, inferring the source kind from its file name.
    pub fn parse_document(&self, document: &Document) -> Result<Screenplay> {
        self.parse(document, document.source_kind()?)
    }

    /// Classify an already extracted fragment stream.
    ///
    /// The profile comes from the configuration when set, otherwise from the
    /// creator/producer metadata.
    pub fn parse_extraction(&self, extraction: &Extraction) -> Result<Screenplay> {
        if self.config.validate_order {
            validate_reading_order(&extraction.elements, self.config.line_epsilon)?;
        }

        let profile = self.select_profile(&extraction.info);
        log::debug!("Using layout profile '{}'", profile.name);
        let metadata = ScreenplayMetadata::new(ParsingMethod::CoordinateBased)
            .with_profile(profile.id)
            .with_page_count(extraction.total_pages);

        let lines = reconstruct_lines(&extraction.elements, self.config.line_epsilon);
        let mut classifier = ElementClassifier::new(profile);
        let mut aggregator = SceneAggregator::new();
        for line in &lines {
            aggregator.push(&classifier.classify_line(line));
        }

        let mut screenplay = aggregator.finish(metadata);
        screenplay.title = extraction.info.title.clone();
        screenplay.author = extraction.info.author.clone();
        Ok(screenplay)
    }

    fn select_profile(&self, info: &DocumentInfo) -> LayoutProfile {
        if let Some(custom) = &self.config.custom_profile {
            return custom.clone();
        }
        let id = self
            .config
            .profile
            .unwrap_or_else(|| detect_profile(info.creator.as_deref(), info.producer.as_deref()));
        self.registry.get(id).clone()
    }

    fn parse_archive(&self, document: &Document) -> Result<Screenplay> {
        match &self.archive_decoder {
            Some(decoder) => {
                let markup = decoder.decode(document.bytes())?;
                crate::adapters::parse_archive_markup(&markup)
            },
            None => self.builtin_archive_adapter()?.parse(document.bytes()),
        }
    }

    #[cfg(feature = "archive")]
    fn builtin_archive_adapter(&self) -> Result<ArchiveAdapter> {
        Ok(ArchiveAdapter::default())
    }

    #[cfg(not(feature = "archive"))]
    fn builtin_archive_adapter(&self) -> Result<ArchiveAdapter> {
        Err(Error::UnsupportedFormat(
            "celtx (built without the `archive` feature and no decoder attached)".to_string(),
        ))
    }

    fn parse_text(&self, text: &str, degradation: Option<String>) -> Screenplay {
        self.parse_pages(&[text], degradation)
    }

    fn parse_pages<S: AsRef<str>>(&self, pages: &[S], degradation: Option<String>) -> Screenplay {
        let mut metadata = ScreenplayMetadata::new(ParsingMethod::Fallback)
            .with_page_count(u32::try_from(pages.len()).unwrap_or(u32::MAX));
        metadata.degradation = degradation;
        FallbackTextEngine::new().parse_pages(pages, metadata)
    }

    fn parse_positioned(&self, document: &Document) -> Result<Screenplay> {
        let Some(extractor) = self.extractor.as_deref() else {
            return self.degrade(document, None, "no positioned extractor configured".to_string());
        };

        let artifact = TempArtifact::materialize(document)?;
        let outcome = match extractor.extract(document, artifact.path()) {
            Ok(extraction) if extraction.has_text() => self.parse_extraction(&extraction),
            Ok(_) => self.degrade(
                document,
                Some((extractor, artifact.path())),
                "positioned extraction returned no text".to_string(),
            ),
            Err(e) => self.degrade(
                document,
                Some((extractor, artifact.path())),
                format!("positioned extraction failed: {}", e),
            ),
        };
        artifact.close();
        outcome
    }

    /// Walk the degradation chain: plain-text extraction, OCR, raw text.
    fn degrade(
        &self,
        document: &Document,
        extractor: Option<(&dyn PositionedExtractor, &Path)>,
        reason: String,
    ) -> Result<Screenplay> {
        log::warn!("{}; falling back to plain-text parsing", reason);
        let mut reasons = vec![reason];

        if self.config.text_fallback {
            if let Some((extractor, path)) = extractor {
                match extractor.extract_text(document, path) {
                    Ok(text) if !text.trim().is_empty() => {
                        return Ok(self.parse_text(&text, Some(reasons.join("; "))));
                    },
                    Ok(_) => reasons.push("plain-text extraction returned no text".to_string()),
                    Err(e) => {
                        log::warn!("Plain-text extraction failed: {}", e);
                        reasons.push(format!("plain-text extraction failed: {}", e));
                    },
                }
            }
        }

        if self.config.ocr_fallback {
            if let Some(recognizer) = self.recognizer.as_deref() {
                match recognizer.recognize(document, &self.config.ocr_language) {
                    Ok(pages) if pages.iter().any(|p| !p.trim().is_empty()) => {
                        log::info!("Using OCR text from {} pages", pages.len());
                        return Ok(self.parse_pages(pages.as_slice(), Some(reasons.join("; "))));
                    },
                    Ok(_) => reasons.push("OCR returned no text".to_string()),
                    Err(e) => {
                        log::warn!("OCR failed: {}", e);
                        reasons.push(format!("OCR failed: {}", e));
                    },
                }
            }
        }

        match document.text() {
            Ok(text) if !text.trim().is_empty() => Ok(self.parse_text(text, Some(reasons.join("; ")))),
            _ => Err(Error::Extraction(reasons.join("; "))),
        }
    }
}

/// Parse a document with a default parser (no collaborators).
///
/// # Examples
///
/// ```
/// use screenplay_oxide::{parse, Document, SourceKind};
///
/// let doc = Document::from_text("EXT. MOON - DAY\n\nDust settles.\n");
/// let screenplay = parse(&doc, SourceKind::PlainText).unwrap();
/// assert_eq!(screenplay.scenes[0].action, vec!["Dust settles.".to_string()]);
/// ```
pub fn parse(document: &Document, kind: SourceKind) -> Result<Screenplay> {
    ScreenplayParser::default().parse(document, kind)
}
