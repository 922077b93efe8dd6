//! Configuration for screenplay parsing.

use crate::layout::{LayoutProfile, ProfileId, DEFAULT_LINE_EPSILON};

/// Default OCR language hint.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Screenplay parsing configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Vertical tolerance for merging fragments into one line.
    pub line_epsilon: f32,

    /// Force a built-in profile instead of detecting it.
    pub profile: Option<ProfileId>,

    /// Use this profile instead of any built-in one.
    pub custom_profile: Option<LayoutProfile>,

    /// Language hint passed to the OCR collaborator.
    pub ocr_language: String,

    /// Check the reading-order precondition before classifying.
    pub validate_order: bool,

    /// Try unpositioned text extraction when positioned extraction fails.
    pub text_fallback: bool,

    /// Try OCR when extraction yields nothing usable.
    pub ocr_fallback: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Create new configuration with defaults.
    ///
    /// Order validation is on in debug builds only.
    pub fn new() -> Self {
        Self {
            line_epsilon: DEFAULT_LINE_EPSILON,
            profile: None,
            custom_profile: None,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            validate_order: cfg!(debug_assertions),
            text_fallback: true,
            ocr_fallback: true,
        }
    }

    /// Set the line-merge tolerance.
    pub fn with_line_epsilon(mut self, epsilon: f32) -> Self {
        self.line_epsilon = epsilon;
        self
    }

    /// Force a built-in profile.
    pub fn with_profile(mut self, profile: ProfileId) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Use a custom profile.
    pub fn with_custom_profile(mut self, profile: LayoutProfile) -> Self {
        self.custom_profile = Some(profile);
        self
    }

    /// Set the OCR language hint.
    pub fn with_ocr_language(mut self, language: impl Into<String>) -> Self {
        self.ocr_language = language.into();
        self
    }

    /// Enable or disable reading-order validation.
    pub fn with_order_validation(mut self, enable: bool) -> Self {
        self.validate_order = enable;
        self
    }

    /// Enable or disable the plain-text extraction fallback.
    pub fn with_text_fallback(mut self, enable: bool) -> Self {
        self.text_fallback = enable;
        self
    }

    /// Enable or disable the OCR fallback.
    pub fn with_ocr_fallback(mut self, enable: bool) -> Self {
        self.ocr_fallback = enable;
        self
    }
}
