//! Positioned text fragments as handed over by the extraction collaborator.

use crate::geometry::BBox;
use serde::{Deserialize, Serialize};

/// Font weight at or above which a fragment counts as bold.
pub const BOLD_WEIGHT: f32 = 1.0;

/// A text fragment with its page position and font metadata.
///
/// Fragments carry no semantic tags. Everything the classifier learns about a
/// fragment comes from its left edge, its text and, marginally, its weight.
///
/// Fragments must arrive in reading order: pages ascending, and within a page
/// top-to-bottom then left-to-right. The engine never sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedElement {
    /// The fragment text
    pub text: String,
    /// Bounding box on the page
    pub bbox: BBox,
    /// Page number (1-based)
    pub page: u32,
    /// Font name as reported by the extractor
    #[serde(default)]
    pub font_name: String,
    /// Font weight; values of [`BOLD_WEIGHT`] and above are bold-like
    #[serde(default)]
    pub font_weight: f32,
}

impl PositionedElement {
    /// Create a fragment with a regular-weight, unnamed font.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::geometry::BBox;
    /// use screenplay_oxide::layout::PositionedElement;
    ///
    /// let el = PositionedElement::new("INT. KITCHEN - NIGHT", BBox::new(108.0, 90.0, 260.0, 102.0), 1);
    /// assert_eq!(el.x(), 108.0);
    /// assert!(!el.is_bold());
    /// ```
    pub fn new(text: impl Into<String>, bbox: BBox, page: u32) -> Self {
        Self {
            text: text.into(),
            bbox,
            page,
            font_name: String::new(),
            font_weight: 0.0,
        }
    }

    /// Set font name and weight.
    pub fn with_font(mut self, font_name: impl Into<String>, font_weight: f32) -> Self {
        self.font_name = font_name.into();
        self.font_weight = font_weight;
        self
    }

    /// Mark the fragment as bold.
    pub fn bold(mut self) -> Self {
        self.font_weight = self.font_weight.max(BOLD_WEIGHT);
        self
    }

    /// Left edge, the column used for classification.
    pub fn x(&self) -> f32 {
        self.bbox.x0
    }

    /// Top edge, the coordinate used for line grouping.
    pub fn y(&self) -> f32 {
        self.bbox.y0
    }

    /// Whether the weight is bold-like.
    pub fn is_bold(&self) -> bool {
        self.font_weight >= BOLD_WEIGHT
    }

    /// Whether the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_threshold() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(!PositionedElement::new("a", bbox, 1).with_font("Courier", 0.4).is_bold());
        assert!(PositionedElement::new("a", bbox, 1).with_font("Courier-Bold", 1.0).is_bold());
        assert!(PositionedElement::new("a", bbox, 1).bold().is_bold());
    }

    #[test]
    fn test_blank() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(PositionedElement::new("  \t", bbox, 1).is_blank());
        assert!(!PositionedElement::new(" x ", bbox, 1).is_blank());
    }

    #[test]
    fn test_deserialize_without_font() {
        let json = r#"{"text":"AHMET","bbox":{"x0":220.0,"y0":100.0,"x1":260.0,"y1":112.0},"page":1}"#;
        let el: PositionedElement = serde_json::from_str(json).unwrap();
        assert_eq!(el.text, "AHMET");
        assert_eq!(el.font_weight, 0.0);
        assert!(el.font_name.is_empty());
    }
}
