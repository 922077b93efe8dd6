//! Line reconstruction: positioned fragments → logical lines.
//!
//! Extractors frequently split one visual line into several fragments (font
//! changes, kerning runs, underlined words). Fragments whose top edges are within
//! an epsilon of each other are joined with single spaces. The *first* fragment's
//! left edge becomes the line's column, because the leftmost fragment is the one
//! that carries the indentation signal.

use crate::error::{Error, Result};
use crate::geometry::BBox;
use crate::layout::element::PositionedElement;

/// Default vertical tolerance (points) for "same visual line".
pub const DEFAULT_LINE_EPSILON: f32 = 2.0;

/// A reconstructed line of text with its classification column.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalLine {
    /// Joined fragment text
    pub text: String,
    /// Left edge of the first fragment
    pub x: f32,
    /// Union of all fragment boxes
    pub bbox: BBox,
    /// Page the line sits on
    pub page: u32,
    /// Heaviest font weight among the fragments
    pub font_weight: f32,
    /// Number of fragments merged into this line
    pub fragments: usize,
}

impl LogicalLine {
    fn start(element: &PositionedElement) -> Self {
        Self {
            text: element.text.trim().to_string(),
            x: element.x(),
            bbox: element.bbox,
            page: element.page,
            font_weight: element.font_weight,
            fragments: 1,
        }
    }

    fn absorb(&mut self, element: &PositionedElement) {
        self.text.push(' ');
        self.text.push_str(element.text.trim());
        self.bbox = self.bbox.union(&element.bbox);
        self.font_weight = self.font_weight.max(element.font_weight);
        self.fragments += 1;
    }

    /// Whether any merged fragment was bold-like.
    pub fn is_bold(&self) -> bool {
        self.font_weight >= crate::layout::element::BOLD_WEIGHT
    }
}

/// Merge fragments sharing a visual line into logical lines.
///
/// Blank fragments are skipped without flushing the current line, so a stray
/// whitespace run never splits a line in two. A page change always flushes.
///
/// # Examples
///
/// ```
/// use screenplay_oxide::geometry::BBox;
/// use screenplay_oxide::layout::{reconstruct_lines, PositionedElement};
///
/// let elements = vec![
///     PositionedElement::new("JOHN", BBox::new(266.0, 100.0, 296.0, 112.0), 1),
///     PositionedElement::new("(V.O.)", BBox::new(300.0, 100.5, 340.0, 112.5), 1),
///     PositionedElement::new("Hello.", BBox::new(180.0, 112.0, 220.0, 124.0), 1),
/// ];
///
/// let lines = reconstruct_lines(&elements, 2.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].text, "JOHN (V.O.)");
/// assert_eq!(lines[0].x, 266.0);
/// assert_eq!(lines[1].text, "Hello.");
/// ```
pub fn reconstruct_lines(elements: &[PositionedElement], epsilon: f32) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut current: Option<LogicalLine> = None;
    let mut last_y = 0.0_f32;

    for element in elements {
        if element.is_blank() {
            continue;
        }

        current = match current.take() {
            Some(mut line) if line.page == element.page && (element.y() - last_y).abs() < epsilon => {
                line.absorb(element);
                Some(line)
            },
            Some(line) => {
                lines.push(line);
                Some(LogicalLine::start(element))
            },
            None => Some(LogicalLine::start(element)),
        };
        last_y = element.y();
    }

    if let Some(line) = current {
        lines.push(line);
    }

    log::debug!("Reconstructed {} lines from {} fragments", lines.len(), elements.len());
    lines
}

/// Check the reading-order precondition: pages ascending, top edges descending the
/// page within `epsilon`.
///
/// This is a cheap monotonicity check, not a sort. The parser runs it in debug
/// builds so that unordered input fails loudly instead of yielding a scrambled
/// screenplay.
pub fn validate_reading_order(elements: &[PositionedElement], epsilon: f32) -> Result<()> {
    let mut previous: Option<&PositionedElement> = None;

    for (index, element) in elements.iter().enumerate() {
        if element.is_blank() {
            continue;
        }
        if let Some(prev) = previous {
            if element.page < prev.page {
                return Err(Error::UnorderedInput {
                    index,
                    reason: format!("page {} follows page {}", element.page, prev.page),
                });
            }
            if element.page == prev.page && element.y() + epsilon < prev.y() {
                return Err(Error::UnorderedInput {
                    index,
                    reason: format!(
                        "top edge {} is above preceding {} on page {}",
                        element.y(),
                        prev.y(),
                        element.page
                    ),
                });
            }
        }
        previous = Some(element);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f32, y: f32, page: u32) -> PositionedElement {
        PositionedElement::new(text, BBox::new(x, y, x + text.len() as f32 * 7.2, y + 12.0), page)
    }

    #[test]
    fn test_empty_input() {
        assert!(reconstruct_lines(&[], DEFAULT_LINE_EPSILON).is_empty());
    }

    #[test]
    fn test_leftmost_fragment_defines_column() {
        let elements = vec![frag("INT.", 108.0, 72.0, 1), frag("KITCHEN - NIGHT", 140.0, 72.4, 1)];
        let lines = reconstruct_lines(&elements, DEFAULT_LINE_EPSILON);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "INT. KITCHEN - NIGHT");
        assert_eq!(lines[0].x, 108.0);
        assert_eq!(lines[0].fragments, 2);
        assert_eq!(lines[0].bbox.x0, 108.0);
    }

    #[test]
    fn test_blank_fragments_do_not_flush() {
        let elements = vec![
            frag("JOHN", 266.0, 100.0, 1),
            frag("   ", 290.0, 100.0, 1),
            frag("(O.S.)", 300.0, 100.0, 1),
        ];
        let lines = reconstruct_lines(&elements, DEFAULT_LINE_EPSILON);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "JOHN (O.S.)");
    }

    #[test]
    fn test_new_line_flushes() {
        let elements = vec![
            frag("First", 108.0, 100.0, 1),
            frag("Second", 108.0, 112.0, 1),
            frag("Third", 108.0, 124.0, 1),
        ];
        let lines = reconstruct_lines(&elements, DEFAULT_LINE_EPSILON);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_page_change_flushes_even_at_same_y() {
        let elements = vec![frag("End of page", 108.0, 700.0, 1), frag("Top", 108.0, 700.0, 2)];
        let lines = reconstruct_lines(&elements, DEFAULT_LINE_EPSILON);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].page, 2);
    }

    #[test]
    fn test_bold_fragment_marks_line() {
        let elements = vec![frag("EXT.", 108.0, 72.0, 1).bold(), frag("PARK - DAY", 140.0, 72.0, 1)];
        let lines = reconstruct_lines(&elements, DEFAULT_LINE_EPSILON);
        assert!(lines[0].is_bold());
    }

    #[test]
    fn test_validate_accepts_reading_order() {
        let elements = vec![
            frag("A", 108.0, 72.0, 1),
            frag("B", 200.0, 72.5, 1),
            frag("C", 108.0, 84.0, 1),
            frag("D", 108.0, 72.0, 2),
        ];
        assert!(validate_reading_order(&elements, DEFAULT_LINE_EPSILON).is_ok());
    }

    #[test]
    fn test_validate_rejects_page_regression() {
        let elements = vec![frag("A", 108.0, 72.0, 2), frag("B", 108.0, 84.0, 1)];
        let err = validate_reading_order(&elements, DEFAULT_LINE_EPSILON).unwrap_err();
        assert!(matches!(err, Error::UnorderedInput { index: 1, .. }));
    }

    #[test]
    fn test_validate_rejects_upward_jump() {
        let elements = vec![frag("A", 108.0, 300.0, 1), frag("B", 108.0, 100.0, 1)];
        assert!(validate_reading_order(&elements, DEFAULT_LINE_EPSILON).is_err());
    }
}
