//! Coordinate-free classification of plain screenplay text.
//!
//! Used when no positions are available: plain-text sources, text pulled from a
//! document whose positioned extraction failed, and OCR output. The engine relies
//! on the text conventions screenplays share regardless of layout:
//!
//! - a scene heading matches the heading pattern anywhere on the line, or is forced
//!   with a leading `.` (`.FLASHBACK - DAY`)
//! - transitions match the transition pattern or end in `TO:`
//! - character cues are upper-case names of 2 to 30 characters
//! - dialogue and parentheticals follow a cue until a blank line ends the block
//!
//! Everything else is action.

use crate::aggregator::SceneAggregator;
use crate::classifier::{
    character_cue, parse_scene_heading, ClassifiedElement, ClassifierState, ElementKind, SceneHeading,
};
use crate::patterns;
use crate::screenplay::{ParsingMethod, Screenplay, ScreenplayMetadata};

/// Plain-text screenplay classifier.
#[derive(Debug, Default)]
pub struct FallbackTextEngine {
    state: ClassifierState,
    in_dialogue: bool,
}

impl FallbackTextEngine {
    /// Create an engine with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line. Blank lines end a dialogue block and yield `None`.
    pub fn classify_line(&mut self, line: &str) -> Option<ClassifiedElement> {
        let text = line.trim();
        if text.is_empty() {
            self.in_dialogue = false;
            return None;
        }

        let (text, kind) = self.decide(text);
        log::trace!("plain {:?} {:?}", kind.element_type(), text);

        self.in_dialogue = match &kind {
            ElementKind::Character { .. } => true,
            ElementKind::Dialogue { .. } | ElementKind::Parenthetical { .. } => self.in_dialogue,
            _ => false,
        };
        self.state.advance(&kind);

        Some(ClassifiedElement::unplaced(text, kind))
    }

    /// Classify every line of a text.
    pub fn classify_text(&mut self, text: &str) -> Vec<ClassifiedElement> {
        text.lines().filter_map(|line| self.classify_line(line)).collect()
    }

    /// Classify page-separated text (one string per page, as OCR returns it).
    ///
    /// A page break ends any open dialogue block.
    pub fn classify_pages<S: AsRef<str>>(&mut self, pages: &[S]) -> Vec<ClassifiedElement> {
        let mut elements = Vec::new();
        for (index, page) in pages.iter().enumerate() {
            self.in_dialogue = false;
            let page_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
            for mut element in self.classify_text(page.as_ref()) {
                element.page = page_number;
                elements.push(element);
            }
        }
        elements
    }

    /// Classify and aggregate page-separated text into a screenplay.
    pub fn parse_pages<S: AsRef<str>>(&mut self, pages: &[S], metadata: ScreenplayMetadata) -> Screenplay {
        let elements = self.classify_pages(pages);
        let mut aggregator = SceneAggregator::new();
        aggregator.extend(&elements);
        aggregator.finish(metadata)
    }

    fn decide<'a>(&self, text: &'a str) -> (&'a str, ElementKind) {
        if patterns::is_page_number(text) {
            return (text, ElementKind::PageNumber);
        }

        if let Some(heading) = parse_scene_heading(text) {
            return (text, ElementKind::SceneHeading(heading));
        }
        if let Some(forced) = forced_heading(text) {
            return forced;
        }

        if patterns::is_transition(text) || (text.ends_with("TO:") && patterns::is_upper_case(text)) {
            return (text, ElementKind::Transition);
        }

        if self.in_dialogue && patterns::is_parenthetical(text) {
            return (
                text,
                ElementKind::Parenthetical {
                    character: self.state.active_character.clone(),
                },
            );
        }

        if let Some((name, extensions)) = character_cue(text) {
            if patterns::is_denylisted_cue(&name) {
                return (text, ElementKind::Action);
            }
            return (text, ElementKind::Character { name, extensions });
        }

        if self.in_dialogue && !patterns::is_upper_case(text) {
            return (
                text,
                ElementKind::Dialogue {
                    character: self.state.active_character.clone(),
                },
            );
        }

        (text, ElementKind::Action)
    }
}

/// A `.`-prefixed line is a heading even without an interior/exterior token.
fn forced_heading(text: &str) -> Option<(&str, ElementKind)> {
    let rest = text.strip_prefix('.')?;
    if !rest.starts_with(char::is_alphabetic) {
        return None;
    }

    Some((rest, ElementKind::SceneHeading(SceneHeading::without_token(rest))))
}

/// Parse plain screenplay text with the fallback engine.
///
/// # Examples
///
/// ```
/// use screenplay_oxide::parse_plain_text;
///
/// let screenplay = parse_plain_text("EXT. BEACH - DAY\n\nWaves.\n");
/// assert_eq!(screenplay.scenes.len(), 1);
/// assert_eq!(screenplay.scenes[0].location, "BEACH");
/// ```
pub fn parse_plain_text(text: &str) -> Screenplay {
    FallbackTextEngine::new().parse_pages(&[text], ScreenplayMetadata::new(ParsingMethod::Fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ElementType;
    use crate::patterns::UNKNOWN;

    fn types(text: &str) -> Vec<ElementType> {
        FallbackTextEngine::new()
            .classify_text(text)
            .iter()
            .map(|e| e.element_type())
            .collect()
    }

    #[test]
    fn test_basic_scene() {
        let text = "INT. KITCHEN - NIGHT\n\nJohn enters.\n\nJOHN\n(quietly)\nAnyone home?\n\nCUT TO:\n";
        assert_eq!(
            types(text),
            vec![
                ElementType::SceneHeading,
                ElementType::Action,
                ElementType::Character,
                ElementType::Parenthetical,
                ElementType::Dialogue,
                ElementType::Transition,
            ]
        );
    }

    #[test]
    fn test_blank_line_ends_dialogue() {
        let elements = FallbackTextEngine::new().classify_text("MARY\nHello.\n\nShe sits.\n");
        assert_eq!(elements[1].character(), Some("MARY"));
        assert_eq!(elements[2].element_type(), ElementType::Action);
    }

    #[test]
    fn test_parenthetical_outside_dialogue_is_action() {
        assert_eq!(types("(a distant bell)"), vec![ElementType::Action]);
    }

    #[test]
    fn test_forced_heading() {
        let elements = FallbackTextEngine::new().classify_text(".FLASHBACK - DAY\n");
        let heading = elements[0].heading().unwrap();
        assert_eq!(elements[0].text, "FLASHBACK - DAY");
        assert_eq!(heading.location, "FLASHBACK");
        assert_eq!(heading.time_of_day, "DAY");
        assert_eq!(heading.int_ext, UNKNOWN);

        // An ellipsis is not a forced heading.
        assert_eq!(types("...and then"), vec![ElementType::Action]);
    }

    #[test]
    fn test_to_colon_transition() {
        assert_eq!(types("SLAM TO:"), vec![ElementType::Transition]);
        assert_eq!(types("Back to:"), vec![ElementType::Transition]);
    }

    #[test]
    fn test_denylisted_cue() {
        assert_eq!(types("TITLE CARD"), vec![ElementType::Action]);
        assert_eq!(types("INSERT"), vec![ElementType::Action]);
        // The transition rule runs before the cue rule.
        assert_eq!(types("CONTINUED"), vec![ElementType::Transition]);
    }

    #[test]
    fn test_sentences_opening_with_transition_words() {
        let text = "INT. BAR - NIGHT\n\nJOE\nBack to work, everyone.\n\nThe end of the bar is empty.\n";
        assert_eq!(
            types(text),
            vec![
                ElementType::SceneHeading,
                ElementType::Character,
                ElementType::Dialogue,
                ElementType::Action,
            ]
        );

        let sp = parse_plain_text(text);
        let scene = &sp.scenes[0];
        assert_eq!(scene.dialogue.len(), 1);
        assert_eq!(scene.dialogue[0].character, "JOE");
        assert_eq!(scene.dialogue[0].text, "Back to work, everyone.");
        assert_eq!(scene.action, vec!["The end of the bar is empty.".to_string()]);
    }

    #[test]
    fn test_prose_opening_with_heading_words() {
        let text = "INT. VAN - DAY\n\nInterior lights flicker on.\n\nEst. 1887, the mill looms.\n\nScene 2 begins.\n";
        let sp = parse_plain_text(text);
        assert_eq!(sp.scenes.len(), 1);
        assert_eq!(sp.scenes[0].location, "VAN");
        assert_eq!(sp.scenes[0].action.len(), 3);
    }

    #[test]
    fn test_non_english_text() {
        let sp = parse_plain_text("İÇ. EV - GÜNDÜZ\n\nAHMET\nMerhaba.\n");
        assert_eq!(sp.scenes.len(), 1);
        assert_eq!(sp.scenes[0].int_ext, "İÇ");
        assert_eq!(sp.scenes[0].dialogue[0].character, "AHMET");
        assert_eq!(sp.metadata.parsing_method, ParsingMethod::Fallback);
    }

    #[test]
    fn test_pages_numbered() {
        let pages = ["INT. A - DAY\nJOE\nHi.", "More action here."];
        let elements = FallbackTextEngine::new().classify_pages(&pages);
        assert_eq!(elements.first().map(|e| e.page), Some(1));
        assert_eq!(elements.last().map(|e| e.page), Some(2));
        // Page break ended the dialogue block.
        assert_eq!(elements.last().map(|e| e.element_type()), Some(ElementType::Action));
    }

    #[test]
    fn test_page_number_lines() {
        assert_eq!(types("42.\nINT. A - DAY"), vec![ElementType::PageNumber, ElementType::SceneHeading]);
    }
}
