//! Element classification: logical lines → typed screenplay elements.
//!
//! The classifier is a single-pass rule engine. Each line is judged by its left
//! edge against the active [`LayoutProfile`] and by its text against the shared
//! pattern tables. Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. Page number
//! 2. Scene heading (heading band + heading pattern)
//! 3. Transition (transition band + transition pattern or trailing colon)
//! 4. Parenthetical (parenthetical band + fully parenthesised)
//! 5. Character cue (character band + upper-case name; denylisted cues become action)
//! 6. Dialogue (dialogue band, directly after a cue, dialogue or parenthetical)
//! 7. Action (action band)
//! 8. Unknown
//!
//! Pattern rules come before band-only rules, which is what resolves overlapping
//! bands. The only carried state is the previous element type and the active
//! speaker.

mod scene_heading;

pub use scene_heading::{parse_scene_heading, SceneHeading, Setting};

use crate::layout::{LayoutProfile, LogicalLine};
use crate::patterns;
use serde::{Deserialize, Serialize};

/// Minimum length of a character name.
pub const MIN_CUE_LEN: usize = 2;
/// Maximum length of a character name.
pub const MAX_CUE_LEN: usize = 30;

/// Screenplay element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// Scene heading ("INT. KITCHEN - NIGHT")
    SceneHeading,
    /// Character cue above dialogue
    Character,
    /// Spoken line
    Dialogue,
    /// Performance direction inside dialogue
    Parenthetical,
    /// Scene description
    Action,
    /// Transition ("CUT TO:")
    Transition,
    /// Page number
    PageNumber,
    /// Nothing matched
    Unknown,
}

impl ElementType {
    /// Whether a following dialogue-band line continues a speech.
    pub fn continues_speech(&self) -> bool {
        matches!(
            self,
            ElementType::Character | ElementType::Dialogue | ElementType::Parenthetical
        )
    }
}

/// Element type plus the data specific to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Scene heading with its decomposition
    SceneHeading(SceneHeading),
    /// Character cue
    Character {
        /// Canonical name ("JOHN")
        name: String,
        /// Stripped annotations ("V.O.", "CONT'D")
        extensions: Vec<String>,
    },
    /// Dialogue line attributed to the active speaker
    Dialogue {
        /// Active speaker, if any
        character: Option<String>,
    },
    /// Parenthetical attributed to the active speaker
    Parenthetical {
        /// Active speaker, if any
        character: Option<String>,
    },
    /// Action line
    Action,
    /// Transition
    Transition,
    /// Page number
    PageNumber,
    /// Unclassifiable line
    Unknown,
}

impl ElementKind {
    /// The plain element type.
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::SceneHeading(_) => ElementType::SceneHeading,
            ElementKind::Character { .. } => ElementType::Character,
            ElementKind::Dialogue { .. } => ElementType::Dialogue,
            ElementKind::Parenthetical { .. } => ElementType::Parenthetical,
            ElementKind::Action => ElementType::Action,
            ElementKind::Transition => ElementType::Transition,
            ElementKind::PageNumber => ElementType::PageNumber,
            ElementKind::Unknown => ElementType::Unknown,
        }
    }
}

/// A classified line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedElement {
    /// Line text as reconstructed
    pub text: String,
    /// Classification column (left edge); 0 for coordinate-free engines
    pub x: f32,
    /// Page number, 0 when unknown
    pub page: u32,
    /// Whether the line was set in a bold-like weight
    pub bold: bool,
    /// Type and type-specific data
    pub kind: ElementKind,
}

impl ClassifiedElement {
    /// Build an element without geometry (plain-text and tagged engines).
    pub fn unplaced(text: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            text: text.into(),
            x: 0.0,
            page: 0,
            bold: false,
            kind,
        }
    }

    /// The plain element type.
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Speaker for dialogue and parentheticals, name for character cues.
    pub fn character(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Character { name, .. } => Some(name),
            ElementKind::Dialogue { character } | ElementKind::Parenthetical { character } => {
                character.as_deref()
            },
            _ => None,
        }
    }

    /// Scene heading decomposition, for headings.
    pub fn heading(&self) -> Option<&SceneHeading> {
        match &self.kind {
            ElementKind::SceneHeading(heading) => Some(heading),
            _ => None,
        }
    }
}

/// State carried from one line to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Type of the last emitted element
    pub previous_type: Option<ElementType>,
    /// Speaker that dialogue and parentheticals are attributed to
    pub active_character: Option<String>,
}

impl ClassifierState {
    /// Fold an emitted element into the state.
    ///
    /// Only a character cue sets the speaker and only action clears it.
    pub fn advance(&mut self, kind: &ElementKind) {
        self.previous_type = Some(kind.element_type());
        match kind {
            ElementKind::Character { name, .. } => self.active_character = Some(name.clone()),
            ElementKind::Action => self.active_character = None,
            _ => {},
        }
    }

    fn continues_speech(&self) -> bool {
        self.previous_type.is_some_and(|t| t.continues_speech())
    }
}

/// Recognise a character cue by text alone: upper-case name of acceptable length
/// that is neither a transition nor a scene heading.
///
/// Returns the canonical name and stripped annotations. Denylisted cues are
/// returned too; callers decide what to do with them via
/// [`patterns::is_denylisted_cue`].
pub fn character_cue(text: &str) -> Option<(String, Vec<String>)> {
    let (name, extensions) = patterns::split_cue(text);
    let len = name.chars().count();
    if !(MIN_CUE_LEN..=MAX_CUE_LEN).contains(&len) || !patterns::is_upper_case(&name) {
        return None;
    }
    if patterns::is_scene_heading(text) {
        return None;
    }
    Some((name, extensions))
}

/// Band-based screenplay element classifier.
///
/// # Examples
///
/// ```
/// use screenplay_oxide::classifier::{ElementClassifier, ElementType};
/// use screenplay_oxide::layout::LayoutProfile;
///
/// let mut classifier = ElementClassifier::new(LayoutProfile::generic());
///
/// assert_eq!(classifier.classify("INT. KITCHEN - NIGHT", 60.0).element_type(), ElementType::SceneHeading);
/// assert_eq!(classifier.classify("AHMET", 220.0).element_type(), ElementType::Character);
/// let line = classifier.classify("Merhaba.", 150.0);
/// assert_eq!(line.element_type(), ElementType::Dialogue);
/// assert_eq!(line.character(), Some("AHMET"));
/// ```
#[derive(Debug, Clone)]
pub struct ElementClassifier {
    profile: LayoutProfile,
    state: ClassifierState,
}

impl ElementClassifier {
    /// Create a classifier for a layout profile.
    pub fn new(profile: LayoutProfile) -> Self {
        Self {
            profile,
            state: ClassifierState::default(),
        }
    }

    /// The active profile.
    pub fn profile(&self) -> &LayoutProfile {
        &self.profile
    }

    /// Current carried state.
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Forget the carried state (start of a new document).
    pub fn reset(&mut self) {
        self.state = ClassifierState::default();
    }

    /// Classify a reconstructed line.
    pub fn classify_line(&mut self, line: &LogicalLine) -> ClassifiedElement {
        let mut element = self.classify(&line.text, line.x);
        element.page = line.page;
        element.bold = line.is_bold();
        element
    }

    /// Classify text at a horizontal offset and advance the state.
    pub fn classify(&mut self, text: &str, x: f32) -> ClassifiedElement {
        let text = text.trim();
        let kind = self.decide(text, x);
        log::trace!("x={:>7.2} {:?} {:?}", x, kind.element_type(), text);
        self.state.advance(&kind);

        ClassifiedElement {
            text: text.to_string(),
            x,
            page: 0,
            bold: false,
            kind,
        }
    }

    /// Apply the ordered rules without touching the state.
    fn decide(&self, text: &str, x: f32) -> ElementKind {
        let profile = &self.profile;

        if text.is_empty() {
            return ElementKind::Unknown;
        }

        if patterns::is_page_number(text) {
            return ElementKind::PageNumber;
        }

        if profile.scene_heading.contains(x) {
            if let Some(heading) = parse_scene_heading(text) {
                return ElementKind::SceneHeading(heading);
            }
        }

        if profile.transition.contains(x) && (patterns::is_transition(text) || text.ends_with(':')) {
            return ElementKind::Transition;
        }

        if profile.parenthetical.contains(x) && patterns::is_parenthetical(text) {
            return ElementKind::Parenthetical {
                character: self.state.active_character.clone(),
            };
        }

        if profile.character.contains(x) {
            if let Some((name, extensions)) = character_cue(text) {
                if patterns::is_denylisted_cue(&name) {
                    return ElementKind::Action;
                }
                if !patterns::is_transition(text) {
                    return ElementKind::Character { name, extensions };
                }
            }
        }

        if profile.dialogue.contains(x) && self.state.continues_speech() {
            return ElementKind::Dialogue {
                character: self.state.active_character.clone(),
            };
        }

        if profile.action.contains(x) {
            return ElementKind::Action;
        }

        ElementKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ProfileRegistry;

    fn generic() -> ElementClassifier {
        ElementClassifier::new(LayoutProfile::generic())
    }

    #[test]
    fn test_page_number_first() {
        let mut c = generic();
        assert_eq!(c.classify("12.", 60.0).element_type(), ElementType::PageNumber);
        assert_eq!(c.classify("3", 500.0).element_type(), ElementType::PageNumber);
    }

    #[test]
    fn test_heading_requires_band() {
        let mut c = generic();
        assert_eq!(c.classify("INT. KITCHEN - NIGHT", 60.0).element_type(), ElementType::SceneHeading);
        // Same text at the cue column is not a heading.
        assert_ne!(c.classify("INT. KITCHEN - NIGHT", 250.0).element_type(), ElementType::SceneHeading);
    }

    #[test]
    fn test_heading_in_every_profile() {
        for profile in ProfileRegistry::new().profiles() {
            let x = profile.scene_heading.representative();
            let mut c = ElementClassifier::new(profile.clone());
            for text in ["INT. KITCHEN - NIGHT", "ext. field - day", "İÇ. EV - GÜNDÜZ"] {
                assert_eq!(
                    c.classify(text, x).element_type(),
                    ElementType::SceneHeading,
                    "{} in {}",
                    text,
                    profile.name
                );
            }
        }
    }

    #[test]
    fn test_transition() {
        let mut c = generic();
        assert_eq!(c.classify("CUT TO:", 450.0).element_type(), ElementType::Transition);
        assert_eq!(c.classify("LATER THAT NIGHT:", 420.0).element_type(), ElementType::Transition);
        // Transition text at the action column is action.
        assert_eq!(c.classify("FADE IN:", 60.0).element_type(), ElementType::Action);
    }

    #[test]
    fn test_character_strips_extension() {
        let mut c = generic();
        let el = c.classify("JOHN (V.O.)", 250.0);
        match &el.kind {
            ElementKind::Character { name, extensions } => {
                assert_eq!(name, "JOHN");
                assert_eq!(extensions, &vec!["V.O.".to_string()]);
            },
            other => panic!("expected character, got {:?}", other),
        }
        assert_eq!(c.state().active_character.as_deref(), Some("JOHN"));
    }

    #[test]
    fn test_denylisted_cue_is_action() {
        let mut c = generic();
        c.classify("MARY", 250.0);
        let el = c.classify("CONTINUED", 250.0);
        assert_eq!(el.element_type(), ElementType::Action);
        assert_eq!(c.state().active_character, None);
    }

    #[test]
    fn test_cue_length_limits() {
        let mut c = generic();
        assert_ne!(c.classify("A", 250.0).element_type(), ElementType::Character);
        let long = "ABCDEFGHIJ ABCDEFGHIJ ABCDEFGHIJ";
        assert_ne!(c.classify(long, 250.0).element_type(), ElementType::Character);
    }

    #[test]
    fn test_dialogue_chain_through_parenthetical() {
        let mut c = generic();
        c.classify("JOHN", 250.0);
        let first = c.classify("Where were you?", 180.0);
        let paren = c.classify("(beat)", 220.0);
        let second = c.classify("Never mind.", 180.0);

        assert_eq!(first.character(), Some("JOHN"));
        assert_eq!(paren.element_type(), ElementType::Parenthetical);
        assert_eq!(paren.character(), Some("JOHN"));
        assert_eq!(second.element_type(), ElementType::Dialogue);
        assert_eq!(second.character(), Some("JOHN"));
    }

    #[test]
    fn test_action_clears_speaker() {
        let mut c = generic();
        c.classify("JOHN", 250.0);
        c.classify("Hello.", 180.0);
        assert_eq!(c.classify("He leaves.", 60.0).element_type(), ElementType::Action);
        assert_eq!(c.state().active_character, None);

        // Dialogue-band text after action is no longer dialogue.
        assert_ne!(c.classify("Anyone?", 180.0).element_type(), ElementType::Dialogue);
    }

    #[test]
    fn test_new_character_replaces_speaker() {
        let mut c = generic();
        c.classify("JOHN", 250.0);
        c.classify("Hi.", 180.0);
        c.classify("MARY", 250.0);
        assert_eq!(c.classify("Hello.", 180.0).character(), Some("MARY"));
    }

    #[test]
    fn test_gap_is_unknown() {
        let mut c = ElementClassifier::new(LayoutProfile::final_draft());
        // Between action (ends 150) and dialogue (starts 165).
        assert_eq!(c.classify("floating text", 155.0).element_type(), ElementType::Unknown);
        assert_eq!(c.state().previous_type, Some(ElementType::Unknown));
    }

    #[test]
    fn test_scene_marker_heading() {
        let mut c = generic();
        let el = c.classify("SCENE 4", 60.0);
        assert_eq!(el.element_type(), ElementType::SceneHeading);
        assert_eq!(el.heading().unwrap().scene_number.as_deref(), Some("4"));
    }

    #[test]
    fn test_reset() {
        let mut c = generic();
        c.classify("JOHN", 250.0);
        c.reset();
        assert_eq!(c.state(), &ClassifierState::default());
    }
}
