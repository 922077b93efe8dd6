//! Adapters for authoritative tagged screenplay formats.
//!
//! Tagged sources name each paragraph's role explicitly, so no geometry or
//! heuristics are involved. Each adapter maps its own tags onto [`TaggedKind`] and
//! feeds a [`TaggedBuilder`], which applies the same speaker bookkeeping as the
//! classifier and aggregates through the same [`SceneAggregator`]. The resulting
//! [`Screenplay`] has the same shape whichever engine produced it.
//!
//! Structural problems (malformed markup, missing root, unreadable archive) are
//! reported as [`Error::TaggedFormat`](crate::error::Error::TaggedFormat) and are
//! never downgraded to heuristic parsing.

pub mod archive;
pub mod fdx;

pub use archive::{parse_archive_markup, ArchiveAdapter, ArchiveDecoder};
#[cfg(feature = "archive")]
pub use archive::ZipArchiveDecoder;
pub use fdx::FdxAdapter;

use crate::aggregator::SceneAggregator;
use crate::classifier::{parse_scene_heading, ClassifiedElement, ClassifierState, ElementKind, SceneHeading};
use crate::patterns;
use crate::screenplay::{ParsingMethod, Screenplay, ScreenplayMetadata};
use quick_xml::events::BytesStart;

/// Paragraph roles shared by the tagged formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedKind {
    /// Scene heading paragraph
    SceneHeading,
    /// Action / general description
    Action,
    /// Character cue
    Character,
    /// Dialogue
    Dialogue,
    /// Parenthetical
    Parenthetical,
    /// Transition
    Transition,
    /// A role the engine does not model (cast lists, notes, ...)
    Other,
}

/// Builds a screenplay from tagged paragraphs.
#[derive(Debug, Default)]
pub struct TaggedBuilder {
    aggregator: SceneAggregator,
    state: ClassifierState,
    title: Option<String>,
    author: Option<String>,
    paragraphs: usize,
}

impl TaggedBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title page title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = non_empty(title.into());
    }

    /// Set the title page author.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = non_empty(author.into());
    }

    /// Add one paragraph. Blank paragraphs are ignored.
    pub fn push(&mut self, role: TaggedKind, text: &str) {
        let text = patterns::collapse_whitespace(text);
        if text.is_empty() {
            return;
        }

        let kind = match role {
            TaggedKind::SceneHeading => ElementKind::SceneHeading(
                parse_scene_heading(&text).unwrap_or_else(|| SceneHeading::without_token(&text)),
            ),
            TaggedKind::Character => {
                let (name, extensions) = patterns::split_cue(&text);
                ElementKind::Character { name, extensions }
            },
            TaggedKind::Dialogue => ElementKind::Dialogue {
                character: self.state.active_character.clone(),
            },
            TaggedKind::Parenthetical => ElementKind::Parenthetical {
                character: self.state.active_character.clone(),
            },
            TaggedKind::Action => ElementKind::Action,
            TaggedKind::Transition => ElementKind::Transition,
            TaggedKind::Other => ElementKind::Unknown,
        };

        self.state.advance(&kind);
        self.paragraphs += 1;
        self.aggregator.push(&ClassifiedElement::unplaced(text, kind));
    }

    /// Freeze into a screenplay.
    pub fn finish(self) -> Screenplay {
        log::debug!("Tagged source: {} paragraphs", self.paragraphs);
        let mut screenplay = self.aggregator.finish(ScreenplayMetadata::new(ParsingMethod::TaggedAdapter));
        screenplay.title = self.title;
        screenplay.author = self.author;
        screenplay
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = patterns::collapse_whitespace(&value);
    (!value.is_empty()).then_some(value)
}

/// Get an attribute value from an XML element, ignoring namespace prefixes.
pub(crate) fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        let key = attr.key.local_name();
        if key.as_ref().eq_ignore_ascii_case(name.as_bytes()) {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

/// Title page convention: the line after "Written by" (or "by") names the author.
fn is_byline(text: &str) -> bool {
    let lower = text.trim().trim_end_matches(':').to_lowercase();
    matches!(
        lower.as_str(),
        "by" | "written by" | "screenplay by" | "teleplay by" | "yazan" | "escrito por" | "écrit par"
    )
}

/// Pick title and author out of title page lines.
///
/// The title is the first line that is not a byline; the author is the line
/// following the first byline.
pub(crate) fn title_page_fields(lines: &[String]) -> (Option<String>, Option<String>) {
    let lines: Vec<&str> = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()).collect();

    let title = lines.iter().find(|l| !is_byline(l)).map(|l| l.to_string());
    let author = lines
        .iter()
        .position(|l| is_byline(l))
        .and_then(|i| lines.get(i + 1))
        .map(|l| l.to_string());
    (title, author)
}
