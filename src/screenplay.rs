//! The recovered screenplay data model.
//!
//! Every engine (coordinate-based, plain-text fallback, tagged adapters) converges
//! on these types. They are built in a single forward pass by
//! [`SceneAggregator`](crate::aggregator::SceneAggregator) and are not mutated
//! afterwards.

use crate::classifier::Setting;
use crate::error::Result;
use crate::layout::ProfileId;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One spoken line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Speaker, `UNKNOWN` when no cue preceded the line
    pub character: String,
    /// What is said
    pub text: String,
}

/// A scene: everything from one heading up to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based encounter order
    pub number: usize,
    /// Heading line as written
    pub header: String,
    /// Interior/exterior token ("INT", "İÇ", "INT-EXT")
    pub int_ext: String,
    /// Language-independent reading of `int_ext`
    pub setting: Setting,
    /// Location slot of the heading
    pub location: String,
    /// Normalised time of day
    pub time_of_day: String,
    /// Printed scene number, when the heading carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_number: Option<String>,
    /// Characters with a cue in this scene, first-appearance order
    pub characters: IndexSet<String>,
    /// Dialogue in order
    pub dialogue: Vec<DialogueLine>,
    /// Action lines in order
    pub action: Vec<String>,
    /// Raw text of the scene, one element per line, heading included
    pub text: String,
}

impl Scene {
    /// Whether a character has a cue in this scene.
    pub fn has_character(&self, name: &str) -> bool {
        self.characters.contains(name)
    }
}

/// How the structure was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsingMethod {
    /// Positioned fragments classified by layout bands
    #[default]
    CoordinateBased,
    /// Coordinate-free heuristics on plain lines
    Fallback,
    /// Explicit tags of an authoritative format
    TaggedAdapter,
}

impl ParsingMethod {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ParsingMethod::CoordinateBased => "coordinate-based",
            ParsingMethod::Fallback => "fallback",
            ParsingMethod::TaggedAdapter => "tagged-adapter",
        }
    }
}

/// Facts about how a screenplay was parsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenplayMetadata {
    /// Layout profile used by the coordinate-based engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileId>,
    /// Page count reported by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    /// Engine that produced the structure
    pub parsing_method: ParsingMethod,
    /// Why a richer engine was abandoned, if one was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degradation: Option<String>,
}

impl ScreenplayMetadata {
    /// Metadata for a given engine.
    pub fn new(parsing_method: ParsingMethod) -> Self {
        Self {
            parsing_method,
            ..Default::default()
        }
    }

    /// Record the layout profile.
    pub fn with_profile(mut self, profile: ProfileId) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Record the page count.
    pub fn with_page_count(mut self, pages: u32) -> Self {
        self.page_count = Some(pages);
        self
    }

    /// Record a degradation reason.
    pub fn with_degradation(mut self, reason: impl Into<String>) -> Self {
        self.degradation = Some(reason.into());
        self
    }
}

/// A parsed screenplay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Screenplay {
    /// Title, from document info or title page
    #[serde(default)]
    pub title: Option<String>,
    /// Author, from document info or title page
    #[serde(default)]
    pub author: Option<String>,
    /// Scenes in order
    pub scenes: Vec<Scene>,
    /// Every character with a cue inside a scene
    pub characters: IndexSet<String>,
    /// Every scene location
    pub locations: IndexSet<String>,
    /// Full text, one element per line
    pub text: String,
    /// Parse facts
    pub metadata: ScreenplayMetadata,
}

impl Screenplay {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Scenes in which a character has a cue.
    pub fn scenes_with_character<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Scene> + 'a {
        self.scenes.iter().filter(move |scene| scene.has_character(name))
    }

    /// Number of dialogue lines per speaker, in first-speech order.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::parse_plain_text;
    ///
    /// let screenplay = parse_plain_text("INT. BAR - NIGHT\n\nJOE\nHey.\nYou again.\n\nANN\nMe again.\n");
    /// let counts = screenplay.dialogue_counts();
    /// assert_eq!(counts.get("JOE"), Some(&2));
    /// assert_eq!(counts.get("ANN"), Some(&1));
    /// ```
    pub fn dialogue_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for line in self.scenes.iter().flat_map(|scene| &scene.dialogue) {
            *counts.entry(line.character.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Text that precedes the first scene heading.
    pub fn preamble(&self) -> &str {
        let scene_len: usize = self.scenes.iter().map(|scene| scene.text.len()).sum();
        let split = self.text.len().saturating_sub(scene_len);
        self.text.get(..split).unwrap_or("")
    }
}
