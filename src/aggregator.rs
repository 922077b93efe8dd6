//! Scene aggregation: classified elements → [`Screenplay`].
//!
//! The aggregator owns the per-document character and location sets and the scene
//! being built. A scene is opened exactly when a scene heading arrives and sealed
//! by the next heading or by [`SceneAggregator::finish`]. Content before the first
//! heading only reaches the document text.
//!
//! Every element's text is written to the document text on its own line, and the
//! same line goes into the open scene's text, so the preamble followed by all scene
//! texts reproduces the document text exactly.

use crate::classifier::{ClassifiedElement, ElementKind, SceneHeading};
use crate::patterns::UNKNOWN;
use crate::screenplay::{DialogueLine, Scene, Screenplay, ScreenplayMetadata};
use indexmap::IndexSet;

/// Folds classified elements into scenes.
#[derive(Debug, Default)]
pub struct SceneAggregator {
    scenes: Vec<Scene>,
    current: Option<Scene>,
    characters: IndexSet<String>,
    locations: IndexSet<String>,
    text: String,
    elements: usize,
}

impl SceneAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scenes opened so far (sealed plus the open one).
    pub fn scene_count(&self) -> usize {
        self.scenes.len() + usize::from(self.current.is_some())
    }

    /// Fold one element.
    pub fn push(&mut self, element: &ClassifiedElement) {
        self.elements += 1;

        match &element.kind {
            ElementKind::SceneHeading(heading) => self.open_scene(&element.text, heading),
            ElementKind::Character { name, .. } => {
                if let Some(scene) = self.current.as_mut() {
                    scene.characters.insert(name.clone());
                    self.characters.insert(name.clone());
                }
            },
            ElementKind::Dialogue { character } => {
                if let Some(scene) = self.current.as_mut() {
                    scene.dialogue.push(DialogueLine {
                        character: character.clone().unwrap_or_else(|| UNKNOWN.to_string()),
                        text: element.text.clone(),
                    });
                }
            },
            ElementKind::Action => {
                if let Some(scene) = self.current.as_mut() {
                    scene.action.push(element.text.clone());
                }
            },
            ElementKind::Parenthetical { .. }
            | ElementKind::Transition
            | ElementKind::PageNumber
            | ElementKind::Unknown => {},
        }

        self.append_line(&element.text);
    }

    /// Fold a sequence of elements.
    pub fn extend<'a, I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = &'a ClassifiedElement>,
    {
        for element in elements {
            self.push(element);
        }
    }

    /// Seal the open scene and freeze everything into a [`Screenplay`].
    pub fn finish(mut self, metadata: ScreenplayMetadata) -> Screenplay {
        self.seal();
        log::debug!(
            "Aggregated {} elements into {} scenes ({} characters, {} locations)",
            self.elements,
            self.scenes.len(),
            self.characters.len(),
            self.locations.len()
        );

        Screenplay {
            title: None,
            author: None,
            scenes: self.scenes,
            characters: self.characters,
            locations: self.locations,
            text: self.text,
            metadata,
        }
    }

    fn open_scene(&mut self, header: &str, heading: &SceneHeading) {
        self.seal();
        let number = self.scenes.len() + 1;
        self.locations.insert(heading.location.clone());
        self.current = Some(Scene {
            number,
            header: header.to_string(),
            int_ext: heading.int_ext.clone(),
            setting: heading.setting,
            location: heading.location.clone(),
            time_of_day: heading.time_of_day.clone(),
            scene_number: heading.scene_number.clone(),
            characters: IndexSet::new(),
            dialogue: Vec::new(),
            action: Vec::new(),
            text: String::new(),
        });
    }

    fn seal(&mut self) {
        if let Some(scene) = self.current.take() {
            self.scenes.push(scene);
        }
    }

    fn append_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
        if let Some(scene) = self.current.as_mut() {
            scene.text.push_str(line);
            scene.text.push('\n');
        }
    }
}
