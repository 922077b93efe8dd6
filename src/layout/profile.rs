//! Layout profiles: horizontal-offset bands per screenplay element.
//!
//! Screenplay formatting is a geometry standard. Each authoring tool places scene
//! headings, character cues, dialogue and transitions at slightly different left
//! margins, so every known tool gets its own profile. Offsets are in points (1/72
//! inch) measured from the left edge of a US Letter page.
//!
//! Band boundaries are calibration, not invariants. They can be overridden with a
//! custom profile loaded from JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A half-open horizontal interval `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Inclusive lower bound
    pub min: f32,
    /// Exclusive upper bound, unbounded when absent
    #[serde(default)]
    pub max: Option<f32>,
}

impl Band {
    /// Create a bounded band.
    pub const fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Create a band open to the right edge of the page.
    pub const fn open(min: f32) -> Self {
        Self { min, max: None }
    }

    /// Check whether an offset falls inside the band.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::layout::Band;
    ///
    /// let band = Band::new(90.0, 150.0);
    /// assert!(band.contains(90.0));
    /// assert!(band.contains(149.9));
    /// assert!(!band.contains(150.0));
    /// assert!(Band::open(380.0).contains(5000.0));
    /// ```
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && self.max.map_or(true, |max| x < max)
    }

    /// Midpoint of a bounded band, or its lower bound when unbounded.
    pub fn representative(&self) -> f32 {
        match self.max {
            Some(max) => (self.min + max) / 2.0,
            None => self.min,
        }
    }

    fn validate(&self, label: &str) -> Result<()> {
        if !self.min.is_finite() || self.min < 0.0 {
            return Err(Error::InvalidProfile(format!("{} band has invalid min {}", label, self.min)));
        }
        if let Some(max) = self.max {
            if !max.is_finite() || max <= self.min {
                return Err(Error::InvalidProfile(format!(
                    "{} band is empty: [{}, {})",
                    label, self.min, max
                )));
            }
        }
        Ok(())
    }
}

/// Identifier of a layout profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileId {
    /// Wide, permissive bands used when the authoring tool is unknown
    Generic,
    /// Final Draft
    FinalDraft,
    /// WriterDuet
    WriterDuet,
    /// Celtx
    Celtx,
    /// Fade In
    FadeIn,
    /// Highland
    Highland,
    /// Trelby
    Trelby,
    /// Caller-supplied bands
    Custom,
}

impl ProfileId {
    /// Human-readable profile name.
    pub fn name(&self) -> &'static str {
        match self {
            ProfileId::Generic => "Generic",
            ProfileId::FinalDraft => "Final Draft",
            ProfileId::WriterDuet => "WriterDuet",
            ProfileId::Celtx => "Celtx",
            ProfileId::FadeIn => "Fade In",
            ProfileId::Highland => "Highland",
            ProfileId::Trelby => "Trelby",
            ProfileId::Custom => "Custom",
        }
    }
}

/// Horizontal-offset bands for every band-classified element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutProfile {
    /// Profile identifier
    pub id: ProfileId,
    /// Display name
    pub name: String,
    /// Scene heading column
    pub scene_heading: Band,
    /// Action column
    pub action: Band,
    /// Character cue column
    pub character: Band,
    /// Dialogue column
    pub dialogue: Band,
    /// Parenthetical column
    pub parenthetical: Band,
    /// Transition column (right-aligned, usually unbounded)
    pub transition: Band,
}

impl LayoutProfile {
    /// Generic profile: bands wide enough for any reasonable left margin.
    ///
    /// The dialogue and parenthetical bands overlap the character band; rule order
    /// in the classifier resolves the overlap.
    pub fn generic() -> Self {
        Self {
            id: ProfileId::Generic,
            name: ProfileId::Generic.name().to_string(),
            scene_heading: Band::new(0.0, 200.0),
            action: Band::new(0.0, 200.0),
            character: Band::new(200.0, 380.0),
            dialogue: Band::new(120.0, 320.0),
            parenthetical: Band::new(150.0, 340.0),
            transition: Band::open(380.0),
        }
    }

    /// Final Draft: headings at 1.5", dialogue 2.5", parentheticals 3.1", cues 3.7".
    pub fn final_draft() -> Self {
        Self {
            id: ProfileId::FinalDraft,
            name: ProfileId::FinalDraft.name().to_string(),
            scene_heading: Band::new(90.0, 150.0),
            action: Band::new(90.0, 150.0),
            character: Band::new(240.0, 330.0),
            dialogue: Band::new(165.0, 215.0),
            parenthetical: Band::new(200.0, 250.0),
            transition: Band::open(380.0),
        }
    }

    /// WriterDuet: cues at 3.5", parentheticals at 3.0".
    pub fn writer_duet() -> Self {
        Self {
            id: ProfileId::WriterDuet,
            name: ProfileId::WriterDuet.name().to_string(),
            scene_heading: Band::new(90.0, 150.0),
            action: Band::new(90.0, 150.0),
            character: Band::new(235.0, 320.0),
            dialogue: Band::new(160.0, 210.0),
            parenthetical: Band::new(195.0, 245.0),
            transition: Band::open(380.0),
        }
    }

    /// Celtx: narrower left margin on exported pages.
    pub fn celtx() -> Self {
        Self {
            id: ProfileId::Celtx,
            name: ProfileId::Celtx.name().to_string(),
            scene_heading: Band::new(60.0, 130.0),
            action: Band::new(60.0, 130.0),
            character: Band::new(200.0, 300.0),
            dialogue: Band::new(130.0, 200.0),
            parenthetical: Band::new(170.0, 230.0),
            transition: Band::open(350.0),
        }
    }

    /// Fade In.
    pub fn fade_in() -> Self {
        Self {
            id: ProfileId::FadeIn,
            name: ProfileId::FadeIn.name().to_string(),
            scene_heading: Band::new(95.0, 150.0),
            action: Band::new(95.0, 150.0),
            character: Band::new(245.0, 335.0),
            dialogue: Band::new(170.0, 220.0),
            parenthetical: Band::new(205.0, 255.0),
            transition: Band::open(390.0),
        }
    }

    /// Highland.
    pub fn highland() -> Self {
        Self {
            id: ProfileId::Highland,
            name: ProfileId::Highland.name().to_string(),
            scene_heading: Band::new(90.0, 155.0),
            action: Band::new(90.0, 155.0),
            character: Band::new(240.0, 330.0),
            dialogue: Band::new(160.0, 215.0),
            parenthetical: Band::new(195.0, 250.0),
            transition: Band::open(370.0),
        }
    }

    /// Trelby.
    pub fn trelby() -> Self {
        Self {
            id: ProfileId::Trelby,
            name: ProfileId::Trelby.name().to_string(),
            scene_heading: Band::new(85.0, 150.0),
            action: Band::new(85.0, 150.0),
            character: Band::new(230.0, 320.0),
            dialogue: Band::new(155.0, 210.0),
            parenthetical: Band::new(190.0, 245.0),
            transition: Band::open(370.0),
        }
    }

    /// Look up a built-in profile. `Custom` has no built-in bands and maps to generic.
    pub fn builtin(id: ProfileId) -> Self {
        match id {
            ProfileId::Generic | ProfileId::Custom => Self::generic(),
            ProfileId::FinalDraft => Self::final_draft(),
            ProfileId::WriterDuet => Self::writer_duet(),
            ProfileId::Celtx => Self::celtx(),
            ProfileId::FadeIn => Self::fade_in(),
            ProfileId::Highland => Self::highland(),
            ProfileId::Trelby => Self::trelby(),
        }
    }

    /// Load a custom profile from JSON and validate its bands.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::layout::{LayoutProfile, ProfileId};
    ///
    /// let json = r#"{
    ///     "id": "custom", "name": "House style",
    ///     "scene_heading": {"min": 70, "max": 140},
    ///     "action": {"min": 70, "max": 140},
    ///     "character": {"min": 230, "max": 320},
    ///     "dialogue": {"min": 150, "max": 230},
    ///     "parenthetical": {"min": 190, "max": 250},
    ///     "transition": {"min": 360}
    /// }"#;
    /// let profile = LayoutProfile::from_json(json)?;
    /// assert_eq!(profile.id, ProfileId::Custom);
    /// assert!(profile.transition.contains(600.0));
    /// # Ok::<(), screenplay_oxide::error::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: LayoutProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reject bands that are empty, negative or non-finite.
    pub fn validate(&self) -> Result<()> {
        self.scene_heading.validate("scene_heading")?;
        self.action.validate("action")?;
        self.character.validate("character")?;
        self.dialogue.validate("dialogue")?;
        self.parenthetical.validate("parenthetical")?;
        self.transition.validate("transition")?;
        Ok(())
    }
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self::generic()
    }
}

/// Registry of known profiles plus any registered custom ones.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<LayoutProfile>,
}

impl ProfileRegistry {
    /// Registry holding every built-in profile.
    pub fn new() -> Self {
        Self {
            profiles: vec![
                LayoutProfile::generic(),
                LayoutProfile::final_draft(),
                LayoutProfile::writer_duet(),
                LayoutProfile::celtx(),
                LayoutProfile::fade_in(),
                LayoutProfile::highland(),
                LayoutProfile::trelby(),
            ],
        }
    }

    /// Add a validated custom profile. A later registration with the same name wins.
    pub fn register(&mut self, profile: LayoutProfile) -> Result<()> {
        profile.validate()?;
        self.profiles.retain(|p| p.name != profile.name);
        self.profiles.push(profile);
        Ok(())
    }

    /// Profile for an id; the generic profile when the id is not registered.
    pub fn get(&self, id: ProfileId) -> &LayoutProfile {
        self.profiles
            .iter()
            .rev()
            .find(|p| p.id == id)
            .or_else(|| self.profiles.iter().find(|p| p.id == ProfileId::Generic))
            .unwrap_or(&self.profiles[0])
    }

    /// Profile by display name, case-insensitive.
    pub fn by_name(&self, name: &str) -> Option<&LayoutProfile> {
        self.profiles
            .iter()
            .rev()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// All registered profiles.
    pub fn profiles(&self) -> &[LayoutProfile] {
        &self.profiles
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
