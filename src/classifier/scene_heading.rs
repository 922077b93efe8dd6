//! Scene heading decomposition.
//!
//! A heading such as `INT. KITCHEN - NIGHT` is split into its interior/exterior
//! token, location and time of day. The same decomposition applies to every
//! supported language (`İÇ. EV - GÜNDÜZ`, `EXT. PLAYA - DÍA`) and to explicit
//! scene markers (`SCENE 12 - INT. HOUSE - DAY`).

use crate::patterns::{
    self, normalize_time_of_day, split_heading_remainder, HeadingMatch, EXTERIOR_TOKENS,
    INTERIOR_TOKENS, UNKNOWN,
};
use serde::{Deserialize, Serialize};

/// Language-independent reading of the interior/exterior token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Setting {
    /// Indoors
    Interior,
    /// Outdoors
    Exterior,
    /// Both (moving between, or intercut)
    InteriorExterior,
    /// No recognisable token
    #[default]
    Unknown,
}

impl Setting {
    /// Interpret a normalised int/ext token ("INT", "İÇ-DIŞ", "I-E").
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::classifier::Setting;
    ///
    /// assert_eq!(Setting::from_token("INT"), Setting::Interior);
    /// assert_eq!(Setting::from_token("DIŞ"), Setting::Exterior);
    /// assert_eq!(Setting::from_token("INT-EXT"), Setting::InteriorExterior);
    /// assert_eq!(Setting::from_token("UNKNOWN"), Setting::Unknown);
    /// ```
    pub fn from_token(token: &str) -> Self {
        let mut interior = false;
        let mut exterior = false;
        for part in token.split(['-', '/']).filter(|p| !p.is_empty()) {
            interior |= INTERIOR_TOKENS.contains(&part);
            exterior |= EXTERIOR_TOKENS.contains(&part);
        }
        match (interior, exterior) {
            (true, true) => Setting::InteriorExterior,
            (true, false) => Setting::Interior,
            (false, true) => Setting::Exterior,
            (false, false) => Setting::Unknown,
        }
    }
}

/// A decomposed scene heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneHeading {
    /// Interior/exterior token as written, upper-cased without dots ("INT", "İÇ", "INT-EXT")
    pub int_ext: String,
    /// Language-independent setting
    pub setting: Setting,
    /// Location ("KITCHEN"), or `UNKNOWN`
    pub location: String,
    /// Normalised time of day ("NIGHT", "GÜNDÜZ"), or `UNKNOWN`
    pub time_of_day: String,
    /// Printed number from an explicit scene marker
    pub scene_number: Option<String>,
}

impl SceneHeading {
    /// Decompose a line known to be a heading that carries no interior/exterior
    /// token, such as a forced plain-text heading or a tagged heading paragraph.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::classifier::{SceneHeading, Setting};
    ///
    /// let heading = SceneHeading::without_token("FLASHBACK - NIGHT");
    /// assert_eq!(heading.int_ext, "UNKNOWN");
    /// assert_eq!(heading.setting, Setting::Unknown);
    /// assert_eq!(heading.location, "FLASHBACK");
    /// assert_eq!(heading.time_of_day, "NIGHT");
    /// ```
    pub fn without_token(text: &str) -> Self {
        let (location, time) = split_heading_remainder(text);
        SceneHeading {
            int_ext: UNKNOWN.to_string(),
            setting: Setting::Unknown,
            location: location_or_unknown(location),
            time_of_day: normalize_time_of_day(time.as_deref().unwrap_or("")),
            scene_number: None,
        }
    }
}

/// Normalise an interior/exterior token: upper-case, dots and spaces removed,
/// combined forms joined with `-`.
fn normalize_int_ext(token: &str) -> String {
    token
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| if c == '/' { '-' } else { c })
        .collect::<String>()
        .to_uppercase()
}

fn location_or_unknown(location: String) -> String {
    let location = location.trim_end_matches(['.', ',']).trim();
    if location.is_empty() {
        UNKNOWN.to_string()
    } else {
        location.to_string()
    }
}

/// Decompose a scene heading; `None` when the text matches no heading pattern.
///
/// # Examples
///
/// ```
/// use screenplay_oxide::classifier::{parse_scene_heading, Setting};
///
/// let heading = parse_scene_heading("INT. KITCHEN - NIGHT").unwrap();
/// assert_eq!(heading.int_ext, "INT");
/// assert_eq!(heading.location, "KITCHEN");
/// assert_eq!(heading.time_of_day, "NIGHT");
/// assert_eq!(heading.setting, Setting::Interior);
///
/// let heading = parse_scene_heading("İÇ. EV - GÜNDÜZ").unwrap();
/// assert_eq!(heading.int_ext, "İÇ");
/// assert_eq!(heading.location, "EV");
/// assert_eq!(heading.time_of_day, "GÜNDÜZ");
/// ```
pub fn parse_scene_heading(text: &str) -> Option<SceneHeading> {
    match patterns::match_scene_heading(text)? {
        HeadingMatch::Prefix { token, rest } => {
            let int_ext = normalize_int_ext(&token);
            let (location, time) = split_heading_remainder(&text[rest..]);
            Some(SceneHeading {
                setting: Setting::from_token(&int_ext),
                int_ext,
                location: location_or_unknown(location),
                time_of_day: normalize_time_of_day(time.as_deref().unwrap_or("")),
                scene_number: None,
            })
        },
        HeadingMatch::Marker { number, rest } => {
            let remainder = text[rest..]
                .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ':' | '-' | '–' | '—'));

            // "SCENE 4 - INT. HOUSE - DAY": the marker wraps a regular heading
            if let Some(mut inner) = parse_scene_heading(remainder) {
                inner.scene_number = Some(number);
                return Some(inner);
            }

            let mut heading = SceneHeading::without_token(remainder);
            heading.scene_number = Some(number);
            Some(heading)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_heading() {
        let h = parse_scene_heading("EXT. BEACH - DAY").unwrap();
        assert_eq!(h.int_ext, "EXT");
        assert_eq!(h.setting, Setting::Exterior);
        assert_eq!(h.location, "BEACH");
        assert_eq!(h.time_of_day, "DAY");
    }

    #[test]
    fn test_lower_case_token() {
        let h = parse_scene_heading("int. kitchen - night").unwrap();
        assert_eq!(h.int_ext, "INT");
        assert_eq!(h.location, "kitchen");
        assert_eq!(h.time_of_day, "NIGHT");
    }

    #[test]
    fn test_combined_token() {
        let h = parse_scene_heading("INT./EXT. CAR - MOVING - DAY").unwrap();
        assert_eq!(h.int_ext, "INT-EXT");
        assert_eq!(h.setting, Setting::InteriorExterior);
        assert_eq!(h.location, "CAR");
        assert_eq!(h.time_of_day, "MOVING - DAY");
    }

    #[test]
    fn test_turkish_heading() {
        let h = parse_scene_heading("DIŞ. BAHÇE - GECE").unwrap();
        assert_eq!(h.int_ext, "DIŞ");
        assert_eq!(h.setting, Setting::Exterior);
        assert_eq!(h.location, "BAHÇE");
        assert_eq!(h.time_of_day, "GECE");
    }

    #[test]
    fn test_spanish_and_german_headings() {
        let h = parse_scene_heading("INTERIOR COCINA - NOCHE").unwrap();
        assert_eq!(h.setting, Setting::Interior);
        assert_eq!(h.location, "COCINA");
        assert_eq!(h.time_of_day, "NOCHE");

        let h = parse_scene_heading("AUSSEN. STRASSE - TAG").unwrap();
        assert_eq!(h.setting, Setting::Exterior);
        assert_eq!(h.time_of_day, "TAG");
    }

    #[test]
    fn test_missing_time_of_day() {
        let h = parse_scene_heading("INT. HALLWAY").unwrap();
        assert_eq!(h.location, "HALLWAY");
        assert_eq!(h.time_of_day, UNKNOWN);
    }

    #[test]
    fn test_missing_location() {
        let h = parse_scene_heading("EXT.").unwrap();
        assert_eq!(h.location, UNKNOWN);
        assert_eq!(h.time_of_day, UNKNOWN);
    }

    #[test]
    fn test_printed_scene_numbers_stripped() {
        let h = parse_scene_heading("12 INT. HOUSE - DAY 12").unwrap();
        assert_eq!(h.location, "HOUSE");
        assert_eq!(h.time_of_day, "DAY");
    }

    #[test]
    fn test_scene_marker_alone() {
        let h = parse_scene_heading("SCENE 7").unwrap();
        assert_eq!(h.int_ext, UNKNOWN);
        assert_eq!(h.setting, Setting::Unknown);
        assert_eq!(h.scene_number.as_deref(), Some("7"));
        assert_eq!(h.location, UNKNOWN);
    }

    #[test]
    fn test_scene_marker_wrapping_heading() {
        let h = parse_scene_heading("SAHNE 3 - İÇ. OKUL - SABAH").unwrap();
        assert_eq!(h.int_ext, "İÇ");
        assert_eq!(h.location, "OKUL");
        assert_eq!(h.time_of_day, "SABAH");
        assert_eq!(h.scene_number.as_deref(), Some("3"));
    }

    #[test]
    fn test_scene_marker_with_location() {
        let h = parse_scene_heading("ESCENA 12 - CASA - NOCHE").unwrap();
        assert_eq!(h.location, "CASA");
        assert_eq!(h.time_of_day, "NOCHE");
    }

    #[test]
    fn test_not_a_heading() {
        assert!(parse_scene_heading("She walks into the kitchen.").is_none());
    }
}
