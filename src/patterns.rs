//! Pattern tables for screenplay element recognition.
//!
//! All tables are immutable and compiled once. They cover English plus Turkish,
//! Spanish, French, German, Italian and Portuguese screenplay conventions. The
//! classifier, the plain-text fallback engine and the tagged adapters share them,
//! so a heading recognised in one engine is recognised in all of them.

use lazy_static::lazy_static;
use regex::Regex;

/// Interior/exterior prefix tokens, combined forms first so the longest wins.
const SCENE_PREFIX: &str = concat!(
    r"(?P<prefix>",
    r"INT\.?\s*[/\-]\s*EXT\.?|EXT\.?\s*[/\-]\s*INT\.?|I\s*/\s*E\.?|",
    r"INT\.?\s*[/\-]\s*EST\.?|",
    r"[İI]Ç\.?\s*[/\-]\s*D[Iıİ]Ş\.?|D[Iıİ]Ş\.?\s*[/\-]\s*[İI]Ç\.?|",
    r"INNEN\s*[/\-]\s*AU(?:SS|ß)EN|AU(?:SS|ß)EN\s*[/\-]\s*INNEN|",
    // Whole words read as prose in mixed case, so they only count in capitals
    r"(?-i:INTERIOR|EXTERIOR|INTÉRIEUR|EXTÉRIEUR|INTERNO|ESTERNO|EST|INNEN|AU(?:SS|ß)EN)\.?|",
    r"(?:INT|EXT|[İI]Ç|D[Iıİ]Ş)\.?",
    r")",
);

/// Explicit scene markers ("SCENE 12") in the supported languages.
const SCENE_MARKER: &str =
    r"(?P<marker>(?-i:SCENE|SC\.|SAHNE|ESCENA|SCÈNE|SZENE|CENA|SCENA))\s+(?P<number>\d+[A-Z]?)\.?";

lazy_static! {
    /// Page number line: digits with an optional trailing period
    static ref RE_PAGE_NUMBER: Regex = Regex::new(r"^\d+\.?$").unwrap();

    /// Scene heading introduced by an interior/exterior token, optionally preceded by
    /// a printed scene number ("12 INT. HOUSE - DAY")
    static ref RE_SCENE_PREFIX: Regex = Regex::new(&format!(
        r"(?i)^\s*(?:\d+[A-Z]?\.?\s+)?{}(?:\s+|$)",
        SCENE_PREFIX
    ))
    .unwrap();

    /// Scene heading introduced by an explicit marker
    static ref RE_SCENE_MARKER: Regex =
        Regex::new(&format!(r"(?i)^\s*{}(?:\s|$|[:\-–—])", SCENE_MARKER)).unwrap();

    /// Printed scene number trailing the time-of-day slot ("DAY 12", "DAY 12A")
    static ref RE_TRAILING_SCENE_NUMBER: Regex = Regex::new(r"\s+\d+[A-Z]?\.?\s*$").unwrap();

    /// Location/time separator: a dash of any width surrounded by spaces
    static ref RE_HEADING_SEPARATOR: Regex = Regex::new(r"\s+[-–—]+\s+").unwrap();

    /// Transition cues: the whole line, with at most a trailing colon or period
    static ref RE_TRANSITION: Regex = Regex::new(concat!(
        r"(?i)^\s*(?:",
        r"FADE\s+(?:IN|OUT|TO(?:\s+BLACK)?)|FADE\s*-?\s*(?:IN|OUT)|",
        r"(?:SMASH\s+|MATCH\s+|JUMP\s+|HARD\s+|TIME\s+)?CUT\s+TO|",
        r"DISSOLVE\s+TO|WIPE\s+TO|IRIS\s+(?:IN|OUT)|",
        r"\(?CONTINUED\)?|\(?CONT'?D\)?|(?:END\s+)?MONTAGE|BACK\s+TO|INTERCUT|THE\s+END|",
        r"KESME|GEÇİŞ|KARARMA|AÇILMA|DEVAM\s+EDİYOR|",
        r"CORTE\s+A|FUNDIDO\s+(?:A|EN|DE)|ENCADENADO|",
        r"COUPE\s+(?:À|SUR)|FONDU\s+(?:AU|ENCHAÎNÉ|AU\s+NOIR)|",
        r"SCHNITT|ABBLENDE|AUFBLENDE|ÜBERBLENDUNG|",
        r"STACCO\s+SU|DISSOLVENZA",
        r")\s*[:.!]?\s*$"
    ))
    .unwrap();

    /// Trailing annotation on a character cue: "(V.O.)", "(O.S.)", "(CONT'D)"
    static ref RE_CUE_ANNOTATION: Regex = Regex::new(r"\s*\(([^()]*)\)\s*$").unwrap();

    /// Runs of whitespace
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Day-part keywords recognised in the time-of-day slot of a scene heading.
///
/// Multi-word entries precede their single-word prefixes.
pub const DAY_PARTS: &[&str] = &[
    // English
    "MOMENTS LATER",
    "SAME TIME",
    "MAGIC HOUR",
    "CONTINUOUS",
    "AFTERNOON",
    "MIDNIGHT",
    "MORNING",
    "EVENING",
    "SUNRISE",
    "SUNSET",
    "NIGHT",
    "LATER",
    "DAWN",
    "DUSK",
    "NOON",
    "DAY",
    // Turkish
    "ÖĞLEDEN SONRA",
    "GÜN BATIMI",
    "GÜNDÜZ",
    "AKŞAM",
    "SABAH",
    "ŞAFAK",
    "DEVAM",
    "ÖĞLE",
    "GECE",
    // Spanish
    "ATARDECER",
    "AMANECER",
    "CONTINUO",
    "MAÑANA",
    "NOCHE",
    "TARDE",
    "DÍA",
    // French
    "CRÉPUSCULE",
    "APRÈS-MIDI",
    "MATIN",
    "JOUR",
    "NUIT",
    "SOIR",
    "AUBE",
    // German
    "NACHMITTAG",
    "DÄMMERUNG",
    "MORGEN",
    "NACHT",
    "ABEND",
    "TAG",
    // Italian
    "POMERIGGIO",
    "TRAMONTO",
    "MATTINA",
    "GIORNO",
    "NOTTE",
    "SERA",
    "ALBA",
    // Portuguese
    "ENTARDECER",
    "MANHÃ",
    "NOITE",
    "DIA",
];

/// Interior tokens, compared after dots and whitespace are removed.
pub const INTERIOR_TOKENS: &[&str] = &["INT", "INTERIOR", "INTÉRIEUR", "INTERNO", "İÇ", "IÇ", "INNEN", "I"];

/// Exterior tokens, compared after dots and whitespace are removed.
pub const EXTERIOR_TOKENS: &[&str] = &[
    "EXT", "EXTERIOR", "EXTÉRIEUR", "ESTERNO", "EST", "DIŞ", "DİŞ", "AUSSEN", "AUßEN", "E",
];

/// Upper-case words that look like character cues but never are.
pub const CUE_DENYLIST: &[&str] = &[
    "FADE", "CUT", "CONTINUED", "MONTAGE", "END", "TITLE", "CREDITS", "SUPER", "INSERT", "INTERCUT",
];

/// Placeholder for heading slots that could not be recovered.
pub const UNKNOWN: &str = "UNKNOWN";

/// Where a scene-heading pattern matched inside a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingMatch {
    /// Interior/exterior prefix token; `rest` starts right after it.
    Prefix {
        /// The token as written ("INT.", "İÇ", "INT./EXT.")
        token: String,
        /// Byte offset where the rest of the heading begins
        rest: usize,
    },
    /// Explicit "SCENE n" marker; `rest` starts right after the number.
    Marker {
        /// The printed scene number ("12", "4B")
        number: String,
        /// Byte offset where the rest of the heading begins
        rest: usize,
    },
}

/// Check for a page-number line (at most four characters, digits, optional period).
///
/// # Examples
///
/// ```
/// use screenplay_oxide::patterns::is_page_number;
///
/// assert!(is_page_number("12."));
/// assert!(is_page_number(" 104 "));
/// assert!(!is_page_number("12345"));
/// assert!(!is_page_number("1A"));
/// ```
pub fn is_page_number(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() <= 4 && RE_PAGE_NUMBER.is_match(trimmed)
}

/// Match a scene-heading pattern at the start of a line.
pub fn match_scene_heading(text: &str) -> Option<HeadingMatch> {
    if let Some(caps) = RE_SCENE_PREFIX.captures(text) {
        let prefix = caps.name("prefix")?;
        return Some(HeadingMatch::Prefix {
            token: prefix.as_str().to_string(),
            rest: prefix.end(),
        });
    }

    let caps = RE_SCENE_MARKER.captures(text)?;
    let number = caps.name("number")?;
    Some(HeadingMatch::Marker {
        number: number.as_str().to_string(),
        rest: number.end(),
    })
}

/// Check whether a line matches any scene-heading pattern.
///
/// # Examples
///
/// ```
/// use screenplay_oxide::patterns::is_scene_heading;
///
/// assert!(is_scene_heading("INT. KITCHEN - NIGHT"));
/// assert!(is_scene_heading("ext. beach - day"));
/// assert!(is_scene_heading("İÇ. EV - GÜNDÜZ"));
/// assert!(is_scene_heading("SAHNE 3"));
/// assert!(!is_scene_heading("INTERVIEW ROOM"));
/// ```
pub fn is_scene_heading(text: &str) -> bool {
    match_scene_heading(text).is_some()
}

/// Check whether a line is a transition cue.
pub fn is_transition(text: &str) -> bool {
    RE_TRANSITION.is_match(text)
}

/// Check whether a line is fully wrapped in parentheses.
pub fn is_parenthetical(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() >= 2 && trimmed.starts_with('(') && trimmed.ends_with(')')
}

/// Check whether every cased letter in the text is upper-case.
///
/// Digits, punctuation and uncased scripts are ignored, but at least one letter
/// must be present.
pub fn is_upper_case(text: &str) -> bool {
    let mut has_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            has_letter = true;
            if c.is_lowercase() {
                return false;
            }
        }
    }
    has_letter
}

/// Check whether an apparent character cue is a known false positive.
pub fn is_denylisted_cue(name: &str) -> bool {
    name.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|word| !word.is_empty())
        .any(|word| CUE_DENYLIST.iter().any(|deny| word.eq_ignore_ascii_case(deny)))
}

/// Split a character cue into its canonical name and trailing annotations.
///
/// Annotations are returned outermost-last, e.g. `"JOHN (V.O.) (CONT'D)"` yields
/// `("JOHN", ["V.O.", "CONT'D"])`.
pub fn split_cue(text: &str) -> (String, Vec<String>) {
    let mut rest = text.trim();
    let mut annotations = Vec::new();

    loop {
        rest = rest.trim_end_matches(|c: char| c == '^' || c == ':' || c.is_whitespace());
        match RE_CUE_ANNOTATION.captures(rest) {
            Some(caps) => {
                let whole = caps.get(0).map(|m| m.start()).unwrap_or(rest.len());
                if whole == 0 {
                    // Entire cue is a parenthetical; keep it as the name
                    break;
                }
                if let Some(inner) = caps.get(1) {
                    annotations.push(inner.as_str().trim().to_string());
                }
                rest = &rest[..whole];
            },
            None => break,
        }
    }

    annotations.reverse();
    (collapse_whitespace(rest), annotations)
}

/// Canonical character name: trailing annotations and markers removed.
///
/// Canonicalization is idempotent.
///
/// # Examples
///
/// ```
/// use screenplay_oxide::patterns::clean_character_name;
///
/// assert_eq!(clean_character_name("JOHN (V.O.)"), "JOHN");
/// assert_eq!(clean_character_name(&clean_character_name("JOHN (V.O.)")), "JOHN");
/// assert_eq!(clean_character_name("MARY  ANN (O.S.) (CONT'D)"), "MARY ANN");
/// ```
pub fn clean_character_name(text: &str) -> String {
    split_cue(text).0
}

/// Normalize the time-of-day slot of a heading against [`DAY_PARTS`].
///
/// A recognised day part is returned in its canonical spelling; unrecognised text
/// is kept upper-cased; an empty slot yields [`UNKNOWN`].
///
/// # Examples
///
/// ```
/// use screenplay_oxide::patterns::normalize_time_of_day;
///
/// assert_eq!(normalize_time_of_day("night"), "NIGHT");
/// assert_eq!(normalize_time_of_day("DAY (FLASHBACK)"), "DAY");
/// assert_eq!(normalize_time_of_day("Gündüz."), "GÜNDÜZ");
/// assert_eq!(normalize_time_of_day(""), "UNKNOWN");
/// ```
pub fn normalize_time_of_day(raw: &str) -> String {
    let cleaned = raw
        .trim()
        .trim_end_matches(|c: char| c == '.' || c == ',' || c == ';')
        .trim();
    if cleaned.is_empty() {
        return UNKNOWN.to_string();
    }

    let upper = collapse_whitespace(&cleaned.to_uppercase());
    for part in DAY_PARTS {
        if upper == *part {
            return (*part).to_string();
        }
        if let Some(tail) = upper.strip_prefix(part) {
            if tail.starts_with(|c: char| !c.is_alphanumeric()) {
                return (*part).to_string();
            }
        }
    }
    upper
}

/// Split the remainder of a heading into location and time-of-day text.
///
/// Only the first separator splits; later dashes stay in the time-of-day slot.
pub fn split_heading_remainder(rest: &str) -> (String, Option<String>) {
    let rest = rest.trim().trim_start_matches(['.', ':', '-', '–', '—']).trim();

    match RE_HEADING_SEPARATOR.find(rest) {
        Some(sep) => {
            let time = RE_TRAILING_SCENE_NUMBER.replace(rest[sep.end()..].trim(), "");
            (rest[..sep.start()].trim().to_string(), Some(time.trim().to_string()))
        },
        None => {
            // Trailing dash with nothing after it: "INT. HALL -"
            let location = rest.trim_end_matches(['-', '–', '—']).trim();
            (location.to_string(), None)
        },
    }
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_numbers() {
        assert!(is_page_number("1"));
        assert!(is_page_number("1234"));
        assert!(is_page_number("99."));
        assert!(!is_page_number("1234."));
        assert!(!is_page_number(""));
        assert!(!is_page_number("INT."));
    }

    #[test]
    fn test_english_heading_prefixes() {
        for line in [
            "INT. KITCHEN - NIGHT",
            "EXT. FIELD - DAY",
            "INT./EXT. CAR - MOVING - DAY",
            "INT/EXT CAR - NIGHT",
            "I/E. HALLWAY - DAY",
            "int. kitchen - night",
            "12 INT. HOUSE - DAY 12",
            "INTERIOR SPACESHIP - NIGHT",
        ] {
            assert!(is_scene_heading(line), "expected heading: {}", line);
        }
    }

    #[test]
    fn test_localized_heading_prefixes() {
        for line in [
            "İÇ. EV - GÜNDÜZ",
            "DIŞ. BAHÇE - GECE",
            "İÇ/DIŞ. ARABA - AKŞAM",
            "INNEN - KÜCHE - NACHT",
            "AUSSEN. STRASSE - TAG",
            "EST. PIAZZA - GIORNO",
            "INT. COCINA - NOCHE",
            "SCÈNE 4",
            "ESCENA 12 - CASA",
        ] {
            assert!(is_scene_heading(line), "expected heading: {}", line);
        }
    }

    #[test]
    fn test_non_headings() {
        for line in [
            "INTERVIEW ROOM",
            "EXTRA! EXTRA!",
            "She enters.",
            "INTO THE WOODS",
            "SCENES FROM A MALL",
            "Interior lights flicker on.",
            "Exterior walls crumble.",
            "Est. 1887, the mill looms.",
            "Innen ist es dunkel.",
            "Scene 2 begins.",
            "Sahne 3 başlıyor.",
        ] {
            assert!(!is_scene_heading(line), "unexpected heading: {}", line);
        }
    }

    #[test]
    fn test_prefix_match_offsets() {
        let line = "INT. KITCHEN - NIGHT";
        match match_scene_heading(line) {
            Some(HeadingMatch::Prefix { token, rest }) => {
                assert_eq!(token, "INT.");
                assert_eq!(&line[rest..], " KITCHEN - NIGHT");
            },
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_marker_match() {
        match match_scene_heading("SAHNE 5 - EV") {
            Some(HeadingMatch::Marker { number, .. }) => assert_eq!(number, "5"),
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_transitions() {
        for line in [
            "FADE IN:",
            "FADE OUT.",
            "CUT TO:",
            "smash cut to:",
            "DISSOLVE TO:",
            "CONTINUED:",
            "(CONTINUED)",
            "MONTAGE",
            "KESME:",
            "CORTE A:",
        ] {
            assert!(is_transition(line), "expected transition: {}", line);
        }
        assert!(!is_transition("JOHN"));
        assert!(!is_transition("CUTTER"));
    }

    #[test]
    fn test_transition_word_opening_a_sentence() {
        for line in [
            "Back to work, everyone.",
            "The end of the bar is empty.",
            "Intercut between the two calls.",
            "Schnittlauch wächst im Garten.",
            "CUT TO THE CHASE, PLEASE",
        ] {
            assert!(!is_transition(line), "unexpected transition: {}", line);
        }
        assert!(is_transition("BACK TO:"));
        assert!(is_transition("THE END."));
        assert!(is_transition("fade to black."));
    }

    #[test]
    fn test_parenthetical() {
        assert!(is_parenthetical("(beat)"));
        assert!(is_parenthetical("  (whispering)  "));
        assert!(!is_parenthetical("(beat) and more"));
        assert!(!is_parenthetical("("));
    }

    #[test]
    fn test_upper_case() {
        assert!(is_upper_case("JOHN"));
        assert!(is_upper_case("DR. O'MALLEY"));
        assert!(is_upper_case("ŞÜKRÜ"));
        assert!(!is_upper_case("John"));
        assert!(!is_upper_case("123"));
    }

    #[test]
    fn test_denylist() {
        assert!(is_denylisted_cue("CONTINUED"));
        assert!(is_denylisted_cue("THE END"));
        assert!(is_denylisted_cue("MAIN TITLE"));
        assert!(!is_denylisted_cue("CUTLER"));
        assert!(!is_denylisted_cue("JOHN"));
    }

    #[test]
    fn test_split_cue() {
        let (name, ext) = split_cue("JOHN (V.O.) (CONT'D)");
        assert_eq!(name, "JOHN");
        assert_eq!(ext, vec!["V.O.".to_string(), "CONT'D".to_string()]);

        let (name, ext) = split_cue("SARAH ^");
        assert_eq!(name, "SARAH");
        assert!(ext.is_empty());
    }

    #[test]
    fn test_clean_is_idempotent() {
        for cue in ["JOHN (V.O.)", "MARY:", "BOB (O.S.) (CONT'D)", "(beat)", "AHMET"] {
            let once = clean_character_name(cue);
            assert_eq!(clean_character_name(&once), once);
        }
    }

    #[test]
    fn test_time_of_day() {
        assert_eq!(normalize_time_of_day("NIGHT"), "NIGHT");
        assert_eq!(normalize_time_of_day("moments later"), "MOMENTS LATER");
        assert_eq!(normalize_time_of_day("GECE"), "GECE");
        assert_eq!(normalize_time_of_day("NOCHE."), "NOCHE");
        assert_eq!(normalize_time_of_day("DAYBREAK"), "DAYBREAK");
        assert_eq!(normalize_time_of_day("   "), UNKNOWN);
    }

    #[test]
    fn test_split_heading_remainder() {
        assert_eq!(
            split_heading_remainder(" KITCHEN - NIGHT"),
            ("KITCHEN".to_string(), Some("NIGHT".to_string()))
        );
        assert_eq!(
            split_heading_remainder(" CAR - MOVING - DAY"),
            ("CAR".to_string(), Some("MOVING - DAY".to_string()))
        );
        assert_eq!(split_heading_remainder(" HALL -"), ("HALL".to_string(), None));
        assert_eq!(split_heading_remainder(" HIGHWAY 101"), ("HIGHWAY 101".to_string(), None));
        assert_eq!(
            split_heading_remainder(". HOUSE — DAY 12"),
            ("HOUSE".to_string(), Some("DAY".to_string()))
        );
    }
}
