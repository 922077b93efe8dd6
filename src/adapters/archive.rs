//! Zip-packaged screenplay archives (`.celtx` and similar).
//!
//! The archive holds an HTML script document whose paragraphs are tagged by class:
//!
//! ```html
//! <p class="sceneheading">INT. HOUSE - DAY</p>
//! <p class="character">BOB</p>
//! <p class="dialog">Hi.</p>
//! ```
//!
//! Unpacking is delegated to an [`ArchiveDecoder`] so callers can supply their
//! own container handling; [`ZipArchiveDecoder`] covers zip files when the
//! `archive` feature is enabled.

use super::{get_attribute, TaggedBuilder, TaggedKind};
use crate::error::{Error, Result};
use crate::screenplay::Screenplay;
use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;

const ADAPTER: &str = "archive";

/// Extracts the inner script markup from an archive buffer.
pub trait ArchiveDecoder: Send + Sync {
    /// Return the script document contained in `buffer`.
    fn decode(&self, buffer: &[u8]) -> Result<String>;
}

/// Zip decoder: returns the first HTML entry, preferring one named `script*`.
#[cfg(feature = "archive")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveDecoder;

#[cfg(feature = "archive")]
impl ArchiveDecoder for ZipArchiveDecoder {
    fn decode(&self, buffer: &[u8]) -> Result<String> {
        use std::io::{Cursor, Read};
        use zip::ZipArchive;

        let mut archive = ZipArchive::new(Cursor::new(buffer))
            .map_err(|e| Error::tagged(ADAPTER, format!("failed to open zip archive: {}", e)))?;

        let mut candidates: Vec<String> = archive
            .file_names()
            .filter(|name| {
                let lower = name.to_ascii_lowercase();
                lower.ends_with(".html") || lower.ends_with(".htm")
            })
            .map(str::to_string)
            .collect();
        candidates.sort_by_key(|name| {
            let base = name.rsplit('/').next().unwrap_or(name).to_ascii_lowercase();
            (!base.starts_with("script"), name.clone())
        });

        let name = candidates
            .first()
            .ok_or_else(|| Error::tagged(ADAPTER, "archive contains no script document"))?;
        log::debug!("Reading script document '{}' from archive", name);

        let mut file = archive
            .by_name(name)
            .map_err(|e| Error::tagged(ADAPTER, format!("failed to read {}: {}", name, e)))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::tagged(ADAPTER, format!("failed to read {}: {}", name, e)))?;
        Ok(content)
    }
}

/// Tagged archive adapter.
pub struct ArchiveAdapter {
    decoder: Box<dyn ArchiveDecoder>,
}

impl std::fmt::Debug for ArchiveAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveAdapter").finish_non_exhaustive()
    }
}

#[cfg(feature = "archive")]
impl Default for ArchiveAdapter {
    fn default() -> Self {
        Self::new(Box::new(ZipArchiveDecoder))
    }
}

impl ArchiveAdapter {
    /// Create an adapter using the given decoder.
    pub fn new(decoder: Box<dyn ArchiveDecoder>) -> Self {
        Self { decoder }
    }

    /// Decode the archive and parse its script markup.
    pub fn parse(&self, buffer: &[u8]) -> Result<Screenplay> {
        let markup = self.decoder.decode(buffer)?;
        parse_archive_markup(&markup)
    }
}

/// Map a paragraph class list onto a screenplay role.
fn role_for_class(class: &str) -> Option<TaggedKind> {
    class.split_whitespace().find_map(|c| match c.to_ascii_lowercase().as_str() {
        "sceneheading" | "scene-heading" => Some(TaggedKind::SceneHeading),
        "action" | "shot" => Some(TaggedKind::Action),
        "character" => Some(TaggedKind::Character),
        "dialog" | "dialogue" => Some(TaggedKind::Dialogue),
        "parenthetical" => Some(TaggedKind::Parenthetical),
        "transition" => Some(TaggedKind::Transition),
        _ => None,
    })
}

/// Named entities that script exports use beyond the XML five.
fn resolve_html_entity(entity: &str) -> Option<&'static str> {
    let value = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "copy" => "\u{a9}",
        _ => return None,
    };
    Some(value)
}

/// Text content with numeric and common named HTML entities resolved.
///
/// An entity nothing resolves leaves the run as written.
fn html_text(e: &BytesText) -> String {
    match e.unescape_with(resolve_html_entity) {
        Ok(text) => text.into_owned(),
        Err(err) => {
            log::debug!("Keeping raw paragraph text: {}", err);
            String::from_utf8_lossy(e).into_owned()
        },
    }
}

/// Parse class-tagged script markup.
///
/// Fails when the markup is malformed or contains no screenplay paragraphs at all.
///
/// # Examples
///
/// ```
/// use screenplay_oxide::adapters::parse_archive_markup;
///
/// let html = r#"<html><body>
///   <p class="sceneheading">INT. HOUSE - DAY</p>
///   <p class="character">BOB</p>
///   <p class="dialog">Hi.</p>
/// </body></html>"#;
///
/// let screenplay = parse_archive_markup(html).unwrap();
/// assert_eq!(screenplay.scenes[0].dialogue[0].character, "BOB");
/// ```
pub fn parse_archive_markup(markup: &str) -> Result<Screenplay> {
    let mut reader = Reader::from_str(markup);
    reader.trim_text(false);
    // HTML void elements (<br>, <meta>) are never closed
    reader.check_end_names(false);

    let mut builder = TaggedBuilder::new();
    let mut buf = Vec::new();
    let mut paragraph: Option<(TaggedKind, String)> = None;
    let mut in_title = false;
    let mut title = String::new();
    let mut tagged = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" | b"P" => {
                    if let Some(role) = get_attribute(e, "class").as_deref().and_then(role_for_class) {
                        paragraph = Some((role, String::new()));
                    }
                },
                b"br" | b"BR" => {
                    if let Some((_, text)) = paragraph.as_mut() {
                        text.push(' ');
                    }
                },
                b"title" | b"TITLE" => in_title = true,
                b"meta" | b"META" => read_meta(e, &mut builder),
                _ => {},
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"br" | b"BR" => {
                    if let Some((_, text)) = paragraph.as_mut() {
                        text.push(' ');
                    }
                },
                b"meta" | b"META" => read_meta(e, &mut builder),
                _ => {},
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" | b"P" => {
                    if let Some((role, text)) = paragraph.take() {
                        builder.push(role, &text);
                        tagged += 1;
                    }
                },
                b"title" | b"TITLE" => in_title = false,
                _ => {},
            },
            Ok(Event::Text(e)) => {
                if let Some((_, text)) = paragraph.as_mut() {
                    text.push_str(&html_text(&e));
                } else if in_title {
                    title.push_str(&html_text(&e));
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::tagged(
                    ADAPTER,
                    format!("markup error at byte {}: {}", reader.buffer_position(), e),
                ));
            },
            _ => {},
        }
        buf.clear();
    }

    if tagged == 0 {
        return Err(Error::tagged(ADAPTER, "no screenplay paragraphs in script document"));
    }

    builder.set_title(title);
    Ok(builder.finish())
}

fn read_meta(e: &quick_xml::events::BytesStart, builder: &mut TaggedBuilder) {
    let name = get_attribute(e, "name").unwrap_or_default();
    if name.eq_ignore_ascii_case("author") {
        if let Some(content) = get_attribute(e, "content") {
            builder.set_author(content);
        }
    }
}
