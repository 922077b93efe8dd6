//! Final Draft XML (`.fdx`) adapter.
//!
//! An FDX document is a `FinalDraft` root holding a `Content` list of typed
//! paragraphs and, optionally, a `TitlePage` with its own paragraphs:
//!
//! ```xml
//! <FinalDraft DocumentType="Script" Version="5">
//!   <Content>
//!     <Paragraph Type="Scene Heading"><Text>INT. KITCHEN - NIGHT</Text></Paragraph>
//!     <Paragraph Type="Character"><Text>JOHN</Text></Paragraph>
//!     <Paragraph Type="Dialogue"><Text>Hello.</Text></Paragraph>
//!   </Content>
//! </FinalDraft>
//! ```
//!
//! A paragraph's text is the concatenation of its `Text` runs.

use super::{get_attribute, title_page_fields, TaggedBuilder, TaggedKind};
use crate::error::{Error, Result};
use crate::screenplay::Screenplay;
use quick_xml::events::Event;
use quick_xml::Reader;

const ADAPTER: &str = "fdx";

/// Final Draft XML reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct FdxAdapter;

/// Paragraph being read.
#[derive(Debug, Default)]
struct Paragraph {
    role: Option<String>,
    text: String,
}

impl FdxAdapter {
    /// Create an adapter.
    pub fn new() -> Self {
        Self
    }

    /// Map an FDX paragraph type onto a screenplay role.
    pub fn role_for(paragraph_type: &str) -> TaggedKind {
        match paragraph_type.trim().to_ascii_lowercase().as_str() {
            "scene heading" => TaggedKind::SceneHeading,
            "action" | "general" | "shot" => TaggedKind::Action,
            "character" => TaggedKind::Character,
            "dialogue" => TaggedKind::Dialogue,
            "parenthetical" => TaggedKind::Parenthetical,
            "transition" => TaggedKind::Transition,
            _ => TaggedKind::Other,
        }
    }

    /// Parse raw FDX bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Screenplay> {
        let xml = std::str::from_utf8(bytes)
            .map_err(|e| Error::tagged(ADAPTER, format!("document is not UTF-8: {}", e)))?;
        self.parse(xml.trim_start_matches('\u{feff}'))
    }

    /// Parse an FDX document.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::adapters::FdxAdapter;
    ///
    /// let xml = r#"<FinalDraft><Content>
    ///   <Paragraph Type="Scene Heading"><Text>EXT. DOCK - DAWN</Text></Paragraph>
    ///   <Paragraph Type="Character"><Text>NINA</Text></Paragraph>
    ///   <Paragraph Type="Dialogue"><Text>Cast off.</Text></Paragraph>
    /// </Content></FinalDraft>"#;
    ///
    /// let screenplay = FdxAdapter::new().parse(xml).unwrap();
    /// assert_eq!(screenplay.scenes[0].location, "DOCK");
    /// assert_eq!(screenplay.scenes[0].dialogue[0].character, "NINA");
    /// ```
    pub fn parse(&self, xml: &str) -> Result<Screenplay> {
        let mut reader = Reader::from_str(xml);
        // Runs inside a paragraph carry meaningful edge spaces
        reader.trim_text(false);

        let mut builder = TaggedBuilder::new();
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut in_title_page = false;
        let mut in_text = false;
        let mut current: Option<Paragraph> = None;
        let mut title_lines: Vec<String> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    match e.local_name().as_ref() {
                        b"FinalDraft" => seen_root = true,
                        b"TitlePage" => in_title_page = true,
                        b"Paragraph" => {
                            current = Some(Paragraph {
                                role: get_attribute(e, "Type"),
                                text: String::new(),
                            });
                        },
                        b"Text" => in_text = true,
                        _ => {},
                    }
                },
                Ok(Event::End(ref e)) => {
                    depth = depth.saturating_sub(1);
                    match e.local_name().as_ref() {
                        b"Text" => in_text = false,
                        b"TitlePage" => in_title_page = false,
                        b"Paragraph" => {
                            if let Some(paragraph) = current.take() {
                                if in_title_page {
                                    title_lines.push(paragraph.text);
                                } else {
                                    let role = paragraph
                                        .role
                                        .as_deref()
                                        .map(Self::role_for)
                                        .unwrap_or(TaggedKind::Other);
                                    builder.push(role, &paragraph.text);
                                }
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    if e.local_name().as_ref() == b"FinalDraft" {
                        seen_root = true;
                    }
                },
                Ok(Event::Text(e)) => {
                    if in_text {
                        if let Some(paragraph) = current.as_mut() {
                            let text = e
                                .unescape()
                                .map_err(|err| Error::tagged(ADAPTER, format!("bad text escape: {}", err)))?;
                            paragraph.text.push_str(&text);
                        }
                    }
                },
                Ok(Event::Eof) => {
                    if depth != 0 {
                        return Err(Error::tagged(ADAPTER, "unexpected end of document"));
                    }
                    break;
                },
                Err(e) => {
                    return Err(Error::tagged(
                        ADAPTER,
                        format!("XML error at byte {}: {}", reader.buffer_position(), e),
                    ));
                },
                _ => {},
            }
            buf.clear();
        }

        if !seen_root {
            return Err(Error::tagged(ADAPTER, "missing FinalDraft root element"));
        }

        let (title, author) = title_page_fields(&title_lines);
        if let Some(title) = title {
            builder.set_title(title);
        }
        if let Some(author) = author {
            builder.set_author(author);
        }

        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenplay::ParsingMethod;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>
<FinalDraft DocumentType="Script" Template="No" Version="5">
  <Content>
    <Paragraph Type="Action"><Text>FADE IN:</Text></Paragraph>
    <Paragraph Type="Scene Heading" Number="1"><Text>INT. </Text><Text Style="Bold">DINER</Text><Text> - NIGHT</Text></Paragraph>
    <Paragraph Type="Action"><Text>Rain against the glass.</Text></Paragraph>
    <Paragraph Type="Character"><Text>LOU (CONT'D)</Text></Paragraph>
    <Paragraph Type="Parenthetical"><Text>(to the cook)</Text></Paragraph>
    <Paragraph Type="Dialogue"><Text>Coffee &amp; pie.</Text></Paragraph>
    <Paragraph Type="Transition"><Text>CUT TO:</Text></Paragraph>
    <Paragraph Type="Scene Heading"><Text>EXT. PARKING LOT - CONTINUOUS</Text></Paragraph>
    <Paragraph Type="Cast List"><Text>LOU, THE COOK</Text></Paragraph>
  </Content>
  <TitlePage>
    <Content>
      <Paragraph Alignment="Center"><Text>LAST CALL</Text></Paragraph>
      <Paragraph Alignment="Center"><Text>Written by</Text></Paragraph>
      <Paragraph Alignment="Center"><Text>Sam Reyes</Text></Paragraph>
    </Content>
  </TitlePage>
</FinalDraft>"#;

    #[test]
    fn test_parse_sample() {
        let sp = FdxAdapter::new().parse(SAMPLE).unwrap();

        assert_eq!(sp.scenes.len(), 2);
        let diner = &sp.scenes[0];
        assert_eq!(diner.header, "INT. DINER - NIGHT");
        assert_eq!(diner.location, "DINER");
        assert_eq!(diner.time_of_day, "NIGHT");
        assert_eq!(diner.action, vec!["Rain against the glass.".to_string()]);
        assert_eq!(diner.dialogue[0].character, "LOU");
        assert_eq!(diner.dialogue[0].text, "Coffee & pie.");

        assert_eq!(sp.scenes[1].time_of_day, "CONTINUOUS");
        assert_eq!(sp.title.as_deref(), Some("LAST CALL"));
        assert_eq!(sp.author.as_deref(), Some("Sam Reyes"));
        assert_eq!(sp.metadata.parsing_method, ParsingMethod::TaggedAdapter);
        // Pre-heading paragraph is text only.
        assert!(sp.text.starts_with("FADE IN:\n"));
    }

    #[test]
    fn test_title_page_not_in_body() {
        let sp = FdxAdapter::new().parse(SAMPLE).unwrap();
        assert!(!sp.text.contains("Sam Reyes"));
    }

    #[test]
    fn test_role_mapping() {
        assert_eq!(FdxAdapter::role_for("Scene Heading"), TaggedKind::SceneHeading);
        assert_eq!(FdxAdapter::role_for("general"), TaggedKind::Action);
        assert_eq!(FdxAdapter::role_for("New Act"), TaggedKind::Other);
    }

    #[test]
    fn test_malformed_xml_is_tagged_error() {
        let err = FdxAdapter::new()
            .parse("<FinalDraft><Content><Paragraph Type=\"Action\"></Content></FinalDraft>")
            .unwrap_err();
        assert!(matches!(err, Error::TaggedFormat { adapter: "fdx", .. }));
    }

    #[test]
    fn test_truncated_document() {
        let err = FdxAdapter::new()
            .parse("<FinalDraft><Content><Paragraph Type=\"Action\"><Text>Hi")
            .unwrap_err();
        assert!(matches!(err, Error::TaggedFormat { .. }));
    }

    #[test]
    fn test_foreign_root() {
        let err = FdxAdapter::new().parse("<html><body/></html>").unwrap_err();
        assert!(err.to_string().contains("FinalDraft"));
    }

    #[test]
    fn test_bom_and_bytes() {
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(SAMPLE.as_bytes());
        assert_eq!(FdxAdapter::new().parse_bytes(&bytes).unwrap().scenes.len(), 2);

        let err = FdxAdapter::new().parse_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, Error::TaggedFormat { .. }));
    }
}
