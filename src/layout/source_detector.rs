//! Authoring-tool detection from document metadata.
//!
//! PDF exports from screenplay software usually name the tool in the creator or
//! producer field. Detection is a case-insensitive substring match against a
//! priority-ordered signature list; the first hit wins and anything else gets the
//! generic profile.

use crate::layout::profile::ProfileId;

/// Authoring-tool signatures in priority order.
const SIGNATURES: &[(&str, ProfileId)] = &[
    ("final draft", ProfileId::FinalDraft),
    ("finaldraft", ProfileId::FinalDraft),
    ("writerduet", ProfileId::WriterDuet),
    ("writer duet", ProfileId::WriterDuet),
    ("celtx", ProfileId::Celtx),
    ("fade in", ProfileId::FadeIn),
    ("fadein", ProfileId::FadeIn),
    ("highland", ProfileId::Highland),
    ("trelby", ProfileId::Trelby),
];

/// Select a layout profile from creator/producer metadata.
///
/// Never fails: missing metadata or an unknown tool yields [`ProfileId::Generic`].
///
/// # Examples
///
/// ```
/// use screenplay_oxide::layout::{detect_profile, ProfileId};
///
/// assert_eq!(detect_profile(Some("Final Draft 12"), None), ProfileId::FinalDraft);
/// assert_eq!(detect_profile(None, Some("CELTX PDF export")), ProfileId::Celtx);
/// assert_eq!(detect_profile(Some("Microsoft Word"), None), ProfileId::Generic);
/// assert_eq!(detect_profile(None, None), ProfileId::Generic);
/// ```
pub fn detect_profile(creator: Option<&str>, producer: Option<&str>) -> ProfileId {
    let fields: Vec<String> = [creator, producer]
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect();

    for (signature, id) in SIGNATURES {
        if fields.iter().any(|field| field.contains(signature)) {
            log::debug!("Detected authoring tool '{}' -> {:?}", signature, id);
            return *id;
        }
    }

    ProfileId::Generic
}
