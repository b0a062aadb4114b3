//! Authored field shapes and their normalization.
//!
//! Schedules and front matter are written by hand, so several fields accept
//! more than one shape. Each field gets an explicit untagged enum listing the
//! accepted shapes and one `normalize_*` function producing the canonical
//! value.
//!
//! | Field                          | Shapes                                   |
//! |--------------------------------|------------------------------------------|
//! | `date`, `time`, ...            | string, integer, float, bool             |
//! | `speakers`, `speaker`          | entry or list of entries                 |
//! | `speaker_details`              | entry or list of entries                 |
//! | `tags`, `topics`               | list or comma-separated string           |
//! | `outline`                      | list or single item                      |
//! | `resources` + legacy keys      | mapping, `slides_url`, `repo`, ...       |

use super::{SpeakerDetail, Talk};
use serde::Deserialize;
use std::collections::BTreeMap;

// ============================================================================
// Shapes
// ============================================================================

/// A scalar that may have been written unquoted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarField {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ScalarField {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Speaker mapping as authored: `{name, bio, avatar}`; other keys ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeakerMapping {
    pub name: Option<ScalarField>,
    pub bio: Option<ScalarField>,
    pub avatar: Option<ScalarField>,
}

/// One speaker: a plain name or a detail mapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpeakerEntry {
    Name(ScalarField),
    Detail(SpeakerMapping),
}

/// `speakers`, `speaker` and `speaker_details`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpeakersField {
    Many(Vec<SpeakerEntry>),
    One(SpeakerEntry),
}

/// `tags` and `topics`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LabelsField {
    List(Vec<ScalarField>),
    Csv(String),
}

/// `outline`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ItemsField {
    Many(Vec<ScalarField>),
    One(ScalarField),
}

/// A talk entry exactly as authored in the schedule or in front matter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTalk {
    pub title: Option<ScalarField>,
    pub slug: Option<ScalarField>,
    pub date: Option<ScalarField>,
    pub time: Option<ScalarField>,
    pub timezone: Option<ScalarField>,
    pub duration: Option<ScalarField>,
    pub speakers: Option<SpeakersField>,
    pub speaker: Option<SpeakersField>,
    pub speaker_details: Option<SpeakersField>,
    pub tags: Option<LabelsField>,
    pub topics: Option<LabelsField>,
    pub link: Option<ScalarField>,
    pub thumbnail: Option<ScalarField>,
    pub r#abstract: Option<ScalarField>,
    pub outline: Option<ItemsField>,
    pub resources: Option<BTreeMap<String, Option<ScalarField>>>,
    pub slides_url: Option<ScalarField>,
    pub notebook_url: Option<ScalarField>,
    pub repo: Option<ScalarField>,
    pub repo_url: Option<ScalarField>,
    pub recording_url: Option<ScalarField>,
    pub status: Option<ScalarField>,
}

// ============================================================================
// Normalization
// ============================================================================

/// Stringify a scalar; blank strings count as absent.
pub fn normalize_scalar(field: Option<ScalarField>) -> Option<String> {
    field
        .map(ScalarField::into_string)
        .filter(|text| !text.trim().is_empty())
}

/// Minutes from an integer or a numeric string.
pub fn normalize_duration(field: Option<ScalarField>) -> Option<u32> {
    match field? {
        ScalarField::Integer(n) => u32::try_from(n).ok(),
        ScalarField::Text(text) => text.trim().parse().ok(),
        ScalarField::Float(_) | ScalarField::Bool(_) => None,
    }
}

fn normalize_entry(entry: SpeakerEntry) -> (Option<String>, Option<SpeakerDetail>) {
    match entry {
        SpeakerEntry::Name(name) => (normalize_scalar(Some(name)).map(trimmed), None),
        SpeakerEntry::Detail(mapping) => {
            let Some(name) = normalize_scalar(mapping.name).map(trimmed) else {
                return (None, None);
            };
            let detail = SpeakerDetail {
                name: name.clone(),
                bio: normalize_scalar(mapping.bio),
                avatar: normalize_scalar(mapping.avatar),
            };
            (Some(name), Some(detail))
        }
    }
}

fn entries(field: Option<SpeakersField>) -> Vec<SpeakerEntry> {
    match field {
        Some(SpeakersField::Many(list)) => list,
        Some(SpeakersField::One(entry)) => vec![entry],
        None => Vec::new(),
    }
}

/// Split speakers into plain names and detail records.
///
/// Detail mappings are kept as records and also contribute their name;
/// plain entries contribute a name only. Mappings without a name are dropped.
pub fn normalize_speakers(field: Option<SpeakersField>) -> (Vec<String>, Vec<SpeakerDetail>) {
    let mut names = Vec::new();
    let mut details = Vec::new();
    for entry in entries(field) {
        let (name, detail) = normalize_entry(entry);
        names.extend(name);
        details.extend(detail);
    }
    (names, details)
}

/// Explicit `speaker_details`: plain names become name-only records.
pub fn normalize_speaker_details(field: Option<SpeakersField>) -> Vec<SpeakerDetail> {
    entries(field)
        .into_iter()
        .filter_map(|entry| match normalize_entry(entry) {
            (_, Some(detail)) => Some(detail),
            (Some(name), None) => Some(SpeakerDetail::named(name)),
            (None, None) => None,
        })
        .collect()
}

/// Labels from a list or a comma-separated string, trimmed, blanks dropped.
pub fn normalize_labels(field: Option<LabelsField>) -> Vec<String> {
    let raw: Vec<String> = match field {
        Some(LabelsField::List(list)) => list.into_iter().map(ScalarField::into_string).collect(),
        Some(LabelsField::Csv(text)) => text.split(',').map(str::to_owned).collect(),
        None => Vec::new(),
    };
    raw.into_iter()
        .map(trimmed)
        .filter(|label| !label.is_empty())
        .collect()
}

/// Outline bullets; a single scalar becomes one bullet.
pub fn normalize_items(field: Option<ItemsField>) -> Vec<String> {
    let raw = match field {
        Some(ItemsField::Many(list)) => list,
        Some(ItemsField::One(item)) => vec![item],
        None => Vec::new(),
    };
    raw.into_iter()
        .filter_map(|item| normalize_scalar(Some(item)))
        .collect()
}

/// Legacy single-field resource keys and the label they map to.
/// Applied in this order after the `resources` mapping.
const LEGACY_RESOURCE_KEYS: &[(&str, &str)] = &[
    ("slides_url", "slides"),
    ("notebook_url", "notebook"),
    ("repo", "repo"),
    ("repo_url", "repo"),
];

/// Collect resources from the `resources` mapping and the legacy keys.
///
/// Later keys overwrite earlier ones; entries with an empty URL are dropped.
pub fn normalize_resources(
    mapping: Option<BTreeMap<String, Option<ScalarField>>>,
    legacy: [Option<ScalarField>; 4],
) -> BTreeMap<String, String> {
    let mut resources = BTreeMap::new();
    for (label, href) in mapping.unwrap_or_default() {
        if let Some(href) = normalize_scalar(href) {
            resources.insert(label, href);
        }
    }
    for ((_, label), href) in LEGACY_RESOURCE_KEYS.iter().zip(legacy) {
        if let Some(href) = normalize_scalar(href) {
            resources.insert((*label).to_owned(), href);
        }
    }
    resources
}

fn trimmed(text: String) -> String {
    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        text
    } else {
        trimmed.to_owned()
    }
}

// ============================================================================
// RawTalk → Talk
// ============================================================================

impl RawTalk {
    /// Build the canonical record. Never fails: anything missing becomes an
    /// empty container or `None`.
    pub fn into_talk(self) -> Talk {
        let speakers_field = self.speakers.or(self.speaker);
        let (mut speakers, mut speaker_details) = normalize_speakers(speakers_field);
        let explicit = normalize_speaker_details(self.speaker_details);
        if speakers.is_empty() {
            speakers = explicit.iter().map(|detail| detail.name.clone()).collect();
        }
        for detail in explicit {
            if !speaker_details.iter().any(|known| known.name == detail.name) {
                speaker_details.push(detail);
            }
        }

        let mut talk = Talk::new(normalize_scalar(self.title).unwrap_or_default());
        talk.slug = normalize_scalar(self.slug).map(trimmed);
        talk.date = normalize_scalar(self.date).map(trimmed);
        talk.time = normalize_scalar(self.time);
        talk.timezone = normalize_scalar(self.timezone).map(trimmed);
        talk.duration = normalize_duration(self.duration);
        talk.speakers = speakers;
        talk.speaker_details = speaker_details;
        talk.tags = normalize_labels(self.tags);
        talk.topics = normalize_labels(self.topics);
        talk.link = normalize_scalar(self.link);
        talk.thumbnail = normalize_scalar(self.thumbnail);
        talk.r#abstract = normalize_scalar(self.r#abstract);
        talk.outline = normalize_items(self.outline);
        talk.resources = normalize_resources(
            self.resources,
            [self.slides_url, self.notebook_url, self.repo, self.repo_url],
        );
        talk.recording_url = normalize_scalar(self.recording_url);
        talk.status = normalize_scalar(self.status);
        talk
    }
}
