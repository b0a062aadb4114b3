//! The canonical talk record.
//!
//! Both the schedule loader and the page scanner produce [`Talk`] values in
//! the same shape; the authored-field shapes they accept live in [`fields`].
//!
//! ```text
//! schedule.yml ──► RawTalk ──┐
//!                            ├──► Talk ──► merge ──► decorate ──► aggregate / generate
//! talks/*.md   ──► RawTalk ──┘
//! ```

pub mod fields;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;

pub use fields::RawTalk;

/// Placeholder shown when a date or time cannot be determined.
pub const TBA: &str = "TBA";

/// Speaker detail record, kept alongside the plain speaker names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeakerDetail {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl SpeakerDetail {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One scheduled or delivered session.
///
/// Authored fields are filled by the loader or scanner; the fields after
/// `status` are derived once by [`crate::decorate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Talk {
    pub title: String,

    /// Authored calendar date, expected as `YYYY-MM-DD`.
    pub date: Option<String>,

    /// Start time or `start–end` window.
    pub time: Option<String>,

    /// IANA zone name; UTC when absent.
    pub timezone: Option<String>,

    /// Length in minutes.
    pub duration: Option<u32>,

    pub speakers: Vec<String>,
    pub speaker_details: Vec<SpeakerDetail>,
    pub tags: Vec<String>,
    pub topics: Vec<String>,

    /// Join key between schedule and pages.
    pub slug: Option<String>,

    /// Relative path of the talk page, e.g. `talks/intro.md`.
    pub link: Option<String>,

    pub thumbnail: Option<String>,
    pub r#abstract: Option<String>,
    pub outline: Vec<String>,

    /// Label → URL.
    pub resources: BTreeMap<String, String>,

    pub recording_url: Option<String>,
    pub status: Option<String>,

    /// Timezone-aware start instant.
    #[serde(skip)]
    pub start: Option<DateTime<Tz>>,

    /// RFC 3339 rendering of `start`.
    pub iso_start: Option<String>,

    pub date_display: String,
    pub time_display: String,
}

impl Talk {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date_display: TBA.to_owned(),
            time_display: TBA.to_owned(),
            ..Self::default()
        }
    }

    /// Labels used for statistics and the generated header: tags, or topics
    /// when the talk has no tags.
    pub fn labels(&self) -> &[String] {
        if self.tags.is_empty() {
            &self.topics
        } else {
            &self.tags
        }
    }

    /// Labels shown next to a talk: topics, or tags when it has no topics.
    pub fn display_topics(&self) -> &[String] {
        if self.topics.is_empty() {
            &self.tags
        } else {
            &self.topics
        }
    }

    /// Speaker names joined for display, `TBA` when there are none.
    pub fn speakers_line(&self) -> String {
        if self.speakers.is_empty() {
            TBA.to_owned()
        } else {
            self.speakers.join(", ")
        }
    }

    /// Slug when present and non-empty.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|slug| !slug.is_empty())
    }
}
