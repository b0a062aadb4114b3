//! Canonical Markdown for a talk page.
//!
//! # Layout
//!
//! ```markdown
//! ---
//! title: Intro to X
//! date: 2099-01-01
//! speakers:
//! - A. Lee
//! ---
//!
//! # Intro to X
//!
//! **Date:** 2099-01-01
//! **Speakers:** A. Lee
//!
//! ## Abstract
//! ...
//! ```
//!
//! The front matter lists only filled fields, in a fixed order, so it parses
//! back into the same talk.

use crate::{
    talk::{SpeakerDetail, TBA, Talk},
    utils::slug::title_case,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

const ABSTRACT_PLACEHOLDER: &str = "Details coming soon.";
const OUTLINE_PLACEHOLDER: &str = "- Session outline will be published soon.";
const RESOURCES_PLACEHOLDER: &str = "Resources will be posted after the session.";
const RECORDING_PLACEHOLDER: &str = "Recording will be shared once available.";
const RECORDING_LABEL: &str = "recording";

/// One `speakers` entry: the detail mapping when the talk has one for that
/// name, the bare name otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SpeakerEntry<'a> {
    Detail(&'a SpeakerDetail),
    Name(&'a str),
}

/// Front-matter payload. Field order is the output key order.
#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    speakers: Vec<SpeakerEntry<'a>>,
    /// Detail records for people not listed in `speakers`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    speaker_details: Vec<&'a SpeakerDetail>,
    #[serde(skip_serializing_if = "is_empty_list")]
    tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_map")]
    resources: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recording_url: Option<&'a str>,
}

fn is_empty_list(list: &&[String]) -> bool {
    list.is_empty()
}

fn is_empty_map(map: &&BTreeMap<String, String>) -> bool {
    map.is_empty()
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

impl<'a> FrontMatter<'a> {
    fn from_talk(talk: &'a Talk) -> Self {
        let record_for = |name: &str| talk.speaker_details.iter().find(|detail| detail.name == name);
        let speakers = talk
            .speakers
            .iter()
            .map(|name| match record_for(name.as_str()) {
                Some(detail) => SpeakerEntry::Detail(detail),
                None => SpeakerEntry::Name(name),
            })
            .collect();
        let speaker_details = talk
            .speaker_details
            .iter()
            .filter(|detail| !talk.speakers.contains(&detail.name))
            .collect();
        let tags = if talk.tags.is_empty() { &talk.topics } else { &talk.tags };

        Self {
            title: talk.title.trim(),
            date: filled(&talk.date),
            time: filled(&talk.time),
            timezone: filled(&talk.timezone),
            duration: talk.duration,
            speakers,
            speaker_details,
            tags,
            status: filled(&talk.status),
            resources: &talk.resources,
            recording_url: filled(&talk.recording_url),
        }
    }
}

/// YAML front matter without delimiters or trailing newline.
pub fn render_front_matter(talk: &Talk) -> Result<String> {
    let yaml = serde_yaml::to_string(&FrontMatter::from_talk(talk))
        .with_context(|| format!("Failed to serialize front matter for `{}`", talk.title))?;
    let yaml = yaml.strip_prefix("---\n").unwrap_or(&yaml);
    Ok(yaml.trim_end().to_owned())
}

/// Outline bullets or the placeholder.
pub fn render_outline(talk: &Talk) -> String {
    if talk.outline.is_empty() {
        return OUTLINE_PLACEHOLDER.to_owned();
    }
    talk.outline
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resource links in label order, plus the recording when it is not
/// already listed.
pub fn render_resources(talk: &Talk) -> String {
    let mut items: Vec<String> = talk
        .resources
        .iter()
        .filter(|(_, href)| !href.trim().is_empty())
        .map(|(label, href)| format!("- [{}]({href})", title_case(label, '_')))
        .collect();

    if let Some(recording) = filled(&talk.recording_url)
        && !talk.resources.contains_key(RECORDING_LABEL)
    {
        items.push(format!("- [Recording]({recording})"));
    }

    if items.is_empty() {
        RESOURCES_PLACEHOLDER.to_owned()
    } else {
        items.join("\n")
    }
}

/// Speaker bios (`name - bio`) joined by `<br/>`; plain names otherwise.
pub fn format_speakers(talk: &Talk) -> String {
    let segments: Vec<String> = talk
        .speaker_details
        .iter()
        .filter(|detail| !detail.name.is_empty())
        .map(|detail| match detail.bio.as_deref().filter(|bio| !bio.is_empty()) {
            Some(bio) => format!("{} - {bio}", detail.name),
            None => detail.name.clone(),
        })
        .collect();

    if segments.is_empty() {
        talk.speakers.join(", ")
    } else {
        segments.join("<br/>")
    }
}

/// Full Markdown document for a talk. Ends with exactly one newline.
pub fn build_talk_markdown(talk: &Talk) -> Result<String> {
    let mut lines: Vec<String> = vec![
        "---".into(),
        render_front_matter(talk)?,
        "---".into(),
        String::new(),
        format!("# {}", talk.title),
        String::new(),
        format!("**Date:** {}", talk.date_display),
    ];

    if talk.time.is_some() || talk.timezone.is_some() {
        let timezone = filled(&talk.timezone).unwrap_or("UTC");
        lines.push(format!("**Time:** {} ({timezone})", talk.time_display));
    }
    let speakers = if talk.speakers.is_empty() {
        TBA.to_owned()
    } else {
        talk.speakers.join(", ")
    };
    lines.push(format!("**Speakers:** {speakers}"));
    let topics = talk.display_topics();
    if !topics.is_empty() {
        lines.push(format!("**Topics:** {}", topics.join(", ")));
    }
    lines.push(String::new());

    let abstract_text = filled(&talk.r#abstract).unwrap_or(ABSTRACT_PLACEHOLDER);
    lines.extend(["## Abstract".into(), abstract_text.to_owned(), String::new()]);
    lines.extend(["## Outline".into(), render_outline(talk), String::new()]);
    lines.extend(["## Resources".into(), render_resources(talk), String::new()]);

    let recording = match filled(&talk.recording_url) {
        Some(url) => format!("[Watch the recording]({url})"),
        None => RECORDING_PLACEHOLDER.to_owned(),
    };
    lines.extend(["## Recording".into(), recording, String::new()]);

    let bios = format_speakers(talk);
    if !talk.speaker_details.is_empty() && !bios.is_empty() && bios != talk.speakers.join(", ") {
        lines.extend(["## Speaker Bios".into(), bios]);
    }

    let mut document = lines.join("\n").trim_end().to_owned();
    document.push('\n');
    Ok(document)
}
