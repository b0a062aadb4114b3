//! Upcoming/past partitions and headline statistics.

use crate::talk::Talk;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Shown as the top tag when no talk has any label.
pub const NO_TAG: &str = "–";

/// Headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Number of past talks.
    pub delivered: usize,
    /// Distinct speaker names across upcoming talks.
    pub upcoming_speakers: usize,
    /// Most frequent label, or [`NO_TAG`].
    pub top_tag: String,
}

/// Aggregate view consumed by the display fragments and the data file.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    /// Every decorated talk in merge order.
    pub talks: Vec<Talk>,
    /// Start ≥ reference, ascending.
    pub upcoming: Vec<Talk>,
    /// Start < reference, descending.
    pub past: Vec<Talk>,
    pub next_talk: Option<Talk>,
    /// Leading slice of `past`.
    pub recent: Vec<Talk>,
    pub stats: Stats,
}

impl Overview {
    /// Talks with no start instant, in merge order.
    pub fn unscheduled(&self) -> impl Iterator<Item = &Talk> {
        self.talks.iter().filter(|talk| talk.start.is_none())
    }
}

/// Earliest upcoming talk; otherwise the earliest talk with an instant.
pub fn next_talk<'a>(upcoming: &'a [Talk], talks: &'a [Talk]) -> Option<&'a Talk> {
    upcoming.first().or_else(|| {
        talks
            .iter()
            .filter(|talk| talk.start.is_some())
            .min_by(|a, b| a.start.cmp(&b.start))
    })
}

/// Most frequent label over every talk's [`Talk::labels`].
///
/// Every occurrence counts. Among labels sharing the highest count, the one
/// seen first wins.
pub fn top_tag(talks: &[Talk]) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in talks.iter().flat_map(Talk::labels) {
        let count = counts.entry(label.as_str()).or_insert_with(|| {
            order.push(label.as_str());
            0
        });
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for label in order {
        let count = counts.get(label).copied().unwrap_or_default();
        if best.is_none_or(|(_, max)| count > max) {
            best = Some((label, count));
        }
    }
    best.map_or_else(|| NO_TAG.to_owned(), |(label, _)| label.to_owned())
}

/// Distinct non-empty speaker names.
pub fn distinct_speakers(talks: &[Talk]) -> usize {
    talks
        .iter()
        .flat_map(|talk| &talk.speakers)
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// Partition decorated talks around `now` and compute statistics.
pub fn aggregate(talks: Vec<Talk>, now: DateTime<Utc>, recent: usize) -> Overview {
    let mut upcoming: Vec<Talk> = talks
        .iter()
        .filter(|talk| talk.start.as_ref().is_some_and(|start| *start >= now))
        .cloned()
        .collect();
    upcoming.sort_by(|a, b| a.start.cmp(&b.start));

    let mut past: Vec<Talk> = talks
        .iter()
        .filter(|talk| talk.start.as_ref().is_some_and(|start| *start < now))
        .cloned()
        .collect();
    past.sort_by(|a, b| b.start.cmp(&a.start));

    let stats = Stats {
        delivered: past.len(),
        upcoming_speakers: distinct_speakers(&upcoming),
        top_tag: top_tag(&talks),
    };
    let next_talk = next_talk(&upcoming, &talks).cloned();
    let recent = past.iter().take(recent).cloned().collect();

    Overview {
        talks,
        upcoming,
        past,
        next_talk,
        recent,
        stats,
    }
}
