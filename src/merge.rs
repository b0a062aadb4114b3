//! Join schedule talks with authored page talks by slug.

use crate::talk::Talk;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A field that may be left empty by one source.
trait Filled {
    fn is_filled(&self) -> bool;
}

impl Filled for String {
    fn is_filled(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T: Filled> Filled for Option<T> {
    fn is_filled(&self) -> bool {
        self.as_ref().is_some_and(Filled::is_filled)
    }
}

impl Filled for u32 {
    fn is_filled(&self) -> bool {
        true
    }
}

impl<T> Filled for Vec<T> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Filled for BTreeMap<K, V> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

/// Page value when filled, otherwise the schedule value.
fn prefer<T: Filled>(page: T, schedule: T) -> T {
    if page.is_filled() { page } else { schedule }
}

/// Combine one schedule talk with the page sharing its slug.
pub fn merge_talk(schedule: Talk, page: Talk) -> Talk {
    Talk {
        title: prefer(page.title, schedule.title),
        date: prefer(page.date, schedule.date),
        time: prefer(page.time, schedule.time),
        timezone: prefer(page.timezone, schedule.timezone),
        duration: prefer(page.duration, schedule.duration),
        speakers: prefer(page.speakers, schedule.speakers),
        speaker_details: prefer(page.speaker_details, schedule.speaker_details),
        tags: prefer(page.tags, schedule.tags),
        topics: prefer(page.topics, schedule.topics),
        slug: schedule.slug,
        link: prefer(page.link, schedule.link),
        thumbnail: prefer(page.thumbnail, schedule.thumbnail),
        r#abstract: prefer(page.r#abstract, schedule.r#abstract),
        outline: prefer(page.outline, schedule.outline),
        resources: prefer(page.resources, schedule.resources),
        recording_url: prefer(page.recording_url, schedule.recording_url),
        status: prefer(page.status, schedule.status),
        ..Talk::new(String::new())
    }
}

/// Merge schedule and page talks.
///
/// Schedule order is kept; a schedule talk whose slug matches a page is
/// merged field by field. Pages whose slug is not in the schedule are
/// appended in scan order.
pub fn merge(schedule: Vec<Talk>, pages: Vec<Talk>) -> Vec<Talk> {
    let scheduled: HashSet<String> = schedule
        .iter()
        .filter_map(|talk| talk.slug().map(str::to_owned))
        .collect();

    let mut page_only = Vec::new();
    let mut by_slug: HashMap<String, Talk> = HashMap::new();
    for page in pages {
        match page.slug().map(str::to_owned) {
            Some(slug) if scheduled.contains(&slug) => {
                by_slug.entry(slug).or_insert(page);
            }
            _ => page_only.push(page),
        }
    }

    let mut merged: Vec<Talk> = schedule
        .into_iter()
        .map(|talk| match talk.slug().and_then(|slug| by_slug.remove(slug)) {
            Some(page) => merge_talk(talk, page),
            None => talk,
        })
        .collect();
    merged.extend(page_only);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talk(title: &str, slug: Option<&str>) -> Talk {
        let mut talk = Talk::new(title);
        talk.slug = slug.map(str::to_owned);
        talk
    }

    #[test]
    fn test_page_fields_win_when_filled() {
        let mut schedule = talk("Scheduled", Some("demo"));
        schedule.tags = vec!["x".into()];
        schedule.date = Some("2099-01-01".into());
        schedule.link = Some("talks/demo.md".into());

        let mut page = talk("Demo", Some("demo"));
        page.r#abstract = Some("From the page".into());
        page.date = Some("2099-02-02".into());

        let merged = merge(vec![schedule], vec![page]);
        assert_eq!(merged.len(), 1);
        let merged = &merged[0];
        assert_eq!(merged.tags, vec!["x"]);
        assert_eq!(merged.r#abstract.as_deref(), Some("From the page"));
        assert_eq!(merged.date.as_deref(), Some("2099-02-02"));
        assert_eq!(merged.title, "Demo");
        assert_eq!(merged.link.as_deref(), Some("talks/demo.md"));
        assert_eq!(merged.slug(), Some("demo"));
    }

    #[test]
    fn test_every_field_falls_back_to_schedule() {
        let mut schedule = talk("S", Some("s"));
        schedule.time = Some("10:00".into());
        schedule.timezone = Some("UTC".into());
        schedule.duration = Some(30);
        schedule.speakers = vec!["A".into()];
        schedule.outline = vec!["Intro".into()];
        schedule.resources.insert("slides".into(), "https://s".into());
        schedule.recording_url = Some("https://r".into());
        schedule.status = Some("confirmed".into());

        let mut page = talk("", Some("s"));
        page.time = Some("  ".into());

        let merged = merge_talk(schedule, page);
        assert_eq!(merged.title, "S");
        assert_eq!(merged.time.as_deref(), Some("10:00"));
        assert_eq!(merged.timezone.as_deref(), Some("UTC"));
        assert_eq!(merged.duration, Some(30));
        assert_eq!(merged.speakers, vec!["A"]);
        assert_eq!(merged.outline, vec!["Intro"]);
        assert_eq!(merged.resources.len(), 1);
        assert_eq!(merged.recording_url.as_deref(), Some("https://r"));
        assert_eq!(merged.status.as_deref(), Some("confirmed"));
    }

    #[test]
    fn test_order_and_pass_through() {
        let schedule = vec![talk("One", Some("one")), talk("Loose", None), talk("Two", Some("two"))];
        let pages = vec![talk("Zed", Some("zed")), talk("Two page", Some("two")), talk("Alpha", Some("alpha"))];

        let merged = merge(schedule, pages);
        let titles: Vec<_> = merged.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Loose", "Two page", "Zed", "Alpha"]);
    }

    #[test]
    fn test_empty_schedule_returns_pages() {
        let merged = merge(Vec::new(), vec![talk("A", Some("a"))]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "A");
    }
}
