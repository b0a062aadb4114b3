//! HTML fragments for page templates.
//!
//! Each function returns a self-contained fragment built from an
//! [`Overview`]. All interpolated text is escaped.

use crate::{aggregate::Overview, talk::{TBA, Talk}};
use quick_xml::escape::escape;
use std::fmt::Write;

/// Shown for a talk without topics.
const NO_TOPICS: &str = "–";

/// Talk page link, or `#` when the talk has none.
fn href(talk: &Talk) -> String {
    let link = talk.link.as_deref().filter(|link| !link.is_empty()).unwrap_or("#");
    escape(link).into_owned()
}

fn topics_line(talk: &Talk) -> String {
    let topics = talk.display_topics();
    if topics.is_empty() {
        NO_TOPICS.to_owned()
    } else {
        escape(&topics.join(", ")).into_owned()
    }
}

/// `date • time`, or just the date when no time was authored.
fn when_line(talk: &Talk) -> String {
    let mut line = escape(&talk.date_display).into_owned();
    if talk.time.is_some() {
        let _ = write!(line, " • {}", escape(&talk.time_display));
    }
    line
}

/// Card for the next talk, with a countdown hook.
pub fn next_talk(overview: &Overview) -> String {
    let Some(talk) = &overview.next_talk else {
        return r#"<div class="admonition info"><p>No upcoming talk is scheduled.</p></div>"#
            .to_owned();
    };

    let speakers = if talk.speakers.is_empty() {
        TBA.to_owned()
    } else {
        talk.speakers.join(", ")
    };
    let iso = talk.iso_start.as_deref().unwrap_or_default();

    format!(
        r#"<section class="dashboard next-talk">
  <div class="card">
    <div class="card__body">
      <h2>Next Talk</h2>
      <h3 class="talk-title"><a href="{href}">{title}</a></h3>
      <p class="muted">{when}</p>
      <p><strong>Speaker:</strong> {speakers}</p>
      <p><strong>Topics:</strong> {topics}</p>
      <div class="countdown" data-start="{iso}">
        <strong>Starts in:</strong> <span class="cd-out">—</span>
      </div>
    </div>
  </div>
</section>
"#,
        href = href(talk),
        title = escape(&talk.title),
        when = when_line(talk),
        speakers = escape(&speakers),
        topics = topics_line(talk),
        iso = escape(iso),
    )
}

/// Delivered count, upcoming speakers and top topic.
pub fn quick_stats(overview: &Overview) -> String {
    let stats = &overview.stats;
    format!(
        r#"<section class="dashboard quick-stats">
  <div class="stats-grid">
    <div class="stat"><div class="num">{}</div><div class="label">Talks delivered</div></div>
    <div class="stat"><div class="num">{}</div><div class="label">Upcoming speakers</div></div>
    <div class="stat"><div class="num">{}</div><div class="label">Top topic</div></div>
  </div>
</section>
"#,
        stats.delivered,
        stats.upcoming_speakers,
        escape(&stats.top_tag),
    )
}

/// Up to `limit` recent talks as cards; empty when there are none.
///
/// Talks without a thumbnail use `fallback_thumbnail`.
pub fn recent_talks(overview: &Overview, limit: usize, fallback_thumbnail: &str) -> String {
    let recent: Vec<&Talk> = overview.recent.iter().take(limit).collect();
    if recent.is_empty() {
        return String::new();
    }

    let mut cards = String::new();
    for talk in recent {
        let thumbnail = talk
            .thumbnail
            .as_deref()
            .filter(|thumb| !thumb.is_empty())
            .unwrap_or(fallback_thumbnail);
        let date = talk.date.as_deref().unwrap_or_default();
        let _ = write!(
            cards,
            r#"
  <article class="card talk-card">
    <a class="talk-link" href="{href}">
      <div class="thumb"><img src="/{thumb}" alt="thumbnail"></div>
      <div class="meta">
        <h4 class="title">{title}</h4>
        <div class="date muted">{date}</div>
      </div>
    </a>
  </article>
"#,
            href = href(talk),
            thumb = escape(thumbnail.trim_start_matches('/')),
            title = escape(&talk.title),
            date = escape(date),
        );
    }

    format!(
        r#"<section class="dashboard recent-talks">
  <div class="section-title"><h2>Recent Talks</h2></div>
  <div class="carousel" tabindex="0" aria-label="Recent talks">
    {cards}
  </div>
</section>
"#
    )
}

fn listing_item(talk: &Talk) -> String {
    format!(
        r#"    <li><a href="{}">{}</a> <span class="muted">{}</span> <span class="speakers">{}</span></li>
"#,
        href(talk),
        escape(&talk.title),
        when_line(talk),
        escape(&talk.speakers_line()),
    )
}

fn listing_group(out: &mut String, heading: &str, talks: &[&Talk]) {
    if talks.is_empty() {
        return;
    }
    let _ = write!(out, "  <h3>{heading}</h3>\n  <ul class=\"talk-list\">\n");
    for talk in talks {
        out.push_str(&listing_item(talk));
    }
    out.push_str("  </ul>\n");
}

/// Every talk, grouped into upcoming, past and unscheduled.
pub fn schedule_listing(overview: &Overview) -> String {
    let upcoming: Vec<&Talk> = overview.upcoming.iter().collect();
    let past: Vec<&Talk> = overview.past.iter().collect();
    let unscheduled: Vec<&Talk> = overview.unscheduled().collect();

    if upcoming.is_empty() && past.is_empty() && unscheduled.is_empty() {
        return r#"<div class="admonition info"><p>No talks have been scheduled yet.</p></div>"#
            .to_owned();
    }

    let mut out = String::from("<section class=\"dashboard schedule\">\n");
    listing_group(&mut out, "Upcoming", &upcoming);
    listing_group(&mut out, "Past", &past);
    listing_group(&mut out, "Unscheduled", &unscheduled);
    out.push_str("</section>\n");
    out
}

/// Past talks, most recent first, with recording links.
pub fn past_index(overview: &Overview) -> String {
    if overview.past.is_empty() {
        return r#"<div class="admonition info"><p>No talks have been delivered yet.</p></div>"#
            .to_owned();
    }

    let mut out = String::from("<section class=\"dashboard past-talks\">\n  <ul class=\"talk-list\">\n");
    for talk in &overview.past {
        let _ = write!(
            out,
            r#"    <li><span class="date muted">{}</span> <a href="{}">{}</a>"#,
            escape(&talk.date_display),
            href(talk),
            escape(&talk.title),
        );
        let recording = talk
            .recording_url
            .as_deref()
            .or_else(|| talk.resources.get("recording").map(String::as_str));
        if let Some(url) = recording {
            let _ = write!(out, r#" <a class="recording" href="{}">Recording</a>"#, escape(url));
        }
        out.push_str("</li>\n");
    }
    out.push_str("  </ul>\n</section>\n");
    out
}
