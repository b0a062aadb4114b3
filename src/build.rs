//! Build pipeline orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── overview()
//!     │       │
//!     │       └── talks() ──► validate + load schedule
//!     │                       scan talk pages
//!     │                       merge ──► decorate
//!     │           then aggregate (cached for this pipeline)
//!     │
//!     ├── on_files()
//!     │       │
//!     │       └── wipe generated dir ──► collect files ──► purge stale
//!     │           entries ──► generate missing talk pages
//!     │
//!     └── write_data() ──► <docs>/<generated>/talks.json
//! ```
//!
//! All state lives in [`Pipeline`]: the file set, the generated-page
//! registry and the aggregate cache. Nothing is global.

use crate::{
    aggregate::{Overview, aggregate},
    config::SiteConfig,
    decorate::decorate_all,
    generator, log,
    merge::merge,
    pages::scan_pages,
    schedule::load_schedule,
    site::{GeneratedPages, SiteFiles},
    talk::Talk,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::{cell::OnceCell, fs, path::PathBuf};

/// Name of the aggregate data file inside the generated directory.
pub const DATA_FILE: &str = "talks.json";

/// One build invocation.
#[derive(Debug)]
pub struct Pipeline {
    config: SiteConfig,
    /// Reference instant separating upcoming from past.
    now: DateTime<Utc>,
    files: SiteFiles,
    generated: GeneratedPages,
    overview: OnceCell<Overview>,
}

impl Pipeline {
    pub fn new(config: SiteConfig, now: DateTime<Utc>) -> Self {
        Self {
            config,
            now,
            files: SiteFiles::new(),
            generated: GeneratedPages::new(),
            overview: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn files(&self) -> &SiteFiles {
        &self.files
    }

    pub fn generated(&self) -> &GeneratedPages {
        &self.generated
    }

    /// Validate and load the schedule, scan pages, merge and decorate.
    ///
    /// An invalid schedule fails here and nothing downstream runs.
    pub fn talks(&self) -> Result<Vec<Talk>> {
        let talks_prefix = self.config.talks_prefix();
        let schedule = match load_schedule(&self.config.build.schedule, &talks_prefix)? {
            Some(loaded) => {
                log!("schedule"; "{} talks from {}", loaded.talks.len(), loaded.path.display());
                loaded.talks
            }
            None => Vec::new(),
        };

        let pages = scan_pages(&self.config.build.docs, &self.config.talks_dir());
        log!("pages"; "{} authored talk pages", pages.len());

        Ok(decorate_all(merge(schedule, pages)))
    }

    /// Aggregate view, computed once per pipeline.
    pub fn overview(&self) -> Result<&Overview> {
        if let Some(overview) = self.overview.get() {
            return Ok(overview);
        }
        let overview = aggregate(self.talks()?, self.now, self.config.display.recent);
        Ok(self.overview.get_or_init(|| overview))
    }

    /// Regenerate talk pages into the file set.
    ///
    /// Returns the number of generated pages.
    pub fn on_files(&mut self) -> Result<usize> {
        let talks = self.overview()?.talks.clone();

        generator::reset_generated_root(&self.config.generated_dir())?;
        if self.files.is_empty() {
            self.files = SiteFiles::collect(
                &self.config.build.docs,
                &self.config.build.site,
                self.config.build.directory_urls,
            )?;
        }
        generator::purge_generated_files(&mut self.files, &self.config.generated_prefix());

        self.generated = generator::generate_missing_talk_pages(&talks, &self.config, &mut self.files)?;
        log!("generate"; "{} talk pages", self.generated.len());
        Ok(self.generated.len())
    }

    /// Content of `src_path` as the site generator should see it.
    ///
    /// Generated pages come from the registry, authored files from disk.
    /// Unknown paths yield `None`.
    pub fn read_source(&self, src_path: &str) -> Result<Option<String>> {
        if let Some(page) = self.generated.get(src_path) {
            return Ok(Some(page.content.clone()));
        }
        self.files.get(src_path).map(|file| file.read()).transpose()
    }

    /// Write the aggregate view as JSON for external templates.
    pub fn write_data(&self) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(self.overview()?)
            .context("Failed to serialize talk data")?;

        let dir = self.config.generated_dir();
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(DATA_FILE);
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Run the whole pipeline once.
pub fn build_site(config: SiteConfig, now: DateTime<Utc>) -> Result<Pipeline> {
    let mut pipeline = Pipeline::new(config, now);

    let overview = pipeline.overview()?;
    log!(
        "build";
        "{} talks: {} upcoming, {} past",
        overview.talks.len(),
        overview.upcoming.len(),
        overview.past.len()
    );

    pipeline.on_files()?;
    let data = pipeline.write_data()?;
    log!("build"; "wrote {}", data.display());

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CONFIG_FILE, pages::talk_from_page, site::Origin};
    use chrono::TimeZone;
    use std::path::Path;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(dir: &TempDir) -> SiteConfig {
        SiteConfig::load(dir.path(), Path::new(CONFIG_FILE)).unwrap()
    }

    const INTRO: &str = r#"
upcoming:
  - title: Intro to X
    slug: intro-x
    date: "2099-01-01"
    time: "14:00-15:00"
    speakers: ["A. Lee"]
"#;

    #[test]
    fn test_intro_scenario() {
        let dir = TempDir::new().unwrap();
        write(&dir, "data/schedule.yml", INTRO);
        write(&dir, "docs/index.md", "# Home\n");

        let pipeline = build_site(config(&dir), now()).unwrap();
        let overview = pipeline.overview().unwrap();
        assert_eq!(overview.upcoming.len(), 1);
        assert_eq!(overview.upcoming[0].title, "Intro to X");

        let content = pipeline.read_source("talks/intro-x.md").unwrap().unwrap();
        assert!(content.contains("\n# Intro to X\n"));
        let speakers = content.lines().find(|line| line.starts_with("**Speakers:**")).unwrap();
        assert!(speakers.contains("A. Lee"));

        let file = pipeline.files().get("talks/intro-x.md").unwrap();
        assert_eq!(file.origin, Origin::Generated);
        assert_eq!(fs::read_to_string(&file.abs_src_path).unwrap(), content);
        assert_eq!(pipeline.read_source("index.md").unwrap().as_deref(), Some("# Home\n"));
        assert!(pipeline.read_source("talks/nope.md").unwrap().is_none());
    }

    #[test]
    fn test_empty_title_aborts_build() {
        let dir = TempDir::new().unwrap();
        write(&dir, "data/schedule.yml", "upcoming:\n  - title: ''\n    slug: broken\n");

        let config = config(&dir);
        let generated_dir = config.generated_dir();
        let err = build_site(config, now()).unwrap_err();

        assert!(format!("{err:#}").contains("upcoming[0].title"));
        assert!(!generated_dir.exists());
    }

    #[test]
    fn test_demo_merge() {
        let dir = TempDir::new().unwrap();
        write(&dir, "schedule.yml", "- title: Demo\n  slug: demo\n  tags: [x]\n");
        write(&dir, "docs/talks/demo.md", "---\nabstract: Live coding\n---\nBody\n");

        let mut pipeline = Pipeline::new(config(&dir), now());
        let talk = pipeline.overview().unwrap().talks[0].clone();
        assert_eq!(talk.tags, vec!["x"]);
        assert_eq!(talk.r#abstract.as_deref(), Some("Live coding"));
        assert_eq!(pipeline.overview().unwrap().talks.len(), 1);

        assert_eq!(pipeline.on_files().unwrap(), 0);
        let source = pipeline.read_source("talks/demo.md").unwrap().unwrap();
        assert!(source.ends_with("Body\n"));
        assert_eq!(pipeline.files().get("talks/demo.md").unwrap().origin, Origin::Authored);
    }

    #[test]
    fn test_overview_is_computed_once() {
        let dir = TempDir::new().unwrap();
        write(&dir, "data/schedule.yml", INTRO);
        let pipeline = Pipeline::new(config(&dir), now());

        let first = pipeline.overview().unwrap();
        fs::remove_file(dir.path().join("data/schedule.yml")).unwrap();
        let second = pipeline.overview().unwrap();

        assert!(std::ptr::eq(first, second));
        assert_eq!(second.talks.len(), 1);
    }

    #[test]
    fn test_top_tag_through_pipeline() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "schedule.yml",
            "- {title: One, tags: [a, a, b]}\n- {title: Two, tags: [a]}\n",
        );
        let pipeline = Pipeline::new(config(&dir), now());
        assert_eq!(pipeline.overview().unwrap().stats.top_tag, "a");
    }

    #[test]
    fn test_generation_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write(&dir, "data/schedule.yml", INTRO);

        let mut pipeline = Pipeline::new(config(&dir), now());
        assert_eq!(pipeline.on_files().unwrap(), 1);
        let first = pipeline.read_source("talks/intro-x.md").unwrap().unwrap();
        let file_count = pipeline.files().len();

        assert_eq!(pipeline.on_files().unwrap(), 1);
        let second = pipeline.read_source("talks/intro-x.md").unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(pipeline.files().len(), file_count);
        assert_eq!(pipeline.generated().len(), 1);

        let on_disk = fs::read_to_string(pipeline.config().generated_dir().join("talks/intro-x.md")).unwrap();
        assert_eq!(on_disk, first);
    }

    #[test]
    fn test_stale_pages_are_removed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "schedule.yml", "- {title: Old, slug: old}\n");
        let stale = config(&dir).generated_dir().join("talks/old.md");
        build_site(config(&dir), now()).unwrap();
        assert!(stale.exists());

        write(&dir, "schedule.yml", "- {title: New, slug: new}\n");
        let pipeline = build_site(config(&dir), now()).unwrap();
        assert!(!stale.exists());
        assert!(pipeline.files().get("talks/old.md").is_none());
        assert!(pipeline.files().get("talks/new.md").is_some());
    }

    #[test]
    fn test_generated_front_matter_round_trip() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "schedule.yml",
            r#"
- title: Deep Dive
  slug: deep-dive
  date: "2020-05-05"
  timezone: Europe/Paris
  duration: 90
  speakers: [{name: B. Kim, bio: Storage engines}]
  topics: [db, rust]
  resources: {slides: "https://example.com/s"}
  recording_url: https://example.com/r
  status: delivered
"#,
        );
        let mut pipeline = Pipeline::new(config(&dir), now());
        pipeline.on_files().unwrap();

        let original = pipeline.overview().unwrap().talks[0].clone();
        let content = pipeline.read_source("talks/deep-dive.md").unwrap().unwrap();
        let parsed = talk_from_page(&content, "deep-dive", "talks/deep-dive.md".into()).unwrap();

        assert_eq!(parsed.title, original.title);
        assert_eq!(parsed.date, original.date);
        assert_eq!(parsed.timezone, original.timezone);
        assert_eq!(parsed.duration, original.duration);
        assert_eq!(parsed.speakers, original.speakers);
        assert_eq!(parsed.speaker_details, original.speaker_details);
        assert_eq!(parsed.tags, original.topics);
        assert_eq!(parsed.resources, original.resources);
        assert_eq!(parsed.recording_url, original.recording_url);
        assert_eq!(parsed.status, original.status);
    }

    #[test]
    fn test_write_data() {
        let dir = TempDir::new().unwrap();
        write(&dir, "data/schedule.yml", INTRO);
        let pipeline = build_site(config(&dir), now()).unwrap();

        let path = pipeline.config().generated_dir().join(DATA_FILE);
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["stats"]["delivered"], 0);
        assert_eq!(json["stats"]["top_tag"], "–");
        assert_eq!(json["next_talk"]["title"], "Intro to X");
        assert_eq!(json["upcoming"][0]["iso_start"], "2099-01-01T14:00:00+00:00");
    }

    #[test]
    fn test_missing_sources_build_empty_site() {
        let dir = TempDir::new().unwrap();
        let pipeline = build_site(config(&dir), now()).unwrap();
        assert!(pipeline.overview().unwrap().talks.is_empty());
        assert!(pipeline.generated().is_empty());
    }
}
