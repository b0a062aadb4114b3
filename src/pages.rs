//! Authored talk pages.
//!
//! Every `*.md` file directly inside the talks directory may carry a YAML
//! front-matter block describing the talk. Files without usable front matter
//! are skipped; they are still regular documentation pages, just not talks.
//! A single field of an unsupported shape is dropped without losing the page.

use crate::{
    debug,
    talk::{RawTalk, Talk},
    utils::slug::{title_case, to_slash},
};
use serde_yaml::{Mapping, Value};
use std::{fs, path::Path};
use thiserror::Error;
use walkdir::WalkDir;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

/// Why a page's front matter could not be used.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("no front matter")]
    MissingFrontMatter,

    #[error("front matter is not terminated")]
    UnterminatedFrontMatter,

    #[error("front matter is empty")]
    EmptyFrontMatter,

    #[error("front matter is not a mapping")]
    NotAMapping,

    #[error("front matter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a document into `(front_matter, body)`.
///
/// The first line must be exactly `---`; the block ends at the next `---`
/// line. A leading byte-order mark is ignored.
pub fn split_front_matter(input: &str) -> Result<(&str, &str), PageError> {
    let input = input.strip_prefix(BOM).unwrap_or(input);
    let mut chunks = input.split_inclusive('\n');

    let first = chunks.next().ok_or(PageError::MissingFrontMatter)?;
    if first.trim_end_matches(['\n', '\r']) != DELIMITER {
        return Err(PageError::MissingFrontMatter);
    }

    let mut offset = first.len();
    for chunk in chunks {
        if chunk.trim_end_matches(['\n', '\r']) == DELIMITER {
            let front = &input[first.len()..offset];
            let body = &input[offset + chunk.len()..];
            return Ok((front, body));
        }
        offset += chunk.len();
    }

    Err(PageError::UnterminatedFrontMatter)
}

/// Parse the front matter of a document into an authored talk.
pub fn parse_front_matter(input: &str) -> Result<RawTalk, PageError> {
    let (front, _) = split_front_matter(input)?;
    if front.trim().is_empty() {
        return Err(PageError::EmptyFrontMatter);
    }

    match serde_yaml::from_str::<Value>(front)? {
        Value::Null => Err(PageError::EmptyFrontMatter),
        Value::Mapping(map) => Ok(serde_yaml::from_value(Value::Mapping(usable_fields(map)))?),
        _ => Err(PageError::NotAMapping),
    }
}

/// Keep the fields that deserialize on their own.
fn usable_fields(map: Mapping) -> Mapping {
    map.into_iter()
        .filter(|(key, value)| {
            let single = Mapping::from_iter([(key.clone(), value.clone())]);
            match serde_yaml::from_value::<RawTalk>(Value::Mapping(single)) {
                Ok(_) => true,
                Err(err) => {
                    debug!("pages"; "ignoring field `{}`: {err}", key.as_str().unwrap_or("?"));
                    false
                }
            }
        })
        .collect()
}

/// Build a talk from one page.
///
/// `link` is the page path relative to the documentation root.
pub fn talk_from_page(content: &str, stem: &str, link: String) -> Result<Talk, PageError> {
    let mut talk = parse_front_matter(content)?.into_talk();
    if talk.title.is_empty() {
        talk.title = title_case(stem, '-');
    }
    talk.slug = Some(stem.to_owned());
    talk.link = Some(link);
    Ok(talk)
}

/// Scan `talks_dir` for talk pages, in file-name order.
///
/// A missing directory yields no talks. Unreadable files and files without
/// usable front matter are skipped.
pub fn scan_pages(docs_dir: &Path, talks_dir: &Path) -> Vec<Talk> {
    if !talks_dir.is_dir() {
        debug!("pages"; "no talks directory at {}", talks_dir.display());
        return Vec::new();
    }

    WalkDir::new(talks_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
        .filter_map(|entry| read_page(docs_dir, entry.path()))
        .collect()
}

fn read_page(docs_dir: &Path, path: &Path) -> Option<Talk> {
    let stem = path.file_stem()?.to_string_lossy().into_owned();
    let link = to_slash(path.strip_prefix(docs_dir).unwrap_or(path));

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            debug!("pages"; "skipping {}: {err}", path.display());
            return None;
        }
    };

    match talk_from_page(&content, &stem, link) {
        Ok(talk) => Some(talk),
        Err(err) => {
            debug!("pages"; "skipping {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn page(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_split_front_matter() {
        let (front, body) = split_front_matter("---\ntitle: T\n---\n# Body\n").unwrap();
        assert_eq!(front, "title: T\n");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_front_matter_crlf_and_bom() {
        let (front, body) = split_front_matter("\u{feff}---\r\ntitle: T\r\n---\r\nBody").unwrap();
        assert_eq!(front, "title: T\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_front_matter_errors() {
        assert!(matches!(
            split_front_matter("# Just a page\n"),
            Err(PageError::MissingFrontMatter)
        ));
        assert!(matches!(split_front_matter(""), Err(PageError::MissingFrontMatter)));
        assert!(matches!(
            split_front_matter("---\ntitle: T\n"),
            Err(PageError::UnterminatedFrontMatter)
        ));
    }

    #[test]
    fn test_parse_front_matter_rejects_bad_blocks() {
        assert!(matches!(parse_front_matter("---\n---\n"), Err(PageError::EmptyFrontMatter)));
        assert!(parse_front_matter("---\n# comment\n---\n").is_err());
        assert!(matches!(parse_front_matter("---\n- a\n- b\n---\n"), Err(PageError::NotAMapping)));
        assert!(matches!(parse_front_matter("---\ntitle: [\n---\n"), Err(PageError::Yaml(_))));
    }

    #[test]
    fn test_misshapen_field_is_dropped_alone() {
        let talk = talk_from_page(
            "---\ntitle: Kept\nabstract: Still here\nresources: {slides: {url: x}}\nduration: [1, 2]\n---\n",
            "kept",
            "talks/kept.md".into(),
        )
        .unwrap();
        assert_eq!(talk.title, "Kept");
        assert_eq!(talk.r#abstract.as_deref(), Some("Still here"));
        assert!(talk.resources.is_empty());
        assert!(talk.duration.is_none());
    }

    #[test]
    fn test_talk_from_page_defaults() {
        let talk = talk_from_page("---\ndate: 2099-01-01\n---\n", "intro-to-x", "talks/intro-to-x.md".into())
            .unwrap();
        assert_eq!(talk.title, "Intro To X");
        assert_eq!(talk.slug.as_deref(), Some("intro-to-x"));
        assert_eq!(talk.link.as_deref(), Some("talks/intro-to-x.md"));
        assert_eq!(talk.date.as_deref(), Some("2099-01-01"));
    }

    #[test]
    fn test_talk_from_page_slug_is_stem() {
        let talk = talk_from_page("---\ntitle: Demo\nslug: other\n---\n", "demo", "talks/demo.md".into())
            .unwrap();
        assert_eq!(talk.title, "Demo");
        assert_eq!(talk.slug.as_deref(), Some("demo"));
    }

    #[test]
    fn test_scan_pages_in_name_order() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        let talks = docs.join("talks");
        page(&talks, "b-talk.md", "---\ntitle: B\n---\n");
        page(&talks, "a-talk.md", "---\ntitle: A\ntags: [x]\n---\nBody\n");
        page(&talks, "index.md", "# Talks\n");
        page(&talks, "broken.md", "---\ntitle: [\n---\n");
        page(&talks, "notes.txt", "---\ntitle: Not markdown\n---\n");
        page(&talks.join("nested"), "deep.md", "---\ntitle: Deep\n---\n");

        let found = scan_pages(&docs, &talks);
        let titles: Vec<_> = found.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(found[0].link.as_deref(), Some("talks/a-talk.md"));
        assert_eq!(found[0].tags, vec!["x"]);
    }

    #[test]
    fn test_scan_pages_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(scan_pages(dir.path(), &dir.path().join("talks")).is_empty());
    }
}
