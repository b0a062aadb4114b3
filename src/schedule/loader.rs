//! Schedule file discovery, parsing and normalization.

use super::{
    error::{ScheduleError, Violation},
    validate,
};
use crate::{debug, log, talk::{RawTalk, Talk}};
use serde_yaml::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A schedule read from disk.
#[derive(Debug)]
pub struct LoadedSchedule {
    pub path: PathBuf,
    pub talks: Vec<Talk>,
}

/// First candidate that exists. Later candidates are never consulted.
pub fn find_schedule(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|path| path.is_file())
}

/// Read and parse a schedule file into an untyped payload.
///
/// A blank document yields `Value::Null`.
pub fn read_payload(path: &Path) -> Result<Value, ScheduleError> {
    let content =
        fs::read_to_string(path).map_err(|err| ScheduleError::Io(path.to_path_buf(), err))?;
    parse_payload(&content, Some(path))
}

/// Parse schedule text into an untyped payload.
pub fn parse_payload(content: &str, path: Option<&Path>) -> Result<Value, ScheduleError> {
    if is_blank_document(content) {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(content)
        .map_err(|err| ScheduleError::Yaml(path.map(Path::to_path_buf), err))
}

/// Validate a payload, then normalize every entry into a [`Talk`].
///
/// `talks_prefix` is the page subdirectory used for default links
/// (`<talks_prefix>/<slug>.md`).
pub fn talks_from_payload(
    payload: &Value,
    path: Option<&Path>,
    talks_prefix: &str,
) -> Result<Vec<Talk>, ScheduleError> {
    validate::validate(payload, path)?;

    let mut talks = Vec::new();
    let mut violations = Vec::new();
    for (location, entry) in validate::entries(payload) {
        match serde_yaml::from_value::<RawTalk>(entry.clone()) {
            Ok(raw) => talks.push(with_default_link(raw.into_talk(), talks_prefix)),
            Err(err) => violations.push(Violation::new(location, err.to_string())),
        }
    }

    if violations.is_empty() {
        Ok(talks)
    } else {
        Err(ScheduleError::Invalid {
            path: path.map(Path::to_path_buf),
            violations,
        })
    }
}

/// Only whitespace, comments and document markers.
fn is_blank_document(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

fn with_default_link(mut talk: Talk, talks_prefix: &str) -> Talk {
    if talk.link.is_none()
        && let Some(slug) = talk.slug()
    {
        talk.link = Some(format!("{talks_prefix}/{slug}.md"));
    }
    talk
}

/// Load the first existing schedule candidate.
///
/// No candidate on disk is not an error: a warning is logged and `None`
/// returned. A candidate that exists but is malformed or invalid fails.
pub fn load_schedule(
    candidates: &[PathBuf],
    talks_prefix: &str,
) -> Result<Option<LoadedSchedule>, ScheduleError> {
    let Some(path) = find_schedule(candidates) else {
        log!("warn"; "{}", ScheduleError::NotFound(candidates.to_vec()));
        return Ok(None);
    };

    let payload = read_payload(path)?;
    let talks = talks_from_payload(&payload, Some(path), talks_prefix)?;
    debug!("schedule"; "loaded {} talks from {}", talks.len(), path.display());

    Ok(Some(LoadedSchedule {
        path: path.to_path_buf(),
        talks,
    }))
}

/// Read and validate the first existing candidate without normalizing.
///
/// Unlike [`load_schedule`], a missing schedule is an error here.
pub fn validate_schedule(candidates: &[PathBuf]) -> Result<PathBuf, ScheduleError> {
    let path = find_schedule(candidates)
        .ok_or_else(|| ScheduleError::NotFound(candidates.to_vec()))?;
    let payload = read_payload(path)?;
    validate::validate(&payload, Some(path))?;
    Ok(path.to_path_buf())
}
