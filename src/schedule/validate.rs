//! Shape validation of the raw schedule payload.
//!
//! Runs on the untyped [`Value`] so that every problem can be reported at
//! once, with a path-like location, before any normalization happens.

use super::error::{ScheduleError, Violation};
use serde_yaml::{Mapping, Value};
use std::{collections::HashMap, path::Path};

/// Sections of the sectioned schedule form, in load order.
pub const SECTIONS: [&str; 2] = ["upcoming", "past"];

/// Accepted shape of an optional talk field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Text,
    Count,
    TextList,
    Labels,
    Speakers,
    Links,
}

const FIELD_SHAPES: &[(&str, Shape)] = &[
    ("slug", Shape::Text),
    ("date", Shape::Text),
    ("time", Shape::Text),
    ("timezone", Shape::Text),
    ("status", Shape::Text),
    ("abstract", Shape::Text),
    ("recording_url", Shape::Text),
    ("thumbnail", Shape::Text),
    ("link", Shape::Text),
    ("slides_url", Shape::Text),
    ("notebook_url", Shape::Text),
    ("repo", Shape::Text),
    ("repo_url", Shape::Text),
    ("duration", Shape::Count),
    ("outline", Shape::TextList),
    ("tags", Shape::Labels),
    ("topics", Shape::Labels),
    ("speakers", Shape::Speakers),
    ("speaker", Shape::Speakers),
    ("speaker_details", Shape::Speakers),
    ("resources", Shape::Links),
];

/// Entries of a payload paired with their location prefix.
///
/// Callers must validate first; shapes that are not entry lists are skipped.
pub fn entries(payload: &Value) -> Vec<(String, &Value)> {
    match payload {
        Value::Sequence(list) => list
            .iter()
            .enumerate()
            .map(|(index, entry)| (format!("[{index}]"), entry))
            .collect(),
        Value::Mapping(map) => SECTIONS
            .iter()
            .filter_map(|section| match map.get(*section) {
                Some(Value::Sequence(list)) => Some((section, list)),
                _ => None,
            })
            .flat_map(|(section, list)| {
                list.iter()
                    .enumerate()
                    .map(move |(index, entry)| (format!("{section}[{index}]"), entry))
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Collect every violation in `payload`. An empty result means valid.
pub fn check(payload: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();

    match payload {
        Value::Null | Value::Sequence(_) => {}
        Value::Mapping(map) => {
            for section in SECTIONS {
                match map.get(section) {
                    None | Some(Value::Null | Value::Sequence(_)) => {}
                    Some(_) => violations.push(Violation::new(section, "must be a list of talks")),
                }
            }
        }
        _ => violations.push(Violation::new(
            "(root)",
            "must be a list of talks or a mapping with `upcoming`/`past` lists",
        )),
    }

    let mut first_slug: HashMap<&str, String> = HashMap::new();
    for (location, entry) in entries(payload) {
        let Value::Mapping(fields) = entry else {
            violations.push(Violation::new(location, "must be a mapping"));
            continue;
        };
        check_entry(&location, fields, &mut violations);

        if let Some(Value::String(slug)) = fields.get("slug")
            && !slug.trim().is_empty()
        {
            let here = format!("{location}.slug");
            match first_slug.get(slug.trim()) {
                Some(first) => violations.push(Violation::new(
                    here,
                    format!("duplicate slug `{}` (first used at {first})", slug.trim()),
                )),
                None => {
                    first_slug.insert(slug.trim(), here);
                }
            }
        }
    }

    violations
}

/// Validate `payload`, tagging the error with its source file when known.
pub fn validate(payload: &Value, path: Option<&Path>) -> Result<(), ScheduleError> {
    let violations = check(payload);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ScheduleError::Invalid {
            path: path.map(Path::to_path_buf),
            violations,
        })
    }
}

fn check_entry(location: &str, fields: &Mapping, violations: &mut Vec<Violation>) {
    match fields.get("title") {
        None | Some(Value::Null) => {
            violations.push(Violation::new(format!("{location}.title"), "is required"));
        }
        Some(Value::String(title)) if !title.trim().is_empty() => {}
        Some(_) => violations.push(Violation::new(
            format!("{location}.title"),
            "must be a non-empty string",
        )),
    }

    for (key, shape) in FIELD_SHAPES {
        match fields.get(*key) {
            None | Some(Value::Null) => {}
            Some(value) => {
                if let Err(message) = check_shape(*shape, value) {
                    violations.push(Violation::new(format!("{location}.{key}"), message));
                }
            }
        }
    }
}

fn check_shape(shape: Shape, value: &Value) -> Result<(), String> {
    match shape {
        Shape::Text => require(value.is_string(), "must be a string"),
        Shape::Count => require(
            value.as_u64().is_some_and(|n| u32::try_from(n).is_ok()),
            "must be a non-negative integer",
        ),
        Shape::TextList => require(is_string_list(value), "must be a list of strings"),
        Shape::Labels => require(
            value.is_string() || is_string_list(value),
            "must be a string or a list of strings",
        ),
        Shape::Speakers => match value {
            Value::Sequence(list) => list
                .iter()
                .enumerate()
                .try_for_each(|(index, entry)| {
                    check_speaker(entry).map_err(|message| format!("[{index}] {message}"))
                }),
            entry => check_speaker(entry),
        },
        Shape::Links => match value {
            Value::Mapping(map) => map.iter().try_for_each(|(label, href)| match (label, href) {
                (Value::String(_), Value::String(_)) => Ok(()),
                (Value::String(label), _) => Err(format!("`{label}` must map to a string URL")),
                _ => Err("labels must be strings".to_owned()),
            }),
            _ => Err("must be a mapping of label to URL".to_owned()),
        },
    }
}

fn check_speaker(entry: &Value) -> Result<(), String> {
    match entry {
        Value::String(_) => Ok(()),
        Value::Mapping(map) => {
            match map.get("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => {}
                _ => return Err("speaker mapping needs a non-empty string `name`".to_owned()),
            }
            for key in ["bio", "avatar"] {
                match map.get(key) {
                    None | Some(Value::Null | Value::String(_)) => {}
                    Some(_) => return Err(format!("speaker `{key}` must be a string")),
                }
            }
            Ok(())
        }
        _ => Err("speaker must be a name or a `{name, bio, avatar}` mapping".to_owned()),
    }
}

fn is_string_list(value: &Value) -> bool {
    value
        .as_sequence()
        .is_some_and(|list| list.iter().all(Value::is_string))
}

fn require(ok: bool, message: &str) -> Result<(), String> {
    if ok { Ok(()) } else { Err(message.to_owned()) }
}
