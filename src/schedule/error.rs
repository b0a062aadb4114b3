//! Schedule error types.

use std::{fmt, path::PathBuf};
use thiserror::Error;

/// One shape problem in the raw schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path-like location, e.g. `upcoming[0].title`.
    pub location: String,
    pub message: String,
}

impl Violation {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Schedule-related errors. All of them abort the build.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("{}schedule is not valid YAML: {}", prefix(.0), .1)]
    Yaml(Option<PathBuf>, serde_yaml::Error),

    #[error("{}", render_invalid(.path, .violations))]
    Invalid {
        path: Option<PathBuf>,
        violations: Vec<Violation>,
    },

    #[error("no schedule file found (tried {})", render_candidates(.0))]
    NotFound(Vec<PathBuf>),
}

impl ScheduleError {
    /// Violations carried by an `Invalid` error.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn prefix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!("{}: ", path.display()))
        .unwrap_or_default()
}

fn render_invalid(path: &Option<PathBuf>, violations: &[Violation]) -> String {
    let noun = if violations.len() == 1 { "problem" } else { "problems" };
    let mut out = format!(
        "{}schedule is invalid ({} {noun})",
        prefix(path),
        violations.len()
    );
    for violation in violations {
        out.push_str("\n  - ");
        out.push_str(&violation.to_string());
    }
    out
}

fn render_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|path| format!("`{}`", path.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_violation() {
        let err = ScheduleError::Invalid {
            path: Some(PathBuf::from("data/schedule.yml")),
            violations: vec![
                Violation::new("upcoming[0].title", "is required"),
                Violation::new("past[2].duration", "must be a non-negative integer"),
            ],
        };
        let display = err.to_string();
        assert!(display.starts_with("data/schedule.yml: schedule is invalid (2 problems)"));
        assert!(display.contains("\n  - upcoming[0].title: is required"));
        assert!(display.contains("\n  - past[2].duration: must be a non-negative integer"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_invalid_without_path() {
        let err = ScheduleError::Invalid {
            path: None,
            violations: vec![Violation::new("[0]", "must be a mapping")],
        };
        assert_eq!(err.to_string(), "schedule is invalid (1 problem)\n  - [0]: must be a mapping");
    }

    #[test]
    fn test_not_found_lists_candidates() {
        let err = ScheduleError::NotFound(vec![PathBuf::from("a.yml"), PathBuf::from("b.yml")]);
        assert_eq!(err.to_string(), "no schedule file found (tried `a.yml`, `b.yml`)");
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_yaml_error_names_the_file() {
        let yaml = serde_yaml::from_str::<serde_yaml::Value>("upcoming: [").unwrap_err();
        let err = ScheduleError::Yaml(Some(PathBuf::from("schedule.yml")), yaml);
        assert!(err.to_string().starts_with("schedule.yml: schedule is not valid YAML: "));

        let yaml = serde_yaml::from_str::<serde_yaml::Value>("upcoming: [").unwrap_err();
        let err = ScheduleError::Yaml(None, yaml);
        assert!(err.to_string().starts_with("schedule is not valid YAML: "));
    }
}
