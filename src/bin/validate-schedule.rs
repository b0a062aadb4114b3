//! Standalone schedule validator.
//!
//! Takes no arguments: validates the schedule of the project in the current
//! directory, honouring `talkboard.toml` when present.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use talkboard::{
    config::{CONFIG_FILE, SiteConfig},
    schedule::validate_schedule,
};

fn main() -> ExitCode {
    let (code, message) = run(Path::new("./"));
    if code == 0 {
        println!("{message}");
    } else {
        eprintln!("{message}");
    }
    ExitCode::from(code)
}

/// Validate the project at `root`; returns the exit status and its message.
fn run(root: &Path) -> (u8, String) {
    match check(root) {
        Ok(_) => (0, "Schedule validation passed.".to_owned()),
        Err(err) => (1, format!("Schedule validation failed:\n{err:#}")),
    }
}

fn check(root: &Path) -> anyhow::Result<PathBuf> {
    let config = SiteConfig::load(root, Path::new(CONFIG_FILE))?;
    Ok(validate_schedule(&config.build.schedule)?)
}
