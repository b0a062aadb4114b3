//! Site configuration management for `talkboard.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                            |
//! |--------------|----------------------------------------------------|
//! | `[build]`    | Docs root, schedule candidates, generated dir      |
//! | `[display]`  | Recent-talk window, fallback thumbnail             |
//!
//! The file is optional: without it every field takes its default.
//!
//! # Example
//!
//! ```toml
//! [build]
//! docs = "docs"
//! schedule = ["data/schedule.yml", "schedule.yml"]
//!
//! [display]
//! recent = 6
//! ```

mod build;
pub mod defaults;
mod display;
mod error;

pub use build::BuildConfig;
pub use display::DisplayConfig;
pub use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "talkboard.toml";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing talkboard.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Paths of the documentation tree and schedule
    #[serde(default)]
    pub build: BuildConfig,

    /// Display fragment settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load `config_name` under `root`, falling back to defaults when the
    /// file does not exist, then resolve every path against `root`.
    pub fn load(root: &Path, config_name: &Path) -> Result<Self> {
        let config_path = root.join(config_name);
        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.config_path = Self::normalize_path(&config_path);
        config.update_path_with_root(root);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Directory holding authored talk pages.
    pub fn talks_dir(&self) -> PathBuf {
        self.build.docs.join(&self.build.talks)
    }

    /// Reserved directory holding generated pages.
    pub fn generated_dir(&self) -> PathBuf {
        self.build.docs.join(&self.build.generated)
    }

    /// Talks directory as a virtual path prefix, e.g. `talks`.
    pub fn talks_prefix(&self) -> String {
        self.build.talks.to_string_lossy().replace('\\', "/")
    }

    /// Generated directory as a virtual path prefix, e.g. `_generated`.
    pub fn generated_prefix(&self) -> String {
        self.build.generated.to_string_lossy().replace('\\', "/")
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Commands::Build { docs: Some(docs) } = &cli.command {
            let root = self.get_root().to_owned();
            self.build.docs = Self::normalize_path(&root.join(docs));
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.docs = Self::normalize_path(&root.join(&self.build.docs));
        self.build.site = Self::normalize_path(&root.join(&self.build.site));
        self.build.schedule = self
            .build
            .schedule
            .iter()
            .map(|candidate| Self::normalize_path(&root.join(candidate)))
            .collect();
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.build.schedule.is_empty() {
            bail!(ConfigError::Validation(
                "[build.schedule] must have at least one candidate".into()
            ));
        }

        if !Self::is_single_component(&self.build.generated) {
            bail!(ConfigError::Validation(
                "[build.generated] must be a single directory name".into()
            ));
        }

        if self.build.talks.as_os_str().is_empty() || self.build.talks.is_absolute() {
            bail!(ConfigError::Validation(
                "[build.talks] must be a relative directory".into()
            ));
        }

        if self.build.generated == self.build.talks {
            bail!(ConfigError::Validation(
                "[build.generated] must not be the authored talks directory".into()
            ));
        }

        if self.display.recent == 0 {
            bail!(ConfigError::Validation(
                "[display.recent] must be greater than 0".into()
            ));
        }

        Ok(())
    }

    fn is_single_component(path: &Path) -> bool {
        let mut components = path.components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
