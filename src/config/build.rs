//! `[build]` section configuration.
//!
//! Locations of the documentation tree, the schedule candidates and the
//! reserved directory that holds generated pages.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in talkboard.toml.
///
/// # Example
/// ```toml
/// [build]
/// docs = "docs"
/// schedule = ["data/schedule.yml", "schedule.yml"]
/// talks = "talks"
/// generated = "_generated"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Documentation root, the directory the site generator reads.
    #[serde(default = "defaults::build::docs")]
    #[educe(Default = defaults::build::docs())]
    pub docs: PathBuf,

    /// Site output directory, used to compute destination paths.
    #[serde(default = "defaults::build::site")]
    #[educe(Default = defaults::build::site())]
    pub site: PathBuf,

    /// Schedule file candidates. The first one that exists is used.
    #[serde(default = "defaults::build::schedule")]
    #[educe(Default = defaults::build::schedule())]
    pub schedule: Vec<PathBuf>,

    /// Authored talk pages, relative to `docs`.
    #[serde(default = "defaults::build::talks")]
    #[educe(Default = defaults::build::talks())]
    pub talks: PathBuf,

    /// Reserved directory for generated pages, relative to `docs`.
    /// Wiped on every build.
    #[serde(default = "defaults::build::generated")]
    #[educe(Default = defaults::build::generated())]
    pub generated: PathBuf,

    /// Map `page.md` to `page/index.html` instead of `page.html`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub directory_urls: bool,
}
