//! In-process model of the site generator's file manifest.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          One build pass                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  docs/ ──► SiteFiles::collect ──► purge generated entries        │
//! │                                          │                       │
//! │                                          ▼                       │
//! │  talks ──► generator ──► docs/_generated/talks/<slug>.md         │
//! │                 │                                                │
//! │                 ├──► SiteFiles::insert   (src_path talks/<slug>) │
//! │                 └──► GeneratedPages      (registry)              │
//! │                                                                  │
//! │  read_source("talks/<slug>.md") ──► registry hit? synthesized    │
//! │                                     otherwise     disk content   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Generated entries keep the authored-style source path, so the consumer
//! cannot tell them apart from files a human wrote.

mod files;
mod generated;

pub use files::{Origin, SiteFile, SiteFiles};
pub use generated::{GeneratedPage, GeneratedPages};
