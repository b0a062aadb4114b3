//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn docs() -> PathBuf {
        "docs".into()
    }

    pub fn site() -> PathBuf {
        "site".into()
    }

    /// Schedule candidates in priority order.
    pub fn schedule() -> Vec<PathBuf> {
        vec!["data/schedule.yml".into(), "schedule.yml".into()]
    }

    pub fn talks() -> PathBuf {
        "talks".into()
    }

    pub fn generated() -> PathBuf {
        "_generated".into()
    }
}

// ============================================================================
// [display] Section Defaults
// ============================================================================

pub mod display {
    pub fn recent() -> usize {
        6
    }

    pub fn thumbnail() -> String {
        "images/logo.svg".into()
    }
}
