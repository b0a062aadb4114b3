//! Registry of synthesized pages.

use std::{collections::BTreeMap, path::PathBuf};

/// A page produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub slug: String,
    /// Where the Markdown was written.
    pub abs_path: PathBuf,
    pub content: String,
}

/// Generated pages keyed by virtual source path.
///
/// Owned by the pipeline and handed by reference to generation and to the
/// read hook. Rebuilt from scratch on every generation pass.
#[derive(Debug, Clone, Default)]
pub struct GeneratedPages {
    pages: BTreeMap<String, GeneratedPage>,
}

impl GeneratedPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, src_path: impl Into<String>, page: GeneratedPage) {
        self.pages.insert(src_path.into(), page);
    }

    pub fn get(&self, src_path: &str) -> Option<&GeneratedPage> {
        self.pages.get(src_path)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
