//! The set of buildable source files.

use crate::utils::slug::{content_paths, to_slash};
use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Where a file's content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Written by a human under the documentation root.
    Authored,
    /// Synthesized by the page generator.
    Generated,
}

/// One buildable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    /// Virtual path relative to the documentation root, `/`-separated.
    pub src_path: String,
    /// Where the content actually lives on disk.
    pub abs_src_path: PathBuf,
    /// Output path under the site directory.
    pub dest_path: PathBuf,
    /// Site-relative URL.
    pub url: String,
    pub origin: Origin,
}

impl SiteFile {
    /// Authored file at `docs_dir/src_path`.
    pub fn new(src_path: &str, docs_dir: &Path, site_dir: &Path, directory_urls: bool) -> Result<Self> {
        let paths = content_paths(src_path, directory_urls)?;
        Ok(Self {
            src_path: src_path.to_owned(),
            abs_src_path: docs_dir.join(src_path),
            dest_path: site_dir.join(paths.dest),
            url: paths.url,
            origin: Origin::Authored,
        })
    }

    /// Same virtual path, content served from `abs_src_path`.
    pub fn generated(mut self, abs_src_path: PathBuf) -> Self {
        self.abs_src_path = abs_src_path;
        self.origin = Origin::Generated;
        self
    }

    /// Read the file's content from disk.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.abs_src_path)
            .with_context(|| format!("Failed to read {}", self.abs_src_path.display()))
    }
}

/// Files keyed by virtual source path.
#[derive(Debug, Clone, Default)]
pub struct SiteFiles {
    files: BTreeMap<String, SiteFile>,
}

impl SiteFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `docs_dir` and register every file as authored.
    pub fn collect(docs_dir: &Path, site_dir: &Path, directory_urls: bool) -> Result<Self> {
        let mut files = Self::new();
        if !docs_dir.is_dir() {
            return Ok(files);
        }

        for entry in WalkDir::new(docs_dir).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", docs_dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(docs_dir).unwrap_or(entry.path());
            files.insert(SiteFile::new(&to_slash(rel), docs_dir, site_dir, directory_urls)?);
        }
        Ok(files)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteFile> {
        self.files.values()
    }

    pub fn get(&self, src_path: &str) -> Option<&SiteFile> {
        self.files.get(src_path)
    }

    /// Authored file registered at `src_path`.
    pub fn get_authored(&self, src_path: &str) -> Option<&SiteFile> {
        self.get(src_path).filter(|file| file.origin == Origin::Authored)
    }

    pub fn remove(&mut self, src_path: &str) -> Option<SiteFile> {
        self.files.remove(src_path)
    }

    /// Insert a file, returning the entry it replaced.
    pub fn insert(&mut self, file: SiteFile) -> Option<SiteFile> {
        self.files.insert(file.src_path.clone(), file)
    }

    /// Drop every generated entry and every entry under `prefix/`.
    /// Returns the number of entries removed.
    pub fn purge(&mut self, prefix: &str) -> usize {
        let dir = format!("{}/", prefix.trim_end_matches('/'));
        let before = self.files.len();
        self.files
            .retain(|path, file| file.origin == Origin::Authored && !path.starts_with(&dir));
        before - self.files.len()
    }
}
