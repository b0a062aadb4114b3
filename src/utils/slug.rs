//! Title casing and source-path utilities.
//!
//! Maps documentation source paths (`talks/intro.md`) to their output
//! locations and turns file stems and resource labels into display titles.

use anyhow::{Result, anyhow};
use std::path::{Component, Path, PathBuf};

// ============================================================================
// Titles
// ============================================================================

/// Replace `separator` with spaces and capitalize every word.
///
/// A letter is uppercased when it follows a non-letter and lowercased
/// otherwise, so `intro-to-x` becomes `Intro To X` and `API-design` becomes
/// `Api Design`.
pub fn title_case(text: &str, separator: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_letter = false;
    for c in text.chars() {
        let c = if c == separator { ' ' } else { c };
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

// ============================================================================
// Content Path Utilities
// ============================================================================

/// Relative path rendered with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Computed output location of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPaths {
    /// Output path relative to the site directory.
    /// Example: `talks/intro.md` → `talks/intro/index.html`
    pub dest: PathBuf,

    /// Site-relative URL.
    /// Example: `talks/intro.md` → `talks/intro/`
    pub url: String,
}

/// Compute output paths for a documentation source path.
///
/// | Source | `directory_urls` | dest | url |
/// |--------|------------------|------|-----|
/// | `talks/x.md` | on | `talks/x/index.html` | `talks/x/` |
/// | `talks/x.md` | off | `talks/x.html` | `talks/x.html` |
/// | `index.md` | on | `index.html` | `` |
/// | `talks/index.md` | on | `talks/index.html` | `talks/` |
/// | `images/logo.svg` | any | `images/logo.svg` | `images/logo.svg` |
pub fn content_paths(src_path: &str, directory_urls: bool) -> Result<ContentPaths> {
    if src_path.is_empty() || src_path.starts_with('/') {
        return Err(anyhow!("Not a relative source path: `{src_path}`"));
    }

    // Non-Markdown files are copied verbatim
    let Some(stem_path) = src_path.strip_suffix(".md") else {
        return Ok(ContentPaths {
            dest: PathBuf::from(src_path),
            url: src_path.to_owned(),
        });
    };

    let (parent, stem) = match stem_path.rsplit_once('/') {
        Some((parent, stem)) => (Some(parent), stem),
        None => (None, stem_path),
    };
    let dir_url = |dir: &str| match parent {
        Some(parent) if dir.is_empty() => format!("{parent}/"),
        Some(parent) => format!("{parent}/{dir}/"),
        None if dir.is_empty() => String::new(),
        None => format!("{dir}/"),
    };

    let is_index = stem == "index" || stem == "README";
    let paths = if is_index {
        let url = if directory_urls {
            dir_url("")
        } else {
            format!("{}index.html", dir_url(""))
        };
        ContentPaths {
            dest: PathBuf::from(format!("{}index.html", dir_url(""))),
            url,
        }
    } else if directory_urls {
        let url = dir_url(stem);
        ContentPaths {
            dest: PathBuf::from(format!("{url}index.html")),
            url,
        }
    } else {
        let file = format!("{stem_path}.html");
        ContentPaths {
            dest: PathBuf::from(&file),
            url: file,
        }
    };

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_stems() {
        assert_eq!(title_case("intro-to-x", '-'), "Intro To X");
        assert_eq!(title_case("API-design", '-'), "Api Design");
        assert_eq!(title_case("v2-release", '-'), "V2 Release");
        assert_eq!(title_case("", '-'), "");
    }

    #[test]
    fn test_title_case_labels() {
        assert_eq!(title_case("slides", '_'), "Slides");
        assert_eq!(title_case("source_code", '_'), "Source Code");
        assert_eq!(title_case("demo-video", '_'), "Demo-Video");
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("talks/intro.md")), "talks/intro.md");
        assert_eq!(to_slash(Path::new("./talks/intro.md")), "talks/intro.md");
    }

    #[test]
    fn test_content_paths_directory_urls() {
        let paths = content_paths("talks/x.md", true).unwrap();
        assert_eq!(paths.dest, PathBuf::from("talks/x/index.html"));
        assert_eq!(paths.url, "talks/x/");

        let paths = content_paths("about.md", true).unwrap();
        assert_eq!(paths.dest, PathBuf::from("about/index.html"));
        assert_eq!(paths.url, "about/");
    }

    #[test]
    fn test_content_paths_index() {
        let paths = content_paths("index.md", true).unwrap();
        assert_eq!(paths.dest, PathBuf::from("index.html"));
        assert_eq!(paths.url, "");

        let paths = content_paths("talks/index.md", true).unwrap();
        assert_eq!(paths.dest, PathBuf::from("talks/index.html"));
        assert_eq!(paths.url, "talks/");
    }

    #[test]
    fn test_content_paths_flat_urls() {
        let paths = content_paths("talks/x.md", false).unwrap();
        assert_eq!(paths.dest, PathBuf::from("talks/x.html"));
        assert_eq!(paths.url, "talks/x.html");

        let paths = content_paths("index.md", false).unwrap();
        assert_eq!(paths.dest, PathBuf::from("index.html"));
        assert_eq!(paths.url, "index.html");
    }

    #[test]
    fn test_content_paths_static_files() {
        let paths = content_paths("images/logo.svg", true).unwrap();
        assert_eq!(paths.dest, PathBuf::from("images/logo.svg"));
        assert_eq!(paths.url, "images/logo.svg");
    }

    #[test]
    fn test_content_paths_rejects_absolute() {
        assert!(content_paths("/etc/passwd", true).is_err());
        assert!(content_paths("", true).is_err());
    }
}
