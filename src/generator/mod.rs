//! Synthesized pages for scheduled talks without an authored page.
//!
//! Generation is a full rebuild: the reserved generated directory is wiped
//! and every generated entry purged from the file set before anything is
//! written, so pages for removed or renamed talks never linger.

pub mod page;

pub use page::build_talk_markdown;

use crate::{
    config::SiteConfig,
    debug, log,
    site::{GeneratedPage, GeneratedPages, SiteFile, SiteFiles},
    talk::Talk,
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Remove the generated directory. It is recreated lazily on write.
pub fn reset_generated_root(generated_dir: &Path) -> Result<()> {
    if generated_dir.exists() {
        fs::remove_dir_all(generated_dir)
            .with_context(|| format!("Failed to clear {}", generated_dir.display()))?;
    }
    Ok(())
}

/// Drop previously registered generated entries from `files`.
pub fn purge_generated_files(files: &mut SiteFiles, generated_prefix: &str) -> usize {
    let purged = files.purge(generated_prefix);
    if purged > 0 {
        debug!("generate"; "purged {purged} stale entries");
    }
    purged
}

/// Slugs become file names; anything that could leave the directory is refused.
fn is_safe_slug(slug: &str) -> bool {
    !slug.contains(['/', '\\']) && slug != "." && slug != ".."
}

/// Render `talk`, write it to `path` and return the content.
pub fn write_generated_markdown(talk: &Talk, path: &Path) -> Result<String> {
    let content = build_talk_markdown(talk)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, &content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(content)
}

/// Generate a page for every slugged talk lacking an authored one.
///
/// Each page is written to `<generated>/<talks>/<slug>.md`, registered in
/// `files` under the authored-style path `<talks>/<slug>.md`, and recorded
/// in the returned registry.
pub fn generate_missing_talk_pages(
    talks: &[Talk],
    config: &SiteConfig,
    files: &mut SiteFiles,
) -> Result<GeneratedPages> {
    let docs_dir = &config.build.docs;
    let talks_prefix = config.talks_prefix();
    let generated_talks_dir: PathBuf = config.generated_dir().join(&config.build.talks);
    let mut generated = GeneratedPages::new();

    for talk in talks {
        let Some(slug) = talk.slug() else { continue };
        if !is_safe_slug(slug) {
            log!("warn"; "skipping talk `{}`: slug `{slug}` is not a plain file name", talk.title);
            continue;
        }

        let src_path = format!("{talks_prefix}/{slug}.md");
        if files.get_authored(&src_path).is_some() || docs_dir.join(&src_path).exists() {
            continue;
        }

        let abs_path = generated_talks_dir.join(format!("{slug}.md"));
        let content = write_generated_markdown(talk, &abs_path)?;
        let file = SiteFile::new(&src_path, docs_dir, &config.build.site, config.build.directory_urls)?
            .generated(abs_path.clone());
        files.insert(file);
        generated.insert(
            src_path,
            GeneratedPage {
                slug: slug.to_owned(),
                abs_path,
                content,
            },
        );
    }

    Ok(generated)
}
