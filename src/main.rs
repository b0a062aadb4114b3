//! Talkboard - talk schedule merging and page generation for documentation sites.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use talkboard::{
    build::{Pipeline, build_site},
    cli::{Cli, Commands, Fragment},
    config::SiteConfig,
    display, log,
    schedule::validate_schedule,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(config, Utc::now()).map(|_| ()),
        Commands::Validate => {
            let path = validate_schedule(&config.build.schedule)?;
            log!("schedule"; "{}", path.display());
            println!("Schedule validation passed.");
            Ok(())
        }
        Commands::Show { fragment, limit } => show(config, *fragment, *limit),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let mut config = SiteConfig::load(root, &cli.config)?;
    config.update_with_cli(cli);
    Ok(config)
}

/// Print one display fragment to stdout.
fn show(config: SiteConfig, fragment: Fragment, limit: usize) -> Result<()> {
    let pipeline = Pipeline::new(config, Utc::now());
    let overview = pipeline.overview()?;

    let html = match fragment {
        Fragment::NextTalk => display::next_talk(overview),
        Fragment::Stats => display::quick_stats(overview),
        Fragment::Recent => {
            display::recent_talks(overview, limit, &pipeline.config().display.thumbnail)
        }
        Fragment::Schedule => display::schedule_listing(overview),
        Fragment::Past => display::past_index(overview),
    };
    print!("{html}");
    Ok(())
}
