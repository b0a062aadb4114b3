//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Talk schedule merging and page generation for documentation sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to root (default: talkboard.toml)
    #[arg(short = 'C', long, default_value = "talkboard.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Display fragments available to page templates
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    /// Next talk card with countdown
    NextTalk,
    /// Delivered / upcoming speakers / top topic
    Stats,
    /// Carousel of the most recent past talks
    Recent,
    /// Every talk grouped by upcoming, past and unscheduled
    Schedule,
    /// Index of past talks, most recent first
    Past,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the schedule, merge talk pages and regenerate missing pages
    Build {
        /// Documentation root override (relative to `root`)
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// Validate the schedule file and exit
    Validate,

    /// Print a display fragment to stdout
    Show {
        /// Which fragment to render
        #[arg(value_enum)]
        fragment: Fragment,

        /// Maximum number of talks for the `recent` fragment
        #[arg(short, long, default_value_t = 4)]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_docs() {
        let cli = Cli::try_parse_from(["talkboard", "--root", "site", "build", "--docs", "d"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("talkboard.toml"));
        match cli.command {
            Commands::Build { docs } => assert_eq!(docs, Some(PathBuf::from("d"))),
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["talkboard", "validate"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate));
    }

    #[test]
    fn test_parse_show_fragment() {
        let cli = Cli::try_parse_from(["talkboard", "show", "next-talk"]).unwrap();
        match cli.command {
            Commands::Show { fragment, limit } => {
                assert_eq!(fragment, Fragment::NextTalk);
                assert_eq!(limit, 4);
            }
            _ => panic!("expected show"),
        }

        let cli = Cli::try_parse_from(["talkboard", "show", "recent", "--limit", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Show { fragment: Fragment::Recent, limit: 2 }
        ));
    }

    #[test]
    fn test_parse_unknown_fragment_fails() {
        assert!(Cli::try_parse_from(["talkboard", "show", "calendar"]).is_err());
    }
}
