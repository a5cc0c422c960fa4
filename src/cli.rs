//! Command-line interface of the `quicklinks` binary.
use std::path::PathBuf;

use clap::Parser;

/// Version string, overridable at build time through `QUICKLINKS_VERSION`.
pub const VERSION: &str = match option_env!("QUICKLINKS_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point for the quicklinks launcher.
#[derive(Parser, Debug)]
#[command(
    name = "quicklinks",
    about = "Run named unison, rsync and program shortcuts from a configuration file",
    version = VERSION
)]
pub struct Cli {
    /// Configuration file (defaults to $QUICKLINKS_FILE)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Keys, 1-based numbers, or `all`; prompts when omitted
    pub choices: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the resolved command lines without running them
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// List the numbered entries and exit
    #[arg(short, long)]
    pub list: bool,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_file_and_choices() {
        let cli = Cli::parse_from(["quicklinks", "-f", "links.conf", "docs", "2"]);
        assert_eq!(cli.file, Some(PathBuf::from("links.conf")));
        assert_eq!(cli.choices, vec!["docs", "2"]);
        assert!(!cli.dry_run);
        assert!(!cli.list);
    }

    #[test]
    fn parse_file_long_after_choices() {
        let cli = Cli::parse_from(["quicklinks", "docs", "--file", "links.conf"]);
        assert_eq!(cli.file, Some(PathBuf::from("links.conf")));
        assert_eq!(cli.choices, vec!["docs"]);
    }

    #[test]
    fn every_positional_is_a_choice() {
        let cli = Cli::parse_from(["quicklinks", "docs"]);
        assert!(cli.file.is_none());
        assert_eq!(cli.choices, vec!["docs"]);
    }

    #[test]
    fn parse_without_arguments() {
        let cli = Cli::parse_from(["quicklinks"]);
        assert!(cli.file.is_none());
        assert!(cli.choices.is_empty());
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["quicklinks", "-d", "all"]);
        assert!(cli.dry_run);
        assert_eq!(cli.choices, vec!["all"]);
    }

    #[test]
    fn parse_dry_run_long() {
        let cli = Cli::parse_from(["quicklinks", "--dry-run"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn parse_list() {
        let cli = Cli::parse_from(["quicklinks", "--list"]);
        assert!(cli.list);
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["quicklinks", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["quicklinks", "--bogus"]).is_err());
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }
}
