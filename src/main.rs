//! Entry point of the `quicklinks` binary.
use anyhow::Result;
use clap::Parser;

use quicklinks::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose, "quicklinks");
    let log = logging::Logger::new("quicklinks");

    commands::run::run(&args, &log)
}
