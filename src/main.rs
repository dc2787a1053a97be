//! CLI entry point for generating and searching strand patterns

use clap::Parser;
use strandweave::io::cli::{Cli, Runner};

fn main() -> strandweave::Result<()> {
    let cli = Cli::parse();
    let level = if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    Runner::new(cli).run()
}
