//! Holdtrack CLI - 13F position diffs and thesis signals.
//!
//! # Usage
//!
//! ```bash
//! # Diff the two latest filings of a fund
//! holdtrack diff fund.json
//!
//! # Every adjacent pair, as JSON
//! holdtrack --format json diff fund.json --all
//!
//! # Multi-quarter signals over the last 8 filings
//! holdtrack signals fund.json --periods 8
//!
//! # Starters that grew into material positions
//! holdtrack scale fund.json
//!
//! # Theme breakdown of the latest filing
//! holdtrack themes fund.json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod input;
mod output;

use cli::{Cli, Commands};
use config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = cli.format;
    let config_path = cli.config.as_deref();

    // Loaded lazily so `config path` works even when the file is broken
    let settings = || Settings::load(config_path);

    match cli.command {
        Commands::Diff(args) => commands::diff::execute(args, &settings()?, format)?,
        Commands::Signals(args) => commands::signals::execute(args, &settings()?, format)?,
        Commands::Scale(args) => commands::scale::execute(args, &settings()?, format)?,
        Commands::Themes(args) => commands::themes::execute(args, &settings()?, format)?,
        Commands::Config(args) => commands::config::execute(args, config_path, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "holdtrack_core=debug,holdtrack_cli=debug",
        _ => "holdtrack_core=trace,holdtrack_cli=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
