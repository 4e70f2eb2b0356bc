//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, DiffArgs, ScaleArgs, SignalsArgs, ThemesArgs};

/// Holdtrack - Quarter-over-quarter 13F position diffs and thesis signals
#[derive(Parser)]
#[command(name = "holdtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML)
    #[arg(short, long, env = "HOLDTRACK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compare the latest filing with the one before it
    Diff(DiffArgs),

    /// Detect multi-quarter signals (accumulation, trims, probes, themes)
    Signals(SignalsArgs),

    /// List starter positions that grew into material holdings
    Scale(ScaleArgs),

    /// Break the latest filing down by investment theme
    Themes(ThemesArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),
}

/// Filing history input shared by the analysis commands.
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Fund history file (JSON)
    pub input: PathBuf,

    /// Number of most recent reporting periods to load
    #[arg(short, long, default_value = "5")]
    pub periods: usize,

    /// Ignore amended filings
    #[arg(long)]
    pub original_only: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one line per result)
    Minimal,
}
