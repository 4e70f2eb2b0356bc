//! Scale command implementation.
//!
//! Lists starter positions that have since grown into material holdings.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use holdtrack_core::{ScaledPosition, SignalDetector};

use crate::cli::{HistoryArgs, OutputFormat};
use crate::commands::history_diffs;
use crate::config::Settings;
use crate::input::load_history;
use crate::output::{format_percent, format_usd, print_header, print_json, print_output};

/// Arguments for the scale command.
#[derive(Args, Debug)]
pub struct ScaleArgs {
    #[command(flatten)]
    pub history: HistoryArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct ScaledRow {
    #[tabled(rename = "Issuer")]
    issuer: String,
    #[tabled(rename = "CUSIP")]
    cusip: String,
    #[tabled(rename = "Started")]
    start_period: String,
    #[tabled(rename = "Start Value")]
    start_value: String,
    #[tabled(rename = "Start Weight")]
    start_weight: String,
    #[tabled(rename = "Current Value")]
    current_value: String,
    #[tabled(rename = "Current Weight")]
    current_weight: String,
    #[tabled(rename = "Growth")]
    growth: String,
}

impl From<&ScaledPosition> for ScaledRow {
    fn from(p: &ScaledPosition) -> Self {
        Self {
            issuer: p.issuer_name.clone(),
            cusip: p.cusip.clone(),
            start_period: p.start_period.to_string(),
            start_value: format_usd(p.start_value),
            start_weight: format_percent(p.start_weight),
            current_value: format_usd(p.current_value),
            current_weight: format_percent(p.current_weight),
            growth: format_percent(p.growth_rate),
        }
    }
}

/// Execute the scale command.
pub fn execute(args: ScaleArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let history = load_history(&args.history)?;
    let diffs = history_diffs(&history, settings);

    let detector = SignalDetector::new(settings.theme_rules(), settings.signals.clone());
    let scaled = detector.starter_to_scale(&diffs);

    match format {
        OutputFormat::Json => print_json(&scaled)?,
        OutputFormat::Minimal => {
            for p in &scaled {
                println!(
                    "{} {} {}",
                    p.issuer_name,
                    p.start_period,
                    format_percent(p.growth_rate)
                );
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            if format == OutputFormat::Table {
                print_header("Starters Scaled Up");
            }
            let rows: Vec<ScaledRow> = scaled.iter().map(ScaledRow::from).collect();
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
