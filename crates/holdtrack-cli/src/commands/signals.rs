//! Signals command implementation.
//!
//! Runs the multi-quarter pattern detectors over a fund history.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use holdtrack_core::{Signal, SignalDetector, SignalType};

use crate::cli::{HistoryArgs, OutputFormat};
use crate::commands::history_diffs;
use crate::config::Settings;
use crate::input::load_history;
use crate::output::{print_header, print_info, print_json, print_output};

/// Arguments for the signals command.
#[derive(Args, Debug)]
pub struct SignalsArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// Only report signals of this type (e.g. consistent_accumulator, one_quarter_probe)
    #[arg(short = 't', long = "type")]
    pub signal_type: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct SignalRow {
    #[tabled(rename = "Strength")]
    strength: String,
    #[tabled(rename = "Type")]
    signal_type: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Holdings")]
    holdings: usize,
    #[tabled(rename = "Quarters")]
    quarters: String,
}

impl From<&Signal> for SignalRow {
    fn from(signal: &Signal) -> Self {
        let quarters = match (signal.quarters.first(), signal.quarters.last()) {
            (Some(first), Some(last)) if first != last => format!("{first} .. {last}"),
            (Some(only), _) => only.to_string(),
            _ => String::new(),
        };
        Self {
            strength: signal.strength.to_string(),
            signal_type: signal.signal_type.to_string(),
            description: signal.description.clone(),
            holdings: signal.holdings.len(),
            quarters,
        }
    }
}

/// Execute the signals command.
pub fn execute(args: SignalsArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let wanted = args
        .signal_type
        .as_deref()
        .map(parse_signal_type)
        .transpose()?;

    let history = load_history(&args.history)?;
    let diffs = history_diffs(&history, settings);

    let detector = SignalDetector::new(settings.theme_rules(), settings.signals.clone());
    let signals: Vec<Signal> = detector
        .detect(&diffs)
        .into_iter()
        .filter(|s| wanted.map_or(true, |t| s.signal_type == t))
        .collect();

    tracing::debug!(count = signals.len(), "Detected signals");

    match format {
        OutputFormat::Json => print_json(&signals)?,
        OutputFormat::Minimal => {
            for signal in &signals {
                println!(
                    "[{}] {}: {}",
                    signal.strength, signal.signal_type, signal.description
                );
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            if format == OutputFormat::Table {
                print_header(&format!("Signals ({} quarters)", history.len()));
            }
            let rows: Vec<SignalRow> = signals.iter().map(SignalRow::from).collect();
            if rows.is_empty() && format == OutputFormat::Table {
                print_info("No signals detected");
            } else {
                print_output(&rows, format)?;
            }
        }
    }

    Ok(())
}

fn parse_signal_type(s: &str) -> Result<SignalType> {
    let all = [
        SignalType::ConsistentAccumulator,
        SignalType::BuildThenTrim,
        SignalType::OneQuarterProbe,
        SignalType::ConcentrationShift,
        SignalType::ThemeEmergence,
    ];
    let normalized = s.trim().to_lowercase().replace('-', "_");
    all.into_iter()
        .find(|t| t.name() == normalized)
        .ok_or_else(|| {
            let names: Vec<_> = all.iter().map(SignalType::name).collect();
            anyhow::anyhow!("Unknown signal type '{s}'. Use one of: {}", names.join(", "))
        })
}
