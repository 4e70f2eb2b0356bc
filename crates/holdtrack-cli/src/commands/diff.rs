//! Diff command implementation.
//!
//! Compares consecutive filings of a fund.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use holdtrack_core::{PositionDiff, QuarterDiff};

use crate::cli::{HistoryArgs, OutputFormat};
use crate::commands::{fund_label, history_diffs, period_label};
use crate::config::Settings;
use crate::input::load_history;
use crate::output::{
    format_opt_percent, format_opt_usd, format_percent, format_signed_usd, print_csv,
    print_header, print_json, print_output, print_table, KeyValue,
};

/// Arguments for the diff command.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// Diff every adjacent pair instead of only the latest
    #[arg(short, long)]
    pub all: bool,

    /// Length of the ranked lists (overrides the configuration)
    #[arg(short, long)]
    pub top: Option<usize>,
}

/// One position in a diff.
#[derive(Debug, Serialize, Tabled)]
pub struct PositionRow {
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Issuer")]
    pub issuer: String,
    #[tabled(rename = "Class")]
    pub class: String,
    #[tabled(rename = "Change")]
    pub change: String,
    #[tabled(rename = "Prior")]
    pub prev_value: String,
    #[tabled(rename = "Current")]
    pub now_value: String,
    #[tabled(rename = "Delta")]
    pub delta: String,
    #[tabled(rename = "Growth")]
    pub growth: String,
    #[tabled(rename = "Impact")]
    pub impact: String,
    #[tabled(rename = "Weight")]
    pub weight: String,
    #[tabled(rename = "Starter")]
    pub starter: String,
}

impl PositionRow {
    fn new(diff: &QuarterDiff, position: &PositionDiff) -> Self {
        let class = match position.put_call {
            Some(pc) => format!("{} ({pc})", position.title_of_class),
            None => position.title_of_class.clone(),
        };
        Self {
            period: diff.period_to.to_string(),
            issuer: position.issuer_name.clone(),
            class,
            change: position.change_type.to_string(),
            prev_value: format_opt_usd(position.prev_value_usd),
            now_value: format_opt_usd(position.now_value_usd),
            delta: format_signed_usd(position.delta_value_usd),
            growth: format_opt_percent(position.growth_rate),
            impact: format_opt_percent(position.portfolio_impact),
            weight: format_opt_percent(position.now_weight.or(position.prev_weight)),
            starter: if position.is_starter { "yes" } else { "" }.to_string(),
        }
    }
}

/// Execute the diff command.
pub fn execute(args: DiffArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(top) = args.top {
        settings.diff = settings.diff.with_top_n(top);
        settings.diff.validate()?;
    }

    let history = load_history(&args.history)?;
    let mut diffs = history_diffs(&history, &settings);
    if !args.all {
        diffs.truncate(1);
    }

    match format {
        OutputFormat::Json => {
            if args.all {
                print_json(&diffs)?;
            } else if let Some(latest) = diffs.first() {
                print_json(latest)?;
            }
        }
        OutputFormat::Csv => {
            let rows: Vec<PositionRow> = diffs
                .iter()
                .flat_map(|d| d.positions().map(move |p| PositionRow::new(d, p)))
                .collect();
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => {
            for diff in &diffs {
                println!(
                    "{} new={} exit={} increase={} decrease={} unchanged={} net={}",
                    diff.period_to,
                    diff.new_positions.len(),
                    diff.sold_out.len(),
                    diff.increased.len(),
                    diff.decreased.len(),
                    diff.unchanged.len(),
                    diff.net_flow()
                );
            }
        }
        OutputFormat::Table => {
            for diff in &diffs {
                print_diff_table(diff, format)?;
            }
        }
    }

    Ok(())
}

fn print_diff_table(diff: &QuarterDiff, format: OutputFormat) -> Result<()> {
    print_header(&format!("{}: {}", fund_label(diff), period_label(diff)));
    print_output(&summary(diff), format)?;

    let sections: [(&str, &[PositionDiff]); 6] = [
        ("New Positions", &diff.new_positions),
        ("Sold Out", &diff.sold_out),
        ("Top Adds by Value", &diff.top_adds_by_value),
        ("Top Cuts by Value", &diff.top_cuts_by_value),
        ("New Starters", &diff.new_starters),
        ("Scaling Starters", &diff.increased_starters),
    ];

    for (title, positions) in sections {
        if positions.is_empty() {
            continue;
        }
        print_header(title);
        let rows: Vec<PositionRow> = positions.iter().map(|p| PositionRow::new(diff, p)).collect();
        print_table(&rows)?;
    }
    Ok(())
}

fn summary(diff: &QuarterDiff) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::from_usd("Prior Total", diff.total_portfolio_prev),
        KeyValue::from_usd("Current Total", diff.total_portfolio_now),
        KeyValue::new(
            "Positions",
            format!("{} -> {}", diff.position_count_prev, diff.position_count_now),
        ),
        KeyValue::new("New / Exited", format!("{} / {}", diff.new_positions.len(), diff.sold_out.len())),
        KeyValue::new(
            "Increased / Decreased / Unchanged",
            format!(
                "{} / {} / {}",
                diff.increased.len(),
                diff.decreased.len(),
                diff.unchanged.len()
            ),
        ),
        KeyValue::new("Gross Adds", format_signed_usd(diff.gross_adds_value)),
        KeyValue::new("Gross Cuts", format_signed_usd(-diff.gross_cuts_value)),
        KeyValue::new("Net Flow", format_signed_usd(diff.net_flow())),
        KeyValue::from_percent("Top-5 Concentration", diff.concentration_top5),
        KeyValue::from_percent("Top-10 Concentration", diff.concentration_top10),
        KeyValue::new("Herfindahl Index", format!("{:.4}", diff.herfindahl_index)),
    ];
    if let Some(turnover) = diff.turnover() {
        rows.push(KeyValue::new("Turnover", format_percent(turnover)));
    }
    rows
}
