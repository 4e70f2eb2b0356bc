//! Themes command implementation.
//!
//! Groups the latest filing's holdings by investment theme.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use holdtrack_core::{
    cluster_holdings, summarize_clusters, ClusterSummary, ThemeCluster, ThemedHolding,
};

use crate::cli::{HistoryArgs, OutputFormat};
use crate::config::Settings;
use crate::input::load_history;
use crate::output::{
    format_percent, format_usd, print_header, print_json, print_output, print_table,
};

/// Arguments for the themes command.
#[derive(Args, Debug)]
pub struct ThemesArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// List the holdings inside each theme
    #[arg(short, long)]
    pub members: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ClusterRow {
    #[tabled(rename = "Theme")]
    theme: String,
    #[tabled(rename = "Holdings")]
    count: usize,
    #[tabled(rename = "Value")]
    total_value: String,
    #[tabled(rename = "Weight")]
    total_weight: String,
}

impl From<&ClusterSummary> for ClusterRow {
    fn from(s: &ClusterSummary) -> Self {
        Self {
            theme: s.theme.clone(),
            count: s.count,
            total_value: format_usd(s.total_value),
            total_weight: format_percent(s.total_weight),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct MemberRow {
    #[tabled(rename = "Theme")]
    theme: String,
    #[tabled(rename = "Issuer")]
    issuer: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

/// Execute the themes command.
pub fn execute(args: ThemesArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let history = load_history(&args.history)?;
    let Some(latest) = history.first() else {
        return Ok(());
    };

    let rules = settings.theme_rules();
    let holdings = ThemedHolding::from_snapshot(latest);

    if args.members {
        let clusters = cluster_holdings(&holdings, &rules);
        return print_members(&clusters, format);
    }

    let summaries = summarize_clusters(&holdings, &rules);
    match format {
        OutputFormat::Json => print_json(&summaries)?,
        _ => {
            if format == OutputFormat::Table {
                print_header(&format!("Themes at {}", latest.period()));
            }
            let rows: Vec<ClusterRow> = summaries.iter().map(ClusterRow::from).collect();
            print_output(&rows, format)?;
        }
    }

    Ok(())
}

fn print_members(clusters: &[ThemeCluster], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(clusters),
        OutputFormat::Table => {
            for cluster in clusters {
                print_header(&cluster.theme);
                print_table(&member_rows(cluster))?;
            }
            Ok(())
        }
        _ => {
            let rows: Vec<MemberRow> = clusters.iter().flat_map(member_rows).collect();
            print_output(&rows, format)
        }
    }
}

fn member_rows(cluster: &ThemeCluster) -> Vec<MemberRow> {
    cluster
        .holdings
        .iter()
        .map(|h| MemberRow {
            theme: cluster.theme.clone(),
            issuer: h.issuer_name.clone(),
            value: format_usd(h.value_usd),
            weight: format_percent(h.weight),
        })
        .collect()
}
