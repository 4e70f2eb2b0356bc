//! CLI command implementations.

pub mod config;
pub mod diff;
pub mod scale;
pub mod signals;
pub mod themes;

pub use config::ConfigArgs;
pub use diff::DiffArgs;
pub use scale::ScaleArgs;
pub use signals::SignalsArgs;
pub use themes::ThemesArgs;

use holdtrack_core::{compute_all_diffs, compute_opening_diff, FilingSnapshot, QuarterDiff};

use crate::config::Settings;

/// Diffs every adjacent pair of a newest-first history.
///
/// A single filing yields its opening diff against an empty portfolio.
pub fn history_diffs(history: &[FilingSnapshot], settings: &Settings) -> Vec<QuarterDiff> {
    match history {
        [only] => vec![compute_opening_diff(only, &settings.diff)],
        _ => compute_all_diffs(history, &settings.diff),
    }
}

/// Display name of a diff's fund, falling back to its CIK.
pub fn fund_label(diff: &QuarterDiff) -> &str {
    diff.fund_name.as_deref().unwrap_or(&diff.fund_id)
}

/// `2024-06-30 -> 2024-09-30`, or `opening 2024-09-30` with no prior filing.
pub fn period_label(diff: &QuarterDiff) -> String {
    match diff.period_from {
        Some(from) => format!("{from} -> {}", diff.period_to),
        None => format!("opening {}", diff.period_to),
    }
}
