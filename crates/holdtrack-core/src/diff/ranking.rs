//! Ranked adds and cuts.
//!
//! All rankings are stable sorts over the matching-key order of the diff,
//! so exact ties keep the order in which their keys were first seen.

use super::position::{ChangeType, PositionDiff};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Six top-N lists of the largest moves in a quarter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedMoves {
    /// Largest positive value deltas.
    pub top_adds_by_value: Vec<PositionDiff>,
    /// Largest negative value deltas.
    pub top_cuts_by_value: Vec<PositionDiff>,
    /// Fastest growing existing positions (NEW excluded).
    pub top_adds_by_growth_rate: Vec<PositionDiff>,
    /// Fastest shrinking positions with a defined growth rate.
    pub top_cuts_by_growth_rate: Vec<PositionDiff>,
    /// Largest positive portfolio impact.
    pub top_adds_by_portfolio_impact: Vec<PositionDiff>,
    /// Largest negative portfolio impact.
    pub top_cuts_by_portfolio_impact: Vec<PositionDiff>,
}

impl RankedMoves {
    /// Ranks the positions of one diff.
    #[must_use]
    pub fn rank(positions: &[PositionDiff], top_n: usize) -> Self {
        let adds: Vec<&PositionDiff> = positions.iter().filter(|d| d.is_add()).collect();
        let cuts: Vec<&PositionDiff> = positions.iter().filter(|d| d.is_cut()).collect();

        let adds_with_growth = adds
            .iter()
            .copied()
            .filter(|d| d.growth_rate.is_some() && d.change_type != ChangeType::New)
            .collect();
        let cuts_with_growth = cuts
            .iter()
            .copied()
            .filter(|d| d.growth_rate.is_some())
            .collect();
        let adds_with_impact = adds
            .iter()
            .copied()
            .filter(|d| d.portfolio_impact.is_some())
            .collect();
        let cuts_with_impact = cuts
            .iter()
            .copied()
            .filter(|d| d.portfolio_impact.is_some())
            .collect();

        Self {
            top_adds_by_value: top_n_by(adds, top_n, |a, b| {
                b.delta_value_usd.cmp(&a.delta_value_usd)
            }),
            top_cuts_by_value: top_n_by(cuts, top_n, |a, b| {
                a.delta_value_usd.cmp(&b.delta_value_usd)
            }),
            top_adds_by_growth_rate: top_n_by(adds_with_growth, top_n, |a, b| {
                descending(a.growth_rate, b.growth_rate)
            }),
            top_cuts_by_growth_rate: top_n_by(cuts_with_growth, top_n, |a, b| {
                descending(b.growth_rate, a.growth_rate)
            }),
            top_adds_by_portfolio_impact: top_n_by(adds_with_impact, top_n, |a, b| {
                descending(a.portfolio_impact, b.portfolio_impact)
            }),
            top_cuts_by_portfolio_impact: top_n_by(cuts_with_impact, top_n, |a, b| {
                descending(b.portfolio_impact, a.portfolio_impact)
            }),
        }
    }
}

fn top_n_by<F>(mut candidates: Vec<&PositionDiff>, n: usize, compare: F) -> Vec<PositionDiff>
where
    F: Fn(&PositionDiff, &PositionDiff) -> Ordering,
{
    candidates.sort_by(|a, b| compare(a, b));
    candidates.into_iter().take(n).cloned().collect()
}

/// Orders `a` before `b` when `a` is larger. Callers filter out `None` first.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0).total_cmp(&a.unwrap_or(0.0))
}
