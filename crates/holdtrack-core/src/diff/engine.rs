//! Quarter-over-quarter diff computation.

use super::concentration::Concentration;
use super::position::{ChangeType, PositionDiff, Sides};
use super::ranking::RankedMoves;
use crate::types::{DiffConfig, FilingSnapshot, Holding, MatchingKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete diff between two filings of one fund.
///
/// Computed once per filing pair and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterDiff {
    /// Filer CIK.
    pub fund_id: String,

    /// Filer name, when the filing carries one.
    pub fund_name: Option<String>,

    /// Prior period, `None` for a fund's opening filing.
    pub period_from: Option<NaiveDate>,

    /// Current period.
    pub period_to: NaiveDate,

    /// Sum of prior-side values.
    pub total_portfolio_prev: i64,

    /// Sum of current-side values.
    pub total_portfolio_now: i64,

    // =========================================================================
    // PARTITION BY CHANGE TYPE
    // =========================================================================
    /// Positions opened this quarter.
    pub new_positions: Vec<PositionDiff>,

    /// Positions closed this quarter.
    pub sold_out: Vec<PositionDiff>,

    /// Positions that gained value.
    pub increased: Vec<PositionDiff>,

    /// Positions that lost value.
    pub decreased: Vec<PositionDiff>,

    /// Positions with no value change.
    pub unchanged: Vec<PositionDiff>,

    // =========================================================================
    // RANKED LISTS
    // =========================================================================
    /// Largest positive value deltas.
    pub top_adds_by_value: Vec<PositionDiff>,

    /// Largest negative value deltas.
    pub top_cuts_by_value: Vec<PositionDiff>,

    /// Fastest growing existing positions.
    pub top_adds_by_growth_rate: Vec<PositionDiff>,

    /// Fastest shrinking positions.
    pub top_cuts_by_growth_rate: Vec<PositionDiff>,

    /// Largest positive portfolio impact.
    pub top_adds_by_portfolio_impact: Vec<PositionDiff>,

    /// Largest negative portfolio impact.
    pub top_cuts_by_portfolio_impact: Vec<PositionDiff>,

    // =========================================================================
    // STARTERS
    // =========================================================================
    /// New positions flagged as starters.
    pub new_starters: Vec<PositionDiff>,

    /// Increased starters that doubled or became material.
    pub increased_starters: Vec<PositionDiff>,

    // =========================================================================
    // DIAGNOSTICS
    // =========================================================================
    /// Sum of the 5 largest current weights.
    pub concentration_top5: f64,

    /// Sum of the 10 largest current weights.
    pub concentration_top10: f64,

    /// Sum of squared current weights.
    pub herfindahl_index: f64,

    /// Prior row count.
    pub position_count_prev: usize,

    /// Current row count.
    pub position_count_now: usize,

    /// Sum of positive value deltas.
    pub gross_adds_value: i64,

    /// Sum of absolute negative value deltas.
    pub gross_cuts_value: i64,
}

impl QuarterDiff {
    /// Iterates every position in partition order: new, increased,
    /// decreased, unchanged, sold out.
    pub fn positions(&self) -> impl Iterator<Item = &PositionDiff> {
        self.new_positions
            .iter()
            .chain(&self.increased)
            .chain(&self.decreased)
            .chain(&self.unchanged)
            .chain(&self.sold_out)
    }

    /// Iterates positions still held at the current period.
    pub fn held_positions(&self) -> impl Iterator<Item = &PositionDiff> {
        self.positions()
            .filter(|p| p.change_type != ChangeType::Exit)
    }

    /// Total number of matched positions across both sides.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.new_positions.len()
            + self.sold_out.len()
            + self.increased.len()
            + self.decreased.len()
            + self.unchanged.len()
    }

    /// Net value change, `gross_adds - gross_cuts`.
    #[must_use]
    pub fn net_flow(&self) -> i64 {
        self.gross_adds_value - self.gross_cuts_value
    }

    /// Position turnover: `min(gross adds, gross cuts) / prior total`.
    #[must_use]
    pub fn turnover(&self) -> Option<f64> {
        super::position::ratio(
            self.gross_adds_value.min(self.gross_cuts_value),
            self.total_portfolio_prev,
        )
    }
}

/// Computes the diff between two filings of the same fund.
///
/// Positions are matched by [`MatchingKey`]. Totals are recomputed from the
/// rows. Never fails: empty sides and zero totals yield `None` weights and
/// zeroed diagnostics.
///
/// # Example
///
/// ```rust,ignore
/// use holdtrack_core::prelude::*;
///
/// let diff = compute_quarter_diff(&q3, &q4, &DiffConfig::default());
/// for pos in &diff.top_adds_by_value {
///     println!("{} +{}", pos.issuer_name, pos.delta_value_usd);
/// }
/// ```
#[must_use]
pub fn compute_quarter_diff(
    prior: &FilingSnapshot,
    now: &FilingSnapshot,
    config: &DiffConfig,
) -> QuarterDiff {
    build_diff(Some(prior.period()), &prior.holdings, now, config)
}

/// Computes the diff for a fund's first filing, where every row is `NEW`.
#[must_use]
pub fn compute_opening_diff(now: &FilingSnapshot, config: &DiffConfig) -> QuarterDiff {
    build_diff(None, &[], now, config)
}

fn build_diff(
    period_from: Option<NaiveDate>,
    prior: &[Holding],
    now: &FilingSnapshot,
    config: &DiffConfig,
) -> QuarterDiff {
    let total_prev: i64 = prior.iter().map(|h| h.value_usd).sum();
    let total_now = now.total_value();

    let positions = match_positions(prior, &now.holdings, total_prev, total_now, config);

    let mut new_positions = Vec::new();
    let mut sold_out = Vec::new();
    let mut increased = Vec::new();
    let mut decreased = Vec::new();
    let mut unchanged = Vec::new();
    for pos in &positions {
        let bucket = match pos.change_type {
            ChangeType::New => &mut new_positions,
            ChangeType::Exit => &mut sold_out,
            ChangeType::Increase => &mut increased,
            ChangeType::Decrease => &mut decreased,
            ChangeType::Unchanged => &mut unchanged,
        };
        bucket.push(pos.clone());
    }

    let RankedMoves {
        top_adds_by_value,
        top_cuts_by_value,
        top_adds_by_growth_rate,
        top_cuts_by_growth_rate,
        top_adds_by_portfolio_impact,
        top_cuts_by_portfolio_impact,
    } = RankedMoves::rank(&positions, config.top_n);

    let new_starters: Vec<PositionDiff> = new_positions
        .iter()
        .filter(|d| d.is_starter)
        .cloned()
        .collect();
    let increased_starters: Vec<PositionDiff> = increased
        .iter()
        .filter(|d| d.is_starter && is_scaling(d, config))
        .cloned()
        .collect();

    let concentration = Concentration::from_values(now.holdings.iter().map(|h| h.value_usd), total_now);

    let gross_adds_value: i64 = positions
        .iter()
        .filter(|d| d.is_add())
        .map(|d| d.delta_value_usd)
        .sum();
    let gross_cuts_value: i64 = positions
        .iter()
        .filter(|d| d.is_cut())
        .map(|d| d.delta_value_usd.abs())
        .sum();

    tracing::debug!(
        fund_id = %now.meta.fund_id,
        period_from = ?period_from,
        period_to = %now.period(),
        new = new_positions.len(),
        exits = sold_out.len(),
        increased = increased.len(),
        decreased = decreased.len(),
        unchanged = unchanged.len(),
        total_prev,
        total_now,
        "Computed quarter diff"
    );

    QuarterDiff {
        fund_id: now.meta.fund_id.clone(),
        fund_name: now.meta.fund_name.clone(),
        period_from,
        period_to: now.period(),
        total_portfolio_prev: total_prev,
        total_portfolio_now: total_now,
        new_positions,
        sold_out,
        increased,
        decreased,
        unchanged,
        top_adds_by_value,
        top_cuts_by_value,
        top_adds_by_growth_rate,
        top_cuts_by_growth_rate,
        top_adds_by_portfolio_impact,
        top_cuts_by_portfolio_impact,
        new_starters,
        increased_starters,
        concentration_top5: concentration.top5,
        concentration_top10: concentration.top10,
        herfindahl_index: concentration.herfindahl,
        position_count_prev: prior.len(),
        position_count_now: now.holdings.len(),
        gross_adds_value,
        gross_cuts_value,
    }
}

/// Builds one `PositionDiff` per matching key present on either side.
///
/// Key order: current-side rows in filing order, then prior-only rows in
/// filing order. A key repeated within one side resolves to its last row.
fn match_positions(
    prior: &[Holding],
    now: &[Holding],
    total_prev: i64,
    total_now: i64,
    config: &DiffConfig,
) -> Vec<PositionDiff> {
    let prior_by_key: HashMap<MatchingKey, &Holding> = prior.iter().map(|h| (h.key(), h)).collect();
    let now_by_key: HashMap<MatchingKey, &Holding> = now.iter().map(|h| (h.key(), h)).collect();

    let mut order: Vec<MatchingKey> = Vec::with_capacity(prior_by_key.len() + now_by_key.len());
    let mut seen = std::collections::HashSet::with_capacity(order.capacity());
    for key in now.iter().chain(prior).map(Holding::key) {
        if seen.insert(key.clone()) {
            order.push(key);
        }
    }

    order
        .iter()
        .filter_map(|key| {
            Sides::from_options(
                prior_by_key.get(key).copied(),
                now_by_key.get(key).copied(),
            )
        })
        .map(|sides| PositionDiff::from_sides(sides, total_prev, total_now, &config.starter))
        .collect()
}

/// A starter scales by doubling or by moving the whole portfolio noticeably.
fn is_scaling(diff: &PositionDiff, config: &DiffConfig) -> bool {
    diff.growth_rate
        .is_some_and(|g| g >= config.scaling_growth_min)
        || diff
            .portfolio_impact
            .is_some_and(|i| i >= config.scaling_impact_min)
}
