//! Per-security comparison between two filings.

use crate::types::{Holding, MatchingKey, PutCall, StarterThresholds};
use serde::{Deserialize, Serialize};

/// How a position changed between two filings.
///
/// Evaluated in declaration order: presence changes win over value deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// Absent before, present now.
    New,
    /// Present before, absent now.
    Exit,
    /// Value went up.
    Increase,
    /// Value went down.
    Decrease,
    /// Value did not move.
    Unchanged,
}

impl ChangeType {
    /// Returns the label used in reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Exit => "EXIT",
            Self::Increase => "INCREASE",
            Self::Decrease => "DECREASE",
            Self::Unchanged => "UNCHANGED",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The rows a matching key resolved to on each side.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Sides<'a> {
    Both { prior: &'a Holding, now: &'a Holding },
    NowOnly(&'a Holding),
    PriorOnly(&'a Holding),
}

impl<'a> Sides<'a> {
    pub(crate) fn from_options(prior: Option<&'a Holding>, now: Option<&'a Holding>) -> Option<Self> {
        match (prior, now) {
            (Some(prior), Some(now)) => Some(Self::Both { prior, now }),
            (None, Some(now)) => Some(Self::NowOnly(now)),
            (Some(prior), None) => Some(Self::PriorOnly(prior)),
            (None, None) => None,
        }
    }

    fn prior(&self) -> Option<&'a Holding> {
        match *self {
            Self::Both { prior, .. } | Self::PriorOnly(prior) => Some(prior),
            Self::NowOnly(_) => None,
        }
    }

    fn now(&self) -> Option<&'a Holding> {
        match *self {
            Self::Both { now, .. } | Self::NowOnly(now) => Some(now),
            Self::PriorOnly(_) => None,
        }
    }

    /// Row used for display fields: the current side, else the prior side.
    fn reference(&self) -> &'a Holding {
        match *self {
            Self::Both { now, .. } | Self::NowOnly(now) => now,
            Self::PriorOnly(prior) => prior,
        }
    }
}

/// Diff for a single position between two filings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDiff {
    /// CUSIP.
    pub cusip: String,

    /// Issuer name (current side when present).
    pub issuer_name: String,

    /// Title of class.
    pub title_of_class: String,

    /// Prior value, `None` when absent before.
    pub prev_value_usd: Option<i64>,

    /// Current value, `None` when absent now.
    pub now_value_usd: Option<i64>,

    /// `now - prev`, treating an absent side as zero.
    pub delta_value_usd: i64,

    /// Prior share count.
    pub prev_shares: Option<i64>,

    /// Current share count.
    pub now_shares: Option<i64>,

    /// `now - prev` shares, treating an absent side as zero.
    pub delta_shares: i64,

    /// Prior weight (as decimal, 0.05 = 5%).
    pub prev_weight: Option<f64>,

    /// Current weight (as decimal).
    pub now_weight: Option<f64>,

    /// `(now - prev) / prev`, defined only when both sides exist and prev > 0.
    pub growth_rate: Option<f64>,

    /// `delta / prior total`, defined only when the prior total is positive.
    pub portfolio_impact: Option<f64>,

    /// Change classification.
    pub change_type: ChangeType,

    /// Starter flag, evaluated on the current side.
    pub is_starter: bool,

    /// Option flag carried through for display.
    pub put_call: Option<PutCall>,
}

impl PositionDiff {
    pub(crate) fn from_sides(
        sides: Sides<'_>,
        total_prev: i64,
        total_now: i64,
        starter: &StarterThresholds,
    ) -> Self {
        let prior = sides.prior();
        let now = sides.now();

        let prev_value = prior.map(|h| h.value_usd);
        let now_value = now.map(|h| h.value_usd);
        let prev_shares = prior.map(|h| h.shares_or_principal);
        let now_shares = now.map(|h| h.shares_or_principal);

        let delta_value = now_value.unwrap_or(0) - prev_value.unwrap_or(0);
        let delta_shares = now_shares.unwrap_or(0) - prev_shares.unwrap_or(0);

        let prev_weight = prev_value.and_then(|v| ratio(v, total_prev));
        let now_weight = now_value.and_then(|v| ratio(v, total_now));

        let growth_rate = match (prev_value, now_value) {
            (Some(prev), Some(now)) if prev > 0 => Some((now - prev) as f64 / prev as f64),
            _ => None,
        };
        let portfolio_impact = ratio(delta_value, total_prev);

        let change_type = match sides {
            Sides::NowOnly(_) => ChangeType::New,
            Sides::PriorOnly(_) => ChangeType::Exit,
            Sides::Both { .. } if delta_value > 0 => ChangeType::Increase,
            Sides::Both { .. } if delta_value < 0 => ChangeType::Decrease,
            Sides::Both { .. } => ChangeType::Unchanged,
        };

        let reference = sides.reference();
        Self {
            cusip: reference.cusip.clone(),
            issuer_name: reference.issuer_name.clone(),
            title_of_class: reference.title_of_class.clone(),
            prev_value_usd: prev_value,
            now_value_usd: now_value,
            delta_value_usd: delta_value,
            prev_shares,
            now_shares,
            delta_shares,
            prev_weight,
            now_weight,
            growth_rate,
            portfolio_impact,
            change_type,
            is_starter: starter.is_starter(now_weight, now_value),
            put_call: reference.put_call,
        }
    }

    /// Returns the matching key of this position.
    #[must_use]
    pub fn key(&self) -> MatchingKey {
        MatchingKey::new(&self.cusip, &self.title_of_class, self.put_call)
    }

    /// Returns true if the position gained value.
    #[must_use]
    pub fn is_add(&self) -> bool {
        self.delta_value_usd > 0
    }

    /// Returns true if the position lost value.
    #[must_use]
    pub fn is_cut(&self) -> bool {
        self.delta_value_usd < 0
    }
}

/// `numerator / denominator`, `None` unless the denominator is positive.
pub(crate) fn ratio(numerator: i64, denominator: i64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}
