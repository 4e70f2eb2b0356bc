//! Per-position time series rebuilt from a diff sequence.

use crate::diff::{ChangeType, QuarterDiff};
use crate::types::MatchingKey;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// State of a position at one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuarterState {
    /// Period the state was observed at.
    pub period: NaiveDate,
    /// Value at that period, `None` after an exit.
    pub value_usd: Option<i64>,
    /// Weight at that period.
    pub weight: Option<f64>,
    /// How the position changed into this period.
    pub change_type: ChangeType,
}

/// Time-ordered states of one position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionHistory {
    /// Position identity.
    pub key: MatchingKey,
    /// Issuer name from the newest state.
    pub issuer_name: String,
    /// States, oldest first.
    pub states: Vec<QuarterState>,
}

impl PositionHistory {
    /// Number of recorded periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no period was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Periods of `states[range]`.
    pub(crate) fn periods(&self, range: std::ops::Range<usize>) -> Vec<NaiveDate> {
        self.states[range].iter().map(|s| s.period).collect()
    }
}

/// Rebuilds per-position histories from diffs ordered most-recent-first.
///
/// Diffs are walked oldest to newest. Histories come back in the order
/// their key was first seen.
#[must_use]
pub fn build_histories(diffs: &[QuarterDiff]) -> Vec<PositionHistory> {
    let mut histories: Vec<PositionHistory> = Vec::new();
    let mut index: HashMap<MatchingKey, usize> = HashMap::new();

    for diff in diffs.iter().rev() {
        for pos in diff.positions() {
            let state = QuarterState {
                period: diff.period_to,
                value_usd: pos.now_value_usd,
                weight: pos.now_weight,
                change_type: pos.change_type,
            };

            let key = pos.key();
            match index.get(&key) {
                Some(&i) => {
                    let history = &mut histories[i];
                    history.issuer_name.clone_from(&pos.issuer_name);
                    history.states.push(state);
                }
                None => {
                    index.insert(key.clone(), histories.len());
                    histories.push(PositionHistory {
                        key,
                        issuer_name: pos.issuer_name.clone(),
                        states: vec![state],
                    });
                }
            }
        }
    }

    histories
}
