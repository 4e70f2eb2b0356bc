//! Concentration diagnostics for a single snapshot.

use super::position::ratio;
use serde::{Deserialize, Serialize};

/// Concentration measures over current-side weights.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Concentration {
    /// Sum of the 5 largest weights.
    pub top5: f64,
    /// Sum of the 10 largest weights.
    pub top10: f64,
    /// Sum of squared weights over every position.
    pub herfindahl: f64,
}

impl Concentration {
    /// Computes concentration from row values and their total.
    ///
    /// Every measure is 0.0 when there are no rows or the total is not positive.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = i64>, total: i64) -> Self {
        let mut weights: Vec<f64> = values
            .into_iter()
            .filter_map(|v| ratio(v, total))
            .collect();

        if weights.is_empty() {
            return Self::default();
        }

        weights.sort_by(|a, b| b.total_cmp(a));

        Self {
            top5: leading_sum(&weights, 5),
            top10: leading_sum(&weights, 10),
            herfindahl: weights.iter().map(|w| w * w).sum(),
        }
    }

    /// Effective number of positions, `1 / HHI`.
    #[must_use]
    pub fn effective_positions(&self) -> Option<f64> {
        (self.herfindahl > 0.0).then(|| 1.0 / self.herfindahl)
    }
}

/// Sum of the first `n` weights, or of all weights if fewer exist.
fn leading_sum(sorted_desc: &[f64], n: usize) -> f64 {
    sorted_desc.iter().take(n).sum()
}
