//! Former starters that grew into material positions.

use chrono::NaiveDate;
use serde::Serialize;

/// A position first seen as a new starter that has since scaled up.
///
/// `growth_rate` is `f64::INFINITY` when the starter was recorded at zero
/// value; JSON renders that as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledPosition {
    /// Issuer name when first flagged.
    pub issuer_name: String,
    /// CUSIP.
    pub cusip: String,
    /// Period of the first new-starter flag.
    pub start_period: NaiveDate,
    /// Value when first flagged.
    pub start_value: i64,
    /// Weight when first flagged.
    pub start_weight: f64,
    /// Value in the latest diff.
    pub current_value: i64,
    /// Weight in the latest diff.
    pub current_weight: f64,
    /// `(current - start) / start`.
    pub growth_rate: f64,
}

impl ScaledPosition {
    /// Returns true if growth is measured from a zero starting value.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.growth_rate.is_infinite()
    }
}

/// Growth from a starter value, `+inf` from zero.
pub(crate) fn growth_from_start(start: i64, current: i64) -> f64 {
    if start > 0 {
        (current - start) as f64 / start as f64
    } else {
        f64::INFINITY
    }
}
