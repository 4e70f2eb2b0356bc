//! Signal records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pattern a signal reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    /// Several consecutive quarterly increases.
    ConsistentAccumulator,
    /// A run of increases followed by a decrease.
    BuildThenTrim,
    /// Opened and closed again within a short window.
    OneQuarterProbe,
    /// Top-5 concentration moved between the oldest and newest diff.
    ConcentrationShift,
    /// Several new starters in one theme in a single quarter.
    ThemeEmergence,
}

impl SignalType {
    /// Returns the snake_case tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConsistentAccumulator => "consistent_accumulator",
            Self::BuildThenTrim => "build_then_trim",
            Self::OneQuarterProbe => "one_quarter_probe",
            Self::ConcentrationShift => "concentration_shift",
            Self::ThemeEmergence => "theme_emergence",
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Signal strength. Orders strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    /// Strong.
    Strong,
    /// Moderate.
    Moderate,
    /// Weak.
    Weak,
}

impl Strength {
    /// Returns the lowercase tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Direction of a concentration shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    /// The portfolio became more concentrated.
    Increased,
    /// The portfolio became less concentrated.
    Decreased,
}

impl ShiftDirection {
    /// Returns the lowercase tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Increased => "increased",
            Self::Decreased => "decreased",
        }
    }
}

impl std::fmt::Display for ShiftDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Type-specific figures attached to a signal.
///
/// Serialized without a tag, so JSON carries only the fields of the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalDetails {
    /// Longest run of consecutive increases.
    Accumulator {
        /// Run length.
        consecutive_increases: usize,
    },
    /// Increases before the trim.
    BuildThenTrim {
        /// Build length.
        build_quarters: usize,
    },
    /// Quarters between open and close, inclusive.
    Probe {
        /// Holding period in quarters.
        quarters_held: usize,
    },
    /// Concentration before and after.
    ConcentrationShift {
        /// Absolute change in top-5 concentration.
        concentration_change: f64,
        /// Sign of the change.
        direction: ShiftDirection,
        /// Top-5 concentration of the oldest diff.
        from: f64,
        /// Top-5 concentration of the newest diff.
        to: f64,
    },
    /// Theme and member count.
    Theme {
        /// Theme name.
        cluster: String,
        /// Number of new starters in the theme.
        count: usize,
    },
}

/// A multi-quarter pattern found in a fund's diff history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Pattern.
    pub signal_type: SignalType,
    /// One-line summary.
    pub description: String,
    /// Issuer names involved.
    pub holdings: Vec<String>,
    /// Periods involved, oldest first.
    pub quarters: Vec<NaiveDate>,
    /// Strength.
    pub strength: Strength,
    /// Type-specific figures.
    pub details: SignalDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_orders_strong_first() {
        let mut v = vec![Strength::Weak, Strength::Strong, Strength::Moderate];
        v.sort();
        assert_eq!(v, vec![Strength::Strong, Strength::Moderate, Strength::Weak]);
    }

    #[test]
    fn test_serialized_tags() {
        assert_eq!(
            serde_json::to_string(&SignalType::OneQuarterProbe).unwrap(),
            "\"one_quarter_probe\""
        );
        assert_eq!(serde_json::to_string(&Strength::Moderate).unwrap(), "\"moderate\"");

        let details = SignalDetails::Accumulator {
            consecutive_increases: 4,
        };
        assert_eq!(
            serde_json::to_string(&details).unwrap(),
            r#"{"consecutive_increases":4}"#
        );
    }

    #[test]
    fn test_untagged_details_roundtrip() {
        let details = SignalDetails::ConcentrationShift {
            concentration_change: 0.07,
            direction: ShiftDirection::Decreased,
            from: 0.6,
            to: 0.53,
        };
        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("\"direction\":\"decreased\""));
        let back: SignalDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(back, details);
    }
}
