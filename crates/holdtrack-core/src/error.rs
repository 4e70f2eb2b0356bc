//! Error types for holdings analytics.
//!
//! The diff engine and signal detector never fail; these errors come from
//! holding construction, configuration validation, and filing sources.

use thiserror::Error;

/// Result type for holdtrack operations.
pub type HoldtrackResult<T> = Result<T, HoldtrackError>;

/// Errors that can occur while building inputs for the analytics core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoldtrackError {
    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Invalid holding data.
    #[error("Invalid holding '{cusip}': {reason}")]
    InvalidHolding {
        /// The security identifier of the holding.
        cusip: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration '{field}': {reason}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// The reason the value was rejected.
        reason: String,
    },

    /// Fund not known to the filing source.
    #[error("Fund not found: {fund_id}")]
    FundNotFound {
        /// The fund identifier (CIK).
        fund_id: String,
    },

    /// Filing not known to the filing source.
    #[error("Filing not found: {filing_id}")]
    FilingNotFound {
        /// The filing identifier (accession number).
        filing_id: String,
    },

    /// The filing source failed.
    #[error("Filing source error: {reason}")]
    Source {
        /// The underlying failure.
        reason: String,
    },
}

impl HoldtrackError {
    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(cusip: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            cusip: cusip.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a fund not found error.
    #[must_use]
    pub fn fund_not_found(fund_id: impl Into<String>) -> Self {
        Self::FundNotFound {
            fund_id: fund_id.into(),
        }
    }

    /// Create a filing not found error.
    #[must_use]
    pub fn filing_not_found(filing_id: impl Into<String>) -> Self {
        Self::FilingNotFound {
            filing_id: filing_id.into(),
        }
    }

    /// Create a filing source error.
    #[must_use]
    pub fn source(reason: impl Into<String>) -> Self {
        Self::Source {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HoldtrackError::missing_field("cusip");
        assert!(err.to_string().contains("cusip"));

        let err = HoldtrackError::invalid_holding("67066G104", "negative value");
        assert!(err.to_string().contains("67066G104"));
        assert!(err.to_string().contains("negative value"));

        let err = HoldtrackError::invalid_config("starter.weight_min", "exceeds weight_max");
        assert!(err.to_string().contains("starter.weight_min"));
    }

    #[test]
    fn test_error_clone() {
        let err = HoldtrackError::fund_not_found("0001067983");
        let cloned = err.clone();
        assert_eq!(err, cloned);
        assert_eq!(err.to_string(), "Fund not found: 0001067983");
    }
}
