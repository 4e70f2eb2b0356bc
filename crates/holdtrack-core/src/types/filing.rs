//! Filing metadata and snapshots.

use super::Holding;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lightweight metadata for one 13F filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingMeta {
    /// Accession number.
    pub filing_id: String,

    /// Filer CIK.
    pub fund_id: String,

    /// Filer name from the cover page.
    #[serde(default)]
    pub fund_name: Option<String>,

    /// Period of report (quarter end).
    pub period: NaiveDate,

    /// Date the filing was accepted.
    #[serde(default)]
    pub filed_on: Option<NaiveDate>,

    /// Form type, `13F-HR` or `13F-HR/A`.
    #[serde(default = "default_form_type")]
    pub form_type: String,

    /// True for amendments.
    #[serde(default)]
    pub is_amendment: bool,
}

fn default_form_type() -> String {
    "13F-HR".to_string()
}

impl FilingMeta {
    /// Creates metadata for an original (non-amended) filing.
    #[must_use]
    pub fn new(filing_id: impl Into<String>, fund_id: impl Into<String>, period: NaiveDate) -> Self {
        Self {
            filing_id: filing_id.into(),
            fund_id: fund_id.into(),
            fund_name: None,
            period,
            filed_on: None,
            form_type: default_form_type(),
            is_amendment: false,
        }
    }

    /// Marks the filing as an amendment.
    #[must_use]
    pub fn amended(mut self) -> Self {
        self.form_type = "13F-HR/A".to_string();
        self.is_amendment = true;
        self
    }

    /// Sets the filer name.
    #[must_use]
    pub fn with_fund_name(mut self, name: impl Into<String>) -> Self {
        self.fund_name = Some(name.into());
        self
    }

    /// Sets the filing date.
    #[must_use]
    pub fn with_filed_on(mut self, filed_on: NaiveDate) -> Self {
        self.filed_on = Some(filed_on);
        self
    }
}

/// A filing together with its holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingSnapshot {
    /// Filing metadata.
    #[serde(flatten)]
    pub meta: FilingMeta,

    /// Holdings in filing order.
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl FilingSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(meta: FilingMeta, holdings: Vec<Holding>) -> Self {
        Self { meta, holdings }
    }

    /// Period of report.
    #[must_use]
    pub fn period(&self) -> NaiveDate {
        self.meta.period
    }

    /// Sum of holding values, recomputed from the rows.
    #[must_use]
    pub fn total_value(&self) -> i64 {
        self.holdings.iter().map(|h| h.value_usd).sum()
    }

    /// Number of rows.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.holdings.len()
    }
}
