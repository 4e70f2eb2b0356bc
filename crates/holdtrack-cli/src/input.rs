//! Fund history files.
//!
//! A history file is one JSON document per fund:
//!
//! ```json
//! {
//!   "fund_id": "0001067983",
//!   "fund_name": "BERKSHIRE HATHAWAY INC",
//!   "filings": [
//!     {
//!       "filing_id": "0000950123-24-011775",
//!       "period": "2024-09-30",
//!       "filed_on": "2024-11-14",
//!       "holdings": [
//!         { "issuer_name": "APPLE INC", "title_of_class": "COM",
//!           "cusip": "037833100", "value_usd": 69900000000 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use holdtrack_core::{
    load_fund_history, FilingMeta, FilingSnapshot, Holding, InMemoryFilingSource,
};
use serde::Deserialize;

use crate::cli::HistoryArgs;
use crate::error::{CliError, CliResult};

/// One fund and its filings, in any order.
#[derive(Debug, Clone, Deserialize)]
pub struct FundFile {
    /// Filer CIK.
    pub fund_id: String,

    /// Filer name.
    #[serde(default)]
    pub fund_name: Option<String>,

    /// Filings, originals and amendments.
    #[serde(default)]
    pub filings: Vec<FilingRecord>,
}

/// One filing inside a history file.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingRecord {
    /// Accession number.
    pub filing_id: String,

    /// Period of report.
    pub period: NaiveDate,

    /// Acceptance date.
    #[serde(default)]
    pub filed_on: Option<NaiveDate>,

    /// True for `13F-HR/A` filings.
    #[serde(default)]
    pub is_amendment: bool,

    /// Information-table rows.
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl FundFile {
    /// Reads a history file from disk.
    pub fn read(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|reason| CliError::InvalidInput {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parses and validates a history document.
    pub fn parse(content: &str) -> Result<Self, String> {
        let file: Self = serde_json::from_str(content).map_err(|e| e.to_string())?;

        for filing in &file.filings {
            for holding in &filing.holdings {
                holding
                    .validate()
                    .map_err(|e| format!("filing {}: {e}", filing.filing_id))?;
            }
        }
        Ok(file)
    }

    /// Converts the records into snapshots tagged with this fund.
    pub fn into_snapshots(self) -> Vec<FilingSnapshot> {
        let Self {
            fund_id,
            fund_name,
            filings,
        } = self;

        filings
            .into_iter()
            .map(|record| {
                let mut meta = FilingMeta::new(record.filing_id, fund_id.clone(), record.period);
                if let Some(name) = &fund_name {
                    meta = meta.with_fund_name(name.clone());
                }
                if let Some(filed_on) = record.filed_on {
                    meta = meta.with_filed_on(filed_on);
                }
                if record.is_amendment {
                    meta = meta.amended();
                }
                FilingSnapshot::new(meta, record.holdings)
            })
            .collect()
    }
}

/// Loads the selected filing history, newest period first.
pub fn load_history(args: &HistoryArgs) -> CliResult<Vec<FilingSnapshot>> {
    let file = FundFile::read(&args.input)?;
    let fund_id = file.fund_id.clone();
    let source = InMemoryFilingSource::from_snapshots(file.into_snapshots());

    if source.filing_count() == 0 {
        return Err(CliError::NoFilings(fund_id));
    }

    let history = load_fund_history(&source, &fund_id, args.periods, args.original_only)?;
    if history.is_empty() {
        return Err(CliError::NoFilings(fund_id));
    }

    tracing::info!(
        fund_id = %fund_id,
        filings = history.len(),
        "Loaded filing history"
    );
    Ok(history)
}
