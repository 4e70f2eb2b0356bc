//! Access to stored filings.
//!
//! The analytics core never fetches or persists filings itself. A
//! [`FilingSource`] hands it filing metadata and rows; this module loads a
//! fund's recent history through that seam and diffs it.

use crate::diff::{compute_all_diffs, QuarterDiff};
use crate::error::{HoldtrackError, HoldtrackResult};
use crate::types::{DiffConfig, FilingMeta, FilingSnapshot, Holding};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Read access to stored 13F filings.
pub trait FilingSource: Send + Sync {
    /// Returns the backend name for logging.
    fn source_name(&self) -> &'static str;

    /// Returns every filing of a fund, ordered by period descending.
    ///
    /// # Errors
    ///
    /// Returns [`HoldtrackError::FundNotFound`] for an unknown fund.
    fn filings_for_fund(&self, fund_id: &str) -> HoldtrackResult<Vec<FilingMeta>>;

    /// Returns the rows of one filing in filing order.
    ///
    /// # Errors
    ///
    /// Returns [`HoldtrackError::FilingNotFound`] for an unknown filing.
    fn holdings_for_filing(&self, filing_id: &str) -> HoldtrackResult<Vec<Holding>>;
}

/// In-memory filing source.
///
/// Thread-safe through `RwLock`s. Useful for tests and for histories loaded
/// from a file.
///
/// # Example
///
/// ```rust
/// use holdtrack_core::source::{FilingSource, InMemoryFilingSource};
///
/// let source = InMemoryFilingSource::new();
/// assert!(source.filings_for_fund("0001067983").is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryFilingSource {
    filings: RwLock<HashMap<String, Vec<FilingMeta>>>,
    holdings: RwLock<HashMap<String, Vec<Holding>>>,
}

impl InMemoryFilingSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding the given snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: impl IntoIterator<Item = FilingSnapshot>) -> Self {
        let source = Self::new();
        for snapshot in snapshots {
            source.insert(snapshot);
        }
        source
    }

    /// Stores a filing, replacing any filing with the same id.
    pub fn insert(&self, snapshot: FilingSnapshot) {
        let FilingSnapshot { meta, holdings } = snapshot;

        let mut filings = self.filings.write();
        let fund = filings.entry(meta.fund_id.clone()).or_default();
        fund.retain(|m| m.filing_id != meta.filing_id);
        self.holdings.write().insert(meta.filing_id.clone(), holdings);
        fund.push(meta);
        fund.sort_by(|a, b| b.period.cmp(&a.period));
    }

    /// Number of stored filings across all funds.
    #[must_use]
    pub fn filing_count(&self) -> usize {
        self.holdings.read().len()
    }

    /// Removes every filing.
    pub fn clear(&self) {
        self.filings.write().clear();
        self.holdings.write().clear();
    }
}

impl FilingSource for InMemoryFilingSource {
    fn source_name(&self) -> &'static str {
        "memory"
    }

    fn filings_for_fund(&self, fund_id: &str) -> HoldtrackResult<Vec<FilingMeta>> {
        self.filings
            .read()
            .get(fund_id)
            .cloned()
            .ok_or_else(|| HoldtrackError::fund_not_found(fund_id))
    }

    fn holdings_for_filing(&self, filing_id: &str) -> HoldtrackResult<Vec<Holding>> {
        self.holdings
            .read()
            .get(filing_id)
            .cloned()
            .ok_or_else(|| HoldtrackError::filing_not_found(filing_id))
    }
}

/// Keeps one filing per period, newest period first.
///
/// Within a period an amendment supersedes an original, and otherwise the
/// later `filed_on` wins. With `original_only`, amendments are dropped
/// before selection.
#[must_use]
pub fn select_latest_per_period(filings: &[FilingMeta], original_only: bool) -> Vec<FilingMeta> {
    let mut selected: Vec<FilingMeta> = Vec::new();

    for filing in filings {
        if original_only && filing.is_amendment {
            continue;
        }
        match selected.iter().position(|s| s.period == filing.period) {
            Some(i) => {
                if supersedes(filing, &selected[i]) {
                    selected[i] = filing.clone();
                }
            }
            None => selected.push(filing.clone()),
        }
    }

    selected.sort_by(|a, b| b.period.cmp(&a.period));
    selected
}

fn supersedes(candidate: &FilingMeta, existing: &FilingMeta) -> bool {
    match (candidate.is_amendment, existing.is_amendment) {
        (true, false) => true,
        (false, true) => false,
        _ => candidate.filed_on > existing.filed_on,
    }
}

/// Loads the latest `periods` filings of a fund, newest first.
///
/// # Errors
///
/// Propagates source failures, including unknown funds and filings.
pub fn load_fund_history<S: FilingSource + ?Sized>(
    source: &S,
    fund_id: &str,
    periods: usize,
    original_only: bool,
) -> HoldtrackResult<Vec<FilingSnapshot>> {
    let filings = source.filings_for_fund(fund_id)?;
    let selected = select_latest_per_period(&filings, original_only);

    tracing::debug!(
        source = source.source_name(),
        fund_id,
        available = filings.len(),
        selected = selected.len().min(periods),
        "Loading fund history"
    );

    selected
        .into_iter()
        .take(periods)
        .map(|meta| {
            let holdings = source.holdings_for_filing(&meta.filing_id)?;
            Ok(FilingSnapshot::new(meta, holdings))
        })
        .collect()
}

/// Loads a fund's latest `periods` filings and diffs every adjacent pair.
///
/// Diffs come back most-recent-first. Amendments supersede originals.
///
/// # Errors
///
/// Propagates source failures, including unknown funds and filings.
pub fn compute_fund_diffs<S: FilingSource + ?Sized>(
    source: &S,
    fund_id: &str,
    periods: usize,
    config: &DiffConfig,
) -> HoldtrackResult<Vec<QuarterDiff>> {
    let history = load_fund_history(source, fund_id, periods, false)?;
    Ok(compute_all_diffs(&history, config))
}
