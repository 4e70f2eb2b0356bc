//! Memoized diffs keyed by fund and period pair.

use super::engine::{compute_opening_diff, compute_quarter_diff, QuarterDiff};
use crate::types::{DiffConfig, FilingSnapshot};
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache key: `(fund_id, period_from, period_to)`.
pub type DiffKey = (String, Option<NaiveDate>, NaiveDate);

/// Thread-safe cache of computed diffs.
///
/// Diffs are immutable once built, so entries are shared as `Arc`s. The
/// cache is bound to one [`DiffConfig`]; diffs computed under a different
/// configuration need a separate cache.
///
/// # Example
///
/// ```rust,ignore
/// let cache = DiffCache::new(DiffConfig::default());
/// let diff = cache.get_or_compute(&q3, &q4);
/// assert!(Arc::ptr_eq(&diff, &cache.get_or_compute(&q3, &q4)));
/// ```
#[derive(Debug, Default)]
pub struct DiffCache {
    config: DiffConfig,
    entries: RwLock<HashMap<DiffKey, Arc<QuarterDiff>>>,
}

impl DiffCache {
    /// Creates an empty cache using `config` for every computation.
    #[must_use]
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Configuration used for cache misses.
    #[must_use]
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Returns the cached diff between two filings, computing it on a miss.
    pub fn get_or_compute(&self, prior: &FilingSnapshot, now: &FilingSnapshot) -> Arc<QuarterDiff> {
        let key = (now.meta.fund_id.clone(), Some(prior.period()), now.period());
        self.lookup_or_insert(key, || compute_quarter_diff(prior, now, &self.config))
    }

    /// Returns the cached opening diff for a fund's first filing.
    pub fn get_or_compute_opening(&self, now: &FilingSnapshot) -> Arc<QuarterDiff> {
        let key = (now.meta.fund_id.clone(), None, now.period());
        self.lookup_or_insert(key, || compute_opening_diff(now, &self.config))
    }

    /// Looks up a diff without computing.
    #[must_use]
    pub fn get(&self, key: &DiffKey) -> Option<Arc<QuarterDiff>> {
        self.entries.read().get(key).cloned()
    }

    /// Number of cached diffs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every cached diff for a fund.
    pub fn invalidate_fund(&self, fund_id: &str) {
        self.entries.write().retain(|(fund, _, _), _| fund != fund_id);
    }

    /// Drops every cached diff.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn lookup_or_insert<F>(&self, key: DiffKey, compute: F) -> Arc<QuarterDiff>
    where
        F: FnOnce() -> QuarterDiff,
    {
        if let Some(hit) = self.entries.read().get(&key) {
            tracing::trace!(fund_id = %key.0, period_to = %key.2, "Diff cache hit");
            return Arc::clone(hit);
        }

        tracing::trace!(fund_id = %key.0, period_to = %key.2, "Diff cache miss");
        let diff = Arc::new(compute());

        // Another thread may have filled the slot meanwhile; keep the first.
        Arc::clone(self.entries.write().entry(key).or_insert(diff))
    }
}
