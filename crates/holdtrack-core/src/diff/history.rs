//! Diffs over a fund's full filing history.

use super::engine::{compute_quarter_diff, QuarterDiff};
use crate::parallel::map_adjacent_pairs;
use crate::types::{DiffConfig, FilingSnapshot};

/// Computes one diff per adjacent filing pair.
///
/// `filings` must be ordered most-recent-first; the returned diffs follow the
/// same order, so `diffs[0]` compares the two latest filings. Returns an
/// empty vector when fewer than two filings are supplied.
///
/// Pairs are independent and run on rayon when the `parallel` feature is
/// enabled and the pair count reaches `config.parallel_threshold`.
#[must_use]
pub fn compute_all_diffs(filings: &[FilingSnapshot], config: &DiffConfig) -> Vec<QuarterDiff> {
    let pairs = filings.len().saturating_sub(1);

    tracing::debug!(
        filings = filings.len(),
        pairs,
        parallel = config.should_parallelize(pairs),
        "Computing diff history"
    );

    map_adjacent_pairs(filings, config, |prior, now| {
        compute_quarter_diff(prior, now, config)
    })
}
