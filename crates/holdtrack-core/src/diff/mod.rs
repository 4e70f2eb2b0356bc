//! Quarter-over-quarter position diffs.
//!
//! - [`compute_quarter_diff`]: match two filings and classify every position
//! - [`compute_opening_diff`]: a fund's first filing, all `NEW`
//! - [`compute_all_diffs`]: every adjacent pair of a filing history
//! - [`DiffCache`]: shared, memoized diffs

mod cache;
mod concentration;
mod engine;
mod history;
mod position;
mod ranking;

pub use cache::{DiffCache, DiffKey};
pub use concentration::Concentration;
pub use engine::{compute_opening_diff, compute_quarter_diff, QuarterDiff};
pub use history::compute_all_diffs;
pub use position::{ChangeType, PositionDiff};
pub use ranking::RankedMoves;

pub(crate) use position::ratio;
