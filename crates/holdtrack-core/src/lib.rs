//! # Holdtrack Core
//!
//! Quarter-over-quarter position diffs and multi-quarter thesis signals for
//! 13F institutional holdings.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Diffs and signals are computed from explicit inputs, no I/O
//! - **Deterministic**: Identical input reproduces identical output, including tie order
//! - **Injected policy**: Starter thresholds, signal thresholds and theme rules are configuration
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Features
//!
//! - **Position Diffs**: NEW / EXIT / INCREASE / DECREASE / UNCHANGED per matching key
//! - **Ranked Moves**: Top adds and cuts by value, growth rate, and portfolio impact
//! - **Starters**: New small positions and starters that are scaling up
//! - **Diagnostics**: Top-5/top-10 concentration, Herfindahl index, gross flows
//! - **Signals**: Accumulation, build-then-trim, probes, concentration shifts, themes
//! - **Filing Sources**: Trait seam for stored filings plus an in-memory adapter
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use holdtrack_core::prelude::*;
//!
//! // Filings ordered most-recent-first
//! let diffs = compute_all_diffs(&filings, &DiffConfig::default());
//!
//! let latest = &diffs[0];
//! for pos in &latest.top_adds_by_value {
//!     println!("{} +${}", pos.issuer_name, pos.delta_value_usd);
//! }
//!
//! for signal in detect_signals(&diffs) {
//!     println!("[{}] {}", signal.strength, signal.description);
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`diff`] - Position matching, ranking, diagnostics, diff cache
//! - [`signals`] - Multi-quarter pattern detection
//! - [`themes`] - Keyword theme rules and clustering
//! - [`source`] - Filing source trait and in-memory adapter
//! - [`types`] - Holdings, filings, configuration
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel diffing of long filing histories

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod diff;
pub mod error;
pub mod parallel;
pub mod signals;
pub mod source;
pub mod themes;
pub mod types;

pub use error::{HoldtrackError, HoldtrackResult};

pub use types::{
    DiffConfig, FilingMeta, FilingSnapshot, Holding, HoldingBuilder, InvestmentDiscretion,
    MatchingKey, PutCall, SharesType, SignalConfig, StarterThresholds, VotingAuthority,
};

pub use diff::{
    compute_all_diffs, compute_opening_diff, compute_quarter_diff, ChangeType, Concentration,
    DiffCache, DiffKey, PositionDiff, QuarterDiff, RankedMoves,
};

pub use signals::{
    build_histories, detect_signals, detect_starter_to_scale, PositionHistory, QuarterState,
    ScaledPosition, ShiftDirection, Signal, SignalDetails, SignalDetector, SignalType, Strength,
};

pub use themes::{
    cluster_holdings, summarize_clusters, Classify, ClusterSummary, ThemeCluster, ThemeRule,
    ThemeRules, ThemedHolding, UNCATEGORIZED,
};

pub use source::{
    compute_fund_diffs, load_fund_history, select_latest_per_period, FilingSource,
    InMemoryFilingSource,
};

pub use parallel::map_adjacent_pairs;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use holdtrack_core::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{HoldtrackError, HoldtrackResult};

    // Inputs
    pub use crate::types::{
        FilingMeta, FilingSnapshot, Holding, HoldingBuilder, MatchingKey, PutCall,
    };

    // Config types
    pub use crate::types::{DiffConfig, SignalConfig, StarterThresholds};

    // Diffs
    pub use crate::diff::{
        compute_all_diffs, compute_opening_diff, compute_quarter_diff, ChangeType, DiffCache,
        PositionDiff, QuarterDiff,
    };

    // Signals
    pub use crate::signals::{
        detect_signals, detect_starter_to_scale, ScaledPosition, Signal, SignalDetector,
        SignalType, Strength,
    };

    // Themes
    pub use crate::themes::{summarize_clusters, Classify, ThemeRules, ThemedHolding};

    // Filing sources
    pub use crate::source::{compute_fund_diffs, FilingSource, InMemoryFilingSource};

    pub use chrono::NaiveDate;
}
