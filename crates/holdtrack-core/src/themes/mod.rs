//! Theme classification of issuer names.
//!
//! The ruleset is injected wherever it is used, so callers can swap the
//! built-in table for their own.

mod rules;
mod summary;

pub use rules::{Classify, ThemeRule, ThemeRules, UNCATEGORIZED};
pub use summary::{cluster_holdings, summarize_clusters, ClusterSummary, ThemeCluster, ThemedHolding};
