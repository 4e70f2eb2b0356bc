//! Grouping holdings by theme.

use super::rules::Classify;
use crate::types::FilingSnapshot;
use serde::{Deserialize, Serialize};

/// A holding reduced to the fields theme grouping needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemedHolding {
    /// Issuer name.
    pub issuer_name: String,
    /// Reported value.
    pub value_usd: i64,
    /// Portfolio weight (as decimal).
    pub weight: f64,
}

impl ThemedHolding {
    /// Creates a row.
    #[must_use]
    pub fn new(issuer_name: impl Into<String>, value_usd: i64, weight: f64) -> Self {
        Self {
            issuer_name: issuer_name.into(),
            value_usd,
            weight,
        }
    }

    /// Rows for every holding of a filing, weighted by the filing total.
    ///
    /// Weights are 0.0 when the filing total is not positive.
    #[must_use]
    pub fn from_snapshot(snapshot: &FilingSnapshot) -> Vec<Self> {
        let total = snapshot.total_value();
        snapshot
            .holdings
            .iter()
            .map(|h| {
                let weight = crate::diff::ratio(h.value_usd, total).unwrap_or(0.0);
                Self::new(h.issuer_name.clone(), h.value_usd, weight)
            })
            .collect()
    }
}

/// Holdings assigned to one theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeCluster {
    /// Theme name.
    pub theme: String,
    /// Members, largest value first.
    pub holdings: Vec<ThemedHolding>,
}

/// Aggregate figures for one theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Theme name.
    pub theme: String,
    /// Sum of member values.
    pub total_value: i64,
    /// Sum of member weights.
    pub total_weight: f64,
    /// Number of members.
    pub count: usize,
}

/// Groups holdings by theme.
///
/// Clusters appear in the order their theme is first seen; members are
/// sorted by value descending. Unmatched names land in the uncategorized
/// cluster.
#[must_use]
pub fn cluster_holdings<C: Classify + ?Sized>(
    holdings: &[ThemedHolding],
    classifier: &C,
) -> Vec<ThemeCluster> {
    let mut clusters: Vec<ThemeCluster> = Vec::new();

    for holding in holdings {
        let theme = classifier.theme_of(&holding.issuer_name);
        match clusters.iter_mut().find(|c| c.theme == theme) {
            Some(cluster) => cluster.holdings.push(holding.clone()),
            None => clusters.push(ThemeCluster {
                theme: theme.to_string(),
                holdings: vec![holding.clone()],
            }),
        }
    }

    for cluster in &mut clusters {
        cluster.holdings.sort_by(|a, b| b.value_usd.cmp(&a.value_usd));
    }
    clusters
}

/// Summarizes holdings per theme, largest total value first.
#[must_use]
pub fn summarize_clusters<C: Classify + ?Sized>(
    holdings: &[ThemedHolding],
    classifier: &C,
) -> Vec<ClusterSummary> {
    let mut summaries: Vec<ClusterSummary> = cluster_holdings(holdings, classifier)
        .into_iter()
        .map(|cluster| ClusterSummary {
            total_value: cluster.holdings.iter().map(|h| h.value_usd).sum(),
            total_weight: cluster.holdings.iter().map(|h| h.weight).sum(),
            count: cluster.holdings.len(),
            theme: cluster.theme,
        })
        .collect();

    summaries.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    summaries
}
