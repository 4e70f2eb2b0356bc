//! Domain types for holdings analytics.
//!
//! - [`Holding`]: A single 13F information-table row
//! - [`MatchingKey`]: Identity of a position across filings
//! - [`FilingMeta`] / [`FilingSnapshot`]: Filing metadata and rows
//! - [`DiffConfig`] / [`SignalConfig`]: Configuration for the analytics

mod config;
mod filing;
mod holding;
mod key;

pub use config::{DiffConfig, SignalConfig, StarterThresholds};
pub use filing::{FilingMeta, FilingSnapshot};
pub use holding::{
    Holding, HoldingBuilder, InvestmentDiscretion, PutCall, SharesType, VotingAuthority,
};
pub use key::MatchingKey;
