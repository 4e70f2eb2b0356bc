//! Multi-quarter thesis signals.
//!
//! Signals are derived from a fund's diff history:
//!
//! - **Consistent accumulator**: several consecutive increases
//! - **Build then trim**: a run of increases followed by a decrease
//! - **One-quarter probe**: opened and closed within a short window
//! - **Concentration shift**: top-5 concentration moved materially
//! - **Theme emergence**: several new starters in one theme
//!
//! [`SignalDetector::starter_to_scale`] reports former starters that became
//! material positions.

mod detectors;
mod history;
mod scale;
mod types;

pub use detectors::{detect_signals, detect_starter_to_scale, SignalDetector};
pub use history::{build_histories, PositionHistory, QuarterState};
pub use scale::ScaledPosition;
pub use types::{ShiftDirection, Signal, SignalDetails, SignalType, Strength};
