//! Configuration for diff computation and signal detection.

use crate::error::{HoldtrackError, HoldtrackResult};
use serde::{Deserialize, Serialize};

/// Thresholds that flag a position as a starter.
///
/// A position is a starter when its current value is below
/// `value_threshold`, or its current weight lies within
/// `[weight_min, weight_max]` (both bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarterThresholds {
    /// Lower weight bound (as decimal, 0.0001 = 0.01%).
    pub weight_min: f64,

    /// Upper weight bound (as decimal, 0.0025 = 0.25%).
    pub weight_max: f64,

    /// Value threshold in whole dollars (strict less-than).
    pub value_threshold: i64,
}

impl Default for StarterThresholds {
    fn default() -> Self {
        Self {
            weight_min: 0.0001,
            weight_max: 0.0025,
            value_threshold: 5_000_000,
        }
    }
}

impl StarterThresholds {
    /// Returns true if the current-side value or weight qualifies as a starter.
    #[must_use]
    pub fn is_starter(&self, now_weight: Option<f64>, now_value: Option<i64>) -> bool {
        if now_value.is_some_and(|v| v < self.value_threshold) {
            return true;
        }
        now_weight.is_some_and(|w| self.weight_min <= w && w <= self.weight_max)
    }

    /// Validates the thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is negative or not finite, or if
    /// `weight_min` exceeds `weight_max`.
    pub fn validate(&self) -> HoldtrackResult<()> {
        if !self.weight_min.is_finite() || self.weight_min < 0.0 {
            return Err(HoldtrackError::invalid_config(
                "starter.weight_min",
                "must be a non-negative number",
            ));
        }
        if !self.weight_max.is_finite() || self.weight_max < 0.0 {
            return Err(HoldtrackError::invalid_config(
                "starter.weight_max",
                "must be a non-negative number",
            ));
        }
        if self.weight_min > self.weight_max {
            return Err(HoldtrackError::invalid_config(
                "starter.weight_min",
                "must not exceed weight_max",
            ));
        }
        if self.value_threshold < 0 {
            return Err(HoldtrackError::invalid_config(
                "starter.value_threshold",
                "cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Configuration for quarter-over-quarter diff computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Starter thresholds.
    pub starter: StarterThresholds,

    /// Length of each ranked list.
    pub top_n: usize,

    /// Growth rate at which an increased starter counts as scaling (1.0 = 100%).
    pub scaling_growth_min: f64,

    /// Portfolio impact at which an increased starter counts as scaling.
    pub scaling_impact_min: f64,

    /// Enable parallel diffing of filing pairs (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum number of filing pairs to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            starter: StarterThresholds::default(),
            top_n: 10,
            scaling_growth_min: 1.0,
            scaling_impact_min: 0.0005,
            parallel: true,
            parallel_threshold: 8,
        }
    }
}

impl DiffConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the starter thresholds.
    #[must_use]
    pub fn with_starter(mut self, starter: StarterThresholds) -> Self {
        self.starter = starter;
        self
    }

    /// Sets the ranked list length.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid starter thresholds, a zero `top_n`, or
    /// negative scaling thresholds.
    pub fn validate(&self) -> HoldtrackResult<()> {
        self.starter.validate()?;
        if self.top_n == 0 {
            return Err(HoldtrackError::invalid_config("top_n", "must be at least 1"));
        }
        if self.scaling_growth_min.is_nan() || self.scaling_growth_min < 0.0 {
            return Err(HoldtrackError::invalid_config(
                "scaling_growth_min",
                "must be a non-negative number",
            ));
        }
        if self.scaling_impact_min.is_nan() || self.scaling_impact_min < 0.0 {
            return Err(HoldtrackError::invalid_config(
                "scaling_impact_min",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Thresholds for the multi-quarter signal detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Consecutive increases needed for an accumulator signal.
    pub accumulator_min_run: usize,

    /// Consecutive increases that make an accumulator signal strong.
    pub accumulator_strong_run: usize,

    /// Consecutive increases that must precede a trim.
    pub build_min_run: usize,

    /// Entries after a NEW within which an EXIT marks a probe.
    pub probe_window: usize,

    /// Absolute top-5 concentration change that triggers a shift signal.
    pub concentration_shift_min: f64,

    /// Change at which a concentration shift is strong.
    pub concentration_shift_strong: f64,

    /// New starters in one theme needed for a theme signal.
    pub theme_min_members: usize,

    /// Members at which a theme signal is strong.
    pub theme_strong_members: usize,

    /// Current weight above which a former starter counts as scaled.
    pub scale_weight_min: f64,

    /// Current value above which a former starter counts as scaled.
    pub scale_value_min: i64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            accumulator_min_run: 3,
            accumulator_strong_run: 4,
            build_min_run: 2,
            probe_window: 2,
            concentration_shift_min: 0.05,
            concentration_shift_strong: 0.10,
            theme_min_members: 3,
            theme_strong_members: 5,
            scale_weight_min: 0.005,
            scale_value_min: 20_000_000,
        }
    }
}

impl SignalConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a run length or member count is zero, or if a
    /// strong threshold is below its trigger threshold.
    pub fn validate(&self) -> HoldtrackResult<()> {
        if self.accumulator_min_run == 0 {
            return Err(HoldtrackError::invalid_config(
                "accumulator_min_run",
                "must be at least 1",
            ));
        }
        if self.accumulator_strong_run < self.accumulator_min_run {
            return Err(HoldtrackError::invalid_config(
                "accumulator_strong_run",
                "must not be below accumulator_min_run",
            ));
        }
        if self.build_min_run == 0 {
            return Err(HoldtrackError::invalid_config("build_min_run", "must be at least 1"));
        }
        if self.probe_window == 0 {
            return Err(HoldtrackError::invalid_config("probe_window", "must be at least 1"));
        }
        if self.concentration_shift_min.is_nan()
            || self.concentration_shift_min < 0.0
            || self.concentration_shift_strong < self.concentration_shift_min
        {
            return Err(HoldtrackError::invalid_config(
                "concentration_shift_strong",
                "must not be below concentration_shift_min",
            ));
        }
        if self.theme_min_members == 0 {
            return Err(HoldtrackError::invalid_config(
                "theme_min_members",
                "must be at least 1",
            ));
        }
        if self.theme_strong_members < self.theme_min_members {
            return Err(HoldtrackError::invalid_config(
                "theme_strong_members",
                "must not be below theme_min_members",
            ));
        }
        Ok(())
    }
}
