//! Multi-quarter pattern detection over a fund's diff history.

use super::history::{build_histories, PositionHistory, QuarterState};
use super::scale::{growth_from_start, ScaledPosition};
use super::types::{ShiftDirection, Signal, SignalDetails, SignalType, Strength};
use crate::diff::{ChangeType, PositionDiff, QuarterDiff};
use crate::themes::{Classify, ThemeRules, UNCATEGORIZED};
use crate::types::{MatchingKey, SignalConfig};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Scans diff sequences for recurring position patterns.
///
/// Diffs are always supplied most-recent-first, as produced by
/// [`compute_all_diffs`](crate::diff::compute_all_diffs). Detection is pure:
/// identical input gives identical output.
///
/// # Example
///
/// ```rust,ignore
/// use holdtrack_core::prelude::*;
///
/// let diffs = compute_all_diffs(&filings, &DiffConfig::default());
/// let detector = SignalDetector::standard();
/// for signal in detector.detect(&diffs) {
///     println!("[{}] {}", signal.strength, signal.description);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SignalDetector<C = ThemeRules> {
    classifier: C,
    config: SignalConfig,
}

impl SignalDetector {
    /// Detector with the built-in themes and default thresholds.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ThemeRules::standard(), SignalConfig::default())
    }
}

impl Default for SignalDetector {
    fn default() -> Self {
        Self::standard()
    }
}

impl<C: Classify> SignalDetector<C> {
    /// Creates a detector with a theme classifier and thresholds.
    #[must_use]
    pub fn new(classifier: C, config: SignalConfig) -> Self {
        Self { classifier, config }
    }

    /// Replaces the thresholds.
    #[must_use]
    pub fn with_config(mut self, config: SignalConfig) -> Self {
        self.config = config;
        self
    }

    /// Detection thresholds.
    #[must_use]
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Theme classifier.
    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Runs every detector and returns signals strongest first.
    ///
    /// Within one strength, signals keep detector order: accumulators,
    /// build-then-trim, probes, concentration shift, themes.
    #[must_use]
    pub fn detect(&self, diffs: &[QuarterDiff]) -> Vec<Signal> {
        if diffs.is_empty() {
            return Vec::new();
        }

        let histories = build_histories(diffs);

        let accumulators: Vec<Signal> = histories.iter().filter_map(|h| self.accumulator(h)).collect();
        let builds: Vec<Signal> = histories
            .iter()
            .filter_map(|h| self.build_then_trim(h))
            .collect();
        let probes: Vec<Signal> = histories.iter().flat_map(|h| self.probes(h)).collect();
        let shift = self.concentration_shift(diffs);
        let themes = self.theme_emergence(diffs);

        tracing::debug!(
            diffs = diffs.len(),
            positions = histories.len(),
            accumulators = accumulators.len(),
            build_then_trim = builds.len(),
            probes = probes.len(),
            concentration_shift = shift.is_some(),
            themes = themes.len(),
            "Detected signals"
        );

        let mut signals: Vec<Signal> = accumulators
            .into_iter()
            .chain(builds)
            .chain(probes)
            .chain(shift)
            .chain(themes)
            .collect();
        signals.sort_by_key(|s| s.strength);
        signals
    }

    /// Former new starters whose latest state is material.
    ///
    /// A position counts once, from the oldest diff that flagged it as a new
    /// starter. It is reported when its latest weight or value exceeds the
    /// scale thresholds. Sorted by growth descending, unbounded growth first.
    /// Empty for fewer than two diffs.
    #[must_use]
    pub fn starter_to_scale(&self, diffs: &[QuarterDiff]) -> Vec<ScaledPosition> {
        let Some(latest) = diffs.first() else {
            return Vec::new();
        };
        if diffs.len() < 2 {
            return Vec::new();
        }

        let mut seen: HashSet<MatchingKey> = HashSet::new();
        let mut starters: Vec<(&PositionDiff, NaiveDate)> = Vec::new();
        for diff in diffs.iter().rev() {
            for pos in &diff.new_starters {
                if seen.insert(pos.key()) {
                    starters.push((pos, diff.period_to));
                }
            }
        }

        let current: HashMap<MatchingKey, &PositionDiff> =
            latest.held_positions().map(|p| (p.key(), p)).collect();

        let mut scaled: Vec<ScaledPosition> = starters
            .into_iter()
            .filter_map(|(start, start_period)| {
                let now = current.get(&start.key())?;
                let current_value = now.now_value_usd.unwrap_or(0);
                let current_weight = now.now_weight.unwrap_or(0.0);
                let material = current_weight > self.config.scale_weight_min
                    || current_value > self.config.scale_value_min;
                if !material {
                    return None;
                }

                let start_value = start.now_value_usd.unwrap_or(0);
                Some(ScaledPosition {
                    issuer_name: start.issuer_name.clone(),
                    cusip: start.cusip.clone(),
                    start_period,
                    start_value,
                    start_weight: start.now_weight.unwrap_or(0.0),
                    current_value,
                    current_weight,
                    growth_rate: growth_from_start(start_value, current_value),
                })
            })
            .collect();

        scaled.sort_by(|a, b| b.growth_rate.total_cmp(&a.growth_rate));

        tracing::debug!(scaled = scaled.len(), "Detected starters that scaled");
        scaled
    }

    fn accumulator(&self, history: &PositionHistory) -> Option<Signal> {
        let (start, run) = longest_increase_run(&history.states)?;
        if run < self.config.accumulator_min_run {
            return None;
        }

        let name = &history.issuer_name;
        Some(Signal {
            signal_type: SignalType::ConsistentAccumulator,
            description: format!("{name} increased {run} consecutive quarters"),
            holdings: vec![name.clone()],
            quarters: history.periods(start..start + run),
            strength: if run >= self.config.accumulator_strong_run {
                Strength::Strong
            } else {
                Strength::Moderate
            },
            details: SignalDetails::Accumulator {
                consecutive_increases: run,
            },
        })
    }

    /// First run of increases directly followed by a decrease. One signal per
    /// position at most.
    fn build_then_trim(&self, history: &PositionHistory) -> Option<Signal> {
        let min_run = self.config.build_min_run;
        if history.len() <= min_run {
            return None;
        }

        let mut build: Vec<NaiveDate> = Vec::new();
        for state in &history.states {
            match state.change_type {
                ChangeType::Increase => build.push(state.period),
                ChangeType::Decrease if build.len() >= min_run => {
                    let build_quarters = build.len();
                    build.push(state.period);

                    let name = &history.issuer_name;
                    return Some(Signal {
                        signal_type: SignalType::BuildThenTrim,
                        description: format!(
                            "{name} built for {build_quarters} quarters then trimmed"
                        ),
                        holdings: vec![name.clone()],
                        quarters: build,
                        strength: Strength::Moderate,
                        details: SignalDetails::BuildThenTrim { build_quarters },
                    });
                }
                _ => build.clear(),
            }
        }
        None
    }

    /// Every NEW closed by an EXIT within the probe window.
    fn probes(&self, history: &PositionHistory) -> Vec<Signal> {
        let states = &history.states;
        let window = self.config.probe_window;

        states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.change_type == ChangeType::New)
            .filter_map(|(i, opened)| {
                let end = (i + 1 + window).min(states.len());
                let j = (i + 1..end).find(|&j| states[j].change_type == ChangeType::Exit)?;
                let quarters_held = j - i + 1;

                let name = &history.issuer_name;
                Some(Signal {
                    signal_type: SignalType::OneQuarterProbe,
                    description: format!(
                        "{name} opened and closed within {quarters_held} quarters"
                    ),
                    holdings: vec![name.clone()],
                    quarters: vec![opened.period, states[j].period],
                    strength: Strength::Weak,
                    details: SignalDetails::Probe { quarters_held },
                })
            })
            .collect()
    }

    /// Compares top-5 concentration of the newest diff with the oldest.
    fn concentration_shift(&self, diffs: &[QuarterDiff]) -> Option<Signal> {
        if diffs.len() < 2 {
            return None;
        }
        let newest = diffs.first()?;
        let oldest = diffs.last()?;

        let from = oldest.concentration_top5;
        let to = newest.concentration_top5;
        let change = (to - from).abs();
        if change < self.config.concentration_shift_min {
            return None;
        }

        let direction = if to > from {
            ShiftDirection::Increased
        } else {
            ShiftDirection::Decreased
        };

        Some(Signal {
            signal_type: SignalType::ConcentrationShift,
            description: format!(
                "Top-5 concentration {direction} by {:.1}%",
                change * 100.0
            ),
            holdings: Vec::new(),
            quarters: vec![oldest.period_to, newest.period_to],
            strength: if change >= self.config.concentration_shift_strong {
                Strength::Strong
            } else {
                Strength::Moderate
            },
            details: SignalDetails::ConcentrationShift {
                concentration_change: change,
                direction,
                from,
                to,
            },
        })
    }

    /// Groups each quarter's new starters by theme, newest quarter first.
    fn theme_emergence(&self, diffs: &[QuarterDiff]) -> Vec<Signal> {
        let mut signals = Vec::new();

        for diff in diffs {
            let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
            for pos in &diff.new_starters {
                let Some(theme) = self.classifier.classify(&pos.issuer_name) else {
                    continue;
                };
                if theme == UNCATEGORIZED {
                    continue;
                }
                match groups.iter_mut().find(|(t, _)| *t == theme) {
                    Some((_, members)) => members.push(pos.issuer_name.clone()),
                    None => groups.push((theme, vec![pos.issuer_name.clone()])),
                }
            }

            for (theme, members) in groups {
                let count = members.len();
                if count < self.config.theme_min_members {
                    continue;
                }
                signals.push(Signal {
                    signal_type: SignalType::ThemeEmergence,
                    description: format!("{count} new starters in {theme}"),
                    holdings: members,
                    quarters: vec![diff.period_to],
                    strength: if count >= self.config.theme_strong_members {
                        Strength::Strong
                    } else {
                        Strength::Moderate
                    },
                    details: SignalDetails::Theme {
                        cluster: theme.to_string(),
                        count,
                    },
                });
            }
        }

        signals
    }
}

/// `(start, length)` of the longest run of increases; the later run wins a
/// tie.
fn longest_increase_run(states: &[QuarterState]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut run_start = 0;

    for (i, state) in states.iter().enumerate() {
        if state.change_type != ChangeType::Increase {
            run_start = i + 1;
            continue;
        }
        let run = i + 1 - run_start;
        let longer = match best {
            Some((_, best_run)) => run >= best_run,
            None => true,
        };
        if longer {
            best = Some((run_start, run));
        }
    }

    best
}

/// Detects signals with the built-in themes and default thresholds.
#[must_use]
pub fn detect_signals(diffs: &[QuarterDiff]) -> Vec<Signal> {
    SignalDetector::standard().detect(diffs)
}

/// Finds scaled starters with default thresholds.
#[must_use]
pub fn detect_starter_to_scale(diffs: &[QuarterDiff]) -> Vec<ScaledPosition> {
    SignalDetector::standard().starter_to_scale(diffs)
}
