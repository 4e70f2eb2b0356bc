//! Integration tests for holdtrack-core.
//!
//! These tests run multi-quarter filing histories end to end: filings in,
//! diffs and signals out.

use approx::assert_relative_eq;
use holdtrack_core::prelude::*;
use holdtrack_core::{ShiftDirection, SignalDetails, ThemeRule};

// =============================================================================
// TEST FIXTURES
// =============================================================================

const FUND: &str = "0001067983";

/// Quarter-end date for the n-th quarter starting at 2023 Q1.
fn quarter_end(n: u32) -> NaiveDate {
    let (month, day) = [(3, 31), (6, 30), (9, 30), (12, 31)][(n as usize - 1) % 4];
    NaiveDate::from_ymd_opt(2023 + ((n - 1) / 4) as i32, month, day).unwrap()
}

fn filing(n: u32, rows: &[(&str, &str, i64)]) -> FilingSnapshot {
    let holdings = rows
        .iter()
        .map(|(name, cusip, value)| {
            Holding::builder()
                .issuer_name(*name)
                .cusip(*cusip)
                .value_usd(*value)
                .shares(*value / 100)
                .build()
                .unwrap()
        })
        .collect();
    FilingSnapshot::new(
        FilingMeta::new(format!("0000950123-{n:02}"), FUND, quarter_end(n)).with_fund_name("TEST CAPITAL"),
        holdings,
    )
}

/// Builds filings from per-quarter rows given oldest first, returned newest first.
fn history(quarters: Vec<Vec<(&str, &str, i64)>>) -> Vec<FilingSnapshot> {
    let mut filings: Vec<_> = quarters
        .iter()
        .enumerate()
        .map(|(i, rows)| filing(i as u32 + 1, rows))
        .collect();
    filings.reverse();
    filings
}

fn diffs_for(filings: &[FilingSnapshot]) -> Vec<QuarterDiff> {
    compute_all_diffs(filings, &DiffConfig::sequential())
}

const BIG: (&str, &str) = ("BERKSHIRE HATHAWAY INC", "084670702");

// =============================================================================
// DIFF ENGINE
// =============================================================================

#[test]
fn test_latest_pair_diff() {
    let filings = history(vec![
        vec![("ALPHA", "AAAAAAAAA", 100), ("BETA", "BBBBBBBBB", 50)],
        vec![("ALPHA", "AAAAAAAAA", 150), ("GAMMA", "CCCCCCCCC", 30)],
    ]);
    let diffs = diffs_for(&filings);

    assert_eq!(diffs.len(), 1);
    let diff = &diffs[0];
    assert_eq!(diff.fund_id, FUND);
    assert_eq!(diff.fund_name.as_deref(), Some("TEST CAPITAL"));
    assert_eq!(diff.period_from, Some(quarter_end(1)));
    assert_eq!(diff.period_to, quarter_end(2));
    assert_eq!(diff.gross_adds_value, 80);
    assert_eq!(diff.gross_cuts_value, 50);
    assert_eq!(diff.position_count_prev, 2);
    assert_eq!(diff.position_count_now, 2);

    // Ranked adds: ALPHA (+50) then GAMMA (+30)
    let adds: Vec<_> = diff.top_adds_by_value.iter().map(|d| d.cusip.as_str()).collect();
    assert_eq!(adds, vec!["AAAAAAAAA", "CCCCCCCCC"]);
    assert_relative_eq!(
        diff.top_adds_by_portfolio_impact[0].portfolio_impact.unwrap(),
        50.0 / 150.0
    );
    assert_relative_eq!(diff.concentration_top5, 1.0);
    assert_relative_eq!(
        diff.herfindahl_index,
        (150.0f64 / 180.0).powi(2) + (30.0f64 / 180.0).powi(2)
    );
}

#[test]
fn test_diff_serializes_to_json() {
    let filings = history(vec![
        vec![("ALPHA", "AAAAAAAAA", 100)],
        vec![("ALPHA", "AAAAAAAAA", 90)],
    ]);
    let diff = &diffs_for(&filings)[0];

    let json = serde_json::to_value(diff).unwrap();
    assert_eq!(json["period_to"], "2023-06-30");
    assert_eq!(json["decreased"][0]["change_type"], "DECREASE");
    assert!(json["decreased"][0]["growth_rate"].is_number());
    assert!(json["new_positions"].as_array().unwrap().is_empty());
}

// =============================================================================
// SIGNALS
// =============================================================================

#[test]
fn test_accumulate_then_trim() {
    let x = ("ACME CORP", "AAAAAAAAA");
    let filings = history(vec![
        vec![(x.0, x.1, 100)],
        vec![(x.0, x.1, 200)],
        vec![(x.0, x.1, 300)],
        vec![(x.0, x.1, 400)],
        vec![(x.0, x.1, 350)],
    ]);
    let diffs = diffs_for(&filings);
    assert_eq!(diffs.len(), 4);

    let signals = detect_signals(&diffs);
    assert_eq!(signals.len(), 2);

    let accumulator = &signals[0];
    assert_eq!(accumulator.signal_type, SignalType::ConsistentAccumulator);
    assert_eq!(accumulator.strength, Strength::Moderate);
    assert_eq!(
        accumulator.details,
        SignalDetails::Accumulator {
            consecutive_increases: 3
        }
    );
    assert_eq!(accumulator.quarters, vec![quarter_end(2), quarter_end(3), quarter_end(4)]);
    assert_eq!(accumulator.holdings, vec!["ACME CORP"]);

    let trim = &signals[1];
    assert_eq!(trim.signal_type, SignalType::BuildThenTrim);
    assert_eq!(trim.strength, Strength::Moderate);
    assert_eq!(trim.quarters.len(), 4);
    assert_eq!(trim.quarters[3], quarter_end(5));
    assert_eq!(trim.description, "ACME CORP built for 3 quarters then trimmed");
}

#[test]
fn test_one_quarter_probe() {
    let filings = history(vec![
        vec![(BIG.0, BIG.1, 1_000)],
        vec![(BIG.0, BIG.1, 1_000), ("PROBE INC", "PPPPPPPPP", 10)],
        vec![(BIG.0, BIG.1, 1_000)],
    ]);
    let signals = detect_signals(&diffs_for(&filings));

    assert_eq!(signals.len(), 1);
    let probe = &signals[0];
    assert_eq!(probe.signal_type, SignalType::OneQuarterProbe);
    assert_eq!(probe.strength, Strength::Weak);
    assert_eq!(probe.details, SignalDetails::Probe { quarters_held: 2 });
    assert_eq!(probe.quarters, vec![quarter_end(2), quarter_end(3)]);
}

#[test]
fn test_theme_emergence() {
    let filings = history(vec![
        vec![(BIG.0, BIG.1, 100_000_000)],
        vec![
            (BIG.0, BIG.1, 100_000_000),
            ("NVIDIA CORP", "67066G104", 1_000_000),
            ("ADVANCED MICRO DEVICES INC", "007903107", 1_000_000),
            ("MICRON TECHNOLOGY INC", "595112103", 1_000_000),
            ("INTEL CORP", "458140100", 1_000_000),
            ("MARKEL GROUP INC", "570535104", 1_000_000),
        ],
    ]);
    let diffs = diffs_for(&filings);
    assert_eq!(diffs[0].new_starters.len(), 5);

    let signals = detect_signals(&diffs);
    assert_eq!(signals.len(), 1);
    let theme = &signals[0];
    assert_eq!(theme.signal_type, SignalType::ThemeEmergence);
    assert_eq!(theme.strength, Strength::Moderate);
    assert_eq!(theme.description, "4 new starters in AI/Semiconductors");
    assert_eq!(
        theme.details,
        SignalDetails::Theme {
            cluster: "AI/Semiconductors".to_string(),
            count: 4
        }
    );
    assert_eq!(theme.quarters, vec![quarter_end(2)]);
}

#[test]
fn test_theme_emergence_strong_band() {
    let filings = history(vec![
        vec![(BIG.0, BIG.1, 100_000_000)],
        vec![
            (BIG.0, BIG.1, 100_000_000),
            ("NVIDIA CORP", "67066G104", 1_000_000),
            ("ADVANCED MICRO DEVICES INC", "007903107", 1_000_000),
            ("MICRON TECHNOLOGY INC", "595112103", 1_000_000),
            ("INTEL CORP", "458140100", 1_000_000),
            ("BROADCOM INC", "11135F101", 1_000_000),
        ],
    ]);
    let signals = detect_signals(&diffs_for(&filings));

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].signal_type, SignalType::ThemeEmergence);
    assert_eq!(signals[0].strength, Strength::Strong);
    assert_eq!(signals[0].holdings.len(), 5);
}

#[test]
fn test_theme_emergence_newest_quarter_first() {
    let filings = history(vec![
        vec![(BIG.0, BIG.1, 100_000_000)],
        vec![
            (BIG.0, BIG.1, 100_000_000),
            ("NVIDIA CORP", "67066G104", 1_000_000),
            ("MICRON TECHNOLOGY INC", "595112103", 1_000_000),
            ("BROADCOM INC", "11135F101", 1_000_000),
        ],
        vec![
            (BIG.0, BIG.1, 100_000_000),
            ("NVIDIA CORP", "67066G104", 1_000_000),
            ("MICRON TECHNOLOGY INC", "595112103", 1_000_000),
            ("BROADCOM INC", "11135F101", 1_000_000),
            ("EXXON MOBIL CORP", "30231G102", 1_000_000),
            ("CHEVRON CORP", "166764100", 1_000_000),
            ("CONOCOPHILLIPS", "20825C104", 1_000_000),
        ],
    ]);
    let signals = detect_signals(&diffs_for(&filings));

    let themes: Vec<_> = signals
        .iter()
        .map(|s| (s.quarters.clone(), s.strength, s.details.clone()))
        .collect();
    assert_eq!(
        themes,
        vec![
            (
                vec![quarter_end(3)],
                Strength::Moderate,
                SignalDetails::Theme {
                    cluster: "Energy".to_string(),
                    count: 3
                }
            ),
            (
                vec![quarter_end(2)],
                Strength::Moderate,
                SignalDetails::Theme {
                    cluster: "AI/Semiconductors".to_string(),
                    count: 3
                }
            ),
        ]
    );
}

#[test]
fn test_theme_emergence_with_custom_rules() {
    let filings = history(vec![
        vec![(BIG.0, BIG.1, 100_000_000)],
        vec![
            (BIG.0, BIG.1, 100_000_000),
            ("ROCKET LAB USA", "773122106", 1_000_000),
            ("INTUITIVE MACHINES", "46125A100", 1_000_000),
        ],
    ]);
    let rules = ThemeRules::new(vec![ThemeRule::new("Space", ["rocket", "intuitive machines"])]);
    let config = SignalConfig {
        theme_min_members: 2,
        ..SignalConfig::default()
    };
    let signals = SignalDetector::new(rules, config).detect(&diffs_for(&filings));

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].holdings, vec!["ROCKET LAB USA", "INTUITIVE MACHINES"]);
}

#[test]
fn test_concentration_shift() {
    let names = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
    let cusips: Vec<String> = names.iter().map(|n| n.repeat(9)).collect();

    let even: Vec<(&str, &str, i64)> = names
        .iter()
        .zip(&cusips)
        .map(|(n, c)| (*n, c.as_str(), 100))
        .collect();
    let skewed: Vec<(&str, &str, i64)> = names
        .iter()
        .zip(&cusips)
        .enumerate()
        .map(|(i, (n, c))| (*n, c.as_str(), if i < 5 { 140 } else { 60 }))
        .collect();

    let diffs = diffs_for(&history(vec![even.clone(), even, skewed]));
    let signals = detect_signals(&diffs);

    assert_eq!(signals.len(), 1);
    let shift = &signals[0];
    assert_eq!(shift.signal_type, SignalType::ConcentrationShift);
    assert_eq!(shift.strength, Strength::Strong);
    assert_eq!(shift.quarters, vec![quarter_end(2), quarter_end(3)]);
    assert_eq!(shift.description, "Top-5 concentration increased by 20.0%");
    match &shift.details {
        SignalDetails::ConcentrationShift {
            concentration_change,
            direction,
            from,
            to,
        } => {
            assert_relative_eq!(*concentration_change, 0.2, epsilon = 1e-12);
            assert_eq!(*direction, ShiftDirection::Increased);
            assert_relative_eq!(*from, 0.5, epsilon = 1e-12);
            assert_relative_eq!(*to, 0.7, epsilon = 1e-12);
        }
        other => panic!("unexpected details: {other:?}"),
    }
}

/// Ten equal-sized rows with the first five at `top` and the rest at `rest`.
fn ten_rows(cusips: &[String], top: i64, rest: i64) -> Vec<(&str, &str, i64)> {
    cusips
        .iter()
        .enumerate()
        .map(|(i, c)| (&c[..1], c.as_str(), if i < 5 { top } else { rest }))
        .collect()
}

fn ten_cusips() -> Vec<String> {
    ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]
        .iter()
        .map(|n| n.repeat(9))
        .collect()
}

#[test]
fn test_concentration_shift_moderate_band() {
    let cusips = ten_cusips();
    let filings = history(vec![
        ten_rows(&cusips, 140, 60),
        ten_rows(&cusips, 140, 60),
        ten_rows(&cusips, 125, 75),
    ]);
    let signals = detect_signals(&diffs_for(&filings));

    assert_eq!(signals.len(), 1);
    let shift = &signals[0];
    assert_eq!(shift.signal_type, SignalType::ConcentrationShift);
    assert_eq!(shift.strength, Strength::Moderate);
    match &shift.details {
        SignalDetails::ConcentrationShift {
            concentration_change,
            direction,
            ..
        } => {
            assert_relative_eq!(*concentration_change, 0.075, epsilon = 1e-12);
            assert_eq!(*direction, ShiftDirection::Decreased);
        }
        other => panic!("unexpected details: {other:?}"),
    }
}

#[test]
fn test_concentration_shift_below_threshold() {
    let cusips = ten_cusips();
    let filings = history(vec![
        ten_rows(&cusips, 100, 100),
        ten_rows(&cusips, 100, 100),
        ten_rows(&cusips, 102, 98),
    ]);
    assert!(detect_signals(&diffs_for(&filings)).is_empty());
}

#[test]
fn test_concentration_shift_needs_two_diffs() {
    let cusips = ten_cusips();
    let filings = history(vec![ten_rows(&cusips, 100, 100), ten_rows(&cusips, 140, 60)]);
    let diffs = diffs_for(&filings);

    assert_eq!(diffs.len(), 1);
    assert!(detect_signals(&diffs).is_empty());
}

#[test]
fn test_signals_sorted_by_strength() {
    let x = ("ACME CORP", "AAAAAAAAA");
    let filings = history(vec![
        vec![(BIG.0, BIG.1, 1_000_000), (x.0, x.1, 100)],
        vec![(BIG.0, BIG.1, 1_000_000), (x.0, x.1, 200), ("PROBE INC", "PPPPPPPPP", 10)],
        vec![(BIG.0, BIG.1, 1_000_000), (x.0, x.1, 300)],
        vec![(BIG.0, BIG.1, 1_000_000), (x.0, x.1, 400)],
        vec![(BIG.0, BIG.1, 1_000_000), (x.0, x.1, 500)],
    ]);
    let signals = detect_signals(&diffs_for(&filings));

    let kinds: Vec<_> = signals.iter().map(|s| (s.signal_type, s.strength)).collect();
    assert_eq!(
        kinds,
        vec![
            (SignalType::ConsistentAccumulator, Strength::Strong),
            (SignalType::OneQuarterProbe, Strength::Weak),
        ]
    );
}

#[test]
fn test_starter_to_scale() {
    let filings = history(vec![
        vec![(BIG.0, BIG.1, 100_000_000)],
        vec![
            (BIG.0, BIG.1, 100_000_000),
            ("SPROUT INC", "SSSSSSSSS", 1_000_000),
            ("SEED CORP", "ZZZZZZZZZ", 0),
            ("STAYS SMALL", "TTTTTTTTT", 100_000),
        ],
        vec![
            (BIG.0, BIG.1, 100_000_000),
            ("SPROUT INC", "SSSSSSSSS", 30_000_000),
            ("SEED CORP", "ZZZZZZZZZ", 25_000_000),
            ("STAYS SMALL", "TTTTTTTTT", 200_000),
        ],
    ]);
    let diffs = diffs_for(&filings);
    let scaled = detect_starter_to_scale(&diffs);

    let names: Vec<_> = scaled.iter().map(|s| s.issuer_name.as_str()).collect();
    assert_eq!(names, vec!["SEED CORP", "SPROUT INC"]);

    assert!(scaled[0].is_unbounded());
    assert_eq!(scaled[1].start_period, quarter_end(2));
    assert_eq!(scaled[1].start_value, 1_000_000);
    assert_eq!(scaled[1].current_value, 30_000_000);
    assert_relative_eq!(scaled[1].growth_rate, 29.0);

    // A single diff is not enough history
    assert!(detect_starter_to_scale(&diffs[..1]).is_empty());
}

// =============================================================================
// FILING SOURCE AND CACHE
// =============================================================================

#[test]
fn test_source_pipeline_matches_direct_diffs() {
    let filings = history(vec![
        vec![("ALPHA", "AAAAAAAAA", 100)],
        vec![("ALPHA", "AAAAAAAAA", 200)],
        vec![("ALPHA", "AAAAAAAAA", 300)],
    ]);
    let source = InMemoryFilingSource::from_snapshots(filings.clone());

    let via_source = compute_fund_diffs(&source, FUND, 5, &DiffConfig::sequential()).unwrap();
    assert_eq!(via_source, diffs_for(&filings));

    let err = compute_fund_diffs(&source, "0000000000", 5, &DiffConfig::default()).unwrap_err();
    assert_eq!(err, HoldtrackError::fund_not_found("0000000000"));
}

#[test]
fn test_cache_matches_engine() {
    let filings = history(vec![
        vec![("ALPHA", "AAAAAAAAA", 100)],
        vec![("ALPHA", "AAAAAAAAA", 250)],
    ]);
    let cache = DiffCache::new(DiffConfig::sequential());

    let cached = cache.get_or_compute(&filings[1], &filings[0]);
    assert_eq!(*cached, diffs_for(&filings)[0]);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_parallel_history_is_deterministic() {
    let quarters: Vec<Vec<(&str, &str, i64)>> = (1..=16)
        .map(|q| {
            vec![
                ("ALPHA", "AAAAAAAAA", 100 * q),
                ("BETA", "BBBBBBBBB", 1_000 - 10 * q),
            ]
        })
        .collect();
    let filings = history(quarters);

    let sequential = compute_all_diffs(&filings, &DiffConfig::sequential());
    let parallel = compute_all_diffs(&filings, &DiffConfig::default().with_threshold(2));
    assert_eq!(sequential, parallel);
    assert_eq!(detect_signals(&sequential), detect_signals(&parallel));
}
