//! Property-based tests for diff invariants.
//!
//! These tests verify properties that must hold for any holdings:
//! - Diffing a filing against itself changes nothing
//! - Disjoint filings produce only NEW and EXIT
//! - Concentration is ordered and bounded
//! - Herfindahl index is bounded below by 1/N
//! - Deltas and gross flows reconcile

use holdtrack_core::prelude::*;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn period(month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, 28).unwrap()
}

/// Holdings with unique CUSIPs drawn from `prefix`.
fn arb_holdings(prefix: char, max_len: usize) -> impl Strategy<Value = Vec<Holding>> {
    prop::collection::vec(0i64..50_000_000, 0..max_len).prop_map(move |values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                Holding::builder()
                    .issuer_name(format!("ISSUER {prefix}{i}"))
                    .cusip(format!("{prefix}{i:08}"))
                    .value_usd(value)
                    .shares(value / 20)
                    .build()
                    .unwrap()
            })
            .collect()
    })
}

fn snapshot(month: u32, holdings: Vec<Holding>) -> FilingSnapshot {
    FilingSnapshot::new(FilingMeta::new(format!("F{month}"), "0001", period(month)), holdings)
}

proptest! {
    /// A filing diffed against itself is entirely UNCHANGED.
    #[test]
    fn identity_diff_is_unchanged(holdings in arb_holdings('A', 40)) {
        let prior = snapshot(3, holdings.clone());
        let now = snapshot(6, holdings);
        let diff = compute_quarter_diff(&prior, &now, &DiffConfig::default());

        prop_assert_eq!(diff.position_count_now, diff.position_count_prev);
        prop_assert_eq!(diff.unchanged.len(), diff.position_count_now);
        prop_assert!(diff.positions().all(|p| p.change_type == ChangeType::Unchanged));
        prop_assert!(diff.positions().all(|p| p.delta_value_usd == 0));
        prop_assert_eq!(diff.gross_adds_value, 0);
        prop_assert_eq!(diff.gross_cuts_value, 0);
    }

    /// Filings with no shared key produce only NEW and EXIT.
    #[test]
    fn disjoint_diff_is_new_or_exit(
        before in arb_holdings('P', 30),
        after in arb_holdings('N', 30),
    ) {
        let prior = snapshot(3, before);
        let now = snapshot(6, after);
        let diff = compute_quarter_diff(&prior, &now, &DiffConfig::default());

        prop_assert!(diff.increased.is_empty());
        prop_assert!(diff.decreased.is_empty());
        prop_assert!(diff.unchanged.is_empty());
        prop_assert_eq!(diff.new_positions.len(), now.position_count());
        prop_assert_eq!(diff.sold_out.len(), prior.position_count());
    }

    /// 0 <= top5 <= top10 <= 1 whenever the current total is positive.
    #[test]
    fn concentration_is_ordered(holdings in arb_holdings('C', 60)) {
        let prior = snapshot(3, Vec::new());
        let now = snapshot(6, holdings);
        let diff = compute_quarter_diff(&prior, &now, &DiffConfig::default());

        if diff.total_portfolio_now > 0 {
            prop_assert!(diff.concentration_top5 >= 0.0);
            prop_assert!(diff.concentration_top5 <= diff.concentration_top10 + 1e-12);
            prop_assert!(diff.concentration_top10 <= 1.0 + 1e-9);
        } else {
            prop_assert_eq!(diff.concentration_top5, 0.0);
            prop_assert_eq!(diff.herfindahl_index, 0.0);
        }
    }

    /// HHI >= 1/N, with equality for equal weights.
    #[test]
    fn herfindahl_lower_bound(holdings in arb_holdings('H', 60)) {
        let n = holdings.iter().filter(|h| h.value_usd > 0).count();
        prop_assume!(n > 0);

        let now = snapshot(6, holdings);
        let diff = compute_opening_diff(&now, &DiffConfig::default());

        prop_assert!(diff.herfindahl_index + 1e-12 >= 1.0 / n as f64);
    }

    #[test]
    fn herfindahl_equal_weights(n in 1usize..50, value in 1i64..1_000_000) {
        let holdings: Vec<Holding> = (0..n)
            .map(|i| {
                Holding::builder()
                    .issuer_name(format!("EQUAL {i}"))
                    .cusip(format!("E{i:08}"))
                    .value_usd(value)
                    .build()
                    .unwrap()
            })
            .collect();
        let diff = compute_opening_diff(&snapshot(6, holdings), &DiffConfig::default());

        prop_assert!((diff.herfindahl_index - 1.0 / n as f64).abs() < 1e-9);
    }

    /// Net flow equals the change in portfolio totals.
    #[test]
    fn flows_reconcile_with_totals(
        before in arb_holdings('X', 30),
        after in arb_holdings('X', 30),
    ) {
        let prior = snapshot(3, before);
        let now = snapshot(6, after);
        let diff = compute_quarter_diff(&prior, &now, &DiffConfig::default());

        prop_assert_eq!(
            diff.net_flow(),
            diff.total_portfolio_now - diff.total_portfolio_prev
        );
        for pos in diff.positions() {
            prop_assert_eq!(
                pos.delta_value_usd,
                pos.now_value_usd.unwrap_or(0) - pos.prev_value_usd.unwrap_or(0)
            );
        }
    }

    /// Ranked lists never exceed top_n and stay sorted.
    #[test]
    fn ranked_lists_bounded_and_sorted(
        before in arb_holdings('R', 40),
        after in arb_holdings('R', 40),
        top_n in 1usize..15,
    ) {
        let config = DiffConfig::default().with_top_n(top_n);
        let diff = compute_quarter_diff(&snapshot(3, before), &snapshot(6, after), &config);

        prop_assert!(diff.top_adds_by_value.len() <= top_n);
        prop_assert!(diff.top_cuts_by_value.len() <= top_n);
        prop_assert!(diff
            .top_adds_by_value
            .windows(2)
            .all(|w| w[0].delta_value_usd >= w[1].delta_value_usd));
        prop_assert!(diff
            .top_adds_by_growth_rate
            .iter()
            .all(|p| p.change_type != ChangeType::New));
    }

    /// Signal detection never panics and is repeatable.
    #[test]
    fn signals_are_deterministic(
        q1 in arb_holdings('S', 12),
        q2 in arb_holdings('S', 12),
        q3 in arb_holdings('S', 12),
        q4 in arb_holdings('S', 12),
    ) {
        let filings = vec![snapshot(12, q4), snapshot(9, q3), snapshot(6, q2), snapshot(3, q1)];
        let diffs = compute_all_diffs(&filings, &DiffConfig::sequential());

        prop_assert_eq!(diffs.len(), 3);
        let first = detect_signals(&diffs);
        let second = detect_signals(&diffs);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.windows(2).all(|w| w[0].strength <= w[1].strength));
    }
}
