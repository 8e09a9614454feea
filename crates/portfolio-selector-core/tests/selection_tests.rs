use portfolio_selector_core::scenarios::{Scenario, ScenarioModel};
use portfolio_selector_core::selection::{PortfolioSelector, SelectionPolicy};
use portfolio_selector_core::stats::StatsEngine;
use portfolio_selector_core::{PortfolioError, RawObservation};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// End-to-end: observations -> summaries -> portfolio
// ===========================================================================

fn row(code: &str, price: Decimal, value: Decimal, dividend: Decimal) -> RawObservation {
    RawObservation::new(code, price, value, dividend)
}

/// Four assets with effective returns 0.10, 0.20, 0.30 and 0.05, so expected
/// returns keep the same ranking under any positive weighted multiplier.
fn four_asset_batch() -> Vec<RawObservation> {
    vec![
        row("aaa3", dec!(100), dec!(90), dec!(0)),
        row("bbb3", dec!(50), dec!(55), dec!(0)),
        row("ccc3", dec!(20), dec!(25), dec!(0)),
        row("ddd3", dec!(40), dec!(40), dec!(1)),
        row("aaa3", dec!(105), dec!(95), dec!(2)),
        row("bbb3", dec!(58), dec!(57), dec!(2)),
        row("ccc3", dec!(24), dec!(26), dec!(2)),
        row("ddd3", dec!(41), dec!(42), dec!(0)),
        row("aaa3", dec!(108), dec!(99), dec!(0)),
        row("bbb3", dec!(59), dec!(56), dec!(-1)),
        row("ccc3", dec!(23), dec!(27), dec!(1)),
        row("ddd3", dec!(41), dec!(41), dec!(0)),
    ]
}

fn selector() -> PortfolioSelector {
    let summaries = StatsEngine::default().summarize(&four_asset_batch()).unwrap();
    PortfolioSelector::new(summaries)
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

#[test]
fn test_summaries_follow_first_seen_order() {
    let s = selector();
    let codes: Vec<&str> = s.summaries().iter().map(|a| a.asset.as_str()).collect();
    assert_eq!(codes, vec!["AAA3", "BBB3", "CCC3", "DDD3"]);
}

#[test]
fn test_effective_returns() {
    let s = selector();
    let effective: Vec<Decimal> = s.summaries().iter().map(|a| a.effective_return).collect();
    assert_eq!(effective, vec![dec!(0.1), dec!(0.2), dec!(0.3), dec!(0.05)]);
}

#[test]
fn test_expected_returns_use_default_scenarios() {
    let s = selector();
    let expected: Vec<Decimal> = s.summaries().iter().map(|a| a.expected_return).collect();
    assert_eq!(
        expected,
        vec![dec!(0.067), dec!(0.134), dec!(0.201), dec!(0.0335)]
    );
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

#[test]
fn test_brute_force_end_to_end() {
    let selection = selector().select_brute_force(2).unwrap();
    assert_eq!(selection.codes(), vec!["BBB3", "CCC3"]);
    assert_eq!(selection.total_effective_return, dec!(0.5));
}

#[test]
fn test_greedy_agrees_when_rankings_agree() {
    let s = selector();
    for size in 1..=4 {
        assert_eq!(
            s.select_brute_force(size).unwrap().codes(),
            s.select_greedy(size).unwrap().codes()
        );
    }
}

#[test]
fn test_negative_multipliers_split_the_policies() {
    // a model whose weighted multiplier is negative reverses the expected
    // ranking while effective returns stay put
    let model = ScenarioModel::new(vec![
        Scenario::new("crash", dec!(0.5), dec!(-2)),
        Scenario::new("flat", dec!(0.5), dec!(0)),
    ])
    .unwrap();
    let summaries = StatsEngine::new(model).summarize(&four_asset_batch()).unwrap();
    let s = PortfolioSelector::new(summaries);

    assert_eq!(s.select_brute_force(2).unwrap().codes(), vec!["AAA3", "DDD3"]);
    assert_eq!(s.select_greedy(2).unwrap().codes(), vec!["BBB3", "CCC3"]);
}

#[test]
fn test_every_policy_through_dispatch() {
    let s = selector();
    let mut rng = StdRng::seed_from_u64(7);
    for policy in SelectionPolicy::ALL {
        let selection = s.select(policy, 3, &mut rng).unwrap();
        assert_eq!(selection.policy, policy);
        assert_eq!(selection.assets.len(), 3);
    }
}

#[test]
fn test_policy_identifiers_parse() {
    let parsed: Vec<SelectionPolicy> = ["random", "brute_force", "greedy"]
        .iter()
        .map(|id| id.parse().unwrap())
        .collect();
    assert_eq!(parsed, SelectionPolicy::ALL.to_vec());
}

// ---------------------------------------------------------------------------
// Failures surface to the caller
// ---------------------------------------------------------------------------

#[test]
fn test_single_observation_fails_loudly() {
    let mut batch = four_asset_batch();
    batch.push(row("eee3", dec!(10), dec!(10), dec!(0)));
    assert!(matches!(
        StatsEngine::default().summarize(&batch),
        Err(PortfolioError::InsufficientData { available: 1, .. })
    ));
}

#[test]
fn test_out_of_range_sizes() {
    let s = selector();
    assert!(matches!(
        s.select_greedy(0),
        Err(PortfolioError::InvalidPortfolioSize { .. })
    ));
    assert!(matches!(
        s.select_brute_force(5),
        Err(PortfolioError::InvalidPortfolioSize { .. })
    ));
}
