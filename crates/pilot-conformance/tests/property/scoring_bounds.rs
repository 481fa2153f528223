//! Property tests: scoring functions stay inside their documented ranges.

use pilot_scoring::{ScoringEngine, PRIORITY_WEIGHTS};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_ice_input() -> impl Strategy<Value = f64> {
    1.0f64..=10.0
}

fn arb_percent() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// ICE is the arithmetic mean and stays in [1, 10].
    #[test]
    fn ice_is_bounded_mean(
        impact in arb_ice_input(),
        confidence in arb_ice_input(),
        ease in arb_ice_input(),
    ) {
        let ice = ScoringEngine::compute_ice(impact, confidence, ease);
        prop_assert!((1.0..=10.0).contains(&ice.score));
        prop_assert!((ice.score - (impact + confidence + ease) / 3.0).abs() < 1e-12);
    }

    /// RICE never fails and is never negative for non-negative inputs.
    #[test]
    fn rice_is_non_negative(
        reach in 0.0f64..1e6,
        impact in 0.0f64..3.0,
        confidence in arb_percent(),
        effort in -10.0f64..100.0,
    ) {
        let rice = ScoringEngine::compute_rice(reach, impact, confidence, effort);
        prop_assert!(rice.score >= 0.0);
        if effort <= 0.0 {
            prop_assert_eq!(rice.score, 0.0);
        }
    }

    /// Priority stays in [0, 100] and is linear in each input.
    #[test]
    fn priority_is_bounded_and_linear(
        fit in arb_percent(),
        roi in arb_percent(),
        risk in arb_percent(),
        resources in arb_percent(),
        delta in 0.0f64..10.0,
    ) {
        let base = ScoringEngine::compute_priority(fit, roi, risk, resources).score;
        prop_assert!((-1e-9..=100.0 + 1e-9).contains(&base));

        let bumped = ScoringEngine::compute_priority(fit + delta, roi, risk, resources).score;
        prop_assert!((bumped - base - PRIORITY_WEIGHTS[0] * delta).abs() < 1e-9);

        let riskier = ScoringEngine::compute_priority(fit, roi, risk + delta, resources).score;
        prop_assert!((base - riskier - PRIORITY_WEIGHTS[2] * delta).abs() < 1e-9);
    }
}

#[test]
fn priority_weights_sum_to_one() {
    let sum: f64 = PRIORITY_WEIGHTS.iter().sum();
    assert!((sum - 1.0).abs() < 1e-12);
    let best = ScoringEngine::compute_priority(100.0, 100.0, 0.0, 100.0);
    assert!((best.score - 100.0).abs() < 1e-9);
}

#[test]
fn rice_with_zero_effort_is_zero() {
    assert_eq!(ScoringEngine::compute_rice(100.0, 1.0, 50.0, 0.0).score, 0.0);
}

#[test]
fn ice_example() {
    assert_eq!(ScoringEngine::compute_ice(8.0, 6.0, 4.0).score, 6.0);
}
