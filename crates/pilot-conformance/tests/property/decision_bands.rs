//! Property tests: tallies map to the decision band their exact score falls in.

use pilot_decision::{CriteriaTally, DecisionEngine};
use pilot_types::DecisionKind;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_side() -> impl Strategy<Value = (usize, usize)> {
    (0usize..20).prop_flat_map(|total| (0..=total, Just(total)))
}

fn arb_tally() -> impl Strategy<Value = CriteriaTally> {
    (arb_side(), arb_side()).prop_map(|((primary_met, primary_total), (secondary_met, secondary_total))| {
        CriteriaTally {
            primary_met,
            primary_total,
            secondary_met,
            secondary_total,
        }
    })
}

/// Score scaled by 100·pt·st, with the scale itself; empty sides count as 0/1.
fn scaled_score(tally: &CriteriaTally) -> (u64, u64) {
    let side = |met: usize, total: usize| {
        if total == 0 {
            (0u64, 1u64)
        } else {
            (met as u64, total as u64)
        }
    };
    let (pm, pt) = side(tally.primary_met, tally.primary_total);
    let (sm, st) = side(tally.secondary_met, tally.secondary_total);
    (70 * pm * st + 30 * sm * pt, pt * st)
}

fn expected_band(tally: &CriteriaTally) -> DecisionKind {
    let (score, scale) = scaled_score(tally);
    if score >= 70 * scale {
        DecisionKind::Persevere
    } else if score >= 40 * scale {
        DecisionKind::Iterate
    } else if score >= 20 * scale {
        DecisionKind::Pivot
    } else {
        DecisionKind::Terminate
    }
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Without lift, the recommended decision matches the band computed in
    /// integers.
    #[test]
    fn bands_follow_the_exact_score(tally in arb_tally()) {
        let report = DecisionEngine::default().evaluate_tally(tally, 0.0, Vec::new());
        prop_assert_eq!(report.decision, expected_band(&tally));
    }

    /// Feeding the reported float score back through `decide` agrees with the
    /// exact banding.
    #[test]
    fn float_scores_agree_with_exact_bands(tally in arb_tally()) {
        let engine = DecisionEngine::default();
        prop_assert_eq!(
            engine.decide(tally.success_score(), 0.0),
            engine.decide_tally(&tally, 0.0)
        );
    }

    /// Lift above the threshold only ever upgrades `persevere` to `scale`.
    #[test]
    fn lift_only_splits_the_top_band(tally in arb_tally(), lift in 0.21f64..5.0) {
        let engine = DecisionEngine::default();
        let expected = match expected_band(&tally) {
            DecisionKind::Persevere => DecisionKind::Scale,
            other => other,
        };
        prop_assert_eq!(engine.decide_tally(&tally, lift), expected);
    }
}
