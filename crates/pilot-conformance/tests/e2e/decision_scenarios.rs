//! E2E: success score to decision mapping.

use pilot_conformance::evidenced;
use pilot_decision::DecisionEngine;
use pilot_types::{DecisionKind, InitiativeStatus};

#[test]
fn full_primary_third_secondary_scores_point_eight() {
    let engine = DecisionEngine::default();

    let strong_lift = engine.evaluate(&evidenced(2, 2, 1, 3, 0.35));
    assert!((strong_lift.success_score - 0.80).abs() < 1e-9);
    assert_eq!(strong_lift.decision, DecisionKind::Scale);

    let modest_lift = engine.evaluate(&evidenced(2, 2, 1, 3, 0.10));
    assert!((modest_lift.success_score - 0.80).abs() < 1e-9);
    assert_eq!(modest_lift.decision, DecisionKind::Persevere);
}

#[test]
fn nothing_on_track_terminates() {
    let report = DecisionEngine::default().evaluate(&evidenced(0, 2, 0, 3, 0.0));
    assert_eq!(report.success_score, 0.0);
    assert_eq!(report.decision, DecisionKind::Terminate);
    assert!(!report.next_actions.is_empty());
}

#[test]
fn middle_bands_iterate_and_pivot() {
    let engine = DecisionEngine::default();
    // 0.7 * 1/2 + 0.3 * 1/3 = 0.45
    assert_eq!(engine.evaluate(&evidenced(1, 2, 1, 3, 0.5)).decision, DecisionKind::Iterate);
    // 0.3 * 3/3 = 0.30
    assert_eq!(engine.evaluate(&evidenced(0, 2, 3, 3, 0.0)).decision, DecisionKind::Pivot);
}

#[test]
fn scores_landing_exactly_on_a_band_edge_take_the_upper_band() {
    let engine = DecisionEngine::default();
    // 0.3 * 2/3 = 0.20
    let pivot = engine.evaluate(&evidenced(0, 1, 2, 3, 0.0));
    assert!((pivot.success_score - 0.20).abs() < 1e-9);
    assert_eq!(pivot.decision, DecisionKind::Pivot);
    // 0.7 * 1/4 + 0.3 * 3/4 = 0.40
    let iterate = engine.evaluate(&evidenced(1, 4, 3, 4, 0.0));
    assert!((iterate.success_score - 0.40).abs() < 1e-9);
    assert_eq!(iterate.decision, DecisionKind::Iterate);
    // 0.7 * 1/1 = 0.70
    assert_eq!(engine.evaluate(&evidenced(1, 1, 0, 0, 0.0)).decision, DecisionKind::Persevere);
}

#[test]
fn applying_decisions_sets_terminal_status() {
    let engine = DecisionEngine::default();
    let cases = [
        (evidenced(2, 2, 1, 3, 0.35), InitiativeStatus::Scaled),
        (evidenced(2, 2, 1, 3, 0.10), InitiativeStatus::Validated),
        (evidenced(0, 2, 3, 3, 0.0), InitiativeStatus::Failed),
        (evidenced(0, 2, 0, 3, 0.0), InitiativeStatus::Cancelled),
        (evidenced(1, 2, 1, 3, 0.5), InitiativeStatus::Running),
    ];
    for (mut initiative, expected) in cases {
        let report = engine.evaluate(&initiative);
        engine.apply(&mut initiative, &report).unwrap();
        assert_eq!(initiative.status, expected, "{}", report.decision);
    }
}
