//! E2E: an initiative walks the stage-gate pipeline forward only.

use pilot_pipeline::{GatePolicy, PipelineStateMachine, TransitionAction};
use pilot_types::{Criterion, Horizon, Initiative, InitiativeStatus, PipelineStage};

fn approved() -> Initiative {
    let mut initiative = Initiative::new("warehouse robotics", Horizon::Emerging);
    PipelineStateMachine::default().approve(&mut initiative);
    initiative
}

#[test]
fn validation_advances_to_development() {
    let sm = PipelineStateMachine::default();
    let mut initiative = approved();
    sm.advance(&mut initiative);
    assert_eq!(initiative.stage, PipelineStage::Validation);

    let outcome = sm.advance(&mut initiative);
    assert_eq!(outcome.from_stage, PipelineStage::Validation);
    assert_eq!(outcome.to_stage, PipelineStage::Development);
    assert_eq!(initiative.status, InitiativeStatus::Running);
}

#[test]
fn advance_from_scale_reports_no_change() {
    let sm = PipelineStateMachine::default();
    let mut initiative = approved();
    for _ in 0..4 {
        assert!(sm.advance(&mut initiative).changed());
    }
    assert_eq!(initiative.stage, PipelineStage::Scale);
    assert_eq!(initiative.status, InitiativeStatus::Scaled);

    let outcome = sm.advance(&mut initiative);
    assert_eq!(outcome.action, TransitionAction::NoChange);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["action"], "no_change");
}

#[test]
fn stages_never_move_backwards() {
    let sm = PipelineStateMachine::default();
    let mut initiative = approved();
    let mut last = initiative.stage.ordinal();
    for _ in 0..10 {
        sm.advance(&mut initiative);
        let now = initiative.stage.ordinal();
        assert!(now >= last);
        last = now;
    }
}

#[test]
fn hold_resume_then_kill_is_final() {
    let sm = PipelineStateMachine::default();
    let mut initiative = approved();
    sm.advance(&mut initiative);
    sm.advance(&mut initiative);

    sm.hold(&mut initiative);
    assert_eq!(initiative.status, InitiativeStatus::OnHold);
    sm.resume(&mut initiative);
    assert_eq!(initiative.stage, PipelineStage::Development);
    assert_eq!(initiative.status, InitiativeStatus::Running);

    sm.hold(&mut initiative);
    let killed = sm.kill(&mut initiative);
    assert_eq!(killed.to_stage, PipelineStage::Killed);
    assert_eq!(initiative.status, InitiativeStatus::Cancelled);
    for outcome in [
        sm.advance(&mut initiative),
        sm.resume(&mut initiative),
        sm.hold(&mut initiative),
    ] {
        assert_eq!(outcome.action, TransitionAction::NoChange);
    }
}

#[test]
fn all_criteria_policy_blocks_on_optional_failure() {
    let criteria = vec![
        Criterion::required("unit economics positive", true),
        Criterion::optional("press coverage", false),
    ];

    let mut strict = approved();
    let eval = PipelineStateMachine::default()
        .evaluate_gate(&mut strict, criteria.clone())
        .unwrap();
    assert!(!eval.can_advance);
    assert_eq!((eval.criteria_met, eval.criteria_total), (1, 2));

    let mut lenient = approved();
    let eval = PipelineStateMachine::new(GatePolicy::RequiredOnly)
        .evaluate_gate(&mut lenient, criteria)
        .unwrap();
    assert!(eval.can_advance);
}
