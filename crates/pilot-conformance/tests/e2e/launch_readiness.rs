//! E2E: Go/No-Go verdicts before launch.

use pilot_pipeline::{go_no_go, Verdict};
use pilot_types::GoNoGoCriterion;

#[test]
fn no_required_criteria_is_vacuously_go() {
    let result = go_no_go(&[
        GoNoGoCriterion::optional("marketing ready", true),
        GoNoGoCriterion::optional("docs translated", false),
        GoNoGoCriterion::optional("status page", false),
        GoNoGoCriterion::optional("launch blog", true),
    ]);
    assert_eq!(result.verdict, Verdict::Go);
    assert_eq!(result.required_total, 0);
    assert!((result.confidence - 0.5).abs() < 1e-12);
}

#[test]
fn no_criteria_at_all_is_go_with_zero_confidence() {
    let result = go_no_go(&[]);
    assert!(result.is_go());
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn one_failed_required_criterion_blocks() {
    let result = go_no_go(&[
        GoNoGoCriterion::required("security review", true),
        GoNoGoCriterion::required("on-call rota", false).with_evidence("rota not staffed"),
        GoNoGoCriterion::optional("launch blog", true),
    ]);
    assert_eq!(result.verdict, Verdict::NoGo);
    assert_eq!((result.required_passed, result.required_total), (1, 2));
    assert_eq!((result.optional_passed, result.optional_total), (1, 1));
    assert_eq!(result.blocking, vec!["on-call rota".to_string()]);
    assert!((result.confidence - 2.0 / 3.0).abs() < 1e-12);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["verdict"], "NO-GO");
}
