//! E2E: a portfolio driven through the service facade from intake to decision.

use std::sync::Arc;

use pilot_engine::{EngineConfig, PortfolioService};
use pilot_scoring::{IceInputs, PriorityInputs, RiceInputs, ScoreRequest};
use pilot_storage::{InMemoryPortfolioStore, Observation};
use pilot_types::{
    Criterion, DecisionKind, Horizon, Initiative, InitiativeId, InitiativeStatus, Metric,
    PipelineStage, Risk, RoiMetrics,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type Service = PortfolioService<InMemoryPortfolioStore>;

fn service(config: EngineConfig) -> Service {
    PortfolioService::new(Arc::new(InMemoryPortfolioStore::new()), config).unwrap()
}

fn priority(score: f64) -> ScoreRequest {
    ScoreRequest {
        priority: Some(PriorityInputs {
            strategic_fit: score,
            roi_potential: score,
            risk_level: 100.0 - score,
            resource_availability: score,
        }),
        ..Default::default()
    }
}

async fn intake(
    svc: &Service,
    name: &str,
    horizon: Horizon,
    score: f64,
    request: f64,
) -> InitiativeId {
    let initiative = Initiative::new(name, horizon).with_requested_resources(request);
    let id = svc
        .create_initiative(initiative)
        .await
        .unwrap();
    svc.approve(id).await.unwrap();
    svc.score_initiative(id, priority(score)).await.unwrap();
    id
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initiative_lifecycle_from_intake_to_decision() {
    let svc = service(EngineConfig::exploratory());
    let id = svc
        .create_initiative(
            Initiative::new("instant payouts", Horizon::Emerging)
                .with_hypothesis("Instant payouts raise seller retention")
                .with_roi(RoiMetrics {
                    initial_cost: 50_000.0,
                    implementation_cost: 10_000.0,
                    ongoing_cost_annual: 5_000.0,
                    expected_benefit_annual: 65_000.0,
                    time_to_value_months: 6.0,
                    confidence_level: 0.6,
                })
                .with_metric(Metric::lagging("retention", 0.65, 0.68).with_unit("ratio"))
                .with_metric(Metric::leading("payout_adoption", 0.0, 0.30))
                .with_requested_resources(150.0),
        )
        .await
        .unwrap();

    svc.approve(id).await.unwrap();
    svc.score_initiative(
        id,
        ScoreRequest {
            ice: Some(IceInputs {
                impact: 8.0,
                confidence: 6.0,
                ease: 4.0,
            }),
            rice: Some(RiceInputs {
                reach: 2000.0,
                impact: 2.0,
                confidence: 80.0,
                effort: 4.0,
            }),
            priority: priority(72.0).priority,
        },
    )
    .await
    .unwrap();
    svc.add_risk(
        id,
        Risk::new("card network outage", 0.2, 0.9).with_mitigation("fallback to ACH"),
    )
    .await
    .unwrap();

    let gate = svc
        .advance_through_gate(id, vec![Criterion::required("problem interviews", true)])
        .await
        .unwrap();
    assert_eq!(gate.outcome.to_stage, PipelineStage::Validation);
    svc.advance(id).await.unwrap();

    let retention: Vec<Observation> = [0.70, 0.72, 0.74, 0.71, 0.73, 0.70, 0.72, 0.74, 0.71, 0.73]
        .into_iter()
        .map(|v| Observation::now("retention", v))
        .collect();
    svc.record_observations(id, retention).await.unwrap();
    let validation = svc.validate_initiative(id).await.unwrap();
    assert!(validation.is_valid());
    assert!(validation.metric("retention").unwrap().target_below_ci);

    let decision = svc.decide(id).await.unwrap();
    // primary 1/1, secondary 0/1; lift (0.72 - 0.65) / 0.65 is under the scale threshold
    assert!((decision.success_score - 0.70).abs() < 1e-9);
    assert_eq!(decision.decision, DecisionKind::Persevere);

    let report = svc.report(id).await.unwrap();
    assert_eq!(report.status, InitiativeStatus::Validated);
    assert_eq!(report.stage, PipelineStage::Development);
    assert_eq!(report.decision, Some(DecisionKind::Persevere));
    assert_eq!(report.gate_history.len(), 1);
    assert_eq!(report.ice.as_ref().map(|s| s.score), Some(6.0));
    assert_eq!(report.roi.total_investment, 60_000.0);
    assert!((report.metrics[0].current.unwrap() - 0.72).abs() < 1e-9);
    assert!(report.metrics[0].on_track);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "validated");
    assert_eq!(json["decision"], "persevere");
    assert_eq!(json["risk"]["total"], 1);
}

#[tokio::test]
async fn balanced_portfolio_respects_caps_and_applies_atomically() {
    let svc = service(EngineConfig::default());
    let core_a = intake(&svc, "checkout speedup", Horizon::Core, 85.0, 500.0).await;
    let core_b = intake(&svc, "search relevance", Horizon::Core, 75.0, 400.0).await;
    let emerging = intake(&svc, "b2b marketplace", Horizon::Emerging, 70.0, 250.0).await;
    let future = intake(&svc, "ar try-on", Horizon::Future, 60.0, 80.0).await;
    let unapproved = Initiative::new("unapproved", Horizon::Core).with_requested_resources(300.0);
    let proposed = svc
        .create_initiative(unapproved)
        .await
        .unwrap();

    let plan = svc.balance_portfolio(1000.0, None).await.unwrap();
    assert_eq!(plan.allocation_for(&core_a), Some(500.0));
    assert!((plan.allocation_for(&core_b).unwrap() - 200.0).abs() < 1e-9);
    assert!((plan.allocation_for(&emerging).unwrap() - 200.0).abs() < 1e-9);
    assert_eq!(plan.allocation_for(&future), Some(80.0));
    assert_eq!(plan.allocation_for(&proposed), None);
    assert!(plan.is_balanced);

    let repeat = svc.balance_portfolio(1000.0, None).await.unwrap();
    assert_eq!(
        serde_json::to_string(&plan).unwrap(),
        serde_json::to_string(&repeat).unwrap()
    );

    svc.apply_allocation_plan(&plan).await.unwrap();
    let stored: f64 = svc
        .list_initiatives()
        .await
        .unwrap()
        .iter()
        .filter(|i| i.horizon == Horizon::Core)
        .map(|i| i.resource_allocation)
        .sum();
    assert!(stored <= 700.0 + 1e-9);
}

#[tokio::test]
async fn killed_initiatives_drop_out_of_allocation() {
    let svc = service(EngineConfig::default());
    let keep = intake(&svc, "keep", Horizon::Core, 60.0, 300.0).await;
    let dropped = intake(&svc, "dropped", Horizon::Core, 90.0, 700.0).await;

    let before = svc.balance_portfolio(1000.0, None).await.unwrap();
    assert_eq!(before.allocation_for(&keep), Some(0.0));

    svc.kill(dropped).await.unwrap();
    let after = svc.rebalance_portfolio(1000.0).await.unwrap();
    assert_eq!(after.allocation_for(&dropped), None);
    assert_eq!(after.allocation_for(&keep), Some(300.0));
    assert_eq!(svc.get_initiative(keep).await.unwrap().resource_allocation, 300.0);
}

fn stored_total(initiatives: &[Initiative], horizon: Horizon) -> f64 {
    initiatives
        .iter()
        .filter(|i| i.horizon == horizon)
        .map(|i| i.resource_allocation)
        .sum()
}

#[tokio::test]
async fn killing_a_funded_initiative_frees_its_share_of_the_cap() {
    let svc = service(EngineConfig::default());
    let c90 = intake(&svc, "c90", Horizon::Core, 90.0, 700.0).await;
    let c60 = intake(&svc, "c60", Horizon::Core, 60.0, 700.0).await;

    svc.rebalance_portfolio(1000.0).await.unwrap();
    assert_eq!(svc.get_initiative(c90).await.unwrap().resource_allocation, 700.0);
    assert_eq!(svc.get_initiative(c60).await.unwrap().resource_allocation, 0.0);

    svc.kill(c90).await.unwrap();
    svc.rebalance_portfolio(1000.0).await.unwrap();

    let killed = svc.get_initiative(c90).await.unwrap();
    assert_eq!(killed.status, InitiativeStatus::Cancelled);
    assert_eq!(killed.resource_allocation, 0.0);
    assert_eq!(svc.get_initiative(c60).await.unwrap().resource_allocation, 700.0);
    let all = svc.list_initiatives().await.unwrap();
    assert!(stored_total(&all, Horizon::Core) <= 700.0 + 1e-9);
}

#[tokio::test]
async fn terminated_initiatives_release_funding_on_decision() {
    let svc = service(EngineConfig::default());
    let id = svc
        .create_initiative(
            Initiative::new("dead end", Horizon::Core)
                .with_metric(Metric::lagging("conversion", 0.10, 0.20))
                .with_requested_resources(300.0),
        )
        .await
        .unwrap();
    svc.approve(id).await.unwrap();
    svc.score_initiative(id, priority(80.0)).await.unwrap();
    svc.rebalance_portfolio(1000.0).await.unwrap();
    assert_eq!(svc.get_initiative(id).await.unwrap().resource_allocation, 300.0);

    let report = svc.decide(id).await.unwrap();
    assert_eq!(report.decision, DecisionKind::Terminate);
    let ended = svc.get_initiative(id).await.unwrap();
    assert_eq!(ended.status, InitiativeStatus::Cancelled);
    assert_eq!(ended.resource_allocation, 0.0);
}

#[tokio::test]
async fn subset_plans_cannot_push_a_horizon_over_its_cap() {
    let svc = service(EngineConfig::default());
    let lead = intake(&svc, "lead", Horizon::Core, 90.0, 600.0).await;
    let tail = intake(&svc, "tail", Horizon::Core, 70.0, 600.0).await;
    svc.rebalance_portfolio(1000.0).await.unwrap();

    let subset = svc.balance_portfolio(1000.0, Some(&[tail][..])).await.unwrap();
    assert_eq!(subset.allocation_for(&tail), Some(600.0));
    assert!(svc.apply_allocation_plan(&subset).await.is_err());

    let all = svc.list_initiatives().await.unwrap();
    assert!(stored_total(&all, Horizon::Core) <= 700.0 + 1e-9);
    assert_eq!(svc.get_initiative(lead).await.unwrap().resource_allocation, 600.0);
}

#[tokio::test]
async fn concurrent_writers_are_serialized() {
    let svc = Arc::new(service(EngineConfig::default()));
    let id = intake(&svc, "concurrency", Horizon::Core, 50.0, 10.0).await;

    let mut handles = Vec::new();
    for n in 0..16 {
        let svc = Arc::clone(&svc);
        handles.push(tokio::spawn(async move {
            svc.add_learning(id, format!("learning {n}")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(svc.get_initiative(id).await.unwrap().learnings.len(), 16);
}

#[tokio::test]
async fn errors_carry_operation_and_identifier() {
    let svc = service(EngineConfig::default());
    let ghost = InitiativeId::new();
    for err in [
        svc.hold(ghost).await.unwrap_err(),
        svc.validate_initiative(ghost).await.unwrap_err(),
        svc.report(ghost).await.map(|_| ()).unwrap_err(),
    ] {
        assert!(err.is_not_found());
        assert_eq!(err.id, ghost.to_string());
        assert!(err.to_string().contains(&ghost.to_string()));
    }
}
