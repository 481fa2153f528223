//! Portfolio service: the operational entry points over a repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use pilot_allocator::{AllocationConstraints, AllocationPlan, PortfolioAllocator};
use pilot_decision::{DecisionEngine, DecisionReport};
use pilot_pipeline::{
    go_no_go, GoNoGoResult, PipelineStateMachine, TransitionAction, TransitionOutcome,
};
use pilot_risk::RiskRegister;
use pilot_scoring::{ScoreRequest, ScoringEngine};
use pilot_stats::{StatisticalValidator, ValidationReport};
use pilot_storage::{AllocationMode, Observation, PortfolioStore};
use pilot_types::{
    Criterion, GateEvaluation, GoNoGoCriterion, Horizon, Initiative, InitiativeId, PilotError,
    Risk,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError, EngineResult, InOperation};
use crate::report::InitiativeReport;

const PORTFOLIO: &str = "portfolio";

/// Slack allowed when comparing stored horizon totals with a plan's caps.
const CAP_TOLERANCE: f64 = 1e-6;

/// Result of a combined gate review and advance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateAdvance {
    pub evaluation: GateEvaluation,
    pub outcome: TransitionOutcome,
}

/// Service facade over the decision components and a repository.
pub struct PortfolioService<S> {
    store: Arc<S>,
    config: EngineConfig,
    pipeline: PipelineStateMachine,
    validator: StatisticalValidator,
    allocator: PortfolioAllocator,
    decisions: DecisionEngine,
    writer: Mutex<()>,
}

impl<S: PortfolioStore> PortfolioService<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let allocator = PortfolioAllocator::new(
            config.allocation.target,
            config.allocation.balance_tolerance_pct,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let decisions = DecisionEngine::new(config.decision.scale_lift_threshold)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(Self {
            store,
            pipeline: PipelineStateMachine::new(config.pipeline.gate_policy),
            validator: StatisticalValidator::new(
                config.validation.minimum_sample_size,
                config.validation.confidence,
            ),
            allocator,
            decisions,
            config,
            writer: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ── Registry ─────────────────────────────────────────────────────

    pub async fn create_initiative(&self, initiative: Initiative) -> EngineResult<InitiativeId> {
        const OP: &str = "create_initiative";
        let id = initiative.id;
        if initiative.name.trim().is_empty() {
            return Err(EngineError::new(OP, id, PilotError::invalid("name must not be blank")));
        }
        let requested = initiative.requested_resources;
        if !(requested.is_finite() && requested >= 0.0) {
            return Err(EngineError::new(
                OP,
                id,
                PilotError::invalid(format!("requested resources {requested} must be >= 0")),
            ));
        }

        let _guard = self.writer.lock().await;
        info!(
            initiative = %id,
            name = %initiative.name,
            horizon = %initiative.horizon,
            "Initiative created"
        );
        self.store.create(initiative).await.in_operation(OP, id)?;
        Ok(id)
    }

    pub async fn get_initiative(&self, id: InitiativeId) -> EngineResult<Initiative> {
        self.load("get_initiative", id).await
    }

    pub async fn list_initiatives(&self) -> EngineResult<Vec<Initiative>> {
        self.store.list().await.in_operation("list_initiatives", PORTFOLIO)
    }

    pub async fn report(&self, id: InitiativeId) -> EngineResult<InitiativeReport> {
        let initiative = self.load("report", id).await?;
        Ok(InitiativeReport::from_initiative(&initiative))
    }

    // ── Scoring and risk ─────────────────────────────────────────────

    pub async fn score_initiative(
        &self,
        id: InitiativeId,
        request: ScoreRequest,
    ) -> EngineResult<Initiative> {
        self.mutate("score_initiative", id, |initiative| {
            if request.is_empty() {
                return Err(PilotError::invalid("score request has no inputs"));
            }
            ScoringEngine::apply(&request, initiative);
            Ok(initiative.clone())
        })
        .await
    }

    pub async fn add_risk(&self, id: InitiativeId, risk: Risk) -> EngineResult<Vec<Risk>> {
        self.mutate("add_risk", id, |initiative| {
            RiskRegister::add_risk(initiative, risk).map(<[Risk]>::to_vec)
        })
        .await
    }

    // ── Observations and validation ──────────────────────────────────

    pub async fn record_observation(
        &self,
        id: InitiativeId,
        observation: Observation,
    ) -> EngineResult<()> {
        self.record_observations(id, vec![observation]).await
    }

    /// Store samples for metrics the initiative declares. Unknown metric
    /// names reject the whole batch.
    pub async fn record_observations(
        &self,
        id: InitiativeId,
        observations: Vec<Observation>,
    ) -> EngineResult<()> {
        const OP: &str = "record_observations";
        if observations.is_empty() {
            return Err(EngineError::new(OP, id, PilotError::invalid("no observations supplied")));
        }

        let _guard = self.writer.lock().await;
        let initiative = self.load(OP, id).await?;
        if let Some(unknown) = observations
            .iter()
            .find(|o| initiative.metric(&o.metric_name).is_none())
        {
            return Err(EngineError::new(
                OP,
                id,
                PilotError::invalid(format!("unknown metric '{}'", unknown.metric_name)),
            ));
        }
        let count = observations.len();
        self.store
            .record_observations(&id, observations)
            .await
            .in_operation(OP, id)?;
        info!(initiative = %id, count, "Observations recorded");
        Ok(())
    }

    /// Validate every metric that has samples and store each sample mean as
    /// the metric's current value.
    pub async fn validate_initiative(&self, id: InitiativeId) -> EngineResult<ValidationReport> {
        const OP: &str = "validate_initiative";
        let _guard = self.writer.lock().await;
        let mut initiative = self.load(OP, id).await?;

        let mut sampled = Vec::new();
        for (index, metric) in initiative.metrics.iter().enumerate() {
            let samples = self
                .store
                .samples(&id, &metric.name)
                .await
                .in_operation(OP, id)?;
            if !samples.is_empty() {
                sampled.push((index, samples));
            }
        }

        let report = self
            .validator
            .validate(
                sampled
                    .iter()
                    .map(|(index, samples)| (&initiative.metrics[*index], samples.as_slice())),
            )
            .in_operation(OP, id)?;

        for result in &report.metrics {
            if let Some(metric) = initiative.metric_mut(&result.metric) {
                metric.current = Some(result.mean);
            }
        }
        initiative.touch();
        self.store.update(initiative).await.in_operation(OP, id)?;
        if !report.is_valid() {
            warn!(
                initiative = %id,
                evaluated = report.metrics.len(),
                "Validation sample insufficient"
            );
        }
        Ok(report)
    }

    // ── Pipeline ─────────────────────────────────────────────────────

    pub async fn approve(&self, id: InitiativeId) -> EngineResult<TransitionOutcome> {
        self.transition("approve", id, PipelineStateMachine::approve).await
    }

    pub async fn advance(&self, id: InitiativeId) -> EngineResult<TransitionOutcome> {
        self.transition("advance", id, PipelineStateMachine::advance).await
    }

    pub async fn hold(&self, id: InitiativeId) -> EngineResult<TransitionOutcome> {
        self.transition("hold", id, PipelineStateMachine::hold).await
    }

    pub async fn resume(&self, id: InitiativeId) -> EngineResult<TransitionOutcome> {
        self.transition("resume", id, PipelineStateMachine::resume).await
    }

    pub async fn kill(&self, id: InitiativeId) -> EngineResult<TransitionOutcome> {
        self.transition("kill", id, PipelineStateMachine::kill).await
    }

    pub async fn evaluate_gate(
        &self,
        id: InitiativeId,
        criteria: Vec<Criterion>,
    ) -> EngineResult<GateEvaluation> {
        self.mutate("evaluate_gate", id, |initiative| {
            self.pipeline.evaluate_gate(initiative, criteria)
        })
        .await
    }

    /// Review the gate and advance only if it passes. A failing gate is
    /// recorded and reported as `no_change`.
    pub async fn advance_through_gate(
        &self,
        id: InitiativeId,
        criteria: Vec<Criterion>,
    ) -> EngineResult<GateAdvance> {
        self.mutate("advance_through_gate", id, |initiative| {
            let evaluation = self.pipeline.evaluate_gate(initiative, criteria)?;
            let outcome = if evaluation.can_advance {
                self.pipeline.advance(initiative)
            } else {
                TransitionOutcome {
                    action: TransitionAction::NoChange,
                    from_stage: initiative.stage,
                    to_stage: initiative.stage,
                    from_status: initiative.status,
                    to_status: initiative.status,
                    reason: Some(format!(
                        "gate {} passed {}/{} criteria",
                        evaluation.stage, evaluation.criteria_met, evaluation.criteria_total
                    )),
                }
            };
            Ok(GateAdvance {
                evaluation,
                outcome,
            })
        })
        .await
    }

    /// Launch readiness check. The criteria are evaluated, not stored.
    pub async fn go_no_go(
        &self,
        id: InitiativeId,
        criteria: &[GoNoGoCriterion],
    ) -> EngineResult<GoNoGoResult> {
        let initiative = self.load("go_no_go", id).await?;
        let result = go_no_go(criteria);
        info!(
            initiative = %initiative.id,
            verdict = %result.verdict,
            confidence = result.confidence,
            "Go/No-Go evaluated"
        );
        Ok(result)
    }

    // ── Decisions ────────────────────────────────────────────────────

    pub async fn evaluate_decision(&self, id: InitiativeId) -> EngineResult<DecisionReport> {
        let initiative = self.load("evaluate_decision", id).await?;
        Ok(self.decisions.evaluate(&initiative))
    }

    pub async fn apply_decision(
        &self,
        id: InitiativeId,
        report: &DecisionReport,
    ) -> EngineResult<Initiative> {
        self.mutate("apply_decision", id, |initiative| {
            self.decisions.apply(initiative, report)?;
            Ok(initiative.clone())
        })
        .await
    }

    /// Evaluate and apply in one step.
    pub async fn decide(&self, id: InitiativeId) -> EngineResult<DecisionReport> {
        self.mutate("decide", id, |initiative| {
            let report = self.decisions.evaluate(initiative);
            self.decisions.apply(initiative, &report)?;
            Ok(report)
        })
        .await
    }

    pub async fn add_learning(&self, id: InitiativeId, learning: String) -> EngineResult<()> {
        self.mutate("add_learning", id, |initiative| {
            DecisionEngine::add_learning(initiative, learning)
        })
        .await
    }

    // ── Portfolio ────────────────────────────────────────────────────

    /// Plan an allocation with the configured split. With `ids`, only those
    /// initiatives are considered; every id must exist.
    pub async fn balance_portfolio(
        &self,
        total_resources: f64,
        ids: Option<&[InitiativeId]>,
    ) -> EngineResult<AllocationPlan> {
        const OP: &str = "balance_portfolio";
        let snapshot = self.store.list().await.in_operation(OP, PORTFOLIO)?;
        let selected = match ids {
            None => snapshot,
            Some(ids) => {
                if let Some(missing) = ids.iter().find(|id| !snapshot.iter().any(|i| &i.id == *id)) {
                    return Err(EngineError::new(
                        OP,
                        missing,
                        PilotError::not_found("initiative", missing),
                    ));
                }
                snapshot
                    .into_iter()
                    .filter(|i| ids.contains(&i.id))
                    .collect()
            }
        };
        self.allocator
            .allocate(total_resources, &selected)
            .in_operation(OP, PORTFOLIO)
    }

    /// Plan an allocation over the whole portfolio under extra constraints.
    pub async fn optimize_allocation(
        &self,
        total_resources: f64,
        constraints: Option<AllocationConstraints>,
    ) -> EngineResult<AllocationPlan> {
        const OP: &str = "optimize_allocation";
        let snapshot = self.store.list().await.in_operation(OP, PORTFOLIO)?;
        self.allocator
            .allocate_with(total_resources, &snapshot, &constraints.unwrap_or_default())
            .in_operation(OP, PORTFOLIO)
    }

    /// Persist a plan's allocations in one store write, merged over the
    /// allocations already held by initiatives the plan does not list.
    ///
    /// Fails with `Conflict` when the merged totals would exceed any of the
    /// plan's horizon caps; use [`Self::rebalance_portfolio`] to reallocate
    /// the whole portfolio instead.
    pub async fn apply_allocation_plan(&self, plan: &AllocationPlan) -> EngineResult<()> {
        const OP: &str = "apply_allocation_plan";
        let _guard = self.writer.lock().await;
        let allocations = plan.as_map();
        let snapshot = self.store.list().await.in_operation(OP, PORTFOLIO)?;

        let mut merged: BTreeMap<Horizon, f64> = BTreeMap::new();
        for initiative in &snapshot {
            let amount = allocations
                .get(&initiative.id)
                .copied()
                .unwrap_or(initiative.resource_allocation);
            *merged.entry(initiative.horizon).or_default() += amount;
        }
        for (horizon, total) in &merged {
            let cap = plan.horizon(*horizon).map_or(0.0, |h| h.cap);
            if *total > cap + CAP_TOLERANCE {
                warn!(horizon = %horizon, total, cap, "Allocation plan rejected");
                return Err(EngineError::new(
                    OP,
                    PORTFOLIO,
                    PilotError::Conflict(format!(
                        "{horizon} allocations would total {total} against a cap of {cap}"
                    )),
                ));
            }
        }

        self.store
            .apply_allocations(&allocations, AllocationMode::Merge)
            .await
            .in_operation(OP, PORTFOLIO)?;
        info!(
            initiatives = plan.allocations.len(),
            total_allocated = plan.total_allocated,
            balanced = plan.is_balanced,
            "Allocation plan applied"
        );
        Ok(())
    }

    /// Plan over the current snapshot and apply it without letting another
    /// write in between. Initiatives left out of the plan are reset to zero.
    pub async fn rebalance_portfolio(&self, total_resources: f64) -> EngineResult<AllocationPlan> {
        const OP: &str = "rebalance_portfolio";
        let _guard = self.writer.lock().await;
        let snapshot = self.store.list().await.in_operation(OP, PORTFOLIO)?;
        let plan = self
            .allocator
            .allocate(total_resources, &snapshot)
            .in_operation(OP, PORTFOLIO)?;
        self.store
            .apply_allocations(&plan.as_map(), AllocationMode::Replace)
            .await
            .in_operation(OP, PORTFOLIO)?;
        info!(
            total_allocated = plan.total_allocated,
            balanced = plan.is_balanced,
            "Portfolio rebalanced"
        );
        Ok(plan)
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn load(&self, operation: &'static str, id: InitiativeId) -> EngineResult<Initiative> {
        self.store
            .get(&id)
            .await
            .in_operation(operation, id)?
            .ok_or_else(|| EngineError::new(operation, id, PilotError::not_found("initiative", id)))
    }

    /// Run `f` on a copy and write it back only on success.
    async fn mutate<T, F>(&self, operation: &'static str, id: InitiativeId, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut Initiative) -> Result<T, PilotError>,
    {
        let _guard = self.writer.lock().await;
        let mut initiative = self.load(operation, id).await?;
        let value = f(&mut initiative).in_operation(operation, id)?;
        self.store.update(initiative).await.in_operation(operation, id)?;
        Ok(value)
    }

    async fn transition(
        &self,
        operation: &'static str,
        id: InitiativeId,
        step: fn(&PipelineStateMachine, &mut Initiative) -> TransitionOutcome,
    ) -> EngineResult<TransitionOutcome> {
        let outcome = self
            .mutate(operation, id, |initiative| Ok(step(&self.pipeline, initiative)))
            .await?;
        if let Some(reason) = &outcome.reason {
            info!(initiative = %id, operation, reason = %reason, "Transition not applied");
        }
        Ok(outcome)
    }
}

impl<S> std::fmt::Debug for PortfolioService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
