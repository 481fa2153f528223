use chrono::{DateTime, Utc};
use pilot_risk::{RiskMatrix, RiskRegister, DEFAULT_TOP_N};
use pilot_scoring::RoiSummary;
use pilot_types::{
    DecisionKind, GateEvaluation, Horizon, IceScore, Initiative, InitiativeId, InitiativeStatus,
    Metric, MetricKind, PipelineStage, PriorityScore, RiceScore,
};
use serde::{Deserialize, Serialize};

/// A metric with its derived progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricProgress {
    pub name: String,
    pub kind: MetricKind,
    pub baseline: f64,
    pub current: Option<f64>,
    pub target: f64,
    pub unit: String,
    pub progress_percent: f64,
    pub on_track: bool,
}

impl From<&Metric> for MetricProgress {
    fn from(metric: &Metric) -> Self {
        Self {
            name: metric.name.clone(),
            kind: metric.kind,
            baseline: metric.baseline,
            current: metric.current,
            target: metric.target,
            unit: metric.unit.clone(),
            progress_percent: metric.progress_percent(),
            on_track: metric.on_track(),
        }
    }
}

/// Full derived state of one initiative, for dashboards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitiativeReport {
    pub id: InitiativeId,
    pub name: String,
    pub description: String,
    pub hypothesis: String,
    pub horizon: Horizon,
    pub stage: PipelineStage,
    pub status: InitiativeStatus,
    pub ice: Option<IceScore>,
    pub rice: Option<RiceScore>,
    pub priority: Option<PriorityScore>,
    pub roi: RoiSummary,
    pub risk: RiskMatrix,
    pub metrics: Vec<MetricProgress>,
    pub requested_resources: f64,
    pub resource_allocation: f64,
    pub decision: Option<DecisionKind>,
    pub learnings: Vec<String>,
    pub gate_history: Vec<GateEvaluation>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl InitiativeReport {
    pub fn from_initiative(initiative: &Initiative) -> Self {
        Self {
            id: initiative.id,
            name: initiative.name.clone(),
            description: initiative.description.clone(),
            hypothesis: initiative.hypothesis.clone(),
            horizon: initiative.horizon,
            stage: initiative.stage,
            status: initiative.status,
            ice: initiative.ice.clone(),
            rice: initiative.rice.clone(),
            priority: initiative.priority.clone(),
            roi: RoiSummary::from_metrics(&initiative.roi),
            risk: RiskRegister::matrix(initiative, DEFAULT_TOP_N),
            metrics: initiative.metrics.iter().map(MetricProgress::from).collect(),
            requested_resources: initiative.requested_resources,
            resource_allocation: initiative.resource_allocation,
            decision: initiative.decision,
            learnings: initiative.learnings.clone(),
            gate_history: initiative.gate_history.clone(),
            created_at: initiative.created_at,
            started_at: initiative.started_at,
            completed_at: initiative.completed_at,
            updated_at: initiative.updated_at,
        }
    }
}
