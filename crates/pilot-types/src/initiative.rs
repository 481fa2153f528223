use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::criteria::GateEvaluation;
use crate::enums::{DecisionKind, Horizon, InitiativeStatus, PipelineStage};
use crate::ids::InitiativeId;
use crate::metric::Metric;
use crate::risk::Risk;
use crate::roi::RoiMetrics;
use crate::scores::{IceScore, PriorityScore, RiceScore};

/// Stage and status captured when an initiative is put on hold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeldState {
    pub stage: PipelineStage,
    pub status: InitiativeStatus,
}

/// An experimental initiative ("pilot") in the portfolio.
///
/// Field ownership:
/// - scores: scoring engine
/// - `resource_allocation`: portfolio allocator; reset to zero on a terminal status
/// - `stage` / `status`: pipeline state machine and decision engine
/// - `risks`: risk register
/// - `metrics[].current`: statistical validator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
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
    pub roi: RoiMetrics,

    pub metrics: Vec<Metric>,
    pub risks: Vec<Risk>,

    /// Amount the initiative asks the allocator for.
    pub requested_resources: f64,
    /// Amount granted by the last applied allocation plan.
    pub resource_allocation: f64,

    pub gate_history: Vec<GateEvaluation>,
    pub held_from: Option<HeldState>,

    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,

    pub decision: Option<DecisionKind>,
    pub learnings: Vec<String>,
}

impl Initiative {
    /// A new initiative in `proposed` / `ideation`.
    pub fn new(name: impl Into<String>, horizon: Horizon) -> Self {
        let now = Utc::now();
        Self {
            id: InitiativeId::new(),
            name: name.into(),
            description: String::new(),
            hypothesis: String::new(),
            horizon,
            stage: PipelineStage::Ideation,
            status: InitiativeStatus::Proposed,
            ice: None,
            rice: None,
            priority: None,
            roi: RoiMetrics::default(),
            metrics: Vec::new(),
            risks: Vec::new(),
            requested_resources: 0.0,
            resource_allocation: 0.0,
            gate_history: Vec::new(),
            held_from: None,
            created_at: now,
            started_at: None,
            completed_at: None,
            updated_at: now,
            decision: None,
            learnings: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hypothesis(mut self, hypothesis: impl Into<String>) -> Self {
        self.hypothesis = hypothesis.into();
        self
    }

    pub fn with_roi(mut self, roi: RoiMetrics) -> Self {
        self.roi = roi;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_requested_resources(mut self, amount: f64) -> Self {
        self.requested_resources = amount;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// Composite priority used for ranking; 0 until scored.
    pub fn priority_score(&self) -> f64 {
        self.priority.as_ref().map(|p| p.score).unwrap_or(0.0)
    }

    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn metric_mut(&mut self, name: &str) -> Option<&mut Metric> {
        self.metrics.iter_mut().find(|m| m.name == name)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
