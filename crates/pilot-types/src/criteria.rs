use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::PipelineStage;

/// A pass/fail check supplied by a human or an external process.
///
/// The engine never computes `status`; it only aggregates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub criterion: String,
    pub required: bool,
    pub status: bool,
    #[serde(default)]
    pub evidence: String,
    pub evaluated_at: DateTime<Utc>,
}

/// Launch-readiness criteria share the same record shape.
pub type GoNoGoCriterion = Criterion;

impl Criterion {
    pub fn new(criterion: impl Into<String>, required: bool, status: bool) -> Self {
        Self {
            criterion: criterion.into(),
            required,
            status,
            evidence: String::new(),
            evaluated_at: Utc::now(),
        }
    }

    pub fn required(criterion: impl Into<String>, status: bool) -> Self {
        Self::new(criterion, true, status)
    }

    pub fn optional(criterion: impl Into<String>, status: bool) -> Self {
        Self::new(criterion, false, status)
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }
}

/// Recorded outcome of one stage-gate review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateEvaluation {
    /// Stage the initiative was in when the gate was reviewed.
    pub stage: PipelineStage,
    pub criteria: Vec<Criterion>,
    pub criteria_met: usize,
    pub criteria_total: usize,
    pub can_advance: bool,
    pub evaluated_at: DateTime<Utc>,
}

impl GateEvaluation {
    pub fn pass_rate(&self) -> f64 {
        if self.criteria_total == 0 {
            return 0.0;
        }
        self.criteria_met as f64 / self.criteria_total as f64
    }
}
