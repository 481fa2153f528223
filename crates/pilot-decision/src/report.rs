use pilot_types::DecisionKind;
use serde::{Deserialize, Serialize};

/// A recommendation with the evidence it was derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    pub decision: DecisionKind,
    pub success_score: f64,
    pub primary_met: usize,
    pub primary_total: usize,
    pub secondary_met: usize,
    pub secondary_total: usize,
    /// Mean relative improvement of measured primary metrics over baseline.
    pub primary_lift: f64,
    pub rationale: String,
    pub next_actions: Vec<String>,
    /// Learnings recorded on the initiative at evaluation time.
    pub evidence: Vec<String>,
}
