//! Closed tag enums for horizons, pipeline stages, statuses and decisions.

use serde::{Deserialize, Serialize};

/// Risk/time bucket used to structure portfolio resource splits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    /// Extensions of the existing business
    Core,
    /// Adjacent opportunities
    Emerging,
    /// Long-range bets
    Future,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Core, Horizon::Emerging, Horizon::Future];

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Core => "core",
            Horizon::Emerging => "emerging",
            Horizon::Future => "future",
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage of the stage-gate pipeline.
///
/// The forward order is `Ideation → Validation → Development → Launch → Scale`.
/// `Hold` and `Killed` are side states reachable from anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Ideation,
    Validation,
    Development,
    Launch,
    Scale,
    Hold,
    Killed,
}

impl PipelineStage {
    /// The forward stages in order.
    pub const FORWARD: [PipelineStage; 5] = [
        PipelineStage::Ideation,
        PipelineStage::Validation,
        PipelineStage::Development,
        PipelineStage::Launch,
        PipelineStage::Scale,
    ];

    /// Position in the forward order; `None` for side states.
    pub fn ordinal(&self) -> Option<usize> {
        Self::FORWARD.iter().position(|s| s == self)
    }

    /// Next stage in the forward order, if any.
    pub fn next(&self) -> Option<PipelineStage> {
        self.ordinal()
            .and_then(|i| Self::FORWARD.get(i + 1))
            .copied()
    }

    pub fn is_side_state(&self) -> bool {
        matches!(self, PipelineStage::Hold | PipelineStage::Killed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Ideation => "ideation",
            PipelineStage::Validation => "validation",
            PipelineStage::Development => "development",
            PipelineStage::Launch => "launch",
            PipelineStage::Scale => "scale",
            PipelineStage::Hold => "hold",
            PipelineStage::Killed => "killed",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an initiative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeStatus {
    Proposed,
    Approved,
    Running,
    OnHold,
    Completed,
    Validated,
    Failed,
    Scaled,
    Cancelled,
}

impl InitiativeStatus {
    /// Terminal statuses are immutable once reached.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InitiativeStatus::Validated
                | InitiativeStatus::Failed
                | InitiativeStatus::Scaled
                | InitiativeStatus::Cancelled
        )
    }

    /// Whether the allocator may fund an initiative in this status.
    pub fn is_fundable(&self) -> bool {
        matches!(self, InitiativeStatus::Approved | InitiativeStatus::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InitiativeStatus::Proposed => "proposed",
            InitiativeStatus::Approved => "approved",
            InitiativeStatus::Running => "running",
            InitiativeStatus::OnHold => "on_hold",
            InitiativeStatus::Completed => "completed",
            InitiativeStatus::Validated => "validated",
            InitiativeStatus::Failed => "failed",
            InitiativeStatus::Scaled => "scaled",
            InitiativeStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for InitiativeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal recommendation produced by the decision engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Scale,
    Persevere,
    Iterate,
    Pivot,
    Terminate,
}

impl DecisionKind {
    pub const ALL: [DecisionKind; 5] = [
        DecisionKind::Scale,
        DecisionKind::Persevere,
        DecisionKind::Iterate,
        DecisionKind::Pivot,
        DecisionKind::Terminate,
    ];

    /// Status an initiative moves to when this decision is applied.
    ///
    /// `Iterate` keeps the initiative running, so it has no target status.
    pub fn resulting_status(&self) -> Option<InitiativeStatus> {
        match self {
            DecisionKind::Scale => Some(InitiativeStatus::Scaled),
            DecisionKind::Persevere => Some(InitiativeStatus::Validated),
            DecisionKind::Iterate => None,
            DecisionKind::Pivot => Some(InitiativeStatus::Failed),
            DecisionKind::Terminate => Some(InitiativeStatus::Cancelled),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::Scale => "scale",
            DecisionKind::Persevere => "persevere",
            DecisionKind::Iterate => "iterate",
            DecisionKind::Pivot => "pivot",
            DecisionKind::Terminate => "terminate",
        }
    }
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a metric predicts (leading) or confirms (lagging) an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Leading,
    Lagging,
}
