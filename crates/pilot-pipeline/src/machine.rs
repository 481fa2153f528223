use chrono::Utc;
use pilot_types::{
    Criterion, GateEvaluation, HeldState, Initiative, InitiativeStatus, PilotError, PipelineStage,
    Result,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Which criteria must pass before a gate lets an initiative advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    /// Every supplied criterion, required or not.
    #[default]
    AllCriteria,
    /// Only criteria flagged `required`.
    RequiredOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    Approved,
    Advanced,
    Held,
    Resumed,
    Killed,
    NoChange,
}

/// Result of a state machine operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub action: TransitionAction,
    pub from_stage: PipelineStage,
    pub to_stage: PipelineStage,
    pub from_status: InitiativeStatus,
    pub to_status: InitiativeStatus,
    /// Why nothing changed, for `no_change` outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TransitionOutcome {
    fn unchanged(initiative: &Initiative, reason: impl Into<String>) -> Self {
        Self {
            action: TransitionAction::NoChange,
            from_stage: initiative.stage,
            to_stage: initiative.stage,
            from_status: initiative.status,
            to_status: initiative.status,
            reason: Some(reason.into()),
        }
    }

    pub fn changed(&self) -> bool {
        self.action != TransitionAction::NoChange
    }
}

/// Forward-only stage-gate state machine.
///
/// Operations on an initiative whose status is terminal return `no_change`
/// and leave it untouched.
#[derive(Clone, Debug, Default)]
pub struct PipelineStateMachine {
    gate_policy: GatePolicy,
}

impl PipelineStateMachine {
    pub fn new(gate_policy: GatePolicy) -> Self {
        Self { gate_policy }
    }

    pub fn gate_policy(&self) -> GatePolicy {
        self.gate_policy
    }

    /// Record a gate review and report whether the initiative may advance.
    ///
    /// Fails without touching the initiative when no criteria are supplied or
    /// when the initiative is not in an active forward stage.
    pub fn evaluate_gate(
        &self,
        initiative: &mut Initiative,
        criteria: Vec<Criterion>,
    ) -> Result<GateEvaluation> {
        if criteria.is_empty() {
            return Err(PilotError::invalid("gate review needs at least one criterion"));
        }
        if initiative.stage.is_side_state() || initiative.is_terminal() {
            return Err(PilotError::invalid(format!(
                "gate review requires an active stage, initiative is {} / {}",
                initiative.stage, initiative.status
            )));
        }

        let criteria_total = criteria.len();
        let criteria_met = criteria.iter().filter(|c| c.status).count();
        let can_advance = match self.gate_policy {
            GatePolicy::AllCriteria => criteria_met == criteria_total,
            GatePolicy::RequiredOnly => criteria.iter().filter(|c| c.required).all(|c| c.status),
        };

        let evaluation = GateEvaluation {
            stage: initiative.stage,
            criteria,
            criteria_met,
            criteria_total,
            can_advance,
            evaluated_at: Utc::now(),
        };
        info!(
            initiative = %initiative.id,
            stage = %initiative.stage,
            criteria_met,
            criteria_total,
            can_advance,
            "Gate evaluated"
        );

        initiative.gate_history.push(evaluation.clone());
        initiative.touch();
        Ok(evaluation)
    }

    /// `proposed → approved`, making the initiative fundable.
    pub fn approve(&self, initiative: &mut Initiative) -> TransitionOutcome {
        if initiative.status != InitiativeStatus::Proposed {
            return TransitionOutcome::unchanged(
                initiative,
                format!(
                    "only proposed initiatives can be approved, status is {}",
                    initiative.status
                ),
            );
        }
        let stage = initiative.stage;
        self.apply(
            initiative,
            TransitionAction::Approved,
            stage,
            InitiativeStatus::Approved,
        )
    }

    /// Move to the next forward stage.
    ///
    /// Entering `development` marks the initiative running; entering `scale`
    /// marks it scaled.
    pub fn advance(&self, initiative: &mut Initiative) -> TransitionOutcome {
        if initiative.is_terminal() {
            return TransitionOutcome::unchanged(
                initiative,
                format!("status {} is terminal", initiative.status),
            );
        }
        let Some(next) = initiative.stage.next() else {
            return TransitionOutcome::unchanged(
                initiative,
                format!("no forward stage after {}", initiative.stage),
            );
        };

        let status = match next {
            PipelineStage::Development => InitiativeStatus::Running,
            PipelineStage::Scale => InitiativeStatus::Scaled,
            _ => initiative.status,
        };
        self.apply(initiative, TransitionAction::Advanced, next, status)
    }

    /// Park the initiative, remembering where it was.
    pub fn hold(&self, initiative: &mut Initiative) -> TransitionOutcome {
        if initiative.is_terminal() {
            return TransitionOutcome::unchanged(
                initiative,
                format!("status {} is terminal", initiative.status),
            );
        }
        if initiative.stage.is_side_state() {
            return TransitionOutcome::unchanged(
                initiative,
                format!("already in {}", initiative.stage),
            );
        }

        initiative.held_from = Some(HeldState {
            stage: initiative.stage,
            status: initiative.status,
        });
        self.apply(
            initiative,
            TransitionAction::Held,
            PipelineStage::Hold,
            InitiativeStatus::OnHold,
        )
    }

    /// Return a held initiative to the stage and status it had before `hold`.
    pub fn resume(&self, initiative: &mut Initiative) -> TransitionOutcome {
        let held = match (initiative.stage, initiative.held_from) {
            (PipelineStage::Hold, Some(held)) => held,
            _ => {
                return TransitionOutcome::unchanged(
                    initiative,
                    format!("not on hold, stage is {}", initiative.stage),
                )
            }
        };

        initiative.held_from = None;
        self.apply(initiative, TransitionAction::Resumed, held.stage, held.status)
    }

    /// Kill the initiative from any non-terminal state, releasing its
    /// allocation.
    pub fn kill(&self, initiative: &mut Initiative) -> TransitionOutcome {
        if initiative.is_terminal() || initiative.stage == PipelineStage::Killed {
            return TransitionOutcome::unchanged(
                initiative,
                format!("already ended ({} / {})", initiative.stage, initiative.status),
            );
        }

        self.apply(
            initiative,
            TransitionAction::Killed,
            PipelineStage::Killed,
            InitiativeStatus::Cancelled,
        )
    }

    fn apply(
        &self,
        initiative: &mut Initiative,
        action: TransitionAction,
        stage: PipelineStage,
        status: InitiativeStatus,
    ) -> TransitionOutcome {
        let outcome = TransitionOutcome {
            action,
            from_stage: initiative.stage,
            to_stage: stage,
            from_status: initiative.status,
            to_status: status,
            reason: None,
        };

        let now = Utc::now();
        if status == InitiativeStatus::Running && initiative.started_at.is_none() {
            initiative.started_at = Some(now);
        }
        if status.is_terminal() {
            if initiative.completed_at.is_none() {
                initiative.completed_at = Some(now);
            }
            initiative.held_from = None;
            initiative.resource_allocation = 0.0;
        }
        initiative.stage = stage;
        initiative.status = status;
        initiative.updated_at = now;

        info!(
            initiative = %initiative.id,
            action = ?action,
            from = %outcome.from_stage,
            to = %outcome.to_stage,
            status = %status,
            "Pipeline transition"
        );
        debug!(outcome = ?outcome, "Transition outcome");
        outcome
    }
}
