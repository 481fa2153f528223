use chrono::Utc;
use pilot_types::{DecisionKind, Initiative, Metric, MetricKind, PilotError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::playbook::playbook;
use crate::report::DecisionReport;

pub const PRIMARY_WEIGHT: f64 = 0.7;
pub const SECONDARY_WEIGHT: f64 = 0.3;
pub const DEFAULT_SCALE_LIFT_THRESHOLD: f64 = 0.20;

/// Band lower bounds in whole percent of the success score.
const SUCCESS_PERCENT: u64 = 70;
const ITERATE_PERCENT: u64 = 40;
const PIVOT_PERCENT: u64 = 20;

/// Absorbs rounding in float scores that should sit exactly on a band edge.
const SCORE_TOLERANCE: f64 = 1e-9;

/// Met/total counts for primary and secondary criteria.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaTally {
    pub primary_met: usize,
    pub primary_total: usize,
    pub secondary_met: usize,
    pub secondary_total: usize,
}

impl CriteriaTally {
    /// Lagging metrics count as primary, leading as secondary.
    pub fn from_metrics(metrics: &[Metric]) -> Self {
        metrics.iter().fold(Self::default(), |mut tally, m| {
            let met = usize::from(m.on_track());
            match m.kind {
                MetricKind::Lagging => {
                    tally.primary_total += 1;
                    tally.primary_met += met;
                }
                MetricKind::Leading => {
                    tally.secondary_total += 1;
                    tally.secondary_met += met;
                }
            }
            tally
        })
    }

    pub fn primary_rate(&self) -> f64 {
        ratio(self.primary_met, self.primary_total)
    }

    pub fn secondary_rate(&self) -> f64 {
        ratio(self.secondary_met, self.secondary_total)
    }

    pub fn success_score(&self) -> f64 {
        PRIMARY_WEIGHT * self.primary_rate() + SECONDARY_WEIGHT * self.secondary_rate()
    }

    /// Whether the success score is at least `percent`/100, decided on the
    /// exact fractions rather than the rounded float.
    ///
    /// `0.7·pm/pt + 0.3·sm/st ≥ k/100` is compared as
    /// `70·pm·st + 30·sm·pt ≥ k·pt·st`, with an empty side contributing 0.
    pub fn meets(&self, percent: u64) -> bool {
        let (pm, pt) = exact_side(self.primary_met, self.primary_total);
        let (sm, st) = exact_side(self.secondary_met, self.secondary_total);
        70 * pm * st + 30 * sm * pt >= u128::from(percent) * pt * st
    }
}

fn exact_side(met: usize, total: usize) -> (u128, u128) {
    if total == 0 {
        (0, 1)
    } else {
        (met.min(total) as u128, total as u128)
    }
}

fn ratio(met: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        met as f64 / total as f64
    }
}

/// Maps validated evidence to a [`DecisionKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionEngine {
    scale_lift_threshold: f64,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self {
            scale_lift_threshold: DEFAULT_SCALE_LIFT_THRESHOLD,
        }
    }
}

impl DecisionEngine {
    pub fn new(scale_lift_threshold: f64) -> Result<Self> {
        if !scale_lift_threshold.is_finite() {
            return Err(PilotError::invalid("scale lift threshold must be finite"));
        }
        Ok(Self {
            scale_lift_threshold,
        })
    }

    pub fn scale_lift_threshold(&self) -> f64 {
        self.scale_lift_threshold
    }

    /// Mean `(current − baseline)/|baseline|` over primary metrics that have
    /// a measurement and a non-zero baseline; 0 when none qualify.
    pub fn primary_lift(metrics: &[Metric]) -> f64 {
        let lifts: Vec<f64> = metrics
            .iter()
            .filter(|m| m.kind == MetricKind::Lagging)
            .filter_map(Metric::relative_lift)
            .collect();
        if lifts.is_empty() {
            0.0
        } else {
            lifts.iter().sum::<f64>() / lifts.len() as f64
        }
    }

    /// Band a precomputed score. Scores within `1e-9` below a band edge
    /// count as on it.
    pub fn decide(&self, success_score: f64, primary_lift: f64) -> DecisionKind {
        self.pick(
            |percent| success_score + SCORE_TOLERANCE >= percent as f64 / 100.0,
            primary_lift,
        )
    }

    /// Band a tally exactly.
    pub fn decide_tally(&self, tally: &CriteriaTally, primary_lift: f64) -> DecisionKind {
        self.pick(|percent| tally.meets(percent), primary_lift)
    }

    fn pick(&self, reaches: impl Fn(u64) -> bool, primary_lift: f64) -> DecisionKind {
        if reaches(SUCCESS_PERCENT) {
            if primary_lift > self.scale_lift_threshold {
                DecisionKind::Scale
            } else {
                DecisionKind::Persevere
            }
        } else if reaches(ITERATE_PERCENT) {
            DecisionKind::Iterate
        } else if reaches(PIVOT_PERCENT) {
            DecisionKind::Pivot
        } else {
            DecisionKind::Terminate
        }
    }

    /// Decide from explicit counts, for callers that evaluate criteria themselves.
    pub fn evaluate_tally(
        &self,
        tally: CriteriaTally,
        primary_lift: f64,
        evidence: Vec<String>,
    ) -> DecisionReport {
        let success_score = tally.success_score();
        let decision = self.decide_tally(&tally, primary_lift);
        let entry = playbook(decision);
        debug!(
            success_score,
            primary_lift,
            decision = %decision,
            "Decision computed"
        );
        DecisionReport {
            decision,
            success_score,
            primary_met: tally.primary_met,
            primary_total: tally.primary_total,
            secondary_met: tally.secondary_met,
            secondary_total: tally.secondary_total,
            primary_lift,
            rationale: entry.render_rationale(success_score, primary_lift),
            next_actions: entry.next_actions(),
            evidence,
        }
    }

    /// Recommend a decision from the initiative's current metric values.
    pub fn evaluate(&self, initiative: &Initiative) -> DecisionReport {
        let tally = CriteriaTally::from_metrics(&initiative.metrics);
        let lift = Self::primary_lift(&initiative.metrics);
        let report = self.evaluate_tally(tally, lift, initiative.learnings.clone());
        info!(
            initiative = %initiative.id,
            decision = %report.decision,
            success_score = report.success_score,
            "Initiative evaluated"
        );
        report
    }

    /// Record the decision and move the status it implies.
    ///
    /// `iterate` records the decision but leaves the status alone. A terminal
    /// outcome releases the allocation. Fails with `Conflict` if the initiative
    /// has already reached a terminal status, and with `InvalidArgument` while
    /// it sits in `hold` or `killed`.
    pub fn apply(&self, initiative: &mut Initiative, report: &DecisionReport) -> Result<()> {
        if initiative.is_terminal() {
            return Err(PilotError::Conflict(format!(
                "initiative {} is already {}",
                initiative.id, initiative.status
            )));
        }
        if initiative.stage.is_side_state() {
            return Err(PilotError::invalid(format!(
                "initiative {} is in {}; resume it before deciding",
                initiative.id, initiative.stage
            )));
        }

        initiative.decision = Some(report.decision);
        if let Some(status) = report.decision.resulting_status() {
            initiative.status = status;
            if status.is_terminal() {
                if initiative.completed_at.is_none() {
                    initiative.completed_at = Some(Utc::now());
                }
                initiative.held_from = None;
                initiative.resource_allocation = 0.0;
            }
        }
        initiative.touch();
        info!(
            initiative = %initiative.id,
            decision = %report.decision,
            status = %initiative.status,
            "Decision applied"
        );
        Ok(())
    }

    pub fn add_learning(initiative: &mut Initiative, learning: impl Into<String>) -> Result<()> {
        let learning = learning.into();
        if learning.trim().is_empty() {
            return Err(PilotError::invalid("learning must not be blank"));
        }
        initiative.learnings.push(learning);
        initiative.touch();
        Ok(())
    }
}
