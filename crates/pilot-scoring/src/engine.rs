use pilot_types::{IceScore, Initiative, PriorityScore, RiceScore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tier::{ice_tier, priority_tier, rice_tier};

/// Weights of the priority composite, in input order:
/// strategic fit, ROI potential, inverted risk, resource availability.
pub const PRIORITY_WEIGHTS: [f64; 4] = [0.30, 0.25, 0.20, 0.25];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IceInputs {
    pub impact: f64,
    pub confidence: f64,
    pub ease: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiceInputs {
    pub reach: f64,
    pub impact: f64,
    pub confidence: f64,
    pub effort: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriorityInputs {
    pub strategic_fit: f64,
    pub roi_potential: f64,
    pub risk_level: f64,
    pub resource_availability: f64,
}

/// A batch of score inputs for one initiative. Absent parts leave the
/// existing snapshot untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub ice: Option<IceInputs>,
    #[serde(default)]
    pub rice: Option<RiceInputs>,
    #[serde(default)]
    pub priority: Option<PriorityInputs>,
}

impl ScoreRequest {
    pub fn is_empty(&self) -> bool {
        self.ice.is_none() && self.rice.is_none() && self.priority.is_none()
    }
}

/// Stateless scoring functions.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Arithmetic mean of the three ICE inputs.
    pub fn compute_ice(impact: f64, confidence: f64, ease: f64) -> IceScore {
        let score = (impact + confidence + ease) / 3.0;
        IceScore {
            impact,
            confidence,
            ease,
            score,
            tier: ice_tier(score),
        }
    }

    /// `reach × impact × (confidence / 100) / effort`, or 0 when `effort <= 0`.
    pub fn compute_rice(reach: f64, impact: f64, confidence: f64, effort: f64) -> RiceScore {
        let score = if effort > 0.0 {
            reach * impact * (confidence / 100.0) / effort
        } else {
            0.0
        };
        RiceScore {
            reach,
            impact,
            confidence,
            effort,
            score,
            tier: rice_tier(score),
        }
    }

    /// Weighted priority composite. Risk is inverted so low risk scores high.
    pub fn compute_priority(
        strategic_fit: f64,
        roi_potential: f64,
        risk_level: f64,
        resource_availability: f64,
    ) -> PriorityScore {
        let [w_fit, w_roi, w_risk, w_res] = PRIORITY_WEIGHTS;
        let score = w_fit * strategic_fit
            + w_roi * roi_potential
            + w_risk * (100.0 - risk_level)
            + w_res * resource_availability;
        PriorityScore {
            strategic_fit,
            roi_potential,
            risk_level,
            resource_availability,
            score,
            tier: priority_tier(score),
        }
    }

    /// Recompute the requested snapshots on an initiative.
    pub fn apply(request: &ScoreRequest, initiative: &mut Initiative) {
        if let Some(i) = request.ice {
            initiative.ice = Some(Self::compute_ice(i.impact, i.confidence, i.ease));
        }
        if let Some(r) = request.rice {
            initiative.rice = Some(Self::compute_rice(r.reach, r.impact, r.confidence, r.effort));
        }
        if let Some(p) = request.priority {
            initiative.priority = Some(Self::compute_priority(
                p.strategic_fit,
                p.roi_potential,
                p.risk_level,
                p.resource_availability,
            ));
        }
        debug!(
            initiative = %initiative.id,
            priority = initiative.priority_score(),
            "Scores recomputed"
        );
    }
}
