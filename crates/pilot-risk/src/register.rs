use std::collections::BTreeMap;

use pilot_types::{Initiative, PilotError, Result, Risk, RiskId, RiskStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::band::SeverityBand;

/// Default length of the mitigation shortlist.
pub const DEFAULT_TOP_N: usize = 5;

/// A risk with its computed severity, as shown in mitigation lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedRisk {
    pub risk_id: RiskId,
    pub description: String,
    pub severity: f64,
    pub band: SeverityBand,
    pub owner: String,
    pub mitigation_plan: String,
    pub status: RiskStatus,
}

/// Aggregate risk picture for one initiative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskMatrix {
    pub total: usize,
    pub overall_risk: f64,
    pub overall_band: SeverityBand,
    /// Most severe band any single risk falls in.
    pub highest_band: Option<SeverityBand>,
    pub counts: BTreeMap<SeverityBand, usize>,
    pub top_risks: Vec<RankedRisk>,
}

/// Probability × impact risk model.
pub struct RiskRegister;

impl RiskRegister {
    pub fn severity(risk: &Risk) -> f64 {
        risk.probability * risk.impact
    }

    pub fn classify(risk: &Risk) -> SeverityBand {
        SeverityBand::from_severity(Self::severity(risk))
    }

    /// Validate and append a risk, returning the updated list.
    ///
    /// Rejects empty descriptions and probabilities or impacts outside
    /// `[0, 1]`; the initiative is untouched on error.
    pub fn add_risk(initiative: &mut Initiative, risk: Risk) -> Result<&[Risk]> {
        Self::validate(&risk)?;
        if initiative.risks.iter().any(|r| r.id == risk.id) {
            return Err(PilotError::Conflict(format!(
                "risk {} already recorded on initiative {}",
                risk.id, initiative.id
            )));
        }

        let band = Self::classify(&risk);
        if band >= SeverityBand::High {
            warn!(
                initiative = %initiative.id,
                risk = %risk.id,
                severity = Self::severity(&risk),
                band = %band,
                "High-severity risk recorded"
            );
        } else {
            debug!(initiative = %initiative.id, risk = %risk.id, band = %band, "Risk recorded");
        }

        initiative.risks.push(risk);
        initiative.touch();
        Ok(&initiative.risks)
    }

    /// Mean severity over all recorded risks; 0 with none.
    pub fn overall_risk(initiative: &Initiative) -> f64 {
        if initiative.risks.is_empty() {
            return 0.0;
        }
        let total: f64 = initiative.risks.iter().map(Self::severity).sum();
        total / initiative.risks.len() as f64
    }

    /// The `top_n` most severe risks, most severe first. Ties keep recording order.
    pub fn prioritize_mitigation(initiative: &Initiative, top_n: usize) -> Vec<RankedRisk> {
        let mut ranked: Vec<RankedRisk> = initiative.risks.iter().map(Self::rank).collect();
        ranked.sort_by(|a, b| b.severity.total_cmp(&a.severity));
        ranked.truncate(top_n);
        ranked
    }

    pub fn matrix(initiative: &Initiative, top_n: usize) -> RiskMatrix {
        let mut counts: BTreeMap<SeverityBand, usize> =
            SeverityBand::ALL.iter().map(|b| (*b, 0)).collect();
        for risk in &initiative.risks {
            *counts.entry(Self::classify(risk)).or_default() += 1;
        }
        let highest_band = initiative.risks.iter().map(Self::classify).max();
        let overall_risk = Self::overall_risk(initiative);

        RiskMatrix {
            total: initiative.risks.len(),
            overall_risk,
            overall_band: SeverityBand::from_severity(overall_risk),
            highest_band,
            counts,
            top_risks: Self::prioritize_mitigation(initiative, top_n),
        }
    }

    fn rank(risk: &Risk) -> RankedRisk {
        RankedRisk {
            risk_id: risk.id,
            description: risk.description.clone(),
            severity: Self::severity(risk),
            band: Self::classify(risk),
            owner: risk.owner.clone(),
            mitigation_plan: risk.mitigation_plan.clone(),
            status: risk.status,
        }
    }

    fn validate(risk: &Risk) -> Result<()> {
        if risk.description.trim().is_empty() {
            return Err(PilotError::invalid("risk description is empty"));
        }
        for (field, value) in [("probability", risk.probability), ("impact", risk.impact)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PilotError::invalid(format!(
                    "risk {field} {value} outside [0, 1]"
                )));
            }
        }
        Ok(())
    }
}
