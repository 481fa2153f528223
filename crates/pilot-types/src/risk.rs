use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RiskId;

/// Broad source of a risk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Technical,
    Market,
    Operational,
    Financial,
    Regulatory,
    Organizational,
    Other,
}

/// Where a risk sits in its mitigation lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Identified,
    Mitigating,
    Accepted,
    Closed,
}

/// A recorded risk against an initiative.
///
/// `probability` and `impact` are expected in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: RiskId,
    pub description: String,
    pub probability: f64,
    pub impact: f64,
    pub category: RiskCategory,
    pub mitigation_plan: String,
    pub owner: String,
    pub status: RiskStatus,
    pub identified_at: DateTime<Utc>,
}

impl Risk {
    pub fn new(description: impl Into<String>, probability: f64, impact: f64) -> Self {
        Self {
            id: RiskId::new(),
            description: description.into(),
            probability,
            impact,
            category: RiskCategory::Other,
            mitigation_plan: String::new(),
            owner: String::new(),
            status: RiskStatus::Identified,
            identified_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: RiskCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_mitigation(mut self, plan: impl Into<String>) -> Self {
        self.mitigation_plan = plan.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_status(mut self, status: RiskStatus) -> Self {
        self.status = status;
        self
    }
}
