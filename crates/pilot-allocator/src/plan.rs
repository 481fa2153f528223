use std::collections::BTreeMap;

use pilot_types::{Horizon, InitiativeId};
use serde::{Deserialize, Serialize};

/// What one initiative asked for and received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitiativeAllocation {
    pub initiative_id: InitiativeId,
    pub horizon: Horizon,
    /// 1-based position within the horizon's ranking.
    pub rank: usize,
    pub priority_score: f64,
    pub requested: f64,
    pub allocated: f64,
}

impl InitiativeAllocation {
    pub fn fully_funded(&self) -> bool {
        self.allocated >= self.requested
    }
}

/// Per-horizon totals against the target split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HorizonAllocation {
    pub horizon: Horizon,
    pub target_fraction: f64,
    pub cap: f64,
    pub allocated: f64,
    /// Allocated share of the total budget, in percent.
    pub actual_percent: f64,
    pub target_percent: f64,
    pub initiatives: usize,
}

impl HorizonAllocation {
    pub fn deviation_percent(&self) -> f64 {
        self.actual_percent - self.target_percent
    }

    pub fn remaining_cap(&self) -> f64 {
        (self.cap - self.allocated).max(0.0)
    }
}

/// A complete allocation pass over one portfolio snapshot.
///
/// Contains no wall-clock data, so identical snapshots produce identical plans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub total_resources: f64,
    /// Horizon order, then rank order.
    pub allocations: Vec<InitiativeAllocation>,
    pub horizons: BTreeMap<Horizon, HorizonAllocation>,
    pub total_allocated: f64,
    pub unallocated: f64,
    pub balance_tolerance_pct: f64,
    pub is_balanced: bool,
}

impl AllocationPlan {
    pub fn allocation_for(&self, id: &InitiativeId) -> Option<f64> {
        self.allocations
            .iter()
            .find(|a| &a.initiative_id == id)
            .map(|a| a.allocated)
    }

    pub fn horizon(&self, horizon: Horizon) -> Option<&HorizonAllocation> {
        self.horizons.get(&horizon)
    }

    /// Allocated amount per initiative, ready to be applied in one write.
    pub fn as_map(&self) -> BTreeMap<InitiativeId, f64> {
        self.allocations
            .iter()
            .map(|a| (a.initiative_id, a.allocated))
            .collect()
    }
}
