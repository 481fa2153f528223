use std::collections::BTreeMap;

use pilot_types::{Horizon, Initiative, PilotError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::plan::{AllocationPlan, HorizonAllocation, InitiativeAllocation};
use crate::target::TargetAllocation;

/// A horizon is balanced when its share is within this many percentage points of target.
pub const DEFAULT_BALANCE_TOLERANCE_PCT: f64 = 5.0;

/// Optional narrowing of an allocation pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationConstraints {
    /// Overrides the allocator's configured split.
    #[serde(default)]
    pub target: Option<TargetAllocation>,
    /// Upper bound on any single grant, as a fraction of the total budget.
    #[serde(default)]
    pub max_share_per_initiative: Option<f64>,
    /// Initiatives scoring below this are not funded.
    #[serde(default)]
    pub min_priority_score: Option<f64>,
    /// Only these horizons are funded; others still appear with zero totals.
    #[serde(default)]
    pub horizons: Option<Vec<Horizon>>,
}

impl AllocationConstraints {
    fn validate(&self) -> Result<()> {
        if let Some(target) = &self.target {
            target.validate()?;
        }
        if let Some(share) = self.max_share_per_initiative {
            if !(share > 0.0 && share <= 1.0) {
                return Err(PilotError::invalid(format!(
                    "max_share_per_initiative {share} outside (0, 1]"
                )));
            }
        }
        if let Some(min) = self.min_priority_score {
            if !min.is_finite() {
                return Err(PilotError::invalid("min_priority_score is not finite"));
            }
        }
        Ok(())
    }

    fn admits(&self, initiative: &Initiative) -> bool {
        let horizon_ok = self
            .horizons
            .as_ref()
            .map_or(true, |hs| hs.contains(&initiative.horizon));
        let score_ok = self
            .min_priority_score
            .map_or(true, |min| initiative.priority_score() >= min);
        horizon_ok && score_ok
    }
}

/// Greedy, priority-ordered allocator over the three horizons.
#[derive(Clone, Debug, PartialEq)]
pub struct PortfolioAllocator {
    target: TargetAllocation,
    balance_tolerance_pct: f64,
}

impl PortfolioAllocator {
    pub fn new(target: TargetAllocation, balance_tolerance_pct: f64) -> Result<Self> {
        target.validate()?;
        if !(balance_tolerance_pct >= 0.0) {
            return Err(PilotError::invalid(format!(
                "balance tolerance {balance_tolerance_pct} must be non-negative"
            )));
        }
        Ok(Self {
            target,
            balance_tolerance_pct,
        })
    }

    pub fn target(&self) -> &TargetAllocation {
        &self.target
    }

    /// Allocate across the fundable initiatives with the configured split.
    pub fn allocate(&self, total_resources: f64, initiatives: &[Initiative]) -> Result<AllocationPlan> {
        self.allocate_with(total_resources, initiatives, &AllocationConstraints::default())
    }

    /// Allocate with additional constraints.
    ///
    /// Initiatives that are not `approved`/`running` are ignored. Fails on a
    /// non-positive budget, invalid constraints, or a negative or non-finite
    /// request.
    pub fn allocate_with(
        &self,
        total_resources: f64,
        initiatives: &[Initiative],
        constraints: &AllocationConstraints,
    ) -> Result<AllocationPlan> {
        if !(total_resources > 0.0 && total_resources.is_finite()) {
            return Err(PilotError::invalid(format!(
                "total resources must be positive, got {total_resources}"
            )));
        }
        constraints.validate()?;
        let target = constraints.target.unwrap_or(self.target);
        let per_initiative_cap = constraints
            .max_share_per_initiative
            .map_or(f64::INFINITY, |share| share * total_resources);

        let mut by_horizon: BTreeMap<Horizon, Vec<&Initiative>> = BTreeMap::new();
        for initiative in initiatives
            .iter()
            .filter(|i| i.status.is_fundable() && constraints.admits(i))
        {
            let requested = initiative.requested_resources;
            if !(requested >= 0.0 && requested.is_finite()) {
                return Err(PilotError::invalid(format!(
                    "initiative {} requests {requested}",
                    initiative.id
                )));
            }
            by_horizon.entry(initiative.horizon).or_default().push(initiative);
        }

        let mut remaining_pool = total_resources;
        let mut allocations = Vec::new();
        let mut horizons = BTreeMap::new();

        for horizon in Horizon::ALL {
            let fraction = target.fraction(horizon);
            let cap = total_resources * fraction;
            let mut remaining_cap = cap;
            let mut ranked = by_horizon.remove(&horizon).unwrap_or_default();
            rank(&mut ranked);

            let mut allocated_in_horizon = 0.0;
            for (index, initiative) in ranked.iter().enumerate() {
                let grant = if remaining_cap > 0.0 && remaining_pool > 0.0 {
                    initiative
                        .requested_resources
                        .min(remaining_cap)
                        .min(remaining_pool)
                        .min(per_initiative_cap)
                } else {
                    0.0
                };
                remaining_cap -= grant;
                remaining_pool -= grant;
                allocated_in_horizon += grant;

                debug!(
                    initiative = %initiative.id,
                    horizon = %horizon,
                    rank = index + 1,
                    requested = initiative.requested_resources,
                    granted = grant,
                    "Allocation granted"
                );
                allocations.push(InitiativeAllocation {
                    initiative_id: initiative.id,
                    horizon,
                    rank: index + 1,
                    priority_score: initiative.priority_score(),
                    requested: initiative.requested_resources,
                    allocated: grant,
                });
            }

            let actual_percent = allocated_in_horizon / total_resources * 100.0;
            info!(
                horizon = %horizon,
                cap,
                allocated = allocated_in_horizon,
                actual_percent,
                initiatives = ranked.len(),
                "Horizon allocated"
            );
            horizons.insert(
                horizon,
                HorizonAllocation {
                    horizon,
                    target_fraction: fraction,
                    cap,
                    allocated: allocated_in_horizon,
                    actual_percent,
                    target_percent: fraction * 100.0,
                    initiatives: ranked.len(),
                },
            );
        }

        let total_allocated: f64 = horizons.values().map(|h| h.allocated).sum();
        let is_balanced = horizons
            .values()
            .all(|h| h.deviation_percent().abs() <= self.balance_tolerance_pct);

        Ok(AllocationPlan {
            total_resources,
            allocations,
            horizons,
            total_allocated,
            unallocated: (total_resources - total_allocated).max(0.0),
            balance_tolerance_pct: self.balance_tolerance_pct,
            is_balanced,
        })
    }
}

impl Default for PortfolioAllocator {
    fn default() -> Self {
        Self {
            target: TargetAllocation::default(),
            balance_tolerance_pct: DEFAULT_BALANCE_TOLERANCE_PCT,
        }
    }
}

/// Descending priority; earlier creation, then lower id, wins ties.
fn rank(initiatives: &mut [&Initiative]) {
    initiatives.sort_by(|a, b| {
        b.priority_score()
            .total_cmp(&a.priority_score())
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}
