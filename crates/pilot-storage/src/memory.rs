//! In-memory reference implementation of the portfolio storage traits.
//!
//! Deterministic and test-friendly; every trait call takes its lock once, so
//! multi-record writes are never observed half-applied.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use pilot_types::{Initiative, InitiativeId};

use crate::model::{AllocationMode, Observation};
use crate::traits::{InitiativeStore, ObservationStore};
use crate::{StorageError, StorageResult};

type ObservationLog = BTreeMap<String, Vec<Observation>>;

/// In-memory portfolio storage adapter.
#[derive(Default)]
pub struct InMemoryPortfolioStore {
    initiatives: RwLock<HashMap<InitiativeId, Initiative>>,
    observations: RwLock<HashMap<InitiativeId, ObservationLog>>,
}

impl InMemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(what: &str) -> StorageError {
    StorageError::Backend(format!("{what} lock poisoned"))
}

fn missing(id: &InitiativeId) -> StorageError {
    StorageError::NotFound {
        entity: "initiative",
        id: id.to_string(),
    }
}

#[async_trait]
impl InitiativeStore for InMemoryPortfolioStore {
    async fn create(&self, initiative: Initiative) -> StorageResult<()> {
        let mut guard = self.initiatives.write().map_err(|_| poisoned("initiatives"))?;
        if guard.contains_key(&initiative.id) {
            return Err(StorageError::Conflict(format!(
                "initiative {} already exists",
                initiative.id
            )));
        }
        guard.insert(initiative.id, initiative);
        Ok(())
    }

    async fn get(&self, id: &InitiativeId) -> StorageResult<Option<Initiative>> {
        let guard = self.initiatives.read().map_err(|_| poisoned("initiatives"))?;
        Ok(guard.get(id).cloned())
    }

    async fn list(&self) -> StorageResult<Vec<Initiative>> {
        let guard = self.initiatives.read().map_err(|_| poisoned("initiatives"))?;
        let mut values = guard.values().cloned().collect::<Vec<_>>();
        values.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(values)
    }

    async fn update(&self, initiative: Initiative) -> StorageResult<()> {
        let mut guard = self.initiatives.write().map_err(|_| poisoned("initiatives"))?;
        let slot = guard.get_mut(&initiative.id).ok_or_else(|| missing(&initiative.id))?;
        *slot = initiative;
        Ok(())
    }

    async fn apply_allocations(
        &self,
        allocations: &BTreeMap<InitiativeId, f64>,
        mode: AllocationMode,
    ) -> StorageResult<()> {
        let mut guard = self.initiatives.write().map_err(|_| poisoned("initiatives"))?;
        for (id, amount) in allocations {
            if !guard.contains_key(id) {
                return Err(missing(id));
            }
            if !(amount.is_finite() && *amount >= 0.0) {
                return Err(StorageError::InvalidInput(format!(
                    "allocation {amount} for initiative {id}"
                )));
            }
        }

        let now = Utc::now();
        for (id, initiative) in guard.iter_mut() {
            let amount = match (allocations.get(id), mode) {
                (Some(amount), _) => *amount,
                (None, AllocationMode::Replace) => 0.0,
                (None, AllocationMode::Merge) => continue,
            };
            if initiative.resource_allocation != amount {
                initiative.resource_allocation = amount;
                initiative.updated_at = now;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ObservationStore for InMemoryPortfolioStore {
    async fn record_observations(
        &self,
        initiative_id: &InitiativeId,
        observations: Vec<Observation>,
    ) -> StorageResult<()> {
        if let Some(bad) = observations
            .iter()
            .find(|o| o.metric_name.trim().is_empty() || !o.value.is_finite())
        {
            return Err(StorageError::InvalidInput(format!(
                "observation '{}' = {} rejected",
                bad.metric_name, bad.value
            )));
        }

        let mut guard = self.observations.write().map_err(|_| poisoned("observations"))?;
        let log = guard.entry(*initiative_id).or_default();
        for observation in observations {
            log.entry(observation.metric_name.clone())
                .or_default()
                .push(observation);
        }
        Ok(())
    }

    async fn samples(
        &self,
        initiative_id: &InitiativeId,
        metric_name: &str,
    ) -> StorageResult<Vec<f64>> {
        let guard = self.observations.read().map_err(|_| poisoned("observations"))?;
        Ok(guard
            .get(initiative_id)
            .and_then(|log| log.get(metric_name))
            .map(|obs| obs.iter().map(|o| o.value).collect())
            .unwrap_or_default())
    }

    async fn observations(&self, initiative_id: &InitiativeId) -> StorageResult<ObservationLog> {
        let guard = self.observations.read().map_err(|_| poisoned("observations"))?;
        Ok(guard.get(initiative_id).cloned().unwrap_or_default())
    }
}
