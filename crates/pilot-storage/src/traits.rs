use std::collections::BTreeMap;

use async_trait::async_trait;
use pilot_types::{Initiative, InitiativeId};

use crate::model::{AllocationMode, Observation};
use crate::StorageResult;

/// Storage interface for initiatives.
#[async_trait]
pub trait InitiativeStore: Send + Sync {
    /// Insert a new initiative; fails with `Conflict` if the id exists.
    async fn create(&self, initiative: Initiative) -> StorageResult<()>;

    async fn get(&self, id: &InitiativeId) -> StorageResult<Option<Initiative>>;

    /// All initiatives, oldest first (ties by id).
    async fn list(&self) -> StorageResult<Vec<Initiative>>;

    /// Replace an existing initiative; fails with `NotFound` if absent.
    async fn update(&self, initiative: Initiative) -> StorageResult<()>;

    /// Set `resource_allocation` on every listed initiative in one step.
    ///
    /// Either every id resolves and all amounts are written, or nothing is.
    /// `mode` decides whether initiatives not in the map keep their current
    /// allocation or are reset to zero.
    async fn apply_allocations(
        &self,
        allocations: &BTreeMap<InitiativeId, f64>,
        mode: AllocationMode,
    ) -> StorageResult<()>;
}

/// Storage interface for raw metric samples.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Append observations for one initiative, all or none.
    async fn record_observations(
        &self,
        initiative_id: &InitiativeId,
        observations: Vec<Observation>,
    ) -> StorageResult<()>;

    /// Sample values for one metric in arrival order.
    async fn samples(&self, initiative_id: &InitiativeId, metric_name: &str)
        -> StorageResult<Vec<f64>>;

    /// Every observation for an initiative, grouped by metric name.
    async fn observations(
        &self,
        initiative_id: &InitiativeId,
    ) -> StorageResult<BTreeMap<String, Vec<Observation>>>;
}

/// Aggregate storage contract used by the portfolio service.
pub trait PortfolioStore: InitiativeStore + ObservationStore + Send + Sync {}

impl<T> PortfolioStore for T where T: InitiativeStore + ObservationStore + Send + Sync {}
