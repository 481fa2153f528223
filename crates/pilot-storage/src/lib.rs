//! Repository boundary for the pilot portfolio engine.
//!
//! Decision components never reach into a registry themselves; the service
//! layer reads initiatives through [`InitiativeStore`], hands them to the pure
//! components, and writes results back.
//!
//! - [`InitiativeStore`]: create/get/list/update plus a single-step
//!   allocation write so a whole plan lands at once, either merged over the
//!   current allocations or replacing all of them ([`AllocationMode`])
//! - [`ObservationStore`]: raw metric samples per initiative
//!
//! [`memory::InMemoryPortfolioStore`] is the reference adapter.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
pub mod memory;
mod model;
mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryPortfolioStore;
pub use model::{AllocationMode, Observation};
pub use traits::{InitiativeStore, ObservationStore, PortfolioStore};
