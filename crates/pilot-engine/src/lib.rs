//! # pilot-engine
//!
//! Service facade over the pilot decision components.
//!
//! [`PortfolioService`] owns the configured components and a repository
//! ([`pilot_storage::PortfolioStore`]). Every per-initiative operation loads
//! the initiative, runs the pure component on a copy, and writes the copy back
//! only if the component succeeded, so a failed operation never leaves a
//! partial update behind. Mutations are serialized through one writer lock.
//!
//! ```toml
//! [allocation]
//! balance_tolerance_pct = 5.0
//!
//! [allocation.target]
//! core = 0.7
//! emerging = 0.2
//! future = 0.1
//!
//! [validation]
//! minimum_sample_size = 30
//! confidence = "p95"
//!
//! [pipeline]
//! gate_policy = "all_criteria"
//!
//! [decision]
//! scale_lift_threshold = 0.2
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod config;
pub mod error;
pub mod report;
pub mod service;
pub mod telemetry;

pub use config::{
    AllocationConfig, DecisionConfig, EngineConfig, LoggingConfig, PipelineConfig,
    ValidationConfig,
};
pub use error::{ConfigError, EngineError, EngineResult};
pub use report::{InitiativeReport, MetricProgress};
pub use service::{GateAdvance, PortfolioService};
pub use telemetry::init_tracing;
