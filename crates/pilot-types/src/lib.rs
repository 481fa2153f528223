//! # pilot-types
//!
//! Shared data model for the pilot portfolio engine.
//!
//! An [`Initiative`] (a "pilot") carries everything the decision components
//! read and write:
//!
//! - **Scores**: [`IceScore`], [`RiceScore`] and [`PriorityScore`], computed by the
//!   scoring engine and stored as immutable snapshots
//! - **ROI inputs**: [`RoiMetrics`] with its derived return, payback and NPV figures
//! - **Evidence**: [`Metric`]s with baseline/current/target, [`Risk`]s, and the
//!   [`GateEvaluation`] history of the stage-gate pipeline
//! - **Lifecycle**: [`PipelineStage`], [`InitiativeStatus`] and the terminal
//!   [`DecisionKind`]
//!
//! All enums are closed and serialize as snake_case string tags; timestamps are
//! ISO-8601 via `chrono`.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod criteria;
pub mod enums;
pub mod error;
pub mod ids;
pub mod initiative;
pub mod metric;
pub mod risk;
pub mod roi;
pub mod scores;

pub use criteria::{Criterion, GateEvaluation, GoNoGoCriterion};
pub use enums::{DecisionKind, Horizon, InitiativeStatus, MetricKind, PipelineStage};
pub use error::{PilotError, Result};
pub use ids::{InitiativeId, RiskId};
pub use initiative::{HeldState, Initiative};
pub use metric::Metric;
pub use risk::{Risk, RiskCategory, RiskStatus};
pub use roi::RoiMetrics;
pub use scores::{IceScore, PriorityScore, RiceScore, ScoreTier};
