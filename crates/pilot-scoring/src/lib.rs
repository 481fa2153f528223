//! Scoring for candidate initiatives.
//!
//! Three heuristics, all pure and infallible:
//! - **ICE**: mean of impact, confidence and ease ([`ScoringEngine::compute_ice`])
//! - **RICE**: `reach × impact × confidence% / effort` ([`ScoringEngine::compute_rice`])
//! - **Priority**: fixed-weight blend of strategic fit, ROI potential, inverted
//!   risk and resource availability ([`ScoringEngine::compute_priority`])
//!
//! Inputs outside their documented ranges are accepted and computed as given;
//! range checking is the caller's job. Each score is classified into a
//! [`ScoreTier`](pilot_types::ScoreTier) by [`tier`].

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod engine;
pub mod roi;
pub mod tier;

pub use engine::{
    IceInputs, PriorityInputs, RiceInputs, ScoreRequest, ScoringEngine, PRIORITY_WEIGHTS,
};
pub use roi::RoiSummary;
