//! Stage-gate pipeline for initiatives.
//!
//! ```text
//! ideation → validation → development → launch → scale
//!     \           \            \           \
//!      └───────────┴────────────┴───────────┴──→ hold ⇄ (resume)
//!                                                  │
//!                  any stage ────────────────────→ killed
//! ```
//!
//! - [`PipelineStateMachine`] moves initiatives forward one stage at a time,
//!   parks them in `hold`, or kills them. It never moves backward.
//! - [`PipelineStateMachine::evaluate_gate`] aggregates externally supplied
//!   pass/fail criteria into a [`GateEvaluation`](pilot_types::GateEvaluation).
//! - [`go_no_go`] produces the launch-readiness verdict from required and
//!   optional criteria.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod go_no_go;
pub mod machine;

pub use go_no_go::{go_no_go, GoNoGoResult, Verdict};
pub use machine::{GatePolicy, PipelineStateMachine, TransitionAction, TransitionOutcome};
