//! Terminal recommendations for an initiative.
//!
//! The success score weights primary (lagging) metrics at 70% and secondary
//! (leading) metrics at 30%:
//!
//! ```text
//! success = 0.7 × primary_met/primary_total + 0.3 × secondary_met/secondary_total
//! ```
//!
//! | success score | decision |
//! |---|---|
//! | ≥ 0.70 | `scale` when primary lift exceeds the threshold, else `persevere` |
//! | 0.40 – 0.70 | `iterate` |
//! | 0.20 – 0.40 | `pivot` |
//! | < 0.20 | `terminate` |
//!
//! Rationale and next actions come from a fixed [`playbook`].

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod engine;
pub mod playbook;
pub mod report;

pub use engine::{
    CriteriaTally, DecisionEngine, DEFAULT_SCALE_LIFT_THRESHOLD, PRIMARY_WEIGHT, SECONDARY_WEIGHT,
};
pub use playbook::{playbook, Playbook};
pub use report::DecisionReport;
