//! Risk register for initiatives.
//!
//! Severity is `probability × impact`. Severities fall into five half-open
//! bands ([`SeverityBand`]); only the top band includes its upper bound.
//! Risks are never removed by the register itself.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod band;
pub mod register;

pub use band::SeverityBand;
pub use register::{RankedRisk, RiskMatrix, RiskRegister, DEFAULT_TOP_N};
