//! Statistical validation of observed metrics.
//!
//! For each metric the validator computes the sample mean, the sample standard
//! deviation (n−1 denominator) and a two-sided normal-approximation confidence
//! interval `mean ± z·stdev/√n`, then checks where the metric's target falls.
//!
//! `z` comes from a fixed two-entry table ([`ConfidenceLevel`]): 1.96 at 95%
//! and 2.58 at 99%. This is not a Student-t interval, so small samples get
//! intervals that are too narrow; the `adequate_sample` flag exists to make
//! that visible.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod summary;
pub mod validator;

pub use summary::SampleStats;
pub use validator::{
    ConfidenceLevel, MetricValidation, StatisticalValidator, ValidationReport, ValidationStatus,
    DEFAULT_MINIMUM_SAMPLE_SIZE,
};
