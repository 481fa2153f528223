//! Computed score snapshots.
//!
//! Each snapshot stores its inputs next to the composite so a report can show
//! how the number was reached. Snapshots are replaced, never edited, when the
//! inputs change.

use serde::{Deserialize, Serialize};

/// Priority tier derived from a composite score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Low,
    Medium,
    High,
    Critical,
}

/// Impact-Confidence-Ease score; inputs nominally in `[1, 10]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IceScore {
    pub impact: f64,
    pub confidence: f64,
    pub ease: f64,
    pub score: f64,
    pub tier: ScoreTier,
}

/// Reach-Impact-Confidence-Effort score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiceScore {
    /// Count per period.
    pub reach: f64,
    /// Conventionally one of 0.25, 0.5, 1, 2, 3.
    pub impact: f64,
    /// Percentage, 0-100.
    pub confidence: f64,
    /// Person-time units.
    pub effort: f64,
    pub score: f64,
    pub tier: ScoreTier,
}

/// Weighted four-factor priority score; inputs in `[0, 100]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriorityScore {
    pub strategic_fit: f64,
    pub roi_potential: f64,
    pub risk_level: f64,
    pub resource_availability: f64,
    pub score: f64,
    pub tier: ScoreTier,
}
