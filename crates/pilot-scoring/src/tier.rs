//! Tier thresholds.
//!
//! Priority and ICE are bounded, so they share the 80/65/50 cut-offs (ICE on
//! its ×10 scale). RICE is unbounded above and uses 100/50/20.

use pilot_types::ScoreTier;

const PRIORITY_CRITICAL: f64 = 80.0;
const PRIORITY_HIGH: f64 = 65.0;
const PRIORITY_MEDIUM: f64 = 50.0;

const RICE_CRITICAL: f64 = 100.0;
const RICE_HIGH: f64 = 50.0;
const RICE_MEDIUM: f64 = 20.0;

pub fn priority_tier(score: f64) -> ScoreTier {
    banded(score, PRIORITY_CRITICAL, PRIORITY_HIGH, PRIORITY_MEDIUM)
}

pub fn ice_tier(score: f64) -> ScoreTier {
    priority_tier(score * 10.0)
}

pub fn rice_tier(score: f64) -> ScoreTier {
    banded(score, RICE_CRITICAL, RICE_HIGH, RICE_MEDIUM)
}

fn banded(score: f64, critical: f64, high: f64, medium: f64) -> ScoreTier {
    if score >= critical {
        ScoreTier::Critical
    } else if score >= high {
        ScoreTier::High
    } else if score >= medium {
        ScoreTier::Medium
    } else {
        ScoreTier::Low
    }
}
