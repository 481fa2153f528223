//! Shared fixtures for the conformance suites.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pilot_scoring::ScoringEngine;
use pilot_types::{Horizon, Initiative, InitiativeStatus, Metric};

/// Fixed reference instant so fixtures are reproducible.
pub fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_767_225_600, 0)
        .single()
        .unwrap_or_default()
}

/// An approved initiative whose priority score equals `score`.
///
/// `age_days` moves the creation time back from [`epoch`] so tie-breaks
/// are controllable.
pub fn fundable(horizon: Horizon, score: f64, requested: f64, age_days: i64) -> Initiative {
    let mut initiative = Initiative::new(format!("{horizon}-{score:.1}"), horizon)
        .with_requested_resources(requested)
        .with_created_at(epoch() - Duration::days(age_days));
    initiative.status = InitiativeStatus::Approved;
    initiative.priority = Some(ScoringEngine::compute_priority(
        score,
        score,
        100.0 - score,
        score,
    ));
    initiative
}

/// A running initiative with `primary_total` lagging and `secondary_total`
/// leading metrics, of which the first `primary_met`/`secondary_met` are on
/// track. On-track primary metrics show `lift` relative improvement.
pub fn evidenced(
    primary_met: usize,
    primary_total: usize,
    secondary_met: usize,
    secondary_total: usize,
    lift: f64,
) -> Initiative {
    let mut initiative = Initiative::new("evidenced", Horizon::Core);
    initiative.status = InitiativeStatus::Running;
    for n in 0..primary_total {
        let current = if n < primary_met { 100.0 * (1.0 + lift) } else { 90.0 };
        initiative = initiative.with_metric(
            Metric::lagging(format!("primary-{n}"), 100.0, 100.0).with_current(current),
        );
    }
    for n in 0..secondary_total {
        let current = if n < secondary_met { 1.0 } else { 0.0 };
        initiative = initiative
            .with_metric(Metric::leading(format!("secondary-{n}"), 0.0, 1.0).with_current(current));
    }
    initiative
}
