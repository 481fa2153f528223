use serde::{Deserialize, Serialize};

use crate::enums::MetricKind;

/// A measured indicator with a baseline and a target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub kind: MetricKind,
    pub baseline: f64,
    /// Absent until the first measurement arrives.
    pub current: Option<f64>,
    pub target: f64,
    pub unit: String,
}

impl Metric {
    pub fn new(name: impl Into<String>, kind: MetricKind, baseline: f64, target: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            baseline,
            current: None,
            target,
            unit: String::new(),
        }
    }

    pub fn leading(name: impl Into<String>, baseline: f64, target: f64) -> Self {
        Self::new(name, MetricKind::Leading, baseline, target)
    }

    pub fn lagging(name: impl Into<String>, baseline: f64, target: f64) -> Self {
        Self::new(name, MetricKind::Lagging, baseline, target)
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_current(mut self, current: f64) -> Self {
        self.current = Some(current);
        self
    }

    /// Progress from baseline toward target, clamped to `[0, 100]`.
    ///
    /// When `target == baseline` the ratio is undefined: 100 if the current
    /// value has reached the target, else 0. Unmeasured metrics report 0.
    pub fn progress_percent(&self) -> f64 {
        let Some(current) = self.current else {
            return 0.0;
        };
        let span = self.target - self.baseline;
        if span == 0.0 {
            return if current >= self.target { 100.0 } else { 0.0 };
        }
        ((current - self.baseline) / span * 100.0).clamp(0.0, 100.0)
    }

    /// `current >= target`; false until measured.
    pub fn on_track(&self) -> bool {
        self.current.is_some_and(|c| c >= self.target)
    }

    /// Relative improvement over baseline, `(current - baseline) / |baseline|`.
    ///
    /// `None` when unmeasured or when the baseline is zero.
    pub fn relative_lift(&self) -> Option<f64> {
        let current = self.current?;
        if self.baseline == 0.0 {
            return None;
        }
        Some((current - self.baseline) / self.baseline.abs())
    }
}
