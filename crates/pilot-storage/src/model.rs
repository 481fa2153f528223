use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an allocation write treats initiatives absent from the written map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Unlisted initiatives keep their current allocation.
    Merge,
    /// Unlisted initiatives are reset to zero.
    Replace,
}

/// One sample of a named metric from an external measurement source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub metric_name: String,
    pub value: f64,
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    pub fn new(metric_name: impl Into<String>, value: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            metric_name: metric_name.into(),
            value,
            observed_at,
        }
    }

    pub fn now(metric_name: impl Into<String>, value: f64) -> Self {
        Self::new(metric_name, value, Utc::now())
    }
}
