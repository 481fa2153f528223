use pilot_types::{Metric, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::summary::SampleStats;

pub const DEFAULT_MINIMUM_SAMPLE_SIZE: usize = 30;

/// Supported two-sided confidence levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    #[default]
    P95,
    P99,
}

impl ConfidenceLevel {
    /// Fixed z lookup.
    pub fn z(&self) -> f64 {
        match self {
            ConfidenceLevel::P95 => 1.96,
            ConfidenceLevel::P99 => 2.58,
        }
    }

    pub fn as_fraction(&self) -> f64 {
        match self {
            ConfidenceLevel::P95 => 0.95,
            ConfidenceLevel::P99 => 0.99,
        }
    }
}

/// Validation outcome for a single metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricValidation {
    pub metric: String,
    pub n: usize,
    pub mean: f64,
    pub stdev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub confidence: ConfidenceLevel,
    pub target: f64,
    pub adequate_sample: bool,
    pub target_within_ci: bool,
    /// The whole interval sits above the target.
    pub target_below_ci: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    InsufficientSample,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub metrics: Vec<MetricValidation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    pub fn metric(&self, name: &str) -> Option<&MetricValidation> {
        self.metrics.iter().find(|m| m.metric == name)
    }
}

/// Confidence-interval validator.
#[derive(Clone, Debug, PartialEq)]
pub struct StatisticalValidator {
    minimum_sample_size: usize,
    confidence: ConfidenceLevel,
}

impl StatisticalValidator {
    pub fn new(minimum_sample_size: usize, confidence: ConfidenceLevel) -> Self {
        Self {
            minimum_sample_size,
            confidence,
        }
    }

    pub fn minimum_sample_size(&self) -> usize {
        self.minimum_sample_size
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    /// Validate one metric's samples against its target.
    pub fn validate_metric(
        &self,
        metric: &str,
        target: f64,
        samples: &[f64],
    ) -> Result<MetricValidation> {
        let stats = SampleStats::from_samples(samples)?;
        let margin = self.confidence.z() * stats.standard_error();
        let ci_lower = stats.mean - margin;
        let ci_upper = stats.mean + margin;

        let result = MetricValidation {
            metric: metric.to_string(),
            n: stats.n,
            mean: stats.mean,
            stdev: stats.stdev,
            ci_lower,
            ci_upper,
            confidence: self.confidence,
            target,
            adequate_sample: stats.n >= self.minimum_sample_size,
            target_within_ci: ci_lower <= target && target <= ci_upper,
            target_below_ci: target < ci_lower,
        };
        debug!(
            metric,
            n = result.n,
            mean = result.mean,
            ci_lower,
            ci_upper,
            "Metric validated"
        );
        Ok(result)
    }

    /// Validate every `(metric, samples)` pair.
    ///
    /// The report is `Valid` only when at least one metric was evaluated and
    /// every evaluated metric has an adequate sample. The first invalid sample
    /// aborts the whole run.
    pub fn validate<'a, I>(&self, inputs: I) -> Result<ValidationReport>
    where
        I: IntoIterator<Item = (&'a Metric, &'a [f64])>,
    {
        let metrics = inputs
            .into_iter()
            .map(|(metric, samples)| self.validate_metric(&metric.name, metric.target, samples))
            .collect::<Result<Vec<_>>>()?;

        let status = if !metrics.is_empty() && metrics.iter().all(|m| m.adequate_sample) {
            ValidationStatus::Valid
        } else {
            ValidationStatus::InsufficientSample
        };
        info!(
            evaluated = metrics.len(),
            status = ?status,
            "Validation complete"
        );
        Ok(ValidationReport { status, metrics })
    }
}

impl Default for StatisticalValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_SAMPLE_SIZE, ConfidenceLevel::P95)
    }
}
