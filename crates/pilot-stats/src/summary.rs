use pilot_types::{PilotError, Result};
use serde::{Deserialize, Serialize};

/// Descriptive statistics of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation; 0 when `n == 1`.
    pub stdev: f64,
}

impl SampleStats {
    /// Summarize a non-empty sample of finite values.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(PilotError::invalid("sample is empty"));
        }
        if let Some(bad) = samples.iter().find(|v| !v.is_finite()) {
            return Err(PilotError::invalid(format!("sample value {bad} is not finite")));
        }

        let n = samples.len();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let stdev = if n > 1 {
            let ss: f64 = samples.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        Ok(Self { n, mean, stdev })
    }

    pub fn standard_error(&self) -> f64 {
        self.stdev / (self.n as f64).sqrt()
    }
}
