//! Engine configuration.

use std::path::Path;

use pilot_allocator::{TargetAllocation, DEFAULT_BALANCE_TOLERANCE_PCT};
use pilot_decision::DEFAULT_SCALE_LIFT_THRESHOLD;
use pilot_pipeline::GatePolicy;
use pilot_stats::{ConfidenceLevel, DEFAULT_MINIMUM_SAMPLE_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Portfolio split and balance check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub target: TargetAllocation,
    /// Allowed deviation from target, in percentage points.
    pub balance_tolerance_pct: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            target: TargetAllocation::default(),
            balance_tolerance_pct: DEFAULT_BALANCE_TOLERANCE_PCT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub minimum_sample_size: usize,
    pub confidence: ConfidenceLevel,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            minimum_sample_size: DEFAULT_MINIMUM_SAMPLE_SIZE,
            confidence: ConfidenceLevel::P95,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub gate_policy: GatePolicy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Primary lift above which a successful initiative is scaled.
    pub scale_lift_threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            scale_lift_threshold: DEFAULT_SCALE_LIFT_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub allocation: AllocationConfig,
    pub validation: ValidationConfig,
    pub pipeline: PipelineConfig,
    pub decision: DecisionConfig,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Tight tolerances for portfolios reporting to finance.
    pub fn strict() -> Self {
        Self {
            allocation: AllocationConfig {
                balance_tolerance_pct: 2.5,
                ..AllocationConfig::default()
            },
            validation: ValidationConfig {
                minimum_sample_size: 50,
                confidence: ConfidenceLevel::P99,
            },
            ..Self::default()
        }
    }

    /// Relaxed thresholds for early-stage discovery work.
    pub fn exploratory() -> Self {
        Self {
            allocation: AllocationConfig {
                balance_tolerance_pct: 10.0,
                ..AllocationConfig::default()
            },
            validation: ValidationConfig {
                minimum_sample_size: 10,
                ..ValidationConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Self::from_toml_str(&contents)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.allocation
            .target
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let tolerance = self.allocation.balance_tolerance_pct;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "balance_tolerance_pct must be non-negative, got {tolerance}"
            )));
        }
        if self.validation.minimum_sample_size == 0 {
            return Err(ConfigError::Invalid(
                "minimum_sample_size must be positive".into(),
            ));
        }
        if !self.decision.scale_lift_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "scale_lift_threshold must be finite".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging level must not be empty".into()));
        }
        Ok(())
    }
}
