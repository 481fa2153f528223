use pilot_types::{Horizon, PilotError, Result};
use serde::{Deserialize, Serialize};

const SUM_TOLERANCE: f64 = 1e-6;

/// Fraction of the total budget reserved for each horizon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetAllocation {
    pub core: f64,
    pub emerging: f64,
    pub future: f64,
}

impl Default for TargetAllocation {
    fn default() -> Self {
        Self {
            core: 0.70,
            emerging: 0.20,
            future: 0.10,
        }
    }
}

impl TargetAllocation {
    pub fn new(core: f64, emerging: f64, future: f64) -> Result<Self> {
        let target = Self {
            core,
            emerging,
            future,
        };
        target.validate()?;
        Ok(target)
    }

    pub fn fraction(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::Core => self.core,
            Horizon::Emerging => self.emerging,
            Horizon::Future => self.future,
        }
    }

    /// Fractions must each lie in `[0, 1]` and sum to 1.
    pub fn validate(&self) -> Result<()> {
        for horizon in Horizon::ALL {
            let f = self.fraction(horizon);
            if !(0.0..=1.0).contains(&f) {
                return Err(PilotError::invalid(format!(
                    "target fraction for {horizon} is {f}, expected [0, 1]"
                )));
            }
        }
        let sum = self.core + self.emerging + self.future;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(PilotError::invalid(format!(
                "target fractions sum to {sum}, expected 1.0"
            )));
        }
        Ok(())
    }
}
