use serde::{Deserialize, Serialize};

/// Cost/benefit inputs for an initiative.
///
/// All monetary fields share one unit, whatever the caller chooses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiMetrics {
    pub initial_cost: f64,
    pub implementation_cost: f64,
    pub ongoing_cost_annual: f64,
    pub expected_benefit_annual: f64,
    pub time_to_value_months: f64,
    /// Confidence in the estimate, `[0, 1]`.
    pub confidence_level: f64,
}

impl RoiMetrics {
    pub fn total_investment(&self) -> f64 {
        self.initial_cost + self.implementation_cost
    }

    pub fn annual_net_benefit(&self) -> f64 {
        self.expected_benefit_annual - self.ongoing_cost_annual
    }

    pub fn monthly_net_benefit(&self) -> f64 {
        self.annual_net_benefit() / 12.0
    }

    /// Annual return on the up-front investment, in percent. 0 with no investment.
    pub fn roi_percent(&self) -> f64 {
        let investment = self.total_investment();
        if investment == 0.0 {
            return 0.0;
        }
        self.annual_net_benefit() / investment * 100.0
    }

    /// Months to recover the investment; infinite if it is never recovered.
    pub fn payback_months(&self) -> f64 {
        let monthly = self.monthly_net_benefit();
        if monthly <= 0.0 {
            return f64::INFINITY;
        }
        self.total_investment() / monthly
    }

    /// Net present value over `years` of constant annual net benefit.
    ///
    /// The investment is spent at t=0; benefits arrive at the end of each year.
    pub fn npv(&self, years: u32, discount_rate: f64) -> f64 {
        let net = self.annual_net_benefit();
        (1..=years).fold(-self.total_investment(), |acc, t| {
            acc + net / (1.0 + discount_rate).powi(t as i32)
        })
    }
}
