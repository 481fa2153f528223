use pilot_types::RoiMetrics;
use serde::{Deserialize, Serialize};

/// Years and discount rate used for the reported NPV figure.
pub const REPORT_NPV_YEARS: u32 = 3;
pub const REPORT_DISCOUNT_RATE: f64 = 0.10;

/// Derived ROI figures for reporting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoiSummary {
    pub total_investment: f64,
    pub annual_net_benefit: f64,
    pub roi_percent: f64,
    /// `None` when the investment is never paid back.
    pub payback_months: Option<f64>,
    pub npv: f64,
    pub npv_years: u32,
    pub discount_rate: f64,
}

impl RoiSummary {
    pub fn from_metrics(roi: &RoiMetrics) -> Self {
        let payback = roi.payback_months();
        Self {
            total_investment: roi.total_investment(),
            annual_net_benefit: roi.annual_net_benefit(),
            roi_percent: roi.roi_percent(),
            payback_months: payback.is_finite().then_some(payback),
            npv: roi.npv(REPORT_NPV_YEARS, REPORT_DISCOUNT_RATE),
            npv_years: REPORT_NPV_YEARS,
            discount_rate: REPORT_DISCOUNT_RATE,
        }
    }
}
