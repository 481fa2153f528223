//! Property tests: severity is monotone and bands cover [0, 1] without gaps.

use pilot_risk::{RiskRegister, SeverityBand};
use pilot_types::{Horizon, Initiative, Risk};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_unit() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

fn arb_risk() -> impl Strategy<Value = Risk> {
    (arb_unit(), arb_unit()).prop_map(|(p, i)| Risk::new("generated", p, i))
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Raising probability or impact never lowers severity or band.
    #[test]
    fn severity_is_monotone(a in arb_unit(), b in arb_unit(), other in arb_unit()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let s_lo = RiskRegister::severity(&Risk::new("r", lo, other));
        let s_hi = RiskRegister::severity(&Risk::new("r", hi, other));
        prop_assert!(s_lo <= s_hi);

        let i_lo = RiskRegister::severity(&Risk::new("r", other, lo));
        let i_hi = RiskRegister::severity(&Risk::new("r", other, hi));
        prop_assert!(i_lo <= i_hi);

        prop_assert!(SeverityBand::from_severity(s_lo) <= SeverityBand::from_severity(s_hi));
    }

    /// Every severity in [0, 1] lands in exactly one band, consistent with classify.
    #[test]
    fn bands_are_exhaustive(risk in arb_risk()) {
        let severity = RiskRegister::severity(&risk);
        prop_assert!((0.0..=1.0).contains(&severity));
        let band = RiskRegister::classify(&risk);
        prop_assert!(SeverityBand::ALL.contains(&band));
        prop_assert_eq!(band, SeverityBand::from_severity(severity));
    }

    /// Mitigation order is by descending severity and overall risk is the mean.
    #[test]
    fn mitigation_is_sorted(risks in prop::collection::vec(arb_risk(), 0..12)) {
        let mut initiative = Initiative::new("risky", Horizon::Future);
        for risk in risks.clone() {
            RiskRegister::add_risk(&mut initiative, risk).unwrap();
        }
        let ranked = RiskRegister::prioritize_mitigation(&initiative, 5);
        prop_assert!(ranked.len() <= 5);
        prop_assert!(ranked.windows(2).all(|w| w[0].severity >= w[1].severity));

        let overall = RiskRegister::overall_risk(&initiative);
        if risks.is_empty() {
            prop_assert_eq!(overall, 0.0);
        } else {
            let mean = risks.iter().map(RiskRegister::severity).sum::<f64>() / risks.len() as f64;
            prop_assert!((overall - mean).abs() < 1e-12);
        }
    }
}

#[test]
fn band_boundaries_are_contiguous() {
    let cases = [
        (0.0, SeverityBand::Minimal),
        (0.0999, SeverityBand::Minimal),
        (0.10, SeverityBand::Low),
        (0.25, SeverityBand::Medium),
        (0.50, SeverityBand::High),
        (0.75, SeverityBand::Critical),
        (1.0, SeverityBand::Critical),
    ];
    for (severity, band) in cases {
        assert_eq!(SeverityBand::from_severity(severity), band, "{severity}");
    }
}
