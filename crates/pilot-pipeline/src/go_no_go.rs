use pilot_types::GoNoGoCriterion;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Launch-readiness verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Go => f.write_str("GO"),
            Verdict::NoGo => f.write_str("NO-GO"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoNoGoResult {
    pub verdict: Verdict,
    pub required_passed: usize,
    pub required_total: usize,
    pub optional_passed: usize,
    pub optional_total: usize,
    /// Share of all checks that passed; 0 with no checks.
    pub confidence: f64,
    /// Required criteria that failed, in input order.
    pub blocking: Vec<String>,
}

impl GoNoGoResult {
    pub fn is_go(&self) -> bool {
        self.verdict == Verdict::Go
    }
}

/// `GO` iff every required criterion passed; with no required criteria the
/// verdict is vacuously `GO`.
pub fn go_no_go(criteria: &[GoNoGoCriterion]) -> GoNoGoResult {
    let (required, optional): (Vec<_>, Vec<_>) = criteria.iter().partition(|c| c.required);

    let required_passed = required.iter().filter(|c| c.status).count();
    let optional_passed = optional.iter().filter(|c| c.status).count();
    let blocking: Vec<String> = required
        .iter()
        .filter(|c| !c.status)
        .map(|c| c.criterion.clone())
        .collect();

    let total = criteria.len();
    let confidence = if total == 0 {
        0.0
    } else {
        (required_passed + optional_passed) as f64 / total as f64
    };

    let verdict = if required_passed == required.len() {
        Verdict::Go
    } else {
        Verdict::NoGo
    };
    debug!(
        verdict = %verdict,
        required_passed,
        required_total = required.len(),
        confidence,
        "Go/No-Go evaluated"
    );

    GoNoGoResult {
        verdict,
        required_passed,
        required_total: required.len(),
        optional_passed,
        optional_total: optional.len(),
        confidence,
        blocking,
    }
}
