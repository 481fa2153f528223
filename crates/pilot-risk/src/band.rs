use serde::{Deserialize, Serialize};

/// Discrete severity band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    /// `< 0.10`
    Minimal,
    /// `[0.10, 0.25)`
    Low,
    /// `[0.25, 0.50)`
    Medium,
    /// `[0.50, 0.75)`
    High,
    /// `>= 0.75`
    Critical,
}

impl SeverityBand {
    pub const ALL: [SeverityBand; 5] = [
        SeverityBand::Minimal,
        SeverityBand::Low,
        SeverityBand::Medium,
        SeverityBand::High,
        SeverityBand::Critical,
    ];

    pub fn from_severity(severity: f64) -> Self {
        if severity >= 0.75 {
            SeverityBand::Critical
        } else if severity >= 0.50 {
            SeverityBand::High
        } else if severity >= 0.25 {
            SeverityBand::Medium
        } else if severity >= 0.10 {
            SeverityBand::Low
        } else {
            SeverityBand::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityBand::Minimal => "minimal",
            SeverityBand::Low => "low",
            SeverityBand::Medium => "medium",
            SeverityBand::High => "high",
            SeverityBand::Critical => "critical",
        }
    }
}

impl std::fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
