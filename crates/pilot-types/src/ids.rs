use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an initiative (pilot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InitiativeId(pub Uuid);

impl InitiativeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InitiativeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InitiativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InitiativeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identifier of a risk entry within an initiative's register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(pub Uuid);

impl RiskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RiskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RiskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
