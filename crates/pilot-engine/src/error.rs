use std::fmt::Display;

use pilot_types::PilotError;
use thiserror::Error;

/// Result type for service operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// A failed service operation, with the identifier it was applied to.
#[derive(Debug, Error)]
#[error("{operation} failed for {id}: {source}")]
pub struct EngineError {
    pub operation: &'static str,
    pub id: String,
    #[source]
    pub source: PilotError,
}

impl EngineError {
    pub fn new(operation: &'static str, id: impl Display, source: impl Into<PilotError>) -> Self {
        Self {
            operation,
            id: id.to_string(),
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.source, PilotError::NotFound { .. })
    }
}

/// Attach operation context to a component or storage failure.
pub(crate) trait InOperation<T> {
    fn in_operation(self, operation: &'static str, id: impl Display) -> EngineResult<T>;
}

impl<T, E> InOperation<T> for Result<T, E>
where
    E: Into<PilotError>,
{
    fn in_operation(self, operation: &'static str, id: impl Display) -> EngineResult<T> {
        self.map_err(|e| EngineError::new(operation, id, e))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
