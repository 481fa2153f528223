use thiserror::Error;

use crate::enums::PipelineStage;

/// Result alias for pilot operations.
pub type Result<T> = std::result::Result<T, PilotError>;

/// Failures shared by all decision components.
///
/// Degenerate arithmetic (zero effort, zero investment, equal baseline and
/// target) is not an error; those cases return defined defaults.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PilotError {
    /// An identifier did not resolve.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An argument was missing, empty or outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested lifecycle transition is not permitted.
    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: PipelineStage,
        to: PipelineStage,
        reason: String,
    },

    /// The write collided with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The repository behind the engine failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl PilotError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }
}
