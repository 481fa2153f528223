use pilot_types::PilotError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<StorageError> for PilotError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => PilotError::NotFound { entity, id },
            StorageError::Conflict(msg) => PilotError::Conflict(msg),
            StorageError::InvalidInput(msg) => PilotError::InvalidArgument(msg),
            StorageError::Backend(msg) => PilotError::Storage(msg),
        }
    }
}
