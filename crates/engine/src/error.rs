use showroom_api::ApiError;
use showroom_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("item not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(#[from] ApiError),

    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),
}
