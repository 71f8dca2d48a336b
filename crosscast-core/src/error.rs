use thiserror::Error;

use crate::models::Platform;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{platform} API error {code}: {message}")]
    RemoteApi {
        platform: Platform,
        code: u16,
        message: String,
    },

    #[error("Relay is not configured")]
    NotConfigured,

    #[error("No enabled destinations configured")]
    NoDestinations,

    #[error("Stream is already active")]
    AlreadyActive,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        // A write that cannot reach the durable backend is a hard failure;
        // there is no cache-only fallback for writes.
        Self::StorageUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
