// Platform Client Error Types

use crosscast_platforms::{LinkedInError, YouTubeError};

/// Platform-specific errors
///
/// Surfaced per-platform in the aggregate status; a platform failure never
/// aborts the whole fan-out.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Platform call timed out")]
    Timeout,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<YouTubeError> for PlatformError {
    fn from(err: YouTubeError) -> Self {
        match err {
            YouTubeError::Api { code, message } => Self::Api { code, message },
            YouTubeError::Network(msg) => Self::Network(msg),
            YouTubeError::Parse(msg) => Self::Parse(msg),
            YouTubeError::InvalidConfig(msg) => Self::InvalidConfig(msg),
        }
    }
}

impl From<LinkedInError> for PlatformError {
    fn from(err: LinkedInError) -> Self {
        match err {
            LinkedInError::Api { code, message } => Self::Api { code, message },
            LinkedInError::Network(msg) => Self::Network(msg),
            LinkedInError::Parse(msg) => Self::Parse(msg),
            LinkedInError::InvalidConfig(msg) => Self::InvalidConfig(msg),
        }
    }
}
