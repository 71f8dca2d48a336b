//! LinkedIn Vendor Client Error Types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkedInError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for LinkedInError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LinkedInError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
