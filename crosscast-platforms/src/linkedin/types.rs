//! LinkedIn Live Video API Data Structures

use serde::{Deserialize, Serialize};

/// Request body for `liveVideos?action=register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// URN of the owning member or organization
    pub owner: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// "PUBLIC" or "CONNECTIONS"
    pub visibility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<i64>,
}

/// Response body for `liveVideos?action=register`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub value: RegisterValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterValue {
    /// Live video URN, e.g. "urn:li:liveVideo:664321"
    pub live_video: String,
    #[serde(default)]
    pub ingest_url: Option<String>,
    #[serde(default)]
    pub stream_key: Option<String>,
}

/// Lifecycle transition actions for a registered live video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveVideoAction {
    Ready,
    Published,
    Ended,
}

impl LiveVideoAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Published => "PUBLISHED",
            Self::Ended => "ENDED",
        }
    }
}

/// Request body for `liveVideos/{id}?action=transition`
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    pub action: String,
}

/// Error body returned by LinkedIn REST endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "serviceErrorCode")]
    pub service_error_code: Option<i64>,
}
