//! YouTube Live Streaming API Data Structures

use serde::{Deserialize, Serialize};

/// Request body for `liveBroadcasts.insert`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastInsert {
    pub snippet: BroadcastSnippet,
    pub status: BroadcastStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastSnippet {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scheduled_start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastStatus {
    /// "public", "unlisted" or "private"
    pub privacy_status: String,
}

/// Response body for `liveBroadcasts.insert`
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastResource {
    pub id: String,
}

/// Request body for `liveStreams.insert`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInsert {
    pub snippet: StreamSnippet,
    pub cdn: StreamCdn,
}

#[derive(Debug, Clone, Serialize)]
pub struct StreamSnippet {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamCdn {
    /// e.g. "30fps", "60fps" or "variable"
    pub frame_rate: String,
    /// e.g. "720p", "1080p" or "variable"
    pub resolution: String,
    pub ingestion_type: String,
}

/// Response body for `liveStreams.insert`
#[derive(Debug, Clone, Deserialize)]
pub struct StreamResource {
    pub id: String,
    #[serde(default)]
    pub cdn: Option<StreamCdnInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamCdnInfo {
    #[serde(default)]
    pub ingestion_info: Option<IngestionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionInfo {
    #[serde(default)]
    pub ingestion_address: Option<String>,
    #[serde(default)]
    pub stream_name: Option<String>,
}

/// Target states for `liveBroadcasts.transition`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastTransition {
    Testing,
    Live,
    Complete,
}

impl BroadcastTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Testing => "testing",
            Self::Live => "live",
            Self::Complete => "complete",
        }
    }
}

/// Error envelope returned by Google APIs
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
}
