use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::destination::Platform;

/// Error message written onto a recovered status whose persisted record
/// still claimed to be active
pub const RESTART_INTERRUPTED_ERROR: &str = "Stream was interrupted due to application restart";

/// Encoder parameters for a relay session
///
/// Singleton record, replaced wholesale on each configure call. Must exist
/// before a start is accepted. Re-configuring mid-stream only affects
/// subsequent starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayConfig {
    pub bitrate: u32,
    /// e.g. "720p", "1080p"
    pub resolution: String,
    pub frame_rate: u32,
    pub audio_quality: u32,
    pub encoder: String,
    pub preset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_params: Option<HashMap<String, String>>,
}

/// Per-session broadcast metadata supplied to `start`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastSettings {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<DateTime<Utc>>,
    /// e.g. "public", "private", "unlisted"
    pub visibility: String,
}

/// One platform's streaming state within the aggregate
///
/// Absence of an entry for a platform means "never attempted".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatus {
    pub is_streaming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_stream_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlatformStatus {
    /// Status for a platform whose start sequence completed
    pub fn started(remote_stream_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            is_streaming: true,
            remote_stream_id: Some(remote_stream_id.into()),
            viewer_count: None,
            started_at: Some(at),
            error: None,
        }
    }

    /// Status for a platform whose start sequence failed
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_streaming: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Downgrade to not-streaming, keeping the remote id for diagnostics
    pub fn mark_stopped(&mut self) {
        self.is_streaming = false;
        self.viewer_count = None;
    }
}

/// Aggregate session status: session-level activity plus per-platform state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayStatus {
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Seconds between start and stop, computed at stop time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub platforms: HashMap<Platform, PlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayStatus {
    /// Reset the aggregate for a newly accepted start
    pub fn begin(&mut self, started_at: DateTime<Utc>, bitrate: u32) {
        self.is_active = true;
        self.started_at = Some(started_at);
        self.duration = None;
        self.bitrate = Some(bitrate);
        self.platforms.clear();
        self.error = None;
    }

    /// Transition the aggregate to inactive, computing the session duration
    pub fn finish(&mut self, stopped_at: DateTime<Utc>) {
        if let Some(started_at) = self.started_at {
            self.duration = Some((stopped_at - started_at).num_seconds().max(0));
        }
        self.is_active = false;
        for status in self.platforms.values_mut() {
            status.mark_stopped();
        }
    }

    /// Force the aggregate inactive after an unclean shutdown
    ///
    /// A persisted "active" status is never trusted across a process
    /// boundary: no remote-session handle survives a restart.
    pub fn mark_interrupted(&mut self) {
        self.is_active = false;
        self.error = Some(RESTART_INTERRUPTED_ERROR.to_string());
        for status in self.platforms.values_mut() {
            status.mark_stopped();
        }
    }

    /// Whether any platform is currently streaming
    #[must_use]
    pub fn any_streaming(&self) -> bool {
        self.platforms.values().any(|s| s.is_streaming)
    }
}
