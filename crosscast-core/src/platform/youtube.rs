//! YouTube adapter for the `PlatformClient` trait
//!
//! YouTube uses the two-phase model: a broadcast plus a separate ingest
//! stream resource that must be bound to it before going live.

use async_trait::async_trait;
use chrono::Utc;

use crosscast_platforms::youtube::{
    BroadcastInsert, BroadcastSnippet, BroadcastStatus, BroadcastTransition, StreamCdn,
    StreamInsert, StreamSnippet, YouTubeClient,
};

use super::{PlatformClient, PlatformError, RemoteBroadcast, RemoteStream};
use crate::models::{BroadcastSettings, Platform, RelayConfig};

pub struct YouTubeLive {
    client: YouTubeClient,
}

impl YouTubeLive {
    pub fn new() -> Result<Self, PlatformError> {
        Ok(Self {
            client: YouTubeClient::new()?,
        })
    }

    /// Wrap an existing client (tests use this with a mock server URL)
    #[must_use]
    pub fn with_client(client: YouTubeClient) -> Self {
        Self { client }
    }

    /// Map a configured frame rate onto the CDN settings vocabulary
    fn cdn_frame_rate(frame_rate: u32) -> &'static str {
        match frame_rate {
            30 => "30fps",
            60 => "60fps",
            _ => "variable",
        }
    }
}

#[async_trait]
impl PlatformClient for YouTubeLive {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    async fn create_broadcast(
        &self,
        token: &str,
        _account_id: &str,
        settings: &BroadcastSettings,
    ) -> Result<RemoteBroadcast, PlatformError> {
        // The API requires a scheduled start; an immediate start schedules now
        let scheduled_start = settings.scheduled_start.unwrap_or_else(Utc::now);

        let body = BroadcastInsert {
            snippet: BroadcastSnippet {
                title: settings.title.clone(),
                description: Some(settings.description.clone()),
                scheduled_start_time: scheduled_start.to_rfc3339(),
                scheduled_end_time: settings.scheduled_end.map(|t| t.to_rfc3339()),
            },
            status: BroadcastStatus {
                privacy_status: settings.visibility.clone(),
            },
        };

        let id = self.client.insert_broadcast(token, &body).await?;
        Ok(RemoteBroadcast { id })
    }

    async fn create_stream(
        &self,
        token: &str,
        broadcast_id: &str,
        config: &RelayConfig,
    ) -> Result<RemoteStream, PlatformError> {
        let body = StreamInsert {
            snippet: StreamSnippet {
                title: format!("Ingest for {broadcast_id}"),
            },
            cdn: StreamCdn {
                frame_rate: Self::cdn_frame_rate(config.frame_rate).to_string(),
                resolution: config.resolution.clone(),
                ingestion_type: "rtmp".to_string(),
            },
        };

        let stream = self.client.insert_stream(token, &body).await?;
        let ingestion = stream.cdn.and_then(|cdn| cdn.ingestion_info);
        Ok(RemoteStream {
            id: stream.id,
            ingest_url: ingestion.as_ref().and_then(|i| i.ingestion_address.clone()),
            stream_key: ingestion.and_then(|i| i.stream_name),
        })
    }

    async fn bind_stream(
        &self,
        token: &str,
        broadcast_id: &str,
        stream_id: &str,
    ) -> Result<(), PlatformError> {
        self.client.bind(token, broadcast_id, stream_id).await?;
        Ok(())
    }

    async fn start_broadcast(&self, token: &str, broadcast_id: &str) -> Result<(), PlatformError> {
        self.client
            .transition(token, broadcast_id, BroadcastTransition::Live)
            .await?;
        Ok(())
    }

    async fn end_broadcast(&self, token: &str, broadcast_id: &str) -> Result<(), PlatformError> {
        self.client
            .transition(token, broadcast_id, BroadcastTransition::Complete)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_frame_rate_mapping() {
        assert_eq!(YouTubeLive::cdn_frame_rate(30), "30fps");
        assert_eq!(YouTubeLive::cdn_frame_rate(60), "60fps");
        assert_eq!(YouTubeLive::cdn_frame_rate(24), "variable");
    }
}
