//! LinkedIn adapter for the `PlatformClient` trait
//!
//! LinkedIn has no separate ingest-stream resource, so the default
//! `create_stream`/`bind_stream` implementations apply: registration already
//! returns the ingest endpoint, and the live video URN doubles as both the
//! broadcast and stream identifier.

use async_trait::async_trait;

use crosscast_platforms::linkedin::{LinkedInClient, LiveVideoAction, RegisterRequest};

use super::{PlatformClient, PlatformError, RemoteBroadcast};
use crate::models::{BroadcastSettings, Platform};

pub struct LinkedInLive {
    client: LinkedInClient,
}

impl LinkedInLive {
    pub fn new() -> Result<Self, PlatformError> {
        Ok(Self {
            client: LinkedInClient::new()?,
        })
    }

    /// Wrap an existing client (tests use this with a mock server URL)
    #[must_use]
    pub fn with_client(client: LinkedInClient) -> Self {
        Self { client }
    }

    /// Expand a bare member id into an owner URN; full URNs pass through
    fn owner_urn(account_id: &str) -> String {
        if account_id.starts_with("urn:") {
            account_id.to_string()
        } else {
            format!("urn:li:person:{account_id}")
        }
    }

    /// Map a visibility setting onto LinkedIn's vocabulary
    fn visibility(visibility: &str) -> String {
        match visibility {
            "connections" => "CONNECTIONS".to_string(),
            _ => "PUBLIC".to_string(),
        }
    }
}

#[async_trait]
impl PlatformClient for LinkedInLive {
    fn platform(&self) -> Platform {
        Platform::LinkedIn
    }

    async fn create_broadcast(
        &self,
        token: &str,
        account_id: &str,
        settings: &BroadcastSettings,
    ) -> Result<RemoteBroadcast, PlatformError> {
        let body = RegisterRequest {
            owner: Self::owner_urn(account_id),
            title: settings.title.clone(),
            description: Some(settings.description.clone()),
            visibility: Self::visibility(&settings.visibility),
            scheduled_at: settings.scheduled_start.map(|t| t.timestamp_millis()),
        };

        let value = self.client.register(token, &body).await?;
        Ok(RemoteBroadcast {
            id: value.live_video,
        })
    }

    async fn start_broadcast(&self, token: &str, broadcast_id: &str) -> Result<(), PlatformError> {
        // READY must precede PUBLISHED; callers see the pair as one step
        self.client
            .transition(token, broadcast_id, LiveVideoAction::Ready)
            .await?;
        self.client
            .transition(token, broadcast_id, LiveVideoAction::Published)
            .await?;
        Ok(())
    }

    async fn end_broadcast(&self, token: &str, broadcast_id: &str) -> Result<(), PlatformError> {
        self.client
            .transition(token, broadcast_id, LiveVideoAction::Ended)
            .await?;
        Ok(())
    }
}
