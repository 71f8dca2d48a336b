// Platform Client System
//
// Two-tier architecture (mirrors the pure-client / adapter split):
//
// Tier 1: crosscast-platforms (pure HTTP clients)
//   - youtube::YouTubeClient, linkedin::LinkedInClient
//   - Independent libraries with no PlatformClient dependency
//
// Tier 2: crosscast-core/platform (PlatformClient adapters)
//   - YouTubeLive, LinkedInLive
//   - Call crosscast-platforms clients to implement the PlatformClient trait

pub mod error;
pub mod linkedin;
pub mod youtube;

pub use error::PlatformError;
pub use linkedin::LinkedInLive;
pub use youtube::YouTubeLive;

use async_trait::async_trait;

use crate::models::{BroadcastSettings, Platform, RelayConfig};

/// Remote live event handle
#[derive(Debug, Clone)]
pub struct RemoteBroadcast {
    pub id: String,
}

/// Remote ingest stream handle
///
/// Platforms without a separate ingest resource reuse the broadcast id and
/// leave the ingest fields empty.
#[derive(Debug, Clone)]
pub struct RemoteStream {
    pub id: String,
    pub ingest_url: Option<String>,
    pub stream_key: Option<String>,
}

/// Uniform capability contract implemented once per destination platform
///
/// All operations take a caller-supplied bearer token; credential
/// resolution and refresh happen outside, through [`CredentialResolver`].
#[async_trait]
pub trait PlatformClient: Send + Sync {
    fn platform(&self) -> Platform;

    /// Register a remote live event
    async fn create_broadcast(
        &self,
        token: &str,
        account_id: &str,
        settings: &BroadcastSettings,
    ) -> Result<RemoteBroadcast, PlatformError>;

    /// Create the ingest stream resource (two-phase platforms only)
    ///
    /// The default implementation folds stream creation into the broadcast
    /// and returns the broadcast id.
    async fn create_stream(
        &self,
        _token: &str,
        broadcast_id: &str,
        _config: &RelayConfig,
    ) -> Result<RemoteStream, PlatformError> {
        Ok(RemoteStream {
            id: broadcast_id.to_string(),
            ingest_url: None,
            stream_key: None,
        })
    }

    /// Associate an ingest stream with a broadcast (no-op by default)
    async fn bind_stream(
        &self,
        _token: &str,
        _broadcast_id: &str,
        _stream_id: &str,
    ) -> Result<(), PlatformError> {
        Ok(())
    }

    /// Transition the remote resource to the live/published state
    ///
    /// Platforms with multi-step transitions perform the full sequence here;
    /// if any step fails the call fails as a whole and the caller treats the
    /// platform as not-started.
    async fn start_broadcast(&self, token: &str, broadcast_id: &str) -> Result<(), PlatformError>;

    /// Transition the remote resource to the ended/complete state
    async fn end_broadcast(&self, token: &str, broadcast_id: &str) -> Result<(), PlatformError>;
}

/// External collaborator contract for credential lookup
///
/// Keyed by `(platform, account_id)`, returns a bearer token.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, platform: Platform, account_id: &str) -> crate::Result<String>;
}
