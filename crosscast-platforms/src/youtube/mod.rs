//! YouTube Live Vendor Client
//!
//! Pure HTTP client for the YouTube Live Streaming API (v3), independent of
//! the orchestration layer.
//!
//! # Features
//! - Broadcast creation (`liveBroadcasts.insert`)
//! - Ingest stream creation (`liveStreams.insert`)
//! - Broadcast/stream binding (`liveBroadcasts.bind`)
//! - Lifecycle transitions (`liveBroadcasts.transition`)

pub mod client;
pub mod error;
pub mod types;

pub use client::YouTubeClient;
pub use error::YouTubeError;
pub use types::*;
