//! LinkedIn Live Vendor Client
//!
//! Pure HTTP client for the LinkedIn Live Video API, independent of the
//! orchestration layer.
//!
//! # Features
//! - Live event registration (`liveVideos?action=register`)
//! - Lifecycle transitions (READY / PUBLISHED / ENDED)
//!
//! LinkedIn has no separate ingest-stream resource; registration returns the
//! ingest endpoint together with the live video URN. URNs are treated as
//! opaque strings throughout.

pub mod client;
pub mod error;
pub mod types;

pub use client::LinkedInClient;
pub use error::LinkedInError;
pub use types::*;
