// Crosscast Platform Clients
//
// This crate contains pure HTTP client implementations for the live-video
// APIs of the supported destination platforms. The clients are independent
// of the orchestration layer and can be used standalone.
//
// Architecture:
// - crosscast-platforms: Pure HTTP clients (YouTube Live, LinkedIn Live)
// - crosscast-core/platform: PlatformClient trait implementations (adapters
//   calling these clients)

// HTTP clients (no PlatformClient dependency)
pub mod linkedin;
pub mod youtube;

// Re-export client types for convenience
pub use linkedin::{LinkedInClient, LinkedInError};
pub use youtube::{YouTubeClient, YouTubeError};
