//! Bootstrap: configuration loading, state-store connection and service
//! wiring
//!
//! One call builds the whole dependency graph: state store (with its
//! backend probe), destination registry, credential resolver, the platform
//! client set and the relay service, then runs restart recovery so the
//! returned service never reports a stale active stream.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::platform::{LinkedInLive, PlatformClient, YouTubeLive};
use crate::registry::DestinationRegistry;
use crate::service::{RelayService, StoreCredentialResolver};
use crate::store::StateStore;
use crate::Config;
use crate::models::Platform;

/// Container for the initialized service graph
#[derive(Clone)]
pub struct Services {
    pub relay: Arc<RelayService>,
    pub credentials: Arc<StoreCredentialResolver>,
    pub store: Arc<StateStore>,
}

/// Initialize the relay service graph from configuration
pub async fn init_services(config: &Config) -> Result<Services, anyhow::Error> {
    info!("Initializing state store...");
    let store = Arc::new(StateStore::connect(config).await);
    info!(backend = store.backend_name(), "State store ready");

    let registry = DestinationRegistry::new(Arc::clone(&store));
    let credentials = Arc::new(StoreCredentialResolver::new(Arc::clone(&store)));

    let mut clients: HashMap<Platform, Arc<dyn PlatformClient>> = HashMap::new();
    clients.insert(Platform::YouTube, Arc::new(YouTubeLive::new()?));
    clients.insert(Platform::LinkedIn, Arc::new(LinkedInLive::new()?));

    let relay = Arc::new(RelayService::new(
        Arc::clone(&store),
        registry,
        clients,
        Arc::clone(&credentials) as Arc<dyn crate::platform::CredentialResolver>,
        &config.relay,
    ));

    relay.recover().await?;
    info!("Relay service initialized");

    Ok(Services {
        relay,
        credentials,
        store,
    })
}

/// Convenience entry point for callers that only need the relay service
pub async fn init_relay(config: &Config) -> Result<Arc<RelayService>, anyhow::Error> {
    Ok(init_services(config).await?.relay)
}
