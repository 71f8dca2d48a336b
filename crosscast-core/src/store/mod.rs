//! Persistent state store with an in-process read cache
//!
//! Two backend variants share one contract: the durable Redis backend and
//! the in-memory fallback. The variant is selected once at construction by
//! a probing factory; orchestrator code never branches on backend identity.

pub mod keys;
pub mod memory;
pub mod redis;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::StoreCache;
use crate::config::Config;
use crate::Result;

pub use keys::KeyBuilder;
pub use memory::MemoryBackend;
pub use self::redis::RedisBackend;

/// Key/value persistence contract shared by both backend variants
#[async_trait::async_trait]
pub trait StateBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Durable write; must reach the backend or fail
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    async fn fetch(&self, key: &str) -> Result<Option<String>>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// List key/value pairs under a logical key prefix
    async fn list_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>>;
}

/// Persistent state store: durable backend plus cache-first reads
///
/// The cache is owned by the store and is never the source of truth. Writes
/// go to the backend first; only on success is the cache invalidated, so a
/// failed write leaves the previously cached (still durable) value intact.
pub struct StateStore {
    backend: Arc<dyn StateBackend>,
    cache: StoreCache,
    default_ttl: Duration,
}

impl StateStore {
    pub fn new(backend: Arc<dyn StateBackend>, cache_capacity: u64, default_ttl: Duration) -> Self {
        Self {
            backend,
            cache: StoreCache::new(cache_capacity),
            default_ttl,
        }
    }

    /// Probe the durable backend, falling back to the in-memory variant
    ///
    /// The orchestrator receives the same contract either way.
    pub async fn connect(config: &Config) -> Self {
        let cache_capacity = config.store.cache_capacity;
        let default_ttl = Duration::from_secs(config.store.cache_ttl_seconds);

        match RedisBackend::connect(&config.redis).await {
            Ok(backend) => {
                info!("State store using Redis backend");
                Self::new(Arc::new(backend), cache_capacity, default_ttl)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Redis unavailable at startup, falling back to in-memory state store; \
                     state will not survive a restart"
                );
                Self::new(Arc::new(MemoryBackend::new()), cache_capacity, default_ttl)
            }
        }
    }

    /// In-memory store with default tuning (fallback construction and tests)
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryBackend::new()),
            1024,
            Duration::from_secs(300),
        )
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Durable write; on success invalidates the cache entry for `key` and
    /// any aggregate/list entries under the key's namespace
    pub async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.put(key, &json).await?;

        self.cache.invalidate(key).await;
        if let Some((namespace, _)) = key.split_once(':') {
            self.cache.invalidate_prefix(&format!("{namespace}:"));
        }

        debug!(key, backend = self.backend.name(), "State record saved");
        Ok(())
    }

    /// Cache-first read with the store's default TTL
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get_with_ttl(key, self.default_ttl).await
    }

    /// Cache-first read with a call-site TTL
    ///
    /// On cache miss or expiry, reads the durable backend and repopulates
    /// the cache.
    pub async fn get_with_ttl<T: DeserializeOwned>(
        &self,
        key: &str,
        ttl: Duration,
    ) -> Result<Option<T>> {
        if let Some(json) = self.cache.get(key).await {
            debug!(key, "State cache hit");
            return Ok(Some(serde_json::from_str(&json)?));
        }

        match self.backend.fetch(key).await? {
            Some(json) => {
                let value = serde_json::from_str(&json)?;
                self.cache.set(key, json, ttl).await;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.backend.delete(key).await?;
        self.cache.invalidate(key).await;
        Ok(())
    }

    /// List typed records under a logical prefix, bypassing the cache
    pub async fn list_prefix<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>> {
        let entries = self.backend.list_prefix(prefix).await?;
        entries
            .into_iter()
            .map(|(_, json)| serde_json::from_str(&json).map_err(Into::into))
            .collect()
    }
}
