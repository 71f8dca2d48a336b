//! In-process read cache with per-entry TTL

use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cached serialized record plus the TTL chosen by its call site
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    ttl: Duration,
}

/// Expiry policy that honors the TTL carried by each entry
struct PerEntryExpiry;

impl Expiry<String, CacheEntry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Read cache owned by the state store
///
/// Exposes only `get`/`set`/`invalidate`/`invalidate_prefix`; nothing else
/// reaches into the cache internals. Entries carry their own TTL because
/// different record classes tolerate different staleness (status reads use
/// a shorter TTL than configuration reads).
pub struct StoreCache {
    inner: Cache<String, CacheEntry>,
}

impl StoreCache {
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .support_invalidation_closures()
            .build();

        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.map(|entry| entry.value)
    }

    pub async fn set(&self, key: &str, value: String, ttl: Duration) {
        self.inner
            .insert(key.to_string(), CacheEntry { value, ttl })
            .await;
    }

    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    /// Invalidate every entry whose key starts with `prefix`
    ///
    /// Used after a durable write to drop dependent aggregate/list entries
    /// keyed by the record's namespace.
    pub fn invalidate_prefix(&self, prefix: &str) {
        let prefix = prefix.to_string();
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            debug!(error = %e, "Cache prefix invalidation failed");
        }
    }

    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}
