//! Redis state backend
//!
//! Durable variant of the state backend. Every failure maps to
//! `Error::StorageUnavailable`: a write either reaches Redis or the
//! operation fails, never a cache-only fallback.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::debug;

use super::StateBackend;
use crate::config::RedisConfig;
use crate::{Error, Result};

/// Redis-backed key/value store with a deployment key prefix
pub struct RedisBackend {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisBackend {
    /// Connect to Redis, bounded by the configured connect timeout
    ///
    /// Issues a PING so an unreachable server is detected here rather than
    /// on the first store operation.
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.clone())?;

        let connect = async {
            let mut conn = ConnectionManager::new(client).await?;
            let _: () = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, redis::RedisError>(conn)
        };

        let timeout = Duration::from_secs(config.connect_timeout_seconds);
        let conn = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| {
                Error::StorageUnavailable(format!(
                    "Redis connect timed out after {}s",
                    config.connect_timeout_seconds
                ))
            })??;

        debug!(url = %config.url, "Connected to Redis state backend");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl StateBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(self.prefixed(key), value).await?;
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.prefixed(key)).await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(self.prefixed(key)).await?;
        Ok(())
    }

    /// List key/value pairs under a logical prefix
    ///
    /// Uses SCAN instead of KEYS to avoid blocking Redis on large datasets.
    async fn list_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}*", self.prefixed(prefix));

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (new_cursor, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await?;

            keys.extend(batch);
            cursor = new_cursor;
            if cursor == 0 {
                break;
            }
        }

        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let values: Vec<Option<String>> = conn.mget(&keys).await?;

        Ok(keys
            .into_iter()
            .zip(values)
            .filter_map(|(key, value)| {
                let logical = key
                    .strip_prefix(&self.key_prefix)
                    .unwrap_or(&key)
                    .to_string();
                value.map(|v| (logical, v))
            })
            .collect())
    }
}
