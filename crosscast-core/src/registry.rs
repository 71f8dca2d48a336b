//! Destination registry
//!
//! CRUD over the configured fan-out destinations, persisted as one ordered
//! list record. Upsert is keyed by `(platform, account_id)` and idempotent;
//! re-adding an identity merges fields instead of replacing the record.
//!
//! The registry is pure CRUD. The live-stop side effect of removing a
//! destination that is currently streaming lives on the orchestrator facade
//! so the dependency graph stays acyclic.

use std::sync::Arc;
use tracing::debug;

use crate::models::{Destination, Platform};
use crate::store::{KeyBuilder, StateStore};
use crate::Result;

/// Registry over the persisted, ordered destination list
#[derive(Clone)]
pub struct DestinationRegistry {
    store: Arc<StateStore>,
}

impl DestinationRegistry {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Idempotent upsert by `(platform, account_id)`
    ///
    /// New identities append in insertion order; existing identities merge
    /// in place and keep their position.
    pub async fn add(&self, destination: Destination) -> Result<()> {
        let mut destinations = self.list().await?;

        match destinations
            .iter_mut()
            .find(|d| d.matches(destination.platform, &destination.account_id))
        {
            Some(existing) => {
                debug!(
                    platform = %destination.platform,
                    account_id = %destination.account_id,
                    "Merging destination onto existing record"
                );
                existing.merge_from(destination);
            }
            None => {
                debug!(
                    platform = %destination.platform,
                    account_id = %destination.account_id,
                    "Adding destination"
                );
                destinations.push(destination);
            }
        }

        self.store
            .save(KeyBuilder::destinations(), &destinations)
            .await
    }

    /// Remove by identity; returns false (not an error) when absent
    pub async fn remove(&self, platform: Platform, account_id: &str) -> Result<bool> {
        let mut destinations = self.list().await?;
        let before = destinations.len();
        destinations.retain(|d| !d.matches(platform, account_id));

        if destinations.len() == before {
            debug!(%platform, account_id, "Destination not found, nothing removed");
            return Ok(false);
        }

        self.store
            .save(KeyBuilder::destinations(), &destinations)
            .await?;
        debug!(%platform, account_id, "Destination removed");
        Ok(true)
    }

    /// All destinations, insertion order preserved
    pub async fn list(&self) -> Result<Vec<Destination>> {
        Ok(self
            .store
            .get(KeyBuilder::destinations())
            .await?
            .unwrap_or_default())
    }

    /// Enabled destinations only, insertion order preserved
    pub async fn list_enabled(&self) -> Result<Vec<Destination>> {
        let mut destinations = self.list().await?;
        destinations.retain(|d| d.enabled);
        Ok(destinations)
    }

    pub async fn find(&self, platform: Platform, account_id: &str) -> Result<Option<Destination>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|d| d.matches(platform, account_id)))
    }

    /// First enabled destination for a platform (used when a stop only
    /// knows the platform, not the account)
    pub async fn find_by_platform(&self, platform: Platform) -> Result<Option<Destination>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|d| d.platform == platform && d.enabled))
    }
}
