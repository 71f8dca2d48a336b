//! Store-backed credential resolution
//!
//! Accounts live in the state store under the accounts namespace; the
//! resolver only surfaces access tokens to the orchestrator. Token refresh
//! happens outside this crate, by whoever writes the account records.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::models::{Account, Platform};
use crate::platform::CredentialResolver;
use crate::store::{KeyBuilder, StateStore};
use crate::{Error, Result};

pub struct StoreCredentialResolver {
    store: Arc<StateStore>,
}

impl StoreCredentialResolver {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Create or replace an account record
    pub async fn put_account(&self, account: &Account) -> Result<()> {
        let key = KeyBuilder::account(account.platform, &account.account_id);
        self.store.save(&key, account).await?;
        debug!(platform = %account.platform, account_id = %account.account_id, "Account stored");
        Ok(())
    }

    pub async fn remove_account(&self, platform: Platform, account_id: &str) -> Result<()> {
        self.store
            .delete(&KeyBuilder::account(platform, account_id))
            .await
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.store.list_prefix(KeyBuilder::accounts_prefix()).await
    }
}

#[async_trait]
impl CredentialResolver for StoreCredentialResolver {
    async fn resolve(&self, platform: Platform, account_id: &str) -> Result<String> {
        let key = KeyBuilder::account(platform, account_id);
        let account: Account = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| Error::AccountNotFound(format!("{}:{account_id}", platform.as_str())))?;
        Ok(account.access_token)
    }
}
