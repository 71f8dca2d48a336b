//! Unified logical record keys
//!
//! All persisted records are addressed through this builder so the key
//! layout lives in one place. Backend-specific prefixes (e.g. the Redis
//! deployment prefix) are applied inside the backend, never here.

use crate::models::Platform;

/// Unified key builder for persisted records
pub struct KeyBuilder;

impl KeyBuilder {
    /// Encoder configuration singleton
    ///
    /// Value: JSON `RelayConfig`
    #[must_use]
    pub fn relay_config() -> &'static str {
        "relay_config"
    }

    /// Ordered destination list
    ///
    /// Value: JSON array of `Destination`, insertion order preserved
    #[must_use]
    pub fn destinations() -> &'static str {
        "stream_destinations"
    }

    /// Aggregate stream status singleton
    ///
    /// Value: JSON `RelayStatus`
    #[must_use]
    pub fn status() -> &'static str {
        "stream_status"
    }

    /// Per-account credential record
    ///
    /// Value: JSON `Account`
    #[must_use]
    pub fn account(platform: Platform, account_id: &str) -> String {
        format!("accounts:{}:{}", platform.as_str(), account_id)
    }

    /// Namespace prefix covering every account record
    #[must_use]
    pub fn accounts_prefix() -> &'static str {
        "accounts:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_key_layout() {
        let key = KeyBuilder::account(Platform::YouTube, "acc1");
        assert_eq!(key, "accounts:youtube:acc1");
        assert!(key.starts_with(KeyBuilder::accounts_prefix()));
    }
}
