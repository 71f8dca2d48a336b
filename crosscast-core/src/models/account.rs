use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::destination::Platform;

/// Stored credential record for one platform account
///
/// One record per `(platform, account_id)` under the accounts namespace.
/// Token acquisition and refresh happen outside this crate; the orchestrator
/// only reads the access token through the credential resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub platform: Platform,
    pub account_id: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Account {
    pub fn new(
        platform: Platform,
        account_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            account_id: account_id.into(),
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            display_name: None,
        }
    }
}
