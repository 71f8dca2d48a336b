use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Supported destination platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    LinkedIn,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::LinkedIn => "linkedin",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One platform+account pair configured as a fan-out target
///
/// Identity is `(platform, account_id)`; the registry keeps at most one
/// record per identity and merges repeated adds onto the existing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub platform: Platform,
    pub account_id: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_url: Option<String>,
}

impl Destination {
    pub fn new(platform: Platform, account_id: impl Into<String>, enabled: bool) -> Self {
        Self {
            platform,
            account_id: account_id.into(),
            enabled,
            stream_key: None,
            ingest_url: None,
        }
    }

    /// Whether this record has the given identity
    #[must_use]
    pub fn matches(&self, platform: Platform, account_id: &str) -> bool {
        self.platform == platform && self.account_id == account_id
    }

    /// Merge a repeated add onto this record
    ///
    /// Provided optional fields replace the stored ones; omitted optional
    /// fields are kept. The enabled flag from the latest write wins.
    pub fn merge_from(&mut self, other: Destination) {
        self.enabled = other.enabled;
        if other.stream_key.is_some() {
            self.stream_key = other.stream_key;
        }
        if other.ingest_url.is_some() {
            self.ingest_url = other.ingest_url;
        }
    }
}
