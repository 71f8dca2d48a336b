//! LinkedIn Live HTTP Client

use reqwest::Client;
use tracing::debug;

use super::error::LinkedInError;
use super::types::{
    ApiErrorBody, LiveVideoAction, RegisterRequest, RegisterResponse, RegisterValue,
    TransitionRequest,
};

const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/rest";

/// Versioned-API header required by LinkedIn REST endpoints
const LINKEDIN_VERSION: &str = "202409";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// LinkedIn Live HTTP Client
///
/// Wraps the `liveVideos` resource. Authentication is a caller-supplied
/// OAuth bearer token; token acquisition and refresh are out of scope.
pub struct LinkedInClient {
    client: Client,
    base_url: String,
}

impl LinkedInClient {
    /// Create a new LinkedIn client against the production API
    pub fn new() -> Result<Self, LinkedInError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LinkedInError> {
        let client = Client::builder()
            .build()
            .map_err(|e| LinkedInError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Register a live event, returning the live video URN and ingest info
    pub async fn register(
        &self,
        token: &str,
        body: &RegisterRequest,
    ) -> Result<RegisterValue, LinkedInError> {
        let url = format!("{}/liveVideos?action=register", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("LinkedIn-Version", LINKEDIN_VERSION)
            .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &text));
        }

        let parsed: RegisterResponse =
            serde_json::from_str(&text).map_err(|e| LinkedInError::Parse(e.to_string()))?;
        debug!(live_video = %parsed.value.live_video, "LinkedIn live event registered");
        Ok(parsed.value)
    }

    /// Transition a registered live video to the given lifecycle state
    pub async fn transition(
        &self,
        token: &str,
        live_video_urn: &str,
        action: LiveVideoAction,
    ) -> Result<(), LinkedInError> {
        let url = format!(
            "{}/liveVideos/{live_video_urn}?action=transition",
            self.base_url
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("LinkedIn-Version", LINKEDIN_VERSION)
            .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
            .json(&TransitionRequest {
                action: action.as_str().to_string(),
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Self::api_error(status.as_u16(), &text));
        }

        debug!(live_video = live_video_urn, action = action.as_str(), "LinkedIn live video transitioned");
        Ok(())
    }

    fn api_error(status: u16, body: &str) -> LinkedInError {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => LinkedInError::Api {
                code: parsed.status.unwrap_or(status),
                message: parsed
                    .message
                    .unwrap_or_else(|| "LinkedIn API request failed".to_string()),
            },
            Err(_) => LinkedInError::Api {
                code: status,
                message: body.chars().take(200).collect(),
            },
        }
    }
}
