//! YouTube Live HTTP Client

use reqwest::Client;
use tracing::debug;

use super::error::YouTubeError;
use super::types::{
    ApiErrorEnvelope, BroadcastInsert, BroadcastResource, BroadcastTransition, StreamInsert,
    StreamResource,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Live HTTP Client
///
/// Thin wrapper over the `liveBroadcasts` and `liveStreams` endpoints.
/// Authentication is a caller-supplied OAuth bearer token; token acquisition
/// and refresh are out of scope for this crate.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
}

impl YouTubeClient {
    /// Create a new YouTube client against the production API
    pub fn new() -> Result<Self, YouTubeError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, YouTubeError> {
        let client = Client::builder()
            .build()
            .map_err(|e| YouTubeError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a remote live broadcast, returning its id
    pub async fn insert_broadcast(
        &self,
        token: &str,
        body: &BroadcastInsert,
    ) -> Result<String, YouTubeError> {
        let url = format!("{}/liveBroadcasts?part=snippet,status", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let resource: BroadcastResource = Self::parse_response(resp).await?;
        debug!(broadcast_id = %resource.id, "YouTube broadcast created");
        Ok(resource.id)
    }

    /// Create a remote ingest stream resource
    pub async fn insert_stream(
        &self,
        token: &str,
        body: &StreamInsert,
    ) -> Result<StreamResource, YouTubeError> {
        let url = format!("{}/liveStreams?part=snippet,cdn", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let resource: StreamResource = Self::parse_response(resp).await?;
        debug!(stream_id = %resource.id, "YouTube ingest stream created");
        Ok(resource)
    }

    /// Bind an ingest stream to a broadcast
    pub async fn bind(
        &self,
        token: &str,
        broadcast_id: &str,
        stream_id: &str,
    ) -> Result<(), YouTubeError> {
        let url = format!(
            "{}/liveBroadcasts/bind?id={broadcast_id}&streamId={stream_id}&part=id",
            self.base_url
        );
        let resp = self.client.post(&url).bearer_auth(token).send().await?;

        Self::check_status(resp).await?;
        debug!(broadcast_id, stream_id, "YouTube stream bound to broadcast");
        Ok(())
    }

    /// Transition a broadcast to the given lifecycle state
    pub async fn transition(
        &self,
        token: &str,
        broadcast_id: &str,
        target: BroadcastTransition,
    ) -> Result<(), YouTubeError> {
        let url = format!(
            "{}/liveBroadcasts/transition?broadcastStatus={}&id={broadcast_id}&part=status",
            self.base_url,
            target.as_str()
        );
        let resp = self.client.post(&url).bearer_auth(token).send().await?;

        Self::check_status(resp).await?;
        debug!(broadcast_id, target = target.as_str(), "YouTube broadcast transitioned");
        Ok(())
    }

    /// Parse a JSON response body, mapping non-success statuses to `Api` errors
    async fn parse_response<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, YouTubeError> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| YouTubeError::Parse(e.to_string()))
    }

    /// Check a response status, discarding the success body
    async fn check_status(resp: reqwest::Response) -> Result<(), YouTubeError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Self::api_error(status.as_u16(), &body))
    }

    /// Build an `Api` error from a Google error envelope, falling back to the
    /// raw body when the envelope does not parse
    fn api_error(status: u16, body: &str) -> YouTubeError {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => YouTubeError::Api {
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => YouTubeError::Api {
                code: status,
                message: body.chars().take(200).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::types::{BroadcastSnippet, BroadcastStatus, StreamCdn, StreamSnippet};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn broadcast_body() -> BroadcastInsert {
        BroadcastInsert {
            snippet: BroadcastSnippet {
                title: "T".to_string(),
                description: Some("D".to_string()),
                scheduled_start_time: "2026-01-01T00:00:00Z".to_string(),
                scheduled_end_time: None,
            },
            status: BroadcastStatus {
                privacy_status: "public".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn insert_broadcast_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/liveBroadcasts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "bc-123",
                "kind": "youtube#liveBroadcast"
            })))
            .mount(&server)
            .await;

        let client = YouTubeClient::with_base_url(server.uri()).unwrap();
        let id = client
            .insert_broadcast("tok", &broadcast_body())
            .await
            .unwrap();
        assert_eq!(id, "bc-123");
    }

    #[tokio::test]
    async fn insert_stream_parses_ingestion_info() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/liveStreams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "st-1",
                "cdn": {
                    "ingestionInfo": {
                        "ingestionAddress": "rtmp://a.rtmp.youtube.com/live2",
                        "streamName": "abcd-efgh"
                    }
                }
            })))
            .mount(&server)
            .await;

        let client = YouTubeClient::with_base_url(server.uri()).unwrap();
        let stream = client
            .insert_stream(
                "tok",
                &StreamInsert {
                    snippet: StreamSnippet {
                        title: "T".to_string(),
                    },
                    cdn: StreamCdn {
                        frame_rate: "30fps".to_string(),
                        resolution: "720p".to_string(),
                        ingestion_type: "rtmp".to_string(),
                    },
                },
            )
            .await
            .unwrap();

        assert_eq!(stream.id, "st-1");
        let ingestion = stream.cdn.unwrap().ingestion_info.unwrap();
        assert_eq!(ingestion.stream_name.as_deref(), Some("abcd-efgh"));
    }

    #[tokio::test]
    async fn transition_maps_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/liveBroadcasts/transition"))
            .and(query_param("broadcastStatus", "live"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": { "code": 403, "message": "Live streaming is not enabled" }
            })))
            .mount(&server)
            .await;

        let client = YouTubeClient::with_base_url(server.uri()).unwrap();
        let err = client
            .transition("tok", "bc-1", BroadcastTransition::Live)
            .await
            .unwrap_err();

        match err {
            YouTubeError::Api { code, message } => {
                assert_eq!(code, 403);
                assert!(message.contains("not enabled"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bind_succeeds_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/liveBroadcasts/bind"))
            .and(query_param("id", "bc-1"))
            .and(query_param("streamId", "st-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "bc-1"
            })))
            .mount(&server)
            .await;

        let client = YouTubeClient::with_base_url(server.uri()).unwrap();
        client.bind("tok", "bc-1", "st-1").await.unwrap();
    }
}
