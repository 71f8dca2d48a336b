//! Relay orchestration service
//!
//! Coordinates the full multi-destination streaming lifecycle: configure,
//! start with per-destination fan-out, stop, and restart recovery. The
//! authoritative in-process status lives behind a sync lock so status reads
//! never await; every status change is also persisted as a snapshot so the
//! last known state survives a restart (and is then distrusted, see
//! [`RelayService::recover`]).
//!
//! Lifecycle operations are serialized behind one async lock: a stop issued
//! while a start is in flight queues behind it and then cleanly tears down
//! whatever the start managed to bring up.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::RelayOptions;
use crate::models::{
    BroadcastSettings, Destination, Platform, PlatformStatus, RelayConfig, RelayStatus,
};
use crate::platform::{CredentialResolver, PlatformClient, PlatformError};
use crate::registry::DestinationRegistry;
use crate::store::{KeyBuilder, StateStore};
use crate::{Error, Result};

pub struct RelayService {
    store: Arc<StateStore>,
    registry: DestinationRegistry,
    clients: HashMap<Platform, Arc<dyn PlatformClient>>,
    credentials: Arc<dyn CredentialResolver>,
    /// Authoritative in-process status; reads never await
    status: RwLock<RelayStatus>,
    /// In-process mirror of the persisted encoder configuration
    config: RwLock<Option<RelayConfig>>,
    /// Serializes start/stop/remove so overlapping lifecycle calls queue
    op_lock: Mutex<()>,
    call_timeout: Duration,
    status_ttl: Duration,
}

impl RelayService {
    pub fn new(
        store: Arc<StateStore>,
        registry: DestinationRegistry,
        clients: HashMap<Platform, Arc<dyn PlatformClient>>,
        credentials: Arc<dyn CredentialResolver>,
        options: &RelayOptions,
    ) -> Self {
        Self {
            store,
            registry,
            clients,
            credentials,
            status: RwLock::new(RelayStatus::default()),
            config: RwLock::new(None),
            op_lock: Mutex::new(()),
            call_timeout: Duration::from_secs(options.platform_call_timeout_seconds),
            status_ttl: Duration::from_secs(options.status_cache_ttl_seconds),
        }
    }

    /// Reload persisted state after a process start
    ///
    /// A persisted status that still claims to be active is never trusted:
    /// no remote-session handle survives a restart, so it is forced inactive
    /// with an interruption error before anything else runs.
    pub async fn recover(&self) -> Result<()> {
        if let Some(config) = self
            .store
            .get::<RelayConfig>(KeyBuilder::relay_config())
            .await?
        {
            *self.config.write() = Some(config);
        }

        let persisted = self
            .store
            .get_with_ttl::<RelayStatus>(KeyBuilder::status(), self.status_ttl)
            .await?;

        if let Some(mut status) = persisted {
            if status.is_active {
                warn!("Persisted status claims an active stream across a restart, marking interrupted");
                status.mark_interrupted();
                self.store.save(KeyBuilder::status(), &status).await?;
            }
            *self.status.write() = status;
        }

        info!(backend = self.store.backend_name(), "Relay state recovered");
        Ok(())
    }

    /// Replace the encoder configuration
    ///
    /// Whole-record replacement; a stream already running keeps the
    /// parameters it started with.
    pub async fn configure(&self, config: RelayConfig) -> Result<()> {
        self.store.save(KeyBuilder::relay_config(), &config).await?;
        info!(
            bitrate = config.bitrate,
            resolution = %config.resolution,
            "Relay configured"
        );
        *self.config.write() = Some(config);
        Ok(())
    }

    pub async fn get_config(&self) -> Result<Option<RelayConfig>> {
        if let Some(config) = self.config.read().clone() {
            return Ok(Some(config));
        }
        let loaded = self
            .store
            .get::<RelayConfig>(KeyBuilder::relay_config())
            .await?;
        if let Some(ref config) = loaded {
            *self.config.write() = Some(config.clone());
        }
        Ok(loaded)
    }

    pub async fn add_destination(&self, destination: Destination) -> Result<()> {
        self.registry.add(destination).await
    }

    /// Remove a destination, stopping its live stream first if one is up
    ///
    /// Other platforms keep streaming; only the removed destination's
    /// platform is torn down.
    pub async fn remove_destination(&self, platform: Platform, account_id: &str) -> Result<bool> {
        let _guard = self.op_lock.lock().await;

        let streaming = self
            .status
            .read()
            .platforms
            .get(&platform)
            .is_some_and(|s| s.is_streaming);
        if streaming {
            info!(%platform, account_id, "Stopping live platform stream before removal");
            self.stop_platform_locked(platform, Some(account_id)).await?;
        }

        self.registry.remove(platform, account_id).await
    }

    pub async fn list_destinations(&self) -> Result<Vec<Destination>> {
        self.registry.list().await
    }

    /// Start streaming to every enabled destination
    ///
    /// Fan-out is sequential in registry order and failure-isolated: one
    /// destination failing is recorded as data on that platform's slot and
    /// the remaining destinations still start. The session itself stays
    /// active even if every destination fails; the per-platform errors tell
    /// the caller what happened.
    pub async fn start(&self, settings: BroadcastSettings) -> Result<RelayStatus> {
        let _guard = self.op_lock.lock().await;

        if self.status.read().is_active {
            return Err(Error::AlreadyActive);
        }

        let config = self.get_config().await?.ok_or(Error::NotConfigured)?;

        let destinations = self.registry.list_enabled().await?;
        if destinations.is_empty() {
            return Err(Error::NoDestinations);
        }

        let started_at = Utc::now();
        let mut status = self.status.read().clone();
        status.begin(started_at, config.bitrate);

        info!(
            destinations = destinations.len(),
            bitrate = config.bitrate,
            "Starting relay"
        );

        for destination in &destinations {
            let slot = self.start_destination(destination, &settings, &config).await;
            match &slot.error {
                None => info!(
                    platform = %destination.platform,
                    account_id = %destination.account_id,
                    remote_stream_id = slot.remote_stream_id.as_deref().unwrap_or(""),
                    "Destination started"
                ),
                Some(e) => warn!(
                    platform = %destination.platform,
                    account_id = %destination.account_id,
                    error = %e,
                    "Destination failed to start"
                ),
            }
            status.platforms.insert(destination.platform, slot);
        }

        self.store.save(KeyBuilder::status(), &status).await?;
        *self.status.write() = status.clone();
        Ok(status)
    }

    /// Stop the active stream across all platforms
    ///
    /// Idempotent: stopping an inactive session returns the current status
    /// unchanged. Per-platform end failures are recorded and logged but do
    /// not prevent the session from finishing.
    pub async fn stop(&self) -> Result<RelayStatus> {
        let _guard = self.op_lock.lock().await;

        let mut status = self.status.read().clone();
        if !status.is_active {
            debug!("Stop requested with no active stream, nothing to do");
            return Ok(status);
        }

        let streaming: Vec<Platform> = status
            .platforms
            .iter()
            .filter(|(_, s)| s.is_streaming)
            .map(|(p, _)| *p)
            .collect();

        for platform in streaming {
            if let Err(e) = self.end_platform(platform, None, &status).await {
                warn!(%platform, error = %e, "Failed to end platform broadcast");
                if let Some(slot) = status.platforms.get_mut(&platform) {
                    slot.error = Some(e.to_string());
                }
            }
        }

        let stopped_at = Utc::now();
        status.finish(stopped_at);
        info!(duration = status.duration.unwrap_or(0), "Relay stopped");

        self.store.save(KeyBuilder::status(), &status).await?;
        *self.status.write() = status.clone();
        Ok(status)
    }

    /// Stop one platform's live stream, leaving the session and the other
    /// platforms untouched
    ///
    /// When `account_id` is given its credentials are used for the end
    /// call; otherwise the first enabled destination for the platform is
    /// consulted.
    pub async fn stop_platform_stream(
        &self,
        platform: Platform,
        account_id: Option<&str>,
    ) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        self.stop_platform_locked(platform, account_id).await
    }

    /// Snapshot of the current aggregate status
    #[must_use]
    pub fn get_status(&self) -> RelayStatus {
        self.status.read().clone()
    }

    // Caller holds op_lock.
    async fn stop_platform_locked(
        &self,
        platform: Platform,
        account_id: Option<&str>,
    ) -> Result<()> {
        let mut status = self.status.read().clone();
        let streaming = status
            .platforms
            .get(&platform)
            .is_some_and(|s| s.is_streaming);
        if !streaming {
            debug!(%platform, "Platform is not streaming, nothing to stop");
            return Ok(());
        }

        if let Err(e) = self.end_platform(platform, account_id, &status).await {
            warn!(%platform, error = %e, "Failed to end platform broadcast");
            if let Some(slot) = status.platforms.get_mut(&platform) {
                slot.error = Some(e.to_string());
            }
        }
        if let Some(slot) = status.platforms.get_mut(&platform) {
            slot.mark_stopped();
        }

        self.store.save(KeyBuilder::status(), &status).await?;
        *self.status.write() = status;
        Ok(())
    }

    /// Full start sequence for one destination; never fails the fan-out.
    /// Any error is folded into the returned platform slot.
    async fn start_destination(
        &self,
        destination: &Destination,
        settings: &BroadcastSettings,
        config: &RelayConfig,
    ) -> PlatformStatus {
        let platform = destination.platform;

        let Some(client) = self.clients.get(&platform) else {
            return PlatformStatus::failed(format!(
                "No client registered for platform {platform}"
            ));
        };

        let token = match self
            .credentials
            .resolve(platform, &destination.account_id)
            .await
        {
            Ok(token) => token,
            Err(e) => return PlatformStatus::failed(e.to_string()),
        };

        let result = self
            .run_start_sequence(client.as_ref(), &token, &destination.account_id, settings, config)
            .await;
        match result {
            Ok(broadcast_id) => PlatformStatus::started(broadcast_id, Utc::now()),
            Err(e) => PlatformStatus::failed(e.to_string()),
        }
    }

    /// create → stream → bind → go-live, each step under the call timeout
    async fn run_start_sequence(
        &self,
        client: &dyn PlatformClient,
        token: &str,
        account_id: &str,
        settings: &BroadcastSettings,
        config: &RelayConfig,
    ) -> std::result::Result<String, PlatformError> {
        let broadcast = self
            .timed(client.create_broadcast(token, account_id, settings))
            .await?;
        let stream = self
            .timed(client.create_stream(token, &broadcast.id, config))
            .await?;
        self.timed(client.bind_stream(token, &broadcast.id, &stream.id))
            .await?;
        self.timed(client.start_broadcast(token, &broadcast.id))
            .await?;
        Ok(broadcast.id)
    }

    /// End one platform's broadcast using its recorded remote id
    ///
    /// A platform with no recorded remote id, no registered client or no
    /// resolvable account is treated as already gone: the status entry is
    /// downgraded by the caller without any remote call.
    async fn end_platform(
        &self,
        platform: Platform,
        account_id: Option<&str>,
        status: &RelayStatus,
    ) -> Result<()> {
        let Some(remote_id) = status
            .platforms
            .get(&platform)
            .and_then(|s| s.remote_stream_id.clone())
        else {
            debug!(%platform, "No remote stream id recorded, treating as already ended");
            return Ok(());
        };

        let Some(client) = self.clients.get(&platform) else {
            debug!(%platform, "No client registered, treating as already ended");
            return Ok(());
        };

        // Without an explicit account, the first enabled destination for the
        // platform carries the credentials the stream was started with
        let account_id = match account_id {
            Some(id) => id.to_string(),
            None => match self.registry.find_by_platform(platform).await? {
                Some(destination) => destination.account_id,
                None => {
                    debug!(%platform, "No enabled destination remains, treating as already ended");
                    return Ok(());
                }
            },
        };

        let token = self.credentials.resolve(platform, &account_id).await?;

        self.timed(client.end_broadcast(&token, &remote_id))
            .await
            .map_err(|e| Error::RemoteApi {
                platform,
                code: 0,
                message: e.to_string(),
            })?;

        debug!(%platform, remote_id, "Platform broadcast ended");
        Ok(())
    }

    async fn timed<T>(
        &self,
        fut: impl Future<Output = std::result::Result<T, PlatformError>>,
    ) -> std::result::Result<T, PlatformError> {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(PlatformError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;
    use crate::platform::{RemoteBroadcast, RemoteStream};
    use crate::service::StoreCredentialResolver;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scriptable platform client: fails every call when `fail` is set,
    /// counts ends so tests can assert teardown happened.
    struct MockClient {
        platform: Platform,
        fail: bool,
        started: AtomicUsize,
        ended: AtomicUsize,
    }

    impl MockClient {
        fn new(platform: Platform, fail: bool) -> Self {
            Self {
                platform,
                fail,
                started: AtomicUsize::new(0),
                ended: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PlatformClient for MockClient {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn create_broadcast(
            &self,
            _token: &str,
            _account_id: &str,
            _settings: &BroadcastSettings,
        ) -> std::result::Result<RemoteBroadcast, PlatformError> {
            if self.fail {
                return Err(PlatformError::Api {
                    code: 403,
                    message: "denied".to_string(),
                });
            }
            Ok(RemoteBroadcast {
                id: format!("bc-{}", self.platform),
            })
        }

        async fn create_stream(
            &self,
            _token: &str,
            broadcast_id: &str,
            _config: &RelayConfig,
        ) -> std::result::Result<RemoteStream, PlatformError> {
            Ok(RemoteStream {
                id: broadcast_id.to_string(),
                ingest_url: None,
                stream_key: None,
            })
        }

        async fn start_broadcast(
            &self,
            _token: &str,
            _broadcast_id: &str,
        ) -> std::result::Result<(), PlatformError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn end_broadcast(
            &self,
            _token: &str,
            _broadcast_id: &str,
        ) -> std::result::Result<(), PlatformError> {
            self.ended.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_config() -> RelayConfig {
        RelayConfig {
            bitrate: 2500,
            resolution: "720p".to_string(),
            frame_rate: 30,
            audio_quality: 128,
            encoder: "x264".to_string(),
            preset: "veryfast".to_string(),
            custom_params: None,
        }
    }

    fn test_settings() -> BroadcastSettings {
        BroadcastSettings {
            title: "Show".to_string(),
            description: "Desc".to_string(),
            scheduled_start: None,
            scheduled_end: None,
            visibility: "public".to_string(),
        }
    }

    async fn build_service(
        youtube_fail: bool,
        linkedin_fail: bool,
    ) -> (Arc<RelayService>, Arc<MockClient>, Arc<MockClient>) {
        let store = Arc::new(StateStore::in_memory());
        let registry = DestinationRegistry::new(Arc::clone(&store));
        let resolver = Arc::new(StoreCredentialResolver::new(Arc::clone(&store)));

        resolver
            .put_account(&Account::new(Platform::YouTube, "yt-acc", "yt-tok"))
            .await
            .unwrap();
        resolver
            .put_account(&Account::new(Platform::LinkedIn, "li-acc", "li-tok"))
            .await
            .unwrap();

        let youtube = Arc::new(MockClient::new(Platform::YouTube, youtube_fail));
        let linkedin = Arc::new(MockClient::new(Platform::LinkedIn, linkedin_fail));

        let mut clients: HashMap<Platform, Arc<dyn PlatformClient>> = HashMap::new();
        clients.insert(Platform::YouTube, youtube.clone() as Arc<dyn PlatformClient>);
        clients.insert(Platform::LinkedIn, linkedin.clone() as Arc<dyn PlatformClient>);

        let service = Arc::new(RelayService::new(
            store,
            registry,
            clients,
            resolver,
            &RelayOptions::default(),
        ));
        (service, youtube, linkedin)
    }

    #[tokio::test]
    async fn test_start_requires_configuration() {
        let (service, _, _) = build_service(false, false).await;
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();

        let err = service.start(test_settings()).await.unwrap_err();
        assert!(matches!(err, Error::NotConfigured));
        assert!(!service.get_status().is_active);
    }

    #[tokio::test]
    async fn test_start_requires_destinations() {
        let (service, _, _) = build_service(false, false).await;
        service.configure(test_config()).await.unwrap();

        let err = service.start(test_settings()).await.unwrap_err();
        assert!(matches!(err, Error::NoDestinations));
    }

    #[tokio::test]
    async fn test_disabled_destinations_are_skipped() {
        let (service, _, _) = build_service(false, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", false))
            .await
            .unwrap();

        let err = service.start(test_settings()).await.unwrap_err();
        assert!(matches!(err, Error::NoDestinations));
    }

    #[tokio::test]
    async fn test_start_fans_out_to_all_destinations() {
        let (service, youtube, linkedin) = build_service(false, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();
        service
            .add_destination(Destination::new(Platform::LinkedIn, "li-acc", true))
            .await
            .unwrap();

        let status = service.start(test_settings()).await.unwrap();

        assert!(status.is_active);
        assert_eq!(status.bitrate, Some(2500));
        assert!(status.platforms[&Platform::YouTube].is_streaming);
        assert!(status.platforms[&Platform::LinkedIn].is_streaming);
        assert_eq!(youtube.started.load(Ordering::SeqCst), 1);
        assert_eq!(linkedin.started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_partial_failure_does_not_abort_fan_out() {
        let (service, _, linkedin) = build_service(true, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();
        service
            .add_destination(Destination::new(Platform::LinkedIn, "li-acc", true))
            .await
            .unwrap();

        let status = service.start(test_settings()).await.unwrap();

        assert!(status.is_active);
        let yt = &status.platforms[&Platform::YouTube];
        assert!(!yt.is_streaming);
        assert!(yt.error.as_deref().unwrap().contains("denied"));
        assert!(status.platforms[&Platform::LinkedIn].is_streaming);
        assert_eq!(linkedin.started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_session_stays_active_when_everything_fails() {
        let (service, _, _) = build_service(true, true).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();
        service
            .add_destination(Destination::new(Platform::LinkedIn, "li-acc", true))
            .await
            .unwrap();

        let status = service.start(test_settings()).await.unwrap();
        assert!(status.is_active);
        assert!(!status.any_streaming());
    }

    #[tokio::test]
    async fn test_double_start_is_rejected() {
        let (service, _, _) = build_service(false, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();

        service.start(test_settings()).await.unwrap();
        let err = service.start(test_settings()).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyActive));
    }

    #[tokio::test]
    async fn test_stop_ends_broadcasts_and_computes_duration() {
        let (service, youtube, _) = build_service(false, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();

        service.start(test_settings()).await.unwrap();
        let status = service.stop().await.unwrap();

        assert!(!status.is_active);
        assert!(status.duration.unwrap() >= 0);
        assert!(!status.platforms[&Platform::YouTube].is_streaming);
        assert_eq!(youtube.ended.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stop_without_active_stream_is_a_no_op() {
        let (service, youtube, _) = build_service(false, false).await;
        let status = service.stop().await.unwrap();
        assert!(!status.is_active);
        assert_eq!(youtube.ended.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stop_skips_platforms_that_never_started() {
        let (service, youtube, linkedin) = build_service(true, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();
        service
            .add_destination(Destination::new(Platform::LinkedIn, "li-acc", true))
            .await
            .unwrap();

        service.start(test_settings()).await.unwrap();
        service.stop().await.unwrap();

        assert_eq!(youtube.ended.load(Ordering::SeqCst), 0);
        assert_eq!(linkedin.ended.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remove_streaming_destination_stops_only_that_platform() {
        let (service, youtube, linkedin) = build_service(false, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();
        service
            .add_destination(Destination::new(Platform::LinkedIn, "li-acc", true))
            .await
            .unwrap();

        service.start(test_settings()).await.unwrap();
        let removed = service
            .remove_destination(Platform::YouTube, "yt-acc")
            .await
            .unwrap();
        assert!(removed);

        let status = service.get_status();
        assert!(status.is_active);
        assert!(!status.platforms[&Platform::YouTube].is_streaming);
        assert!(status.platforms[&Platform::LinkedIn].is_streaming);
        assert_eq!(youtube.ended.load(Ordering::SeqCst), 1);
        assert_eq!(linkedin.ended.load(Ordering::SeqCst), 0);

        assert_eq!(service.list_destinations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_idle_destination_skips_teardown() {
        let (service, youtube, _) = build_service(false, false).await;
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();

        let removed = service
            .remove_destination(Platform::YouTube, "yt-acc")
            .await
            .unwrap();
        assert!(removed);
        assert_eq!(youtube.ended.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stop_platform_stream_with_explicit_account() {
        let (service, youtube, linkedin) = build_service(false, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();
        service
            .add_destination(Destination::new(Platform::LinkedIn, "li-acc", true))
            .await
            .unwrap();
        service.start(test_settings()).await.unwrap();

        service
            .stop_platform_stream(Platform::YouTube, Some("yt-acc"))
            .await
            .unwrap();

        let status = service.get_status();
        assert!(status.is_active);
        assert!(!status.platforms[&Platform::YouTube].is_streaming);
        assert!(status.platforms[&Platform::LinkedIn].is_streaming);
        assert_eq!(youtube.ended.load(Ordering::SeqCst), 1);
        assert_eq!(linkedin.ended.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recover_marks_interrupted_stream() {
        let store = Arc::new(StateStore::in_memory());

        // Simulate a crash: persist an active status directly
        let mut stale = RelayStatus::default();
        stale.begin(Utc::now(), 2500);
        stale
            .platforms
            .insert(Platform::YouTube, PlatformStatus::started("bc-1", Utc::now()));
        store.save(KeyBuilder::status(), &stale).await.unwrap();
        store
            .save(KeyBuilder::relay_config(), &test_config())
            .await
            .unwrap();

        let registry = DestinationRegistry::new(Arc::clone(&store));
        let resolver = Arc::new(StoreCredentialResolver::new(Arc::clone(&store)));
        let service = RelayService::new(
            Arc::clone(&store),
            registry,
            HashMap::new(),
            resolver,
            &RelayOptions::default(),
        );

        service.recover().await.unwrap();

        let status = service.get_status();
        assert!(!status.is_active);
        assert_eq!(
            status.error.as_deref(),
            Some(crate::models::RESTART_INTERRUPTED_ERROR)
        );
        assert!(!status.platforms[&Platform::YouTube].is_streaming);

        // The forced-inactive snapshot must also be durable
        let persisted: RelayStatus = store.get(KeyBuilder::status()).await.unwrap().unwrap();
        assert!(!persisted.is_active);

        // Config mirror reloaded
        assert_eq!(service.get_config().await.unwrap().unwrap().bitrate, 2500);
    }

    #[tokio::test]
    async fn test_recover_with_clean_state_is_quiet() {
        let (service, _, _) = build_service(false, false).await;
        service.recover().await.unwrap();
        let status = service.get_status();
        assert!(!status.is_active);
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn test_reconfigure_mid_stream_keeps_running_parameters() {
        let (service, _, _) = build_service(false, false).await;
        service.configure(test_config()).await.unwrap();
        service
            .add_destination(Destination::new(Platform::YouTube, "yt-acc", true))
            .await
            .unwrap();
        service.start(test_settings()).await.unwrap();

        let mut updated = test_config();
        updated.bitrate = 6000;
        service.configure(updated).await.unwrap();

        // The running session keeps the bitrate it started with
        assert_eq!(service.get_status().bitrate, Some(2500));
        assert_eq!(service.get_config().await.unwrap().unwrap().bitrate, 6000);
    }
}
