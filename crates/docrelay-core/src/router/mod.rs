//! Cross-context message routing.
//!
//! The router owns everything the privileged side of the relay needs: the
//! payload store, the HTTP clients, the settings file and the in-flight set.
//! Destination drivers claim payloads through it and the transcript extractor
//! fetches caption URLs through it.

mod relay;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use docrelay_capture::{
    CaptionFetcher, CaptureError, CaptureProbe, HttpCaptionFetcher, PdfDownloader, SourceKind,
};
use docrelay_config::{Config, ConfigLoader, SettingsStore};
use docrelay_driver::{DriverError, DriverReport, PayloadSource, PlatformProfile};
use docrelay_protocols::{Action, ActionResponse, PayloadKind, Platform, StagedRecord};
use docrelay_store::{PayloadStore, ReadOutcome};

use crate::dispatcher::Dispatcher;
use crate::inflight::InFlightSet;
use crate::tabs::TabProvider;

pub use relay::{RelayTicket, SendTarget};

/// Routes [`Action`]s and runs the relay pipeline.
pub struct MessageRouter {
    config: Config,
    store: Arc<PayloadStore>,
    settings: SettingsStore,
    probe: CaptureProbe,
    downloader: PdfDownloader,
    captions: Arc<dyn CaptionFetcher>,
    tabs: Arc<dyn TabProvider>,
    dispatcher: Dispatcher,
    in_flight: InFlightSet,
    profiles: HashMap<Platform, PlatformProfile>,
    deliveries: Mutex<Vec<JoinHandle<DriverReport>>>,
}

impl MessageRouter {
    pub fn new(config: Config, tabs: Arc<dyn TabProvider>) -> Self {
        let settings = SettingsStore::new(ConfigLoader::expand_path(&config.settings_path));
        let profiles = Platform::ALL
            .into_iter()
            .map(|p| (p, PlatformProfile::for_platform(p)))
            .collect();

        Self {
            store: Arc::new(PayloadStore::new(&config.store)),
            settings,
            probe: CaptureProbe::new(&config.capture),
            downloader: PdfDownloader::new(&config.capture),
            captions: Arc::new(HttpCaptionFetcher::new(&config.capture)),
            dispatcher: Dispatcher::new(tabs.clone(), config.platforms.clone()),
            tabs,
            in_flight: InFlightSet::new(),
            profiles,
            deliveries: Mutex::new(Vec::new()),
            config,
        }
    }

    /// Replace the automation profile used for one platform.
    pub fn with_profile(mut self, profile: PlatformProfile) -> Self {
        self.profiles.insert(profile.platform, profile);
        self
    }

    /// Replace the payload store, e.g. to share one with another component.
    pub fn with_store(mut self, store: Arc<PayloadStore>) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<PayloadStore> {
        &self.store
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn in_flight(&self) -> &InFlightSet {
        &self.in_flight
    }

    pub fn profile(&self, platform: Platform) -> PlatformProfile {
        self.profiles
            .get(&platform)
            .cloned()
            .unwrap_or_else(|| PlatformProfile::for_platform(platform))
    }

    /// Answer one action. Failures become `{success: false, error}`.
    pub async fn route(self: &Arc<Self>, action: Action) -> ActionResponse {
        let name = action.name();
        debug!("Routing {}", name);

        let result = match action {
            Action::GetPdfData { platform } => self.claim_record(platform, PayloadKind::Pdf),
            Action::GetYouTubeData { platform } => self.claim_record(platform, PayloadKind::Transcript),
            Action::ProcessPdf {
                url,
                prompt,
                platform,
                tab_id,
            } => self
                .send_pdf(&url, tab_id.as_deref(), prompt, platform)
                .await
                .map(RelayTicket::into_response),
            Action::ProcessYouTubeTranscript {
                tab_id,
                prompt,
                platform,
                summarize,
            } => self
                .send_transcript(&tab_id, prompt, platform, summarize)
                .await
                .map(RelayTicket::into_response),
            Action::CheckIfPdf { url } => {
                let is_pdf = self.probe.classify(&url).await == SourceKind::Pdf;
                Ok(ActionResponse::ok().with("isPDF", is_pdf))
            }
            Action::FetchCaptionUrl { url } => self
                .captions
                .fetch(&url)
                .await
                .map(|text| ActionResponse::ok().with("text", text))
                .map_err(Into::into),
        };

        match result {
            Ok(response) => response,
            Err(e) => {
                warn!("{} failed: {}", name, e);
                ActionResponse::failure(e.to_string())
            }
        }
    }

    /// Claim the staged payload of `kind` for `platform` as a wire record.
    ///
    /// A payload of the other kind is left in place.
    fn claim_record(
        &self,
        platform: Platform,
        kind: PayloadKind,
    ) -> Result<ActionResponse, crate::RelayError> {
        let nothing = || match kind {
            PayloadKind::Pdf => ActionResponse::failure("No pending PDF data"),
            PayloadKind::Transcript => ActionResponse::failure("No pending YouTube data"),
        };

        match self.store.read_kind(platform, kind) {
            ReadOutcome::Payload(payload) => {
                info!("{} claimed staged {:?}", platform, kind);
                Ok(ActionResponse::ok().with_record(&StagedRecord::from(&payload))?)
            }
            ReadOutcome::Expired | ReadOutcome::Absent => Ok(nothing()),
        }
    }

    /// Wait for every spawned destination driver and collect their reports.
    pub async fn wait_for_deliveries(&self) -> Vec<DriverReport> {
        let handles: Vec<_> = std::mem::take(&mut *self.deliveries.lock());
        let mut reports = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => warn!("Destination driver task failed: {}", e),
            }
        }
        reports
    }
}

#[async_trait]
impl CaptionFetcher for MessageRouter {
    async fn fetch(&self, url: &str) -> Result<String, CaptureError> {
        self.captions.fetch(url).await
    }
}

#[async_trait]
impl PayloadSource for MessageRouter {
    async fn take(&self, platform: Platform) -> Result<ReadOutcome, DriverError> {
        self.store.take(platform).await
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
