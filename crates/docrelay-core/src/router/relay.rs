//! The capture → stage → dispatch → drive pipeline.

use std::sync::Arc;

use tracing::{debug, info};

use docrelay_capture::{SourceKind, TranscriptExtractor, youtube_video_id};
use docrelay_driver::PageDriver;
use docrelay_protocols::{ActionResponse, Payload, PayloadKind, Platform};

use super::MessageRouter;
use crate::dispatcher::DestinationTab;
use crate::error::RelayError;
use crate::tabs::Tab;

/// What a `send` should capture from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendTarget {
    /// A URL; PDFs are downloaded directly, watch pages are opened first.
    Url(String),
    /// An open tab, by CDP target id.
    Tab(String),
    /// The tab the user is looking at.
    Active,
}

/// A staged payload and the tab it was dispatched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTicket {
    pub platform: Platform,
    pub kind: PayloadKind,
    pub destination: String,
    /// Size of the staged artifact.
    pub len: usize,
}

impl RelayTicket {
    pub fn into_response(self) -> ActionResponse {
        ActionResponse::ok()
            .with("platform", self.platform.id())
            .with("tabId", self.destination)
            .with("length", self.len)
    }
}

impl MessageRouter {
    /// Capture whatever `target` shows and relay it.
    pub async fn send(
        self: &Arc<Self>,
        target: SendTarget,
        prompt: Option<String>,
        platform: Option<Platform>,
        summarize: bool,
    ) -> Result<RelayTicket, RelayError> {
        let tab = match target {
            SendTarget::Url(url) => match self.probe.classify(&url).await {
                SourceKind::Pdf => return self.send_pdf(&url, None, prompt, platform).await,
                SourceKind::YouTubeWatch => self.tabs.open(&url).await?,
                SourceKind::None => return Err(RelayError::Ineligible(url)),
            },
            SendTarget::Tab(target_id) => self.tabs.attach(&target_id).await?,
            SendTarget::Active => self.tabs.active().await?,
        };

        let url = tab.page.url().await?;
        match self.probe.classify(&url).await {
            SourceKind::Pdf => self.send_pdf(&url, Some(tab.target_id.as_str()), prompt, platform).await,
            SourceKind::YouTubeWatch => {
                self.relay_transcript(&tab, prompt, platform, summarize).await
            }
            SourceKind::None => Err(RelayError::Ineligible(url)),
        }
    }

    /// Download the PDF at `url` and relay it.
    ///
    /// `source_tab` only keys the in-flight set; without it the URL does.
    pub async fn send_pdf(
        self: &Arc<Self>,
        url: &str,
        source_tab: Option<&str>,
        prompt: Option<String>,
        platform: Option<Platform>,
    ) -> Result<RelayTicket, RelayError> {
        let _guard = self.in_flight.acquire(source_tab.unwrap_or(url))?;

        if self.probe.classify(url).await != SourceKind::Pdf {
            return Err(RelayError::Ineligible(url.to_string()));
        }

        let settings = self.settings.load()?;
        let explicit = prompt.is_some() || platform.is_some();
        let prompt = prompt.unwrap_or(settings.pdf_prompt);
        let platform = platform.unwrap_or(settings.pdf_platform);
        if explicit {
            self.settings.remember_pdf(&prompt, platform)?;
        }

        info!("Downloading PDF for {}: {}", platform.display_name(), url);
        let document = self.downloader.download(url).await?;
        let payload = Payload::pdf(document.bytes, document.filename, prompt, platform);
        self.deliver(payload).await
    }

    /// Extract the transcript of the watch page in tab `tab_id` and relay it.
    pub async fn send_transcript(
        self: &Arc<Self>,
        tab_id: &str,
        prompt: Option<String>,
        platform: Option<Platform>,
        summarize: bool,
    ) -> Result<RelayTicket, RelayError> {
        let tab = self.tabs.attach(tab_id).await?;
        self.relay_transcript(&tab, prompt, platform, summarize).await
    }

    async fn relay_transcript(
        self: &Arc<Self>,
        tab: &Tab,
        prompt: Option<String>,
        platform: Option<Platform>,
        summarize: bool,
    ) -> Result<RelayTicket, RelayError> {
        let _guard = self.in_flight.acquire(tab.target_id.as_str())?;

        let url = tab.page.url().await?;
        if youtube_video_id(&url).is_none() {
            return Err(RelayError::Ineligible(url));
        }

        let settings = self.settings.load()?;
        let explicit = prompt.is_some() || platform.is_some();
        let prompt = prompt.unwrap_or_else(|| settings.transcript_prompt_for(summarize).to_string());
        let platform = platform.unwrap_or(settings.youtube_platform);
        if explicit {
            self.settings.remember_transcript(&prompt, platform, summarize)?;
        }

        info!("Extracting transcript from {}", url);
        let extractor = TranscriptExtractor::new(self.config.transcript.clone(), self.clone());
        let text = extractor.extract(tab.page.as_ref()).await?;
        self.deliver(Payload::transcript(text, prompt, platform)).await
    }

    /// Stage `payload`, open its destination and start the driver there.
    async fn deliver(self: &Arc<Self>, payload: Payload) -> Result<RelayTicket, RelayError> {
        let platform = payload.platform;
        let kind = payload.kind();
        let len = payload.artifact_len();

        let purged = self.store.purge_expired();
        if purged > 0 {
            debug!("Dropped {} stale payloads before staging", purged);
        }
        self.store.write(platform, payload);

        let DestinationTab { tab, .. } = self.dispatcher.dispatch(platform).await?;
        let driver = PageDriver::new(
            self.profile(platform),
            self.config.automation.clone(),
            self.clone(),
        );
        let page = tab.page.clone();
        let handle = tokio::spawn(async move { driver.run(page.as_ref()).await });
        self.deliveries.lock().push(handle);

        Ok(RelayTicket {
            platform,
            kind,
            destination: tab.target_id,
            len,
        })
    }
}
