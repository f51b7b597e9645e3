//! Source classification.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, RANGE};
use tracing::debug;
use url::Url;

use docrelay_config::CaptureConfig;

/// What kind of source a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    YouTubeWatch,
    None,
}

const YOUTUBE_HOSTS: [&str; 3] = ["youtube.com", "www.youtube.com", "m.youtube.com"];
const PDF_MAGIC: &[u8] = b"%PDF";

/// Video id of a YouTube watch URL, if `url` is one.
pub fn youtube_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if !YOUTUBE_HOSTS.contains(&host) || parsed.path() != "/watch" {
        return None;
    }
    parsed
        .query_pairs()
        .find(|(k, _)| k == "v")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Whether the URL itself names a PDF.
fn has_pdf_suffix(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.ends_with(".pdf") || lower.contains(".pdf?") || lower.contains(".pdf#")
}

/// Classifies URLs, sniffing the remote resource only when the URL is ambiguous.
pub struct CaptureProbe {
    client: Client,
    extra_pdf_hosts: Vec<String>,
    timeout: Duration,
}

impl CaptureProbe {
    pub fn new(config: &CaptureConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &CaptureConfig) -> Self {
        Self {
            client,
            extra_pdf_hosts: config
                .extra_pdf_hosts
                .iter()
                .map(|h| h.to_lowercase())
                .collect(),
            timeout: Duration::from_secs(config.probe_timeout_secs),
        }
    }

    /// Classify a URL. Never fails: anything uncertain is [`SourceKind::None`].
    pub async fn classify(&self, url: &str) -> SourceKind {
        if youtube_video_id(url).is_some() {
            return SourceKind::YouTubeWatch;
        }
        if self.is_pdf_without_network(url) {
            return SourceKind::Pdf;
        }
        if self.sniff_pdf(url).await {
            SourceKind::Pdf
        } else {
            SourceKind::None
        }
    }

    /// The fast path: suffix check and the extra host list.
    pub fn is_pdf_without_network(&self, url: &str) -> bool {
        if has_pdf_suffix(url) {
            return true;
        }
        let Some(host) = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
        else {
            return false;
        };
        self.extra_pdf_hosts
            .iter()
            .any(|h| host == *h || host.ends_with(&format!(".{}", h)))
    }

    /// Ranged GET: PDF when the content type says so or the body starts with `%PDF`.
    async fn sniff_pdf(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
            _ => return false,
        }

        let response = match self
            .client
            .get(url)
            .header(RANGE, "bytes=0-10")
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                debug!("PDF probe of {} failed: {}", url, e);
                return false;
            }
        };

        if !response.status().is_success() {
            debug!("PDF probe of {} returned {}", url, response.status());
            return false;
        }

        let content_type_pdf = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.to_lowercase().contains("application/pdf"));
        if content_type_pdf {
            return true;
        }

        let mut response = response;
        match response.chunk().await {
            Ok(Some(chunk)) => chunk.starts_with(PDF_MAGIC),
            Ok(None) => false,
            Err(e) => {
                debug!("PDF probe of {} failed reading body: {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
