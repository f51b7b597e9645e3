//! Caption fetching through the privileged side.
//!
//! The page never requests caption URLs itself; the extractor hands them to a
//! [`CaptionFetcher`], which the message router implements with its own HTTP
//! client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use docrelay_config::CaptureConfig;

use crate::error::CaptureError;

/// Fetches a caption document and returns its body text.
#[async_trait]
pub trait CaptionFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, CaptureError>;
}

/// Direct HTTP implementation.
pub struct HttpCaptionFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpCaptionFetcher {
    pub fn new(config: &CaptureConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &CaptureConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(config.caption_timeout_secs),
        }
    }
}

#[async_trait]
impl CaptionFetcher for HttpCaptionFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CaptureError> {
        debug!("Fetching captions from {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CaptureError::CaptionFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptureError::CaptionFetch(format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| CaptureError::CaptionFetch(e.to_string()))
    }
}
