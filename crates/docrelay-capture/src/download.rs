//! PDF download.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use docrelay_config::CaptureConfig;
use docrelay_protocols::DEFAULT_PDF_FILENAME;

use crate::error::CaptureError;

/// A downloaded PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Last path segment of `url`, or `document.pdf` when there is none.
pub fn filename_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PDF_FILENAME.to_string())
}

/// Fetches PDF bytes over HTTP.
pub struct PdfDownloader {
    client: Client,
    timeout: Duration,
}

impl PdfDownloader {
    pub fn new(config: &CaptureConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &CaptureConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(config.download_timeout_secs),
        }
    }

    /// Download the document; any non-2xx status is a failure.
    pub async fn download(&self, url: &str) -> Result<PdfDocument, CaptureError> {
        let parsed = Url::parse(url)?;
        debug!("Downloading PDF from {}", parsed);

        let response = self
            .client
            .get(parsed)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptureError::DownloadFailed(format!("HTTP {}", status.as_u16())));
        }

        let bytes = response.bytes().await?.to_vec();
        let filename = filename_from_url(url);
        info!("Downloaded {} ({} bytes)", filename, bytes.len());

        Ok(PdfDocument { bytes, filename })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_filename_from_url() {
        assert_eq!(filename_from_url("https://example.org/papers/exam-2024.pdf"), "exam-2024.pdf");
        assert_eq!(filename_from_url("https://example.org/a/b.pdf?x=1#p2"), "b.pdf");
        assert_eq!(filename_from_url("https://example.org/dir/"), "document.pdf");
        assert_eq!(filename_from_url("https://example.org"), "document.pdf");
        assert_eq!(filename_from_url("::not a url::"), "document.pdf");
    }

    #[tokio::test]
    async fn test_download_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/exam.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7 body".to_vec()))
            .mount(&server)
            .await;

        let downloader = PdfDownloader::new(&CaptureConfig::default());
        let doc = downloader
            .download(&format!("{}/files/exam.pdf", server.uri()))
            .await
            .unwrap();
        assert_eq!(doc.filename, "exam.pdf");
        assert_eq!(doc.bytes, b"%PDF-1.7 body".to_vec());
    }

    #[tokio::test]
    async fn test_download_non_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let downloader = PdfDownloader::new(&CaptureConfig::default());
        let err = downloader
            .download(&format!("{}/secret.pdf", server.uri()))
            .await
            .unwrap_err();
        match err {
            CaptureError::DownloadFailed(msg) => assert_eq!(msg, "HTTP 403"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_download_unreachable() {
        let downloader = PdfDownloader::new(&CaptureConfig::default());
        let err = downloader.download("http://127.0.0.1:1/x.pdf").await.unwrap_err();
        assert!(matches!(err, CaptureError::DownloadFailed(_)));
    }

    #[tokio::test]
    async fn test_download_invalid_url() {
        let downloader = PdfDownloader::new(&CaptureConfig::default());
        let err = downloader.download("nope").await.unwrap_err();
        assert!(matches!(err, CaptureError::InvalidUrl(_)));
    }
}
