//! Capture error types.

use thiserror::Error;

use docrelay_browser::BrowserError;

/// Capture errors.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    /// Neither the transcript panel nor the player captions yielded text.
    #[error("No captions available for this video")]
    NoCaptionsAvailable,

    #[error("Caption fetch failed: {0}")]
    CaptionFetch(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),
}

impl From<reqwest::Error> for CaptureError {
    fn from(e: reqwest::Error) -> Self {
        CaptureError::DownloadFailed(e.to_string())
    }
}

impl From<url::ParseError> for CaptureError {
    fn from(e: url::ParseError) -> Self {
        CaptureError::InvalidUrl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CaptureError::NoCaptionsAvailable.to_string(),
            "No captions available for this video"
        );
        assert_eq!(
            CaptureError::DownloadFailed("HTTP 404".to_string()).to_string(),
            "Download failed: HTTP 404"
        );
    }

    #[test]
    fn test_from_url_error() {
        let err: CaptureError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, CaptureError::InvalidUrl(_)));
    }

    #[test]
    fn test_from_browser_error() {
        let err: CaptureError = BrowserError::NotConnected.into();
        assert!(err.to_string().contains("Browser not connected"));
    }
}
