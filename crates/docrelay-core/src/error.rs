//! Relay error types.

use thiserror::Error;

use docrelay_browser::BrowserError;
use docrelay_capture::CaptureError;
use docrelay_config::ConfigError;
use docrelay_protocols::ProtocolError;

/// Errors surfaced to whoever triggered a relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The source is neither a PDF nor a YouTube watch page.
    #[error("Not a PDF or YouTube video page: {0}")]
    Ineligible(String),

    #[error("A capture from {0} is already in progress")]
    AlreadyInFlight(String),

    #[error("Could not open {platform} tab: {source}")]
    Dispatch {
        platform: String,
        #[source]
        source: BrowserError,
    },

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Settings error: {0}")]
    Settings(#[from] ConfigError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
