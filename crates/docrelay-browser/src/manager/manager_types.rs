//! Browser manager type definitions and configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use docrelay_config::BrowserConfig;

use crate::cdp::CdpError;

/// Browser and page errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Tab not found: {0}")]
    TabNotFound(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Chrome not found. Please install Google Chrome.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::ChromeNotAvailable(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::PageNotFound(id) => BrowserError::TabNotFound(id),
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::JavaScript(msg) => BrowserError::ActionFailed(format!("JS error: {}", msg)),
            CdpError::Timeout(msg) => BrowserError::ActionFailed(format!("Timeout: {}", msg)),
            CdpError::SessionClosed => BrowserError::NotConnected,
            _ => BrowserError::ActionFailed(e.to_string()),
        }
    }
}

/// Browser manager configuration.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Profile directory for persistent login state.
    pub profile_dir: Option<PathBuf>,
    /// Whether a launched Chrome runs headless.
    pub headless: bool,
    /// How long to wait for a launched Chrome to answer.
    pub launch_timeout: Duration,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self::from(&BrowserConfig::default())
    }
}

impl From<&BrowserConfig> for BrowserManagerConfig {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            debug_port: config.debug_port,
            profile_dir: config
                .profile_dir
                .as_deref()
                .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref())),
            headless: config.headless,
            launch_timeout: Duration::from_millis(config.launch_timeout_ms),
        }
    }
}

impl BrowserManagerConfig {
    /// The profile directory, falling back to `~/.docrelay/browser-profile`.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".docrelay")
                .join("browser-profile")
        })
    }

    /// The CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}
