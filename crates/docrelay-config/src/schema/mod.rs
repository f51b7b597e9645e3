//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use docrelay_protocols::Platform;

mod schema_automation;

pub use schema_automation::*;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub transcript: TranscriptConfig,

    #[serde(default)]
    pub automation: AutomationConfig,

    #[serde(default)]
    pub platforms: PlatformsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where the user's prompt/platform settings are persisted.
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            store: StoreConfig::default(),
            capture: CaptureConfig::default(),
            transcript: TranscriptConfig::default(),
            automation: AutomationConfig::default(),
            platforms: PlatformsConfig::default(),
            logging: LoggingConfig::default(),
            settings_path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> String {
    "~/.docrelay/settings.json".to_string()
}

/// Chrome connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Launch Chrome headless when docrelay has to start it.
    #[serde(default)]
    pub headless: bool,

    /// Profile directory for a launched Chrome; keeps the AI sites logged in.
    #[serde(default)]
    pub profile_dir: Option<String>,

    /// How long to wait for a launched Chrome to answer.
    #[serde(default = "default_launch_timeout_ms")]
    pub launch_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            profile_dir: None,
            launch_timeout_ms: default_launch_timeout_ms(),
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_launch_timeout_ms() -> u64 {
    6000
}

/// Payload store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How long a staged payload stays claimable.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

fn default_ttl_seconds() -> u64 {
    300
}

/// Capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Hosts whose pages are always treated as PDF sources.
    #[serde(default = "default_extra_pdf_hosts")]
    pub extra_pdf_hosts: Vec<String>,

    /// Timeout of the ranged GET used to sniff ambiguous URLs.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Timeout of a full PDF download.
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    /// Timeout of a caption fetch.
    #[serde(default = "default_caption_timeout_secs")]
    pub caption_timeout_secs: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            extra_pdf_hosts: default_extra_pdf_hosts(),
            probe_timeout_secs: default_probe_timeout_secs(),
            download_timeout_secs: default_download_timeout_secs(),
            caption_timeout_secs: default_caption_timeout_secs(),
        }
    }
}

fn default_extra_pdf_hosts() -> Vec<String> {
    vec!["moex.gov.tw".to_string()]
}

fn default_probe_timeout_secs() -> u64 {
    10
}

fn default_download_timeout_secs() -> u64 {
    60
}

fn default_caption_timeout_secs() -> u64 {
    20
}

/// Entry URL of one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub url: String,
}

/// Destination platform configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformsConfig {
    #[serde(default = "default_chatgpt")]
    pub chatgpt: PlatformConfig,

    #[serde(default = "default_claude")]
    pub claude: PlatformConfig,
}

impl PlatformsConfig {
    /// Entry URL for a platform.
    pub fn entry_url(&self, platform: Platform) -> &str {
        match platform {
            Platform::ChatGpt => &self.chatgpt.url,
            Platform::Claude => &self.claude.url,
        }
    }
}

impl Default for PlatformsConfig {
    fn default() -> Self {
        Self {
            chatgpt: default_chatgpt(),
            claude: default_claude(),
        }
    }
}

fn default_chatgpt() -> PlatformConfig {
    PlatformConfig {
        url: Platform::ChatGpt.default_entry_url().to_string(),
    }
}

fn default_claude() -> PlatformConfig {
    PlatformConfig {
        url: Platform::Claude.default_entry_url().to_string(),
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory of the rolling log files.
    #[serde(default = "default_log_dir")]
    pub dir: String,

    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Number of daily files kept.
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_dir() -> String {
    "~/.docrelay/logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    14
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
