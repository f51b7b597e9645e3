//! Timing configuration for page automation and transcript extraction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Destination-tab driver timings and bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Attempts to claim the staged payload.
    #[serde(default = "default_payload_attempts")]
    pub payload_attempts: u32,

    /// Pause between payload claims.
    #[serde(default = "default_payload_retry_ms")]
    pub payload_retry_ms: u64,

    /// How long to wait for the composer to render.
    #[serde(default = "default_composer_timeout_ms")]
    pub composer_timeout_ms: u64,

    /// Attach controls clicked while looking for a file input.
    #[serde(default = "default_attach_attempts")]
    pub attach_attempts: u32,

    /// Pause after clicking an attach control.
    #[serde(default = "default_attach_delay_ms")]
    pub attach_delay_ms: u64,

    /// Submit-control polls.
    #[serde(default = "default_submit_attempts")]
    pub submit_attempts: u32,

    /// Pause between submit-control polls.
    #[serde(default = "default_submit_interval_ms")]
    pub submit_interval_ms: u64,
}

impl AutomationConfig {
    pub fn payload_retry(&self) -> Duration {
        Duration::from_millis(self.payload_retry_ms)
    }

    pub fn composer_timeout(&self) -> Duration {
        Duration::from_millis(self.composer_timeout_ms)
    }

    pub fn attach_delay(&self) -> Duration {
        Duration::from_millis(self.attach_delay_ms)
    }

    pub fn submit_interval(&self) -> Duration {
        Duration::from_millis(self.submit_interval_ms)
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            payload_attempts: default_payload_attempts(),
            payload_retry_ms: default_payload_retry_ms(),
            composer_timeout_ms: default_composer_timeout_ms(),
            attach_attempts: default_attach_attempts(),
            attach_delay_ms: default_attach_delay_ms(),
            submit_attempts: default_submit_attempts(),
            submit_interval_ms: default_submit_interval_ms(),
        }
    }
}

fn default_payload_attempts() -> u32 {
    5
}

fn default_payload_retry_ms() -> u64 {
    800
}

fn default_composer_timeout_ms() -> u64 {
    10_000
}

fn default_attach_attempts() -> u32 {
    5
}

fn default_attach_delay_ms() -> u64 {
    500
}

fn default_submit_attempts() -> u32 {
    10
}

fn default_submit_interval_ms() -> u64 {
    500
}

/// Transcript panel polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Pause after expanding the description.
    #[serde(default = "default_expand_delay_ms")]
    pub expand_delay_ms: u64,

    /// How long to wait for the transcript panel after clicking its control.
    #[serde(default = "default_panel_timeout_ms")]
    pub panel_timeout_ms: u64,

    /// How long to wait for segments inside the panel.
    #[serde(default = "default_segment_timeout_ms")]
    pub segment_timeout_ms: u64,

    /// Poll interval for both waits.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl TranscriptConfig {
    pub fn expand_delay(&self) -> Duration {
        Duration::from_millis(self.expand_delay_ms)
    }

    pub fn panel_timeout(&self) -> Duration {
        Duration::from_millis(self.panel_timeout_ms)
    }

    pub fn segment_timeout(&self) -> Duration {
        Duration::from_millis(self.segment_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            expand_delay_ms: default_expand_delay_ms(),
            panel_timeout_ms: default_panel_timeout_ms(),
            segment_timeout_ms: default_segment_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_expand_delay_ms() -> u64 {
    800
}

fn default_panel_timeout_ms() -> u64 {
    3000
}

fn default_segment_timeout_ms() -> u64 {
    2000
}

fn default_poll_interval_ms() -> u64 {
    300
}
