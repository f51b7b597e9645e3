//! Destination dispatch.

use std::sync::Arc;

use tracing::info;

use docrelay_config::PlatformsConfig;
use docrelay_protocols::Platform;

use crate::error::RelayError;
use crate::tabs::{Tab, TabProvider};

/// A freshly opened destination tab.
#[derive(Debug, Clone)]
pub struct DestinationTab {
    pub platform: Platform,
    pub tab: Tab,
}

/// Opens one new tab at a platform's entry URL.
pub struct Dispatcher {
    tabs: Arc<dyn TabProvider>,
    platforms: PlatformsConfig,
}

impl Dispatcher {
    pub fn new(tabs: Arc<dyn TabProvider>, platforms: PlatformsConfig) -> Self {
        Self { tabs, platforms }
    }

    pub fn entry_url(&self, platform: Platform) -> &str {
        self.platforms.entry_url(platform)
    }

    pub async fn dispatch(&self, platform: Platform) -> Result<DestinationTab, RelayError> {
        let url = self.entry_url(platform);
        let tab = self.tabs.open(url).await.map_err(|source| RelayError::Dispatch {
            platform: platform.display_name().to_string(),
            source,
        })?;

        info!("Opened {} at {} ({})", platform.display_name(), url, tab.target_id);
        Ok(DestinationTab { platform, tab })
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
