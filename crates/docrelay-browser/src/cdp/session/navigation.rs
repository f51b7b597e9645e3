//! Navigation state for a CDP page session.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Navigate to URL and wait for the document to become interactive.
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(error.to_string()));
        }

        self.wait_for_load(Duration::from_secs(30)).await?;

        debug!("Navigated to {}", url);
        Ok(())
    }

    /// Wait until `document.readyState` is `interactive` or `complete`.
    pub async fn wait_for_load(&self, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            // Evaluation fails while the new document is being committed.
            if let Ok(result) = self.evaluate("document.readyState").await {
                if Self::is_ready_state(result.as_str()) {
                    return Ok(());
                }
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    pub(super) fn is_ready_state(state: Option<&str>) -> bool {
        matches!(state, Some("complete") | Some("interactive"))
    }

    /// Current URL.
    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}
