//! The browser seam used by the relay.

use std::sync::Arc;

use async_trait::async_trait;

use docrelay_browser::{BrowserError, BrowserManager, CdpPage, Page};

/// A tab and its CDP target id.
#[derive(Clone)]
pub struct Tab {
    pub target_id: String,
    pub page: Arc<dyn Page>,
}

impl Tab {
    pub fn new(target_id: impl Into<String>, page: Arc<dyn Page>) -> Self {
        Self {
            target_id: target_id.into(),
            page,
        }
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab").field("target_id", &self.target_id).finish_non_exhaustive()
    }
}

impl From<Arc<CdpPage>> for Tab {
    fn from(page: Arc<CdpPage>) -> Self {
        let target_id = page.target_id().to_string();
        Tab::new(target_id, page)
    }
}

/// Opens and attaches browser tabs.
#[async_trait]
pub trait TabProvider: Send + Sync {
    /// Open `url` in a new tab.
    async fn open(&self, url: &str) -> Result<Tab, BrowserError>;

    /// Attach to an existing tab.
    async fn attach(&self, target_id: &str) -> Result<Tab, BrowserError>;

    /// The tab the user is looking at.
    async fn active(&self) -> Result<Tab, BrowserError>;
}

#[async_trait]
impl TabProvider for BrowserManager {
    async fn open(&self, url: &str) -> Result<Tab, BrowserError> {
        Ok(self.open_tab(url).await?.into())
    }

    async fn attach(&self, target_id: &str) -> Result<Tab, BrowserError> {
        Ok(self.attach_tab(target_id).await?.into())
    }

    async fn active(&self) -> Result<Tab, BrowserError> {
        Ok(self.active_tab().await?.into())
    }
}
