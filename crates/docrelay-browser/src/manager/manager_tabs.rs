//! BrowserManager tab management.

use std::sync::Arc;

use tracing::debug;

use super::{BrowserError, BrowserManager};
use crate::cdp::PageInfo;
use crate::page::CdpPage;

impl BrowserManager {
    /// Open a new foreground tab at `url` and wait for it to load.
    pub async fn open_tab(&self, url: &str) -> Result<Arc<CdpPage>, BrowserError> {
        let client = self.client().await?;

        let session = client.new_page(None).await?;
        session.navigate(url).await?;

        let target_id = session.target_id().to_string();
        client.activate_page(&target_id).await?;
        let page = Arc::new(CdpPage::new(session));
        self.tabs
            .write()
            .await
            .insert(target_id.clone(), page.clone());

        debug!("Opened tab {}: {}", target_id, url);
        Ok(page)
    }

    /// Attach to an existing tab by target id, reusing an earlier attachment.
    pub async fn attach_tab(&self, target_id: &str) -> Result<Arc<CdpPage>, BrowserError> {
        if let Some(page) = self.tabs.read().await.get(target_id) {
            return Ok(page.clone());
        }

        let client = self.client().await?;
        let session = client.attach_page(target_id).await?;
        let page = Arc::new(CdpPage::new(session));
        self.tabs
            .write()
            .await
            .insert(target_id.to_string(), page.clone());

        debug!("Attached to tab {}", target_id);
        Ok(page)
    }

    /// The tab the user is looking at: the first regular web tab.
    pub async fn active_tab(&self) -> Result<Arc<CdpPage>, BrowserError> {
        let tab = self
            .list_tabs()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::TabNotFound("no open web tab".to_string()))?;
        self.attach_tab(&tab.id).await
    }

    /// Regular web tabs, in the browser's order.
    pub async fn list_tabs(&self) -> Result<Vec<PageInfo>, BrowserError> {
        let client = self.client().await?;
        let pages = client.list_pages().await?;
        Ok(pages.into_iter().filter(PageInfo::is_web_tab).collect())
    }

    /// Target ids of the tabs attached through this manager.
    pub async fn attached_tabs(&self) -> Vec<String> {
        self.tabs.read().await.keys().cloned().collect()
    }
}
