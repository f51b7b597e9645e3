//! Shared fakes for the router and dispatcher tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use docrelay_browser::testing::FakePage;
use docrelay_browser::{BrowserError, ElementInfo};

use crate::tabs::{Tab, TabProvider};

/// Tabs backed by [`FakePage`]s. Opened tabs get a ChatGPT/Claude-like
/// composer and send button so a driver can complete against them.
#[derive(Default)]
pub struct FakeTabs {
    existing: Mutex<HashMap<String, Arc<FakePage>>>,
    opened: Mutex<Vec<(String, Arc<FakePage>)>>,
    fail_open: Mutex<bool>,
}

impl FakeTabs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, target_id: &str, page: FakePage) -> Arc<FakePage> {
        let page = Arc::new(page);
        self.existing.lock().insert(target_id.to_string(), page.clone());
        page
    }

    pub fn fail_open(&self) {
        *self.fail_open.lock() = true;
    }

    /// URLs opened so far, in order.
    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn opened_page(&self, index: usize) -> Option<Arc<FakePage>> {
        self.opened.lock().get(index).map(|(_, page)| page.clone())
    }
}

pub fn destination_page(url: &str) -> FakePage {
    let page = FakePage::new(url);
    page.add(
        r#"div[contenteditable="true"]"#,
        ElementInfo::new("composer", "div").editable(),
    );
    page.add(r#"input[type="file"]"#, ElementInfo::new("file", "input"));
    page.add(
        r#"button[aria-label*="Send"]"#,
        ElementInfo::new("send", "button").with_aria_label("Send message"),
    );
    page
}

#[async_trait]
impl TabProvider for FakeTabs {
    async fn open(&self, url: &str) -> Result<Tab, BrowserError> {
        if *self.fail_open.lock() {
            return Err(BrowserError::ConnectionFailed("browser gone".to_string()));
        }
        let mut opened = self.opened.lock();
        let page = Arc::new(destination_page(url));
        opened.push((url.to_string(), page.clone()));
        Ok(Tab::new(format!("dest-{}", opened.len()), page))
    }

    async fn attach(&self, target_id: &str) -> Result<Tab, BrowserError> {
        self.existing
            .lock()
            .get(target_id)
            .cloned()
            .map(|page| Tab::new(target_id, page))
            .ok_or_else(|| BrowserError::TabNotFound(target_id.to_string()))
    }

    async fn active(&self) -> Result<Tab, BrowserError> {
        let existing = self.existing.lock();
        let mut ids: Vec<&String> = existing.keys().collect();
        ids.sort();
        let id = ids
            .first()
            .ok_or_else(|| BrowserError::TabNotFound("no open web tab".to_string()))?;
        Ok(Tab::new(id.as_str(), existing[*id].clone()))
    }
}
