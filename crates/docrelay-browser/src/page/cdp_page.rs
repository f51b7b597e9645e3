//! [`Page`] implementation over a live CDP session.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use tracing::trace;

use super::{scripts, AttachMode, ElementHandle, ElementInfo, FileUpload, Page, TextShape, Viewport};
use crate::cdp::PageSession;
use crate::manager::BrowserError;

/// A browser tab driven through CDP.
pub struct CdpPage {
    session: PageSession,
}

impl CdpPage {
    pub fn new(session: PageSession) -> Self {
        Self { session }
    }

    /// Target id of the tab.
    pub fn target_id(&self) -> &str {
        self.session.target_id()
    }

    async fn eval(&self, script: &str) -> Result<Value, BrowserError> {
        trace!(target_id = %self.target_id(), "evaluate {} bytes", script.len());
        Ok(self.session.evaluate(script).await?)
    }

    /// Run an element action; a `false` result means the handle no longer resolves.
    async fn act(&self, handle: &ElementHandle, script: String) -> Result<(), BrowserError> {
        match self.eval(&script).await?.as_bool() {
            Some(true) => Ok(()),
            _ => Err(BrowserError::ElementNotFound(handle.to_string())),
        }
    }
}

#[async_trait]
impl Page for CdpPage {
    async fn url(&self) -> Result<String, BrowserError> {
        Ok(self.session.get_url().await?)
    }

    async fn query(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Vec<ElementInfo>, BrowserError> {
        let value = self.eval(&scripts::query(selector, scope)).await?;
        serde_json::from_value(value)
            .map_err(|e| BrowserError::ActionFailed(format!("bad query result: {}", e)))
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.act(element, scripts::click(element)).await
    }

    async fn focus(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.act(element, scripts::focus(element)).await
    }

    async fn insert_text(
        &self,
        element: &ElementHandle,
        text: &str,
        shape: TextShape,
    ) -> Result<(), BrowserError> {
        self.act(element, scripts::insert_text(element, text, shape))
            .await
    }

    async fn attach_file(
        &self,
        element: &ElementHandle,
        file: &FileUpload,
        mode: AttachMode,
    ) -> Result<(), BrowserError> {
        let encoded = BASE64.encode(&file.bytes);
        let script = scripts::attach_file(element, &file.name, &file.mime_type, &encoded, mode);
        self.act(element, script).await
    }

    async fn press_enter(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.act(element, scripts::press_enter(element)).await
    }

    async fn viewport(&self) -> Result<Viewport, BrowserError> {
        let value = self.eval(scripts::VIEWPORT).await?;
        serde_json::from_value(value)
            .map_err(|e| BrowserError::ActionFailed(format!("bad viewport: {}", e)))
    }

    async fn global_json(&self, name: &str) -> Result<Option<Value>, BrowserError> {
        let value = self.eval(&scripts::global_json(name)).await?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn inline_scripts(&self, needle: &str) -> Result<Vec<String>, BrowserError> {
        let value = self.eval(&scripts::inline_scripts(needle)).await?;
        serde_json::from_value(value)
            .map_err(|e| BrowserError::ActionFailed(format!("bad script list: {}", e)))
    }
}
