//! In-memory [`Page`] for tests.
//!
//! Elements are registered under the exact selector strings the code under
//! test will query; anything else matches nothing, the way a page rejects a
//! selector it cannot parse. Every action is recorded.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::manager::BrowserError;
use crate::page::{AttachMode, ElementHandle, ElementInfo, FileUpload, Page, TextShape, Viewport};

/// An action performed on a [`FakePage`].
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    Click(ElementHandle),
    Focus(ElementHandle),
    InsertText {
        element: ElementHandle,
        text: String,
        shape: TextShape,
    },
    AttachFile {
        element: ElementHandle,
        name: String,
        size: usize,
        mode: AttachMode,
    },
    PressEnter(ElementHandle),
}

#[derive(Debug, Clone)]
struct FakeElement {
    info: ElementInfo,
    selectors: Vec<String>,
    scope: Option<ElementHandle>,
    /// Hidden until this element is clicked.
    revealed_by: Option<ElementHandle>,
}

#[derive(Debug, Default)]
struct FakeState {
    elements: Vec<FakeElement>,
    clicked: Vec<ElementHandle>,
    actions: Vec<PageAction>,
    globals: HashMap<String, Value>,
    scripts: Vec<String>,
    failing_queries: Vec<String>,
    closed: bool,
}

/// Scriptable in-memory tab.
pub struct FakePage {
    url: Mutex<String>,
    viewport: Mutex<Viewport>,
    state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Mutex::new(url.into()),
            viewport: Mutex::new(Viewport {
                width: 1280.0,
                height: 800.0,
            }),
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Register `info` under `selector`. Registering a known handle again adds
    /// the selector to it.
    pub fn add(&self, selector: &str, info: ElementInfo) -> ElementHandle {
        self.insert(selector, info, None, None)
    }

    /// Register an element inside `scope`.
    pub fn add_within(&self, scope: &ElementHandle, selector: &str, info: ElementInfo) -> ElementHandle {
        self.insert(selector, info, Some(scope.clone()), None)
    }

    /// Register an element that only appears once `trigger` is clicked.
    pub fn add_revealed_by(
        &self,
        trigger: &ElementHandle,
        selector: &str,
        info: ElementInfo,
    ) -> ElementHandle {
        self.insert(selector, info, None, Some(trigger.clone()))
    }

    fn insert(
        &self,
        selector: &str,
        info: ElementInfo,
        scope: Option<ElementHandle>,
        revealed_by: Option<ElementHandle>,
    ) -> ElementHandle {
        let handle = info.handle.clone();
        let mut state = self.state.lock();
        if let Some(existing) = state.elements.iter_mut().find(|e| e.info.handle == handle) {
            existing.selectors.push(selector.to_string());
        } else {
            state.elements.push(FakeElement {
                info,
                selectors: vec![selector.to_string()],
                scope,
                revealed_by,
            });
        }
        handle
    }

    /// Drop an element, e.g. to simulate a re-render.
    pub fn remove(&self, handle: &ElementHandle) {
        self.state.lock().elements.retain(|e| &e.info.handle != handle);
    }

    pub fn set_url(&self, url: impl Into<String>) {
        *self.url.lock() = url.into();
    }

    pub fn set_viewport(&self, width: f64, height: f64) {
        *self.viewport.lock() = Viewport { width, height };
    }

    pub fn set_global(&self, name: &str, value: Value) {
        self.state.lock().globals.insert(name.to_string(), value);
    }

    pub fn add_inline_script(&self, text: impl Into<String>) {
        self.state.lock().scripts.push(text.into());
    }

    /// Make queries whose selector starts with `prefix` fail, as they do while
    /// the page's execution context is being replaced.
    pub fn fail_queries(&self, prefix: &str) {
        self.state.lock().failing_queries.push(prefix.to_string());
    }

    /// Make every later call fail as if the tab had been closed.
    pub fn close(&self) {
        self.state.lock().closed = true;
    }

    /// Everything done to the page so far.
    pub fn actions(&self) -> Vec<PageAction> {
        self.state.lock().actions.clone()
    }

    /// Handles clicked so far, in order.
    pub fn clicks(&self) -> Vec<ElementHandle> {
        self.state.lock().clicked.clone()
    }

    pub fn was_clicked(&self, handle: &str) -> bool {
        self.state
            .lock()
            .clicked
            .iter()
            .any(|h| h.as_str() == handle)
    }

    fn check_open(&self) -> Result<(), BrowserError> {
        if self.state.lock().closed {
            Err(BrowserError::NotConnected)
        } else {
            Ok(())
        }
    }

    fn record(&self, element: &ElementHandle, action: PageAction) -> Result<(), BrowserError> {
        self.check_open()?;
        let mut state = self.state.lock();
        if !state.elements.iter().any(|e| &e.info.handle == element) {
            return Err(BrowserError::ElementNotFound(element.to_string()));
        }
        if let PageAction::Click(handle) = &action {
            state.clicked.push(handle.clone());
        }
        state.actions.push(action);
        Ok(())
    }
}

#[async_trait]
impl Page for FakePage {
    async fn url(&self) -> Result<String, BrowserError> {
        self.check_open()?;
        Ok(self.url.lock().clone())
    }

    async fn query(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Vec<ElementInfo>, BrowserError> {
        self.check_open()?;
        let state = self.state.lock();
        if state.failing_queries.iter().any(|p| selector.starts_with(p.as_str())) {
            return Err(BrowserError::ActionFailed(
                "Execution context was destroyed".to_string(),
            ));
        }
        Ok(state
            .elements
            .iter()
            .filter(|e| e.selectors.iter().any(|s| s == selector))
            .filter(|e| scope.is_none() || e.scope.as_ref() == scope)
            .filter(|e| {
                e.revealed_by
                    .as_ref()
                    .is_none_or(|trigger| state.clicked.contains(trigger))
            })
            .map(|e| e.info.clone())
            .collect())
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.record(element, PageAction::Click(element.clone()))
    }

    async fn focus(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.record(element, PageAction::Focus(element.clone()))
    }

    async fn insert_text(
        &self,
        element: &ElementHandle,
        text: &str,
        shape: TextShape,
    ) -> Result<(), BrowserError> {
        self.record(
            element,
            PageAction::InsertText {
                element: element.clone(),
                text: text.to_string(),
                shape,
            },
        )
    }

    async fn attach_file(
        &self,
        element: &ElementHandle,
        file: &FileUpload,
        mode: AttachMode,
    ) -> Result<(), BrowserError> {
        self.record(
            element,
            PageAction::AttachFile {
                element: element.clone(),
                name: file.name.clone(),
                size: file.bytes.len(),
                mode,
            },
        )
    }

    async fn press_enter(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.record(element, PageAction::PressEnter(element.clone()))
    }

    async fn viewport(&self) -> Result<Viewport, BrowserError> {
        self.check_open()?;
        Ok(*self.viewport.lock())
    }

    async fn global_json(&self, name: &str) -> Result<Option<Value>, BrowserError> {
        self.check_open()?;
        Ok(self.state.lock().globals.get(name).cloned())
    }

    async fn inline_scripts(&self, needle: &str) -> Result<Vec<String>, BrowserError> {
        self.check_open()?;
        Ok(self
            .state
            .lock()
            .scripts
            .iter()
            .filter(|s| s.contains(needle))
            .cloned()
            .collect())
    }
}
