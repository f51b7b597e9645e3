//! The tab abstraction used by capture and automation code.
//!
//! A [`Page`] answers selector queries with [`ElementInfo`] snapshots and acts
//! on elements through opaque [`ElementHandle`]s. Every DOM decision (which
//! selector, which candidate, when to give up) is made by the caller.

mod cdp_page;
mod scripts;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::manager::BrowserError;

pub use cdp_page::CdpPage;

/// Opaque reference to an element previously returned by [`Page::query`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(pub String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-space bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Layout viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Snapshot of one element at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    pub handle: ElementHandle,
    /// Lowercase tag name.
    pub tag: String,
    #[serde(default)]
    pub aria_label: Option<String>,
    /// Trimmed text content.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub content_editable: bool,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub rect: Rect,
}

impl ElementInfo {
    pub fn new(handle: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            handle: ElementHandle::new(handle),
            tag: tag.into(),
            aria_label: None,
            text: String::new(),
            disabled: false,
            content_editable: false,
            class_name: String::new(),
            rect: Rect::default(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_rect(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.rect = Rect {
            left,
            top,
            right,
            bottom,
        };
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn editable(mut self) -> Self {
        self.content_editable = true;
        self
    }

    /// Lowercased aria-label, empty when absent.
    pub fn label_lower(&self) -> String {
        self.aria_label.as_deref().unwrap_or("").to_lowercase()
    }

    /// Whether the aria-label or text contains any of `needles`, case-insensitively.
    pub fn mentions_any(&self, needles: &[String]) -> bool {
        let label = self.label_lower();
        let text = self.text.to_lowercase();
        needles.iter().any(|n| {
            let n = n.to_lowercase();
            label.contains(&n) || text.contains(&n)
        })
    }

    /// Whether the class attribute contains `fragment`.
    pub fn has_class_fragment(&self, fragment: &str) -> bool {
        self.class_name.contains(fragment)
    }

    /// The text-entry shape this element needs.
    pub fn text_shape(&self) -> TextShape {
        if self.content_editable {
            TextShape::Rich
        } else {
            TextShape::Plain
        }
    }
}

/// How text is written into an entry element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextShape {
    /// `contenteditable` editor.
    Rich,
    /// `<textarea>` or `<input>`.
    Plain,
}

/// How a file reaches the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachMode {
    /// Assign a synthetic `FileList` to an `<input type=file>` and fire `change`.
    Input,
    /// Dispatch a synthetic `drop` event carrying the file.
    Drop,
}

/// A file handed to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: "application/pdf".to_string(),
            bytes,
        }
    }
}

/// One browser tab.
#[async_trait]
pub trait Page: Send + Sync {
    /// Current URL.
    async fn url(&self) -> Result<String, BrowserError>;

    /// All elements matching `selector`, in document order.
    ///
    /// With `scope` the search is limited to that element's subtree. A selector
    /// the page rejects yields an empty list.
    async fn query(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Vec<ElementInfo>, BrowserError>;

    /// `element.click()`.
    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError>;

    async fn focus(&self, element: &ElementHandle) -> Result<(), BrowserError>;

    /// Replace the element's content with `text` and fire input events.
    async fn insert_text(
        &self,
        element: &ElementHandle,
        text: &str,
        shape: TextShape,
    ) -> Result<(), BrowserError>;

    async fn attach_file(
        &self,
        element: &ElementHandle,
        file: &FileUpload,
        mode: AttachMode,
    ) -> Result<(), BrowserError>;

    /// Dispatch a synthetic Enter `keydown` on the element.
    async fn press_enter(&self, element: &ElementHandle) -> Result<(), BrowserError>;

    async fn viewport(&self) -> Result<Viewport, BrowserError>;

    /// JSON value of `window[name]`, `None` when unset.
    async fn global_json(&self, name: &str) -> Result<Option<Value>, BrowserError>;

    /// Text of every inline `<script>` containing `needle`.
    async fn inline_scripts(&self, needle: &str) -> Result<Vec<String>, BrowserError>;
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
