//! Browser plumbing for docrelay.
//!
//! Talks to a Chrome/Chromium instance over the Chrome DevTools Protocol and
//! exposes each tab through the [`Page`] trait, which is all the capture and
//! automation crates ever see.
//!
//! ## Setup
//!
//! docrelay launches Chrome with a persistent profile when nothing is listening
//! on the debug port. To reuse an already logged-in browser instead:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! ## Layers
//!
//! - [`cdp`]: WebSocket client and per-target sessions
//! - [`manager`]: launch/attach Chrome, open and track tabs
//! - [`page`]: element queries and DOM actions over a session
//! - [`locator`]: ordered selector strategies resolved against a `Page`
//! - [`poll`]: bounded polling used for every wait

pub mod cdp;
pub mod locator;
pub mod manager;
pub mod page;
pub mod poll;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use locator::{Locator, SelectorStrategy};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
pub use page::{
    AttachMode, CdpPage, ElementHandle, ElementInfo, FileUpload, Page, Rect, TextShape, Viewport,
};
pub use poll::poll_until;
