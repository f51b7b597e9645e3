//! # docrelay core
//!
//! The privileged side of the relay.
//!
//! ## Components
//!
//! - [`MessageRouter`] - answers cross-context actions and runs the relay pipeline
//! - [`InFlightSet`] - rejects a second capture from a tab that is still busy
//! - [`Dispatcher`] - opens the destination tab for a platform
//! - [`TabProvider`] - the browser seam, implemented by `BrowserManager`

pub mod dispatcher;
pub mod error;
pub mod inflight;
pub mod router;
pub mod tabs;

#[cfg(test)]
mod test_support;

pub use dispatcher::{DestinationTab, Dispatcher};
pub use error::RelayError;
pub use inflight::{InFlightGuard, InFlightSet};
pub use router::{MessageRouter, RelayTicket, SendTarget};
pub use tabs::{Tab, TabProvider};
