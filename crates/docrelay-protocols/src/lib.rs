//! # docrelay Protocols
//!
//! Types shared by every docrelay crate: the supported AI platforms, the staged
//! payload and its wire record, and the request/response actions exchanged
//! between the capture side and the destination side.
//!
//! Contains no I/O.

pub mod error;
pub mod message;
pub mod types;

pub use error::ProtocolError;
pub use message::{Action, ActionResponse};
pub use types::*;
