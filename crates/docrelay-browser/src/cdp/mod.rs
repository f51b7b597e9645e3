//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to Chrome via WebSocket and speaks the CDP JSON-RPC protocol.
//! Every page target gets its own flattened session sharing the browser
//! socket.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let session = client.new_page(Some("https://chatgpt.com/")).await?;
//! let href = session.get_url().await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
