//! Browser instance manager.
//!
//! Attaches to a Chrome already listening on the debug port, or launches one
//! with a persistent profile so the AI sites stay logged in.

mod manager_core;
mod manager_tabs;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
