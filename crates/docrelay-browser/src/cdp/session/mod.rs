//! CDP session attached to a single tab.

mod core;
mod js;
mod navigation;

pub use self::core::PageSession;
