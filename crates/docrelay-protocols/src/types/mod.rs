//! Domain types shared across docrelay.

mod payload;
mod platform;
mod record;

pub use payload::*;
pub use platform::*;
pub use record::*;
