//! Payload staging between capture and the destination tab.
//!
//! One slot per platform. A write replaces whatever was staged; a read claims
//! and removes the entry, so each capture is consumed at most once.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{PayloadStore, ReadOutcome};
