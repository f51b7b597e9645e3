//! Drives a destination chat page: claims the staged payload, attaches the
//! PDF, writes the prompt into the composer and submits it.
//!
//! Everything platform specific lives in a [`PlatformProfile`]; the driver
//! itself is the same for every destination.

mod driver;
mod error;
mod profile;
mod report;
mod source;
mod submit;

pub use driver::PageDriver;
pub use error::DriverError;
pub use profile::{PlatformProfile, SubmitHeuristic};
pub use report::{AttachOutcome, DriverOutcome, DriverReport, DriverState, SubmitOutcome};
pub use source::PayloadSource;
pub use submit::SubmitTarget;
