use thiserror::Error;

use docrelay_browser::BrowserError;

/// Errors raised inside a driver step. They end up in the
/// [`DriverReport`](crate::DriverReport), never in the caller.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("No {0} on page")]
    Missing(&'static str),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),
}
