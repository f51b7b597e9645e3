use async_trait::async_trait;

use docrelay_protocols::Platform;
use docrelay_store::{PayloadStore, ReadOutcome};

use crate::error::DriverError;

/// Where a destination tab claims its staged payload from.
#[async_trait]
pub trait PayloadSource: Send + Sync {
    async fn take(&self, platform: Platform) -> Result<ReadOutcome, DriverError>;
}

#[async_trait]
impl PayloadSource for PayloadStore {
    async fn take(&self, platform: Platform) -> Result<ReadOutcome, DriverError> {
        Ok(self.read(platform))
    }
}
