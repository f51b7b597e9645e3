//! Per-source-tab capture tracking.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::RelayError;

/// Source tabs with a capture in progress.
#[derive(Debug, Clone, Default)]
pub struct InFlightSet {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` busy until the returned guard is dropped.
    pub fn acquire(&self, key: impl Into<String>) -> Result<InFlightGuard, RelayError> {
        let key = key.into();
        if !self.keys.lock().insert(key.clone()) {
            return Err(RelayError::AlreadyInFlight(key));
        }
        debug!("Capture started for {}", key);
        Ok(InFlightGuard {
            keys: self.keys.clone(),
            key,
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

/// Releases its key on drop, whether the capture finished or failed.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl InFlightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.lock().remove(&self.key);
        debug!("Capture finished for {}", self.key);
    }
}
