use std::collections::HashMap;
use std::sync::Arc;

use chrono::TimeDelta;
use parking_lot::Mutex;
use tracing::{debug, info};

use docrelay_config::StoreConfig;
use docrelay_protocols::{Payload, PayloadKind, Platform};

use crate::clock::{Clock, SystemClock};

/// Result of claiming a platform's slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Payload(Payload),
    /// An entry existed but was too old; it has been removed.
    Expired,
    Absent,
}

impl ReadOutcome {
    pub fn into_payload(self) -> Option<Payload> {
        match self {
            ReadOutcome::Payload(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Keyed by destination platform, so a PDF and a transcript for the same
/// platform overwrite each other.
pub struct PayloadStore {
    slots: Mutex<HashMap<Platform, Payload>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl PayloadStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let ttl = i64::try_from(config.ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            slots: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Stage `payload` for `platform`, replacing any previous entry.
    pub fn write(&self, platform: Platform, payload: Payload) {
        let payload = payload.with_created_at(self.clock.now());
        let kind = payload.kind();
        if self.slots.lock().insert(platform, payload).is_some() {
            debug!("Replaced staged payload for {}", platform);
        }
        info!("Staged {:?} payload for {}", kind, platform);
    }

    /// Claim the entry for `platform`. The entry is removed whatever the outcome.
    pub fn read(&self, platform: Platform) -> ReadOutcome {
        self.claim(platform, None)
    }

    /// Claim the entry for `platform` only if it holds a `kind` payload.
    ///
    /// An entry of the other kind is left in place and reads as `Absent`.
    pub fn read_kind(&self, platform: Platform, kind: PayloadKind) -> ReadOutcome {
        self.claim(platform, Some(kind))
    }

    fn claim(&self, platform: Platform, kind: Option<PayloadKind>) -> ReadOutcome {
        let now = self.clock.now();
        let payload = {
            let mut slots = self.slots.lock();
            match slots.get(&platform).map(Payload::kind) {
                None => return ReadOutcome::Absent,
                Some(staged) if kind.is_some_and(|k| k != staged) => {
                    debug!("Staged payload for {} is {:?}, not {:?}", platform, staged, kind);
                    return ReadOutcome::Absent;
                }
                Some(_) => match slots.remove(&platform) {
                    Some(payload) => payload,
                    None => return ReadOutcome::Absent,
                },
            }
        };

        if now - payload.created_at < self.ttl {
            debug!("Payload for {} claimed", platform);
            ReadOutcome::Payload(payload)
        } else {
            info!("Payload for {} expired before it was claimed", platform);
            ReadOutcome::Expired
        }
    }

    /// Kind of the staged entry, without claiming it.
    pub fn peek_kind(&self, platform: Platform) -> Option<PayloadKind> {
        self.slots.lock().get(&platform).map(Payload::kind)
    }

    /// Drop stale entries; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut slots = self.slots.lock();
        let before = slots.len();
        slots.retain(|_, payload| now - payload.created_at < self.ttl);
        let purged = before - slots.len();
        if purged > 0 {
            debug!("Purged {} expired payloads", purged);
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl Default for PayloadStore {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
