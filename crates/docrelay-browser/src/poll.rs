//! Bounded polling.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Run `probe` every `interval` until it yields a value or `timeout` elapses.
///
/// The probe always runs at least once. A timeout yields `None`; callers treat
/// that as "absent", never as an error.
pub async fn poll_until<T, F, Fut>(interval: Duration, timeout: Duration, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(value) = probe().await {
            return Some(value);
        }

        let now = Instant::now();
        if now >= deadline {
            return None;
        }

        tokio::time::sleep(interval.min(deadline - now)).await;
    }
}
