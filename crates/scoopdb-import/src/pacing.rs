//! Fixed-interval pacing gate for outbound call sequences.
//!
//! The inter-item delay is a deliberate backpressure contract against the
//! directory provider's rate limits, not an incidental sleep. Built on
//! `tokio::time` so tests can drive it with a paused clock instead of real
//! wall-time waits.

use tokio::time::{sleep_until, Duration, Instant};

/// Enforces a minimum interval between successive `wait` calls.
///
/// The first call returns immediately; each subsequent call sleeps until at
/// least `min_interval` has elapsed since the previous one. A zero interval
/// makes every call a no-op.
#[derive(Debug)]
pub struct Pacer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Waits out the remainder of the interval since the previous call, then
    /// marks the current instant as the new reference point.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            let target = last + self.min_interval;
            if target > Instant::now() {
                sleep_until(target).await;
            }
        }
        self.last = Some(Instant::now());
    }
}
