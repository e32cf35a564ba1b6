//! Cooperative cancellation for long multi-region sweeps.
//!
//! Orchestrators check the token between items and between regions, so a
//! cancelled sweep stops at the next boundary and returns the partial
//! aggregate already folded — nothing processed so far is lost.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheaply clonable cancellation flag shared between an importer and the
/// caller that may want to abort it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent; takes effect at the next item or
    /// region boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
