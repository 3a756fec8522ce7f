//! Lifetime delivery counters backing the public status endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counts `/track` outcomes since startup.
///
/// Three independent monotonic counters; relaxed atomics are enough because
/// no cross-field consistency is promised and the request path must stay
/// lock-free.
#[derive(Debug, Default)]
pub struct DeliveryStats {
    relayed: AtomicU64,
    failed: AtomicU64,
    rejected: AtomicU64,
}

impl DeliveryStats {
    /// A report was delivered to the webhook (remote answered 204).
    pub fn record_relayed(&self) {
        self.relayed.fetch_add(1, Ordering::Relaxed);
    }

    /// A delivery attempt was made and failed (bad status, transport error,
    /// timeout).
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// A request was rejected before any delivery attempt (empty or
    /// malformed payload).
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time view for `/status`.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            relayed: self.relayed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// Serializable view of [`DeliveryStats`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatsSnapshot {
    pub relayed: u64,
    pub failed: u64,
    pub rejected: u64,
}
