//! Clock Module
//!
//! Time source abstraction for the cache. Entry ages are computed from
//! millisecond timestamps handed out by a [`Clock`], which is injected so
//! expiry behavior can be driven deterministically in tests instead of with
//! real sleeps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Clock Trait ==
/// Supplies the timestamps entries are aged against.
///
/// Implementations must be fast and non-blocking; the store calls `now_ms`
/// while holding its write lock.
pub trait Clock: Send + Sync {
    /// Returns the current time as milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

// == System Clock ==
/// Wall-clock time source; the default for production caches.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Cloning yields a handle onto the same underlying instant, so a test can
/// keep one handle and give the other to the cache, then advance time from
/// the outside.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    // == Constructor ==
    /// Creates a manual clock starting at the given epoch-millisecond instant.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    // == Advance ==
    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now_ms
            .fetch_add(delta.as_millis() as u64, Ordering::SeqCst);
    }

    // == Set ==
    /// Jumps the clock to an absolute epoch-millisecond instant.
    pub fn set_ms(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
