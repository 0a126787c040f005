//! Clock Module
//!
//! Time sources used to stamp entries and evaluate expiry.

use std::fmt::Debug;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A monotonic source of `Instant`s.
///
/// Expiry relies on successive readings never going backwards, which keeps
/// the recency order sorted by insertion time.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// Reads `Instant::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Useful for exercising TTL behavior without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    // == Constructor ==
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    // == Advance ==
    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        *self.elapsed.lock() += step;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }
}
