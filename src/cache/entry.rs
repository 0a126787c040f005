//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use generational_arena::Index;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was last inserted or overwritten
    pub inserted_at: Instant,
    /// Position of the key in the recency list
    pub(crate) slot: Index,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with `now`.
    pub(crate) fn new(value: V, inserted_at: Instant, slot: Index) -> Self {
        Self {
            value,
            inserted_at,
            slot,
        }
    }

    // == Age ==
    /// Returns how long the entry has lived at `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now` for the given TTL.
    ///
    /// Boundary condition: an entry is expired once its age is greater than
    /// or equal to the TTL, so it disappears as soon as the TTL has fully
    /// elapsed.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }

    // == Time To Live ==
    /// Returns the remaining lifetime at `now`, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self, now: Instant, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age(now))
    }
}
