//! Sliding Cache Module
//!
//! Bounded cache combining HashMap storage with recency eviction and TTL expiration.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{Cache, CacheEntry, CacheStats, Clock, RecencyList, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Sliding State ==
/// Everything guarded by the cache lock. Mapping and recency order change together.
#[derive(Debug)]
struct SlidingState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    recency: RecencyList<K>,
    stats: CacheStats,
}

impl<K, V> SlidingState<K, V>
where
    K: Eq + Hash,
{
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
        }
    }

    /// Removes every entry expired at `now`.
    ///
    /// Recency order is insertion order and the clock is monotonic, so expired
    /// entries always form a prefix at the oldest end.
    fn purge_expired(&mut self, now: Instant, ttl: Duration) -> usize {
        let mut removed = 0;

        while let Some(key) = self.recency.peek_oldest() {
            let expired = self
                .entries
                .get(key)
                .map_or(true, |entry| entry.is_expired(now, ttl));
            if !expired {
                break;
            }

            if let Some(key) = self.recency.pop_oldest() {
                self.entries.remove(&key);
                removed += 1;
            }
        }

        if removed > 0 {
            self.stats.record_expirations(removed);
            debug!("Purged {} expired entries", removed);
        }
        removed
    }

    fn remove(&mut self, key: &K) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.recency.unlink(entry.slot);
                true
            }
            None => false,
        }
    }
}

// == Sliding Cache ==
/// Size-bounded cache with recency eviction and optional absolute TTL.
///
/// Writes append the key at the newest end of the recency order; once the
/// capacity is exceeded the oldest key is evicted. Reads never reorder keys
/// and never renew an entry's lifetime.
pub struct SlidingCache<K, V> {
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifetime of every entry, measured from insertion
    ttl: Option<Duration>,
    enabled: bool,
    clock: Arc<dyn Clock>,
    state: Mutex<SlidingState<K, V>>,
}

impl<K, V> SlidingCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new SlidingCache with the given capacity and optional TTL.
    ///
    /// # Arguments
    /// * `size` - Maximum number of entries, must be greater than zero
    /// * `ttl` - Optional per-entry lifetime, must be greater than zero
    pub fn new(size: usize, ttl: Option<Duration>) -> Result<Self> {
        Self::with_clock(size, ttl, Arc::new(SystemClock))
    }

    // == Constructor With Clock ==
    /// Same as [`SlidingCache::new`] but reading time from `clock`.
    pub fn with_clock(size: usize, ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::build(
            &CacheConfig {
                size,
                ttl,
                ..CacheConfig::default()
            },
            clock,
        )
    }

    // == Constructor From Config ==
    /// Creates a cache from a loaded configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::build(config, Arc::new(SystemClock))
    }

    fn build(config: &CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            capacity: config.size,
            ttl: config.ttl,
            enabled: config.enabled,
            clock,
            state: Mutex::new(SlidingState::new()),
        })
    }

    // == Capacity ==
    /// Returns the maximum number of entries the cache holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == TTL ==
    /// Returns the per-entry lifetime, None if entries never expire.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };
        let mut state = self.state.lock();
        state.purge_expired(self.clock.now(), ttl)
    }

    // == Keys ==
    /// Returns the valid keys from oldest to newest.
    pub fn keys(&self) -> Vec<K> {
        let state = self.lock_fresh();
        state.recency.iter().cloned().collect()
    }

    // == TTL Remaining ==
    /// Remaining lifetime of a valid entry, None if absent or the cache has no TTL.
    pub fn ttl_remaining(&self, key: &K) -> Option<Duration> {
        let ttl = self.ttl?;
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.purge_expired(now, ttl);
        state
            .entries
            .get(key)
            .map(|entry| entry.ttl_remaining(now, ttl))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    /// Locks the state after purging what has expired at the current time.
    fn lock_fresh(&self) -> parking_lot::MutexGuard<'_, SlidingState<K, V>> {
        let mut state = self.state.lock();
        if let Some(ttl) = self.ttl {
            state.purge_expired(self.clock.now(), ttl);
        }
        state
    }
}

impl<K, V> Cache<K, V> for SlidingCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn size(&self) -> usize {
        self.lock_fresh().entries.len()
    }

    fn get(&self, key: &K) -> Option<V> {
        let mut state = self.lock_fresh();
        let value = state.entries.get(key).map(|entry| entry.value.clone());
        match value {
            Some(value) => {
                state.stats.record_hit();
                Some(value)
            }
            None => {
                state.stats.record_miss();
                trace!("Cache miss");
                None
            }
        }
    }

    fn has(&self, key: &K) -> bool {
        self.lock_fresh().entries.contains_key(key)
    }

    // == Set ==
    /// Stores a key-value pair, evicting the oldest entries past capacity.
    ///
    /// Overwriting a key moves it to the newest end and restarts its TTL.
    fn set(&self, key: K, value: V) {
        if !self.enabled {
            trace!("Cache disabled, ignoring set");
            return;
        }

        // Stamp under the lock so recency order stays sorted by insertion time
        let mut state = self.state.lock();
        let now = self.clock.now();

        if let Some(previous) = state.entries.remove(&key) {
            state.recency.unlink(previous.slot);
        }

        let slot = state.recency.push_newest(key.clone());
        state.entries.insert(key, CacheEntry::new(value, now, slot));

        while state.entries.len() > self.capacity {
            let Some(victim) = state.recency.pop_oldest() else {
                break;
            };
            state.entries.remove(&victim);
            state.stats.record_eviction();
            debug!(
                "Evicted oldest entry, {} of {} slots in use",
                state.entries.len(),
                self.capacity
            );
        }
        debug_assert_eq!(state.entries.len(), state.recency.len());
    }

    // == Delete ==
    /// Removes a valid entry. Expired entries are purged first and count as absent.
    fn delete(&self, key: &K) -> bool {
        self.lock_fresh().remove(key)
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.recency.clear();
        debug_assert!(state.recency.is_empty());
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

impl<K, V> fmt::Debug for SlidingCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlidingCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("enabled", &self.enabled)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
