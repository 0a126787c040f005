//! Unconstrained Cache Module
//!
//! A plain mapping honoring the cache contract, with no eviction and no expiry.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::trace;

use crate::cache::Cache;

// == Unconstrained Cache ==
/// Cache that keeps everything until it is deleted or cleared.
///
/// Serves as the reference behavior for the contract and as a stand-in for
/// callers that need the interface without eviction.
#[derive(Debug)]
pub struct UnconstrainedCache<K, V> {
    enabled: bool,
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> UnconstrainedCache<K, V> {
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    /// Creates a cache whose `set` is a no-op.
    pub fn disabled() -> Self {
        Self::with_enabled(false)
    }

    fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for UnconstrainedCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Cache<K, V> for UnconstrainedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn size(&self) -> usize {
        self.entries.lock().len()
    }

    fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().get(key).cloned()
    }

    fn has(&self, key: &K) -> bool {
        self.entries.lock().contains_key(key)
    }

    fn set(&self, key: K, value: V) {
        if !self.enabled {
            trace!("Cache disabled, ignoring set");
            return;
        }
        self.entries.lock().insert(key, value);
    }

    fn delete(&self, key: &K) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}
