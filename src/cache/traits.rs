//! Cache Contract Module
//!
//! The operations every cache variant honors.

// == Cache Trait ==
/// Shared operational contract for all cache variants.
///
/// Methods take `&self`; implementations synchronize internally so a cache
/// can be shared behind an `Arc`. Each call is atomic with respect to the
/// others.
pub trait Cache<K, V> {
    /// Number of currently valid entries.
    ///
    /// May purge expired entries, which never changes what reads observe.
    fn size(&self) -> usize;

    /// Returns a copy of the value if present and not expired.
    fn get(&self, key: &K) -> Option<V>;

    /// Presence-and-validity check that does not copy the value.
    fn has(&self, key: &K) -> bool;

    /// Inserts or overwrites. Does nothing while the cache is disabled.
    fn set(&self, key: K, value: V);

    /// Removes the entry, returning whether one was removed.
    fn delete(&self, key: &K) -> bool;

    /// Removes all entries.
    fn clear(&self);

    /// Fixed at construction; true by default.
    fn enabled(&self) -> bool;

    /// Returns the cached value for `key`, or computes, stores and returns
    /// a fresh one.
    ///
    /// The lookup and the store are separate operations, so concurrent
    /// callers may both run `init` for the same key. The last `set` wins.
    fn get_or_set_with<F>(&self, key: K, init: F) -> V
    where
        Self: Sized,
        F: FnOnce() -> V,
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = init();
        self.set(key, value.clone());
        value
    }
}
