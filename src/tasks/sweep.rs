//! TTL Sweep Task
//!
//! Background task that periodically purges expired entries from a sliding cache.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::SlidingCache;
use crate::config::CacheConfig;
use crate::error::Result;

/// Shortest interval the sweep task will sleep between runs
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns a background task that periodically purges expired cache entries.
///
/// Reads already purge lazily; the sweep bounds memory held by expired
/// entries when nothing reads the cache. Each run takes the same lock as
/// foreground operations. For a cache without TTL the task exits at once.
///
/// The task only holds a weak reference and stops after the last `Arc` to
/// the cache is dropped. Intervals below [`MIN_SWEEP_INTERVAL`] are raised
/// to it.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(SlidingCache::<String, String>::new(100, Some(Duration::from_secs(300)))?);
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<K, V>(cache: Arc<SlidingCache<K, V>>, interval: Duration) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Send + 'static,
{
    let ttl = cache.ttl();
    let cache = Arc::downgrade(&cache);

    let interval = if interval < MIN_SWEEP_INTERVAL {
        warn!(
            "Sweep interval {:?} is too short, using {:?}",
            interval, MIN_SWEEP_INTERVAL
        );
        MIN_SWEEP_INTERVAL
    } else {
        interval
    };

    tokio::spawn(async move {
        let Some(ttl) = ttl else {
            debug!("Cache has no TTL, sweep task not needed");
            return;
        };

        info!(
            "Starting TTL sweep task with interval of {:?} (ttl {:?})",
            interval, ttl
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(cache) = cache.upgrade() else {
                debug!("Cache dropped, stopping TTL sweep task");
                break;
            };

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

/// Starts the sweep task when `config.sweep_interval` is set.
///
/// Fails with `InvalidConfiguration` if `config` does not validate.
pub fn spawn_configured_sweep<K, V>(
    cache: Arc<SlidingCache<K, V>>,
    config: &CacheConfig,
) -> Result<Option<JoinHandle<()>>>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Send + 'static,
{
    config.validate()?;

    Ok(config
        .sweep_interval
        .map(|interval| spawn_sweep_task(cache, interval)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cache, ManualClock};
    use crate::error::CacheError;

    const TICK: Duration = Duration::from_millis(20);

    fn timed_cache() -> (Arc<ManualClock>, Arc<SlidingCache<String, String>>) {
        let clock = Arc::new(ManualClock::new());
        let cache =
            SlidingCache::with_clock(100, Some(Duration::from_secs(3)), clock.clone()).unwrap();
        (clock, Arc::new(cache))
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let (clock, cache) = timed_cache();
        cache.set("expire_soon".to_string(), "value".to_string());

        let handle = spawn_sweep_task(cache.clone(), TICK);

        clock.advance(Duration::from_secs(3));
        tokio::time::sleep(TICK * 5).await;

        // Counted by the sweep, not by a read
        assert_eq!(cache.stats().expirations, 1);
        assert_eq!(cache.stats().total_entries, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let (clock, cache) = timed_cache();
        cache.set("long_lived".to_string(), "value".to_string());

        let handle = spawn_sweep_task(cache.clone(), TICK);

        clock.advance(Duration::from_secs(2));
        tokio::time::sleep(TICK * 5).await;

        assert_eq!(cache.stats().expirations, 0);
        assert_eq!(cache.get(&"long_lived".to_string()), Some("value".to_string()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_exits_without_ttl() {
        let cache = Arc::new(SlidingCache::<String, String>::new(10, None).unwrap());

        let handle = spawn_sweep_task(cache, TICK);

        tokio::time::sleep(TICK * 3).await;
        assert!(handle.is_finished(), "Task should exit when there is no TTL");
    }

    #[tokio::test]
    async fn test_configured_sweep() {
        let (_clock, cache) = timed_cache();

        let handle = spawn_configured_sweep(cache.clone(), &CacheConfig::default()).unwrap();
        assert!(handle.is_none());

        let config = CacheConfig {
            sweep_interval: Some(TICK),
            ..CacheConfig::default()
        };
        let handle = spawn_configured_sweep(cache, &config)
            .unwrap()
            .expect("interval is set");
        assert!(!handle.is_finished());
        handle.abort();
    }

    #[tokio::test]
    async fn test_configured_sweep_rejects_zero_interval() {
        let (_clock, cache) = timed_cache();

        let config = CacheConfig {
            sweep_interval: Some(Duration::ZERO),
            ..CacheConfig::default()
        };
        let result = spawn_configured_sweep(cache, &config);
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_sweep_task_zero_interval_still_yields() {
        let (clock, cache) = timed_cache();
        cache.set("expire_soon".to_string(), "value".to_string());

        let handle = spawn_sweep_task(cache.clone(), Duration::ZERO);

        clock.advance(Duration::from_secs(3));
        tokio::time::sleep(TICK * 5).await;

        // The test task got scheduled again, so the sweep is not spinning
        assert_eq!(cache.stats().expirations, 1);
        assert!(!handle.is_finished());

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_stops_when_cache_dropped() {
        let (_clock, cache) = timed_cache();
        let weak = Arc::downgrade(&cache);

        let handle = spawn_sweep_task(cache, TICK);

        tokio::time::sleep(TICK * 5).await;
        assert!(weak.upgrade().is_none(), "Task must not keep the cache alive");
        assert!(handle.is_finished(), "Task should stop once the cache is gone");
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (_clock, cache) = timed_cache();

        let handle = spawn_sweep_task(cache, TICK);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
