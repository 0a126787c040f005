//! Sliding Cache - bounded in-memory key/value caches
//!
//! Provides a size-bounded cache with recency eviction and TTL expiration,
//! plus an unbounded sibling honoring the same contract.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, SlidingCache, UnconstrainedCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::{spawn_configured_sweep, spawn_sweep_task};
