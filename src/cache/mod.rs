//! Cache Module
//!
//! Provides in-memory caches sharing one contract: a bounded sliding cache
//! with recency eviction and TTL expiration, and an unconstrained mapping.

mod clock;
mod entry;
mod lru;
mod sliding;
mod stats;
mod traits;
mod unconstrained;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub(crate) use lru::RecencyList;
pub use sliding::SlidingCache;
pub use stats::CacheStats;
pub use traits::Cache;
pub use unconstrained::UnconstrainedCache;
