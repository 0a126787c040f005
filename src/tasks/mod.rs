//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a cache.
//!
//! # Tasks
//! - TTL Sweep: Purges expired entries at a configured interval

mod sweep;

pub use sweep::{spawn_configured_sweep, spawn_sweep_task, MIN_SWEEP_INTERVAL};
