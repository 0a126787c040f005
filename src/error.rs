//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction.
///
/// Reads, deletes and clears never fail; absence is reported as `None` or
/// `false`. Only building a cache from bad parameters produces an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity or TTL parameters are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
