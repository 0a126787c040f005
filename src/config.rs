//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::{CacheError, Result};

/// Default capacity when none is configured
pub const DEFAULT_SIZE: usize = 1000;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of entries the sliding cache can hold
    pub size: usize,
    /// Lifetime of each entry measured from insertion, None = never expires
    pub ttl: Option<Duration>,
    /// Whether `set` stores values
    pub enabled: bool,
    /// Interval for the optional background sweep task
    pub sweep_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SLIDING_CACHE_SIZE` - Maximum cache entries (default: 1000)
    /// - `SLIDING_CACHE_TTL` - Entry lifetime in seconds, fractions allowed (default: none)
    /// - `SLIDING_CACHE_ENABLED` - `true`/`false` (default: true)
    /// - `SLIDING_CACHE_SWEEP_INTERVAL` - Background sweep frequency in seconds (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// Unparsable values are logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            size: parse_var(&lookup, "SLIDING_CACHE_SIZE").unwrap_or(defaults.size),
            ttl: parse_var::<f64, _>(&lookup, "SLIDING_CACHE_TTL")
                .and_then(|secs| seconds_or_warn("SLIDING_CACHE_TTL", secs))
                .or(defaults.ttl),
            enabled: parse_var(&lookup, "SLIDING_CACHE_ENABLED").unwrap_or(defaults.enabled),
            sweep_interval: parse_var::<f64, _>(&lookup, "SLIDING_CACHE_SWEEP_INTERVAL")
                .and_then(|secs| seconds_or_warn("SLIDING_CACHE_SWEEP_INTERVAL", secs))
                .or(defaults.sweep_interval),
        }
    }

    /// Checks that the configuration describes a usable sliding cache.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(CacheError::InvalidConfiguration(
                "size must be greater than zero".to_string(),
            ));
        }

        if self.ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(CacheError::InvalidConfiguration(
                "ttl must be greater than zero".to_string(),
            ));
        }

        if self.sweep_interval.is_some_and(|interval| interval.is_zero()) {
            return Err(CacheError::InvalidConfiguration(
                "sweep interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            ttl: None,
            enabled: true,
            sweep_interval: None,
        }
    }
}

/// Converts a TTL expressed in (possibly fractional) seconds into a Duration.
///
/// Rejects negative, zero and non-finite values.
pub fn ttl_from_secs(secs: f64) -> Result<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(ttl) if !ttl.is_zero() => Ok(ttl),
        _ => Err(CacheError::InvalidConfiguration(format!(
            "ttl must be a positive number of seconds, got {}",
            secs
        ))),
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparsable value {:?} for {}", raw, name);
            None
        }
    }
}

fn seconds_or_warn(name: &str, secs: f64) -> Option<Duration> {
    match ttl_from_secs(secs) {
        Ok(duration) => Some(duration),
        Err(err) => {
            warn!("Ignoring {}: {}", name, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.size, 1000);
        assert_eq!(config.ttl, None);
        assert!(config.enabled);
        assert_eq!(config.sweep_interval, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = CacheConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_from_lookup_values() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            ("SLIDING_CACHE_SIZE", "100"),
            ("SLIDING_CACHE_TTL", "1.5"),
            ("SLIDING_CACHE_ENABLED", "false"),
            ("SLIDING_CACHE_SWEEP_INTERVAL", "30"),
        ]));

        assert_eq!(config.size, 100);
        assert_eq!(config.ttl, Some(Duration::from_millis(1500)));
        assert!(!config.enabled);
        assert_eq!(config.sweep_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_from_lookup_bad_values_fall_back() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            ("SLIDING_CACHE_SIZE", "lots"),
            ("SLIDING_CACHE_TTL", "-3"),
            ("SLIDING_CACHE_ENABLED", "maybe"),
            ("SLIDING_CACHE_SWEEP_INTERVAL", ""),
        ]));

        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let config = CacheConfig {
            size: 0,
            ..CacheConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = CacheConfig {
            ttl: Some(Duration::ZERO),
            ..CacheConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_sweep_interval() {
        let config = CacheConfig {
            sweep_interval: Some(Duration::ZERO),
            ..CacheConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_ttl_from_secs() {
        assert_eq!(ttl_from_secs(3.0).unwrap(), Duration::from_secs(3));
        assert_eq!(ttl_from_secs(0.25).unwrap(), Duration::from_millis(250));
        assert!(ttl_from_secs(0.0).is_err());
        assert!(ttl_from_secs(-1.0).is_err());
        assert!(ttl_from_secs(f64::NAN).is_err());
        assert!(ttl_from_secs(f64::INFINITY).is_err());
    }
}
