//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. A zero value disables the corresponding eviction pressure, so a
/// default-constructed cache only ever expires entries by age.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Age at which entries become sweep-eligible; `Duration::ZERO` disables
    /// TTL expiry entirely
    pub ttl: Duration,
    /// Maximum number of entries the cache can hold; `0` means unbounded
    pub max_entries: usize,
    /// Maximum aggregate estimated size in bytes; `0` means unbounded
    pub max_memory_bytes: u64,
    /// Cadence of the background expiry sweep task
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry time-to-live in milliseconds (default: 30 minutes)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries, 0 = unbounded (default: 0)
    /// - `CACHE_MAX_MEMORY_BYTES` - Memory budget in bytes, 0 = unbounded (default: 0)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep cadence in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.ttl),
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            max_memory_bytes: env::var("CACHE_MAX_MEMORY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_memory_bytes),
            sweep_interval: env::var("CACHE_SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.sweep_interval),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            max_entries: 0,
            max_memory_bytes: 0,
            sweep_interval: Duration::from_secs(1),
        }
    }
}
