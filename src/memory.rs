//! Memory Helpers Module
//!
//! Size estimation and unit conversion for the cache's approximate memory
//! accounting. Estimation is a pluggable strategy rather than a property of
//! the value type alone, so callers can weigh entries however suits their
//! data (heap-aware walks, serialized size, a flat constant, ...).

use std::mem;

// == Memory Unit ==
/// Units for reporting aggregate memory usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl MemoryUnit {
    // == Convert ==
    /// Converts a raw byte count into this unit.
    ///
    /// Uses 1024-based steps, so `convert(2048)` in kilobytes is exactly 2.0.
    pub fn convert(self, bytes: u64) -> f64 {
        let bytes = bytes as f64;
        match self {
            MemoryUnit::Bytes => bytes,
            MemoryUnit::Kilobytes => bytes / 1024.0,
            MemoryUnit::Megabytes => bytes / (1024.0 * 1024.0),
            MemoryUnit::Gigabytes => bytes / (1024.0 * 1024.0 * 1024.0),
        }
    }
}

// == Size Estimator Trait ==
/// Estimates the approximate in-memory footprint of a value, in bytes.
///
/// Estimates are frozen into the entry at insertion time; the cache never
/// re-estimates a stored value, so a cheap approximation is fine as long as
/// it is stable per call. Must be fast and non-blocking since the store
/// invokes it while holding its write lock.
pub trait SizeEstimator<V>: Send + Sync {
    /// Returns the approximate size of `value` in bytes.
    fn estimate(&self, value: &V) -> u64;
}

/// Any `Fn(&V) -> u64` closure is usable as an estimator.
impl<V, F> SizeEstimator<V> for F
where
    F: Fn(&V) -> u64 + Send + Sync,
{
    fn estimate(&self, value: &V) -> u64 {
        self(value)
    }
}

// == Shallow Size ==
/// Default estimator: the value's shallow size (`mem::size_of_val`).
///
/// Ignores heap allocations behind pointers, which keeps it fast and
/// dependency-free; callers whose values carry large heap payloads should
/// supply their own estimator.
pub fn shallow_size_of<V>(value: &V) -> u64 {
    mem::size_of_val(value) as u64
}
