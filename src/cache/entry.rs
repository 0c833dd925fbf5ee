//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

// == Cache Entry ==
/// A stored value plus the bookkeeping frozen at its insertion.
///
/// Entries are immutable once created: overwriting a key means removing the
/// old entry and inserting a new one, never mutating in place. In particular
/// `size_bytes` is the estimator's answer at insertion time — accounting
/// always subtracts this recorded figure on removal, because the live value
/// may have changed shape since it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at_ms: u64,
    /// Estimated size at insertion time, in bytes
    pub size_bytes: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with its insertion instant and size.
    pub fn new(value: V, inserted_at_ms: u64, size_bytes: u64) -> Self {
        Self {
            value,
            inserted_at_ms,
            size_bytes,
        }
    }

    // == Age ==
    /// Returns the entry's age in milliseconds at the given instant.
    ///
    /// Saturates at zero if the clock reads earlier than the insertion
    /// instant, so a clock stepping backwards never produces a bogus age.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at_ms)
    }

    // == Is Expired ==
    /// Checks whether the entry's age has reached the TTL.
    ///
    /// Boundary condition: an entry is expired once its age is greater than
    /// or equal to the TTL, so an entry is sweep-eligible the instant the
    /// full TTL has elapsed. A `ttl_ms` of zero means TTL expiry is disabled
    /// and nothing is ever considered expired.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        ttl_ms > 0 && self.age_ms(now_ms) >= ttl_ms
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value", 1_000, 64);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.inserted_at_ms, 1_000);
        assert_eq!(entry.size_bytes, 64);
    }

    #[test]
    fn test_age_progresses_with_the_clock() {
        let entry = CacheEntry::new("v", 1_000, 1);

        assert_eq!(entry.age_ms(1_000), 0);
        assert_eq!(entry.age_ms(1_250), 250);
    }

    #[test]
    fn test_age_saturates_on_backwards_clock() {
        let entry = CacheEntry::new("v", 1_000, 1);
        assert_eq!(entry.age_ms(500), 0);
    }

    #[test]
    fn test_not_expired_before_ttl() {
        let entry = CacheEntry::new("v", 1_000, 1);
        assert!(!entry.is_expired(1_099, 100));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("v", 1_000, 1);

        // Expired exactly when the full TTL has elapsed
        assert!(entry.is_expired(1_100, 100));
        assert!(entry.is_expired(1_500, 100));
    }

    #[test]
    fn test_zero_ttl_never_expires() {
        let entry = CacheEntry::new("v", 1_000, 1);
        assert!(!entry.is_expired(u64::MAX, 0));
    }
}
