//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with memory accounting,
//! bound enforcement and TTL expiration.
//!
//! The store is single-threaded; the [`Cache`](crate::cache::Cache) facade
//! wraps it in a lock for shared use.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Keyed};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::memory::{shallow_size_of, MemoryUnit, SizeEstimator};

// == Cache Store ==

/// In-memory cache with insertion-order eviction, TTL expiration and
/// approximate memory accounting.
///
/// Values carry their own key via [`Keyed`]. Each stored entry remembers
/// the size and timestamp captured when it was admitted; both stay fixed
/// until the entry is removed.
///
/// A bound set to zero is disabled. With `max_entries == 0` the store
/// holds any number of entries, with `max_memory_bytes == 0` it accepts
/// entries of any size, and with a zero TTL nothing ever expires.
pub struct CacheStore<V> {
    /// Entry ledger, keyed by cache key
    entries: HashMap<String, CacheEntry<V>>,
    /// Sum of the frozen sizes of all stored entries
    memory_used_bytes: u64,
    /// Time-to-live in milliseconds (0 = entries never expire)
    ttl_ms: u64,
    /// Maximum number of entries (0 = unbounded)
    max_entries: usize,
    /// Maximum approximate memory in bytes (0 = unbounded)
    max_memory_bytes: u64,
    /// Performance statistics
    stats: CacheStats,
    /// Time source consulted at admission and during sweeps
    clock: Box<dyn Clock>,
    /// Sizing policy applied once per admission
    estimator: Box<dyn SizeEstimator<V>>,
}

impl<V> fmt::Debug for CacheStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("entries", &self.entries.len())
            .field("memory_used_bytes", &self.memory_used_bytes)
            .field("ttl_ms", &self.ttl_ms)
            .field("max_entries", &self.max_entries)
            .field("max_memory_bytes", &self.max_memory_bytes)
            .finish_non_exhaustive()
    }
}

impl<V: Keyed> CacheStore<V> {
    // == Constructors ==
    /// Creates a cache store from configuration, using the system clock
    /// and shallow size estimation.
    ///
    /// # Arguments
    /// * `config` - TTL and bound settings
    pub fn new(config: CacheConfig) -> Self
    where
        V: 'static,
    {
        Self::with_collaborators(config, SystemClock, shallow_size_of::<V>)
    }

    /// Creates a cache store with an explicit clock and size estimator.
    ///
    /// Tests inject a [`ManualClock`](crate::clock::ManualClock) here to
    /// drive expiration deterministically; callers with domain knowledge
    /// inject an estimator that prices their values.
    ///
    /// # Arguments
    /// * `config` - TTL and bound settings
    /// * `clock` - time source for insertion timestamps and sweeps
    /// * `estimator` - sizing policy, consulted once per admission
    pub fn with_collaborators(
        config: CacheConfig,
        clock: impl Clock + 'static,
        estimator: impl SizeEstimator<V> + 'static,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            memory_used_bytes: 0,
            ttl_ms: config.ttl.as_millis() as u64,
            max_entries: config.max_entries,
            max_memory_bytes: config.max_memory_bytes,
            stats: CacheStats::new(),
            clock: Box::new(clock),
            estimator: Box::new(estimator),
        }
    }

    // == Put ==
    /// Stores a value under its own key.
    ///
    /// The first write wins: if the key is already present the call is a
    /// silent no-op and the stored value keeps its original timestamp and
    /// size. Use [`update`](Self::update) to overwrite.
    ///
    /// # Arguments
    /// * `value` - value to store; its key comes from [`Keyed::cache_key`]
    ///
    /// # Returns
    /// * `Ok(())` - value stored, or key already present
    /// * `Err(CacheError::InvalidArgument)` - empty key
    /// * `Err(CacheError::EntryTooLarge)` - entry alone exceeds the memory
    ///   bound; the cache is left untouched
    pub fn put(&mut self, value: V) -> Result<()> {
        if value.cache_key().is_empty() {
            return Err(CacheError::InvalidArgument(
                "cache key must not be empty".to_string(),
            ));
        }
        if self.entries.contains_key(value.cache_key()) {
            debug!(
                "key '{}' already present, keeping existing entry",
                value.cache_key()
            );
            return Ok(());
        }
        let key = value.cache_key().to_string();

        // Consult collaborators before any mutation: a panicking estimator
        // or clock must not leave partial state behind.
        let size_bytes = self.estimator.estimate(&value);
        let now_ms = self.clock.now_ms();

        // An entry that cannot fit even in an empty cache is refused
        // outright, before anything is evicted on its behalf.
        if self.max_memory_bytes > 0 && size_bytes > self.max_memory_bytes {
            debug!(
                "rejecting entry '{}': {} bytes exceeds the {} byte memory bound",
                key, size_bytes, self.max_memory_bytes
            );
            return Err(CacheError::EntryTooLarge(format!(
                "entry '{}' is {} bytes but the memory bound is {} bytes",
                key, size_bytes, self.max_memory_bytes
            )));
        }

        self.enforce_capacity(1);
        self.enforce_memory(size_bytes);

        debug!("storing entry '{}' ({} bytes)", key, size_bytes);
        self.entries
            .insert(key, CacheEntry::new(value, now_ms, size_bytes));
        self.memory_used_bytes += size_bytes;
        self.stats.set_total_entries(self.entries.len());
        self.stats.set_memory_used_bytes(self.memory_used_bytes);
        Ok(())
    }

    // == Update ==
    /// Stores a value, replacing any existing entry under the same key.
    ///
    /// The replacement is admitted like a fresh insert: it gets a new
    /// timestamp, is re-sized by the estimator, and moves to the back of
    /// the eviction order.
    ///
    /// # Arguments
    /// * `value` - value to store
    ///
    /// # Returns
    /// * `Ok(())` - value stored
    /// * `Err(CacheError)` - same failure modes as [`put`](Self::put)
    pub fn update(&mut self, value: V) -> Result<()> {
        if self.entries.contains_key(value.cache_key()) {
            self.remove_by_key(value.cache_key());
        }
        self.put(value)
    }

    // == Remove ==
    /// Removes the entry matching a value's key.
    ///
    /// # Arguments
    /// * `value` - value whose key selects the entry
    ///
    /// # Returns
    /// * `Some(value)` - the stored value, which may differ from the argument
    /// * `None` - no entry under that key
    pub fn remove(&mut self, value: &V) -> Option<V> {
        self.remove_by_key(value.cache_key())
    }

    /// Removes the entry stored under a key.
    ///
    /// Removal is idempotent: removing an absent key returns `None` and
    /// changes nothing.
    ///
    /// # Arguments
    /// * `key` - cache key to remove
    ///
    /// # Returns
    /// * `Some(value)` - the removed value
    /// * `None` - no entry under that key
    pub fn remove_by_key(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.remove(key)?;
        // Release the size frozen at admission, never a fresh estimate.
        self.memory_used_bytes -= entry.size_bytes;
        self.stats.set_total_entries(self.entries.len());
        self.stats.set_memory_used_bytes(self.memory_used_bytes);
        debug!("removed entry '{}' ({} bytes)", key, entry.size_bytes);
        Some(entry.value)
    }

    /// Removes and returns the oldest entry by insertion time.
    ///
    /// # Returns
    /// * `Some(value)` - the removed value
    /// * `None` - cache is empty
    pub fn remove_oldest(&mut self) -> Option<V> {
        let key = self.oldest().map(|(key, _)| key.clone())?;
        self.remove_by_key(&key)
    }

    // == Get ==
    /// Retrieves a value by key, recording a hit or miss.
    ///
    /// Lookups do not refresh the entry's age: a frequently read entry is
    /// evicted just as readily as a never-read one of the same insertion
    /// time.
    ///
    /// # Arguments
    /// * `key` - cache key to look up
    ///
    /// # Returns
    /// * `Some(value)` - clone of the stored value
    /// * `None` - no entry under that key
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Find ==
    /// Returns the first stored value matching a predicate, if any.
    ///
    /// Iteration order is unspecified. The predicate runs under the
    /// store's exclusive access, so it should stay cheap.
    ///
    /// # Arguments
    /// * `predicate` - test applied to stored values
    pub fn find<F>(&self, mut predicate: F) -> Option<V>
    where
        V: Clone,
        F: FnMut(&V) -> bool,
    {
        self.entries
            .values()
            .find(|entry| predicate(&entry.value))
            .map(|entry| entry.value.clone())
    }

    // == Get All ==
    /// Returns a snapshot of all stored values, in unspecified order.
    pub fn get_all(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries
            .values()
            .map(|entry| entry.value.clone())
            .collect()
    }

    // == Oldest Entry ==
    /// Returns the oldest stored value by insertion time, without
    /// removing it.
    ///
    /// # Returns
    /// * `Some(value)` - reference to the oldest value
    /// * `None` - cache is empty
    pub fn oldest_entry(&self) -> Option<&V> {
        self.oldest().map(|(_, entry)| &entry.value)
    }

    // == Inspection ==
    /// Checks whether a key is present, without touching statistics.
    ///
    /// # Arguments
    /// * `key` - cache key to check
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the approximate memory held by stored entries, in bytes.
    pub fn memory_used_bytes(&self) -> u64 {
        self.memory_used_bytes
    }

    /// Returns the approximate memory held by stored entries, converted
    /// to the requested unit.
    ///
    /// # Arguments
    /// * `unit` - unit to convert into
    pub fn memory_usage(&self, unit: MemoryUnit) -> f64 {
        unit.convert(self.memory_used_bytes)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats.set_memory_used_bytes(self.memory_used_bytes);
        stats
    }

    // == Sweep Expired ==
    /// Removes every entry whose age has reached the TTL.
    ///
    /// An entry expires once its age is greater than or equal to the TTL.
    /// With a zero TTL the sweep is a no-op.
    ///
    /// # Returns
    /// The number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        if self.ttl_ms == 0 {
            return 0;
        }
        let now_ms = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now_ms, self.ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        let mut removed = 0;
        for key in expired_keys {
            if self.remove_by_key(&key).is_some() {
                self.stats.record_expiration();
                removed += 1;
            }
        }
        removed
    }

    // == Bounds ==
    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Replaces the time-to-live.
    ///
    /// Takes effect from the next sweep; entries already stored are
    /// judged against the new TTL, not grandfathered under the old one.
    ///
    /// # Arguments
    /// * `ttl` - new time-to-live (zero disables expiration)
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl_ms = ttl.as_millis() as u64;
    }

    /// Returns the configured entry-count bound (0 = unbounded).
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Replaces the entry-count bound and immediately evicts down to it.
    ///
    /// # Arguments
    /// * `max_entries` - new bound (zero disables it)
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        self.enforce_capacity(0);
    }

    /// Returns the configured memory bound in bytes (0 = unbounded).
    pub fn max_memory_bytes(&self) -> u64 {
        self.max_memory_bytes
    }

    /// Replaces the memory bound and immediately evicts down to it.
    ///
    /// # Arguments
    /// * `max_memory_bytes` - new bound in bytes (zero disables it)
    pub fn set_max_memory_bytes(&mut self, max_memory_bytes: u64) {
        self.max_memory_bytes = max_memory_bytes;
        self.enforce_memory(0);
    }

    // == Eviction ==
    /// Finds the oldest entry by insertion time, breaking timestamp ties
    /// by key order so eviction stays deterministic.
    fn oldest(&self) -> Option<(&String, &CacheEntry<V>)> {
        self.entries
            .iter()
            .min_by(|(key_a, entry_a), (key_b, entry_b)| {
                entry_a
                    .inserted_at_ms
                    .cmp(&entry_b.inserted_at_ms)
                    .then_with(|| key_a.cmp(key_b))
            })
    }

    /// Evicts the oldest entry, counting it in the statistics.
    ///
    /// Returns false when the cache is empty.
    fn evict_oldest(&mut self) -> bool {
        let target = self
            .oldest()
            .map(|(key, entry)| (key.clone(), entry.size_bytes));
        let Some((key, size_bytes)) = target else {
            return false;
        };
        debug!("evicting oldest entry '{}' ({} bytes)", key, size_bytes);
        self.remove_by_key(&key);
        self.stats.record_eviction();
        true
    }

    /// Evicts oldest entries until `incoming` more would fit under the
    /// entry-count bound. A zero bound disables enforcement.
    fn enforce_capacity(&mut self, incoming: usize) {
        if self.max_entries == 0 {
            return;
        }
        while self.entries.len() + incoming > self.max_entries {
            if !self.evict_oldest() {
                break;
            }
        }
    }

    /// Evicts oldest entries until `incoming_bytes` more would fit under
    /// the memory bound. A zero bound disables enforcement.
    ///
    /// Oversized entries are refused before this runs, so the loop always
    /// terminates with room to spare.
    fn enforce_memory(&mut self, incoming_bytes: u64) {
        if self.max_memory_bytes == 0 {
            return;
        }
        while self.memory_used_bytes + incoming_bytes > self.max_memory_bytes {
            if !self.evict_oldest() {
                debug_assert!(false, "cache empty while over the memory bound");
                break;
            }
        }
    }
}
