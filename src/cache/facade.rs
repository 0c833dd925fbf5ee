//! Cache Facade Module
//!
//! Shared, clonable handle over a [`CacheStore`], safe to use from any
//! number of tasks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore, Keyed};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::memory::MemoryUnit;

// == Cache ==

/// Concurrent cache handle.
///
/// Wraps a [`CacheStore`] in an async read-write lock. Cloning is cheap
/// (Arc reference counting) and every clone operates on the same storage,
/// so a handle can be passed freely to spawned tasks.
///
/// Write operations run under the exclusive lock, which makes each one
/// atomic: bound enforcement, the insert and the accounting update of a
/// `put` happen as a unit, and no reader observes the cache in between.
pub struct Cache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<V: Keyed + Clone> Cache<V> {
    // == Constructors ==
    /// Wraps an existing store, taking ownership of it.
    ///
    /// # Arguments
    /// * `store` - store to share, usually built with custom collaborators
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a cache from configuration with the default collaborators.
    ///
    /// # Arguments
    /// * `config` - TTL and bound settings
    pub fn from_config(config: CacheConfig) -> Self
    where
        V: 'static,
    {
        Self::new(CacheStore::new(config))
    }

    // == Write Operations ==
    /// Stores a value under its own key; the first write wins.
    ///
    /// See [`CacheStore::put`] for the failure modes.
    pub async fn put(&self, value: V) -> Result<()> {
        self.store.write().await.put(value)
    }

    /// Stores a value, replacing any existing entry under the same key.
    pub async fn update(&self, value: V) -> Result<()> {
        self.store.write().await.update(value)
    }

    /// Removes the entry matching a value's key, returning the stored
    /// value if there was one.
    pub async fn remove(&self, value: &V) -> Option<V> {
        self.store.write().await.remove(value)
    }

    /// Removes the entry stored under a key, returning its value if
    /// there was one. Removing an absent key is a no-op.
    pub async fn remove_by_key(&self, key: &str) -> Option<V> {
        self.store.write().await.remove_by_key(key)
    }

    /// Removes and returns the oldest entry by insertion time.
    pub async fn remove_oldest(&self) -> Option<V> {
        self.store.write().await.remove_oldest()
    }

    /// Removes every expired entry, returning how many were removed.
    ///
    /// The whole sweep runs under one lock acquisition, so no caller
    /// observes a partially swept cache.
    pub async fn sweep_expired(&self) -> usize {
        self.store.write().await.sweep_expired()
    }

    // == Read Operations ==
    /// Retrieves a value by key.
    ///
    /// Note: takes the write lock because hit and miss counters are
    /// updated on every lookup.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.write().await.get(key)
    }

    /// Returns the first stored value matching a predicate, if any.
    ///
    /// A panic in the predicate surfaces to the caller; the lock is
    /// released on unwind and the cache stays usable.
    pub async fn find<F>(&self, predicate: F) -> Option<V>
    where
        F: FnMut(&V) -> bool,
    {
        self.store.read().await.find(predicate)
    }

    /// Returns a snapshot of all stored values, in unspecified order.
    pub async fn get_all(&self) -> Vec<V> {
        self.store.read().await.get_all()
    }

    /// Returns a copy of the oldest stored value by insertion time.
    pub async fn oldest_entry(&self) -> Option<V> {
        self.store.read().await.oldest_entry().cloned()
    }

    /// Checks whether a key is present, without touching statistics.
    pub async fn contains_key(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }

    /// Returns the current number of entries in the cache.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Returns the approximate memory held by stored entries, in bytes.
    pub async fn memory_used_bytes(&self) -> u64 {
        self.store.read().await.memory_used_bytes()
    }

    /// Returns the approximate memory held by stored entries, converted
    /// to the requested unit.
    pub async fn memory_usage(&self, unit: MemoryUnit) -> f64 {
        self.store.read().await.memory_usage(unit)
    }

    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Bounds ==
    /// Returns the configured time-to-live.
    pub async fn ttl(&self) -> Duration {
        self.store.read().await.ttl()
    }

    /// Replaces the time-to-live, effective from the next sweep.
    pub async fn set_ttl(&self, ttl: Duration) {
        self.store.write().await.set_ttl(ttl)
    }

    /// Returns the configured entry-count bound (0 = unbounded).
    pub async fn max_entries(&self) -> usize {
        self.store.read().await.max_entries()
    }

    /// Replaces the entry-count bound and immediately evicts down to it.
    pub async fn set_max_entries(&self, max_entries: usize) {
        self.store.write().await.set_max_entries(max_entries)
    }

    /// Returns the configured memory bound in bytes (0 = unbounded).
    pub async fn max_memory_bytes(&self) -> u64 {
        self.store.read().await.max_memory_bytes()
    }

    /// Replaces the memory bound and immediately evicts down to it.
    pub async fn set_max_memory_bytes(&self, max_memory_bytes: u64) {
        self.store.write().await.set_max_memory_bytes(max_memory_bytes)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[derive(Debug, Clone, PartialEq)]
    struct Session {
        token: String,
        user: String,
    }

    impl Keyed for Session {
        fn cache_key(&self) -> &str {
            &self.token
        }
    }

    fn session(token: &str, user: &str) -> Session {
        Session {
            token: token.to_string(),
            user: user.to_string(),
        }
    }

    #[tokio::test]
    async fn test_cache_put_and_get() {
        let cache = Cache::from_config(CacheConfig::default());

        cache.put(session("t1", "alice")).await.unwrap();

        assert_eq!(cache.get("t1").await, Some(session("t1", "alice")));
        assert_eq!(cache.len().await, 1);
        assert!(!cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_clones_share_storage() {
        let cache = Cache::from_config(CacheConfig::default());
        let other = cache.clone();

        cache.put(session("t1", "alice")).await.unwrap();

        assert_eq!(other.get("t1").await, Some(session("t1", "alice")));
        other.remove_by_key("t1").await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_remove_and_oldest() {
        let clock = ManualClock::new(0);
        let store = CacheStore::with_collaborators(
            CacheConfig::default(),
            clock.clone(),
            |s: &Session| s.user.len() as u64,
        );
        let cache = Cache::new(store);

        cache.put(session("t1", "alice")).await.unwrap();
        clock.advance(Duration::from_millis(10));
        cache.put(session("t2", "bob")).await.unwrap();

        assert_eq!(cache.oldest_entry().await, Some(session("t1", "alice")));
        assert_eq!(cache.remove_oldest().await, Some(session("t1", "alice")));
        assert_eq!(cache.remove(&session("t2", "ignored")).await, Some(session("t2", "bob")));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_sweep_through_facade() {
        let clock = ManualClock::new(0);
        let config = CacheConfig {
            ttl: Duration::from_millis(100),
            ..CacheConfig::default()
        };
        let store = CacheStore::with_collaborators(config, clock.clone(), |s: &Session| {
            s.user.len() as u64
        });
        let cache = Cache::new(store);

        cache.put(session("t1", "alice")).await.unwrap();
        clock.advance(Duration::from_millis(150));

        assert_eq!(cache.sweep_expired().await, 1);
        assert_eq!(cache.get("t1").await, None);
        assert_eq!(cache.memory_used_bytes().await, 0);
    }

    #[tokio::test]
    async fn test_cache_find_panic_leaves_cache_usable() {
        let cache = Cache::from_config(CacheConfig::default());
        cache.put(session("t1", "alice")).await.unwrap();

        let probe = cache.clone();
        let outcome = tokio::spawn(async move {
            probe
                .find(|s: &Session| {
                    if s.user == "alice" {
                        panic!("predicate blew up");
                    }
                    false
                })
                .await
        })
        .await;
        assert!(outcome.is_err());

        // The panic did not wedge the lock or lose data.
        assert_eq!(cache.get("t1").await, Some(session("t1", "alice")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_concurrent_puts_distinct_keys() {
        let cache = Cache::from_config(CacheConfig::default());

        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.put(session(&format!("t{i}"), "user")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(cache.len().await, 8);
        for i in 0..8 {
            assert!(cache.contains_key(&format!("t{i}")).await);
        }
    }

    #[tokio::test]
    async fn test_cache_bound_setters() {
        let cache: Cache<Session> = Cache::from_config(CacheConfig::default());

        cache.set_ttl(Duration::from_secs(60)).await;
        cache.set_max_entries(10).await;
        cache.set_max_memory_bytes(4096).await;

        assert_eq!(cache.ttl().await, Duration::from_secs(60));
        assert_eq!(cache.max_entries().await, 10);
        assert_eq!(cache.max_memory_bytes().await, 4096);
    }

    #[tokio::test]
    async fn test_cache_stats_snapshot() {
        let cache = Cache::from_config(CacheConfig::default());

        cache.put(session("t1", "alice")).await.unwrap();
        cache.get("t1").await;
        cache.get("missing").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
