//! Bounded Cache - a process-local in-memory cache
//!
//! Values carry their own key ([`Keyed`]) and live under three optional
//! pressures: TTL expiration driven by a background sweep, an entry-count
//! bound and an approximate memory bound. Whenever room must be made, the
//! oldest entry by insertion time is evicted first.
//!
//! # Example
//!
//! ```
//! use bounded_cache::{Cache, CacheConfig, Keyed};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! impl Keyed for User {
//!     fn cache_key(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let cache = Cache::from_config(CacheConfig::default());
//!
//! let user = User { id: "u-1".into(), name: "Alice".into() };
//! cache.put(user.clone()).await?;
//!
//! assert_eq!(cache.get("u-1").await, Some(user));
//! assert_eq!(cache.get("u-2").await, None);
//! # Ok::<(), bounded_cache::CacheError>(())
//! # }).unwrap();
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod memory;
pub mod tasks;

pub use cache::{Cache, CacheEntry, CacheStats, CacheStore, Keyed};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use memory::{shallow_size_of, MemoryUnit, SizeEstimator};
pub use tasks::{spawn_sweep_task, SweepHandle};
