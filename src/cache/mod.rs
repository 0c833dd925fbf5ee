//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and insertion-order
//! eviction under entry-count and memory bounds.

mod entry;
mod facade;
mod keyed;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use facade::Cache;
pub use keyed::Keyed;
pub use stats::CacheStats;
pub use store::CacheStore;
