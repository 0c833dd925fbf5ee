//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Absence is never an error here: lookups and removals that find nothing
//! return `None` from their respective operations. The variants below cover
//! the only real failure points, which sit at the admission boundary.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A value was offered with an unusable identity (e.g. an empty key)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A single value's estimated size exceeds the configured memory bound
    #[error("Entry too large: {0}")]
    EntryTooLarge(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
