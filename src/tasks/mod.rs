//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries at configured intervals

mod sweeper;

pub use sweeper::{spawn_sweep_task, SweepHandle};
