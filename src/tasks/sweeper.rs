//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Cache, Keyed};

// == Sweep Handle ==

/// Handle to a running sweep task.
///
/// Dropping the handle also stops the task: the shutdown channel closes
/// and the loop exits at its next wakeup.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Stops the sweep task, waiting up to `cutoff` for it to finish.
    ///
    /// The task is signalled first and normally exits at its next wakeup.
    /// If it has not finished when the cutoff elapses it is cancelled and
    /// abandoned.
    ///
    /// # Arguments
    /// * `cutoff` - longest time to wait for a clean exit
    ///
    /// # Returns
    /// `true` if the task finished within the cutoff, `false` if it was
    /// abandoned.
    pub async fn shutdown(mut self, cutoff: Duration) -> bool {
        let _ = self.shutdown.send(true);
        match tokio::time::timeout(cutoff, &mut self.task).await {
            Ok(_) => true,
            Err(_) => {
                self.task.abort();
                false
            }
        }
    }

    /// Cancels the sweep task immediately, without waiting.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Returns true once the sweep task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

// == Spawn ==

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps for the given interval between sweeps. Each sweep runs
/// through the cache's own locking, so it never blocks readers for longer
/// than one pass.
///
/// # Arguments
/// * `cache` - cache handle to sweep; the task keeps its own clone
/// * `interval` - time between sweep passes
///
/// # Returns
/// A [`SweepHandle`] for stopping the task.
///
/// # Example
/// ```ignore
/// let cache: Cache<Session> = Cache::from_config(config);
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.shutdown(Duration::from_secs(5)).await;
/// ```
pub fn spawn_sweep_task<V>(cache: Cache<V>, interval: Duration) -> SweepHandle
where
    V: Keyed + Clone + Send + Sync + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!("Starting expiry sweep task with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let removed = cache.sweep_expired().await;
                    if removed > 0 {
                        info!("Expiry sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Expiry sweep: no expired entries found");
                    }
                }
                // Covers both an explicit shutdown signal and the handle
                // being dropped.
                _ = shutdown_rx.changed() => {
                    debug!("Expiry sweep task stopping");
                    break;
                }
            }
        }
    });

    SweepHandle {
        shutdown: shutdown_tx,
        task,
    }
}
