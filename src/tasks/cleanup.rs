//! Expiry Sweeper Task
//!
//! Background task that periodically drops expired cache entries.
//!
//! Expired entries are never served either way; sweeping only returns their
//! weight to the capacity budget sooner than lazy removal would.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a task that removes expired entries every `cleanup_interval_secs`.
///
/// The returned handle is used to abort the task during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = cache::shared(RecordStore::new(1024, Duration::from_secs(3600)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expiry sweeper with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
