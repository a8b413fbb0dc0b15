//! Cache Module
//!
//! In-memory record cache with TTL expiration and a weighted capacity bound.

mod entry;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::{PutOutcome, RecordStore};

/// Record store shared between request handlers and background tasks.
///
/// Each store operation runs under a single lock acquisition.
pub type SharedCache = Arc<RwLock<RecordStore>>;

/// Wraps a store for sharing.
pub fn shared(store: RecordStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
