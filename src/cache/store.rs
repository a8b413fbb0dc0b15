//! Record Store Module
//!
//! Weighted, time-limited map from user id to cached record.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats};
use crate::models::{UserId, UserRecord};

// == Put Outcome ==
/// Result of an insert attempt.
///
/// A rejection is not an error: callers carry on without caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The entry was stored (or replaced an existing one).
    Inserted,
    /// Storing the entry would have pushed total weight over capacity.
    RejectedCapacity,
}

impl PutOutcome {
    pub fn is_inserted(self) -> bool {
        matches!(self, PutOutcome::Inserted)
    }
}

// == Record Store ==
/// Cache of user records bounded by total weight.
///
/// Expired entries are treated as absent on read and dropped lazily. Live
/// entries are never evicted to make room; an insert that does not fit is
/// refused instead.
#[derive(Debug)]
pub struct RecordStore {
    entries: HashMap<UserId, CacheEntry>,
    stats: CacheStats,
    /// Sum of weights over `entries`
    used_weight: u64,
    capacity: u64,
    default_ttl: Duration,
}

impl RecordStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `capacity` - Maximum total weight of stored entries
    /// * `default_ttl` - Lifetime of entries inserted with [`put`](Self::put)
    pub fn new(capacity: u64, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(capacity),
            used_weight: 0,
            capacity,
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the record for `id` if present and unexpired.
    ///
    /// An expired entry found here is removed and counted as a miss.
    pub fn get(&mut self, id: UserId) -> Option<UserRecord> {
        let now = current_timestamp_ms();

        match self.entries.get(&id) {
            Some(entry) if !entry.is_expired_at(now) => {
                let record = entry.record.clone();
                self.stats.record_hit();
                Some(record)
            }
            Some(_) => {
                self.remove_entry(id);
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Inserts or replaces the entry for `id` using the store's TTL.
    pub fn put(&mut self, id: UserId, record: UserRecord, weight: u64) -> PutOutcome {
        let ttl = self.default_ttl;
        self.put_with_ttl(id, record, weight, ttl)
    }

    /// Inserts or replaces the entry for `id`, expiring `ttl` from now.
    ///
    /// The weight of an entry being replaced is released before the capacity
    /// check. If the new entry still does not fit, expired entries are swept
    /// and the check repeated. When it fails again the store is left
    /// untouched, including any previous entry for `id`.
    pub fn put_with_ttl(
        &mut self,
        id: UserId,
        record: UserRecord,
        weight: u64,
        ttl: Duration,
    ) -> PutOutcome {
        if !self.fits(id, weight) {
            self.cleanup_expired();
            if !self.fits(id, weight) {
                self.stats.record_rejection();
                return PutOutcome::RejectedCapacity;
            }
        }

        self.remove_entry(id);
        self.entries.insert(id, CacheEntry::new(record, weight, ttl));
        self.used_weight += weight;

        PutOutcome::Inserted
    }

    // == Remove ==
    /// Removes the entry for `id`. Returns whether one was present.
    pub fn remove(&mut self, id: UserId) -> bool {
        self.remove_entry(id).is_some()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired: Vec<UserId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            self.remove_entry(*id);
        }

        expired.len()
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.used_weight = self.used_weight;
        stats
    }

    // == Length ==
    /// Number of entries currently held.
    ///
    /// Expired entries not yet dropped are still counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn used_weight(&self) -> u64 {
        self.used_weight
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    // == Internal Helpers ==
    fn fits(&self, id: UserId, weight: u64) -> bool {
        let released = self.entries.get(&id).map_or(0, |entry| entry.weight);
        let projected = (self.used_weight - released).saturating_add(weight);
        projected <= self.capacity
    }

    fn remove_entry(&mut self, id: UserId) -> Option<CacheEntry> {
        let entry = self.entries.remove(&id)?;
        self.used_weight -= entry.weight;
        Some(entry)
    }
}
