//! Cache Statistics Module
//!
//! Tracks hits, misses, capacity rejections, and current occupancy.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache performance and occupancy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from the cache
    pub hits: u64,
    /// Number of lookups that found nothing live (absent or expired)
    pub misses: u64,
    /// Number of inserts refused because they would exceed capacity
    pub rejections: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Sum of weights of the current entries
    pub used_weight: u64,
    /// Configured capacity in weight units
    pub capacity: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates zeroed stats for a cache of the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new(1024);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.rejections, 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.used_weight, 0);
        assert_eq!(stats.capacity, 1024);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new(1024);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new(1024);
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_rejection() {
        let mut stats = CacheStats::new(1024);
        stats.record_rejection();
        stats.record_rejection();
        assert_eq!(stats.rejections, 2);
    }
}
