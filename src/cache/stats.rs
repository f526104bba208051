//! Cache Statistics Module
//!
//! Tracks lookups and reaper activity.

use serde::Serialize;

// == Cache Stats ==
/// Cache counters, updated under the same lock as the entry map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found a value
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of entries deleted by the reaper
    pub reaped: u64,
    /// Number of completed reap passes
    pub reap_cycles: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
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

    // == Record Reap ==
    /// Records one completed reap pass that removed `removed` entries.
    pub fn record_reap(&mut self, removed: usize) {
        self.reap_cycles += 1;
        self.reaped += removed as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
