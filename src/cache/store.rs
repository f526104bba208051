//! Cache Store Module
//!
//! The entry map and its counters. A `CacheStore` has no locking of its
//! own; the [`Cache`](crate::cache::Cache) handle keeps it behind a single
//! mutex so every access below happens with that lock held.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and reap counters
    stats: CacheStats,
}

impl CacheStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`, stamped with the current time.
    ///
    /// Overwriting replaces the old entry wholesale, so the age clock restarts.
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the stored payload, whatever its age.
    ///
    /// Staleness is never checked here. Only [`reap_expired`](Self::reap_expired)
    /// removes entries.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap Expired ==
    /// Removes every entry whose age at `now` strictly exceeds `max_age`.
    ///
    /// Returns the number of entries removed.
    pub fn reap_expired(&mut self, now: Instant, max_age: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now, max_age));
        let removed = before - self.entries.len();

        self.stats.record_reap(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const MAX_AGE: Duration = Duration::from_millis(100);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_add_and_get() {
        let mut store = CacheStore::new();

        store.add("key1".to_string(), b"value1".to_vec());

        assert_eq!(store.get("key1"), Some(b"value1".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.add("key1".to_string(), b"value1".to_vec());
        store.add("key1".to_string(), b"value2".to_vec());

        assert_eq!(store.get("key1"), Some(b"value2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_empty_payload_is_still_found() {
        let mut store = CacheStore::new();

        store.add("empty".to_string(), Vec::new());

        assert_eq!(store.get("empty"), Some(Vec::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_ignores_staleness() {
        let mut store = CacheStore::new();
        store.add("old".to_string(), b"v".to_vec());

        // Nobody reaped, so the value is still served
        tokio::time::advance(MAX_AGE * 2).await;

        assert_eq!(store.get("old"), Some(b"v".to_vec()));
    }

    #[test]
    fn test_reap_removes_only_stale_entries() {
        let mut store = CacheStore::new();
        store.add("key1".to_string(), b"value1".to_vec());
        store.add("key2".to_string(), b"value2".to_vec());
        let now = Instant::now();

        assert_eq!(store.reap_expired(now, MAX_AGE), 0);
        assert_eq!(store.len(), 2);

        let removed = store.reap_expired(now + MAX_AGE * 2, MAX_AGE);
        assert_eq!(removed, 2);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_measures_age_per_entry() {
        let mut store = CacheStore::new();
        store.add("older".to_string(), b"1".to_vec());
        tokio::time::advance(Duration::from_millis(60)).await;
        store.add("newer".to_string(), b"2".to_vec());
        tokio::time::advance(Duration::from_millis(60)).await;

        let removed = store.reap_expired(Instant::now(), MAX_AGE);

        assert_eq!(removed, 1);
        assert!(!store.contains_key("older"));
        assert!(store.contains_key("newer"));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();

        store.add("key1".to_string(), b"value1".to_vec());
        store.get("key1"); // hit
        store.get("nonexistent"); // miss
        store.reap_expired(Instant::now() + MAX_AGE * 2, MAX_AGE);

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.reaped, 1);
        assert_eq!(stats.reap_cycles, 1);
        assert_eq!(stats.total_entries, 0);
    }
}
