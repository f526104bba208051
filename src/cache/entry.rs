//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored payload stamped with the moment it was added.
///
/// Entries are never mutated. Re-adding a key replaces the whole entry,
/// which also resets its age.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// When the entry was added (monotonic clock)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was created, measured at `now`.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `max_age` at `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `max_age` is not
    /// stale yet. It only becomes stale once its age strictly exceeds it.
    pub fn is_stale(&self, now: Instant, max_age: Duration) -> bool {
        self.age_at(now) > max_age
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(vec![1, 2, 3]);

        assert_eq!(entry.value, vec![1, 2, 3]);
        assert!(entry.age_at(Instant::now()) < Duration::from_secs(1));
    }

    #[test]
    fn test_age_never_negative() {
        let entry = CacheEntry::new(Vec::new());
        let before = entry.created_at - Duration::from_millis(10);

        assert_eq!(entry.age_at(before), Duration::ZERO);
    }

    #[test]
    fn test_staleness_boundary_condition() {
        let entry = CacheEntry::new(b"payload".to_vec());
        let max_age = Duration::from_millis(100);

        assert!(!entry.is_stale(entry.created_at, max_age));
        assert!(!entry.is_stale(entry.created_at + max_age, max_age));
        assert!(entry.is_stale(
            entry.created_at + max_age + Duration::from_millis(1),
            max_age
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_age_follows_clock() {
        let entry = CacheEntry::new(b"v".to_vec());

        tokio::time::advance(Duration::from_millis(250)).await;

        assert_eq!(entry.age_at(Instant::now()), Duration::from_millis(250));
    }
}
