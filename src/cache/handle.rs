//! Cache Handle Module
//!
//! The public, thread-safe cache. Owns the locked store and the reaper task
//! that keeps it trimmed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

// == Cache ==
/// An in-memory key/value cache whose entries are reaped once they are older
/// than the interval it was built with.
///
/// `add` and `get` never fail and never evict. Entries disappear only when the
/// background reaper finds them stale, which happens somewhere between one and
/// two intervals after they were last added.
///
/// The reaper runs until [`shutdown`](Cache::shutdown) is called or the cache
/// is dropped. Share a cache between tasks with `Arc<Cache>`.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use reapcache::Cache;
///
/// # async fn demo() -> reapcache::error::Result<()> {
/// let cache = Cache::new(Duration::from_secs(30))?;
///
/// cache.add("https://example.com/a", b"payload".to_vec()).await;
/// assert_eq!(cache.get("https://example.com/a").await, Some(b"payload".to_vec()));
///
/// cache.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cache {
    /// Entry map and counters, shared with the reaper
    store: Arc<Mutex<CacheStore>>,
    /// Reap period and maximum entry age
    interval: Duration,
    /// Signals the reaper to stop; dropping it also stops the reaper
    shutdown_tx: watch::Sender<bool>,
    /// Reaper task handle, taken on shutdown
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidInterval`] if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidInterval);
        }

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper(store.clone(), interval, shutdown_rx);

        info!("Cache created with reap interval of {:?}", interval);

        Ok(Self {
            store,
            interval,
            shutdown_tx,
            reaper: Mutex::new(Some(reaper)),
        })
    }

    // == Add ==
    /// Inserts or overwrites the value for `key`, stamped with the current time.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let mut store = self.store.lock().await;
        store.add(key.into(), value.into());
    }

    // == Get ==
    /// Returns the value for `key` if it has not been reaped yet.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut store = self.store.lock().await;
        store.get(key)
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, or runs `fetch` and caches its output.
    ///
    /// The lock is not held while `fetch` runs, so two callers missing on the
    /// same key may both fetch; the later `add` wins. A fetch error is returned
    /// as-is and nothing is cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        fetch: F,
    ) -> std::result::Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<u8>, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!("Cache hit for {}", key);
            return Ok(value);
        }

        debug!("Cache miss for {}, fetching", key);
        let value = fetch().await?;
        self.add(key, value.clone()).await;
        Ok(value)
    }

    // == Reap Now ==
    /// Runs one reap pass immediately, using the same cutoff as the reaper.
    ///
    /// Returns the number of entries removed.
    pub async fn reap_now(&self) -> usize {
        let mut store = self.store.lock().await;
        store.reap_expired(Instant::now(), self.interval)
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to finish.
    ///
    /// The cache stays usable afterwards but nothing expires any more.
    /// Calling this more than once is a no-op.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);

        let handle = self.reaper.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Returns true while the background reaper is alive.
    pub async fn is_reaper_running(&self) -> bool {
        self.reaper
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// The reap period, which is also the maximum age an entry may reach.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}
