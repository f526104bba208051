//! Reaper Task
//!
//! Background task that periodically removes stale cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the reap loop for one cache instance.
///
/// Each cycle sleeps for `interval`, then takes the store lock and removes
/// every entry older than `interval`. The same value is both the period and
/// the staleness cutoff, so an unrefreshed entry lives between one and two
/// intervals.
///
/// The loop stops when `true` is sent on `shutdown_rx` or when the sender is
/// dropped. The signal is observed at the sleep boundary; a pass that already
/// holds the lock always runs to completion.
///
/// # Arguments
/// * `store` - The store shared with the owning cache handle
/// * `interval` - Sleep period and maximum entry age
/// * `shutdown_rx` - Receiving half of the owning cache's shutdown channel
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache reaper with interval of {:?}", interval);

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                    continue;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let removed = {
                let mut store = store.lock().await;
                store.reap_expired(Instant::now(), interval)
            };

            if removed > 0 {
                info!("Cache reaper: removed {} stale entries", removed);
            } else {
                debug!("Cache reaper: no stale entries found");
            }
        }

        info!("Cache reaper stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn shared_store() -> Arc<Mutex<CacheStore>> {
        Arc::new(Mutex::new(CacheStore::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_stale_entries() {
        let store = shared_store();
        store.lock().await.add("stale".to_string(), b"v".to_vec());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reaper(store.clone(), INTERVAL, shutdown_rx);

        tokio::time::sleep(INTERVAL * 3).await;

        assert!(!store.lock().await.contains_key("stale"));

        let _ = shutdown_tx.send(true);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_preserves_fresh_entries() {
        let store = shared_store();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reaper(store.clone(), INTERVAL, shutdown_rx);

        // Added just before the first pass, so still young when it runs
        tokio::time::sleep(INTERVAL - Duration::from_millis(10)).await;
        store.lock().await.add("fresh".to_string(), b"v".to_vec());
        tokio::time::sleep(Duration::from_millis(30)).await;

        let store_guard = store.lock().await;
        assert!(store_guard.contains_key("fresh"));
        assert_eq!(store_guard.stats().reap_cycles, 1);
        drop(store_guard);

        let _ = shutdown_tx.send(true);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_on_signal() {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reaper(shared_store(), INTERVAL, shutdown_rx);

        shutdown_tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("reaper should stop after the shutdown signal")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_when_sender_dropped() {
        let store = shared_store();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reaper(store.clone(), INTERVAL, shutdown_rx);

        drop(shutdown_tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("reaper should stop once its cache is gone")
            .unwrap();
        assert_eq!(Arc::strong_count(&store), 1);
    }
}
