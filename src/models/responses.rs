//! Response DTOs for the cache server API
//!
//! Defines the JSON bodies returned by the metadata endpoints.

use std::time::Duration;

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for PUT /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
    /// Payload size in bytes
    pub size: usize,
}

impl PutResponse {
    pub fn new(key: impl Into<String>, size: usize) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached successfully", key),
            key,
            size,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of lookups that found a value
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of entries removed by the reaper
    pub reaped: u64,
    /// Number of completed reap passes
    pub reap_cycles: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            reaped: stats.reaped,
            reap_cycles: stats.reap_cycles,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for GET /health
///
/// The server counts as healthy only while its reaper is alive; without it
/// nothing would ever expire.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: &'static str,
    pub reaper_running: bool,
    pub reap_interval_secs: f64,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(reaper_running: bool, reap_interval: Duration) -> Self {
        Self {
            status: if reaper_running { "healthy" } else { "degraded" },
            reaper_running,
            reap_interval_secs: reap_interval.as_secs_f64(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
