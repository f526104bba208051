//! reapcache - An in-memory key/value cache with background reaping
//!
//! Entries are stamped when added and removed by a per-cache reaper task
//! once they are older than the cache's interval.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
pub use error::CacheError;
