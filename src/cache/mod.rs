//! Cache Module
//!
//! In-memory key/value caching with interval-based background reaping.

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
