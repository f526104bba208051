//! Background Tasks Module
//!
//! Contains background tasks that run alongside a cache instance.
//!
//! # Tasks
//! - Reaper: removes stale cache entries once per interval until shut down

mod reaper;

pub use reaper::spawn_reaper;
