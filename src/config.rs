//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reap interval in seconds; also the maximum age of an entry
    pub reap_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `REAP_INTERVAL_SECS` - Reap interval in seconds (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            reap_interval: env::var("REAP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reap_interval),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// The reap interval as a `Duration`.
    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reap_interval: 30,
            server_port: 3000,
        }
    }
}
