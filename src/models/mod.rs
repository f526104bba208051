//! Request and Response models for the cache server API
//!
//! Payloads travel as raw bytes; these types cover keys and the JSON
//! metadata responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_key, MAX_KEY_LENGTH};
pub use responses::{ErrorResponse, HealthResponse, PutResponse, StatsResponse};
