//! Error types for the cache
//!
//! `add` and `get` are infallible; these errors only arise at construction
//! and at the HTTP edge.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
#[derive(Error, Debug)]
pub enum CacheError {
    /// The reap interval was zero
    #[error("Reap interval must be greater than zero")]
    InvalidInterval,

    /// Key is not (or no longer) in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidInterval => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
