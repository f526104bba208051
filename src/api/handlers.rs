//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::cache::Cache;
use crate::error::{CacheError, Result};
use crate::models::{validate_key, HealthResponse, PutResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the one cache instance the server was started with.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<Cache>,
}

impl AppState {
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }
}

/// Handler for PUT /cache/:key
///
/// Stores the raw request body under `key`, replacing any previous value.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let size = body.len();
    state.cache.add(key.clone(), body.to_vec()).await;

    Ok(Json(PutResponse::new(key, size)))
}

/// Handler for GET /cache/:key
///
/// Returns the cached payload as-is.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse> {
    match state.cache.get(&key).await {
        Some(value) => Ok(([(header::CONTENT_TYPE, "application/octet-stream")], value)),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
///
/// Always 200; a stopped reaper shows up as a "degraded" status.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(
        state.cache.is_reaper_running().await,
        state.cache.interval(),
    ))
}
