//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `PUT /cache/:key` - Store the request body under a key
//! - `GET /cache/:key` - Retrieve a payload by key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
