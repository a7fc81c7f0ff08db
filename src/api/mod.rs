//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Request counters
//! - `GET /<key>` - Load the raw value stored under `key`
//! - `POST /<key>` - Store the request body under `key`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
