//! API Routes
//!
//! Configures the Axum router for the cache server.

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{cache_handler, health_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Request counters
/// - anything else - cache load (`GET`) or store (`POST`), keyed by path
///
/// `health` and `stats` are therefore not usable as cache keys.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
/// - Timeout: Answers 408 once `request_timeout` elapses
///
/// Request bodies are unbounded here; the cache itself rejects values that
/// can never fit.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .fallback(cache_handler)
        .layer(DefaultBodyLimit::disable())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
