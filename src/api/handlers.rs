//! API Handlers
//!
//! HTTP request handlers translating requests into cache operations.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use crate::cache::{build_cache, Cache, CacheKind, CacheStats};
use crate::config::Config;
use crate::error::{ApiError, CacheError, Result as CacheResult};
use crate::models::{HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The cache synchronises internally, so handlers share it without an
/// outer lock.
#[derive(Clone)]
pub struct AppState {
    /// Backend serving loads and stores
    pub cache: Arc<dyn Cache>,
    /// Request outcome counters
    pub stats: Arc<CacheStats>,
    /// Which backend `cache` is
    pub cache_kind: CacheKind,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Arc<dyn Cache>, cache_kind: CacheKind) -> Self {
        Self {
            cache,
            stats: Arc::new(CacheStats::new()),
            cache_kind,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = build_cache(config.cache_kind, config.capacity, config.shards);
        Self::new(cache, config.cache_kind)
    }
}

/// Derives the cache key from a decoded request path.
///
/// Surrounding slashes and spaces are dropped and the key is lowercased.
/// Returns `None` when nothing is left.
pub fn normalize_key(path: &str) -> Option<String> {
    let key = path.trim_matches(|c| c == '/' || c == ' ').to_lowercase();
    (!key.is_empty()).then_some(key)
}

/// Percent-decodes a raw request path and normalises it into a key.
pub fn key_from_path(raw: &str) -> Result<String, ApiError> {
    let decoded = urlencoding::decode(raw).map_err(|_| ApiError::MalformedKey)?;
    normalize_key(&decoded).ok_or(ApiError::InvalidKey)
}

/// Fallback handler: every path that is not a side endpoint is a key.
///
/// - `GET` loads: 200 with the raw value, 404 when absent
/// - `POST` stores the body: 202
/// - failures map to 500, bad keys and other methods to 400
///
/// Cache calls are synchronous (the channel backend blocks on its worker),
/// so they run on the blocking pool rather than a runtime worker.
pub async fn cache_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let key = key_from_path(uri.path())?;

    match method {
        Method::GET => load_value(&state, key).await,
        Method::POST => store_value(&state, key, body).await,
        other => Err(ApiError::UnsupportedMethod(other.to_string())),
    }
}

/// Runs `op` against the cache on the blocking pool.
async fn with_cache<T, F>(state: &AppState, op: F) -> CacheResult<T>
where
    F: FnOnce(&dyn Cache) -> CacheResult<T> + Send + 'static,
    T: Send + 'static,
{
    let cache = Arc::clone(&state.cache);
    tokio::task::spawn_blocking(move || op(cache.as_ref()))
        .await
        .unwrap_or_else(|err| {
            error!("Cache task failed: {}", err);
            Err(CacheError::BackendUnavailable)
        })
}

async fn load_value(state: &AppState, key: String) -> Result<Response, ApiError> {
    let lookup = key.clone();
    match with_cache(state, move |cache| cache.load(&lookup)).await {
        Ok(Some(value)) => {
            state.stats.record_hit();
            Ok((
                [(header::CONTENT_TYPE, "application/octet-stream")],
                value,
            )
                .into_response())
        }
        Ok(None) => {
            state.stats.record_miss();
            debug!("Key not found: {}", key);
            Ok(StatusCode::NOT_FOUND.into_response())
        }
        Err(err) => {
            state.stats.record_failure();
            warn!("Load of '{}' failed: {}", key, err);
            Err(err.into())
        }
    }
}

async fn store_value(state: &AppState, key: String, value: Bytes) -> Result<Response, ApiError> {
    let size = value.len();
    let target = key.clone();
    match with_cache(state, move |cache| cache.store(&target, &value)).await {
        Ok(()) => {
            state.stats.record_store();
            Ok(StatusCode::ACCEPTED.into_response())
        }
        Err(err) => {
            state.stats.record_rejected_store();
            warn!("Store of '{}' ({} bytes) failed: {}", key, size, err);
            Err(err.into())
        }
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.cache_kind, state.stats.snapshot()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
