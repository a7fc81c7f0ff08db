//! Error types for the cache and the server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Failure of a single store or load call.
///
/// Absence of a key is not an error; loads report it as `Ok(None)`.
/// None of these failures leave the cache unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The framed record can never fit in the buffer
    #[error("record of {record_size} bytes exceeds cache capacity of {capacity} bytes")]
    CapacityExceeded { record_size: usize, capacity: usize },

    /// The indexed slot holds a different digest.
    ///
    /// Raised both when a wraparound overwrote the key's record and when two
    /// distinct keys share a 64-bit digest; the two cases are indistinguishable.
    #[error("cache key collision for '{key}'")]
    DigestMismatch { key: String },

    /// A stale length field implies a span past the end of the buffer
    #[error("cached data length is out of bounds: span {span} at offset {offset} exceeds capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        span: usize,
        capacity: usize,
    },

    /// Marker bytes around the payload did not match
    #[error("cached data for '{key}' at offset {offset} is corrupted")]
    FramingCorrupted { key: String, offset: usize },

    /// The worker owning the backend is gone
    #[error("cache backend is unavailable")]
    BackendUnavailable,
}

// == Config Error Enum ==
/// Fatal configuration problems detected at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// CACHE_KIND names no known backend
    #[error("unsupported cache kind: {0}")]
    UnknownCacheKind(String),

    /// A required variable is missing
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but malformed
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

// == Warmer Error Enum ==
/// Reasons the cache warmer stops early.
#[derive(Error, Debug)]
pub enum WarmerError {
    /// Transport-level failure talking to the server
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server refused a record
    #[error("server returned status code {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// A request task panicked or was cancelled
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// == API Error Enum ==
/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request path trimmed down to nothing
    #[error("Key cannot be empty")]
    InvalidKey,

    /// Request path decoded to invalid UTF-8
    #[error("Key is not valid UTF-8")]
    MalformedKey,

    /// Only GET and POST address the cache
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Store or load failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidKey => StatusCode::BAD_REQUEST,
            ApiError::MalformedKey => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMethod(_) => StatusCode::BAD_REQUEST,
            ApiError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
