//! Response models for the cache server API
//!
//! The cache endpoints themselves speak raw bytes; these DTOs cover the
//! JSON side endpoints and error bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
