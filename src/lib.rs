//! Ring Cache - byte-value key/value caches behind one contract
//!
//! The core backend is a fixed-capacity ring buffer with a hash index and
//! self-describing record framing; map, actor-style and sharded backends
//! implement the same two-operation contract. An HTTP demonstration server
//! and a cache warmer sit on top.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod warmer;

pub use api::AppState;
pub use cache::{build_cache, Cache, CacheKind};
pub use config::{Config, WarmerConfig};
pub use tasks::spawn_stats_reporter;
