//! Integration Tests for the Cache Warmer
//!
//! Runs the warmer against a live server bound to an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use ring_cache::{
    api::create_router, cache::RingCache, error::WarmerError, warmer::seed, AppState, CacheKind,
};
use tokio::net::TcpListener;

// == Helper Functions ==

/// Serves `state` on 127.0.0.1 and returns its base URL.
async fn spawn_server(state: AppState) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(state, Duration::from_secs(5));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{}", addr)).unwrap()
}

#[tokio::test]
async fn test_warmer_seeds_every_record() {
    let state = AppState::new(ring_cache::build_cache(CacheKind::Map, 256, 1), CacheKind::Map);
    let stats = state.stats.clone();
    let base = spawn_server(state).await;

    let accepted = seed(&Client::new(), &base, 50, 4).await.unwrap();

    assert_eq!(accepted, 50);
    assert_eq!(stats.snapshot().stores, 50);
}

#[tokio::test]
async fn test_warmer_against_sharded_backend() {
    let state = AppState::new(
        ring_cache::build_cache(CacheKind::ShardedMap, 256, 4),
        CacheKind::ShardedMap,
    );
    let base = spawn_server(state).await;
    let client = Client::new();

    seed(&client, &base, 5, 2).await.unwrap();

    // Random keys may repeat; every request is still counted
    let stats: serde_json::Value = client
        .get(base.join("/stats").unwrap())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["stores"], 5);

    let health = client.get(base.join("/health").unwrap()).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_warmer_stops_on_rejected_record() {
    // Too small for any generated record
    let state = AppState::new(Arc::new(RingCache::new(16)), CacheKind::Buffer);
    let base = spawn_server(state).await;

    let result = seed(&Client::new(), &base, 20, 2).await;

    match result {
        Err(WarmerError::UnexpectedStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected a rejected record, got {:?}", other),
    }
}
