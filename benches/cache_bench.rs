//! Backend comparison benchmarks
//!
//! Every backend is preloaded with the same random records, then measured on
//! single-threaded loads, stores, and loads from several threads at once.

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

use ring_cache::warmer::random_letters;
use ring_cache::{build_cache, Cache, CacheKind};

// =============================================================================
// Helper Functions
// =============================================================================

const MAX_STR_LEN: usize = 32;
const NUM_KEYS: usize = 100;
const SHARDS: u8 = 16;

/// Entries for map kinds; bytes for buffer kinds, enough that preloading
/// never wraps.
fn capacity_for(kind: CacheKind) -> usize {
    match kind {
        CacheKind::Buffer | CacheKind::ShardedBuffer => NUM_KEYS * MAX_STR_LEN * 3,
        _ => NUM_KEYS,
    }
}

/// Builds `kind` and stores `NUM_KEYS` random records, returning their keys.
fn preloaded(kind: CacheKind) -> (Arc<dyn Cache>, Vec<String>) {
    let cache = build_cache(kind, capacity_for(kind), SHARDS);
    let mut rng = rand::thread_rng();

    let keys: Vec<String> = (0..NUM_KEYS)
        .map(|_| String::from_utf8_lossy(&random_letters(&mut rng, MAX_STR_LEN)).into_owned())
        .collect();

    for key in &keys {
        let _ = cache.store(key, &random_letters(&mut rng, MAX_STR_LEN));
    }

    (cache, keys)
}

// =============================================================================
// Benchmarks
// =============================================================================

/// Benchmark load performance on preloaded keys
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Elements(1));

    for kind in CacheKind::ALL {
        let (cache, keys) = preloaded(kind);
        let mut i = 0;

        group.bench_function(kind.as_str(), |b| {
            b.iter(|| {
                let result = cache.load(black_box(&keys[i]));
                i = (i + 1) % keys.len();
                result
            })
        });
    }

    group.finish();
}

/// Benchmark store performance, wrapping freely for buffer kinds
fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    group.throughput(Throughput::Elements(1));

    for kind in CacheKind::ALL {
        let (cache, keys) = preloaded(kind);
        let value = vec![b'v'; MAX_STR_LEN];
        let mut i = 0;

        group.bench_function(kind.as_str(), |b| {
            b.iter(|| {
                let result = cache.store(black_box(&keys[i]), black_box(&value));
                i = (i + 1) % keys.len();
                result
            })
        });
    }

    group.finish();
}

/// Benchmark loads issued from several threads at once
fn bench_concurrent_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_load");
    group.measurement_time(Duration::from_secs(10));

    let ops_per_thread = 10_000usize;

    for kind in CacheKind::ALL {
        let (cache, keys) = preloaded(kind);

        for num_threads in [1usize, 4, 8] {
            group.throughput(Throughput::Elements((ops_per_thread * num_threads) as u64));

            group.bench_with_input(
                BenchmarkId::new(kind.as_str(), num_threads),
                &num_threads,
                |b, &num_threads| {
                    b.iter(|| {
                        std::thread::scope(|scope| {
                            for _ in 0..num_threads {
                                scope.spawn(|| {
                                    let mut rng = rand::thread_rng();
                                    for _ in 0..ops_per_thread {
                                        let key = &keys[rng.gen_range(0..keys.len())];
                                        let _ = black_box(cache.load(key));
                                    }
                                });
                            }
                        });
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(basic_benches, bench_load, bench_store);

criterion_group!(
    name = concurrent_benches;
    config = Criterion::default().sample_size(30);
    targets = bench_concurrent_load
);

criterion_main!(basic_benches, concurrent_benches);
