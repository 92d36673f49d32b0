//! Per-request overhead benchmarks for the pieces of the `/check` pipeline
//! that run synchronously on every call, outside of network I/O.

use criterion::{criterion_group, criterion_main, Criterion};
use policy_engine::cache_key;
use reaper_core::AccessType;
use std::hint::black_box;

fn bench_cache_key(c: &mut Criterion) {
    c.bench_function("pipeline_cache_key", |b| {
        b.iter(|| {
            black_box(cache_key(
                black_box("s3-reaper"),
                black_box("alice"),
                black_box("reports"),
                black_box(Some("q3.csv")),
                black_box(AccessType::Read),
            ))
        });
    });
}

fn bench_derive_cli_ip(c: &mut Criterion) {
    c.bench_function("pipeline_derive_cli_ip", |b| {
        b.iter(|| {
            black_box(message_queue::derive_cli_ip(
                black_box(Some("10.0.0.1, 10.0.0.2")),
                black_box(Some("10.0.0.3")),
            ))
        });
    });
}

criterion_group!(benches, bench_cache_key, bench_derive_cli_ip);
criterion_main!(benches);
