//! Metrics recording overhead benchmark.

use criterion::{criterion_group, criterion_main, Criterion};
use metrics::{init_metrics, record_decision};
use std::hint::black_box;
use std::time::Duration;

fn bench_record_decision(c: &mut Criterion) {
    init_metrics();
    c.bench_function("record_decision", |b| {
        b.iter(|| black_box(record_decision(true, "read", Duration::from_micros(12))));
    });
}

criterion_group!(benches, bench_record_decision);
criterion_main!(benches);
