//! Criterion benchmarks for series_engine.
//!
//! Benchmarks cover:
//! - One advance at increasing `q`, sequential vs fork-join
//! - Digit extraction at increasing `q`
//! - Checkpoint encoding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use series_engine::checkpoint::encode;
use series_engine::{AdvanceMode, RecurrenceState};

fn state_at(q: u64) -> RecurrenceState {
    let mut state = RecurrenceState::initial();
    state.advance_by(q, AdvanceMode::ForkJoin);
    state
}

/// Benchmark a single advance from states of growing operand size.
fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for q in [100_u64, 1_000, 5_000] {
        let state = state_at(q);
        for mode in [AdvanceMode::Sequential, AdvanceMode::ForkJoin] {
            group.bench_with_input(BenchmarkId::new(mode.as_str(), q), &state, |b, s| {
                b.iter_batched(
                    || s.clone(),
                    |mut s| {
                        s.advance_with(mode);
                        black_box(s)
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

/// Benchmark decimal extraction.
fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_digits");
    group.sample_size(20);

    for q in [10_u64, 100, 1_000] {
        let state = state_at(q);
        group.bench_with_input(BenchmarkId::from_parameter(q), &state, |b, s| {
            b.iter(|| black_box(s.extract_digits()));
        });
    }

    group.finish();
}

/// Benchmark checkpoint encoding.
fn bench_encode(c: &mut Criterion) {
    let state = state_at(1_000);
    c.bench_function("encode_q1000", |b| b.iter(|| black_box(encode(&state))));
}

criterion_group!(benches, bench_advance, bench_extract, bench_encode);
criterion_main!(benches);
