#![allow(missing_docs)]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use lockstep_math::{kernel_digest, Fixed64, FixedVec2, TableSet};

const BATCH: usize = 4_096;

fn inputs(seed: u64, lo: i64, hi: i64) -> Vec<Fixed64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..BATCH).map(|_| Fixed64::from_raw(rng.gen_range(lo..hi))).collect()
}

fn bench_arithmetic(c: &mut Criterion) {
    let lhs = inputs(1, -(1 << 40), 1 << 40);
    let rhs = inputs(2, 1, 1 << 20);

    let mut group = c.benchmark_group("arithmetic");
    group.throughput(Throughput::Elements(BATCH as u64));
    group.bench_function("wrapping_mul", |b| {
        b.iter(|| {
            for (a, r) in lhs.iter().zip(&rhs) {
                black_box(*a * *r);
            }
        })
    });
    group.bench_function("checked_mul", |b| {
        b.iter(|| {
            for (a, r) in lhs.iter().zip(&rhs) {
                let _ = black_box(a.checked_mul(*r));
            }
        })
    });
    group.bench_function("checked_div", |b| {
        b.iter(|| {
            for (a, r) in lhs.iter().zip(&rhs) {
                let _ = black_box(a.checked_div(*r));
            }
        })
    });
    group.finish();
}

fn bench_tables(c: &mut Criterion) {
    let tables = TableSet::author();
    let angles = inputs(3, 0, Fixed64::TAU.raw() * 4);
    let radicands = inputs(4, 1, 1 << 40);

    let mut group = c.benchmark_group("tables");
    group.throughput(Throughput::Elements(BATCH as u64));
    group.bench_function("sin", |b| {
        b.iter(|| {
            for a in &angles {
                let _ = black_box(a.sin(&tables));
            }
        })
    });
    group.bench_function("sqrt", |b| {
        b.iter(|| {
            for r in &radicands {
                let _ = black_box(r.sqrt(&tables));
            }
        })
    });
    group.bench_function("vec2_rotate", |b| {
        let v = FixedVec2::from_ints(3, 4);
        b.iter(|| {
            for a in &angles {
                let _ = black_box(v.rotate(*a, &tables));
            }
        })
    });
    group.finish();
}

fn bench_digest(c: &mut Criterion) {
    let tables = TableSet::author();
    let mut group = c.benchmark_group("kernel_digest");
    group.sample_size(20);
    for &n in &[64u32, 1_024] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(kernel_digest(&tables, n)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_arithmetic, bench_tables, bench_digest);
criterion_main!(benches);
