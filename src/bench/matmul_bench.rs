//! Criterion benchmarks for the three multiply strategies.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mm::matrix::{create_matrix, init_dense, init_sparse, seeded_rng};
use mm::{Matrix, Profiler, Schedule, matmul_inner_mt, matmul_outer_mt, matmul_sparse_mt};
use std::hint::black_box;

const SIZES: [usize; 2] = [64, 128];

fn operands(n: usize) -> (Matrix, Matrix, Matrix) {
    let mut rng = seeded_rng(1);
    let mut a = create_matrix(n);
    let mut b = create_matrix(n);
    let mut sparse_a = create_matrix(n);
    init_dense(&mut a, &mut rng);
    init_dense(&mut b, &mut rng);
    init_sparse(&mut sparse_a, &mut rng, 80);
    (a, b, sparse_a)
}

fn bench_dense(c: &mut Criterion) {
    let threads = num_cpus::get().max(1);
    let mut group = c.benchmark_group("dense");
    let mut profiler = Profiler::setup(threads);

    for n in SIZES {
        let (a, b, _) = operands(n);
        let mut out = create_matrix(n);

        group.bench_with_input(BenchmarkId::new("mult1", n), &n, |bench, _| {
            bench.iter(|| matmul_outer_mt(black_box(&mut out), &a, &b, threads, &mut profiler))
        });
        group.bench_with_input(BenchmarkId::new("mult2", n), &n, |bench, _| {
            bench.iter(|| matmul_inner_mt(black_box(&mut out), &a, &b, threads, &mut profiler))
        });
    }
    group.finish();
}

fn bench_sparse(c: &mut Criterion) {
    let threads = num_cpus::get().max(1);
    let mut group = c.benchmark_group("sparsemult");
    let mut profiler = Profiler::setup(threads);

    for n in SIZES {
        let (_, b, sparse_a) = operands(n);
        let mut out = create_matrix(n);

        for schedule in Schedule::ALL {
            group.bench_with_input(BenchmarkId::new(schedule.as_str(), n), &n, |bench, _| {
                bench.iter(|| {
                    matmul_sparse_mt(black_box(&mut out), &sparse_a, &b, threads, schedule, &mut profiler)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_dense, bench_sparse);
criterion_main!(benches);
