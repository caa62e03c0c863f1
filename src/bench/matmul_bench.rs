use std::hint::black_box;

use blockbench::{Matrix, matmul_blocked, matmul_naive_ijk, matmul_naive_ikj, seed_inputs};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const SIZES: [usize; 3] = [64, 128, 256];
const BLOCK_SIZES: [usize; 4] = [8, 16, 32, 64];

fn inputs(n: usize) -> (Matrix, Matrix) {
    let mut a = Matrix::zeros(n).unwrap();
    let mut b = Matrix::zeros(n).unwrap();
    seed_inputs(&mut a, &mut b, 42);
    (a, b)
}

fn bench_loop_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("loop_order");
    for n in SIZES {
        group.throughput(Throughput::Elements((n as u64).pow(3)));
        let (a, b) = inputs(n);
        let mut out = vec![0.0; n * n];

        group.bench_with_input(BenchmarkId::new("ijk", n), &n, |bench, &n| {
            bench.iter(|| {
                out.fill(0.0);
                matmul_naive_ijk(black_box(a.as_slice()), black_box(b.as_slice()), &mut out, n);
                black_box(out[0]);
            });
        });
        group.bench_with_input(BenchmarkId::new("ikj", n), &n, |bench, &n| {
            bench.iter(|| {
                out.fill(0.0);
                matmul_naive_ikj(black_box(a.as_slice()), black_box(b.as_slice()), &mut out, n);
                black_box(out[0]);
            });
        });
    }
    group.finish();
}

fn bench_blocked(c: &mut Criterion) {
    let n = 256;
    let (a, b) = inputs(n);
    let mut out = vec![0.0; n * n];

    let mut group = c.benchmark_group("blocked_256");
    group.throughput(Throughput::Elements((n as u64).pow(3)));
    for block_size in BLOCK_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(block_size), &block_size, |bench, &s| {
            bench.iter(|| {
                out.fill(0.0);
                matmul_blocked(black_box(a.as_slice()), black_box(b.as_slice()), &mut out, n, s);
                black_box(out[0]);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_loop_order, bench_blocked);
criterion_main!(benches);
