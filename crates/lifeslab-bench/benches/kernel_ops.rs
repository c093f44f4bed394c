//! Criterion micro-benchmarks for the local update kernel.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lifeslab_bench::reference_board;
use lifeslab_core::{HaloRow, Slice};
use lifeslab_kernel::{step_grid, UpdateKernel};

/// Benchmark: one generation over a whole 256x256 slice with dead halos.
fn bench_step_slice_64k(c: &mut Criterion) {
    let grid = reference_board(42);
    let current = grid.as_slice().clone();
    let mut next = Slice::dead(current.rows(), current.columns());
    let halo = HaloRow::dead(current.columns());
    let kernel: UpdateKernel = UpdateKernel::default();

    c.bench_function("step_slice_64k", |b| {
        b.iter(|| {
            kernel
                .step(black_box(&current), &halo, &halo, &mut next)
                .unwrap();
            black_box(&next);
        });
    });
}

/// Benchmark: neighbour counts for every cell of a 256x256 slice.
fn bench_live_neighbours_64k(c: &mut Criterion) {
    let grid = reference_board(42);
    let current = grid.as_slice().clone();
    let halo = HaloRow::dead(current.columns());
    let kernel: UpdateKernel = UpdateKernel::default();

    c.bench_function("live_neighbours_64k", |b| {
        b.iter(|| {
            let mut total = 0u32;
            for x in 0..current.rows() {
                for y in 0..current.columns() {
                    total += u32::from(kernel.live_neighbours(&current, &halo, &halo, x, y));
                }
            }
            black_box(total);
        });
    });
}

/// Benchmark: ten serial generations of the reference board.
fn bench_step_grid_10_generations(c: &mut Criterion) {
    let grid = reference_board(42);

    c.bench_function("step_grid_10_generations", |b| {
        b.iter(|| black_box(step_grid(black_box(&grid), 10)));
    });
}

criterion_group!(
    benches,
    bench_step_slice_64k,
    bench_live_neighbours_64k,
    bench_step_grid_10_generations
);
criterion_main!(benches);
