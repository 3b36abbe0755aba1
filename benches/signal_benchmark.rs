//! Benchmarks for kinesig numeric kernels.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kinesig::arithmetic::{apply_op, Operand};
use kinesig::core::{NumericArray, Operation};
use kinesig::interpolation::{lerp_array, linear_interpolation, spline_interpolation};

/// Generate a marker-like trajectory with a short gap every 50 frames.
fn generate_trajectory(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            if i % 50 >= 45 {
                f64::NAN
            } else {
                (i as f64 * 0.05).sin() * 100.0 + 500.0
            }
        })
        .collect()
}

fn bench_gap_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("gap_fill");

    for size in [1000, 10000, 100000].iter() {
        let values = generate_trajectory(*size);

        group.bench_with_input(BenchmarkId::new("linear", size), &values, |b, values| {
            b.iter(|| black_box(linear_interpolation(black_box(values), black_box(10))));
        });
        group.bench_with_input(BenchmarkId::new("spline", size), &values, |b, values| {
            b.iter(|| black_box(spline_interpolation(black_box(values), black_box(10))));
        });
    }

    group.finish();
}

fn bench_lerp(c: &mut Criterion) {
    let mut group = c.benchmark_group("lerp_array");

    for size in [1000, 10000, 100000].iter() {
        group.bench_with_input(BenchmarkId::new("frames", size), size, |b, &size| {
            let series = NumericArray::float32(generate_trajectory(size));

            b.iter(|| black_box(lerp_array(black_box(&series), black_box(101))));
        });
    }

    group.finish();
}

fn bench_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast");

    for size in [1000, 10000, 100000].iter() {
        group.bench_with_input(BenchmarkId::new("nested_minus_nested", size), size, |b, &size| {
            let axis = NumericArray::float32(generate_trajectory(size));
            let a = Operand::Nested(vec![axis.clone(), axis.clone(), axis.clone()]);
            let other = Operand::Nested(vec![axis.clone(), axis.clone(), axis]);

            b.iter(|| black_box(apply_op(black_box(&a), black_box(&other), Operation::Subtract)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gap_fill, bench_lerp, bench_broadcast);
criterion_main!(benches);
