//! Benchmarks for training and scoring the neural regressor.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use neuroreg::prelude::*;

fn line(n: usize) -> (Matrix<f64>, Vector<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|&x| 2.0 * x + 1.0).collect();
    (Matrix::from_vec(n, 1, xs).unwrap(), Vector::from_vec(ys))
}

fn bench_regressor_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("regressor_fit");
    group.sample_size(20);

    for size in [64, 256, 1024].iter() {
        let (x, y) = line(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut est = NeuralRegressor::new(DynamicRegressor::new(vec![32]))
                    .with_metrics(vec![Metric::RSquared])
                    .with_epochs(5)
                    .with_random_state(0);
                est.fit(black_box(&x), black_box(&y)).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_regressor_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("regressor_score");

    for size in [64, 256, 1024].iter() {
        let (x, y) = line(*size);
        let mut est: NeuralRegressor = NeuralRegressor::default()
            .with_epochs(1)
            .with_random_state(0);
        est.fit(&x, &y).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| est.score(black_box(&x), black_box(&y)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_regressor_fit, bench_regressor_score);
criterion_main!(benches);
