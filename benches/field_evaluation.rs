use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use coulomb_field::charges::Charge;
use coulomb_field::fields::evaluate;
use coulomb_field::grid::GridSpec;
use coulomb_field::stream::trace;

fn ring(n: usize) -> Vec<Charge> {
    (0..n)
        .map(|k| {
            let theta = std::f64::consts::TAU * k as f64 / n as f64;
            let q = if k % 2 == 0 { 1.0 } else { -1.0 };
            Charge::new(5.0 * theta.cos(), 5.0 * theta.sin(), q)
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let grid = GridSpec::default();
    for n in [1, 4, 16] {
        let charges = ring(n);
        group.bench_function(BenchmarkId::new("charges", n), |b| {
            b.iter(|| evaluate(&charges, &grid))
        });
    }
    group.finish();
}

fn bench_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace");
    let grid = GridSpec::default();
    let field = evaluate(&ring(4), &grid).expect("valid charges");
    for density in [0.5, 1.5] {
        group.bench_function(BenchmarkId::new("density", density), |b| {
            b.iter(|| trace(&field, &grid, density))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_trace);
criterion_main!(benches);
