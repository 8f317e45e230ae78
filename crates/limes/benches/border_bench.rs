//! Benchmarks for border-basis construction and zero extraction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use limes::prelude::*;

/// Generators of the grid {1, …, k}ⁿ: one univariate product per variable.
fn grid_system(num_vars: usize, k: usize) -> (PolyRing, Vec<Polynomial>) {
    let symbols: Vec<String> = (0..num_vars).map(|i| format!("x{i}")).collect();
    let ring = PolyRing::new(symbols, MonomialOrder::Grevlex);

    let generators = (0..num_vars)
        .map(|i| {
            (1..=k).fold(ring.constant(1.0), |acc, root| {
                acc.mul(&ring.var(i).sub(&ring.constant(root as f64)))
            })
        })
        .collect();
    (ring, generators)
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let factory = BorderBasisFactory::default();

    for (num_vars, k) in [(1, 6), (2, 2), (2, 3), (3, 2)] {
        let (ring, generators) = grid_system(num_vars, k);
        group.bench_with_input(
            BenchmarkId::new(format!("grid_{num_vars}vars"), k),
            &k,
            |b, _| b.iter(|| black_box(factory.generate(&ring, &generators))),
        );
    }

    group.finish();
}

fn bench_zeros(c: &mut Criterion) {
    let mut group = c.benchmark_group("zeros");
    let factory = BorderBasisFactory::default();

    for (num_vars, k) in [(2, 2), (2, 3), (3, 2)] {
        let (ring, generators) = grid_system(num_vars, k);
        let Ok(basis) = factory.generate(&ring, &generators) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::new(format!("grid_{num_vars}vars"), k),
            &k,
            |b, _| b.iter(|| black_box(basis.zeros())),
        );
    }

    group.finish();
}

fn bench_quotient(c: &mut Criterion) {
    let (ring, generators) = grid_system(2, 3);
    let factory = BorderBasisFactory::default();
    let Ok(basis) = factory.generate(&ring, &generators) else {
        return;
    };
    let far = ring.poly(&[(&[9, 7], 1.0), (&[4, 4], -2.0), (&[0, 1], 3.0)]);

    c.bench_function("quotient_degree_16", |b| {
        b.iter(|| black_box(basis.quotient(&far)))
    });
}

criterion_group!(benches, bench_generate, bench_zeros, bench_quotient);

criterion_main!(benches);
