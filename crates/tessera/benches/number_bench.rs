//! Benchmarks for the numeric tower and number theory.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tessera::numbers::{Complex, Integer, Number, Rational};

fn bench_factorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorize");

    // Smooth numbers, a prime and a semiprime of two six digit primes.
    for n in [720_720_i64, 1_000_003, 999_983 * 1_000_003] {
        let value = Integer::new(n);
        group.bench_with_input(BenchmarkId::new("Integer", n), &value, |b, v| {
            b.iter(|| black_box(v.factorize()));
        });
    }

    group.finish();
}

fn bench_phi(c: &mut Criterion) {
    let mut group = c.benchmark_group("phi");

    for n in [360_i64, 65_536, 1_000_000_007] {
        let value = Integer::new(n);
        group.bench_with_input(BenchmarkId::new("Integer", n), &value, |b, v| {
            b.iter(|| black_box(v.phi()));
        });
    }

    group.finish();
}

fn bench_tower_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("tower_add_mul");

    let operands = [
        ("Integer", Number::from(Integer::new(123_456_789)), Number::from(987_654_321)),
        (
            "Rational",
            Number::from(Rational::from_i64(22, 7)),
            Number::from(Rational::from_i64(-355, 113)),
        ),
        (
            "Mixed",
            Number::from(Rational::from_i64(1, 3)),
            Number::from(Complex::from_f64(0.5, -2.0)),
        ),
    ];

    for (name, a, b) in &operands {
        group.bench_function(*name, |bench| {
            bench.iter(|| black_box(&(black_box(a) + black_box(b)) * black_box(b)));
        });
    }

    group.finish();
}

fn bench_integer_pow(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_pow");
    let base = Integer::new(3);

    for exp in [64_u32, 512, 4096] {
        group.bench_with_input(BenchmarkId::new("3^k", exp), &exp, |b, &k| {
            b.iter(|| black_box(base.pow(k)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_factorize,
    bench_phi,
    bench_tower_arithmetic,
    bench_integer_pow
);
criterion_main!(benches);
