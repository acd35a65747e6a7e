//! Benchmarks for submatrix enumeration and the checkers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use subspectra::config::{StressProfile, Tolerances};
use subspectra::linalg::{orthogonal_complement, qr_complement};
use subspectra::projection::ProjectionSample;
use subspectra::sampler::{random_hermitian, random_unit_vector, SpectrumValues};
use subspectra::submatrix::all_size_s_spectra;
use subspectra::theorems::{aggregate_bounds_for, hierarchy_for, polynomial_lemma_for};
use subspectra::utils::binomial;

fn bench_size_s_spectra(c: &mut Criterion) {
    let mut group = c.benchmark_group("size_s_spectra");
    let mut rng = StdRng::seed_from_u64(42);

    for n in [6, 8, 10, 12] {
        let a = random_hermitian(&mut rng, n);
        let s = n / 2;
        group.throughput(Throughput::Elements(binomial(n, s).unwrap_or(0)));

        group.bench_with_input(BenchmarkId::new(format!("s={}", s), n), &a, |b, a| {
            b.iter(|| all_size_s_spectra(black_box(a), s));
        });
    }

    group.finish();
}

fn bench_complement(c: &mut Criterion) {
    let mut group = c.benchmark_group("orthogonal_complement");
    let mut rng = StdRng::seed_from_u64(43);

    for n in [8, 32, 128] {
        let u = random_unit_vector(&mut rng, n, true);

        group.bench_with_input(BenchmarkId::new("null_space", n), &u, |b, u| {
            b.iter(|| orthogonal_complement(black_box(u)));
        });
        group.bench_with_input(BenchmarkId::new("qr", n), &u, |b, u| {
            b.iter(|| qr_complement(black_box(u)));
        });
    }

    group.finish();
}

fn bench_checkers(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkers");
    let mut rng = StdRng::seed_from_u64(44);
    let tolerances = Tolerances::default();

    for n in [8, 16, 32] {
        let a = random_hermitian(&mut rng, n);
        group.bench_with_input(BenchmarkId::new("aggregate", n), &a, |b, a| {
            b.iter(|| aggregate_bounds_for(black_box(a), 1, n - 1, tolerances.aggregate));
        });

        let sample =
            ProjectionSample::stress(&mut rng, n, &StressProfile::default(), SpectrumValues::Integer);
        group.bench_with_input(BenchmarkId::new("polynomial_lemma", n), &sample, |b, s| {
            b.iter(|| polynomial_lemma_for(black_box(s), &tolerances));
        });
    }

    for n in [6, 8] {
        let a = random_hermitian(&mut rng, n);
        group.bench_with_input(BenchmarkId::new("hierarchy", n), &a, |b, a| {
            b.iter(|| hierarchy_for(black_box(a), n / 2 + 1, n / 2 - 1, tolerances.hierarchy));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_size_s_spectra, bench_complement, bench_checkers);
criterion_main!(benches);
