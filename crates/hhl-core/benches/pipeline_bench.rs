//! Benchmarks for the HHL pipeline
//!
//! Run with: cargo bench -p hhl-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hhl_core::{
    HhlCircuit, NullReporter, PipelineConfig, Scenario, build_unitary, compute_eigen,
    plan_parameters, run_scenario,
};

/// Benchmark the full pipeline on each reference scenario
fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario");
    let config = PipelineConfig::default();

    for scenario in Scenario::defaults() {
        group.bench_with_input(
            BenchmarkId::new("run", &scenario.name),
            &scenario,
            |b, s| {
                b.iter(|| run_scenario(black_box(s), &config, &mut NullReporter).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark the spectral stages in isolation
fn bench_spectral(c: &mut Criterion) {
    let a = Scenario::defaults()[0].matrix().unwrap();

    c.bench_function("compute_eigen", |b| {
        b.iter(|| compute_eigen(black_box(&a), 1e-9, 1e-9).unwrap());
    });

    let eig = compute_eigen(&a, 1e-9, 1e-9).unwrap();
    let p = plan_parameters(&eig.w).unwrap();
    c.bench_function("build_unitary", |b| {
        b.iter(|| build_unitary(black_box(&eig.w), &eig.v, black_box(p.t), 1e-9).unwrap());
    });
}

/// Benchmark circuit execution as the clock register widens
fn bench_clock_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_run");
    let s = &Scenario::defaults()[0];
    let a = s.matrix().unwrap();
    let eig = compute_eigen(&a, 1e-9, 1e-9).unwrap();
    let p = plan_parameters(&eig.w).unwrap();
    let u = build_unitary(&eig.w, &eig.v, p.t, 1e-9).unwrap();

    for clock_bits in [2u32, 4, 6, 8] {
        let qc = HhlCircuit::build(s.b, p.lam, &u, p.c, clock_bits).unwrap();
        group.bench_with_input(BenchmarkId::new("clock_bits", clock_bits), &qc, |b, qc| {
            // wider clocks may post-select into an empty subspace
            b.iter(|| {
                let _ = qc.run(&mut NullReporter);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scenarios, bench_spectral, bench_clock_width);
criterion_main!(benches);
