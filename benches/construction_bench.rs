//! Criterion benchmarks for the u-msvrp constructors.
//!
//! Uses random uniform instances with three sources to measure construction
//! and refinement cost as the customer count grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_msvrp::constructive::{nearest_neighbor, savings};
use u_msvrp::local_search::two_opt_all;
use u_msvrp::models::Problem;
use u_msvrp::multistart::{savings_multistart, MultistartConfig};
use u_msvrp::selection::{create_rng, Selection};

// ===========================================================================
// Instances
// ===========================================================================

fn random_problem(n: usize, seed: u64) -> Problem {
    let mut rng = create_rng(seed);
    let mut builder = Problem::builder()
        .source(0.0, 0.0, &[40, 40])
        .source(100.0, 0.0, &[40, 40])
        .source(50.0, 100.0, &[40, 40]);
    for _ in 0..n {
        builder = builder.customer(
            rng.random_range(0.0..100.0),
            rng.random_range(0.0..100.0),
            rng.random_range(1..10),
        );
    }
    builder
        .depot(50.0, 50.0)
        .tmax(400.0)
        .build()
        .expect("valid benchmark instance")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_nearest_neighbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbor");
    group.sample_size(20);

    for &n in &[50, 100, 200] {
        let problem = random_problem(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &problem, |b, p| {
            b.iter(|| {
                let solution = nearest_neighbor(black_box(p), Selection::Greedy, &mut create_rng(0));
                black_box(solution)
            })
        });
    }
    group.finish();
}

fn bench_savings(c: &mut Criterion) {
    let mut group = c.benchmark_group("savings");
    group.sample_size(20);

    for &n in &[50, 100, 200] {
        let problem = random_problem(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &problem, |b, p| {
            b.iter(|| {
                let result = savings(
                    black_box(p),
                    Selection::Greedy,
                    Selection::Greedy,
                    &mut create_rng(0),
                );
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt_all");
    group.sample_size(20);

    for &n in &[50, 100, 200] {
        let problem = random_problem(n, 42);
        let start = nearest_neighbor(&problem, Selection::Biased(0.5), &mut create_rng(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(problem, start),
            |b, (p, s)| {
                b.iter(|| {
                    let mut solution = s.clone();
                    let outcome = two_opt_all(black_box(p), &mut solution, None);
                    black_box(outcome)
                })
            },
        );
    }
    group.finish();
}

fn bench_savings_multistart(c: &mut Criterion) {
    let mut group = c.benchmark_group("savings_multistart");
    group.sample_size(10);

    for parallel in [false, true] {
        let problem = random_problem(100, 42);
        let config = MultistartConfig::default()
            .with_max_iterations(100)
            .with_seed(42)
            .with_parallel(parallel);
        group.bench_with_input(
            BenchmarkId::new("n100_i100", if parallel { "parallel" } else { "sequential" }),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = savings_multistart(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_nearest_neighbor,
    bench_savings,
    bench_two_opt,
    bench_savings_multistart
);
criterion_main!(benches);
