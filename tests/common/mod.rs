//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use rand::Rng;
use u_msvrp::models::{Problem, ViolationType};
use u_msvrp::selection::create_rng;

/// Installs `env_logger` once; `RUST_LOG=debug` shows the heuristics' logs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One source with two vehicles of capacity 10 and three colinear customers
/// of demand 4 at x = 1, 2, 3. The depot sits at x = 4.
pub fn colinear(tmax: f64) -> Problem {
    Problem::builder()
        .source(0.0, 0.0, &[10, 10])
        .customer(1.0, 0.0, 4)
        .customer(2.0, 0.0, 4)
        .customer(3.0, 0.0, 4)
        .depot(4.0, 0.0)
        .tmax(tmax)
        .build()
        .expect("valid problem")
}

/// Random instance with three sources of uneven fleets.
pub fn random_problem(seed: u64, customers: usize, capacity: i32, tmax: f64) -> Problem {
    let mut rng = create_rng(seed);
    let mut builder = Problem::builder()
        .source(0.0, 0.0, &[capacity, capacity])
        .source(60.0, 0.0, &[capacity])
        .source(30.0, 50.0, &[capacity, capacity, capacity]);
    for _ in 0..customers {
        builder = builder.customer(
            rng.random_range(0.0..60.0),
            rng.random_range(0.0..50.0),
            rng.random_range(1..8),
        );
    }
    builder
        .depot(30.0, 20.0)
        .tmax(tmax)
        .build()
        .expect("valid problem")
}

/// Fleet overflow is the only violation a savings merge may leave behind.
pub fn is_fleet_overflow(kind: &ViolationType) -> bool {
    matches!(kind, ViolationType::FleetExceeded { .. })
}
