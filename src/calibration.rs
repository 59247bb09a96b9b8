//! Tight benchmark instances from unconstrained topologies.
//!
//! The topology is solved once with every limit lifted. The routes found
//! then define the limits: each vehicle's capacity becomes the largest load
//! it carried and `Tmax` becomes the longest route, so the calibrating
//! solution is feasible and leaves no slack.

use log::info;

use crate::constructive::savings;
use crate::models::Problem;
use crate::selection::{create_rng, Selection};

/// Derives capacities and `Tmax` from a greedy savings solution of the
/// relaxed problem.
///
/// `Tmax` is rounded up to two decimals. A vehicle that served nobody gets
/// capacity 0.
///
/// # Examples
///
/// ```
/// use u_msvrp::calibration::calibrate;
/// use u_msvrp::models::Problem;
///
/// let topology = Problem::builder()
///     .source(0.0, 0.0, &[0])
///     .customer(1.0, 0.0, 3)
///     .customer(2.0, 0.0, 5)
///     .depot(4.0, 0.0)
///     .tmax(0.0)
///     .build()
///     .unwrap();
///
/// let tight = calibrate(&topology);
/// assert_eq!(tight.vehicle(0).capacity(), 8);
/// assert!((tight.tmax() - 4.0).abs() < 1e-10);
/// ```
pub fn calibrate(problem: &Problem) -> Problem {
    let total_demand: i64 = problem
        .customers()
        .iter()
        .map(|&c| i64::from(problem.node(c).demand()))
        .sum();
    let unbounded = i32::try_from(total_demand).unwrap_or(i32::MAX);
    let relaxed = problem.with_limits(&vec![unbounded; problem.num_vehicles()], f64::INFINITY);

    let (_, solution) = savings(&relaxed, Selection::Greedy, Selection::Greedy, &mut create_rng(0));

    let mut capacities = vec![0i32; problem.num_vehicles()];
    let mut longest = 0.0f64;
    for route in solution.routes() {
        let slot = &mut capacities[route.vehicle()];
        *slot = (*slot).max(route.quantity());
        longest = longest.max(route.cost());
    }
    let tmax = (longest * 100.0).ceil() / 100.0;

    info!(
        "calibrated {} vehicles: capacities {:?}, tmax {:.2}",
        problem.num_vehicles(),
        capacities,
        tmax
    );
    problem.with_limits(&capacities, tmax)
}
