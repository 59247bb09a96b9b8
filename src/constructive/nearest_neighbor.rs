//! Round-robin nearest-neighbour construction.
//!
//! Every vehicle gets one route. Routes take turns, one extension per turn,
//! for as many turns as there are customers. On its turn a vehicle moves to
//! the nearest unassigned customer that still fits both its remaining
//! capacity and the `Tmax` budget (including the eventual leg to the depot).
//! A turn without a feasible candidate is skipped.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (one sort per turn).

use log::debug;
use rand::Rng;

use crate::context::RunContext;
use crate::models::{Problem, Route, Solution};
use crate::selection::Selection;

/// Constructs a solution with the nearest-neighbour heuristic.
///
/// `selection` decides how each turn walks the distance-ranked candidates:
/// [`Selection::Greedy`] takes the first feasible one, the randomized
/// policies take the first feasible one in their shuffled order. `rng` is
/// only consumed by the randomized policies.
///
/// Customers that never fit are reported in [`Solution::unassigned`]. Routes
/// of idle vehicles stay in the solution with the bare source-to-depot leg.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Problem;
/// use u_msvrp::constructive::nearest_neighbor;
/// use u_msvrp::selection::{create_rng, Selection};
///
/// let problem = Problem::builder()
///     .source(0.0, 0.0, &[10, 10])
///     .customer(1.0, 0.0, 4)
///     .customer(2.0, 0.0, 4)
///     .customer(3.0, 0.0, 4)
///     .depot(4.0, 0.0)
///     .tmax(100.0)
///     .build()
///     .unwrap();
///
/// let solution = nearest_neighbor(&problem, Selection::Greedy, &mut create_rng(0));
/// assert_eq!(solution.num_served(), 3);
/// assert!((solution.total_cost() - 8.0).abs() < 1e-10);
/// ```
pub fn nearest_neighbor<R: Rng>(problem: &Problem, selection: Selection, rng: &mut R) -> Solution {
    let mut ctx = RunContext::new(problem);
    let depot = problem.depot();

    let mut routes: Vec<Route> = problem
        .vehicles()
        .iter()
        .map(|v| Route::new(v.id(), v.source(), depot))
        .collect();

    for turn in 0..problem.num_customers() {
        let route = &mut routes[turn % problem.num_vehicles()];
        let vehicle = route.vehicle();
        let position = ctx.position(vehicle);

        let mut ranked: Vec<usize> = problem
            .customers()
            .iter()
            .copied()
            .filter(|&c| !ctx.is_assigned(c))
            .collect();
        if ranked.is_empty() {
            break;
        }
        problem
            .distances()
            .sort_by_distance_from(position, &mut ranked);

        let chosen = selection
            .picks(ranked, rng)
            .find(|&c| can_extend(problem, route, position, c));

        if let Some(customer) = chosen {
            route.push(
                customer,
                problem.node(customer).demand(),
                problem.distance(position, customer),
            );
            ctx.assign(customer);
            ctx.move_to(vehicle, customer);
        }
    }

    let mut solution = Solution::new();
    for mut route in routes {
        route.add_cost(problem.distance(ctx.position(route.vehicle()), depot));
        solution.add_route(route);
    }
    for &c in problem.customers() {
        if !ctx.is_assigned(c) {
            solution.add_unassigned(c);
        }
    }
    solution.refresh_total_cost();

    debug!(
        "nearest neighbour ({:?}): served {}/{} customers, cost {:.3}",
        selection,
        solution.num_served(),
        problem.num_customers(),
        solution.total_cost()
    );
    solution
}

/// Capacity and budget check for moving from `position` to `customer`.
fn can_extend(problem: &Problem, route: &Route, position: usize, customer: usize) -> bool {
    let capacity = i64::from(problem.vehicle(route.vehicle()).capacity());
    let load = i64::from(route.quantity()) + i64::from(problem.node(customer).demand());
    if load > capacity {
        return false;
    }
    let cost = route.cost()
        + problem.distance(position, customer)
        + problem.distance(customer, problem.depot());
    problem.within_budget(cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::SolutionEvaluator;
    use crate::selection::create_rng;

    fn colinear(tmax: f64) -> Problem {
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

    fn greedy(problem: &Problem) -> Solution {
        nearest_neighbor(problem, Selection::Greedy, &mut create_rng(0))
    }

    #[test]
    fn test_nn_colinear_two_routes() {
        let p = colinear(100.0);
        let sol = greedy(&p);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_unassigned(), 0);
        // v0: 0 -> 1 -> 3 -> 4 = 1 + 2 + 1, v1: 0 -> 2 -> 4 = 2 + 2
        assert_eq!(sol.routes()[0].customers(), &[1, 3]);
        assert_eq!(sol.routes()[1].customers(), &[2]);
        assert!((sol.routes()[0].cost() - 4.0).abs() < 1e-10);
        assert!((sol.routes()[1].cost() - 4.0).abs() < 1e-10);
        assert!((sol.total_cost() - 8.0).abs() < 1e-10);
        assert_eq!(sol.routes()[0].quantity(), 8);
    }

    #[test]
    fn test_nn_oversized_demand_left_out() {
        let p = Problem::builder()
            .source(0.0, 0.0, &[10, 10])
            .customer(1.0, 0.0, 4)
            .customer(2.0, 0.0, 11)
            .customer(3.0, 0.0, 4)
            .depot(4.0, 0.0)
            .tmax(100.0)
            .build()
            .expect("valid problem");
        let sol = greedy(&p);
        assert_eq!(sol.unassigned(), &[2]);
        assert_eq!(sol.served_customers(), vec![1, 3]);
        for r in sol.routes() {
            assert!(r.quantity() <= 10);
        }
    }

    #[test]
    fn test_nn_zero_budget_only_closing_legs() {
        let p = colinear(0.0);
        let sol = greedy(&p);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.num_unassigned(), 3);
        assert_eq!(sol.num_routes(), 2);
        // two empty routes, each 0 -> 4
        assert!((sol.total_cost() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_nn_budget_limits_route() {
        // Every monotone source-to-depot path on the line costs exactly 4.
        let p = colinear(4.0);
        let sol = greedy(&p);
        assert_eq!(sol.num_unassigned(), 0);
        for r in sol.routes() {
            assert!(r.cost() <= 4.0 + 1e-9);
        }
    }

    #[test]
    fn test_nn_turns_bound_extensions() {
        let p = Problem::builder()
            .source(0.0, 0.0, &[4, 8])
            .customer(1.0, 0.0, 4)
            .customer(2.0, 0.0, 4)
            .customer(3.0, 0.0, 4)
            .depot(4.0, 0.0)
            .build()
            .expect("valid problem");
        let sol = greedy(&p);
        // Third turn belongs to the full vehicle 0, so customer 3 is never reached.
        assert_eq!(sol.routes()[0].customers(), &[1]);
        assert_eq!(sol.routes()[1].customers(), &[2]);
        assert_eq!(sol.unassigned(), &[3]);
    }

    #[test]
    fn test_nn_multi_source_feasible() {
        let p = Problem::builder()
            .source(0.0, 0.0, &[6])
            .source(10.0, 10.0, &[6, 6])
            .customer(1.0, 1.0, 2)
            .customer(2.0, 1.0, 2)
            .customer(9.0, 9.0, 2)
            .customer(8.0, 9.0, 2)
            .customer(5.0, 5.0, 2)
            .depot(5.0, 0.0)
            .tmax(40.0)
            .build()
            .expect("valid problem");
        let sol = greedy(&p);
        assert_eq!(sol.num_routes(), 3);
        assert_eq!(sol.routes()[1].source(), 1);
        let (_, violations) = SolutionEvaluator::new(&p).evaluate(&sol);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_nn_randomized_respects_limits() {
        let p = colinear(7.0);
        for seed in 0..50 {
            for sel in [Selection::BoundedWidth(3), Selection::Biased(0.6)] {
                let sol = nearest_neighbor(&p, sel, &mut create_rng(seed));
                let (cost, violations) = SolutionEvaluator::new(&p).evaluate(&sol);
                assert!(violations.is_empty(), "{violations:?}");
                assert!((cost - sol.total_cost()).abs() < 1e-9);
                assert_eq!(sol.num_served() + sol.num_unassigned(), 3);
            }
        }
    }

    #[test]
    fn test_nn_no_customers() {
        let p = Problem::builder()
            .source(0.0, 0.0, &[5])
            .depot(3.0, 4.0)
            .build()
            .expect("valid problem");
        let sol = greedy(&p);
        assert_eq!(sol.num_routes(), 1);
        assert!((sol.total_cost() - 5.0).abs() < 1e-10);
    }
}
