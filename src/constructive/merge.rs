//! Parallel savings merge over a customer mapping.
//!
//! # Algorithm
//!
//! Runs independently for every source. Each customer mapped to one of the
//! source's vehicles starts on a singleton route `source → c → depot`. Edges
//! whose endpoints both belong to the source are walked in decreasing order
//! of that source's saving:
//!
//! ```text
//! s(i, j) = d(source, j) + d(i, depot) - d(i, j)
//! ```
//!
//! Edge `i → j` joins the route ending at `i` with the route starting at
//! `j` when:
//!
//! 1. `i` and `j` are on different routes
//! 2. `j`'s vehicle keeps at least one other route afterwards
//! 3. `i` is still open on the right and `j` on the left
//! 4. the combined quantity fits `i`'s vehicle
//! 5. the combined cost stays within `Tmax`
//!
//! Merging stops once the source runs no more routes than it has vehicles.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting edges).

use log::{debug, trace};
use rand::Rng;

use super::mapper::{map_customers, Mapping};
use crate::context::RunContext;
use crate::models::{Edge, Problem, Route, Solution};
use crate::selection::Selection;

/// Fuses mapped customers into routes along high-saving edges.
///
/// `selection` decides the order in which each source walks its
/// savings-ranked edges. Customers that cannot be served even alone (demand
/// above capacity or round trip above `Tmax`) are reported as unassigned.
///
/// The returned solution lists routes vehicle by vehicle. A vehicle without
/// customers runs an empty route; a vehicle whose singletons could not all be
/// merged runs several routes, which
/// [`SolutionEvaluator`](crate::evaluation::SolutionEvaluator) reports as
/// [`FleetExceeded`](crate::models::ViolationType::FleetExceeded).
pub fn merge_routes<R: Rng>(
    problem: &Problem,
    mapping: &Mapping,
    selection: Selection,
    rng: &mut R,
) -> Solution {
    let mut ctx = RunContext::new(problem);
    let mut arena: Vec<Option<Route>> = Vec::with_capacity(problem.num_customers());

    for (k, &source) in problem.sources().iter().enumerate() {
        let fleet = problem.source_vehicles(k);
        let mut in_source = vec![false; problem.nodes().len()];
        let mut active = 0usize;

        for &v in fleet {
            for &c in mapping.customers_of(v) {
                if let Some(route) = singleton(problem, v, source, c) {
                    ctx.set_route(c, arena.len());
                    ctx.add_copy(v);
                    arena.push(Some(route));
                    in_source[c] = true;
                    active += 1;
                }
            }
        }

        let mut candidates: Vec<&Edge> = problem
            .edges()
            .iter()
            .filter(|e| in_source[e.from()] && in_source[e.to()])
            .collect();
        candidates.sort_by(|a, b| {
            b.saving(k)
                .total_cmp(&a.saving(k))
                .then_with(|| (a.from(), a.to()).cmp(&(b.from(), b.to())))
        });

        for edge in selection.picks(candidates, rng) {
            if active <= fleet.len() {
                break;
            }
            if try_merge(problem, &mut ctx, &mut arena, edge) {
                active -= 1;
            }
        }
    }

    let routes: Vec<Route> = arena.into_iter().flatten().collect();
    let mut solution = Solution::new();
    for vehicle in problem.vehicles() {
        let mut owned = routes.iter().filter(|r| r.vehicle() == vehicle.id()).peekable();
        if owned.peek().is_none() {
            let mut empty = Route::new(vehicle.id(), vehicle.source(), problem.depot());
            empty.add_cost(problem.distance(vehicle.source(), problem.depot()));
            solution.add_route(empty);
        } else {
            for route in owned {
                solution.add_route(route.clone());
            }
        }
    }
    for &c in problem.customers() {
        if ctx.route_of(c).is_none() {
            solution.add_unassigned(c);
        }
    }
    solution.refresh_total_cost();

    debug!(
        "savings merge ({:?}): {} routes, served {}/{} customers, cost {:.3}",
        selection,
        solution.num_routes(),
        solution.num_served(),
        problem.num_customers(),
        solution.total_cost()
    );
    solution
}

/// Maps customers and merges the mapped singletons in one call.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Problem;
/// use u_msvrp::constructive::savings;
/// use u_msvrp::selection::{create_rng, Selection};
///
/// let problem = Problem::builder()
///     .source(0.0, 0.0, &[10])
///     .customer(1.0, 0.0, 3)
///     .customer(2.0, 0.0, 3)
///     .customer(3.0, 0.0, 3)
///     .depot(4.0, 0.0)
///     .build()
///     .unwrap();
///
/// let mut rng = create_rng(0);
/// let (_, solution) = savings(&problem, Selection::Greedy, Selection::Greedy, &mut rng);
/// assert_eq!(solution.num_routes(), 1);
/// assert!((solution.total_cost() - 4.0).abs() < 1e-10);
/// ```
pub fn savings<R: Rng>(
    problem: &Problem,
    mapper: Selection,
    merge: Selection,
    rng: &mut R,
) -> (Mapping, Solution) {
    let mapping = map_customers(problem, mapper, rng);
    let solution = merge_routes(problem, &mapping, merge, rng);
    (mapping, solution)
}

/// `source → customer → depot`, or `None` when even that breaks a limit.
fn singleton(problem: &Problem, vehicle: usize, source: usize, customer: usize) -> Option<Route> {
    let demand = problem.node(customer).demand();
    if demand > problem.vehicle(vehicle).capacity() {
        return None;
    }
    let outbound = problem.distance(source, customer);
    let inbound = problem.distance(customer, problem.depot());
    if !problem.within_budget(outbound + inbound) {
        return None;
    }
    let mut route = Route::new(vehicle, source, problem.depot());
    route.push(customer, demand, outbound);
    route.add_cost(inbound);
    Some(route)
}

/// Applies edge `i → j` if every merge condition holds.
fn try_merge(
    problem: &Problem,
    ctx: &mut RunContext,
    arena: &mut [Option<Route>],
    edge: &Edge,
) -> bool {
    let (i, j) = (edge.from(), edge.to());
    let (Some(ri), Some(rj)) = (ctx.route_of(i), ctx.route_of(j)) else {
        return false;
    };
    if ri == rj || !ctx.is_right_open(i) || !ctx.is_left_open(j) {
        return false;
    }
    let (Some(left), Some(right)) = (&arena[ri], &arena[rj]) else {
        return false;
    };
    let vj = right.vehicle();
    if ctx.open_copies(vj) <= 1 {
        return false;
    }

    let capacity = i64::from(problem.vehicle(left.vehicle()).capacity());
    if i64::from(left.quantity()) + i64::from(right.quantity()) > capacity {
        return false;
    }
    let cost = left.cost() + right.cost() + edge.cost()
        - problem.distance(i, problem.depot())
        - problem.distance(right.source(), j);
    if !problem.within_budget(cost) {
        return false;
    }

    let Some(absorbed) = arena[rj].take() else {
        return false;
    };
    for &c in absorbed.customers() {
        ctx.set_route(c, ri);
    }
    if let Some(survivor) = arena[ri].as_mut() {
        survivor.absorb(absorbed);
        survivor.set_cost(cost);
    }
    ctx.close_right(i);
    ctx.close_left(j);
    ctx.remove_copy(vj);
    trace!("merged {i} -> {j} into route {ri}, cost {cost:.3}");
    true
}
