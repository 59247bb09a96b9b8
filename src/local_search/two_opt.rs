//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! The route is viewed as its full path `[source, c1, ..., cn, depot]`. For
//! each pair of edges (p[i], p[i+1]) and (p[j], p[j+1]) with `j >= i + 2`,
//! compute the change in cost from reversing the segment between them:
//!
//! ```text
//! delta = d(p[i], p[j]) + d(p[i+1], p[j+1]) - d(p[i], p[i+1]) - d(p[j], p[j+1])
//! ```
//!
//! If delta is negative, reverse the segment [i+1..=j] and restart the scan
//! (first-improvement with restart). The source and depot never move.
//! Distances are symmetric, so the reversed segment keeps its internal cost.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::time::{Duration, Instant};

use log::debug;

use crate::models::{Problem, Route, Solution, COST_TOLERANCE};

/// Result of a 2-opt run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptOutcome {
    /// Cost after improvement (summed over routes for [`two_opt_all`]).
    pub cost: f64,
    /// Number of reversals applied.
    pub moves: usize,
    /// Whether the time budget cut the scan short.
    pub timed_out: bool,
}

/// Improves a single route in place with 2-opt.
///
/// `budget` bounds the wall-clock time of the scan. It is checked between
/// candidate evaluations; on expiry the route keeps every reversal applied
/// so far, so it is never worse than the input. Running out of time is not
/// an error.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::{Problem, Route};
/// use u_msvrp::local_search::two_opt;
///
/// let problem = Problem::builder()
///     .source(0.0, 0.0, &[10])
///     .customer(1.0, 0.0, 1)
///     .customer(2.0, 0.0, 1)
///     .customer(3.0, 0.0, 1)
///     .depot(4.0, 0.0)
///     .build()
///     .unwrap();
///
/// // 0 -> 3 -> 1 -> 2 -> 4 zig-zags along the line.
/// let mut route = Route::new(0, 0, 4);
/// route.push(3, 1, 3.0);
/// route.push(1, 1, 2.0);
/// route.push(2, 1, 1.0);
/// route.add_cost(2.0);
///
/// let outcome = two_opt(&problem, &mut route, None);
/// assert_eq!(route.customers(), &[1, 2, 3]);
/// assert!((outcome.cost - 4.0).abs() < 1e-10);
/// ```
pub fn two_opt(problem: &Problem, route: &mut Route, budget: Option<Duration>) -> TwoOptOutcome {
    let start = Instant::now();
    let mut path: Vec<usize> = route.path().collect();
    let mut cost = route.cost();
    let mut moves = 0;
    let mut timed_out = false;
    let m = path.len();

    'restart: loop {
        for i in 0..m.saturating_sub(3) {
            for j in (i + 2)..(m - 1) {
                let delta = reversal_delta(problem, &path, i, j);
                if delta < -COST_TOLERANCE {
                    path[i + 1..=j].reverse();
                    cost += delta;
                    moves += 1;
                    continue 'restart;
                }
                if budget.is_some_and(|b| start.elapsed() >= b) {
                    timed_out = true;
                    break 'restart;
                }
            }
        }
        break;
    }

    if moves > 0 {
        let customers = route.customers_mut();
        customers.clear();
        customers.extend_from_slice(&path[1..m - 1]);
        route.set_cost(cost);
    }
    TwoOptOutcome {
        cost: route.cost(),
        moves,
        timed_out,
    }
}

/// Applies [`two_opt`] to every route of a solution independently.
///
/// Customers never move between routes. The budget applies to each route
/// separately. The solution total is refreshed afterwards.
pub fn two_opt_all(
    problem: &Problem,
    solution: &mut Solution,
    budget: Option<Duration>,
) -> TwoOptOutcome {
    let before = solution.total_cost();
    let mut total = TwoOptOutcome {
        cost: 0.0,
        moves: 0,
        timed_out: false,
    };
    for route in solution.routes_mut().iter_mut() {
        let outcome = two_opt(problem, route, budget);
        total.cost += outcome.cost;
        total.moves += outcome.moves;
        total.timed_out |= outcome.timed_out;
    }
    solution.refresh_total_cost();

    debug!(
        "2-opt: {} moves, cost {:.3} -> {:.3}{}",
        total.moves,
        before,
        solution.total_cost(),
        if total.timed_out { " (time budget hit)" } else { "" }
    );
    total
}

/// Cost change from reversing `path[i+1..=j]`.
fn reversal_delta(problem: &Problem, path: &[usize], i: usize, j: usize) -> f64 {
    let (a, b) = (path[i], path[i + 1]);
    let (c, d) = (path[j], path[j + 1]);
    problem.distance(a, c) + problem.distance(b, d)
        - problem.distance(a, b)
        - problem.distance(c, d)
}
