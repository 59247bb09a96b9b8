//! Marginal-cost assignment of customers to vehicles.
//!
//! # Algorithm
//!
//! For vehicle `v` (starting at source `s(v)`) and customer `c`, the round
//! trip is `rt(v, c) = d(s(v), c) + d(c, depot)`. The marginal cost compares
//! it with the best alternative:
//!
//! ```text
//! m(v, c) = rt(v, c) - min_{v' != v} rt(v', c)
//! ```
//!
//! A negative marginal cost means `v` is the cheapest way to serve `c`; a
//! large positive one means some other vehicle (usually of another source)
//! serves it much better. Vehicles then claim customers round-robin, each
//! taking the next unclaimed customer from its own list sorted by `m`.
//!
//! Capacity and `Tmax` are left to the merge phase.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::models::Problem;
use crate::selection::Selection;

/// Customer-to-vehicle assignment produced by [`map_customers`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    vehicle_of: Vec<Option<usize>>,
    customers_of: Vec<Vec<usize>>,
}

impl Mapping {
    fn new(num_nodes: usize, num_vehicles: usize) -> Self {
        Self {
            vehicle_of: vec![None; num_nodes],
            customers_of: vec![Vec::new(); num_vehicles],
        }
    }

    fn assign(&mut self, customer: usize, vehicle: usize) {
        self.vehicle_of[customer] = Some(vehicle);
        self.customers_of[vehicle].push(customer);
    }

    /// Vehicle a customer was mapped to.
    pub fn vehicle_of(&self, customer: usize) -> Option<usize> {
        self.vehicle_of.get(customer).copied().flatten()
    }

    /// Customers mapped to a vehicle, in claim order.
    pub fn customers_of(&self, vehicle: usize) -> &[usize] {
        &self.customers_of[vehicle]
    }

    /// Number of mapped customers.
    pub fn num_mapped(&self) -> usize {
        self.customers_of.iter().map(Vec::len).sum()
    }
}

/// Maps every customer to a vehicle by marginal round-trip cost.
///
/// With [`Selection::Greedy`] each vehicle walks its list in ascending
/// marginal-cost order; a randomized selection shuffles each list (biased
/// toward the front) before the claims start.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Problem;
/// use u_msvrp::constructive::map_customers;
/// use u_msvrp::selection::{create_rng, Selection};
///
/// let problem = Problem::builder()
///     .source(0.0, 0.0, &[10])
///     .source(10.0, 0.0, &[10])
///     .customer(1.0, 1.0, 1)
///     .customer(9.0, 1.0, 1)
///     .depot(5.0, 0.0)
///     .build()
///     .unwrap();
///
/// let mapping = map_customers(&problem, Selection::Greedy, &mut create_rng(0));
/// assert_eq!(mapping.vehicle_of(2), Some(0));
/// assert_eq!(mapping.vehicle_of(3), Some(1));
/// ```
pub fn map_customers<R: Rng>(problem: &Problem, selection: Selection, rng: &mut R) -> Mapping {
    let customers = problem.customers();
    let num_vehicles = problem.num_vehicles();
    let mut mapping = Mapping::new(problem.nodes().len(), num_vehicles);
    if customers.is_empty() {
        return mapping;
    }

    let marginal = marginal_costs(problem);
    let preferences: Vec<Vec<usize>> = marginal
        .iter()
        .map(|row| {
            let mut order: Vec<usize> = (0..customers.len()).collect();
            order.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
            let ranked: Vec<usize> = order.into_iter().map(|k| customers[k]).collect();
            selection.picks(ranked, rng).collect()
        })
        .collect();

    let mut ctx = RunContext::new(problem);
    let mut cursor = vec![0usize; num_vehicles];
    for turn in 0..customers.len() {
        let vehicle = turn % num_vehicles;
        let list = &preferences[vehicle];
        while cursor[vehicle] < list.len() && ctx.is_assigned(list[cursor[vehicle]]) {
            cursor[vehicle] += 1;
        }
        if let Some(&customer) = list.get(cursor[vehicle]) {
            ctx.assign(customer);
            mapping.assign(customer, vehicle);
            cursor[vehicle] += 1;
        }
    }
    mapping
}

/// `m[v][k]` for vehicle `v` and the `k`-th customer.
fn marginal_costs(problem: &Problem) -> Vec<Vec<f64>> {
    let depot = problem.depot();
    let round_trip: Vec<Vec<f64>> = problem
        .vehicles()
        .iter()
        .map(|v| {
            problem
                .customers()
                .iter()
                .map(|&c| problem.distance(v.source(), c) + problem.distance(c, depot))
                .collect()
        })
        .collect();

    let num_vehicles = round_trip.len();
    let mut marginal = round_trip.clone();
    for k in 0..problem.num_customers() {
        // Best and runner-up over all vehicles give the "best other" in O(V).
        let mut best = (f64::INFINITY, usize::MAX);
        let mut second = f64::INFINITY;
        for (v, row) in round_trip.iter().enumerate() {
            if row[k] < best.0 {
                second = best.0;
                best = (row[k], v);
            } else if row[k] < second {
                second = row[k];
            }
        }
        for v in 0..num_vehicles {
            let other = if v == best.1 { second } else { best.0 };
            // A lone vehicle has no alternative; keep its raw round trip.
            let other = if other.is_finite() { other } else { 0.0 };
            marginal[v][k] = round_trip[v][k] - other;
        }
    }
    marginal
}
