//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load carried.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Route cost exceeds `Tmax`.
    MaxCostExceeded {
        /// Route index.
        route_index: usize,
        /// Recomputed route cost.
        cost: f64,
        /// The problem's `Tmax`.
        tmax: f64,
    },
    /// A customer appears more than once across the solution.
    DuplicateCustomer {
        /// Customer node id.
        customer_id: usize,
    },
    /// A route visits a source, the depot, or an unknown id.
    NotACustomer {
        /// Route index.
        route_index: usize,
        /// Offending node id.
        node_id: usize,
    },
    /// Stored route cost drifted from the recomputed path cost.
    CostMismatch {
        /// Route index.
        route_index: usize,
        /// Cost stored on the route.
        stored: f64,
        /// Cost recomputed from the distance matrix.
        actual: f64,
    },
    /// A vehicle runs more than one route.
    FleetExceeded {
        /// Vehicle id.
        vehicle: usize,
        /// Number of routes assigned to it.
        routes: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Routes produced by a heuristic, plus the customers it left out.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// let mut r = Route::new(0, 0, 3);
/// r.push(1, 5, 2.0);
/// r.add_cost(2.0);
/// sol.add_route(r);
/// sol.add_unassigned(2);
/// sol.refresh_total_cost();
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_served(), 1);
/// assert_eq!(sol.unassigned(), &[2]);
/// assert!((sol.total_cost() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
    total_cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unassigned: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a customer as unassigned.
    pub fn add_unassigned(&mut self, customer_id: usize) {
        self.unassigned.push(customer_id);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns a mutable reference to the routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Returns the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the ids of customers no route visits.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Returns the number of unassigned customers.
    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Returns the total cost of this solution.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the total cost to the sum of the route costs.
    pub fn refresh_total_cost(&mut self) {
        self.total_cost = self.routes.iter().map(Route::cost).sum();
    }

    /// Total number of customers served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// All visited customers, sorted.
    pub fn served_customers(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .routes
            .iter()
            .flat_map(|r| r.customers().iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}
