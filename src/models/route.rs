//! Route type.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// One vehicle's path from its source, through customers, to the depot.
///
/// `cost` covers the whole path, including the leg out of the source and
/// the leg into the depot. Constructors accumulate it incrementally.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Route;
///
/// let mut route = Route::new(0, 5, 9);
/// route.push(2, 4, 3.0);
/// route.push(3, 4, 1.0);
/// route.add_cost(2.5);
/// assert_eq!(route.customers(), &[2, 3]);
/// assert_eq!(route.quantity(), 8);
/// assert!((route.cost() - 6.5).abs() < 1e-10);
/// assert_eq!(route.path().collect::<Vec<_>>(), vec![5, 2, 3, 9]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle: usize,
    source: usize,
    depot: usize,
    customers: Vec<usize>,
    quantity: i32,
    cost: f64,
}

impl Route {
    /// Creates an empty route with zero cost.
    pub fn new(vehicle: usize, source: usize, depot: usize) -> Self {
        Self {
            vehicle,
            source,
            depot,
            customers: Vec::new(),
            quantity: 0,
            cost: 0.0,
        }
    }

    /// Appends a customer, adding its demand and the leg used to reach it.
    pub fn push(&mut self, customer: usize, demand: i32, leg: f64) {
        self.customers.push(customer);
        self.quantity += demand;
        self.cost += leg;
    }

    /// Adds a cost term without visiting a customer (e.g. the closing leg).
    pub fn add_cost(&mut self, delta: f64) {
        self.cost += delta;
    }

    /// Appends the customers of `other` and merges its quantity.
    ///
    /// The caller sets the combined cost, since the junction changes it.
    pub(crate) fn absorb(&mut self, other: Route) {
        self.customers.extend(other.customers);
        self.quantity += other.quantity;
    }

    /// Vehicle running this route.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Source node id.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Depot node id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Customers in visit order (source and depot excluded).
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    pub(crate) fn customers_mut(&mut self) -> &mut Vec<usize> {
        &mut self.customers
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if the route visits no customer.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Total delivered quantity.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Total cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }

    /// Full node sequence: source, customers, depot.
    pub fn path(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.source)
            .chain(self.customers.iter().copied())
            .chain(std::iter::once(self.depot))
    }

    /// Recomputes the cost of the full path from scratch.
    pub fn path_cost(&self, distances: &DistanceMatrix) -> f64 {
        let mut cost = 0.0;
        let mut prev = self.source;
        for node in self.customers.iter().copied().chain(std::iter::once(self.depot)) {
            cost += distances.get(prev, node);
            prev = node;
        }
        cost
    }
}
