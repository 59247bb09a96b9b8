//! Solution evaluator that recomputes costs and checks feasibility.

use crate::models::{Problem, Route, Solution, Violation, ViolationType, COST_TOLERANCE};

/// Recomputes route costs from the distance matrix and checks every
/// constraint a heuristic is supposed to honour.
///
/// Heuristics keep costs incrementally; the evaluator is the independent
/// check that they did so correctly.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Problem;
/// use u_msvrp::evaluation::SolutionEvaluator;
///
/// let problem = Problem::builder()
///     .source(0.0, 0.0, &[10])
///     .customer(3.0, 4.0, 4)
///     .customer(6.0, 8.0, 4)
///     .depot(6.0, 0.0)
///     .tmax(30.0)
///     .build()
///     .unwrap();
///
/// let evaluator = SolutionEvaluator::new(&problem);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.quantity(), 8);
/// assert!((route.cost() - 18.0).abs() < 1e-10);
/// assert!(violations.is_empty());
/// ```
pub struct SolutionEvaluator<'a> {
    problem: &'a Problem,
}

impl<'a> SolutionEvaluator<'a> {
    /// Creates an evaluator for the given problem.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Builds the route a vehicle runs over `customers`, with cost and load,
    /// and checks it on its own.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle` is not a vehicle id of the problem.
    pub fn build_route(&self, vehicle: usize, customers: &[usize]) -> (Route, Vec<Violation>) {
        let v = self.problem.vehicle(vehicle);
        let depot = self.problem.depot();
        let mut route = Route::new(vehicle, v.source(), depot);
        let mut violations = Vec::new();
        let mut prev = v.source();

        for &c in customers {
            if !self.is_customer(c) {
                violations.push(Violation::new(ViolationType::NotACustomer {
                    route_index: 0,
                    node_id: c,
                }));
                continue;
            }
            route.push(c, self.problem.node(c).demand(), self.problem.distance(prev, c));
            prev = c;
        }
        route.add_cost(self.problem.distance(prev, depot));

        self.check_limits(0, &route, route.cost(), &mut violations);
        (route, violations)
    }

    /// Evaluates a whole solution.
    ///
    /// Returns the recomputed total cost and every violation found:
    /// capacity, `Tmax` (non-empty routes only), duplicated customers,
    /// non-customer stops, stored costs that drifted from the path cost, and
    /// vehicles running more than one route. Non-customer stops are left out
    /// of the recomputed cost.
    pub fn evaluate(&self, solution: &Solution) -> (f64, Vec<Violation>) {
        let mut total_cost = 0.0;
        let mut violations = Vec::new();
        let mut seen = vec![false; self.problem.nodes().len()];
        let mut routes_per_vehicle = vec![0usize; self.problem.num_vehicles()];

        for (idx, route) in solution.routes().iter().enumerate() {
            if let Some(count) = routes_per_vehicle.get_mut(route.vehicle()) {
                *count += 1;
            }

            let mut cost = 0.0;
            let mut prev = route.source();
            for &c in route.customers() {
                if !self.is_customer(c) {
                    violations.push(Violation::new(ViolationType::NotACustomer {
                        route_index: idx,
                        node_id: c,
                    }));
                    continue;
                }
                if seen[c] {
                    violations.push(Violation::new(ViolationType::DuplicateCustomer {
                        customer_id: c,
                    }));
                }
                seen[c] = true;
                cost += self.problem.distance(prev, c);
                prev = c;
            }
            cost += self.problem.distance(prev, route.depot());

            let drift = (route.cost() - cost).abs();
            if drift > COST_TOLERANCE * cost.abs().max(1.0) {
                violations.push(Violation::new(ViolationType::CostMismatch {
                    route_index: idx,
                    stored: route.cost(),
                    actual: cost,
                }));
            }

            self.check_limits(idx, route, cost, &mut violations);
            total_cost += cost;
        }

        for (vehicle, &routes) in routes_per_vehicle.iter().enumerate() {
            if routes > 1 {
                violations.push(Violation::new(ViolationType::FleetExceeded { vehicle, routes }));
            }
        }

        (total_cost, violations)
    }

    /// Returns `true` when [`evaluate`](Self::evaluate) finds no violation.
    pub fn is_feasible(&self, solution: &Solution) -> bool {
        self.evaluate(solution).1.is_empty()
    }

    fn is_customer(&self, node: usize) -> bool {
        node < self.problem.nodes().len() && self.problem.node(node).is_customer()
    }

    fn check_limits(&self, idx: usize, route: &Route, cost: f64, violations: &mut Vec<Violation>) {
        if let Some(vehicle) = self.problem.vehicles().get(route.vehicle()) {
            if i64::from(route.quantity()) > i64::from(vehicle.capacity()) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    load: route.quantity(),
                    capacity: vehicle.capacity(),
                }));
            }
        }
        if !route.is_empty() && !self.problem.within_budget(cost) {
            violations.push(Violation::new(ViolationType::MaxCostExceeded {
                route_index: idx,
                cost,
                tmax: self.problem.tmax(),
            }));
        }
    }
}
