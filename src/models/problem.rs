//! Problem instance and its validating builder.

use super::{Edge, Node, Vehicle};
use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// Absolute tolerance used for every comparison against `Tmax`, for
/// symmetry checks, and for detecting 2-opt improvements.
pub const COST_TOLERANCE: f64 = 1e-9;

/// A validated multi-source routing instance.
///
/// Built once through [`ProblemBuilder`] and read-only afterwards. Node ids
/// follow insertion order in the builder; vehicle ids follow source
/// declaration order.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Problem;
///
/// let problem = Problem::builder()
///     .source(0.0, 0.0, &[10, 10])
///     .customer(1.0, 0.0, 4)
///     .customer(2.0, 0.0, 4)
///     .depot(3.0, 0.0)
///     .tmax(100.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(problem.num_customers(), 2);
/// assert_eq!(problem.num_vehicles(), 2);
/// assert_eq!(problem.depot(), 3);
/// assert!((problem.distance(0, 3) - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    nodes: Vec<Node>,
    sources: Vec<usize>,
    customers: Vec<usize>,
    depot: usize,
    vehicles: Vec<Vehicle>,
    tmax: f64,
    distances: DistanceMatrix,
    edges: Vec<Edge>,
}

impl Problem {
    /// Starts building a problem.
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder::default()
    }

    /// All nodes, indexed by id.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// Source node ids, in declaration order.
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Customer node ids, ascending.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Depot node id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// All vehicles, indexed by id.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: usize) -> &Vehicle {
        &self.vehicles[id]
    }

    /// Vehicles of the `source_index`-th source.
    pub fn source_vehicles(&self, source_index: usize) -> &[usize] {
        self.nodes[self.sources[source_index]].vehicles()
    }

    /// Maximum cost of a single route.
    pub fn tmax(&self) -> f64 {
        self.tmax
    }

    /// Returns `true` if `cost` respects `Tmax` within [`COST_TOLERANCE`].
    pub fn within_budget(&self, cost: f64) -> bool {
        cost <= self.tmax + COST_TOLERANCE
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel cost from `from` to `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Every ordered customer pair with its per-source savings.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Copy of this problem with new capacities and `Tmax`, keeping the
    /// topology and derived data.
    pub(crate) fn with_limits(&self, capacities: &[i32], tmax: f64) -> Self {
        let mut copy = self.clone();
        for (vehicle, &capacity) in copy.vehicles.iter_mut().zip(capacities) {
            vehicle.set_capacity(capacity);
        }
        copy.tmax = tmax;
        copy
    }
}

/// Collects nodes and limits, then validates them into a [`Problem`].
///
/// Nodes get ids in the order they are added. Validation happens in
/// [`build`](Self::build); nothing is checked earlier.
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    entries: Vec<Entry>,
    tmax: Option<f64>,
    distances: Option<DistanceMatrix>,
    precision: Option<u32>,
}

#[derive(Debug, Clone)]
enum Entry {
    Source { x: f64, y: f64, capacities: Vec<i32> },
    Customer { x: f64, y: f64, demand: i32 },
    Depot { x: f64, y: f64 },
}

impl ProblemBuilder {
    /// Adds a source whose vehicles have the given capacities.
    pub fn source(mut self, x: f64, y: f64, capacities: &[i32]) -> Self {
        self.entries.push(Entry::Source {
            x,
            y,
            capacities: capacities.to_vec(),
        });
        self
    }

    /// Adds a customer.
    pub fn customer(mut self, x: f64, y: f64, demand: i32) -> Self {
        self.entries.push(Entry::Customer { x, y, demand });
        self
    }

    /// Adds the depot.
    pub fn depot(mut self, x: f64, y: f64) -> Self {
        self.entries.push(Entry::Depot { x, y });
        self
    }

    /// Sets the maximum route cost. Defaults to unbounded.
    pub fn tmax(mut self, tmax: f64) -> Self {
        self.tmax = Some(tmax);
        self
    }

    /// Uses an explicit distance matrix instead of Euclidean distances.
    pub fn distances(mut self, distances: DistanceMatrix) -> Self {
        self.distances = Some(distances);
        self
    }

    /// Rounds Euclidean distances to `decimals` places.
    ///
    /// Ignored when an explicit matrix is supplied.
    pub fn precision(mut self, decimals: u32) -> Self {
        self.precision = Some(decimals);
        self
    }

    /// Validates the input and derives the distance matrix and edges.
    pub fn build(self) -> Result<Problem> {
        let mut nodes = Vec::with_capacity(self.entries.len());
        let mut vehicles = Vec::new();
        let mut sources = Vec::new();
        let mut customers = Vec::new();
        let mut depot = None;

        for (id, entry) in self.entries.into_iter().enumerate() {
            match entry {
                Entry::Source { x, y, capacities } => {
                    if capacities.is_empty() {
                        return Err(RoutingError::SourceWithoutVehicles { source: id });
                    }
                    let mut owned = Vec::with_capacity(capacities.len());
                    for capacity in capacities {
                        let vid = vehicles.len();
                        if capacity < 0 {
                            return Err(RoutingError::NegativeCapacity {
                                vehicle: vid,
                                capacity,
                            });
                        }
                        vehicles.push(Vehicle::new(vid, capacity, id));
                        owned.push(vid);
                    }
                    sources.push(id);
                    nodes.push(Node::source(id, x, y, owned));
                }
                Entry::Customer { x, y, demand } => {
                    if demand < 0 {
                        return Err(RoutingError::NegativeDemand { node: id, demand });
                    }
                    customers.push(id);
                    nodes.push(Node::customer(id, x, y, demand));
                }
                Entry::Depot { x, y } => {
                    if depot.is_some() {
                        return Err(RoutingError::DuplicateDepot);
                    }
                    depot = Some(id);
                    nodes.push(Node::depot(id, x, y));
                }
            }
        }

        let depot = depot.ok_or(RoutingError::MissingDepot)?;
        if sources.is_empty() {
            return Err(RoutingError::NoSources);
        }

        let tmax = self.tmax.unwrap_or(f64::INFINITY);
        if tmax.is_nan() || tmax < 0.0 {
            return Err(RoutingError::InvalidTmax(tmax));
        }

        let distances = match self.distances {
            Some(dm) => {
                if dm.size() != nodes.len() {
                    return Err(RoutingError::DistanceMatrixSize {
                        expected: nodes.len(),
                        actual: dm.size(),
                    });
                }
                dm
            }
            None => {
                let dm = DistanceMatrix::from_nodes(&nodes);
                match self.precision {
                    Some(decimals) => dm.rounded(decimals),
                    None => dm,
                }
            }
        };
        validate_distances(&distances)?;

        let edges = build_edges(&customers, &sources, depot, &distances);

        Ok(Problem {
            nodes,
            sources,
            customers,
            depot,
            vehicles,
            tmax,
            distances,
            edges,
        })
    }
}

fn validate_distances(dm: &DistanceMatrix) -> Result<()> {
    let n = dm.size();
    for i in 0..n {
        for j in 0..n {
            let d = dm.get(i, j);
            if !d.is_finite() || d < 0.0 || (i == j && d != 0.0) {
                return Err(RoutingError::InvalidDistance {
                    from: i,
                    to: j,
                    value: d,
                });
            }
        }
    }
    match dm.asymmetric_pair(COST_TOLERANCE) {
        Some((from, to)) => Err(RoutingError::AsymmetricDistance { from, to }),
        None => Ok(()),
    }
}

fn build_edges(
    customers: &[usize],
    sources: &[usize],
    depot: usize,
    dm: &DistanceMatrix,
) -> Vec<Edge> {
    let n = customers.len();
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1));
    for &from in customers {
        for &to in customers {
            if from == to {
                continue;
            }
            let cost = dm.get(from, to);
            let savings = sources
                .iter()
                .map(|&s| dm.get(s, to) + dm.get(from, depot) - cost)
                .collect();
            edges.push(Edge::new(from, to, cost, savings));
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_source_problem() -> Problem {
        Problem::builder()
            .source(0.0, 0.0, &[10])
            .source(10.0, 0.0, &[5, 5])
            .customer(1.0, 1.0, 3)
            .customer(9.0, 1.0, 3)
            .customer(5.0, 5.0, 3)
            .depot(5.0, 0.0)
            .tmax(50.0)
            .build()
            .expect("valid problem")
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let p = two_source_problem();
        assert_eq!(p.sources(), &[0, 1]);
        assert_eq!(p.customers(), &[2, 3, 4]);
        assert_eq!(p.depot(), 5);
        assert_eq!(p.num_vehicles(), 3);
        assert_eq!(p.source_vehicles(0), &[0]);
        assert_eq!(p.source_vehicles(1), &[1, 2]);
        assert_eq!(p.vehicle(2).source(), 1);
    }

    #[test]
    fn test_edges_and_savings() {
        let p = two_source_problem();
        // 3 customers -> 6 ordered pairs
        assert_eq!(p.edges().len(), 6);
        for e in p.edges() {
            assert!(p.node(e.from()).is_customer());
            assert!(p.node(e.to()).is_customer());
            for (k, &s) in p.sources().iter().enumerate() {
                let expected =
                    p.distance(s, e.to()) + p.distance(e.from(), p.depot()) - e.cost();
                assert!((e.saving(k) - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_within_budget_tolerance() {
        let p = two_source_problem();
        assert!(p.within_budget(50.0));
        assert!(p.within_budget(50.0 + 1e-12));
        assert!(!p.within_budget(50.1));
    }

    #[test]
    fn test_default_tmax_unbounded() {
        let p = Problem::builder()
            .source(0.0, 0.0, &[1])
            .depot(1.0, 0.0)
            .build()
            .expect("valid");
        assert!(p.tmax().is_infinite());
        assert_eq!(p.num_customers(), 0);
        assert!(p.edges().is_empty());
    }

    #[test]
    fn test_missing_depot() {
        let err = Problem::builder()
            .source(0.0, 0.0, &[1])
            .customer(1.0, 0.0, 1)
            .build()
            .unwrap_err();
        assert_eq!(err, RoutingError::MissingDepot);
    }

    #[test]
    fn test_duplicate_depot() {
        let err = Problem::builder()
            .source(0.0, 0.0, &[1])
            .depot(1.0, 0.0)
            .depot(2.0, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, RoutingError::DuplicateDepot);
    }

    #[test]
    fn test_no_sources() {
        let err = Problem::builder()
            .customer(1.0, 0.0, 1)
            .depot(2.0, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, RoutingError::NoSources);
    }

    #[test]
    fn test_source_without_vehicles() {
        let err = Problem::builder()
            .source(0.0, 0.0, &[])
            .depot(2.0, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, RoutingError::SourceWithoutVehicles { source: 0 });
    }

    #[test]
    fn test_negative_capacity_and_demand() {
        let err = Problem::builder()
            .source(0.0, 0.0, &[5, -1])
            .depot(2.0, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RoutingError::NegativeCapacity {
                vehicle: 1,
                capacity: -1
            }
        );

        let err = Problem::builder()
            .source(0.0, 0.0, &[5])
            .customer(1.0, 0.0, -2)
            .depot(2.0, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, RoutingError::NegativeDemand { node: 1, demand: -2 });
    }

    #[test]
    fn test_invalid_tmax() {
        let err = Problem::builder()
            .source(0.0, 0.0, &[5])
            .depot(2.0, 0.0)
            .tmax(-1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, RoutingError::InvalidTmax(-1.0));
    }

    #[test]
    fn test_explicit_matrix_checks() {
        let base = || {
            Problem::builder()
                .source(0.0, 0.0, &[5])
                .customer(0.0, 0.0, 1)
                .depot(0.0, 0.0)
        };

        let wrong_size = DistanceMatrix::new(2);
        assert_eq!(
            base().distances(wrong_size).build().unwrap_err(),
            RoutingError::DistanceMatrixSize {
                expected: 3,
                actual: 2
            }
        );

        let mut negative = DistanceMatrix::new(3);
        negative.set(0, 1, -1.0);
        assert!(matches!(
            base().distances(negative).build(),
            Err(RoutingError::InvalidDistance { from: 0, to: 1, .. })
        ));

        let mut asymmetric = DistanceMatrix::new(3);
        asymmetric.set(0, 1, 1.0);
        asymmetric.set(1, 0, 2.0);
        assert_eq!(
            base().distances(asymmetric).build().unwrap_err(),
            RoutingError::AsymmetricDistance { from: 0, to: 1 }
        );

        let mut later_pair = DistanceMatrix::new(3);
        later_pair.set(1, 2, 1.0);
        later_pair.set(2, 1, 1.5);
        later_pair.set(2, 0, 3.0);
        later_pair.set(0, 2, 3.0 + 1e-12);
        assert_eq!(
            base().distances(later_pair).build().unwrap_err(),
            RoutingError::AsymmetricDistance { from: 1, to: 2 }
        );

        let mut diagonal = DistanceMatrix::new(3);
        diagonal.set(2, 2, 1.0);
        assert!(matches!(
            base().distances(diagonal).build(),
            Err(RoutingError::InvalidDistance { from: 2, to: 2, .. })
        ));
    }

    #[test]
    fn test_precision_rounds_distances() {
        let p = Problem::builder()
            .source(0.0, 0.0, &[5])
            .depot(1.0, 1.0)
            .precision(3)
            .build()
            .expect("valid");
        assert_eq!(p.distance(0, 1), 1.414);
    }

    #[test]
    fn test_with_limits() {
        let p = two_source_problem();
        let q = p.with_limits(&[1, 2, 3], 7.0);
        assert_eq!(q.vehicle(0).capacity(), 1);
        assert_eq!(q.vehicle(2).capacity(), 3);
        assert_eq!(q.tmax(), 7.0);
        assert_eq!(p.vehicle(0).capacity(), 10);
    }
}
