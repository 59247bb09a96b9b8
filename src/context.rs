//! Per-run mutable state, keyed by node id and vehicle id.
//!
//! Heuristics never mutate the [`Problem`]. Everything a run needs to flip
//! (assignment flags, route back-references, link flags, vehicle positions,
//! open-copy counters) lives here and is rebuilt from scratch for every call,
//! so runs compose and multistart trials cannot leak state into each other.

use crate::models::Problem;

#[derive(Debug, Clone)]
pub(crate) struct RunContext {
    assigned: Vec<bool>,
    route_of: Vec<Option<usize>>,
    left_open: Vec<bool>,
    right_open: Vec<bool>,
    position: Vec<usize>,
    open_copies: Vec<usize>,
}

impl RunContext {
    /// Fresh state: nothing assigned, every link open, every vehicle at its source.
    pub(crate) fn new(problem: &Problem) -> Self {
        let n = problem.nodes().len();
        Self {
            assigned: vec![false; n],
            route_of: vec![None; n],
            left_open: vec![true; n],
            right_open: vec![true; n],
            position: problem.vehicles().iter().map(|v| v.source()).collect(),
            open_copies: vec![0; problem.num_vehicles()],
        }
    }

    pub(crate) fn is_assigned(&self, node: usize) -> bool {
        self.assigned[node]
    }

    pub(crate) fn assign(&mut self, node: usize) {
        self.assigned[node] = true;
    }

    /// Current node of a vehicle during nearest-neighbour construction.
    pub(crate) fn position(&self, vehicle: usize) -> usize {
        self.position[vehicle]
    }

    pub(crate) fn move_to(&mut self, vehicle: usize, node: usize) {
        self.position[vehicle] = node;
    }

    /// Arena index of the merge route currently holding `node`.
    pub(crate) fn route_of(&self, node: usize) -> Option<usize> {
        self.route_of[node]
    }

    pub(crate) fn set_route(&mut self, node: usize, route: usize) {
        self.route_of[node] = Some(route);
    }

    pub(crate) fn is_left_open(&self, node: usize) -> bool {
        self.left_open[node]
    }

    pub(crate) fn is_right_open(&self, node: usize) -> bool {
        self.right_open[node]
    }

    pub(crate) fn close_left(&mut self, node: usize) {
        self.left_open[node] = false;
    }

    pub(crate) fn close_right(&mut self, node: usize) {
        self.right_open[node] = false;
    }

    /// Number of separate routes a vehicle still runs during merging.
    pub(crate) fn open_copies(&self, vehicle: usize) -> usize {
        self.open_copies[vehicle]
    }

    pub(crate) fn add_copy(&mut self, vehicle: usize) {
        self.open_copies[vehicle] += 1;
    }

    pub(crate) fn remove_copy(&mut self, vehicle: usize) {
        self.open_copies[vehicle] = self.open_copies[vehicle].saturating_sub(1);
    }
}
