//! Node types: customers, sources, and the depot.

use serde::{Deserialize, Serialize};

/// Role of a node in the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A demand-bearing node to visit.
    Customer,
    /// A starting point owning an ordered fleet.
    Source {
        /// Ids of the vehicles starting here, in declaration order.
        vehicles: Vec<usize>,
    },
    /// The shared terminal every route ends at.
    Depot,
}

/// A location in a multi-source routing problem.
///
/// Ids are dense: a node's id is its index in
/// [`Problem::nodes`](super::Problem::nodes).
///
/// # Examples
///
/// ```
/// use u_msvrp::models::{Node, NodeKind};
///
/// let c = Node::customer(1, 3.0, 4.0, 10);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10);
/// assert!(c.is_customer());
///
/// let s = Node::source(0, 0.0, 0.0, vec![0, 1]);
/// assert_eq!(s.vehicles(), &[0, 1]);
/// assert_eq!(s.kind(), &NodeKind::Source { vehicles: vec![0, 1] });
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
    kind: NodeKind,
}

impl Node {
    /// Creates a customer with the given demand.
    pub fn customer(id: usize, x: f64, y: f64, demand: i32) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            kind: NodeKind::Customer,
        }
    }

    /// Creates a source owning the given vehicle ids (demand 0).
    pub fn source(id: usize, x: f64, y: f64, vehicles: Vec<usize>) -> Self {
        Self {
            id,
            x,
            y,
            demand: 0,
            kind: NodeKind::Source { vehicles },
        }
    }

    /// Creates the depot (demand 0).
    pub fn depot(id: usize, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            demand: 0,
            kind: NodeKind::Depot,
        }
    }

    /// Dense node id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Quantity delivered at this node.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Role of this node.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_customer(&self) -> bool {
        matches!(self.kind, NodeKind::Customer)
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Source { .. })
    }

    pub fn is_depot(&self) -> bool {
        matches!(self.kind, NodeKind::Depot)
    }

    /// Vehicles owned by this node. Empty unless it is a source.
    pub fn vehicles(&self) -> &[usize] {
        match &self.kind {
            NodeKind::Source { vehicles } => vehicles,
            _ => &[],
        }
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
