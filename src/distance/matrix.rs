//! Dense distance matrix.

use crate::models::Node;

/// A dense n×n distance matrix stored in row-major order.
///
/// Supports both Euclidean distance computation from node coordinates
/// and explicit distance specification.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Node;
/// use u_msvrp::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::source(0, 0.0, 0.0, vec![0]),
///     Node::customer(1, 3.0, 4.0, 10),
///     Node::depot(2, 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from node coordinates.
    ///
    /// Row/column `k` corresponds to `nodes[k]`.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns a copy with every entry rounded to `decimals` places.
    pub fn rounded(mut self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        for d in &mut self.data {
            *d = (*d * scale).round() / scale;
        }
        self
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// First pair `(i, j)` with `i < j` whose two directions differ by more
    /// than `tol`, scanning rows in order. `None` for a symmetric matrix.
    pub fn asymmetric_pair(&self, tol: f64) -> Option<(usize, usize)> {
        (0..self.size)
            .flat_map(|i| ((i + 1)..self.size).map(move |j| (i, j)))
            .find(|&(i, j)| (self.get(i, j) - self.get(j, i)).abs() > tol)
    }

    /// Sorts `candidates` by distance from `from`, nearest first.
    ///
    /// Ties keep ascending id order.
    pub fn sort_by_distance_from(&self, from: usize, candidates: &mut [usize]) {
        candidates.sort_by(|&a, &b| {
            self.get(from, a)
                .total_cmp(&self.get(from, b))
                .then(a.cmp(&b))
        });
    }
}
