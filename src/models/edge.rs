//! Customer-to-customer edges with per-source savings.

/// A directed link between two customers.
///
/// Only customer pairs are materialized. Legs touching a source or the depot
/// are read straight from the distance matrix.
///
/// `savings[s]` is the saving of serving `to` right after `from` on a route
/// out of the `s`-th source, instead of on two separate routes:
///
/// ```text
/// savings[s] = d(source_s, to) + d(from, depot) - d(from, to)
/// ```
///
/// A savings value compared across different sources means nothing.
#[derive(Debug, Clone)]
pub struct Edge {
    from: usize,
    to: usize,
    cost: f64,
    savings: Vec<f64>,
}

impl Edge {
    pub(crate) fn new(from: usize, to: usize, cost: f64, savings: Vec<f64>) -> Self {
        Self {
            from,
            to,
            cost,
            savings,
        }
    }

    /// Tail customer.
    pub fn from(&self) -> usize {
        self.from
    }

    /// Head customer.
    pub fn to(&self) -> usize {
        self.to
    }

    /// Travel cost `d(from, to)`.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Saving for the source at ordinal `source_index` in
    /// [`Problem::sources`](super::Problem::sources).
    pub fn saving(&self, source_index: usize) -> f64 {
        self.savings[source_index]
    }
}
