//! Vehicle type.

use serde::{Deserialize, Serialize};

/// A vehicle starting at a source and ending at the depot.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Vehicle;
///
/// let v = Vehicle::new(0, 200, 3);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 200);
/// assert_eq!(v.source(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    source: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given id, capacity, and source node id.
    pub fn new(id: usize, capacity: i32, source: usize) -> Self {
        Self {
            id,
            capacity,
            source,
        }
    }

    /// Dense vehicle id (index into [`Problem::vehicles`](super::Problem::vehicles)).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Node id of the source this vehicle starts from.
    pub fn source(&self) -> usize {
        self.source
    }

    pub(crate) fn set_capacity(&mut self, capacity: i32) {
        self.capacity = capacity;
    }
}
