//! Constructive heuristics for building multi-source solutions.
//!
//! - [`nearest_neighbor`] — Round-robin nearest-neighbour extension, O(n² log n)
//! - [`map_customers`] — Marginal-cost customer-to-vehicle mapping, O(n·v + v·n log n)
//! - [`merge_routes`] — Per-source parallel savings merge, O(n² log n)
//! - [`savings`] — Mapping followed by merge
//!
//! Every constructor takes a [`Selection`](crate::selection::Selection) and
//! a random number generator. The greedy selection never touches the
//! generator, so its results are fully deterministic.

mod mapper;
mod merge;
mod nearest_neighbor;

pub use mapper::{map_customers, Mapping};
pub use merge::{merge_routes, savings};
pub use nearest_neighbor::nearest_neighbor;
