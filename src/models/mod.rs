//! Domain model types for multi-source routing.
//!
//! Provides nodes (customers, sources, depot), vehicles owned by sources,
//! customer-to-customer edges with per-source savings, routes, solutions,
//! and the validated [`Problem`] that ties them together.

mod edge;
mod node;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use edge::Edge;
pub use node::{Node, NodeKind};
pub use problem::{Problem, ProblemBuilder, COST_TOLERANCE};
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;
