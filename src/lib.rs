//! # u-msvrp
//!
//! Multi-source capacitated routing with a shared depot. Several sources
//! each own a fleet; every vehicle leaves its source, serves customers
//! within its capacity, and ends at the depot within a route-cost budget
//! (`Tmax`). Customers that fit nowhere are reported, not forced.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Vehicle, Edge, Route, Solution, Problem)
//! - [`distance`] — Euclidean distance matrix
//! - [`selection`] — Greedy, bounded-width and biased candidate selection
//! - [`constructive`] — Nearest neighbour, marginal-cost mapping, savings merge
//! - [`local_search`] — Intra-route 2-opt with an optional time budget
//! - [`multistart`] — Randomized restarts of the constructors, optionally parallel
//! - [`evaluation`] — Independent cost recomputation and feasibility checks
//! - [`solver`] — Declarative pipeline: constructor, multistart, 2-opt
//! - [`calibration`] — Tight capacities and `Tmax` from an unconstrained topology
//!
//! ## Example
//!
//! ```
//! use u_msvrp::models::Problem;
//! use u_msvrp::solver::{solve, SolverConfig};
//! use u_msvrp::evaluation::SolutionEvaluator;
//!
//! let problem = Problem::builder()
//!     .source(0.0, 0.0, &[10, 10])
//!     .customer(1.0, 0.0, 4)
//!     .customer(2.0, 0.0, 4)
//!     .customer(3.0, 0.0, 4)
//!     .depot(4.0, 0.0)
//!     .tmax(100.0)
//!     .build()?;
//!
//! let solution = solve(&problem, &SolverConfig::default())?;
//! assert_eq!(solution.num_served(), 3);
//! assert!(SolutionEvaluator::new(&problem).evaluate(&solution).1.is_empty());
//! # Ok::<(), u_msvrp::RoutingError>(())
//! ```

pub mod calibration;
pub mod constructive;
mod context;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod multistart;
pub mod selection;
pub mod solver;

pub use error::{Result, RoutingError};
