//! Declarative solver pipeline.
//!
//! [`SolverConfig`] chains a constructor, an optional multistart wrapper
//! and an optional 2-opt pass. [`solve`] runs the chain.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constructive::{nearest_neighbor, savings};
use crate::error::{Result, RoutingError};
use crate::local_search::two_opt_all;
use crate::models::{Problem, Solution};
use crate::multistart::{nearest_neighbor_multistart, savings_multistart, MultistartConfig};
use crate::selection::{create_rng, Selection};

/// Constructive heuristic at the head of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Round-robin nearest neighbour.
    NearestNeighbor,
    /// Marginal-cost mapping followed by the savings merge.
    Savings,
}

/// Configuration for [`solve`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_msvrp::solver::{Algorithm, SolverConfig};
/// use u_msvrp::multistart::MultistartConfig;
///
/// let config = SolverConfig::default()
///     .with_algorithm(Algorithm::NearestNeighbor)
///     .with_multistart(Some(MultistartConfig::default().with_max_iterations(100)))
///     .with_two_opt_budget(Some(Duration::from_millis(50)));
/// assert!(config.two_opt);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Constructor to run.
    pub algorithm: Algorithm,

    /// Multistart wrapper. `None` runs the greedy constructor once.
    pub multistart: Option<MultistartConfig>,

    /// Whether to refine every route with 2-opt afterwards.
    pub two_opt: bool,

    /// Per-route wall-clock budget for 2-opt. `None` runs to convergence.
    pub two_opt_budget: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Savings,
            multistart: None,
            two_opt: true,
            two_opt_budget: None,
        }
    }
}

impl SolverConfig {
    /// Sets the constructor.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets or clears the multistart wrapper.
    pub fn with_multistart(mut self, multistart: Option<MultistartConfig>) -> Self {
        self.multistart = multistart;
        self
    }

    /// Enables or disables the 2-opt pass.
    pub fn with_two_opt(mut self, two_opt: bool) -> Self {
        self.two_opt = two_opt;
        self
    }

    /// Sets the per-route 2-opt budget.
    pub fn with_two_opt_budget(mut self, budget: Option<Duration>) -> Self {
        self.two_opt_budget = budget;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(multistart) = &self.multistart {
            multistart.validate()?;
        }
        if self.two_opt_budget == Some(Duration::ZERO) {
            return Err("two_opt_budget must be positive or None".into());
        }
        Ok(())
    }
}

/// Runs the configured pipeline on a problem.
///
/// # Errors
///
/// Returns [`RoutingError::InvalidConfig`] if the configuration does not
/// validate. Infeasible customers are not an error; they end up in
/// [`Solution::unassigned`].
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Problem;
/// use u_msvrp::solver::{solve, SolverConfig};
///
/// let problem = Problem::builder()
///     .source(0.0, 0.0, &[10])
///     .source(10.0, 0.0, &[10])
///     .customer(1.0, 1.0, 4)
///     .customer(9.0, 1.0, 4)
///     .customer(2.0, 2.0, 4)
///     .depot(5.0, 0.0)
///     .tmax(40.0)
///     .build()
///     .unwrap();
///
/// let solution = solve(&problem, &SolverConfig::default()).unwrap();
/// assert_eq!(solution.num_served(), 3);
/// ```
pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<Solution> {
    config.validate().map_err(RoutingError::InvalidConfig)?;

    let mut solution = match (&config.multistart, config.algorithm) {
        (Some(ms), Algorithm::NearestNeighbor) => nearest_neighbor_multistart(problem, ms)?.best,
        (Some(ms), Algorithm::Savings) => savings_multistart(problem, ms)?.best,
        // Greedy selection never draws from the generator.
        (None, Algorithm::NearestNeighbor) => {
            nearest_neighbor(problem, Selection::Greedy, &mut create_rng(0))
        }
        (None, Algorithm::Savings) => {
            savings(problem, Selection::Greedy, Selection::Greedy, &mut create_rng(0)).1
        }
    };

    if config.two_opt {
        two_opt_all(problem, &mut solution, config.two_opt_budget);
    }
    debug!(
        "solve ({:?}): {} routes, {} unassigned, cost {:.3}",
        config.algorithm,
        solution.num_routes(),
        solution.num_unassigned(),
        solution.total_cost()
    );
    Ok(solution)
}
