//! Multistart execution.
//!
//! Both drivers run a greedy baseline, then `max_iterations` randomized
//! trials. Every trial gets its own generator seeded from the master
//! generator before any trial starts, so the outcome depends only on the
//! configured seed, never on scheduling.

use log::info;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::MultistartConfig;
use crate::constructive::{nearest_neighbor, savings, Mapping};
use crate::error::{Result, RoutingError};
use crate::models::{Problem, Solution};
use crate::selection::{create_rng, Selection};

/// Result of a multistart run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultistartResult {
    /// The lowest-cost solution found.
    pub best: Solution,

    /// Total cost of `best`.
    pub best_cost: f64,

    /// Mapping behind `best`, for the savings driver.
    pub mapping: Option<Mapping>,

    /// Number of randomized trials executed.
    pub iterations: usize,

    /// Number of times a trial beat the best so far.
    pub improvements: usize,

    /// Index of the winning trial, `None` when the greedy baseline won.
    pub best_trial: Option<usize>,
}

/// Repeats nearest-neighbour construction and keeps the cheapest solution.
///
/// Each trial draws its selection from
/// [`MultistartConfig::construction`].
///
/// # Errors
///
/// Returns [`RoutingError::InvalidConfig`] if the configuration does not
/// validate.
///
/// # Examples
///
/// ```
/// use u_msvrp::models::Problem;
/// use u_msvrp::multistart::{nearest_neighbor_multistart, MultistartConfig};
///
/// let problem = Problem::builder()
///     .source(0.0, 0.0, &[10, 10])
///     .customer(1.0, 2.0, 3)
///     .customer(4.0, 1.0, 3)
///     .customer(2.0, 5.0, 3)
///     .depot(6.0, 0.0)
///     .build()
///     .unwrap();
///
/// let config = MultistartConfig::default().with_max_iterations(50).with_seed(42);
/// let result = nearest_neighbor_multistart(&problem, &config).unwrap();
/// assert_eq!(result.iterations, 50);
/// assert_eq!(result.best.num_served(), 3);
/// ```
pub fn nearest_neighbor_multistart(
    problem: &Problem,
    config: &MultistartConfig,
) -> Result<MultistartResult> {
    config.validate().map_err(RoutingError::InvalidConfig)?;
    let mut rng = master_rng(config);

    let baseline = nearest_neighbor(problem, Selection::Greedy, &mut rng);
    let seeds = trial_seeds(&mut rng, config.max_iterations);
    let trials = run_trials(&seeds, config.parallel, |seed| {
        let mut rng = create_rng(seed);
        let selection = config.construction.sample(&mut rng);
        (nearest_neighbor(problem, selection, &mut rng), None)
    });

    Ok(keep_best("nearest neighbour", (baseline, None), trials))
}

/// Repeats mapping plus merge and keeps the cheapest solution.
///
/// Each trial randomizes the mapper and the merge stage independently, as
/// configured by [`MultistartConfig::mapper`] and
/// [`MultistartConfig::merge`]. A stage without a policy stays greedy.
///
/// # Errors
///
/// Returns [`RoutingError::InvalidConfig`] if the configuration does not
/// validate.
pub fn savings_multistart(
    problem: &Problem,
    config: &MultistartConfig,
) -> Result<MultistartResult> {
    config.validate().map_err(RoutingError::InvalidConfig)?;
    let mut rng = master_rng(config);

    let (mapping, baseline) = savings(problem, Selection::Greedy, Selection::Greedy, &mut rng);
    let seeds = trial_seeds(&mut rng, config.max_iterations);
    let trials = run_trials(&seeds, config.parallel, |seed| {
        let mut rng = create_rng(seed);
        let mapper = config.mapper.map_or(Selection::Greedy, |p| p.sample(&mut rng));
        let merge = config.merge.map_or(Selection::Greedy, |p| p.sample(&mut rng));
        let (mapping, solution) = savings(problem, mapper, merge, &mut rng);
        (solution, Some(mapping))
    });

    Ok(keep_best("savings", (baseline, Some(mapping)), trials))
}

fn master_rng(config: &MultistartConfig) -> rand::rngs::StdRng {
    match config.seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

fn trial_seeds<R: Rng>(rng: &mut R, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.random()).collect()
}

fn run_trials<T, F>(seeds: &[u64], parallel: bool, trial: F) -> Vec<T>
where
    T: Send,
    F: Fn(u64) -> T + Sync,
{
    if parallel {
        seeds.par_iter().map(|&seed| trial(seed)).collect()
    } else {
        seeds.iter().map(|&seed| trial(seed)).collect()
    }
}

/// Scans trials in order; only a strictly lower cost replaces the best.
fn keep_best(
    label: &str,
    baseline: (Solution, Option<Mapping>),
    trials: Vec<(Solution, Option<Mapping>)>,
) -> MultistartResult {
    let iterations = trials.len();
    let (mut best, mut mapping) = baseline;
    let baseline_cost = best.total_cost();
    let mut best_trial = None;
    let mut improvements = 0;

    for (idx, (solution, trial_mapping)) in trials.into_iter().enumerate() {
        if solution.total_cost() < best.total_cost() {
            info!(
                "{label} multistart: trial {idx} improved cost {:.3} -> {:.3}",
                best.total_cost(),
                solution.total_cost()
            );
            best = solution;
            mapping = trial_mapping;
            best_trial = Some(idx);
            improvements += 1;
        }
    }

    info!(
        "{label} multistart: {iterations} trials, baseline {baseline_cost:.3}, best {:.3}",
        best.total_cost()
    );
    MultistartResult {
        best_cost: best.total_cost(),
        best,
        mapping,
        iterations,
        improvements,
        best_trial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multistart::RandomPolicy;

    fn clustered() -> Problem {
        Problem::builder()
            .source(0.0, 0.0, &[8, 8])
            .source(30.0, 0.0, &[8])
            .customer(2.0, 3.0, 2)
            .customer(5.0, 1.0, 3)
            .customer(1.0, 7.0, 2)
            .customer(6.0, 6.0, 2)
            .customer(28.0, 4.0, 3)
            .customer(25.0, 2.0, 2)
            .customer(27.0, 8.0, 2)
            .customer(15.0, 9.0, 3)
            .depot(15.0, 0.0)
            .tmax(70.0)
            .build()
            .expect("valid problem")
    }

    #[test]
    fn test_nn_multistart_reproducible() {
        let p = clustered();
        let config = MultistartConfig::default().with_max_iterations(40).with_seed(9);
        let a = nearest_neighbor_multistart(&p, &config).expect("valid config");
        let b = nearest_neighbor_multistart(&p, &config).expect("valid config");
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.best_trial, b.best_trial);
        assert_eq!(a.best.routes(), b.best.routes());
        assert!(a.mapping.is_none());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let p = clustered();
        let config = MultistartConfig::default().with_max_iterations(60).with_seed(3);
        let seq = savings_multistart(&p, &config).expect("valid config");
        let par = savings_multistart(&p, &config.clone().with_parallel(true)).expect("valid config");
        assert_eq!(seq.best_cost, par.best_cost);
        assert_eq!(seq.best_trial, par.best_trial);
        assert_eq!(seq.improvements, par.improvements);
        assert_eq!(seq.mapping, par.mapping);
    }

    #[test]
    fn test_never_worse_than_baseline() {
        let p = clustered();
        let greedy_nn = nearest_neighbor(&p, Selection::Greedy, &mut create_rng(0));
        let (_, greedy_savings) =
            savings(&p, Selection::Greedy, Selection::Greedy, &mut create_rng(0));
        for seed in 0..5 {
            let config = MultistartConfig::default().with_max_iterations(20).with_seed(seed);
            let nn = nearest_neighbor_multistart(&p, &config).expect("valid config");
            assert!(nn.best_cost <= greedy_nn.total_cost());
            let sv = savings_multistart(&p, &config).expect("valid config");
            assert!(sv.best_cost <= greedy_savings.total_cost());
            assert!(sv.mapping.is_some());
        }
    }

    #[test]
    fn test_zero_iterations_returns_baseline() {
        let p = clustered();
        let config = MultistartConfig::default().with_max_iterations(0).with_seed(1);
        let result = savings_multistart(&p, &config).expect("valid config");
        let (mapping, baseline) =
            savings(&p, Selection::Greedy, Selection::Greedy, &mut create_rng(0));
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_trial, None);
        assert_eq!(result.best_cost, baseline.total_cost());
        assert_eq!(result.mapping, Some(mapping));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let p = clustered();
        let config = MultistartConfig::default()
            .with_construction(RandomPolicy::BoundedWidth { width: 0 });
        assert!(matches!(
            nearest_neighbor_multistart(&p, &config),
            Err(RoutingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_best_cost_matches_solution() {
        let p = clustered();
        let config = MultistartConfig::default().with_max_iterations(30).with_seed(11);
        let result = savings_multistart(&p, &config).expect("valid config");
        assert_eq!(result.best_cost, result.best.total_cost());
        assert!(result.improvements <= result.iterations);
    }
}
