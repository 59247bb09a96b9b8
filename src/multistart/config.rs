//! Multistart configuration.
//!
//! [`MultistartConfig`] holds the iteration budget, seeding, parallelism,
//! and the randomization policy of each construction stage.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::selection::Selection;

/// How a randomized trial draws its [`Selection`].
///
/// # Examples
///
/// ```
/// use u_msvrp::multistart::RandomPolicy;
/// use u_msvrp::selection::{create_rng, Selection};
///
/// let policy = RandomPolicy::Biased { beta_min: 0.2, beta_max: 0.2 };
/// assert_eq!(policy.sample(&mut create_rng(1)), Selection::Biased(0.2));
///
/// let bad = RandomPolicy::Biased { beta_min: 0.5, beta_max: 0.1 };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RandomPolicy {
    /// Uniform pick among the best `width` candidates.
    BoundedWidth {
        /// Window size, at least 1.
        width: usize,
    },
    /// Biased pick with `beta` drawn uniformly from `[beta_min, beta_max]`
    /// once per trial.
    ///
    /// `beta` is the chance of passing over the current head (see
    /// [`BiasedPick`](crate::selection::BiasedPick)), so the head is taken
    /// with probability about `1 - beta`. A range stated as head
    /// probabilities `[p, q]` becomes `[1 - q, 1 - p]` here.
    Biased {
        /// Lower end of the beta range, in `(0, 1)`.
        beta_min: f64,
        /// Upper end of the beta range, in `(0, 1)`.
        beta_max: f64,
    },
}

impl RandomPolicy {
    /// Validates the policy parameters.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            RandomPolicy::BoundedWidth { width } => Selection::BoundedWidth(width).validate(),
            RandomPolicy::Biased { beta_min, beta_max } => {
                Selection::Biased(beta_min).validate()?;
                Selection::Biased(beta_max).validate()?;
                if beta_min > beta_max {
                    return Err(format!(
                        "beta range is empty: min {beta_min} > max {beta_max}"
                    ));
                }
                Ok(())
            }
        }
    }

    /// Draws the selection for one trial.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Selection {
        match *self {
            RandomPolicy::BoundedWidth { width } => Selection::BoundedWidth(width),
            RandomPolicy::Biased { beta_min, beta_max } if beta_min < beta_max => {
                Selection::Biased(rng.random_range(beta_min..=beta_max))
            }
            RandomPolicy::Biased { beta_min, .. } => Selection::Biased(beta_min),
        }
    }
}

/// Configuration for the multistart drivers.
///
/// # Defaults
///
/// ```
/// use u_msvrp::multistart::MultistartConfig;
///
/// let config = MultistartConfig::default();
/// assert_eq!(config.max_iterations, 1000);
/// assert!(!config.parallel);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_msvrp::multistart::{MultistartConfig, RandomPolicy};
///
/// let config = MultistartConfig::default()
///     .with_max_iterations(200)
///     .with_seed(42)
///     .with_parallel(true)
///     .with_merge(None)
///     .with_mapper(Some(RandomPolicy::Biased { beta_min: 0.6, beta_max: 0.9 }));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultistartConfig {
    /// Number of randomized trials after the greedy baseline.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to run trials in parallel using rayon.
    ///
    /// Results do not depend on this flag.
    pub parallel: bool,

    /// Randomization of nearest-neighbour trials.
    pub construction: RandomPolicy,

    /// Randomization of the savings mapper stage. `None` keeps it greedy.
    pub mapper: Option<RandomPolicy>,

    /// Randomization of the savings merge stage. `None` keeps it greedy.
    pub merge: Option<RandomPolicy>,
}

impl Default for MultistartConfig {
    fn default() -> Self {
        // Takes the head 10 to 30 percent of the time.
        let biased = RandomPolicy::Biased {
            beta_min: 0.7,
            beta_max: 0.9,
        };
        Self {
            max_iterations: 1000,
            seed: None,
            parallel: false,
            construction: RandomPolicy::BoundedWidth { width: 5 },
            mapper: Some(biased),
            merge: Some(biased),
        }
    }
}

impl MultistartConfig {
    /// Sets the number of randomized trials.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel trials.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the nearest-neighbour randomization.
    pub fn with_construction(mut self, policy: RandomPolicy) -> Self {
        self.construction = policy;
        self
    }

    /// Sets the mapper randomization.
    pub fn with_mapper(mut self, policy: Option<RandomPolicy>) -> Self {
        self.mapper = policy;
        self
    }

    /// Sets the merge randomization.
    pub fn with_merge(mut self, policy: Option<RandomPolicy>) -> Self {
        self.merge = policy;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any policy is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.construction
            .validate()
            .map_err(|e| format!("construction: {e}"))?;
        if let Some(policy) = &self.mapper {
            policy.validate().map_err(|e| format!("mapper: {e}"))?;
        }
        if let Some(policy) = &self.merge {
            policy.validate().map_err(|e| format!("merge: {e}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{create_rng, BiasedPick};

    #[test]
    fn test_default_config() {
        let config = MultistartConfig::default();
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.seed, None);
        assert_eq!(config.construction, RandomPolicy::BoundedWidth { width: 5 });
        assert!(config.mapper.is_some());
        assert!(config.merge.is_some());
    }

    #[test]
    fn test_default_biased_policies_explore() {
        let config = MultistartConfig::default();
        let expected = RandomPolicy::Biased {
            beta_min: 0.7,
            beta_max: 0.9,
        };
        assert_eq!(config.mapper, Some(expected));
        assert_eq!(config.merge, Some(expected));

        // Head frequency over long lists at each end of the default range.
        let mut rng = create_rng(17);
        for (beta, target) in [(0.7, 0.3), (0.9, 0.1)] {
            let draws = 20_000;
            let hits = (0..draws)
                .filter(|_| {
                    let options: Vec<u32> = (0..50).collect();
                    BiasedPick::new(options, beta, &mut rng).next() == Some(0)
                })
                .count();
            let freq = hits as f64 / draws as f64;
            assert!((freq - target).abs() < 0.02, "beta {beta}: head frequency {freq}");
        }

        // Sampled trials stay in the exploring regime.
        let policy = config.mapper.expect("default mapper policy");
        for _ in 0..100 {
            match policy.sample(&mut rng) {
                Selection::Biased(beta) => assert!((0.7..=0.9).contains(&beta)),
                other => panic!("unexpected selection {other:?}"),
            }
        }
    }

    #[test]
    fn test_builder_chain() {
        let config = MultistartConfig::default()
            .with_max_iterations(10)
            .with_seed(7)
            .with_parallel(true)
            .with_construction(RandomPolicy::BoundedWidth { width: 2 })
            .with_mapper(None);
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.seed, Some(7));
        assert!(config.parallel);
        assert_eq!(config.mapper, None);
    }

    #[test]
    fn test_validate_rejects_bad_policies() {
        let zero_width = MultistartConfig::default()
            .with_construction(RandomPolicy::BoundedWidth { width: 0 });
        assert!(zero_width.validate().is_err());

        let beta_one = MultistartConfig::default().with_merge(Some(RandomPolicy::Biased {
            beta_min: 0.5,
            beta_max: 1.0,
        }));
        let err = beta_one.validate().unwrap_err();
        assert!(err.starts_with("merge:"), "{err}");

        let inverted = MultistartConfig::default().with_mapper(Some(RandomPolicy::Biased {
            beta_min: 0.4,
            beta_max: 0.2,
        }));
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_sample_within_range() {
        let policy = RandomPolicy::Biased {
            beta_min: 0.1,
            beta_max: 0.3,
        };
        let mut rng = create_rng(3);
        for _ in 0..100 {
            match policy.sample(&mut rng) {
                Selection::Biased(beta) => assert!((0.1..=0.3).contains(&beta)),
                other => panic!("unexpected selection {other:?}"),
            }
        }
        assert_eq!(
            RandomPolicy::BoundedWidth { width: 4 }.sample(&mut rng),
            Selection::BoundedWidth(4)
        );
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = MultistartConfig::default().with_seed(5);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: MultistartConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
