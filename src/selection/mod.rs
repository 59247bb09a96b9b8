//! Randomized selection over ranked candidate lists.
//!
//! - [`BoundedWidthPick`] — uniform pick among the best `n` remaining (GRASP-style)
//! - [`BiasedPick`] — quasi-geometric pick favouring the front (biased randomization)
//! - [`Selection`] — chooses between greedy order and the two policies
//!
//! Every constructor call builds fresh iterators; nothing is shared between
//! calls except the injected random number generator.

mod picks;

pub use picks::{BiasedPick, BoundedWidthPick};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Creates the seeded generator used throughout the crate.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Order in which a constructor walks its ranked candidates.
///
/// # Examples
///
/// ```
/// use u_msvrp::selection::{create_rng, Selection};
///
/// let mut rng = create_rng(3);
/// let greedy: Vec<_> = Selection::Greedy.picks(vec![1, 2, 3], &mut rng).collect();
/// assert_eq!(greedy, vec![1, 2, 3]);
///
/// assert!(Selection::Biased(0.3).validate().is_ok());
/// assert!(Selection::Biased(1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    /// Best candidate first, deterministic.
    #[default]
    Greedy,
    /// Uniform pick among the best `n` remaining candidates.
    BoundedWidth(usize),
    /// Quasi-geometric pick with parameter `beta` in `(0, 1)`.
    Biased(f64),
}

impl Selection {
    /// Returns `true` for the deterministic policy.
    pub fn is_greedy(&self) -> bool {
        matches!(self, Selection::Greedy)
    }

    /// Validates the policy parameter.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Selection::Greedy => Ok(()),
            Selection::BoundedWidth(0) => Err("bounded-width pick needs width >= 1".into()),
            Selection::BoundedWidth(_) => Ok(()),
            Selection::Biased(beta) => {
                if beta > 0.0 && beta < 1.0 {
                    Ok(())
                } else {
                    Err(format!("biased pick beta must be in (0, 1), got {beta}"))
                }
            }
        }
    }

    /// Iterates over `sorted` (best first) according to this policy.
    pub fn picks<'r, T, R: Rng>(self, sorted: Vec<T>, rng: &'r mut R) -> Picks<'r, T, R> {
        match self {
            Selection::Greedy => Picks::Greedy(sorted.into_iter()),
            Selection::BoundedWidth(width) => {
                Picks::BoundedWidth(BoundedWidthPick::new(sorted, width, rng))
            }
            Selection::Biased(beta) => Picks::Biased(BiasedPick::new(sorted, beta, rng)),
        }
    }
}

/// Iterator returned by [`Selection::picks`].
#[derive(Debug)]
pub enum Picks<'r, T, R> {
    Greedy(std::vec::IntoIter<T>),
    BoundedWidth(BoundedWidthPick<'r, T, R>),
    Biased(BiasedPick<'r, T, R>),
}

impl<T, R: Rng> Iterator for Picks<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self {
            Picks::Greedy(it) => it.next(),
            Picks::BoundedWidth(it) => it.next(),
            Picks::Biased(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Picks::Greedy(it) => it.size_hint(),
            Picks::BoundedWidth(it) => it.size_hint(),
            Picks::Biased(it) => it.size_hint(),
        }
    }
}
