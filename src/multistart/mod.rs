//! Randomized multistart over the constructive heuristics.
//!
//! - [`MultistartConfig`] — iteration budget, seed, parallelism, stage policies
//! - [`RandomPolicy`] — how a trial draws its selection
//! - [`nearest_neighbor_multistart`] / [`savings_multistart`] — the drivers

mod config;
mod runner;

pub use config::{MultistartConfig, RandomPolicy};
pub use runner::{nearest_neighbor_multistart, savings_multistart, MultistartResult};
