//! Local search operators for improving constructed routes.
//!
//! - [`two_opt`] — Intra-route 2-opt segment reversal with an optional time budget
//! - [`two_opt_all`] — The same, route by route over a whole solution

mod two_opt;

pub use two_opt::{two_opt, two_opt_all, TwoOptOutcome};
