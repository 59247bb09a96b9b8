//! Solution evaluation and feasibility checking.

mod evaluator;

pub use evaluator::SolutionEvaluator;
