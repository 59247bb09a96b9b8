//! Error types for problem construction and solver configuration.
//!
//! Ordinary infeasibility (a customer that fits no vehicle, an edge that
//! cannot be merged) is never an error. Only malformed input is.

use std::fmt;

/// Errors raised before any heuristic runs.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// No depot was added to the problem.
    MissingDepot,
    /// More than one depot was added.
    DuplicateDepot,
    /// The problem has no source.
    NoSources,
    /// A source was declared with an empty vehicle list.
    SourceWithoutVehicles {
        /// Node id of the offending source.
        source: usize,
    },
    /// A vehicle capacity is negative.
    NegativeCapacity {
        /// Vehicle id.
        vehicle: usize,
        /// Declared capacity.
        capacity: i32,
    },
    /// A customer demand is negative.
    NegativeDemand {
        /// Node id.
        node: usize,
        /// Declared demand.
        demand: i32,
    },
    /// `Tmax` is negative or NaN.
    InvalidTmax(f64),
    /// An explicit distance matrix does not match the node count.
    DistanceMatrixSize {
        /// Number of nodes in the problem.
        expected: usize,
        /// Side of the supplied matrix.
        actual: usize,
    },
    /// A distance entry is negative, non-finite, or a non-zero diagonal.
    InvalidDistance {
        /// Row.
        from: usize,
        /// Column.
        to: usize,
        /// Offending value.
        value: f64,
    },
    /// `d(from, to) != d(to, from)`.
    AsymmetricDistance {
        /// Row.
        from: usize,
        /// Column.
        to: usize,
    },
    /// A solver or multistart configuration failed validation.
    InvalidConfig(String),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::MissingDepot => write!(f, "problem has no depot"),
            RoutingError::DuplicateDepot => write!(f, "problem has more than one depot"),
            RoutingError::NoSources => write!(f, "problem has no source"),
            RoutingError::SourceWithoutVehicles { source } => {
                write!(f, "source {source} has no vehicles")
            }
            RoutingError::NegativeCapacity { vehicle, capacity } => {
                write!(f, "vehicle {vehicle} has negative capacity {capacity}")
            }
            RoutingError::NegativeDemand { node, demand } => {
                write!(f, "node {node} has negative demand {demand}")
            }
            RoutingError::InvalidTmax(t) => write!(f, "tmax must be non-negative, got {t}"),
            RoutingError::DistanceMatrixSize { expected, actual } => write!(
                f,
                "distance matrix is {actual}x{actual}, expected {expected}x{expected}"
            ),
            RoutingError::InvalidDistance { from, to, value } => {
                write!(f, "invalid distance {value} from {from} to {to}")
            }
            RoutingError::AsymmetricDistance { from, to } => {
                write!(f, "distance from {from} to {to} differs from reverse")
            }
            RoutingError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for RoutingError {}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(RoutingError::MissingDepot.to_string(), "problem has no depot");
        assert_eq!(
            RoutingError::SourceWithoutVehicles { source: 3 }.to_string(),
            "source 3 has no vehicles"
        );
        assert_eq!(
            RoutingError::DistanceMatrixSize {
                expected: 4,
                actual: 3
            }
            .to_string(),
            "distance matrix is 3x3, expected 4x4"
        );
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(RoutingError::InvalidConfig("beta out of range".into()));
        assert!(err.to_string().contains("beta out of range"));
    }
}
