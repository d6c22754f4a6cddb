//! Error types for structured error handling.
//!
//! This module provides:
//! - `UnitError`: Errors from unit conversion
//! - `MapError`: Errors from map and geometry construction
//! - `SolverError`: Errors from root-finding solvers
//! - `EstimatorError`: Errors surfaced by the estimator utilities

use thiserror::Error;

/// Unit conversion errors.
///
/// # Examples
/// ```
/// use estimator_core::types::UnitError;
///
/// let err = UnitError::Incompatible { from: "s".to_string(), to: "rad".to_string() };
/// assert_eq!(format!("{}", err), "Cannot convert 's' to 'rad': incompatible units");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitError {
    /// The two units measure different physical types.
    #[error("Cannot convert '{from}' to '{to}': incompatible units")]
    Incompatible {
        /// Source unit symbol
        from: String,
        /// Target unit symbol
        to: String,
    },

    /// An angle was required but a different physical type was given.
    #[error("Expected an angular unit, got '{0}'")]
    NotAngular(String),
}

/// Map and geometry errors.
///
/// # Examples
/// ```
/// use estimator_core::types::MapError;
///
/// let err = MapError::ShapeMismatch { expected: vec![5, 10], found: vec![10, 5] };
/// assert!(format!("{}", err).contains("[5, 10]"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    /// Data shape does not match the geometry.
    #[error("Data shape {found:?} does not match geometry shape {expected:?}")]
    ShapeMismatch {
        /// Shape implied by the geometry
        expected: Vec<usize>,
        /// Shape of the supplied data
        found: Vec<usize>,
    },

    /// Non-spatial axis definition is invalid.
    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    /// Spatial geometry definition is invalid.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Root-finding solver errors.
///
/// Provides structured error handling for root-finding solver operations
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson or secant steps
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use estimator_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Errors returned by `find_peaks` and `find_roots`.
///
/// # Examples
/// ```
/// use estimator_core::types::EstimatorError;
///
/// let err = EstimatorError::UnknownSolver("xfail".to_string());
/// assert_eq!(format!("{}", err), "Unknown solver \"xfail\"");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    /// Root-finding method name is not one of the supported solvers.
    #[error("Unknown solver \"{0}\"")]
    UnknownSolver(String),

    /// Unit conversion failed.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Map or geometry is malformed.
    #[error(transparent)]
    Map(#[from] MapError),

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Options could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_solver_message_quotes_name() {
        let err = EstimatorError::UnknownSolver("xfail".to_string());
        assert_eq!(err.to_string(), "Unknown solver \"xfail\"");
    }

    #[test]
    fn test_unit_error_converts_transparently() {
        let err: EstimatorError = UnitError::NotAngular("s".to_string()).into();
        assert_eq!(err.to_string(), "Expected an angular unit, got 's'");
        assert!(matches!(err, EstimatorError::Unit(_)));
    }

    #[test]
    fn test_map_error_converts() {
        let err: EstimatorError = MapError::InvalidAxis("empty edges".to_string()).into();
        assert!(matches!(err, EstimatorError::Map(MapError::InvalidAxis(_))));
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::NoBracket { a: 1.0, b: 2.0 };
        assert_eq!(err.to_string(), "No bracket: f(1) and f(2) have same sign");

        let err = SolverError::DerivativeNearZero { x: 0.5 };
        assert!(err.to_string().contains("0.5"));
    }
}
