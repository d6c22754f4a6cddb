//! Solver configuration types.

use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// Shared by every solver behind `find_roots`. Bracketing solvers stop when
/// the bracket shrinks below `tolerance`; open solvers stop when successive
/// iterates differ by less than `tolerance`. The residual `|f(x)|` is never
/// a stopping criterion, so badly scaled functions are solved in `x`.
///
/// # Example
///
/// ```
/// use estimator_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// let custom = SolverConfig {
///     tolerance: 1e-12,
///     max_iterations: 200,
/// };
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    ///
    /// Acts as a safety bound; exceeding it yields
    /// `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use estimator_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        let config = Self {
            tolerance,
            max_iterations,
        };
        if let Err(msg) = config.validate() {
            panic!("{}", msg);
        }
        config
    }

    /// Check the configuration, returning a description of the first
    /// invalid field.
    ///
    /// Used for configurations that bypass [`SolverConfig::new`], such as
    /// ones deserialised from TOML.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tolerance > T::zero()) {
            return Err("tolerance must be positive".to_string());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }
        Ok(())
    }

    /// Tight tolerance (1e-14) and 500 iterations.
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap_or_else(T::epsilon),
            max_iterations: 500,
        }
    }

    /// Relaxed tolerance (1e-6) and 50 iterations.
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap_or_else(T::epsilon),
            max_iterations: 50,
        }
    }
}
