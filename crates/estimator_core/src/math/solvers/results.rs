//! Per-solve diagnostics.

use num_traits::Float;

/// Termination status of a root solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RootFlag {
    /// The solver met its tolerance.
    Converged,
    /// No usable root was produced.
    Failed,
}

/// Outcome of a single root solve.
///
/// Mirrors the diagnostics reported by bracketed solvers: the root
/// estimate, how much work was needed, and whether the tolerance was met.
///
/// # Example
///
/// ```
/// use estimator_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let res = solver.solve(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
///
/// assert!(res.converged);
/// assert!(res.iterations > 0);
/// assert!(res.function_calls >= res.iterations);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootResults<T: Float> {
    /// Root estimate (NaN when the solve failed)
    pub root: T,
    /// Iterations performed
    pub iterations: usize,
    /// Function evaluations performed
    pub function_calls: usize,
    /// Whether the tolerance was met
    pub converged: bool,
    /// Termination status
    pub flag: RootFlag,
}

impl<T: Float> RootResults<T> {
    /// A converged result.
    pub fn converged(root: T, iterations: usize, function_calls: usize) -> Self {
        Self {
            root,
            iterations,
            function_calls,
            converged: true,
            flag: RootFlag::Converged,
        }
    }

    /// Placeholder for a bracket that produced no root.
    pub fn failed() -> Self {
        Self {
            root: T::nan(),
            iterations: 0,
            function_calls: 0,
            converged: false,
            flag: RootFlag::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result() {
        let res: RootResults<f64> = RootResults::failed();
        assert!(res.root.is_nan());
        assert_eq!(res.iterations, 0);
        assert_eq!(res.function_calls, 0);
        assert!(!res.converged);
        assert_eq!(res.flag, RootFlag::Failed);
    }

    #[test]
    fn test_converged_result() {
        let res = RootResults::converged(1.5_f64, 7, 9);
        assert!(res.converged);
        assert_eq!(res.flag, RootFlag::Converged);
        assert_eq!(res.iterations, 7);
    }
}
