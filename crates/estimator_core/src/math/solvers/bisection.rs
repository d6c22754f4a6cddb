//! Bisection root-finding solver.

use super::{RootResults, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Interval-halving root finder (`bisect`).
///
/// Slow (one bit per iteration) but unconditionally convergent on any
/// bracket of a continuous function.
///
/// # Example
///
/// ```
/// use estimator_core::math::solvers::{BisectionSolver, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` in the bracket [a, b].
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        self.solve(f, a, b).map(|res| res.root)
    }

    /// Bisect until the half-width falls below the tolerance.
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::MaxIterationsExceeded` - Iteration bound reached
    pub fn solve<F>(&self, f: F, a: T, b: T) -> Result<RootResults<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let fa = f(a);
        let fb = f(b);
        if fa == T::zero() {
            return Ok(RootResults::converged(a, 0, 2));
        }
        if fb == T::zero() {
            return Ok(RootResults::converged(b, 0, 2));
        }
        if !(fa * fb < T::zero()) {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::one() + T::one();
        let (mut lo, mut f_lo) = (a, fa);
        let mut hi = b;
        let mut calls = 2;

        for iteration in 1..=self.config.max_iterations {
            let mid = lo + (hi - lo) / two;
            let f_mid = f(mid);
            calls += 1;

            if f_mid == T::zero() || ((hi - lo) / two).abs() < self.config.tolerance {
                return Ok(RootResults::converged(mid, iteration, calls));
            }

            if (f_mid < T::zero()) == (f_lo < T::zero()) {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
