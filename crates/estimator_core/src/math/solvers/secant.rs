//! Secant method root-finding solver.

use super::{RootResults, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Secant root finder (`secant`).
///
/// An open method: it starts from two points that need not bracket a root
/// and replaces the derivative in Newton's step with a finite difference
/// through the last two iterates. Convergence is superlinear near a simple
/// root but the iterates are not confined to the starting interval.
///
/// # Example
///
/// ```
/// use estimator_core::math::solvers::{SecantSolver, SolverConfig};
///
/// let solver = SecantSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x: f64| x * x - 2.0, 1.0, 2.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct SecantSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> SecantSolver<T> {
    /// Create a new secant solver.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` starting from `x0` and `x1`.
    pub fn find_root<F>(&self, f: F, x0: T, x1: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        self.solve(f, x0, x1).map(|res| res.root)
    }

    /// Iterate secant steps until successive iterates agree to the tolerance.
    ///
    /// # Errors
    ///
    /// * `SolverError::DerivativeNearZero` - Both iterates have equal function values
    /// * `SolverError::NumericalInstability` - An iterate became non-finite
    /// * `SolverError::MaxIterationsExceeded` - Iteration bound reached
    pub fn solve<F>(&self, f: F, x0: T, x1: T) -> Result<RootResults<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let (mut p0, mut p1) = (x0, x1);
        let (mut q0, mut q1) = (f(p0), f(p1));
        let mut calls = 2;

        if q0.abs() < q1.abs() {
            std::mem::swap(&mut p0, &mut p1);
            std::mem::swap(&mut q0, &mut q1);
        }

        for iteration in 1..=self.config.max_iterations {
            if q1 == q0 {
                return Err(SolverError::DerivativeNearZero {
                    x: p1.to_f64().unwrap_or(f64::NAN),
                });
            }

            let p = p1 - q1 * (p1 - p0) / (q1 - q0);
            if !p.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Secant iteration produced non-finite value".to_string(),
                ));
            }

            if (p - p1).abs() < self.config.tolerance {
                return Ok(RootResults::converged(p, iteration, calls));
            }

            p0 = p1;
            q0 = q1;
            p1 = p;
            q1 = f(p1);
            calls += 1;

            if q1 == T::zero() {
                return Ok(RootResults::converged(p1, iteration, calls));
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
