//! Ridder's method root-finding solver.

use super::{RootResults, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Ridder's method root finder (`ridder`).
///
/// Each iteration evaluates the midpoint and fits an exponential to remove
/// curvature, giving quadratic convergence while never leaving the
/// bracket.
///
/// # Example
///
/// ```
/// use estimator_core::math::solvers::{RidderSolver, SolverConfig};
///
/// let solver = RidderSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
/// assert!((root - 2.0_f64.ln()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct RidderSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> RidderSolver<T> {
    /// Create a new Ridder solver.
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

    /// Run Ridder's iteration on the bracket [a, b].
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::NumericalInstability` - The exponential fit degenerated
    /// * `SolverError::MaxIterationsExceeded` - Iteration bound reached
    pub fn solve<F>(&self, f: F, a: T, b: T) -> Result<RootResults<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let (mut lo, mut hi) = (a, b);
        let (mut f_lo, mut f_hi) = (f(lo), f(hi));
        let mut calls = 2;

        if f_lo == T::zero() {
            return Ok(RootResults::converged(lo, 0, calls));
        }
        if f_hi == T::zero() {
            return Ok(RootResults::converged(hi, 0, calls));
        }
        if !(f_lo * f_hi < T::zero()) {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::one() + T::one();
        let tol = self.config.tolerance;
        let mut previous = T::nan();

        for iteration in 1..=self.config.max_iterations {
            let mid = lo + (hi - lo) / two;
            let f_mid = f(mid);
            calls += 1;

            let s = (f_mid * f_mid - f_lo * f_hi).sqrt();
            if s == T::zero() || !s.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Ridder exponential fit degenerated".to_string(),
                ));
            }

            let direction = if f_lo > f_hi { T::one() } else { -T::one() };
            let x_new = mid + (mid - lo) * direction * f_mid / s;
            let f_new = f(x_new);
            calls += 1;

            if f_new == T::zero() || (x_new - previous).abs() < tol {
                return Ok(RootResults::converged(x_new, iteration, calls));
            }
            previous = x_new;

            // Shrink to the sub-bracket that still changes sign
            if (f_mid < T::zero()) != (f_new < T::zero()) {
                lo = mid;
                f_lo = f_mid;
                hi = x_new;
                f_hi = f_new;
            } else if (f_lo < T::zero()) != (f_new < T::zero()) {
                hi = x_new;
                f_hi = f_new;
            } else {
                lo = x_new;
                f_lo = f_new;
            }

            if (hi - lo).abs() < tol {
                return Ok(RootResults::converged(x_new, iteration, calls));
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
