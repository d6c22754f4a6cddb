//! Newton-Raphson root-finding solver.

use super::{RootResults, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder (`newton`) with optional AD support.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root, meaning the number
/// of correct digits approximately doubles each iteration. However, it may
/// fail if:
/// - The derivative is near zero
/// - The initial guess is far from the root
/// - The function has discontinuities
///
/// # Example
///
/// ```
/// use estimator_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root, once a Newton step is shorter than `tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.solve(f, f_prime, x0).map(|res| res.root)
    }

    /// Like [`NewtonRaphsonSolver::find_root`], also reporting iteration
    /// and evaluation counts. Each iteration evaluates both `f` and `f'`;
    /// only evaluations of `f` are counted.
    pub fn solve<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<RootResults<T>, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        newton_iterate(&self.config, x0, |x| (f(x), f_prime(x)))
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

/// Shared Newton loop over a function returning `(f(x), f'(x))`.
fn newton_iterate<T, E>(
    config: &SolverConfig<T>,
    x0: T,
    eval: E,
) -> Result<RootResults<T>, SolverError>
where
    T: Float,
    E: Fn(T) -> (T, T),
{
    let mut x = x0;
    let epsilon = T::from(1e-30).unwrap_or_else(T::min_positive_value);

    for iteration in 0..config.max_iterations {
        let (f_val, f_prime_val) = eval(x);

        if f_val == T::zero() {
            return Ok(RootResults::converged(x, iteration, iteration + 1));
        }

        if f_prime_val.abs() < epsilon {
            return Err(SolverError::DerivativeNearZero {
                x: x.to_f64().unwrap_or(f64::NAN),
            });
        }

        let step = f_val / f_prime_val;
        x = x - step;

        if !x.is_finite() {
            return Err(SolverError::NumericalInstability(
                "Newton iteration produced non-finite value".to_string(),
            ));
        }

        if step.abs() < config.tolerance {
            return Ok(RootResults::converged(x, iteration + 1, iteration + 1));
        }
    }

    Err(SolverError::MaxIterationsExceeded {
        iterations: config.max_iterations,
    })
}

/// AD-enabled Newton-Raphson solver for f64.
#[cfg(feature = "num-dual-mode")]
impl NewtonRaphsonSolver<f64> {
    /// Find a root using automatic differentiation.
    ///
    /// The derivative is obtained by evaluating `f` on a dual number seeded
    /// with unit derivative.
    ///
    /// # Example
    ///
    /// ```
    /// use estimator_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    /// use num_dual::Dual64;
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// let f = |x: Dual64| x * x - Dual64::from(2.0);
    ///
    /// let root = solver.find_root_ad(f, 1.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn find_root_ad<F>(&self, f: F, x0: f64) -> Result<f64, SolverError>
    where
        F: Fn(num_dual::Dual64) -> num_dual::Dual64,
    {
        self.solve_ad(f, x0).map(|res| res.root)
    }

    /// Like [`NewtonRaphsonSolver::find_root_ad`], with diagnostics.
    pub fn solve_ad<F>(&self, f: F, x0: f64) -> Result<RootResults<f64>, SolverError>
    where
        F: Fn(num_dual::Dual64) -> num_dual::Dual64,
    {
        newton_iterate(&self.config, x0, |x| {
            let y = f(num_dual::Dual64::new(x, 1.0));
            (y.re, y.eps)
        })
    }
}
