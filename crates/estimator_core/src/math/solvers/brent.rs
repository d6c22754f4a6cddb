//! Brent's method root-finding solver.

use super::{RootResults, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder (`brentq`).
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to
/// converge for continuous functions with a valid bracket.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Algorithm
///
/// Brent's method switches between:
/// - **Bisection**: Guaranteed progress, slower convergence
/// - **Secant method**: Faster convergence using linear approximation
/// - **Inverse quadratic interpolation**: Even faster when applicable
///
/// The method falls back to bisection when other methods would be unreliable.
///
/// # Example
///
/// ```
/// use estimator_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve cos(x) = 0 in bracket [1, 2]
/// let root = solver.find_root(|x: f64| x.cos(), 1.0, 2.0).unwrap();
/// assert!((root - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// Requires that `f(a)` and `f(b)` have opposite signs (a valid bracket).
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root, once the bracket half-width is below `tolerance / 2` plus a relative term
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        self.solve(f, a, b).map(|res| res.root)
    }

    /// Like [`BrentSolver::find_root`], also reporting iteration and
    /// evaluation counts.
    pub fn solve<F>(&self, f: F, a: T, b: T) -> Result<RootResults<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);
        let mut calls = 2;

        // NaN endpoints are rejected along with same-sign ones
        if !(fa * fb <= T::zero()) {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        // Ensure |f(a)| >= |f(b)|
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        let two = T::one() + T::one();
        let three = two + T::one();
        let tol = self.config.tolerance;

        for iteration in 0..self.config.max_iterations {
            // interval test only; |f| says nothing about distance to the root
            let tol1 = two * T::epsilon() * b.abs() + tol / two;
            let m = (c - b) / two;
            if fb == T::zero() || m.abs() <= tol1 {
                return Ok(RootResults::converged(b, iteration, calls));
            }

            let use_bisection;

            if fa != fc && fb != fc {
                // Inverse quadratic interpolation
                let r = fb / fc;
                let s = fb / fa;
                let t = fa / fc;

                let p = s * (t * (r - t) * (c - b) - (T::one() - r) * (b - a));
                let q = (t - T::one()) * (r - T::one()) * (s - T::one());

                if p.abs() < (three * m * q).abs() / two && p.abs() < (e * q).abs() / two {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                } else {
                    use_bisection = true;
                }
            } else if fb != fa {
                // Secant step
                let s = fb / fa;
                let p = two * m * s;
                let q = T::one() - s;

                if p.abs() < (three * m * q).abs() / two && p.abs() < (e * q).abs() / two {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                } else {
                    use_bisection = true;
                }
            } else {
                use_bisection = true;
            }

            if use_bisection {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;

            if d.abs() > tol1 {
                b = b + d;
            } else {
                b = b + if m > T::zero() { tol1 } else { -tol1 };
            }

            fb = f(b);
            calls += 1;

            // Keep f(b) and f(c) of opposite sign
            if (fb > T::zero() && fc > T::zero()) || (fb < T::zero() && fc < T::zero()) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
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
