//! Scalar functions accepted by the root finder.

/// A real function of one real variable.
///
/// Any `Fn(f64) -> f64` implements this trait. Wrap a closure in
/// [`Differentiable`] (explicit derivative) or `DualFunction` (automatic
/// derivative, `num-dual-mode` feature) to let the `newton` method use an
/// exact derivative instead of a finite difference.
pub trait ScalarFunction {
    /// Evaluate the function.
    fn eval(&self, x: f64) -> f64;

    /// Derivative at `x`, if the function knows it.
    fn derivative(&self, _x: f64) -> Option<f64> {
        None
    }
}

impl<F> ScalarFunction for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A function paired with its explicit derivative.
///
/// # Example
///
/// ```
/// use estimator_core::estimators::{Differentiable, ScalarFunction};
///
/// let f = Differentiable::new(|x: f64| x.cos(), |x: f64| -x.sin());
/// assert_eq!(f.eval(0.0), 1.0);
/// assert_eq!(f.derivative(0.0), Some(-0.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Differentiable<F, G> {
    f: F,
    f_prime: G,
}

impl<F, G> Differentiable<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    /// Pair `f` with `f_prime`.
    pub fn new(f: F, f_prime: G) -> Self {
        Self { f, f_prime }
    }
}

impl<F, G> ScalarFunction for Differentiable<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        (self.f)(x)
    }

    fn derivative(&self, x: f64) -> Option<f64> {
        Some((self.f_prime)(x))
    }
}

/// A function written over dual numbers, differentiated automatically.
///
/// # Example
///
/// ```
/// use estimator_core::estimators::{DualFunction, ScalarFunction};
/// use num_dual::{Dual64, DualNum};
///
/// let f = DualFunction::new(|x: Dual64| x.cos());
/// assert_eq!(f.eval(0.0), 1.0);
/// assert!((f.derivative(1.0).unwrap() + 1.0_f64.sin()).abs() < 1e-15);
/// ```
#[cfg(feature = "num-dual-mode")]
#[derive(Debug, Clone, Copy)]
pub struct DualFunction<F> {
    f: F,
}

#[cfg(feature = "num-dual-mode")]
impl<F> DualFunction<F>
where
    F: Fn(num_dual::Dual64) -> num_dual::Dual64,
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[cfg(feature = "num-dual-mode")]
impl<F> ScalarFunction for DualFunction<F>
where
    F: Fn(num_dual::Dual64) -> num_dual::Dual64,
{
    fn eval(&self, x: f64) -> f64 {
        (self.f)(num_dual::Dual64::from(x)).re
    }

    fn derivative(&self, x: f64) -> Option<f64> {
        Some((self.f)(num_dual::Dual64::new(x, 1.0)).eps)
    }
}

/// Central finite-difference derivative.
pub(crate) fn central_difference<F: ScalarFunction + ?Sized>(f: &F, x: f64) -> f64 {
    let h = f64::EPSILON.cbrt() * x.abs().max(1.0);
    (f.eval(x + h) - f.eval(x - h)) / (2.0 * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closure_has_no_derivative() {
        let f = |x: f64| x * x;
        assert_eq!(f.eval(3.0), 9.0);
        assert_eq!(ScalarFunction::derivative(&f, 3.0), None);
    }

    #[test]
    fn test_fn_pointer_is_scalar_function() {
        let f: fn(f64) -> f64 = f64::cos;
        assert_eq!(f.eval(0.0), 1.0);
    }

    #[test]
    fn test_differentiable() {
        let f = Differentiable::new(|x: f64| x * x * x, |x: f64| 3.0 * x * x);
        assert_eq!(f.eval(2.0), 8.0);
        assert_eq!(f.derivative(2.0), Some(12.0));
    }

    #[test]
    fn test_central_difference() {
        let f = |x: f64| x.sin();
        assert_relative_eq!(central_difference(&f, 0.3), 0.3_f64.cos(), epsilon = 1e-9);
        assert_relative_eq!(central_difference(&f, 100.0), 100.0_f64.cos(), epsilon = 1e-7);
    }

    #[cfg(feature = "num-dual-mode")]
    #[test]
    fn test_dual_function_derivative() {
        use num_dual::Dual64;

        let f = DualFunction::new(|x: Dual64| x * x * x - Dual64::from(1.0));
        assert_eq!(f.eval(2.0), 7.0);
        assert_relative_eq!(f.derivative(2.0).unwrap(), 12.0, epsilon = 1e-12);
    }
}
