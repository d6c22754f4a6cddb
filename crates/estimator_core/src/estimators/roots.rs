//! Scan-and-solve root finding over an interval.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use tracing::{debug, trace, warn};

use super::function::{central_difference, ScalarFunction};
use crate::math::solvers::{
    BisectionSolver, BrentSolver, NewtonRaphsonSolver, RidderSolver, RootResults, SecantSolver,
    SolverConfig,
};
use crate::types::{EstimatorError, Quantity, SolverError, Unit};

/// Root-finding algorithm applied to each sign-change bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum RootMethod {
    /// Interval bisection
    Bisect,
    /// Brent's method
    #[default]
    Brentq,
    /// Ridder's method
    Ridder,
    /// Secant iteration from the bracket endpoints
    Secant,
    /// Newton-Raphson from the lower bracket endpoint
    Newton,
}

impl RootMethod {
    /// Every supported method.
    pub const ALL: [RootMethod; 5] = [
        RootMethod::Bisect,
        RootMethod::Brentq,
        RootMethod::Ridder,
        RootMethod::Secant,
        RootMethod::Newton,
    ];

    /// Canonical method name.
    pub fn name(&self) -> &'static str {
        match self {
            RootMethod::Bisect => "bisect",
            RootMethod::Brentq => "brentq",
            RootMethod::Ridder => "ridder",
            RootMethod::Secant => "secant",
            RootMethod::Newton => "newton",
        }
    }

    /// Returns true for methods that stay inside the bracket.
    pub fn is_bracketing(&self) -> bool {
        matches!(
            self,
            RootMethod::Bisect | RootMethod::Brentq | RootMethod::Ridder
        )
    }
}

impl FromStr for RootMethod {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bisect" | "bisection" => Ok(RootMethod::Bisect),
            "brentq" => Ok(RootMethod::Brentq),
            "ridder" => Ok(RootMethod::Ridder),
            "secant" => Ok(RootMethod::Secant),
            "newton" => Ok(RootMethod::Newton),
            _ => Err(EstimatorError::UnknownSolver(s.to_string())),
        }
    }
}

impl TryFrom<String> for RootMethod {
    type Error = EstimatorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RootMethod> for String {
    fn from(method: RootMethod) -> Self {
        method.name().to_string()
    }
}

impl fmt::Display for RootMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Spacing of the scan points between the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PointsScale {
    /// Uniform in x
    #[default]
    Lin,
    /// Uniform in ln(x); bounds must be positive
    Log,
    /// Uniform in sqrt(x); bounds must be non-negative
    Sqrt,
}

impl PointsScale {
    fn forward(&self, x: f64) -> Result<f64, EstimatorError> {
        match self {
            PointsScale::Lin => Ok(x),
            PointsScale::Log if x > 0.0 => Ok(x.ln()),
            PointsScale::Sqrt if x >= 0.0 => Ok(x.sqrt()),
            _ => Err(EstimatorError::InvalidInput(format!(
                "bound {} outside the domain of the {} scale",
                x, self
            ))),
        }
    }

    fn inverse(&self, u: f64) -> f64 {
        match self {
            PointsScale::Lin => u,
            PointsScale::Log => u.exp(),
            PointsScale::Sqrt => u * u,
        }
    }
}

impl FromStr for PointsScale {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lin" => Ok(PointsScale::Lin),
            "log" => Ok(PointsScale::Log),
            "sqrt" => Ok(PointsScale::Sqrt),
            _ => Err(EstimatorError::InvalidInput(format!(
                "unknown points scale '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for PointsScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointsScale::Lin => write!(f, "lin"),
            PointsScale::Log => write!(f, "log"),
            PointsScale::Sqrt => write!(f, "sqrt"),
        }
    }
}

/// Options for [`find_roots`].
///
/// # Example
///
/// ```
/// use estimator_core::estimators::{FindRootsOptions, PointsScale, RootMethod};
///
/// let options = FindRootsOptions::default()
///     .with_method(RootMethod::Secant)
///     .with_nbin(50)
///     .with_points_scale(PointsScale::Log);
/// assert_eq!(options.method, RootMethod::Secant);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FindRootsOptions {
    /// Solver used in every bracket
    pub method: RootMethod,
    /// Number of scan intervals between the bounds
    pub nbin: usize,
    /// Spacing of the scan points
    pub points_scale: PointsScale,
    /// Explicit scan points (bound unit), replacing `nbin`/`points_scale`
    pub points: Option<Vec<f64>>,
    /// Per-bracket solver settings
    pub solver: SolverConfig<f64>,
}

impl Default for FindRootsOptions {
    fn default() -> Self {
        Self {
            method: RootMethod::default(),
            nbin: 100,
            points_scale: PointsScale::default(),
            points: None,
            solver: SolverConfig::default(),
        }
    }
}

impl FindRootsOptions {
    /// Set the method.
    pub fn with_method(mut self, method: RootMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the number of scan intervals.
    pub fn with_nbin(mut self, nbin: usize) -> Self {
        self.nbin = nbin;
        self
    }

    /// Set the scan spacing.
    pub fn with_points_scale(mut self, scale: PointsScale) -> Self {
        self.points_scale = scale;
        self
    }

    /// Scan exactly these points, in the given order.
    pub fn with_points(mut self, points: Vec<f64>) -> Self {
        self.points = Some(points);
        self
    }

    /// Set the solver configuration.
    pub fn with_solver(mut self, solver: SolverConfig<f64>) -> Self {
        self.solver = solver;
        self
    }

    /// Load options from TOML. Missing keys take their defaults.
    ///
    /// ```
    /// use estimator_core::estimators::{FindRootsOptions, RootMethod};
    ///
    /// let options = FindRootsOptions::from_toml_str(
    ///     r#"
    ///     method = "ridder"
    ///     nbin = 25
    ///
    ///     [solver]
    ///     tolerance = 1e-12
    ///     "#,
    /// )
    /// .unwrap();
    /// assert_eq!(options.method, RootMethod::Ridder);
    /// assert_eq!(options.nbin, 25);
    /// assert_eq!(options.solver.max_iterations, 100);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self, EstimatorError> {
        let options: Self = toml::from_str(s).map_err(|e| EstimatorError::Config(e.to_string()))?;
        options.solver.validate().map_err(EstimatorError::Config)?;
        Ok(options)
    }
}

/// Roots found by [`find_roots`], with the unit of the bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootSet {
    values: Vec<f64>,
    unit: Unit,
}

impl RootSet {
    /// Root values (NaN for failed brackets).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Unit of the values.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry `index` as a quantity.
    pub fn get(&self, index: usize) -> Option<Quantity> {
        self.values
            .get(index)
            .map(|&value| Quantity::new(value, self.unit.clone()))
    }

    /// Iterate over the bare values.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }
}

impl Index<usize> for RootSet {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

/// Find the roots of `f` between `lower_bound` and `upper_bound`.
///
/// The interval is sampled (see [`FindRootsOptions`]), and every pair of
/// adjacent samples whose function values have different signs is solved
/// with `options.method`. A bracket that fails to produce a root inside it
/// yields a NaN root with a failed [`RootResults`]. If no bracket is found
/// the result holds a single NaN entry.
///
/// A sample where `f` is exactly zero has its own sign, so it closes the
/// bracket on its left and opens the one on its right: that root is
/// reported twice. Roots between samples are reported once.
///
/// `upper_bound` is converted to the unit of `lower_bound`; `f` receives
/// bare values in that unit and the roots carry it.
///
/// # Errors
///
/// * `EstimatorError::Unit` - The bounds have incompatible units
/// * `EstimatorError::InvalidInput` - Non-finite bounds, `nbin == 0`, or
///   bounds outside the points scale's domain
/// * `EstimatorError::Config` - Invalid solver configuration
///
/// # Example
///
/// ```
/// use std::f64::consts::PI;
/// use estimator_core::estimators::{find_roots, FindRootsOptions};
/// use estimator_core::types::{Quantity, Unit};
///
/// let (roots, results) = find_roots(
///     &|x: f64| x.cos(),
///     Quantity::new(-3.0 * PI, Unit::rad()),
///     Quantity::new(0.0, Unit::rad()),
///     &FindRootsOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(roots.len(), 3);
/// assert_eq!(roots.unit(), &Unit::rad());
/// assert!((roots[2] + PI / 2.0).abs() < 1e-9);
/// assert!(results.iter().all(|r| r.converged));
/// ```
pub fn find_roots<F>(
    f: &F,
    lower_bound: impl Into<Quantity>,
    upper_bound: impl Into<Quantity>,
    options: &FindRootsOptions,
) -> Result<(RootSet, Vec<RootResults<f64>>), EstimatorError>
where
    F: ScalarFunction + ?Sized,
{
    let lower = lower_bound.into();
    let upper = upper_bound.into();
    let unit = lower.unit.clone();
    let (lo, hi) = (lower.value, upper.to_value(&unit)?);
    options.solver.validate().map_err(EstimatorError::Config)?;

    let x = scan_points(lo, hi, options)?;
    let fx: Vec<f64> = x.iter().map(|&xi| f.eval(xi)).collect();
    let brackets: Vec<(f64, f64)> = (1..x.len())
        .filter(|&i| changes_sign(fx[i - 1], fx[i]))
        .map(|i| (x[i - 1], x[i]))
        .collect();

    debug!(
        method = %options.method,
        points = x.len(),
        brackets = brackets.len(),
        "root scan finished"
    );

    if brackets.is_empty() {
        return Ok((
            RootSet {
                values: vec![f64::NAN],
                unit,
            },
            vec![RootResults::failed()],
        ));
    }

    let tol = options.solver.tolerance;
    let mut values = Vec::with_capacity(brackets.len());
    let mut results = Vec::with_capacity(brackets.len());

    for (a, b) in brackets {
        match solve_bracket(f, a, b, options.method, &options.solver) {
            Ok(res) if res.converged && a.min(b) - tol <= res.root && res.root <= a.max(b) + tol => {
                trace!(a, b, root = res.root, iterations = res.iterations, "bracket solved");
                values.push(res.root);
                results.push(res);
            }
            Ok(res) => {
                warn!(a, b, root = res.root, "root left its bracket");
                values.push(f64::NAN);
                results.push(RootResults::failed());
            }
            Err(err) => {
                warn!(a, b, error = %err, "bracket did not converge");
                values.push(f64::NAN);
                results.push(RootResults::failed());
            }
        }
    }

    Ok((RootSet { values, unit }, results))
}

/// [`find_roots`] with the method given by name.
///
/// The name is validated before the function is evaluated.
///
/// # Errors
///
/// `EstimatorError::UnknownSolver` for unsupported names, plus every error
/// of [`find_roots`].
///
/// ```
/// use estimator_core::estimators::find_roots_with_method;
///
/// let err = find_roots_with_method(&|x: f64| x.cos(), -1.0, 0.0, "xfail").unwrap_err();
/// assert_eq!(err.to_string(), "Unknown solver \"xfail\"");
/// ```
pub fn find_roots_with_method<F>(
    f: &F,
    lower_bound: impl Into<Quantity>,
    upper_bound: impl Into<Quantity>,
    method: &str,
) -> Result<(RootSet, Vec<RootResults<f64>>), EstimatorError>
where
    F: ScalarFunction + ?Sized,
{
    let method: RootMethod = method.parse()?;
    find_roots(
        f,
        lower_bound,
        upper_bound,
        &FindRootsOptions::default().with_method(method),
    )
}

fn scan_points(lo: f64, hi: f64, options: &FindRootsOptions) -> Result<Vec<f64>, EstimatorError> {
    if let Some(points) = &options.points {
        return Ok(points.clone());
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Err(EstimatorError::InvalidInput(format!(
            "bounds must be finite, got [{}, {}]",
            lo, hi
        )));
    }
    if options.nbin == 0 {
        return Err(EstimatorError::InvalidInput(
            "nbin must be > 0".to_string(),
        ));
    }

    let scale = options.points_scale;
    let (a, b) = (scale.forward(lo)?, scale.forward(hi)?);
    let n = options.nbin as f64;
    Ok((0..=options.nbin)
        .map(|i| {
            let t = i as f64 / n;
            scale.inverse(a * (1.0 - t) + b * t)
        })
        .collect())
}

/// Strict sign change; NaN never brackets, zero is its own sign.
fn changes_sign(f0: f64, f1: f64) -> bool {
    fn sign(v: f64) -> Option<i8> {
        if v > 0.0 {
            Some(1)
        } else if v < 0.0 {
            Some(-1)
        } else if v == 0.0 {
            Some(0)
        } else {
            None
        }
    }
    matches!((sign(f0), sign(f1)), (Some(s0), Some(s1)) if s0 != s1)
}

fn solve_bracket<F>(
    f: &F,
    a: f64,
    b: f64,
    method: RootMethod,
    config: &SolverConfig<f64>,
) -> Result<RootResults<f64>, SolverError>
where
    F: ScalarFunction + ?Sized,
{
    let eval = |x: f64| f.eval(x);
    match method {
        RootMethod::Bisect => BisectionSolver::new(*config).solve(eval, a, b),
        RootMethod::Brentq => BrentSolver::new(*config).solve(eval, a, b),
        RootMethod::Ridder => RidderSolver::new(*config).solve(eval, a, b),
        RootMethod::Secant => SecantSolver::new(*config).solve(eval, a, b),
        RootMethod::Newton => {
            let f_prime = |x: f64| {
                f.derivative(x)
                    .unwrap_or_else(|| central_difference(f, x))
            };
            NewtonRaphsonSolver::new(*config).solve(eval, f_prime, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_method_names_round_trip() {
        for method in RootMethod::ALL {
            assert_eq!(method.name().parse::<RootMethod>().unwrap(), method);
        }
        assert_eq!("bisection".parse::<RootMethod>().unwrap(), RootMethod::Bisect);
    }

    #[test]
    fn test_unknown_method() {
        assert_eq!(
            "xfail".parse::<RootMethod>(),
            Err(EstimatorError::UnknownSolver("xfail".to_string()))
        );
        assert!("Brentq".parse::<RootMethod>().is_err());
    }

    #[test]
    fn test_bracketing_methods() {
        assert!(RootMethod::Brentq.is_bracketing());
        assert!(!RootMethod::Secant.is_bracketing());
        assert!(!RootMethod::Newton.is_bracketing());
    }

    #[test]
    fn test_changes_sign() {
        assert!(changes_sign(-1.0, 2.0));
        assert!(changes_sign(0.0, 2.0));
        assert!(!changes_sign(1.0, 2.0));
        assert!(!changes_sign(f64::NAN, 2.0));
        assert!(!changes_sign(-1.0, f64::NAN));
        assert!(!changes_sign(0.0, 0.0));
    }

    #[test]
    fn test_linear_scan_points() {
        let options = FindRootsOptions::default().with_nbin(4);
        let x = scan_points(-2.0, 2.0, &options).unwrap();
        assert_eq!(x, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_log_scan_points() {
        let options = FindRootsOptions::default()
            .with_nbin(2)
            .with_points_scale(PointsScale::Log);
        let x = scan_points(1.0, 100.0, &options).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 10.0, epsilon = 1e-9);
        assert_relative_eq!(x[2], 100.0, epsilon = 1e-9);

        assert!(scan_points(0.0, 100.0, &options).is_err());
    }

    #[test]
    fn test_sqrt_scan_points() {
        let options = FindRootsOptions::default()
            .with_nbin(2)
            .with_points_scale(PointsScale::Sqrt);
        let x = scan_points(0.0, 16.0, &options).unwrap();
        assert_eq!(x, vec![0.0, 4.0, 16.0]);
        assert!(scan_points(-1.0, 16.0, &options).is_err());
    }

    #[test]
    fn test_scan_points_rejects_bad_input() {
        let options = FindRootsOptions::default().with_nbin(0);
        assert!(matches!(
            scan_points(0.0, 1.0, &options),
            Err(EstimatorError::InvalidInput(_))
        ));
        assert!(scan_points(f64::NAN, 1.0, &FindRootsOptions::default()).is_err());
    }

    #[test]
    fn test_explicit_points_used_verbatim() {
        let options = FindRootsOptions::default().with_points(vec![0.5, 1.5, 3.0]);
        assert_eq!(scan_points(-9.0, 9.0, &options).unwrap(), vec![0.5, 1.5, 3.0]);
    }

    #[test]
    fn test_newton_uses_finite_difference() {
        let f = |x: f64| x * x - 2.0;
        let res = solve_bracket(&f, 1.0, 2.0, RootMethod::Newton, &SolverConfig::default())
            .unwrap();
        assert_relative_eq!(res.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }
}
