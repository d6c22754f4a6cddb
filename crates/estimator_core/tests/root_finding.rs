//! Integration tests for `find_roots`.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use estimator_core::estimators::{
    find_roots, find_roots_with_method, Differentiable, FindRootsOptions, PointsScale, RootMethod,
};
use estimator_core::math::solvers::{RootFlag, SolverConfig};
use estimator_core::types::{EstimatorError, Quantity, Unit, UnitError};
use proptest::prelude::*;

/// Route solver diagnostics to the test output (`RUST_LOG=estimator_core=trace`).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn rad(value: f64) -> Quantity {
    Quantity::new(value, Unit::rad())
}

#[test]
fn test_cos_roots_all_methods() {
    init_tracing();
    for method in RootMethod::ALL {
        let options = FindRootsOptions::default().with_method(method);
        let (roots, results) = find_roots(&|x: f64| x.cos(), rad(-3.0 * PI), rad(0.0), &options)
            .unwrap_or_else(|e| panic!("{} failed: {}", method, e));

        assert_eq!(roots.unit(), &Unit::rad(), "{}", method);
        assert_eq!(roots.len(), 3, "{}", method);
        for (root, expected) in roots.iter().zip([-5.0, -3.0, -1.0]) {
            assert_relative_eq!(2.0 * root / PI, expected, epsilon = 1e-8);
        }
        assert!(results.iter().all(|r| r.converged), "{}", method);
        assert!(results.iter().all(|r| r.flag == RootFlag::Converged));
    }
}

#[test]
fn test_small_scale_function_all_methods() {
    let f = |x: f64| 1e-12 * (x - 0.365);
    for method in RootMethod::ALL {
        let options = FindRootsOptions::default().with_method(method);
        let (roots, results) = find_roots(&f, 0.0, 1.0, &options).unwrap();

        assert_eq!(roots.len(), 1, "{}", method);
        assert!(results[0].converged, "{}", method);
        assert!(
            (roots[0] - 0.365).abs() < 1e-9,
            "{} returned {}",
            method,
            roots[0]
        );
    }
}

#[test]
fn test_zero_on_grid_reported_per_bracket() {
    let (roots, results) =
        find_roots(&|x: f64| x, -1.0, 1.0, &FindRootsOptions::default()).unwrap();
    assert_eq!(roots.values(), &[0.0, 0.0]);
    assert!(results.iter().all(|r| r.converged));

    let options = FindRootsOptions::default().with_nbin(101);
    let (roots, _) = find_roots(&|x: f64| x, -1.0, 1.0, &options).unwrap();
    assert_eq!(roots.len(), 1);
    assert!(roots[0].abs() < 1e-10);
}

#[test]
fn test_no_sign_change_yields_single_nan() {
    let (roots, results) = find_roots(
        &|x: f64| x * x * x - 1.0,
        rad(-3.0 * PI),
        rad(0.0),
        &FindRootsOptions::default(),
    )
    .unwrap();

    assert_eq!(roots.len(), 1);
    assert!(roots[0].is_nan());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].iterations, 0);
    assert!(!results[0].converged);
    assert_eq!(results[0].flag, RootFlag::Failed);
}

#[test]
fn test_unknown_method_message() {
    let err = find_roots_with_method(&|x: f64| x.cos(), rad(-3.0 * PI), rad(0.0), "xfail")
        .unwrap_err();
    assert_eq!(err, EstimatorError::UnknownSolver("xfail".to_string()));
    assert_eq!(err.to_string(), "Unknown solver \"xfail\"");
}

#[test]
fn test_named_method() {
    let (roots, _) =
        find_roots_with_method(&|x: f64| x * x - 2.0, 0.0, 3.0, "ridder").unwrap();
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0], 2.0_f64.sqrt(), epsilon = 1e-9);
    assert_eq!(roots.unit(), &Unit::dimensionless());
}

#[test]
fn test_upper_bound_converted_to_lower_unit() {
    let (roots, _) = find_roots(
        &|x: f64| (x.to_radians()).sin(),
        Quantity::new(90.0, "deg"),
        Quantity::new(1.5 * PI, "rad"),
        &FindRootsOptions::default(),
    )
    .unwrap();

    assert_eq!(roots.unit().symbol(), "deg");
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0], 180.0, epsilon = 1e-7);
    assert_relative_eq!(
        roots.get(0).unwrap().to_value(&Unit::rad()).unwrap(),
        PI,
        epsilon = 1e-9
    );
}

#[test]
fn test_incompatible_bounds_rejected() {
    let err = find_roots(
        &|x: f64| x.cos(),
        rad(0.0),
        Quantity::new(1.0, "s"),
        &FindRootsOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EstimatorError::Unit(UnitError::Incompatible { .. })
    ));

    let err = find_roots(&|x: f64| x.cos(), rad(0.0), 1.0, &FindRootsOptions::default());
    assert!(err.is_err());
}

#[test]
fn test_log_scale_scan() {
    let options = FindRootsOptions::default()
        .with_nbin(40)
        .with_points_scale(PointsScale::Log);
    let (roots, _) = find_roots(&|x: f64| x.ln() - 3.0, 1.0, 1e4, &options).unwrap();
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0], 3.0_f64.exp(), epsilon = 1e-8);

    let err = find_roots(&|x: f64| x.ln(), 0.0, 10.0, &options).unwrap_err();
    assert!(matches!(err, EstimatorError::InvalidInput(_)));
}

#[test]
fn test_reversed_bounds() {
    let (roots, _) = find_roots(
        &|x: f64| x.cos(),
        rad(0.0),
        rad(-3.0 * PI),
        &FindRootsOptions::default(),
    )
    .unwrap();
    let scaled: Vec<f64> = roots.iter().map(|r| (2.0 * r / PI).round()).collect();
    assert_eq!(scaled, vec![-1.0, -3.0, -5.0]);
}

#[test]
fn test_nan_samples_are_skipped() {
    let f = |x: f64| if x < 0.0 { f64::NAN } else { x - 0.5 };
    let options = FindRootsOptions::default().with_nbin(10);
    let (roots, _) = find_roots(&f, -1.0, 1.0, &options).unwrap();
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0], 0.5, epsilon = 1e-9);
}

#[test]
fn test_failed_bracket_keeps_position() {
    init_tracing();
    let options = FindRootsOptions::default()
        .with_method(RootMethod::Bisect)
        .with_solver(SolverConfig::new(1e-14, 3));
    let (roots, results) = find_roots(&|x: f64| x.cos(), rad(-3.0 * PI), rad(0.0), &options)
        .unwrap();

    assert_eq!(roots.len(), 3);
    assert!(roots.iter().all(|r| r.is_nan()));
    assert!(results.iter().all(|r| r.flag == RootFlag::Failed));
}

#[test]
fn test_newton_with_explicit_derivative() {
    let f = Differentiable::new(|x: f64| x * x * x - 8.0, |x: f64| 3.0 * x * x);
    let options = FindRootsOptions::default().with_method(RootMethod::Newton);
    let (roots, results) = find_roots(&f, 0.5, 5.0, &options).unwrap();
    assert_eq!(roots.len(), 1);
    assert_relative_eq!(roots[0], 2.0, epsilon = 1e-9);
    assert!(results[0].converged);
}

#[cfg(feature = "num-dual-mode")]
#[test]
fn test_newton_with_dual_function() {
    use estimator_core::estimators::DualFunction;
    use num_dual::{Dual64, DualNum};

    let f = DualFunction::new(|x: Dual64| x.sin());
    let options = FindRootsOptions::default().with_method(RootMethod::Newton);
    let (roots, _) = find_roots(&f, rad(2.0), rad(4.0), &options).unwrap();
    assert_relative_eq!(roots[0], PI, epsilon = 1e-10);
}

#[cfg(feature = "serde")]
#[test]
fn test_options_from_toml() {
    let options = FindRootsOptions::from_toml_str(
        r#"
        method = "secant"
        points_scale = "sqrt"

        [solver]
        max_iterations = 50
        "#,
    )
    .unwrap();
    assert_eq!(options.method, RootMethod::Secant);
    assert_eq!(options.points_scale, PointsScale::Sqrt);
    assert_eq!(options.nbin, 100);
    assert_eq!(options.solver.max_iterations, 50);
    assert_eq!(options.solver.tolerance, 1e-10);

    let err = FindRootsOptions::from_toml_str("method = \"xfail\"").unwrap_err();
    match err {
        EstimatorError::Config(msg) => assert!(msg.contains("Unknown solver \"xfail\"")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    let err = FindRootsOptions::from_toml_str("[solver]\ntolerance = -1.0").unwrap_err();
    assert!(matches!(err, EstimatorError::Config(_)));
}

proptest! {
    #[test]
    fn prop_linear_root_found(root in -50.0f64..50.0, slope in 0.5f64..10.0) {
        let f = move |x: f64| slope * (x - root);
        let (roots, results) =
            find_roots(&f, -100.0, 100.0, &FindRootsOptions::default()).unwrap();
        // a root sitting exactly on a sample is reported for both brackets
        prop_assert!(!roots.is_empty() && roots.len() <= 2);
        prop_assert!(results.iter().all(|r| r.converged));
        for &r in roots.iter() {
            prop_assert!((r - root).abs() < 1e-8);
        }
    }

    #[test]
    fn prop_roots_within_bounds(a in -10.0f64..0.0, b in 0.1f64..10.0, shift in -3.0f64..3.0) {
        let f = move |x: f64| (x - shift).sin();
        let (roots, _) = find_roots(&f, a, b, &FindRootsOptions::default()).unwrap();
        for &r in roots.iter().filter(|r| !r.is_nan()) {
            prop_assert!(r >= a - 1e-9 && r <= b + 1e-9);
            prop_assert!((r - shift).sin().abs() < 1e-8);
        }
    }
}
