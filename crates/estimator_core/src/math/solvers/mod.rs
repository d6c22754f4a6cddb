//! Scalar root-finding solvers.
//!
//! These are the per-bracket engines behind
//! [`find_roots`](crate::estimators::find_roots), each usable on its own.
//!
//! ## Available Solvers
//!
//! ### Bracketing
//!
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//! - [`BisectionSolver`]: Interval halving, slow but unconditional
//! - [`RidderSolver`]: Exponential-fit bracketing with quadratic convergence
//!
//! ### Open
//!
//! - [`SecantSolver`]: Finite-difference Newton steps from two starting points
//! - [`NewtonRaphsonSolver`]: Quadratic convergence using derivatives
//!
//! ## Configuration
//!
//! All solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! Every solver offers `find_root` returning the bare root and `solve`
//! returning [`RootResults`] diagnostics.
//!
//! ## AD Compatibility
//!
//! With the `num-dual-mode` feature, the Newton-Raphson solver provides
//! `find_root_ad`, which computes derivatives using `Dual64`.
//!
//! ## Example
//!
//! ```
//! use estimator_core::math::solvers::{BrentSolver, SecantSolver, SolverConfig};
//!
//! let f = |x: f64| x.cos();
//!
//! let brent = BrentSolver::new(SolverConfig::default());
//! let secant = SecantSolver::new(SolverConfig::default());
//!
//! let a = brent.find_root(f, 1.0, 2.0).unwrap();
//! let b = secant.find_root(f, 1.0, 2.0).unwrap();
//! assert!((a - b).abs() < 1e-9);
//! ```

mod bisection;
mod brent;
mod config;
mod newton_raphson;
mod results;
mod ridder;
mod secant;

// Re-export public types at module level
pub use bisection::BisectionSolver;
pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
pub use results::{RootFlag, RootResults};
pub use ridder::RidderSolver;
pub use secant::SecantSolver;
