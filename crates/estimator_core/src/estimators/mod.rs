//! Estimator utilities.
//!
//! - [`find_peaks`]: local maxima of a sky map, reported in ICRS
//! - [`find_roots`]: every root of a scalar function inside an interval
//!
//! Both operations are stateless; the inputs are only read.

mod function;
mod peaks;
mod roots;

#[cfg(feature = "num-dual-mode")]
pub use function::DualFunction;
pub use function::{Differentiable, ScalarFunction};
pub use peaks::{find_peaks, MinDistance, PeakRecord, PeakTable};
pub use roots::{
    find_roots, find_roots_with_method, FindRootsOptions, PointsScale, RootMethod, RootSet,
};
