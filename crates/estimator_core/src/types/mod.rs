//! Core unit, coordinate, and error types.
//!
//! This module provides:
//! - `units`: Physical units and unit-carrying quantities
//! - `coords`: Sky coordinates and reference frames
//! - `dual`: Dual number type integration with num-dual for automatic differentiation (when `num-dual-mode` feature is enabled)
//! - `error`: Structured error types for unit, map, solver, and estimator operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Unit`], [`Quantity`], [`PhysicalType`] from `units`
//! - [`SkyCoord`], [`Frame`] from `coords`
//! - [`UnitError`], [`MapError`], [`SolverError`], [`EstimatorError`] from `error`

pub mod coords;
#[cfg(feature = "num-dual-mode")]
pub mod dual;
pub mod error;
pub mod units;

// Re-export commonly used types at module level
pub use coords::{Frame, SkyCoord};
pub use error::{EstimatorError, MapError, SolverError, UnitError};
pub use units::{PhysicalType, Quantity, Unit};
