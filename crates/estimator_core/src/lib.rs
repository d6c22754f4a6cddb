//! # estimator_core: Peak and Root Finding for Gamma-Ray Sky Maps
//!
//! Two small building blocks used by flux, excess and sensitivity
//! estimators:
//!
//! - [`estimators::find_peaks`]: local maxima above a threshold on a 2D or
//!   batched sky map, returned as a table sorted by descending value with
//!   ICRS positions
//! - [`estimators::find_roots`]: scan an interval for sign changes and solve
//!   each bracket with a selectable method (`brentq`, `bisect`, `ridder`,
//!   `secant`, `newton`)
//!
//! Supporting layers:
//!
//! - `math::solvers`: generic one-dimensional solvers over `num_traits::Float`
//! - `maps`: a minimal plate carree map geometry over `ndarray` data
//! - `types`: units, quantities, sky coordinates and error types
//!
//! ## Usage Examples
//!
//! ```rust
//! use std::f64::consts::PI;
//! use estimator_core::estimators::{find_peaks, find_roots, FindRootsOptions, MinDistance};
//! use estimator_core::maps::{SkyMap, WcsGeom};
//! use estimator_core::types::{Quantity, Unit};
//!
//! // Peaks
//! let geom = WcsGeom::builder().npix(10, 5).build().unwrap();
//! let mut map = SkyMap::create(geom, "s");
//! map.data_mut()[[3, 5]] = 12.0;
//! let peaks = find_peaks(&map, 3.0, MinDistance::default()).unwrap();
//! assert_eq!(peaks.len(), 1);
//!
//! // Roots
//! let (roots, _) = find_roots(
//!     &|x: f64| x.cos(),
//!     Quantity::new(-3.0 * PI, Unit::rad()),
//!     Quantity::new(0.0, Unit::rad()),
//!     &FindRootsOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(roots.len(), 3);
//! ```
//!
//! ## Logging
//!
//! Diagnostics are emitted through `tracing` (`debug` per call, `trace` per
//! solved bracket, `warn` per failed bracket). Install any subscriber to
//! see them.
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): dual-number functions and exact derivatives for `newton`
//! - `serde` (default): serialisation of results and TOML loading of `FindRootsOptions`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod estimators;
pub mod maps;
pub mod math;
pub mod types;
