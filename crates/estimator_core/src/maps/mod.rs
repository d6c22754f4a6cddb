//! Minimal sky-map layer consumed by the estimators.
//!
//! - [`MapAxis`]: binned non-spatial axis
//! - [`WcsGeom`]: plate carree pixel grid with world coordinates
//! - [`WorldTransform`]: the pixel-to-world capability the peak finder needs
//! - [`SkyMap`]: geometry, N-dimensional data and a physical unit

mod axis;
mod geom;
mod map;

pub use axis::MapAxis;
pub use geom::{WcsGeom, WcsGeomBuilder, WorldTransform};
pub use map::SkyMap;
