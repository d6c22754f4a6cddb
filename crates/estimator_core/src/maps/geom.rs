//! Spatial geometry: pixel grid plus world coordinate system.

use super::MapAxis;
use crate::types::{Frame, MapError, SkyCoord};

/// Pixel-to-world capability consumed by the peak finder.
///
/// Pixel indices are zero-based with `x` the column (fastest-varying) index
/// and `y` the row index; integer values address pixel centres.
pub trait WorldTransform {
    /// Shape of the data array, `[..., ny, nx]`.
    fn data_shape(&self) -> Vec<usize>;

    /// Sky position of pixel `(x, y)`, in degrees.
    fn pixel_to_world(&self, x: f64, y: f64) -> SkyCoord;

    /// Absolute pixel size along x and y, in degrees.
    fn pixel_scales(&self) -> (f64, f64);
}

/// Plate carree (CAR) sky geometry centred on `skydir`.
///
/// The reference pixel sits at the image centre, longitude increases to
/// the left (`cdelt1 = -binsz`) and latitude upwards (`cdelt2 = binsz`).
///
/// # Example
///
/// ```
/// use estimator_core::maps::{WcsGeom, WorldTransform};
///
/// let geom = WcsGeom::builder().npix(10, 5).binsz(0.1).build().unwrap();
/// let coord = geom.pixel_to_world(9.0, 0.0);
///
/// assert!((coord.lon - 359.55).abs() < 1e-9);
/// assert!((coord.lat + 0.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WcsGeom {
    npix: (usize, usize),
    binsz: f64,
    skydir: SkyCoord,
    axes: Vec<MapAxis>,
}

impl WcsGeom {
    /// Start building a geometry.
    pub fn builder() -> WcsGeomBuilder {
        WcsGeomBuilder::default()
    }

    /// Image size as `(nx, ny)`.
    pub fn npix(&self) -> (usize, usize) {
        self.npix
    }

    /// Pixel size in degrees.
    pub fn binsz(&self) -> f64 {
        self.binsz
    }

    /// Sky position of the image centre.
    pub fn skydir(&self) -> SkyCoord {
        self.skydir
    }

    /// Coordinate frame of the projection.
    pub fn frame(&self) -> Frame {
        self.skydir.frame
    }

    /// Non-spatial axes, in declaration order.
    pub fn axes(&self) -> &[MapAxis] {
        &self.axes
    }

    /// Reference pixel (one-based, FITS convention).
    fn crpix(&self) -> (f64, f64) {
        (
            (self.npix.0 as f64 + 1.0) / 2.0,
            (self.npix.1 as f64 + 1.0) / 2.0,
        )
    }
}

impl WorldTransform for WcsGeom {
    fn data_shape(&self) -> Vec<usize> {
        let mut shape: Vec<usize> = self.axes.iter().rev().map(MapAxis::nbin).collect();
        shape.push(self.npix.1);
        shape.push(self.npix.0);
        shape
    }

    fn pixel_to_world(&self, x: f64, y: f64) -> SkyCoord {
        let (crpix1, crpix2) = self.crpix();
        // native spherical coordinates (phi, theta) of the CAR plane
        let phi = (-self.binsz * (x + 1.0 - crpix1)).to_radians();
        let theta = (self.binsz * (y + 1.0 - crpix2)).to_radians();

        // rotate the native reference point (0, 0) onto skydir
        let (lon0, lat0) = (self.skydir.lon.to_radians(), self.skydir.lat.to_radians());
        let lat = (theta.sin() * lat0.cos() + theta.cos() * lat0.sin() * phi.cos())
            .clamp(-1.0, 1.0)
            .asin();
        let lon = lon0
            + std::f64::consts::PI
            + (-theta.cos() * phi.sin())
                .atan2(theta.sin() * lat0.sin() - theta.cos() * lat0.cos() * phi.cos());

        SkyCoord::new(lon.to_degrees(), lat.to_degrees(), self.skydir.frame)
    }

    fn pixel_scales(&self) -> (f64, f64) {
        (self.binsz, self.binsz)
    }
}

/// Builder for [`WcsGeom`].
///
/// Defaults: 1x1 pixels of 0.1 deg centred on (0, 0) ICRS, no extra axes.
#[derive(Debug, Clone)]
pub struct WcsGeomBuilder {
    npix: (usize, usize),
    binsz: f64,
    skydir: SkyCoord,
    axes: Vec<MapAxis>,
}

impl Default for WcsGeomBuilder {
    fn default() -> Self {
        Self {
            npix: (1, 1),
            binsz: 0.1,
            skydir: SkyCoord::new(0.0, 0.0, Frame::Icrs),
            axes: Vec::new(),
        }
    }
}

impl WcsGeomBuilder {
    /// Image size in pixels.
    pub fn npix(mut self, nx: usize, ny: usize) -> Self {
        self.npix = (nx, ny);
        self
    }

    /// Pixel size in degrees.
    pub fn binsz(mut self, binsz: f64) -> Self {
        self.binsz = binsz;
        self
    }

    /// Image centre.
    pub fn skydir(mut self, skydir: SkyCoord) -> Self {
        self.skydir = skydir;
        self
    }

    /// Append a non-spatial axis.
    pub fn axis(mut self, axis: MapAxis) -> Self {
        self.axes.push(axis);
        self
    }

    /// Validate and build the geometry.
    ///
    /// # Errors
    ///
    /// `MapError::InvalidGeometry` for an empty image, a non-positive pixel
    /// size, or a centre latitude outside [-90, 90].
    pub fn build(self) -> Result<WcsGeom, MapError> {
        if self.npix.0 == 0 || self.npix.1 == 0 {
            return Err(MapError::InvalidGeometry(format!(
                "npix must be positive, got {:?}",
                self.npix
            )));
        }
        if !(self.binsz > 0.0 && self.binsz.is_finite()) {
            return Err(MapError::InvalidGeometry(format!(
                "binsz must be positive, got {}",
                self.binsz
            )));
        }
        if !(self.skydir.lat.abs() <= 90.0) {
            return Err(MapError::InvalidGeometry(format!(
                "latitude {} outside [-90, 90]",
                self.skydir.lat
            )));
        }
        Ok(WcsGeom {
            npix: self.npix,
            binsz: self.binsz,
            skydir: self.skydir,
            axes: self.axes,
        })
    }
}
