//! Celestial coordinates.
//!
//! Peak tables always report ICRS right ascension and declination, so the
//! only frame transformation needed is galactic to ICRS.

use std::fmt;
use std::str::FromStr;

use super::error::MapError;

/// Rotation from ICRS to galactic cartesian coordinates (Hipparcos, J2000).
const ICRS_TO_GALACTIC: [[f64; 3]; 3] = [
    [-0.054_875_560_416_215_4, -0.873_437_090_234_885, -0.483_835_015_548_713_2],
    [0.494_109_427_875_583_7, -0.444_829_629_960_011_2, 0.746_982_244_497_218_9],
    [-0.867_666_149_019_004_7, -0.198_076_373_431_201_5, 0.455_983_776_175_066_9],
];

/// Celestial reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Frame {
    /// International Celestial Reference System (RA/Dec)
    #[default]
    Icrs,
    /// Galactic coordinates (l/b)
    Galactic,
}

impl FromStr for Frame {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "icrs" => Ok(Frame::Icrs),
            "galactic" => Ok(Frame::Galactic),
            _ => Err(MapError::InvalidGeometry(format!("unknown frame '{}'", s))),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Icrs => write!(f, "icrs"),
            Frame::Galactic => write!(f, "galactic"),
        }
    }
}

/// A sky position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkyCoord {
    /// Longitude in degrees, wrapped to [0, 360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Frame of `lon` and `lat`
    pub frame: Frame,
}

impl SkyCoord {
    /// Create a coordinate, wrapping the longitude to [0, 360).
    pub fn new(lon: f64, lat: f64, frame: Frame) -> Self {
        Self {
            lon: wrap_degrees(lon),
            lat,
            frame,
        }
    }

    /// Express the coordinate in ICRS.
    pub fn to_icrs(&self) -> SkyCoord {
        match self.frame {
            Frame::Icrs => *self,
            Frame::Galactic => {
                let g = unit_vector(self.lon, self.lat);
                let m = &ICRS_TO_GALACTIC;
                // transpose of the ICRS -> galactic rotation
                let r = [
                    m[0][0] * g[0] + m[1][0] * g[1] + m[2][0] * g[2],
                    m[0][1] * g[0] + m[1][1] * g[1] + m[2][1] * g[2],
                    m[0][2] * g[0] + m[1][2] * g[1] + m[2][2] * g[2],
                ];
                let (lon, lat) = spherical(r);
                SkyCoord::new(lon, lat, Frame::Icrs)
            }
        }
    }
}

fn unit_vector(lon: f64, lat: f64) -> [f64; 3] {
    let (lon, lat) = (lon.to_radians(), lat.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn spherical(r: [f64; 3]) -> (f64, f64) {
    let lon = r[1].atan2(r[0]).to_degrees();
    let lat = r[2].clamp(-1.0, 1.0).asin().to_degrees();
    (lon, lat)
}

/// Wrap an angle in degrees to [0, 360).
pub(crate) fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
