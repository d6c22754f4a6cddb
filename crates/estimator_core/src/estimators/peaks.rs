//! Local-maximum detection on sky maps.

use std::ops::Index;

use ndarray::{s, Array3, ArrayView2};
use tracing::debug;

use crate::maps::{SkyMap, WorldTransform};
use crate::types::{EstimatorError, Quantity, Unit, UnitError};

/// Minimum separation between a peak and any cell that can suppress it.
///
/// The neighbourhood of a pixel is the square of half-width `min_distance`
/// pixels around it, clipped to the image.
#[derive(Debug, Clone, PartialEq)]
pub enum MinDistance {
    /// Half-width in pixels.
    Pixels(usize),
    /// Angular half-width, converted with the map pixel size.
    Angle(Quantity),
}

impl Default for MinDistance {
    fn default() -> Self {
        MinDistance::Pixels(1)
    }
}

impl From<usize> for MinDistance {
    fn from(pixels: usize) -> Self {
        MinDistance::Pixels(pixels)
    }
}

impl From<Quantity> for MinDistance {
    fn from(angle: Quantity) -> Self {
        MinDistance::Angle(angle)
    }
}

impl MinDistance {
    /// Half-width in pixels, at least 1.
    ///
    /// Angles are divided by the pixel scale along each axis and the
    /// rounded mean is used.
    pub fn to_pixels(&self, pixel_scales: (f64, f64)) -> Result<usize, UnitError> {
        let pixels = match self {
            MinDistance::Pixels(n) => *n,
            MinDistance::Angle(angle) => {
                if !angle.unit.is_angular() {
                    return Err(UnitError::NotAngular(angle.unit.symbol().to_string()));
                }
                let deg = angle.to_value(&Unit::deg())?;
                let mean = 0.5 * (deg / pixel_scales.0 + deg / pixel_scales.1);
                let rounded = mean.round();
                if rounded.is_finite() && rounded > 0.0 {
                    rounded as usize
                } else {
                    0
                }
            }
        };
        Ok(pixels.max(1))
    }
}

/// One detected peak.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakRecord {
    /// Cell value, in the table's `value_unit`
    pub value: f64,
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
    /// Indices along the non-spatial axes (data order), empty for 2D maps
    pub batch: Vec<usize>,
    /// ICRS right ascension in degrees
    pub ra: f64,
    /// ICRS declination in degrees
    pub dec: f64,
}

/// Peaks sorted by descending value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakTable {
    records: Vec<PeakRecord>,
    value_unit: Unit,
    coord_unit: Unit,
}

impl PeakTable {
    fn new(mut records: Vec<PeakRecord>, value_unit: Unit) -> Self {
        records.sort_by(|a, b| b.value.total_cmp(&a.value));
        Self {
            records,
            value_unit,
            coord_unit: Unit::deg(),
        }
    }

    /// Number of peaks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no peak was found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Peak at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&PeakRecord> {
        self.records.get(index)
    }

    /// Iterate over peaks in descending value order.
    pub fn iter(&self) -> std::slice::Iter<'_, PeakRecord> {
        self.records.iter()
    }

    /// Unit of `PeakRecord::value` (the map unit).
    pub fn value_unit(&self) -> &Unit {
        &self.value_unit
    }

    /// Unit of `PeakRecord::ra` and `PeakRecord::dec`.
    pub fn coord_unit(&self) -> &Unit {
        &self.coord_unit
    }

    /// Value of a peak as a quantity.
    pub fn value(&self, index: usize) -> Option<Quantity> {
        self.get(index)
            .map(|record| Quantity::new(record.value, self.value_unit.clone()))
    }

    /// Consume the table, returning its records.
    pub fn into_records(self) -> Vec<PeakRecord> {
        self.records
    }
}

impl Index<usize> for PeakTable {
    type Output = PeakRecord;

    fn index(&self, index: usize) -> &PeakRecord {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a PeakTable {
    type Item = &'a PeakRecord;
    type IntoIter = std::slice::Iter<'a, PeakRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Find local maxima above `threshold`.
///
/// A pixel is a peak when it is not NaN, strictly exceeds `threshold`, and
/// strictly exceeds every non-NaN cell of its neighbourhood (see
/// [`MinDistance`]). A neighbourhood wider than the image covers the whole
/// image. Leading non-spatial dimensions are scanned as independent images.
/// Images whose non-NaN cells all share one value have no peaks.
///
/// # Errors
///
/// Unit errors when an angular `min_distance` is not an angle.
///
/// # Example
///
/// ```
/// use estimator_core::estimators::{find_peaks, MinDistance};
/// use estimator_core::maps::{SkyMap, WcsGeom};
///
/// let geom = WcsGeom::builder().npix(10, 5).build().unwrap();
/// let mut map = SkyMap::create(geom, "s");
/// map.data_mut()[[3, 5]] = 12.0;
/// map.data_mut()[[0, 9]] = 1e20;
///
/// let table = find_peaks(&map, 3.0, MinDistance::default()).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!((table[0].x, table[0].y), (9, 0));
/// assert_eq!(table.value_unit(), &"s");
/// ```
pub fn find_peaks<G>(
    map: &SkyMap<G>,
    threshold: f64,
    min_distance: MinDistance,
) -> Result<PeakTable, EstimatorError>
where
    G: WorldTransform,
{
    let geom = map.geom();
    let half_width = min_distance.to_pixels(geom.pixel_scales())?;

    let data = map.data();
    let shape = data.shape();
    let ndim = shape.len();
    if ndim < 2 {
        return Err(EstimatorError::InvalidInput(format!(
            "map data must have at least two dimensions, got {}",
            ndim
        )));
    }
    let (ny, nx) = (shape[ndim - 2], shape[ndim - 1]);
    let leading = shape[..ndim - 2].to_vec();
    let n_batches: usize = leading.iter().product();

    // logical (row-major) order regardless of memory layout
    let cube = Array3::from_shape_vec((n_batches, ny, nx), data.iter().copied().collect())
        .map_err(|e| EstimatorError::InvalidInput(e.to_string()))?;

    let mut records = Vec::new();
    for (batch, image) in cube.outer_iter().enumerate() {
        let batch_index = unravel(batch, &leading);
        for (y, x, value) in local_maxima(image, threshold, half_width) {
            let coord = geom.pixel_to_world(x as f64, y as f64).to_icrs();
            records.push(PeakRecord {
                value,
                x,
                y,
                batch: batch_index.clone(),
                ra: coord.lon,
                dec: coord.lat,
            });
        }
    }

    debug!(
        images = n_batches,
        threshold,
        half_width,
        peaks = records.len(),
        "peak search finished"
    );

    Ok(PeakTable::new(records, map.unit().clone()))
}

/// Strict local maxima of one image as `(row, col, value)`.
fn local_maxima(
    image: ArrayView2<'_, f64>,
    threshold: f64,
    half_width: usize,
) -> Vec<(usize, usize, f64)> {
    let (ny, nx) = image.dim();
    if ny == 0 || nx == 0 {
        return Vec::new();
    }

    // constant over the non-NaN cells
    let mut finite = image.iter().filter(|v| !v.is_nan());
    match finite.next() {
        Some(&first) if finite.any(|&v| v != first) => {}
        _ => return Vec::new(),
    }

    let mut peaks = Vec::new();
    for ((row, col), &value) in image.indexed_iter() {
        // also rejects NaN
        if !(value > threshold) {
            continue;
        }

        let (r0, c0) = (row.saturating_sub(half_width), col.saturating_sub(half_width));
        let r1 = row.saturating_add(half_width).saturating_add(1).min(ny);
        let c1 = col.saturating_add(half_width).saturating_add(1).min(nx);
        let window = image.slice(s![r0..r1, c0..c1]);

        let is_peak = window.indexed_iter().all(|((r, c), &neighbour)| {
            (r0 + r == row && c0 + c == col) || neighbour.is_nan() || neighbour < value
        });
        if is_peak {
            peaks.push((row, col, value));
        }
    }
    peaks
}

/// Row-major multi-index of `flat` within `shape`.
fn unravel(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (slot, &dim) in index.iter_mut().zip(shape).rev() {
        *slot = flat % dim;
        flat /= dim;
    }
    index
}
