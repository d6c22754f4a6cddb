//! Sky maps: geometry + data + unit.

use ndarray::{ArrayD, IxDyn};

use super::{WcsGeom, WorldTransform};
use crate::types::{MapError, Unit};

/// An N-dimensional sky map.
///
/// Data is indexed `[..., y, x]`; NaN marks missing cells.
///
/// # Example
///
/// ```
/// use estimator_core::maps::{SkyMap, WcsGeom};
///
/// let geom = WcsGeom::builder().npix(10, 5).build().unwrap();
/// let mut map = SkyMap::create(geom, "s");
///
/// map.data_mut()[[3, 5]] = 12.0;
/// assert_eq!(map.data().shape(), &[5, 10]);
/// assert_eq!(map.unit(), &"s");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SkyMap<G = WcsGeom> {
    geom: G,
    data: ArrayD<f64>,
    unit: Unit,
}

impl<G: WorldTransform> SkyMap<G> {
    /// Zero-filled map over `geom`.
    pub fn create(geom: G, unit: impl Into<Unit>) -> Self {
        let data = ArrayD::zeros(IxDyn(&geom.data_shape()));
        Self {
            geom,
            data,
            unit: unit.into(),
        }
    }

    /// Map over `geom` with existing data.
    ///
    /// # Errors
    ///
    /// `MapError::ShapeMismatch` when `data` does not have the geometry's
    /// shape.
    pub fn from_geom_data(
        geom: G,
        data: ArrayD<f64>,
        unit: impl Into<Unit>,
    ) -> Result<Self, MapError> {
        let expected = geom.data_shape();
        if data.shape() != expected.as_slice() {
            return Err(MapError::ShapeMismatch {
                expected,
                found: data.shape().to_vec(),
            });
        }
        Ok(Self {
            geom,
            data,
            unit: unit.into(),
        })
    }

    /// Map geometry.
    pub fn geom(&self) -> &G {
        &self.geom
    }

    /// Cell values.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Mutable cell values. The shape cannot be changed through this view.
    pub fn data_mut(&mut self) -> &mut ArrayD<f64> {
        &mut self.data
    }

    /// Unit of the cell values.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::MapAxis;

    #[test]
    fn test_create_is_zero_filled() {
        let geom = WcsGeom::builder().npix(4, 3).build().unwrap();
        let map = SkyMap::create(geom, "");
        assert_eq!(map.data().shape(), &[3, 4]);
        assert!(map.data().iter().all(|&v| v == 0.0));
        assert_eq!(map.unit(), &Unit::dimensionless());
    }

    #[test]
    fn test_create_with_axes() {
        let geom = WcsGeom::builder()
            .npix(4, 3)
            .axis(MapAxis::from_edges(vec![1.0, 2.0, 4.0], "energy").unwrap())
            .build()
            .unwrap();
        let map = SkyMap::create(geom, "cm-2 s-1");
        assert_eq!(map.data().shape(), &[2, 3, 4]);
        assert_eq!(map.unit().symbol(), "cm-2 s-1");
    }

    #[test]
    fn test_from_geom_data_checks_shape() {
        let geom = WcsGeom::builder().npix(4, 3).build().unwrap();

        let ok = SkyMap::from_geom_data(geom.clone(), ArrayD::zeros(IxDyn(&[3, 4])), "s");
        assert!(ok.is_ok());

        match SkyMap::from_geom_data(geom, ArrayD::zeros(IxDyn(&[4, 3])), "s") {
            Err(MapError::ShapeMismatch { expected, found }) => {
                assert_eq!(expected, vec![3, 4]);
                assert_eq!(found, vec![4, 3]);
            }
            other => panic!("Expected ShapeMismatch, got {:?}", other),
        }
    }
}
