//! Non-spatial map axes (energy, time, ...).

use crate::types::MapError;

/// A binned non-spatial axis.
///
/// # Example
///
/// ```
/// use estimator_core::maps::MapAxis;
///
/// let axis = MapAxis::from_edges(vec![1.0, 10.0, 100.0], "energy").unwrap();
/// assert_eq!(axis.nbin(), 2);
/// assert_eq!(axis.name(), "energy");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapAxis {
    name: String,
    edges: Vec<f64>,
}

impl MapAxis {
    /// Create an axis from strictly increasing bin edges.
    ///
    /// # Errors
    ///
    /// `MapError::InvalidAxis` for fewer than two edges or edges that are
    /// not finite and strictly increasing.
    pub fn from_edges(edges: Vec<f64>, name: impl Into<String>) -> Result<Self, MapError> {
        let name = name.into();
        if edges.len() < 2 {
            return Err(MapError::InvalidAxis(format!(
                "axis '{}' needs at least two edges, got {}",
                name,
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MapError::InvalidAxis(format!(
                "edges of axis '{}' must be finite and strictly increasing",
                name
            )));
        }
        Ok(Self { name, edges })
    }

    /// Axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins.
    pub fn nbin(&self) -> usize {
        self.edges.len() - 1
    }

    /// Bin centres (arithmetic mean of the edges).
    pub fn center(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bin_axis() {
        let axis = MapAxis::from_edges(vec![9.0, 10.0], "axis2").unwrap();
        assert_eq!(axis.nbin(), 1);
        assert_eq!(axis.center(), vec![9.5]);
    }

    #[test]
    fn test_rejects_too_few_edges() {
        assert!(matches!(
            MapAxis::from_edges(vec![1.0], "x"),
            Err(MapError::InvalidAxis(_))
        ));
    }

    #[test]
    fn test_rejects_unsorted_edges() {
        assert!(MapAxis::from_edges(vec![2.0, 1.0], "x").is_err());
        assert!(MapAxis::from_edges(vec![1.0, 1.0], "x").is_err());
        assert!(MapAxis::from_edges(vec![1.0, f64::NAN], "x").is_err());
    }
}
