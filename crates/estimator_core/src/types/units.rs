//! Physical units and unit-carrying scalar quantities.
//!
//! Units are identified by their symbol and grouped by [`PhysicalType`].
//! Conversion is only defined between units of the same physical type;
//! symbols outside the built-in table form their own physical type and
//! convert only to themselves.
//!
//! # Examples
//!
//! ```
//! use estimator_core::types::{Quantity, Unit};
//!
//! let angle = Quantity::new(180.0, Unit::deg());
//! let rad = angle.to_value(&Unit::rad()).unwrap();
//! assert!((rad - std::f64::consts::PI).abs() < 1e-12);
//!
//! // Time cannot become an angle
//! let t = Quantity::new(1.0, Unit::parse("s"));
//! assert!(t.to(&Unit::rad()).is_err());
//! ```

use super::error::UnitError;
use std::fmt;

/// Physical type measured by a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    /// Pure numbers
    Dimensionless,
    /// Plane angles
    Angle,
    /// Durations
    Time,
    /// Energies
    Energy,
    /// Any unit outside the built-in table
    Custom,
}

// symbol, physical type, scale to the type's base unit
const KNOWN_UNITS: &[(&str, PhysicalType, f64)] = &[
    ("", PhysicalType::Dimensionless, 1.0),
    ("rad", PhysicalType::Angle, 1.0),
    ("deg", PhysicalType::Angle, std::f64::consts::PI / 180.0),
    ("arcmin", PhysicalType::Angle, std::f64::consts::PI / 10_800.0),
    ("arcsec", PhysicalType::Angle, std::f64::consts::PI / 648_000.0),
    ("s", PhysicalType::Time, 1.0),
    ("min", PhysicalType::Time, 60.0),
    ("h", PhysicalType::Time, 3_600.0),
    ("d", PhysicalType::Time, 86_400.0),
    ("eV", PhysicalType::Energy, 1.0),
    ("keV", PhysicalType::Energy, 1e3),
    ("MeV", PhysicalType::Energy, 1e6),
    ("GeV", PhysicalType::Energy, 1e9),
    ("TeV", PhysicalType::Energy, 1e12),
    ("erg", PhysicalType::Energy, 6.241_509_074_460_763e11),
];

/// A physical unit.
///
/// Two units compare equal when their symbols match.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Unit {
    symbol: String,
    physical_type: PhysicalType,
    scale: f64,
}

impl Unit {
    /// Build a unit from its symbol.
    ///
    /// Symbols not in the built-in table become custom units.
    pub fn parse(symbol: &str) -> Self {
        let symbol = symbol.trim();
        KNOWN_UNITS
            .iter()
            .find(|(known, _, _)| *known == symbol)
            .map(|(known, kind, scale)| Self {
                symbol: (*known).to_string(),
                physical_type: *kind,
                scale: *scale,
            })
            .unwrap_or_else(|| Self {
                symbol: symbol.to_string(),
                physical_type: PhysicalType::Custom,
                scale: 1.0,
            })
    }

    /// The dimensionless unit.
    pub fn dimensionless() -> Self {
        Self::parse("")
    }

    /// Radians.
    pub fn rad() -> Self {
        Self::parse("rad")
    }

    /// Degrees.
    pub fn deg() -> Self {
        Self::parse("deg")
    }

    /// Unit symbol, empty for dimensionless.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Physical type of the unit.
    pub fn physical_type(&self) -> PhysicalType {
        self.physical_type
    }

    /// Returns true for plane-angle units.
    pub fn is_angular(&self) -> bool {
        self.physical_type == PhysicalType::Angle
    }

    /// Factor that converts a value in `self` into a value in `target`.
    ///
    /// # Errors
    ///
    /// `UnitError::Incompatible` when the physical types differ.
    pub fn conversion_factor(&self, target: &Unit) -> Result<f64, UnitError> {
        let custom_mismatch =
            self.physical_type == PhysicalType::Custom && self.symbol != target.symbol;
        if self.physical_type != target.physical_type || custom_mismatch {
            return Err(UnitError::Incompatible {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
            });
        }
        Ok(self.scale / target.scale)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::dimensionless()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl PartialEq<&str> for Unit {
    fn eq(&self, other: &&str) -> bool {
        self.symbol == other.trim()
    }
}

impl From<&str> for Unit {
    fn from(symbol: &str) -> Self {
        Self::parse(symbol)
    }
}

impl From<String> for Unit {
    fn from(symbol: String) -> Self {
        Self::parse(&symbol)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.symbol
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A scalar value with a unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantity {
    /// Numerical value expressed in `unit`
    pub value: f64,
    /// Unit of `value`
    pub unit: Unit,
}

impl Quantity {
    /// Create a quantity.
    pub fn new(value: f64, unit: impl Into<Unit>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Create a dimensionless quantity.
    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::dimensionless())
    }

    /// Convert into `target`.
    pub fn to(&self, target: &Unit) -> Result<Quantity, UnitError> {
        Ok(Quantity {
            value: self.to_value(target)?,
            unit: target.clone(),
        })
    }

    /// Value expressed in `target`.
    pub fn to_value(&self, target: &Unit) -> Result<f64, UnitError> {
        Ok(self.value * self.unit.conversion_factor(target)?)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::dimensionless(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_known_units() {
        assert!(Unit::parse("deg").is_angular());
        assert!(Unit::parse("rad").is_angular());
        assert_eq!(Unit::parse(" s ").physical_type(), PhysicalType::Time);
        assert_eq!(Unit::parse("").physical_type(), PhysicalType::Dimensionless);
    }

    #[test]
    fn test_custom_unit_converts_only_to_itself() {
        let counts = Unit::parse("ct");
        assert_eq!(counts.conversion_factor(&Unit::parse("ct")).unwrap(), 1.0);
        assert!(counts.conversion_factor(&Unit::dimensionless()).is_err());
        assert!(counts.conversion_factor(&Unit::parse("photon")).is_err());
    }

    #[test]
    fn test_angle_conversion() {
        let q = Quantity::new(std::f64::consts::PI, Unit::rad());
        assert_relative_eq!(q.to_value(&Unit::deg()).unwrap(), 180.0, epsilon = 1e-12);

        let q = Quantity::new(1.0, "deg");
        assert_relative_eq!(q.to_value(&Unit::parse("arcmin")).unwrap(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_energy_conversion() {
        let q = Quantity::new(1.0, "TeV");
        assert_relative_eq!(q.to_value(&Unit::parse("GeV")).unwrap(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_incompatible_conversion() {
        let q = Quantity::new(1.0, "s");
        match q.to(&Unit::rad()) {
            Err(UnitError::Incompatible { from, to }) => {
                assert_eq!(from, "s");
                assert_eq!(to, "rad");
            }
            other => panic!("Expected Incompatible error, got {:?}", other),
        }
    }

    #[test]
    fn test_unit_equality_with_str() {
        assert_eq!(Unit::parse("s"), "s");
        assert_ne!(Unit::parse("s"), Unit::parse("h"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Quantity::new(2.5, "deg").to_string(), "2.5 deg");
        assert_eq!(Quantity::dimensionless(3.0).to_string(), "3");
    }
}
