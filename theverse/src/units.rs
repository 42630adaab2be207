//! Runtime unit tags over `qtty`'s compile-time quantities.
//!
//! `qtty` checks dimensions at compile time: `Meters + Seconds` does not type-check.
//! Body properties live in an open map, so each value is stored as a [`Magnitude`]:
//! one `qtty` quantity per supported [`Dimension`], always held in the SI unit of that
//! dimension. Every conversion factor comes from `qtty`'s `to::<U>()`; this module only
//! decides which typed operation applies and reports a [`UniverseError`] when none does.
//!
//! ```rust
//! use theverse::units::{Magnitude, Unit};
//!
//! let radius = Magnitude::new(6378.137, Unit::Kilometer);
//! assert!((radius.value_in(Unit::Meter).unwrap() - 6_378_137.0).abs() < 1e-6);
//! assert!(radius.value_in(Unit::Kilogram).is_err());
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use qtty::length::nominal::SolarRadius;
use qtty::length::{AstronomicalUnit, Kilometer, Meter, Meters};
use qtty::mass::{Gram, Kilogram, Kilograms, SolarMass, Tonne};
use qtty::time::{Day, Hour, JulianYear, Minute, Second, Seconds};
use qtty::velocity::Velocity;
use qtty::{Per, Quantity, Simplify, Unitless};

use crate::error::{UniverseError, UniverseResult};

/// SI speed, the canonical storage for [`Dimension::Speed`].
pub type MetersPerSecond = Velocity<Meter, Second>;

/// Dimension of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Dimensionless,
    Mass,
    Length,
    Time,
    Speed,
}

impl Dimension {
    /// SI unit used to store values of this dimension.
    pub fn si_unit(self) -> Unit {
        match self {
            Dimension::Dimensionless => Unit::Unitless,
            Dimension::Mass => Unit::Kilogram,
            Dimension::Length => Unit::Meter,
            Dimension::Time => Unit::Second,
            Dimension::Speed => Unit::MeterPerSecond,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Dimensionless => "dimensionless",
            Dimension::Mass => "mass",
            Dimension::Length => "length",
            Dimension::Time => "time",
            Dimension::Speed => "speed",
        };
        f.write_str(name)
    }
}

/// Units accepted in source data and conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Unitless,
    Gram,
    Kilogram,
    Tonne,
    SolarMass,
    Meter,
    Kilometer,
    AstronomicalUnit,
    SolarRadius,
    Second,
    Minute,
    Hour,
    Day,
    /// Julian year of 365.25 days.
    JulianYear,
    MeterPerSecond,
    KilometerPerSecond,
    KilometerPerHour,
}

impl Unit {
    pub const ALL: [Unit; 17] = [
        Unit::Unitless,
        Unit::Gram,
        Unit::Kilogram,
        Unit::Tonne,
        Unit::SolarMass,
        Unit::Meter,
        Unit::Kilometer,
        Unit::AstronomicalUnit,
        Unit::SolarRadius,
        Unit::Second,
        Unit::Minute,
        Unit::Hour,
        Unit::Day,
        Unit::JulianYear,
        Unit::MeterPerSecond,
        Unit::KilometerPerSecond,
        Unit::KilometerPerHour,
    ];

    /// Canonical symbol, as written in source data.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Unitless => "",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Tonne => "t",
            Unit::SolarMass => "M_sun",
            Unit::Meter => "m",
            Unit::Kilometer => "km",
            Unit::AstronomicalUnit => "au",
            Unit::SolarRadius => "R_sun",
            Unit::Second => "s",
            Unit::Minute => "min",
            Unit::Hour => "h",
            Unit::Day => "d",
            Unit::JulianYear => "yr",
            Unit::MeterPerSecond => "m/s",
            Unit::KilometerPerSecond => "km/s",
            Unit::KilometerPerHour => "km/h",
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Unitless => Dimension::Dimensionless,
            Unit::Gram | Unit::Kilogram | Unit::Tonne | Unit::SolarMass => Dimension::Mass,
            Unit::Meter | Unit::Kilometer | Unit::AstronomicalUnit | Unit::SolarRadius => {
                Dimension::Length
            }
            Unit::Second | Unit::Minute | Unit::Hour | Unit::Day | Unit::JulianYear => {
                Dimension::Time
            }
            Unit::MeterPerSecond | Unit::KilometerPerSecond | Unit::KilometerPerHour => {
                Dimension::Speed
            }
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UniverseError;

    fn from_str(s: &str) -> UniverseResult<Self> {
        let symbol = s.trim();
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.symbol() == symbol)
            .or(match symbol {
                "AU" => Some(Unit::AstronomicalUnit),
                "Msun" | "M☉" => Some(Unit::SolarMass),
                "Rsun" | "R☉" => Some(Unit::SolarRadius),
                "a" => Some(Unit::JulianYear),
                _ => None,
            })
            .ok_or_else(|| UniverseError::UnknownUnit(symbol.to_string()))
    }
}

/// A value tagged with its dimension, stored in SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    Dimensionless(Quantity<Unitless>),
    Mass(Kilograms),
    Length(Meters),
    Time(Seconds),
    Speed(MetersPerSecond),
}

impl Magnitude {
    /// Normalizes `value` expressed in `unit` to SI.
    pub fn new(value: f64, unit: Unit) -> Self {
        match unit {
            Unit::Unitless => Magnitude::Dimensionless(Quantity::new(value)),
            Unit::Gram => Magnitude::Mass(Quantity::<Gram>::new(value).to::<Kilogram>()),
            Unit::Kilogram => Magnitude::Mass(Kilograms::new(value)),
            Unit::Tonne => Magnitude::Mass(Quantity::<Tonne>::new(value).to::<Kilogram>()),
            Unit::SolarMass => Magnitude::Mass(Quantity::<SolarMass>::new(value).to::<Kilogram>()),
            Unit::Meter => Magnitude::Length(Meters::new(value)),
            Unit::Kilometer => Magnitude::Length(Quantity::<Kilometer>::new(value).to::<Meter>()),
            Unit::AstronomicalUnit => {
                Magnitude::Length(Quantity::<AstronomicalUnit>::new(value).to::<Meter>())
            }
            Unit::SolarRadius => Magnitude::Length(Quantity::<SolarRadius>::new(value).to::<Meter>()),
            Unit::Second => Magnitude::Time(Seconds::new(value)),
            Unit::Minute => Magnitude::Time(Quantity::<Minute>::new(value).to::<Second>()),
            Unit::Hour => Magnitude::Time(Quantity::<Hour>::new(value).to::<Second>()),
            Unit::Day => Magnitude::Time(Quantity::<Day>::new(value).to::<Second>()),
            Unit::JulianYear => Magnitude::Time(Quantity::<JulianYear>::new(value).to::<Second>()),
            Unit::MeterPerSecond => Magnitude::Speed(MetersPerSecond::new(value)),
            Unit::KilometerPerSecond => {
                Magnitude::Speed(Velocity::<Kilometer, Second>::new(value).to::<Per<Meter, Second>>())
            }
            Unit::KilometerPerHour => {
                Magnitude::Speed(Velocity::<Kilometer, Hour>::new(value).to::<Per<Meter, Second>>())
            }
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Magnitude::Dimensionless(_) => Dimension::Dimensionless,
            Magnitude::Mass(_) => Dimension::Mass,
            Magnitude::Length(_) => Dimension::Length,
            Magnitude::Time(_) => Dimension::Time,
            Magnitude::Speed(_) => Dimension::Speed,
        }
    }

    /// Value in the SI unit of this magnitude's dimension.
    pub fn si_value(&self) -> f64 {
        match self {
            Magnitude::Dimensionless(q) => q.value(),
            Magnitude::Mass(q) => q.value(),
            Magnitude::Length(q) => q.value(),
            Magnitude::Time(q) => q.value(),
            Magnitude::Speed(q) => q.value(),
        }
    }

    /// Value expressed in `unit`.
    ///
    /// Fails with [`UniverseError::DimensionMismatch`] when `unit` measures another dimension.
    pub fn value_in(&self, unit: Unit) -> UniverseResult<f64> {
        let value = match (*self, unit) {
            (Magnitude::Dimensionless(q), Unit::Unitless) => q.value(),
            (Magnitude::Mass(q), Unit::Gram) => q.to::<Gram>().value(),
            (Magnitude::Mass(q), Unit::Kilogram) => q.value(),
            (Magnitude::Mass(q), Unit::Tonne) => q.to::<Tonne>().value(),
            (Magnitude::Mass(q), Unit::SolarMass) => q.to::<SolarMass>().value(),
            (Magnitude::Length(q), Unit::Meter) => q.value(),
            (Magnitude::Length(q), Unit::Kilometer) => q.to::<Kilometer>().value(),
            (Magnitude::Length(q), Unit::AstronomicalUnit) => q.to::<AstronomicalUnit>().value(),
            (Magnitude::Length(q), Unit::SolarRadius) => q.to::<SolarRadius>().value(),
            (Magnitude::Time(q), Unit::Second) => q.value(),
            (Magnitude::Time(q), Unit::Minute) => q.to::<Minute>().value(),
            (Magnitude::Time(q), Unit::Hour) => q.to::<Hour>().value(),
            (Magnitude::Time(q), Unit::Day) => q.to::<Day>().value(),
            (Magnitude::Time(q), Unit::JulianYear) => q.to::<JulianYear>().value(),
            (Magnitude::Speed(q), Unit::MeterPerSecond) => q.value(),
            (Magnitude::Speed(q), Unit::KilometerPerSecond) => q.to::<Per<Kilometer, Second>>().value(),
            (Magnitude::Speed(q), Unit::KilometerPerHour) => q.to::<Per<Kilometer, Hour>>().value(),
            _ => {
                return Err(UniverseError::DimensionMismatch {
                    operation: "convert",
                    lhs: self.dimension(),
                    rhs: unit.dimension(),
                })
            }
        };
        Ok(value)
    }

    pub fn checked_add(&self, rhs: &Magnitude) -> UniverseResult<Magnitude> {
        match (*self, *rhs) {
            (Magnitude::Dimensionless(a), Magnitude::Dimensionless(b)) => Ok(Magnitude::Dimensionless(a + b)),
            (Magnitude::Mass(a), Magnitude::Mass(b)) => Ok(Magnitude::Mass(a + b)),
            (Magnitude::Length(a), Magnitude::Length(b)) => Ok(Magnitude::Length(a + b)),
            (Magnitude::Time(a), Magnitude::Time(b)) => Ok(Magnitude::Time(a + b)),
            (Magnitude::Speed(a), Magnitude::Speed(b)) => Ok(Magnitude::Speed(a + b)),
            _ => Err(self.mismatch("add", rhs)),
        }
    }

    pub fn checked_sub(&self, rhs: &Magnitude) -> UniverseResult<Magnitude> {
        match (*self, *rhs) {
            (Magnitude::Dimensionless(a), Magnitude::Dimensionless(b)) => Ok(Magnitude::Dimensionless(a - b)),
            (Magnitude::Mass(a), Magnitude::Mass(b)) => Ok(Magnitude::Mass(a - b)),
            (Magnitude::Length(a), Magnitude::Length(b)) => Ok(Magnitude::Length(a - b)),
            (Magnitude::Time(a), Magnitude::Time(b)) => Ok(Magnitude::Time(a - b)),
            (Magnitude::Speed(a), Magnitude::Speed(b)) => Ok(Magnitude::Speed(a - b)),
            _ => Err(self.mismatch("subtract", rhs)),
        }
    }

    /// Product, limited to the dimensions this crate can represent.
    pub fn checked_mul(&self, rhs: &Magnitude) -> UniverseResult<Magnitude> {
        match (*self, *rhs) {
            (Magnitude::Dimensionless(k), other) | (other, Magnitude::Dimensionless(k)) => {
                Ok(other.scale(k.value()))
            }
            (Magnitude::Speed(v), Magnitude::Time(t)) => Ok(Magnitude::Length(v * t)),
            (Magnitude::Time(t), Magnitude::Speed(v)) => Ok(Magnitude::Length(t * v)),
            _ => Err(self.unsupported("multiply", rhs)),
        }
    }

    /// Quotient, limited to the dimensions this crate can represent.
    pub fn checked_div(&self, rhs: &Magnitude) -> UniverseResult<Magnitude> {
        match (*self, *rhs) {
            (other, Magnitude::Dimensionless(k)) => Ok(other.scale(1.0 / k.value())),
            (Magnitude::Mass(a), Magnitude::Mass(b)) => Ok(Magnitude::Dimensionless((a / b).simplify())),
            (Magnitude::Length(a), Magnitude::Length(b)) => {
                Ok(Magnitude::Dimensionless((a / b).simplify()))
            }
            (Magnitude::Time(a), Magnitude::Time(b)) => Ok(Magnitude::Dimensionless((a / b).simplify())),
            (Magnitude::Speed(a), Magnitude::Speed(b)) => {
                Ok(Magnitude::Dimensionless((a / b).simplify()))
            }
            (Magnitude::Length(d), Magnitude::Time(t)) => Ok(Magnitude::Speed(d / t)),
            (Magnitude::Length(d), Magnitude::Speed(v)) => Ok(Magnitude::Time((d / v).simplify())),
            _ => Err(self.unsupported("divide", rhs)),
        }
    }

    /// Multiplies by a plain number, keeping the dimension.
    pub fn scale(&self, factor: f64) -> Magnitude {
        match *self {
            Magnitude::Dimensionless(q) => Magnitude::Dimensionless(q * factor),
            Magnitude::Mass(q) => Magnitude::Mass(q * factor),
            Magnitude::Length(q) => Magnitude::Length(q * factor),
            Magnitude::Time(q) => Magnitude::Time(q * factor),
            Magnitude::Speed(q) => Magnitude::Speed(q * factor),
        }
    }

    fn mismatch(&self, operation: &'static str, rhs: &Magnitude) -> UniverseError {
        UniverseError::DimensionMismatch {
            operation,
            lhs: self.dimension(),
            rhs: rhs.dimension(),
        }
    }

    fn unsupported(&self, operation: &'static str, rhs: &Magnitude) -> UniverseError {
        UniverseError::UnsupportedDimension {
            operation,
            lhs: self.dimension(),
            rhs: rhs.dimension(),
        }
    }
}

impl PartialOrd for Magnitude {
    /// Magnitudes of different dimensions are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.dimension() != other.dimension() {
            return None;
        }
        self.si_value().partial_cmp(&other.si_value())
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::Dimensionless(q) => write!(f, "{q}"),
            Magnitude::Mass(q) => write!(f, "{q}"),
            Magnitude::Length(q) => write!(f, "{q}"),
            Magnitude::Time(q) => write!(f, "{q}"),
            Magnitude::Speed(q) => write!(f, "{q}"),
        }
    }
}
