//! Quantities and text values carrying their citation.
//!
//! A [`Quantity`] is a [`Magnitude`] plus optional [`Provenance`], and, once a record adopts
//! it, the property name and the name of the record it describes. Quantities are immutable:
//! arithmetic returns a fresh quantity without name, object or provenance, since a derived
//! value is no longer the cited source value.
//!
//! ```rust
//! use theverse::quantity::Quantity;
//! use theverse::units::Unit;
//!
//! let mass: Quantity = "5.9724e24 kg".parse().unwrap();
//! assert_eq!(mass, Quantity::new(5.9724e24, Unit::Kilogram));
//!
//! let sun: Quantity = "1_988_500e24 kg".parse().unwrap();
//! assert!((sun.to(Unit::SolarMass).unwrap() - 1.0).abs() < 1e-3);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::Deref;
use core::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::{UniverseError, UniverseResult};
use crate::provenance::Provenance;
use crate::units::{Dimension, Magnitude, Unit};

/// A numeric value with a unit and a citation.
#[derive(Debug, Clone)]
pub struct Quantity {
    magnitude: Magnitude,
    name: Option<String>,
    object: Option<String>,
    provenance: Provenance,
}

impl Quantity {
    /// Creates an uncited quantity of `value` expressed in `unit`.
    pub fn new(value: f64, unit: Unit) -> Self {
        Self::from_magnitude(Magnitude::new(value, unit))
    }

    pub fn from_magnitude(magnitude: Magnitude) -> Self {
        Self {
            magnitude,
            name: None,
            object: None,
            provenance: Provenance::default(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.provenance.reference = Some(reference.into());
        self
    }

    pub fn with_reference_url(mut self, reference_url: impl Into<String>) -> Self {
        self.provenance.reference_url = Some(reference_url.into());
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Binds the quantity to the record that owns it.
    pub(crate) fn adopt(mut self, property: &str, object: &str, fallback: &Provenance) -> Self {
        self.name = Some(property.replace('_', " "));
        self.object = Some(object.to_string());
        self.provenance = self.provenance.or(fallback);
        self
    }

    /// Value in the SI unit returned by [`Quantity::unit`].
    pub fn value(&self) -> f64 {
        self.magnitude.si_value()
    }

    pub fn unit(&self) -> Unit {
        self.dimension().si_unit()
    }

    pub fn dimension(&self) -> Dimension {
        self.magnitude.dimension()
    }

    pub fn magnitude(&self) -> &Magnitude {
        &self.magnitude
    }

    /// Value expressed in `unit`.
    pub fn to(&self, unit: Unit) -> UniverseResult<f64> {
        self.magnitude.value_in(unit)
    }

    /// Human-readable property name, e.g. `"equatorial radius"`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name of the record this quantity describes.
    pub fn object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.provenance.reference.as_deref()
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.provenance.reference_url.as_deref()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn checked_add(&self, rhs: &Quantity) -> UniverseResult<Quantity> {
        self.magnitude.checked_add(&rhs.magnitude).map(Quantity::from_magnitude)
    }

    pub fn checked_sub(&self, rhs: &Quantity) -> UniverseResult<Quantity> {
        self.magnitude.checked_sub(&rhs.magnitude).map(Quantity::from_magnitude)
    }

    pub fn checked_mul(&self, rhs: &Quantity) -> UniverseResult<Quantity> {
        self.magnitude.checked_mul(&rhs.magnitude).map(Quantity::from_magnitude)
    }

    pub fn checked_div(&self, rhs: &Quantity) -> UniverseResult<Quantity> {
        self.magnitude.checked_div(&rhs.magnitude).map(Quantity::from_magnitude)
    }

    pub fn scale(&self, factor: f64) -> Quantity {
        Quantity::from_magnitude(self.magnitude.scale(factor))
    }
}

/// Equality compares the SI-normalized value only; citations are metadata.
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.magnitude == other.magnitude
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.magnitude.partial_cmp(&other.magnitude)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.magnitude)
    }
}

impl FromStr for Quantity {
    type Err = UniverseError;

    /// Parses `"<number> <unit>"`. The space is optional (`"5.9724e24kg"`) and a bare
    /// number is dimensionless. Values must be finite.
    fn from_str(s: &str) -> UniverseResult<Self> {
        let input = s.trim();
        let (number, symbol) = split_number(input);
        let invalid = |reason: String| UniverseError::InvalidValue {
            input: input.to_string(),
            reason,
        };

        let value = strip_digit_separators(number)
            .parse::<f64>()
            .map_err(|e| invalid(e.to_string()))?;
        if !value.is_finite() {
            return Err(invalid("value is not finite".to_string()));
        }
        let unit = symbol.trim().parse::<Unit>()?;

        Ok(Quantity::new(value, unit))
    }
}

/// Splits `input` after its longest prefix made of numeric-literal characters.
fn split_number(input: &str) -> (&str, &str) {
    let bytes = input.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        let c = bytes[end];
        let prev = end.checked_sub(1).map(|i| bytes[i]);
        let numeric = match c {
            b'0'..=b'9' | b'.' | b'_' => true,
            b'+' | b'-' => prev.map_or(true, |p| p == b'e' || p == b'E'),
            b'e' | b'E' => {
                prev.is_some_and(|p| p.is_ascii_digit() || p == b'.')
                    && bytes
                        .get(end + 1)
                        .is_some_and(|n| n.is_ascii_digit() || *n == b'+' || *n == b'-')
            }
            _ => false,
        };
        if !numeric {
            break;
        }
        end += 1;
    }
    input.split_at(end)
}

/// Removes underscores that sit between two digits (`1_988_500` -> `1988500`).
fn strip_digit_separators(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let separator = c == '_'
                && i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit());
            !separator
        })
        .map(|(_, &c)| c)
        .collect()
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 2 + self.provenance.field_count();
        let mut state = serializer.serialize_struct("Quantity", len)?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("unit", self.unit().symbol())?;
        if let Some(reference) = self.reference() {
            state.serialize_field("reference", reference)?;
        } else {
            state.skip_field("reference")?;
        }
        if let Some(reference_url) = self.reference_url() {
            state.serialize_field("reference_url", reference_url)?;
        } else {
            state.skip_field("reference_url")?;
        }
        state.end()
    }
}

/// A string value with a citation, such as a spectral type.
#[derive(Debug, Clone)]
pub struct CitedText {
    text: String,
    name: Option<String>,
    object: Option<String>,
    provenance: Provenance,
}

impl CitedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: None,
            object: None,
            provenance: Provenance::default(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.provenance.reference = Some(reference.into());
        self
    }

    pub fn with_reference_url(mut self, reference_url: impl Into<String>) -> Self {
        self.provenance.reference_url = Some(reference_url.into());
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub(crate) fn adopt(mut self, property: &str, object: &str, fallback: &Provenance) -> Self {
        self.name = Some(property.replace('_', " "));
        self.object = Some(object.to_string());
        self.provenance = self.provenance.or(fallback);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.provenance.reference.as_deref()
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.provenance.reference_url.as_deref()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

impl Deref for CitedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for CitedText {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for CitedText {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for CitedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for CitedText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + self.provenance.field_count();
        let mut state = serializer.serialize_struct("CitedText", len)?;
        state.serialize_field("text", &self.text)?;
        if let Some(reference) = self.reference() {
            state.serialize_field("reference", reference)?;
        } else {
            state.skip_field("reference")?;
        }
        if let Some(reference_url) = self.reference_url() {
            state.serialize_field("reference_url", reference_url)?;
        } else {
            state.skip_field("reference_url")?;
        }
        state.end()
    }
}
