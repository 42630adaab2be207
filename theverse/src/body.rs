//! Celestial-body records.
//!
//! A [`Body`] is built once with a [`BodyBuilder`], which validates every property against
//! the schema of its [`BodyKind`] and makes sure each value is cited, then frozen behind an
//! `Arc`. Links to other records are weak: a planet does not keep its star alive, and the
//! star only reaches its planets through the satellite collection attached during assembly.

use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use log::debug;
use once_cell::sync::OnceCell;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::collection::{Named, NamedCollection};
use crate::error::{UniverseError, UniverseResult};
use crate::kind::BodyKind;
use crate::provenance::Provenance;
use crate::quantity::{CitedText, Quantity};
use crate::system::PlanetarySystem;

/// An immutable record describing one star or planet.
#[derive(Debug)]
pub struct Body {
    name: String,
    kind: BodyKind,
    provenance: Provenance,
    quantities: IndexMap<String, Quantity>,
    texts: IndexMap<String, CitedText>,
    primary: Option<Weak<Body>>,
    system_name: Option<String>,
    planetary_system: OnceCell<Weak<PlanetarySystem>>,
    satellites: OnceCell<NamedCollection<Body>>,
}

impl Body {
    pub fn builder(name: impl Into<String>, kind: BodyKind) -> BodyBuilder {
        BodyBuilder::new(name, kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Record-level citation, inherited by properties without their own.
    pub fn reference(&self) -> Option<&str> {
        self.provenance.reference.as_deref()
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.provenance.reference_url.as_deref()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Looks up a quantity property, consulting the kind's fallbacks when it is absent.
    pub fn get(&self, attribute: &str) -> UniverseResult<&Quantity> {
        self.resolve(&self.quantities, attribute)
            .ok_or_else(|| self.attribute_not_found(attribute))
    }

    pub fn text(&self, attribute: &str) -> UniverseResult<&CitedText> {
        self.resolve(&self.texts, attribute)
            .ok_or_else(|| self.attribute_not_found(attribute))
    }

    /// True if [`Body::get`] or [`Body::text`] would succeed.
    pub fn has(&self, attribute: &str) -> bool {
        self.get(attribute).is_ok() || self.text(attribute).is_ok()
    }

    fn resolve<'a, V>(&self, map: &'a IndexMap<String, V>, attribute: &str) -> Option<&'a V> {
        map.get(attribute).or_else(|| {
            self.kind
                .fallbacks(attribute)
                .iter()
                .find_map(|property| map.get(*property))
        })
    }

    fn attribute_not_found(&self, attribute: &str) -> UniverseError {
        UniverseError::AttributeNotFound {
            object: self.name.clone(),
            attribute: attribute.to_string(),
        }
    }

    pub fn mass(&self) -> UniverseResult<&Quantity> {
        self.get("mass")
    }

    /// Equatorial radius when known, else the volumetric mean radius.
    pub fn radius(&self) -> UniverseResult<&Quantity> {
        self.get("radius")
    }

    pub fn equatorial_radius(&self) -> UniverseResult<&Quantity> {
        self.get("equatorial_radius")
    }

    pub fn polar_radius(&self) -> UniverseResult<&Quantity> {
        self.get("polar_radius")
    }

    pub fn volumetric_mean_radius(&self) -> UniverseResult<&Quantity> {
        self.get("volumetric_mean_radius")
    }

    pub fn semimajor_axis(&self) -> UniverseResult<&Quantity> {
        self.get("semimajor_axis")
    }

    pub fn sidereal_orbit_period(&self) -> UniverseResult<&Quantity> {
        self.get("sidereal_orbit_period")
    }

    pub fn mean_orbital_velocity(&self) -> UniverseResult<&Quantity> {
        self.get("mean_orbital_velocity")
    }

    pub fn spectral_type(&self) -> UniverseResult<&CitedText> {
        self.text("spectral_type")
    }

    /// Quantity properties in declaration order.
    pub fn quantities(&self) -> impl Iterator<Item = (&str, &Quantity)> + '_ {
        self.quantities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &CitedText)> + '_ {
        self.texts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The body this one orbits, if any.
    pub fn primary(&self) -> Option<Arc<Body>> {
        self.primary.as_ref().and_then(Weak::upgrade)
    }

    /// Alias of [`Body::primary`].
    pub fn star(&self) -> Option<Arc<Body>> {
        self.primary()
    }

    /// Name of the planetary system this body was declared in.
    pub fn planetary_system_name(&self) -> Option<&str> {
        self.system_name.as_deref()
    }

    /// The assembled planetary system this body belongs to.
    pub fn planetary_system(&self) -> Option<Arc<PlanetarySystem>> {
        self.planetary_system.get().and_then(Weak::upgrade)
    }

    /// Bodies whose primary is this one, in dataset order.
    pub fn satellites(&self) -> &NamedCollection<Body> {
        self.satellites
            .get_or_init(|| NamedCollection::empty(format!("{} satellites", self.name)))
    }

    /// Links the record into an assembled universe. Each link is set at most once.
    pub(crate) fn attach(
        &self,
        system: Option<&Arc<PlanetarySystem>>,
        satellites: NamedCollection<Body>,
    ) {
        if let Some(system) = system {
            let linked = self.planetary_system.set(Arc::downgrade(system)).is_ok();
            debug_assert!(linked, "{} attached to a planetary system twice", self.name);
        }
        let linked = self.satellites.set(satellites).is_ok();
        debug_assert!(linked, "{} attached satellites twice", self.name);
    }
}

impl Named for Body {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let primary = self.primary();
        let len = 3
            + self.provenance.field_count()
            + usize::from(self.system_name.is_some())
            + usize::from(primary.is_some())
            + usize::from(!self.texts.is_empty());
        let mut state = serializer.serialize_struct("Body", len)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("kind", &self.kind)?;
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
        if let Some(system) = self.planetary_system_name() {
            state.serialize_field("planetary_system", system)?;
        } else {
            state.skip_field("planetary_system")?;
        }
        if let Some(primary) = primary {
            state.serialize_field("primary", primary.name())?;
        } else {
            state.skip_field("primary")?;
        }
        state.serialize_field("properties", &self.quantities)?;
        if !self.texts.is_empty() {
            state.serialize_field("text", &self.texts)?;
        } else {
            state.skip_field("text")?;
        }
        state.end()
    }
}

/// Collects the properties of a [`Body`] and validates them on [`BodyBuilder::build`].
#[derive(Debug)]
pub struct BodyBuilder {
    name: String,
    kind: BodyKind,
    provenance: Provenance,
    quantities: Vec<(String, Quantity)>,
    texts: Vec<(String, CitedText)>,
    primary: Option<Weak<Body>>,
    system_name: Option<String>,
}

impl BodyBuilder {
    pub fn new(name: impl Into<String>, kind: BodyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            provenance: Provenance::default(),
            quantities: Vec::new(),
            texts: Vec::new(),
            primary: None,
            system_name: None,
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.provenance.reference = Some(reference.into());
        self
    }

    pub fn reference_url(mut self, reference_url: impl Into<String>) -> Self {
        self.provenance.reference_url = Some(reference_url.into());
        self
    }

    pub fn provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn quantity(mut self, property: impl Into<String>, quantity: Quantity) -> Self {
        self.quantities.push((property.into(), quantity));
        self
    }

    pub fn text(mut self, property: impl Into<String>, text: CitedText) -> Self {
        self.texts.push((property.into(), text));
        self
    }

    pub fn primary(mut self, primary: &Arc<Body>) -> Self {
        self.primary = Some(Arc::downgrade(primary));
        self
    }

    pub fn planetary_system(mut self, name: impl Into<String>) -> Self {
        self.system_name = Some(name.into());
        self
    }

    /// Validates and freezes the record.
    ///
    /// # Errors
    /// * `UnknownProperty` if the kind does not declare a property
    /// * `InvalidUnit` if a quantity has the wrong dimension for its property
    /// * `MissingReference` if neither the property nor the record is cited
    /// * `DuplicateName` if a property is given twice
    pub fn build(self) -> UniverseResult<Arc<Body>> {
        let BodyBuilder {
            name,
            kind,
            provenance,
            quantities,
            texts,
            primary,
            system_name,
        } = self;

        let mut quantity_map = IndexMap::with_capacity(quantities.len());
        for (property, quantity) in quantities {
            let expected = kind.expected_dimension(&property).ok_or_else(|| {
                UniverseError::UnknownProperty {
                    kind: kind.to_string(),
                    object: name.clone(),
                    property: property.clone(),
                }
            })?;
            if quantity.dimension() != expected {
                return Err(UniverseError::InvalidUnit {
                    object: name,
                    property,
                    expected,
                    found: quantity.dimension(),
                });
            }

            let quantity = quantity.adopt(&property, &name, &provenance);
            if quantity.provenance().is_empty() {
                return Err(UniverseError::MissingReference {
                    object: name,
                    property,
                });
            }
            if quantity_map.contains_key(&property) {
                return Err(duplicate_property(&name, property));
            }
            quantity_map.insert(property, quantity);
        }

        let mut text_map = IndexMap::with_capacity(texts.len());
        for (property, text) in texts {
            if !kind.accepts_text(&property) {
                return Err(UniverseError::UnknownProperty {
                    kind: kind.to_string(),
                    object: name,
                    property,
                });
            }

            let text = text.adopt(&property, &name, &provenance);
            if text.provenance().is_empty() {
                return Err(UniverseError::MissingReference {
                    object: name,
                    property,
                });
            }
            if text_map.contains_key(&property) || quantity_map.contains_key(&property) {
                return Err(duplicate_property(&name, property));
            }
            text_map.insert(property, text);
        }

        debug!(
            "Built {} {:?} with {} quantities and {} text properties",
            kind,
            name,
            quantity_map.len(),
            text_map.len()
        );

        Ok(Arc::new(Body {
            name,
            kind,
            provenance,
            quantities: quantity_map,
            texts: text_map,
            primary,
            system_name,
            planetary_system: OnceCell::new(),
            satellites: OnceCell::new(),
        }))
    }
}

fn duplicate_property(object: &str, property: String) -> UniverseError {
    UniverseError::DuplicateName {
        collection: format!("{object} properties"),
        name: property,
    }
}
