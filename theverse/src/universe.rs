//! The top-level registry of bodies and planetary systems.
//!
//! Assembly runs in a fixed order: stars, planets, planetary systems, then the satellite
//! collections of every body. Every grouping holds the same `Arc<Body>` as the category
//! collections, so a record reached through `solar_system().planets()` is identical to the
//! one in `planets()`. Construction is all-or-nothing: the first bad record aborts it.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::body::Body;
use crate::collection::NamedCollection;
use crate::error::{UniverseError, UniverseResult};
use crate::kind::BodyKind;
use crate::provenance::Provenance;
use crate::quantity::{CitedText, Quantity};
use crate::source::{BodySource, UniverseSource};
use crate::system::PlanetarySystem;

/// Name of the planetary system exposed by [`Universe::solar_system`].
pub const SOLAR_SYSTEM: &str = "Solar System";

/// Read-only registry of every body in a dataset.
#[derive(Debug)]
pub struct Universe {
    name: String,
    provenance: Provenance,
    stars: NamedCollection<Body>,
    planets: NamedCollection<Body>,
    bodies: NamedCollection<Body>,
    planetary_systems: NamedCollection<PlanetarySystem>,
}

impl Universe {
    /// Builds a universe from a dataset definition.
    ///
    /// # Errors
    /// Any record or link that fails validation aborts the whole build:
    /// * `UnresolvedLink` for a `primary` or `planetary_system` naming nothing declared
    /// * `DuplicateName` / `NameCollision` for clashing names
    /// * the `BodyBuilder` errors for invalid properties
    pub fn from_source(source: &UniverseSource) -> UniverseResult<Self> {
        let declared_systems: Vec<&str> =
            source.planetary_systems.iter().map(|s| s.name.as_str()).collect();

        let mut stars: Vec<Arc<Body>> = Vec::with_capacity(source.stars.len());
        for star in &source.stars {
            // A star may orbit another star declared before it.
            let primary = match &star.primary {
                Some(target) => Some(
                    stars
                        .iter()
                        .find(|s| s.name() == target.as_str())
                        .ok_or_else(|| unresolved(star, "primary", target))?,
                ),
                None => None,
            };
            let built = build_body(star, BodyKind::Star, primary, &declared_systems)?;
            stars.push(built);
        }
        let stars = NamedCollection::from_named("stars", stars)?;

        let mut planets = Vec::with_capacity(source.planets.len());
        for planet in &source.planets {
            let primary = match &planet.primary {
                Some(target) => Some(
                    stars
                        .get(target)
                        .ok_or_else(|| unresolved(planet, "primary", target))?,
                ),
                None => None,
            };
            planets.push(build_body(planet, BodyKind::Planet, primary, &declared_systems)?);
        }
        let planets = NamedCollection::from_named("planets", planets)?;

        let bodies = NamedCollection::from_named(
            "bodies",
            stars.values().chain(planets.values()).cloned(),
        )?;

        let mut systems = Vec::with_capacity(source.planetary_systems.len());
        for system in &source.planetary_systems {
            let members = |collection: &NamedCollection<Body>| {
                collection
                    .values()
                    .filter(|b| b.planetary_system_name() == Some(system.name.as_str()))
                    .cloned()
                    .collect::<Vec<_>>()
            };
            let system_stars =
                NamedCollection::from_named(format!("{} stars", system.name), members(&stars))?;
            let system_planets =
                NamedCollection::from_named(format!("{} planets", system.name), members(&planets))?;

            debug!(
                "Assembled planetary system {:?}: {} stars, {} planets",
                system.name,
                system_stars.len(),
                system_planets.len()
            );
            systems.push(Arc::new(PlanetarySystem::new(
                system.name.clone(),
                system.provenance.clone(),
                system_stars,
                system_planets,
            )));
        }
        let planetary_systems = NamedCollection::from_named("planetary systems", systems)?;

        for body in bodies.values() {
            let satellites = NamedCollection::from_named(
                format!("{} satellites", body.name()),
                bodies
                    .values()
                    .filter(|candidate| {
                        candidate
                            .primary()
                            .is_some_and(|primary| Arc::ptr_eq(&primary, body))
                    })
                    .cloned(),
            )?;
            let system = body
                .planetary_system_name()
                .and_then(|name| planetary_systems.get(name));
            body.attach(system, satellites);
        }

        info!(
            "Loaded universe {:?}: {} stars, {} planets, {} planetary systems",
            source.name,
            stars.len(),
            planets.len(),
            planetary_systems.len()
        );

        Ok(Self {
            name: source.name.clone(),
            provenance: source.provenance.clone(),
            stars,
            planets,
            bodies,
            planetary_systems,
        })
    }

    /// Builds the dataset compiled into the crate.
    pub fn embedded() -> UniverseResult<Self> {
        Self::from_source(&UniverseSource::embedded()?)
    }

    /// Builds a universe from a TOML dataset file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> UniverseResult<Self> {
        Self::from_source(&UniverseSource::from_file(path)?)
    }

    pub fn from_toml_str(content: &str) -> UniverseResult<Self> {
        Self::from_source(&UniverseSource::from_toml_str(content)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> Option<&str> {
        self.provenance.reference.as_deref()
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.provenance.reference_url.as_deref()
    }

    pub fn stars(&self) -> &NamedCollection<Body> {
        &self.stars
    }

    pub fn planets(&self) -> &NamedCollection<Body> {
        &self.planets
    }

    /// Every body across categories: stars first, then planets.
    pub fn bodies(&self) -> &NamedCollection<Body> {
        &self.bodies
    }

    pub fn planetary_systems(&self) -> &NamedCollection<PlanetarySystem> {
        &self.planetary_systems
    }

    pub fn solar_system(&self) -> UniverseResult<&Arc<PlanetarySystem>> {
        self.planetary_systems.get_by_key(SOLAR_SYSTEM)
    }

    /// Collections of a category.
    pub fn category(&self, kind: BodyKind) -> &NamedCollection<Body> {
        match kind {
            BodyKind::Star => &self.stars,
            BodyKind::Planet => &self.planets,
        }
    }
}

fn unresolved(body: &BodySource, link: &'static str, target: &str) -> UniverseError {
    UniverseError::UnresolvedLink {
        object: body.name.clone(),
        link,
        target: target.to_string(),
    }
}

fn build_body(
    source: &BodySource,
    kind: BodyKind,
    primary: Option<&Arc<Body>>,
    declared_systems: &[&str],
) -> UniverseResult<Arc<Body>> {
    let mut builder = Body::builder(source.name.clone(), kind).provenance(source.provenance());

    if let Some(primary) = primary {
        builder = builder.primary(primary);
    }
    if let Some(system) = &source.planetary_system {
        if !declared_systems.contains(&system.as_str()) {
            return Err(unresolved(source, "planetary_system", system));
        }
        builder = builder.planetary_system(system.clone());
    }

    for (property, value) in &source.properties {
        // Undeclared names go through the text path so the builder reports them.
        if kind.expected_dimension(property).is_some() {
            let quantity: Quantity = value.value().parse()?;
            builder = builder.quantity(property.clone(), quantity.with_provenance(value.provenance()));
        } else {
            let text = CitedText::new(value.value()).with_provenance(value.provenance());
            builder = builder.text(property.clone(), text);
        }
    }

    builder.build()
}

impl Serialize for Universe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 4 + self.provenance.field_count();
        let mut state = serializer.serialize_struct("Universe", len)?;
        state.serialize_field("name", &self.name)?;
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
        state.serialize_field("planetary_systems", &self.planetary_systems)?;
        state.serialize_field("stars", &self.stars)?;
        state.serialize_field("planets", &self.planets)?;
        state.end()
    }
}
