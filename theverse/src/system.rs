//! Planetary systems: groupings of stars and planets by membership.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::body::Body;
use crate::collection::{Named, NamedCollection};
use crate::provenance::Provenance;

/// A named grouping of the stars and planets declared as its members.
///
/// Members are shared with the universe's category collections, so a planet reached
/// through a system is the same record as the one in `universe.planets()`.
#[derive(Debug)]
pub struct PlanetarySystem {
    name: String,
    provenance: Provenance,
    stars: NamedCollection<Body>,
    planets: NamedCollection<Body>,
}

impl PlanetarySystem {
    pub fn new(
        name: impl Into<String>,
        provenance: Provenance,
        stars: NamedCollection<Body>,
        planets: NamedCollection<Body>,
    ) -> Self {
        Self {
            name: name.into(),
            provenance,
            stars,
            planets,
        }
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

    /// The first declared star of the system.
    pub fn primary(&self) -> Option<&Arc<Body>> {
        self.stars.values().next()
    }

    /// Stars then planets, in dataset order.
    pub fn bodies(&self) -> impl Iterator<Item = &Arc<Body>> + '_ {
        self.stars.values().chain(self.planets.values())
    }
}

impl Named for PlanetarySystem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Serialize for PlanetarySystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 3 + self.provenance.field_count();
        let mut state = serializer.serialize_struct("PlanetarySystem", len)?;
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
        state.serialize_field("stars", &self.stars.keys().collect::<Vec<_>>())?;
        state.serialize_field("planets", &self.planets.keys().collect::<Vec<_>>())?;
        state.end()
    }
}
