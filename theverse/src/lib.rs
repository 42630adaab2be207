//! Physical properties of celestial bodies, with units and citations.
//!
//! Every value is a [`Quantity`] stored in SI units and traceable to the source it was
//! taken from. Bodies live in read-only [`NamedCollection`]s that answer both exact-key
//! lookups (`"Earth"`) and normalized-name lookups (`"earth"`) with the same record.
//!
//! ```rust
//! use theverse::units::Unit;
//!
//! let universe = theverse::universe()?;
//! let earth = universe.planets().get_by_name("earth")?;
//!
//! assert_eq!(earth.mass()?.to(Unit::Kilogram)?, 5.9724e24);
//! assert_eq!(earth.primary().map(|sun| sun.name().to_string()).as_deref(), Some("Sun"));
//! # Ok::<(), theverse::UniverseError>(())
//! ```

pub mod body;
pub mod collection;
pub mod error;
pub mod global;
pub mod kind;
pub mod provenance;
pub mod quantity;
pub mod source;
pub mod system;
pub mod units;
pub mod universe;

#[cfg(test)]
mod collection_tests;

pub use body::{Body, BodyBuilder};
pub use collection::{normalize, Named, NamedCollection};
pub use error::{UniverseError, UniverseResult};
pub use global::{earth, solar_system, sun, universe};
pub use kind::BodyKind;
pub use provenance::Provenance;
pub use quantity::{CitedText, Quantity};
pub use source::UniverseSource;
pub use system::PlanetarySystem;
pub use units::{Dimension, Magnitude, Unit};
pub use universe::Universe;
