//! Dataset definitions in TOML.
//!
//! A dataset file declares the planetary systems first, then stars and planets as arrays
//! of tables. Any key of a body table other than the reserved ones is a property; the
//! value is either a string (`mass = "5.9724e24 kg"`) or an inline table carrying its own
//! citation (`mass = { value = "5.9724e24 kg", reference = "..." }`).
//!
//! ```toml
//! name = "Universe"
//!
//! [[planetary_system]]
//! name = "Solar System"
//!
//! [[star]]
//! name = "Sun"
//! reference_url = "https://nssdc.gsfc.nasa.gov/planetary/factsheet/sunfact.html"
//! planetary_system = "Solar System"
//! mass = "1_988_500e24 kg"
//! spectral_type = "G2 V"
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{UniverseError, UniverseResult};
use crate::provenance::Provenance;

const EMBEDDED_DATASET: &str = include_str!("../data/universe.toml");

/// A complete dataset definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseSource {
    #[serde(default = "default_universe_name")]
    pub name: String,
    #[serde(flatten)]
    pub provenance: Provenance,
    #[serde(default, rename = "planetary_system")]
    pub planetary_systems: Vec<SystemSource>,
    #[serde(default, rename = "star")]
    pub stars: Vec<BodySource>,
    #[serde(default, rename = "planet")]
    pub planets: Vec<BodySource>,
}

/// A `[[planetary_system]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSource {
    pub name: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

/// A `[[star]]` or `[[planet]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planetary_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(flatten)]
    pub properties: IndexMap<String, PropertySource>,
}

/// A property value, optionally with its own citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertySource {
    Plain(String),
    Cited {
        value: String,
        #[serde(flatten)]
        provenance: Provenance,
    },
}

impl PropertySource {
    /// The raw value string.
    pub fn value(&self) -> &str {
        match self {
            PropertySource::Plain(value) => value,
            PropertySource::Cited { value, .. } => value,
        }
    }

    /// The property's own citation; empty for plain values.
    pub fn provenance(&self) -> Provenance {
        match self {
            PropertySource::Plain(_) => Provenance::default(),
            PropertySource::Cited { provenance, .. } => provenance.clone(),
        }
    }
}

impl BodySource {
    pub fn provenance(&self) -> Provenance {
        Provenance::new(self.reference.clone(), self.reference_url.clone())
    }
}

fn default_universe_name() -> String {
    "Universe".to_string()
}

impl UniverseSource {
    /// Parse a dataset definition from TOML text.
    ///
    /// # Returns
    /// * `Ok(UniverseSource)` if the text is a valid definition
    /// * `Err(UniverseError::ConfigurationError)` naming the offending field otherwise
    pub fn from_toml_str(content: &str) -> UniverseResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        serde_path_to_error::deserialize(deserializer).map_err(|e| {
            UniverseError::ConfigurationError(format!(
                "Failed to parse dataset at {}: {}",
                e.path(),
                e.inner()
            ))
        })
    }

    /// Load a dataset definition from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the dataset file
    pub fn from_file<P: AsRef<Path>>(path: P) -> UniverseResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UniverseError::ConfigurationError(format!(
                "Failed to read dataset file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Read dataset file {} ({} bytes)", path.display(), content.len());
        Self::from_toml_str(&content)
    }

    /// The canonical dataset compiled into the crate.
    pub fn embedded() -> UniverseResult<Self> {
        Self::from_toml_str(EMBEDDED_DATASET)
    }

    /// Render the definition back to TOML.
    pub fn to_toml_string(&self) -> UniverseResult<String> {
        toml::to_string(self).map_err(|e| {
            UniverseError::ConfigurationError(format!("Failed to render dataset: {}", e))
        })
    }
}
