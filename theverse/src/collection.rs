//! Read-only ordered collections with exact-key and normalized-name lookup.
//!
//! Every canonical key also has an identifier form: lowercase, with each character that is
//! not alphanumeric or `_` replaced by `_` (`"Solar System"` -> `solar_system`). The
//! identifier index is built once at construction; two keys that normalize to the same
//! identifier are rejected with [`UniverseError::NameCollision`].
//!
//! Identifiers are lookup keys, not Rust identifiers: nothing is prefixed, so a key that
//! starts with a digit keeps it (`"61 Cygni A"` -> `61_cygni_a`).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{UniverseError, UniverseResult};

/// A record that knows its canonical name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Identifier form of a canonical key.
pub fn normalize(key: &str) -> String {
    key.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Immutable mapping from canonical key to a shared record, in insertion order.
pub struct NamedCollection<T> {
    label: String,
    entries: IndexMap<String, Arc<T>>,
    identifiers: HashMap<String, usize>,
}

impl<T> NamedCollection<T> {
    /// Builds a collection from `(canonical_key, record)` pairs, keeping their order.
    pub fn new<I>(label: impl Into<String>, entries: I) -> UniverseResult<Self>
    where
        I: IntoIterator<Item = (String, Arc<T>)>,
    {
        let label = label.into();
        let mut map: IndexMap<String, Arc<T>> = IndexMap::new();
        let mut identifiers = HashMap::new();

        for (key, record) in entries {
            if map.contains_key(&key) {
                return Err(UniverseError::DuplicateName {
                    collection: label,
                    name: key,
                });
            }

            let identifier = normalize(&key);
            if let Some(&index) = identifiers.get(&identifier) {
                let existing = map
                    .get_index(index)
                    .map(|(k, _)| k.clone())
                    .unwrap_or_default();
                return Err(UniverseError::NameCollision {
                    collection: label,
                    identifier,
                    existing,
                    incoming: key,
                });
            }

            identifiers.insert(identifier, map.len());
            map.insert(key, record);
        }

        Ok(Self {
            label,
            entries: map,
            identifiers,
        })
    }

    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: IndexMap::new(),
            identifiers: HashMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Exact, case-sensitive lookup.
    pub fn get_by_key(&self, key: &str) -> UniverseResult<&Arc<T>> {
        self.entries
            .get(key)
            .ok_or_else(|| UniverseError::KeyNotFound {
                collection: self.label.clone(),
                key: key.to_string(),
            })
    }

    /// Lookup by identifier; the argument is normalized first, so `"earth"` and `"Earth"`
    /// both match the key `"Earth"`.
    pub fn get_by_name(&self, identifier: &str) -> UniverseResult<&Arc<T>> {
        self.identifiers
            .get(&normalize(identifier))
            .and_then(|&index| self.entries.get_index(index))
            .map(|(_, record)| record)
            .ok_or_else(|| UniverseError::AttributeNotFound {
                object: self.label.clone(),
                attribute: identifier.to_string(),
            })
    }

    pub fn get(&self, key: &str) -> Option<&Arc<T>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<T>)> + '_ {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<T>> + '_ {
        self.entries.values()
    }

    /// Identifier forms, in insertion order.
    pub fn identifiers(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.keys().map(|key| normalize(key))
    }

    /// Always fails: collections are read-only once built.
    pub fn insert(&self, _key: &str, _record: Arc<T>) -> UniverseResult<()> {
        Err(UniverseError::immutable(&self.label, "insert"))
    }

    /// Always fails: collections are read-only once built.
    pub fn remove(&self, _key: &str) -> UniverseResult<Arc<T>> {
        Err(UniverseError::immutable(&self.label, "remove"))
    }

    /// Always fails: collections are read-only once built.
    pub fn update(&self, _key: &str, _record: Arc<T>) -> UniverseResult<Arc<T>> {
        Err(UniverseError::immutable(&self.label, "update"))
    }
}

impl<T: Named> NamedCollection<T> {
    /// Builds a collection keyed by each record's own name.
    pub fn from_named<I>(label: impl Into<String>, records: I) -> UniverseResult<Self>
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        Self::new(
            label,
            records
                .into_iter()
                .map(|record| (record.name().to_string(), record)),
        )
    }
}

impl<T> Clone for NamedCollection<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            entries: self.entries.clone(),
            identifiers: self.identifiers.clone(),
        }
    }
}

impl<T> fmt::Debug for NamedCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedCollection")
            .field("label", &self.label)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a NamedCollection<T> {
    type Item = (&'a String, &'a Arc<T>);
    type IntoIter = indexmap::map::Iter<'a, String, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: Serialize> Serialize for NamedCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, record) in &self.entries {
            map.serialize_entry(key, record.as_ref())?;
        }
        map.end()
    }
}
