//! Error types for dataset construction and lookup.

use crate::units::Dimension;

/// Result type for every fallible operation in this crate
pub type UniverseResult<T> = Result<T, UniverseError>;

/// Error type for dataset construction, lookup and unit arithmetic
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("Key not found in {collection}: {key:?}")]
    KeyNotFound { collection: String, key: String },

    #[error("Attribute not found on {object}: {attribute:?}")]
    AttributeNotFound { object: String, attribute: String },

    #[error("Collection {collection} is immutable: cannot {operation}")]
    ImmutableCollection {
        collection: String,
        operation: &'static str,
    },

    #[error("Dimension mismatch: cannot {operation} {lhs} and {rhs}")]
    DimensionMismatch {
        operation: &'static str,
        lhs: Dimension,
        rhs: Dimension,
    },

    #[error("Unsupported dimension: {operation} of {lhs} and {rhs} is not representable")]
    UnsupportedDimension {
        operation: &'static str,
        lhs: Dimension,
        rhs: Dimension,
    },

    #[error("Unknown unit: {0:?}")]
    UnknownUnit(String),

    #[error("Invalid numeric value {input:?}: {reason}")]
    InvalidValue { input: String, reason: String },

    #[error("Duplicate name in {collection}: {name:?}")]
    DuplicateName { collection: String, name: String },

    #[error(
        "{incoming:?} conflicts with existing {existing:?} in {collection}; \
         names must be unique when normalized (both map to {identifier:?})"
    )]
    NameCollision {
        collection: String,
        identifier: String,
        existing: String,
        incoming: String,
    },

    #[error("{kind} {object:?} does not accept property {property:?}")]
    UnknownProperty {
        kind: String,
        object: String,
        property: String,
    },

    #[error("Invalid unit for {object:?} property {property:?}: expected {expected}, found {found}")]
    InvalidUnit {
        object: String,
        property: String,
        expected: Dimension,
        found: Dimension,
    },

    #[error(
        "Missing reference for {object:?} property {property:?}: \
         at least one of reference and reference_url must be given"
    )]
    MissingReference { object: String, property: String },

    #[error("{object:?} links {link} to {target:?}, which does not exist")]
    UnresolvedLink {
        object: String,
        link: &'static str,
        target: String,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl UniverseError {
    pub(crate) fn immutable(collection: &str, operation: &'static str) -> Self {
        UniverseError::ImmutableCollection {
            collection: collection.to_string(),
            operation,
        }
    }
}
