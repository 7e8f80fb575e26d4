//! Error types for schema and datastore operations.

use thiserror::Error;

/// Errors from store and schema operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The dotted identifier is not registered.
    #[error("unknown schema: {0}")]
    UnknownSchema(String),

    /// A schema with this identifier is already registered.
    #[error("schema already registered: {0}")]
    DuplicateSchema(String),

    /// A field name the schema does not declare. Carries the kind and key
    /// so the offending record can be found.
    #[error("unknown field {field:?} for kind {kind} (key {key})")]
    UnknownField {
        kind: String,
        key: String,
        field: String,
    },

    /// An entity's key names a different kind than the entity itself.
    #[error("key kind {key_kind} does not match entity kind {entity_kind}")]
    KindMismatch {
        entity_kind: String,
        key_kind: String,
    },

    /// The underlying backend rejected a write.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
