//! Error types for fixture operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or dumping fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Malformed fixture text or tagged value.
    #[error(transparent)]
    Codec(#[from] fixport_codec::CodecError),

    /// Schema resolution, field validation, or persistence failure.
    #[error(transparent)]
    Store(#[from] fixport_store::StoreError),

    /// Could not read the fixture file.
    #[error("cannot read fixture file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
