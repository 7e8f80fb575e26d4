//! Error types for fixture encoding and decoding.

use thiserror::Error;

/// Errors from codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A `date` payload did not parse as `YYYY-MM-DD`.
    #[error("invalid date payload: {0:?}")]
    InvalidDate(String),

    /// A `datetime` payload did not parse as `YYYY-MM-DDTHH:MM:SS`.
    #[error("invalid datetime payload: {0:?}")]
    InvalidDateTime(String),

    /// A `blob` payload was not valid base64 text.
    #[error("invalid blob payload: {0}")]
    InvalidBlob(String),

    /// A `key` payload was not a well-formed `[kind, id_or_name, parent]`.
    #[error("invalid key payload: {0}")]
    InvalidKey(String),

    /// A JSON number that fits neither i64 nor f64.
    #[error("unrepresentable number: {0}")]
    UnrepresentableNumber(String),

    /// The fixture document root was not an array of records.
    #[error("fixture root must be an array of records")]
    RootNotArray,

    /// A record in the fixture array had the wrong shape.
    #[error("record {index}: {reason}")]
    RecordShape { index: usize, reason: String },

    /// Underlying JSON parse or serialize failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
