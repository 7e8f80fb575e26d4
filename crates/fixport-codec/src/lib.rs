//! Tagged JSON codec for datastore fixtures.
//!
//! Fixture files are plain JSON, but entity fields can hold four types JSON
//! has no spelling for: calendar dates, second-precision timestamps, byte
//! blobs, and entity-reference keys. Each is written as a single-entry
//! object mapping a tag name to a serializable payload:
//!
//! ```json
//! { "date": "2024-05-01" }
//! { "datetime": "2024-05-01T12:30:00" }
//! { "blob": "AAEC" }
//! { "key": ["Widget", 7, null] }
//! ```
//!
//! Decoding sniffs every single-entry object for a tag, stripping any
//! enclosing underscores first so legacy `{"__date__": …}` fixtures still
//! load. User data shaped like a tagged value is therefore misread as one;
//! this collision risk is inherited from the fixture format and kept for
//! compatibility with existing files.
//!
//! # Modules
//!
//! - [`tags`] — value-level encode/decode ([`encode_value`], [`decode_value`])
//! - [`fixture`] — fixture-file records ([`parse_fixtures`], [`serialize_fixtures`])

pub mod error;
pub mod fixture;
pub mod tags;

pub use error::{CodecError, CodecResult};
pub use fixture::{parse_fixtures, serialize_fixtures, FixtureRecord};
pub use tags::{decode_key, decode_value, encode_key, encode_value, DATETIME_FORMAT, DATE_FORMAT};
