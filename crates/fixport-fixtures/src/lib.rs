//! Fixture batch operations.
//!
//! Ties the codec to the storage seam: [`load_fixtures`] reads a fixture
//! file and persists one entity per record, [`dump_entities`] snapshots
//! every entity of a kind back into fixture text.
//!
//! Loading is sequential in file order and **not transactional**: a failure
//! partway through leaves the entities from earlier records persisted.
//! Callers wanting atomicity must pre-validate the file or load into a
//! scratch store first.

pub mod error;
pub mod local;
pub mod ops;

pub use error::{FixtureError, FixtureResult};
pub use local::LocalDatastore;
pub use ops::{dump_entities, load_fixtures, load_fixtures_from_str};
