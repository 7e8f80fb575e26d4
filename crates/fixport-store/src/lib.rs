//! Storage seam for fixport.
//!
//! The fixture operations never talk to a concrete datastore; they go
//! through the [`Datastore`] trait, which models the handful of operations
//! the codec contract needs: persist an entity (assigning a key when the
//! entity has none), fetch by key, and enumerate a whole kind.
//!
//! Schema resolution is an explicit registry rather than any kind of
//! runtime module lookup: [`SchemaRegistry`] maps a dotted identifier
//! string (`app.models.Widget`) to a [`Schema`] descriptor registered at
//! process startup, and fails with [`StoreError::UnknownSchema`] when an
//! identifier is absent.
//!
//! # Backends
//!
//! - [`InMemoryDatastore`] -- `HashMap`-based store for tests, tooling, and
//!   embedding.

pub mod error;
pub mod memory;
pub mod schema;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDatastore;
pub use schema::{Schema, SchemaRegistry};
pub use traits::Datastore;
