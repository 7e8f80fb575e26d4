use fixport_types::{Entity, EntityKey};

use crate::error::StoreResult;

/// The datastore operations the fixture contract needs.
///
/// All implementations must satisfy these invariants:
/// - `put` assigns a fresh numeric-id key when the entity carries none, and
///   returns the key under which the entity is now stored.
/// - `put` with an existing key overwrites the stored entity (last write
///   wins, as a fixture re-load expects).
/// - `all_of_kind` enumerates every entity of the kind with no pagination;
///   callers accept that this may be unbounded.
/// - Errors are propagated, never silently swallowed.
pub trait Datastore: Send + Sync {
    /// Persist an entity, returning its (possibly newly assigned) key.
    fn put(&self, entity: Entity) -> StoreResult<EntityKey>;

    /// Fetch an entity by key. `Ok(None)` if absent.
    fn get(&self, key: &EntityKey) -> StoreResult<Option<Entity>>;

    /// Every stored entity of the given kind.
    fn all_of_kind(&self, kind: &str) -> StoreResult<Vec<Entity>>;

    /// Number of stored entities of the given kind.
    fn count(&self, kind: &str) -> StoreResult<usize> {
        Ok(self.all_of_kind(kind)?.len())
    }
}
