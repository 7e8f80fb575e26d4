use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use fixport_types::{Entity, EntityKey, KeyId};

use crate::error::{StoreError, StoreResult};
use crate::traits::Datastore;

/// In-memory, HashMap-based datastore.
///
/// Intended for tests and tooling. Entities are held behind a `RwLock` and
/// cloned on read/write. Keyless entities get numeric ids from a per-store
/// counter that steps over ids already in use.
pub struct InMemoryDatastore {
    entities: RwLock<HashMap<EntityKey, Entity>>,
    next_id: AtomicI64,
}

impl InMemoryDatastore {
    /// Create a new empty datastore.
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of entities across all kinds.
    pub fn len(&self) -> usize {
        self.entities.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.read().expect("lock poisoned").is_empty()
    }

    /// Remove all entities.
    pub fn clear(&self) {
        self.entities.write().expect("lock poisoned").clear();
    }

    /// The distinct kinds currently stored, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let map = self.entities.read().expect("lock poisoned");
        let mut kinds: Vec<String> = map.keys().map(|k| k.kind.clone()).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

impl Default for InMemoryDatastore {
    fn default() -> Self {
        Self::new()
    }
}

impl Datastore for InMemoryDatastore {
    fn put(&self, mut entity: Entity) -> StoreResult<EntityKey> {
        let mut map = self.entities.write().expect("lock poisoned");
        let key = match entity.key.take() {
            Some(key) => {
                if key.kind != entity.kind {
                    return Err(StoreError::KindMismatch {
                        entity_kind: entity.kind,
                        key_kind: key.kind,
                    });
                }
                // Keep the counter ahead of pinned root numeric ids so a
                // later keyless put cannot land on this key.
                if let (KeyId::Id(id), None) = (&key.id, &key.parent) {
                    self.next_id.fetch_max(id.saturating_add(1), Ordering::Relaxed);
                }
                key
            }
            None => loop {
                let candidate = EntityKey::new(
                    entity.kind.clone(),
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                );
                if !map.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        entity.key = Some(key.clone());
        map.insert(key.clone(), entity);
        Ok(key)
    }

    fn get(&self, key: &EntityKey) -> StoreResult<Option<Entity>> {
        let map = self.entities.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn all_of_kind(&self, kind: &str) -> StoreResult<Vec<Entity>> {
        let map = self.entities.read().expect("lock poisoned");
        let mut entities: Vec<Entity> = map
            .values()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect();
        // Sorted by key so enumeration (and therefore dumps) is stable.
        entities.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entities)
    }
}

impl std::fmt::Debug for InMemoryDatastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDatastore")
            .field("entity_count", &self.len())
            .finish()
    }
}
