//! File-backed local datastore.
//!
//! The development counterpart of a real datastore backend: entities live in
//! memory and are mirrored to a single JSON document after every write, so
//! `loaddata` followed by `dumpjson` in a separate process sees the same
//! data. The on-disk document reuses the fixture record encoding with the
//! entity's kind in the `model` slot.
//!
//! Not meant for concurrent processes or large data; it rewrites the whole
//! file per put.

use std::fs;
use std::path::{Path, PathBuf};

use fixport_codec::{parse_fixtures, serialize_fixtures, FixtureRecord};
use fixport_store::{Datastore, InMemoryDatastore, StoreError, StoreResult};
use fixport_types::{Entity, EntityKey};

use crate::error::{FixtureError, FixtureResult};

/// Datastore persisted to a JSON file.
pub struct LocalDatastore {
    path: PathBuf,
    inner: InMemoryDatastore,
}

impl LocalDatastore {
    /// Open the datastore at `path`, reading existing contents if the file
    /// is present.
    pub fn open(path: impl Into<PathBuf>) -> FixtureResult<Self> {
        let path = path.into();
        let inner = InMemoryDatastore::new();
        if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| FixtureError::Io {
                path: path.clone(),
                source,
            })?;
            for record in parse_fixtures(&text)? {
                inner.put(Entity {
                    kind: record.model,
                    key: record.key,
                    fields: record.fields,
                })?;
            }
        }
        tracing::debug!(path = %path.display(), entities = inner.len(), "opened local datastore");
        Ok(Self { path, inner })
    }

    /// Where this store persists.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entities across all kinds.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn persist(&self) -> FixtureResult<()> {
        let mut records = Vec::new();
        for kind in self.inner.kinds() {
            for entity in self.inner.all_of_kind(&kind)? {
                records.push(FixtureRecord {
                    model: entity.kind,
                    key: entity.key,
                    fields: entity.fields,
                });
            }
        }
        let text = serialize_fixtures(&records)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| FixtureError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.path, text).map_err(|source| FixtureError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Datastore for LocalDatastore {
    fn put(&self, entity: Entity) -> StoreResult<EntityKey> {
        let key = self.inner.put(entity)?;
        self.persist()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(key)
    }

    fn get(&self, key: &EntityKey) -> StoreResult<Option<Entity>> {
        self.inner.get(key)
    }

    fn all_of_kind(&self, kind: &str) -> StoreResult<Vec<Entity>> {
        self.inner.all_of_kind(kind)
    }
}

impl std::fmt::Debug for LocalDatastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalDatastore")
            .field("path", &self.path)
            .field("entity_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixport_types::FieldValue;

    fn temp_store_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("datastore.json")
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDatastore::open(temp_store_path(&dir)).unwrap();
        assert!(store.is_empty());
        // Nothing written until the first put.
        assert!(!store.path().exists());
    }

    #[test]
    fn put_persists_and_reopen_sees_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_store_path(&dir);

        let key = {
            let store = LocalDatastore::open(&path).unwrap();
            store
                .put(
                    Entity::new("Widget")
                        .with_key(EntityKey::new("Widget", "w"))
                        .with_field("payload", vec![0u8, 1, 2]),
                )
                .unwrap()
        };

        let reopened = LocalDatastore::open(&path).unwrap();
        let entity = reopened.get(&key).unwrap().expect("should persist");
        assert_eq!(
            entity.field("payload"),
            Some(&FieldValue::Blob(vec![0, 1, 2]))
        );
    }

    #[test]
    fn keyless_put_assigns_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_store_path(&dir);
        let store = LocalDatastore::open(&path).unwrap();
        store.put(Entity::new("Widget").with_field("n", 1i64)).unwrap();

        let reopened = LocalDatastore::open(&path).unwrap();
        assert_eq!(reopened.all_of_kind("Widget").unwrap().len(), 1);
    }

    #[test]
    fn reopen_does_not_reuse_assigned_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_store_path(&dir);
        let first = {
            let store = LocalDatastore::open(&path).unwrap();
            store.put(Entity::new("Widget").with_field("n", 1i64)).unwrap()
        };

        // A keyless put after reopening must not clobber the persisted entity.
        let reopened = LocalDatastore::open(&path).unwrap();
        let second = reopened
            .put(Entity::new("Widget").with_field("n", 2i64))
            .unwrap();
        assert_ne!(second, first);
        assert_eq!(reopened.all_of_kind("Widget").unwrap().len(), 2);
    }

    #[test]
    fn multiple_kinds_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_store_path(&dir);
        let store = LocalDatastore::open(&path).unwrap();
        store.put(Entity::new("Widget")).unwrap();
        store.put(Entity::new("Gadget")).unwrap();

        let reopened = LocalDatastore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.all_of_kind("Gadget").unwrap().len(), 1);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/datastore.json");
        let store = LocalDatastore::open(&path).unwrap();
        store.put(Entity::new("Widget")).unwrap();
        assert!(path.exists());
    }
}
