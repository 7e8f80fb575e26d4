//! Load and dump operations.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use fixport_codec::{parse_fixtures, serialize_fixtures, FixtureRecord};
use fixport_store::{Datastore, SchemaRegistry};
use fixport_types::{Entity, FieldValue};

use crate::error::{FixtureError, FixtureResult};

/// Load fixtures from the given file into the datastore.
///
/// Records are applied strictly in file order; each resolves its schema,
/// validates its field names, and persists one entity. Not transactional:
/// on error, entities from earlier records stay persisted. Returns the
/// number of entities created.
pub fn load_fixtures(
    path: impl AsRef<Path>,
    registry: &SchemaRegistry,
    store: &dyn Datastore,
) -> FixtureResult<usize> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading fixtures");
    let text = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let count = load_fixtures_from_str(&text, registry, store)?;
    tracing::info!(count, "loaded fixtures");
    Ok(count)
}

/// Load fixtures from already-read fixture text. Same contract as
/// [`load_fixtures`].
pub fn load_fixtures_from_str(
    text: &str,
    registry: &SchemaRegistry,
    store: &dyn Datastore,
) -> FixtureResult<usize> {
    let records = parse_fixtures(text)?;
    let mut count = 0;
    for record in records {
        let schema = registry.resolve(&record.model)?;
        tracing::debug!(kind = %schema.kind, key = ?record.key, "creating entity");
        let entity = schema.build(record.key, record.fields)?;
        store.put(entity)?;
        count += 1;
    }
    Ok(count)
}

/// Serialize every entity of the identified kind as fixture text.
///
/// Resolves the schema, enumerates the whole kind (no pagination), and
/// builds one record per entity carrying every schema-declared field; a
/// field the entity never set is emitted as `null`. Output is 4-space
/// indented JSON, entities in key order.
pub fn dump_entities(
    identifier: &str,
    registry: &SchemaRegistry,
    store: &dyn Datastore,
) -> FixtureResult<String> {
    let schema = registry.resolve(identifier)?;
    let entities = store.all_of_kind(&schema.kind)?;
    tracing::info!(identifier, count = entities.len(), "dumping entities");

    let records: Vec<FixtureRecord> = entities
        .into_iter()
        .map(|entity| {
            let Entity { key, mut fields, .. } = entity;
            let fields: BTreeMap<String, FieldValue> = schema
                .fields
                .iter()
                .map(|name| {
                    let value = fields.remove(name).unwrap_or(FieldValue::Null);
                    (name.clone(), value)
                })
                .collect();
            FixtureRecord {
                model: identifier.to_string(),
                key,
                fields,
            }
        })
        .collect();

    Ok(serialize_fixtures(&records)?)
}
