use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::EntityKey;
use crate::value::FieldValue;

/// A single persisted record: a kind, an optional key, and named fields.
///
/// An entity with no key has not been stored yet; the datastore assigns a
/// numeric id on `put`. Field order is irrelevant; a `BTreeMap` keeps
/// serialized output deterministic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity's kind (schema name).
    pub kind: String,
    /// Identifier, if already assigned.
    pub key: Option<EntityKey>,
    /// Field name to value.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Entity {
    /// Create an empty, keyless entity of the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            key: None,
            fields: BTreeMap::new(),
        }
    }

    /// Attach a key.
    pub fn with_key(mut self, key: EntityKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Set a field, builder-style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_kind_key_and_fields() {
        let entity = Entity::new("Widget")
            .with_key(EntityKey::new("Widget", 1))
            .with_field("name", "foo")
            .with_field("count", 3i64);

        assert_eq!(entity.kind, "Widget");
        assert_eq!(entity.key, Some(EntityKey::new("Widget", 1)));
        assert_eq!(entity.field("name"), Some(&FieldValue::Text("foo".into())));
        assert_eq!(entity.field("count"), Some(&FieldValue::Int(3)));
        assert_eq!(entity.field("missing"), None);
    }

    #[test]
    fn new_entity_has_no_key() {
        assert!(Entity::new("Widget").key.is_none());
    }
}
