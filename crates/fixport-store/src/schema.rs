//! Schema descriptors and the explicit registry.
//!
//! A [`Schema`] describes one entity kind: the dotted identifier fixtures
//! refer to it by, the kind name stored keys carry, and the declared field
//! names. The [`SchemaRegistry`] is populated at process startup and looked
//! up by exact identifier match; there is no dynamic module resolution.

use std::collections::{BTreeMap, HashMap};

use fixport_types::{Entity, EntityKey, FieldValue};

use crate::error::{StoreError, StoreResult};

/// Descriptor for one entity kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    /// Dotted identifier fixtures use, e.g. `app.models.Widget`.
    pub identifier: String,
    /// Kind name carried by stored keys, e.g. `Widget`.
    pub kind: String,
    /// Declared field names, in declaration order.
    pub fields: Vec<String>,
}

impl Schema {
    /// Create a schema descriptor.
    pub fn new(
        identifier: impl Into<String>,
        kind: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            kind: kind.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the schema declares the given field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Construct an entity of this kind from a key and a field map.
    ///
    /// Every field name must be declared by the schema; the first unknown
    /// name fails with [`StoreError::UnknownField`], reporting the kind and
    /// key of the offending record. A present key must name this schema's
    /// kind.
    pub fn build(
        &self,
        key: Option<EntityKey>,
        fields: BTreeMap<String, FieldValue>,
    ) -> StoreResult<Entity> {
        if let Some(key) = &key {
            if key.kind != self.kind {
                return Err(StoreError::KindMismatch {
                    entity_kind: self.kind.clone(),
                    key_kind: key.kind.clone(),
                });
            }
        }
        let key_display = key
            .as_ref()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "(auto)".into());
        for name in fields.keys() {
            if !self.has_field(name) {
                return Err(StoreError::UnknownField {
                    kind: self.kind.clone(),
                    key: key_display,
                    field: name.clone(),
                });
            }
        }
        Ok(Entity {
            kind: self.kind.clone(),
            key,
            fields,
        })
    }
}

/// Exact-match registry from dotted identifier to [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its identifier.
    pub fn register(&mut self, schema: Schema) -> StoreResult<()> {
        if self.schemas.contains_key(&schema.identifier) {
            return Err(StoreError::DuplicateSchema(schema.identifier));
        }
        tracing::debug!(identifier = %schema.identifier, kind = %schema.kind, "registered schema");
        self.schemas.insert(schema.identifier.clone(), schema);
        Ok(())
    }

    /// Look up a schema by exact identifier.
    pub fn resolve(&self, identifier: &str) -> StoreResult<&Schema> {
        self.schemas
            .get(identifier)
            .ok_or_else(|| StoreError::UnknownSchema(identifier.to_string()))
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        ids.sort();
        ids
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_schema() -> Schema {
        Schema::new("app.models.Widget", "Widget", ["name", "count"])
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    #[test]
    fn register_and_resolve() {
        let mut registry = SchemaRegistry::new();
        registry.register(widget_schema()).unwrap();
        let schema = registry.resolve("app.models.Widget").unwrap();
        assert_eq!(schema.kind, "Widget");
    }

    #[test]
    fn resolve_unknown_identifier_fails() {
        let registry = SchemaRegistry::new();
        let err = registry.resolve("app.models.Missing").unwrap_err();
        assert_eq!(err, StoreError::UnknownSchema("app.models.Missing".into()));
    }

    #[test]
    fn resolve_is_exact_match() {
        let mut registry = SchemaRegistry::new();
        registry.register(widget_schema()).unwrap();
        assert!(registry.resolve("Widget").is_err());
        assert!(registry.resolve("app.models.widget").is_err());
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = SchemaRegistry::new();
        registry.register(widget_schema()).unwrap();
        let err = registry.register(widget_schema()).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSchema(_)));
    }

    #[test]
    fn identifiers_sorted() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(Schema::new("b.B", "B", Vec::<String>::new()))
            .unwrap();
        registry
            .register(Schema::new("a.A", "A", Vec::<String>::new()))
            .unwrap();
        assert_eq!(registry.identifiers(), vec!["a.A", "b.B"]);
    }

    // -----------------------------------------------------------------------
    // Entity construction
    // -----------------------------------------------------------------------

    #[test]
    fn build_accepts_declared_fields() {
        let schema = widget_schema();
        let entity = schema
            .build(
                Some(EntityKey::new("Widget", 1)),
                [
                    ("name".to_string(), FieldValue::Text("foo".into())),
                    ("count".to_string(), FieldValue::Int(3)),
                ]
                .into(),
            )
            .unwrap();
        assert_eq!(entity.kind, "Widget");
        assert_eq!(entity.field("count"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn build_accepts_partial_fields() {
        let schema = widget_schema();
        let entity = schema
            .build(None, [("name".to_string(), FieldValue::Text("x".into()))].into())
            .unwrap();
        assert!(entity.field("count").is_none());
    }

    #[test]
    fn build_rejects_unknown_field_with_diagnostics() {
        let schema = widget_schema();
        let err = schema
            .build(
                Some(EntityKey::new("Widget", 9)),
                [("nmae".to_string(), FieldValue::Text("typo".into()))].into(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::UnknownField {
                kind: "Widget".into(),
                key: "Widget:9".into(),
                field: "nmae".into(),
            }
        );
    }

    #[test]
    fn build_keyless_reports_auto_key() {
        let schema = widget_schema();
        let err = schema
            .build(None, [("bogus".to_string(), FieldValue::Null)].into())
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownField { key, .. } if key == "(auto)"));
    }

    #[test]
    fn build_rejects_mismatched_key_kind() {
        let schema = widget_schema();
        let err = schema
            .build(Some(EntityKey::new("Gadget", 1)), BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::KindMismatch { .. }));
    }
}
