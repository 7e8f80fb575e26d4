//! Fixture-file records.
//!
//! A fixture document is a JSON array of records, each shaped as:
//!
//! ```json
//! {
//!     "model": "app.models.Widget",
//!     "key": { "key": ["Widget", 1, null] },
//!     "fields": { "name": "foo", "count": 3 }
//! }
//! ```
//!
//! `model` is the dotted schema identifier, `key` is optional (null or
//! absent means the datastore assigns one on load), and `fields` maps field
//! names to tagged-encoded values.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use fixport_types::{EntityKey, FieldValue};

use crate::error::{CodecError, CodecResult};
use crate::tags::{decode_key, decode_value, encode_key, encode_value};

/// One record of a fixture file: a schema identifier, an optional key, and
/// the entity's fields.
#[derive(Clone, Debug, PartialEq)]
pub struct FixtureRecord {
    /// Dotted schema identifier, e.g. `app.models.Widget`.
    pub model: String,
    /// Entity key, if the fixture pins one.
    pub key: Option<EntityKey>,
    /// Field name to decoded value.
    pub fields: BTreeMap<String, FieldValue>,
}

impl FixtureRecord {
    /// Create a keyless record.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            key: None,
            fields: BTreeMap::new(),
        }
    }

    /// Attach a key, builder-style.
    pub fn with_key(mut self, key: EntityKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Set a field, builder-style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// Parse a fixture document into records, in file order.
///
/// The root must be an array; every element must be an object with a string
/// `model` member and an object `fields` member. `key` may be absent, null,
/// or a tagged key value. Unknown extra members are ignored.
pub fn parse_fixtures(text: &str) -> CodecResult<Vec<FixtureRecord>> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Array(items) = root else {
        return Err(CodecError::RootNotArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect()
}

fn parse_record(index: usize, value: Value) -> CodecResult<FixtureRecord> {
    let Value::Object(mut map) = value else {
        return Err(CodecError::RecordShape {
            index,
            reason: "record must be an object".into(),
        });
    };

    let model = match map.remove("model") {
        Some(Value::String(model)) => model,
        Some(other) => {
            return Err(CodecError::RecordShape {
                index,
                reason: format!("'model' must be a string, got {other}"),
            })
        }
        None => {
            return Err(CodecError::RecordShape {
                index,
                reason: "missing 'model' member".into(),
            })
        }
    };

    let key = match map.remove("key") {
        None | Some(Value::Null) => None,
        Some(value) => Some(decode_key(value)?),
    };

    let fields = match map.remove("fields") {
        Some(Value::Object(fields)) => decode_fields(fields)?,
        Some(other) => {
            return Err(CodecError::RecordShape {
                index,
                reason: format!("'fields' must be an object, got {other}"),
            })
        }
        None => {
            return Err(CodecError::RecordShape {
                index,
                reason: "missing 'fields' member".into(),
            })
        }
    };

    Ok(FixtureRecord { model, key, fields })
}

fn decode_fields(fields: Map<String, Value>) -> CodecResult<BTreeMap<String, FieldValue>> {
    fields
        .into_iter()
        .map(|(name, value)| Ok((name, decode_value(value)?)))
        .collect()
}

/// Serialize records as 4-space-indented JSON text.
///
/// Records keep their order; keys are emitted in tagged form or as `null`.
pub fn serialize_fixtures(records: &[FixtureRecord]) -> CodecResult<String> {
    let items: Vec<Value> = records.iter().map(record_to_value).collect();
    to_indented_json(&Value::Array(items))
}

fn record_to_value(record: &FixtureRecord) -> Value {
    let mut map = Map::new();
    map.insert("model".into(), Value::String(record.model.clone()));
    map.insert(
        "key".into(),
        match &record.key {
            Some(key) => encode_key(key),
            None => Value::Null,
        },
    );
    map.insert(
        "fields".into(),
        Value::Object(
            record
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), encode_value(value)))
                .collect(),
        ),
    );
    Value::Object(map)
}

fn to_indented_json(value: &Value) -> CodecResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf).expect("serde_json output is UTF-8"))
}
