use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::key::EntityKey;

/// Every value a stored entity field can hold.
///
/// JSON-native scalars and containers appear alongside the four types that
/// need a tagged wire encoding: calendar dates, second-precision timestamps,
/// byte blobs, and entity-reference keys. Keeping these as distinct variants
/// means a single explicit serialization pass suffices; nothing has to sniff
/// a `String` to decide whether it is "really" bytes.
///
/// References to other entities are always keys. There is deliberately no
/// inline-entity variant: anywhere a nested entity could appear, its key
/// stands in for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Calendar date, day precision.
    Date(NaiveDate),
    /// Timestamp, second precision, no timezone. Sub-second precision is
    /// lost on round-trip; accepted.
    DateTime(NaiveDateTime),
    /// Arbitrary bytes.
    Blob(Vec<u8>),
    /// Reference to another stored entity.
    Key(EntityKey),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Human-readable name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Blob(_) => "blob",
            FieldValue::Key(_) => "key",
            FieldValue::List(_) => "list",
            FieldValue::Map(_) => "map",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(v: Vec<u8>) -> Self {
        FieldValue::Blob(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        FieldValue::DateTime(v)
    }
}

impl From<EntityKey> for FieldValue {
    fn from(v: EntityKey) -> Self {
        FieldValue::Key(v)
    }
}
