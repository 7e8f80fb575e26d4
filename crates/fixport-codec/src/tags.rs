//! Value-level tagged encoding.
//!
//! [`encode_value`] lowers a [`FieldValue`] to a `serde_json::Value`;
//! [`decode_value`] reverses it. Both walk containers recursively. Encoding
//! is pure and infallible; decoding fails on a malformed payload under a
//! recognized tag and otherwise passes plain JSON through unchanged.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Map, Value};

use fixport_types::{EntityKey, FieldValue, KeyId};

use crate::error::{CodecError, CodecResult};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format for timestamps. No timezone, no sub-second precision.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const TAG_DATE: &str = "date";
const TAG_DATETIME: &str = "datetime";
const TAG_BLOB: &str = "blob";
const TAG_KEY: &str = "key";

/// Encode a field value as plain JSON, tagging the non-native types.
///
/// JSON-native scalars and containers pass through (containers recursively);
/// dates, datetimes, blobs, and keys become single-entry tagged objects.
pub fn encode_value(value: &FieldValue) -> Value {
    match value {
        // Checked before Date: a timestamp carries both components.
        FieldValue::DateTime(dt) => json!({ TAG_DATETIME: dt.format(DATETIME_FORMAT).to_string() }),
        FieldValue::Date(d) => json!({ TAG_DATE: d.format(DATE_FORMAT).to_string() }),
        FieldValue::Blob(bytes) => json!({ TAG_BLOB: BASE64.encode(bytes) }),
        FieldValue::Key(key) => encode_key(key),
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Int(i) => Value::from(*i),
        FieldValue::Float(f) => Value::from(*f),
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::List(items) => Value::Array(items.iter().map(encode_value).collect()),
        FieldValue::Map(map) => Value::Object(
            map.iter()
                .map(|(name, v)| (name.clone(), encode_value(v)))
                .collect(),
        ),
    }
}

/// Encode an entity key as `{"key": [kind, id_or_name, parent]}`.
///
/// The parent slot holds `null` for a root key, or the parent's own tagged
/// encoding, recursively. A chain of N ancestors nests N levels deep.
pub fn encode_key(key: &EntityKey) -> Value {
    let id = match &key.id {
        KeyId::Id(id) => json!(id),
        KeyId::Name(name) => json!(name),
    };
    let parent = match &key.parent {
        Some(parent) => encode_key(parent),
        None => Value::Null,
    };
    json!({ TAG_KEY: [json!(key.kind), id, parent] })
}

/// Decode plain JSON into a field value, recognizing tagged objects.
///
/// Every object with exactly one entry is sniffed: the entry's name is
/// stripped of leading/trailing underscores and compared against the four
/// tag names. A match is always treated as a tagged value, so a malformed
/// payload under a matching name is an error, never literal data. Objects
/// that don't match pass through as maps.
pub fn decode_value(value: Value) -> CodecResult<FieldValue> {
    match value {
        Value::Null => Ok(FieldValue::Null),
        Value::Bool(b) => Ok(FieldValue::Bool(b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(FieldValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(FieldValue::Float(f))
            } else {
                Err(CodecError::UnrepresentableNumber(n.to_string()))
            }
        }
        Value::String(s) => Ok(FieldValue::Text(s)),
        Value::Array(items) => Ok(FieldValue::List(
            items
                .into_iter()
                .map(decode_value)
                .collect::<CodecResult<Vec<_>>>()?,
        )),
        Value::Object(map) => decode_object(map),
    }
}

/// Decode a key payload into an [`EntityKey`].
///
/// Accepts the tagged form `{"key": [kind, id_or_name, parent]}` or, for
/// compatibility with fixtures that wrote key paths bare, the 3-element
/// array alone. The parent slot accepts `null` or either form recursively.
pub fn decode_key(value: Value) -> CodecResult<EntityKey> {
    match value {
        Value::Object(map) if map.len() == 1 => {
            let (name, payload) = map
                .into_iter()
                .next()
                .ok_or_else(|| CodecError::InvalidKey("empty object".into()))?;
            if name.trim_matches('_') != TAG_KEY {
                return Err(CodecError::InvalidKey(format!(
                    "unexpected tag {name:?}"
                )));
            }
            decode_key_path(payload)
        }
        Value::Array(_) => decode_key_path(value),
        other => Err(CodecError::InvalidKey(format!(
            "expected key object or path array, got {other}"
        ))),
    }
}

fn decode_object(map: Map<String, Value>) -> CodecResult<FieldValue> {
    if map.len() == 1 {
        // Single-entry objects are tag candidates. The borrow here only
        // inspects the name; payload ownership is taken once we know the
        // name matched a tag.
        let name = map.keys().next().cloned().unwrap_or_default();
        let tag = name.trim_matches('_').to_string();
        if matches!(tag.as_str(), TAG_DATE | TAG_DATETIME | TAG_BLOB | TAG_KEY) {
            let payload = map
                .into_iter()
                .next()
                .map(|(_, v)| v)
                .unwrap_or(Value::Null);
            return decode_tagged(&tag, payload);
        }
    }
    Ok(FieldValue::Map(
        map.into_iter()
            .map(|(name, v)| Ok((name, decode_value(v)?)))
            .collect::<CodecResult<BTreeMap<_, _>>>()?,
    ))
}

fn decode_tagged(tag: &str, payload: Value) -> CodecResult<FieldValue> {
    match tag {
        TAG_DATETIME => {
            let text = payload
                .as_str()
                .ok_or_else(|| CodecError::InvalidDateTime(payload.to_string()))?;
            let dt = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .map_err(|_| CodecError::InvalidDateTime(text.to_string()))?;
            Ok(FieldValue::DateTime(dt))
        }
        TAG_DATE => {
            let text = payload
                .as_str()
                .ok_or_else(|| CodecError::InvalidDate(payload.to_string()))?;
            let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map_err(|_| CodecError::InvalidDate(text.to_string()))?;
            Ok(FieldValue::Date(date))
        }
        TAG_BLOB => {
            let text = payload
                .as_str()
                .ok_or_else(|| CodecError::InvalidBlob(payload.to_string()))?;
            let bytes = BASE64
                .decode(text)
                .map_err(|e| CodecError::InvalidBlob(e.to_string()))?;
            Ok(FieldValue::Blob(bytes))
        }
        TAG_KEY => Ok(FieldValue::Key(decode_key_path(payload)?)),
        _ => unreachable!("decode_tagged called with unknown tag"),
    }
}

/// Decode the `[kind, id_or_name, parent]` path sequence.
fn decode_key_path(payload: Value) -> CodecResult<EntityKey> {
    let Value::Array(parts) = payload else {
        return Err(CodecError::InvalidKey(format!(
            "payload must be an array, got {payload}"
        )));
    };
    if parts.len() != 3 {
        return Err(CodecError::InvalidKey(format!(
            "path must have 3 elements, got {}",
            parts.len()
        )));
    }
    let mut parts = parts.into_iter();
    let kind = match parts.next() {
        Some(Value::String(kind)) => kind,
        other => {
            return Err(CodecError::InvalidKey(format!(
                "kind must be a string, got {other:?}"
            )))
        }
    };
    let id = match parts.next() {
        Some(Value::Number(n)) => KeyId::Id(n.as_i64().ok_or_else(|| {
            CodecError::InvalidKey(format!("id must be an integer, got {n}"))
        })?),
        Some(Value::String(name)) => KeyId::Name(name),
        other => {
            return Err(CodecError::InvalidKey(format!(
                "id_or_name must be an integer or string, got {other:?}"
            )))
        }
    };
    let parent = match parts.next() {
        Some(Value::Null) | None => None,
        Some(value) => Some(Box::new(decode_key(value)?)),
    };
    Ok(EntityKey { kind, id, parent })
}
