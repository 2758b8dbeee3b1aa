//! Conversion between Firestore's typed JSON values and plain JSON.
//!
//! Firestore's REST and event payloads wrap every value in a single-key
//! object naming its type (`{"integerValue": "12"}`). The handler works on
//! plain `serde_json::Value`s, so payloads are decoded on the way in and
//! records encoded on the way out.

use serde_json::{Map, Number, Value};

use crate::domain::Fields;
use crate::error::{Error, Result};

/// Decode a Firestore `fields` map into plain JSON fields.
///
/// # Errors
///
/// Returns [`Error::Event`] when a value is malformed.
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Fields> {
    fields
        .iter()
        .map(|(name, typed)| Ok((name.clone(), decode_value(typed)?)))
        .collect()
}

/// Decode one typed value.
///
/// Non-finite doubles and unrecognised value types decode to `null`, which
/// downstream coercion treats as unknown.
///
/// # Errors
///
/// Returns [`Error::Event`] when the value is malformed.
pub fn decode_value(typed: &Value) -> Result<Value> {
    let Some(object) = typed.as_object() else {
        return Err(malformed("value is not an object", typed));
    };
    let Some((kind, inner)) = object.iter().next() else {
        return Err(malformed("value has no type", typed));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| malformed("booleanValue is not a bool", typed)),
        "integerValue" => decode_integer(inner).ok_or_else(|| malformed("bad integerValue", typed)),
        "doubleValue" => decode_double(inner).ok_or_else(|| malformed("bad doubleValue", typed)),
        "stringValue" | "timestampValue" | "bytesValue" | "referenceValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| malformed("expected a string", typed)),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(values)) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>>>()?,
                None => Vec::new(),
                Some(_) => return Err(malformed("arrayValue.values is not an array", typed)),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => match inner.get("fields") {
            Some(Value::Object(fields)) => Ok(Value::Object(decode_fields(fields)?)),
            None => Ok(Value::Object(Map::new())),
            Some(_) => Err(malformed("mapValue.fields is not an object", typed)),
        },
        // Types this handler never reads (vectors and later additions).
        _ => Ok(Value::Null),
    }
}

fn decode_integer(inner: &Value) -> Option<Value> {
    match inner {
        Value::String(s) => s.parse::<i64>().ok().map(|n| Value::Number(n.into())),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(Value::Number(n.clone())),
        _ => None,
    }
}

fn decode_double(inner: &Value) -> Option<Value> {
    match inner {
        Value::Number(n) => Some(Value::Number(n.clone())),
        Value::String(s) => match s.as_str() {
            "NaN" | "Infinity" | "-Infinity" => Some(Value::Null),
            other => other
                .parse::<f64>()
                .ok()
                .map(|f| Number::from_f64(f).map_or(Value::Null, Value::Number)),
        },
        _ => None,
    }
}

fn malformed(reason: &str, typed: &Value) -> Error {
    Error::Event(format!("malformed Firestore value ({reason}): {typed}"))
}

/// Encode plain JSON fields as a Firestore `fields` map.
#[must_use]
pub fn encode_fields(fields: &Fields) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect()
}

/// Encode one plain value.
///
/// Integral numbers become `integerValue`, matching how client SDKs write
/// whole numbers; everything else numeric is a `doubleValue`.
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    let mut typed = Map::with_capacity(1);
    match value {
        Value::Null => {
            typed.insert("nullValue".into(), Value::Null);
        }
        Value::Bool(b) => {
            typed.insert("booleanValue".into(), Value::Bool(*b));
        }
        Value::Number(n) => match integral(n) {
            Some(i) => {
                typed.insert("integerValue".into(), Value::String(i.to_string()));
            }
            None => {
                typed.insert("doubleValue".into(), Value::Number(n.clone()));
            }
        },
        Value::String(s) => {
            typed.insert("stringValue".into(), Value::String(s.clone()));
        }
        Value::Array(values) => {
            let values = values.iter().map(encode_value).collect();
            let mut array = Map::new();
            array.insert("values".into(), Value::Array(values));
            typed.insert("arrayValue".into(), Value::Object(array));
        }
        Value::Object(fields) => {
            let mut map = Map::new();
            map.insert("fields".into(), Value::Object(encode_fields(fields)));
            typed.insert("mapValue".into(), Value::Object(map));
        }
    }
    Value::Object(typed)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // 2^63 bounds the range an i64 can hold exactly.
    let in_range = f >= -9_223_372_036_854_775_808.0 && f < 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}
