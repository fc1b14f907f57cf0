//! Text encodings of payload trees
//!
//! Placeholders must survive whatever structured format the packet
//! serializer uses. Payloads map onto the JSON data model; MessagePack reuses
//! the same model through rmp-serde. Binary values cannot be carried inline
//! and must be deconstructed first.

use crate::{Error, Result, Value};
use serde_json::{Map, Number};

/// Convert a payload to JSON
///
/// JSON has no representation for NaN or infinite floats; those encode as
/// `null` and decode back as [`Value::Null`].
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(_) | Value::Stream(_) => return Err(Error::InlineBinary),
        Value::Array(items) => serde_json::Value::Array(
            items.iter().map(to_json).collect::<Result<Vec<_>>>()?,
        ),
        Value::Map(map) => {
            let mut obj = Map::with_capacity(map.len());
            for (k, v) in map {
                obj.insert(k.clone(), to_json(v)?);
            }
            serde_json::Value::Object(obj)
        }
        Value::Placeholder(placeholder) => serde_json::to_value(placeholder)?,
    })
}

/// Convert JSON to a payload.
///
/// Placeholder objects come back as plain maps; reconstruction recognizes
/// them by shape.
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(from_json).collect()),
        serde_json::Value::Object(obj) => {
            Value::Map(obj.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}

/// Encode a payload as a JSON string
pub fn encode_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&to_json(value)?)?)
}

/// Decode a payload from a JSON string
pub fn decode_json(text: &str) -> Result<Value> {
    Ok(from_json(serde_json::from_str(text)?))
}

/// Encode a payload as MessagePack
#[cfg(feature = "msgpack")]
pub fn encode_msgpack(value: &Value) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(&to_json(value)?)?)
}

/// Decode a payload from MessagePack
#[cfg(feature = "msgpack")]
pub fn decode_msgpack(bytes: &[u8]) -> Result<Value> {
    Ok(from_json(rmp_serde::from_slice(bytes)?))
}
