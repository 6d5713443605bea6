//! Lenient field decoding for untrusted upstream payloads.
//!
//! Upstream schemas are optional: any field may be missing, null, or of an
//! unexpected type. These helpers turn all three cases into `None` so that
//! a single odd field never fails a whole response. Use them together with
//! `#[serde(default)]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a field as `T`, or `None` if it is null or has the wrong shape.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Decode a field that upstreams send as either a string or a number.
///
/// Numbers are rendered with their JSON text form; anything else is `None`.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

/// Render a JSON string or number as text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
