use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::DocumentError;

/// Decode a raw request body.
///
/// A zero-length body decodes to an empty object. Anything else that is not
/// valid JSON, whitespace included, is `MalformedInput`, which the boundary
/// turns into a fixed 400 response.
///
/// Example:
/// ```rust
/// use jsonapi_core::decode_body;
/// let body = decode_body(br#"{"data": {"type": "posts"}}"#).unwrap();
/// assert_eq!(body["data"]["type"], "posts");
/// assert!(decode_body(b"").unwrap().as_object().unwrap().is_empty());
/// assert!(decode_body(b"{not json").is_err());
/// ```
pub fn decode_body(raw: &[u8]) -> Result<Value, DocumentError> {
    if raw.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(raw).map_err(|e| {
        warn!(event = "Decode", phase = "Parse", error = e.to_string());
        DocumentError::MalformedInput(e.to_string())
    })
}

/// Decode a raw request body straight into a typed payload.
///
/// An empty body is decoded as `{}`; shape mismatches are also `MalformedInput`.
pub fn decode_body_as<T: DeserializeOwned>(raw: &[u8]) -> Result<T, DocumentError> {
    let value = decode_body(raw)?;
    serde_json::from_value(value).map_err(|e| {
        warn!(event = "Decode", phase = "Shape", error = e.to_string());
        DocumentError::MalformedInput(e.to_string())
    })
}
