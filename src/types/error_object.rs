//! Wire types for error documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// The normalized content of one error, before an id and status are attached.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

/// One entry of the `errors` array.
///
/// Keys whose value would be null or empty are never emitted.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct ErrorObject {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl ErrorObject {
    /// Attach a fresh id and the response status to normalized fields.
    pub fn new(fields: ErrorFields, status: Option<u16>) -> Self {
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
        ErrorObject {
            id: Uuid::new_v4(),
            title: non_empty(fields.title),
            detail: non_empty(fields.detail),
            status: status.map(|s| s.to_string()),
            source: fields.source.filter(|s| !is_blank_source(s)),
        }
    }
}

fn is_blank_source(source: &Value) -> bool {
    match source {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// The `{errors: [...]}` envelope.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn new(errors: Vec<ErrorObject>) -> Self {
        Self { errors }
    }
}
