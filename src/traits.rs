use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::types::ResourceIdentifier;

/// A relationship value as seen by the serializer.
pub enum Related<'a> {
    /// Not loaded by the caller. Rendered without linkage and never walked.
    Unloaded,
    ToOne(Option<&'a dyn JsonApiResource>),
    ToMany(Vec<&'a dyn JsonApiResource>),
}

/// Anything that can be rendered as a JSON:API resource object, e.g. a
/// `posts` row with an `author` relationship.
///
/// The serializer only reads through this trait; it never mutates the entity.
pub trait JsonApiResource {
    /// The resource type tag ("posts", "authors", ...)
    fn resource_type(&self) -> &str;

    /// The stable identifier, already rendered as a string
    fn resource_id(&self) -> String;

    /// Attribute name to value, empty by default
    fn attributes(&self) -> Result<Map<String, Value>, DocumentError> {
        Ok(Map::new())
    }

    /// Relationship name to related entities, none by default
    fn relationships(&self) -> Vec<(String, Related<'_>)> {
        Vec::new()
    }

    /// The `{type, id}` pair identifying this resource
    fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.resource_type(), self.resource_id())
    }
}

impl<T: JsonApiResource + ?Sized> JsonApiResource for &T {
    fn resource_type(&self) -> &str {
        (**self).resource_type()
    }

    fn resource_id(&self) -> String {
        (**self).resource_id()
    }

    fn attributes(&self) -> Result<Map<String, Value>, DocumentError> {
        (**self).attributes()
    }

    fn relationships(&self) -> Vec<(String, Related<'_>)> {
        (**self).relationships()
    }
}

/// Build an attribute map from any serde value that renders as a JSON object.
pub fn attributes_from<T: Serialize + ?Sized>(value: &T) -> Result<Map<String, Value>, DocumentError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DocumentError::UnserializableOutput(format!(
            "attributes must serialize to an object, got {other}"
        ))),
        Err(e) => Err(DocumentError::UnserializableOutput(e.to_string())),
    }
}
