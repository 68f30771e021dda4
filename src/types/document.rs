//! Wire types for success documents.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A minimal `{type, id}` reference to a resource.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

/// Relationship linkage: a single (possibly null) identifier, or a list.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum Linkage {
    ToOne(Option<ResourceIdentifier>),
    ToMany(Vec<ResourceIdentifier>),
}

/// The value of one entry under `relationships`.
///
/// `data` is absent when the relationship was not loaded.
#[derive(Debug, Clone, Default, Serialize, ToSchema, PartialEq, Eq)]
pub struct RelationshipObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Linkage>,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    #[schema(value_type = Object)]
    pub attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, RelationshipObject>,
}

impl ResourceObject {
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(&self.resource_type, &self.id)
    }
}

/// Primary data of a document.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum PrimaryData {
    Resource(Option<Box<ResourceObject>>),
    Collection(Vec<ResourceObject>),
    Linkage(Linkage),
}

/// A top-level success document.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct Document {
    pub data: PrimaryData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<Value>,
}

/// The result of a conditional serialization: a body, or an empty 204.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Document(Document),
    NoContent,
}

impl Outcome {
    pub fn is_no_content(&self) -> bool {
        matches!(self, Outcome::NoContent)
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            Outcome::Document(doc) => Some(doc),
            Outcome::NoContent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_linkage_shapes() {
        let one = Linkage::ToOne(Some(ResourceIdentifier::new("authors", "9")));
        let none = Linkage::ToOne(None);
        let many = Linkage::ToMany(vec![ResourceIdentifier::new("tags", "1")]);

        assert_eq!(serde_json::to_value(one).unwrap(), json!({"type": "authors", "id": "9"}));
        assert_eq!(serde_json::to_value(none).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(many).unwrap(), json!([{"type": "tags", "id": "1"}]));
    }

    #[test]
    fn test_resource_object_omits_empty_sections() {
        let object = ResourceObject {
            resource_type: "posts".to_string(),
            id: "1".to_string(),
            attributes: Map::new(),
            relationships: BTreeMap::new(),
        };
        assert_eq!(serde_json::to_value(&object).unwrap(), json!({"type": "posts", "id": "1"}));
    }

    #[test]
    fn test_unloaded_relationship_has_no_data_key() {
        let rel = RelationshipObject::default();
        assert_eq!(serde_json::to_value(rel).unwrap(), json!({}));
    }

    #[test]
    fn test_null_document() {
        let doc = Document {
            data: PrimaryData::Resource(None),
            included: None,
            meta: Some(json!({"count": 0})),
            jsonapi: None,
        };
        assert_eq!(
            serde_json::to_value(doc).unwrap(),
            json!({"data": null, "meta": {"count": 0}})
        );
    }
}
