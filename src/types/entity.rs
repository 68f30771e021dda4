//! A concrete, caller-built entity graph.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::traits::{JsonApiResource, Related, attributes_from};

/// A relationship held by an [`Entity`].
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    Unloaded,
    ToOne(Option<Box<Entity>>),
    ToMany(Vec<Entity>),
}

/// A domain entity with its type tag, id, attributes and relationships.
///
/// Domain types usually implement [`JsonApiResource`] directly; `Entity` is
/// for callers that assemble a graph by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    kind: String,
    id: String,
    attributes: Map<String, Value>,
    relationships: BTreeMap<String, Relation>,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl Entity {
    /// Create a new entity with `kind` and `id`.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            attributes: Map::new(),
            relationships: BTreeMap::new(),
        }
    }

    /// Add an attribute, returning the updated value.
    pub fn with_attr(mut self, k: impl Into<String>, v: impl Into<Value>) -> Self {
        self.attributes.insert(k.into(), v.into());
        self
    }

    /// Merge every field of a serde value into the attributes.
    pub fn with_attributes<T: Serialize>(mut self, value: &T) -> Result<Self, DocumentError> {
        self.attributes.extend(attributes_from(value)?);
        Ok(self)
    }

    pub fn with_to_one(mut self, name: impl Into<String>, related: Option<Entity>) -> Self {
        self.relationships
            .insert(name.into(), Relation::ToOne(related.map(Box::new)));
        self
    }

    pub fn with_to_many(mut self, name: impl Into<String>, related: Vec<Entity>) -> Self {
        self.relationships
            .insert(name.into(), Relation::ToMany(related));
        self
    }

    pub fn with_unloaded(mut self, name: impl Into<String>) -> Self {
        self.relationships.insert(name.into(), Relation::Unloaded);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl JsonApiResource for Entity {
    fn resource_type(&self) -> &str {
        &self.kind
    }

    fn resource_id(&self) -> String {
        self.id.clone()
    }

    fn attributes(&self) -> Result<Map<String, Value>, DocumentError> {
        Ok(self.attributes.clone())
    }

    fn relationships(&self) -> Vec<(String, Related<'_>)> {
        self.relationships
            .iter()
            .map(|(name, relation)| {
                let related = match relation {
                    Relation::Unloaded => Related::Unloaded,
                    Relation::ToOne(one) => {
                        Related::ToOne(one.as_deref().map(|e| e as &dyn JsonApiResource))
                    }
                    Relation::ToMany(many) => Related::ToMany(
                        many.iter().map(|e| e as &dyn JsonApiResource).collect(),
                    ),
                };
                (name.clone(), related)
            })
            .collect()
    }
}
