//! Sparse fieldsets keyed by resource type.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-type restriction of rendered attributes and relationships.
///
/// A type without an entry renders every field. `type` and `id` are never
/// affected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldSet(BTreeMap<String, BTreeSet<String>>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `resource_type` to the comma-separated `fields`, returning the updated set.
    pub fn with_fields(mut self, resource_type: impl Into<String>, fields: &str) -> Self {
        self.insert(resource_type, fields);
        self
    }

    /// Restrict `resource_type` to the comma-separated `fields`.
    ///
    /// Repeated calls for the same type accumulate.
    pub fn insert(&mut self, resource_type: impl Into<String>, fields: &str) {
        let entry = self.0.entry(resource_type.into()).or_default();
        entry.extend(
            fields
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The restriction for one type, if any.
    pub fn fields_for(&self, resource_type: &str) -> Option<&BTreeSet<String>> {
        self.0.get(resource_type)
    }

    /// Whether `field` should be rendered for resources of `resource_type`.
    pub fn allows(&self, resource_type: &str, field: &str) -> bool {
        self.fields_for(resource_type)
            .is_none_or(|fields| fields.contains(field))
    }
}
