//! Per-request selection: caller overrides, raw query parameters and the
//! immutable options value the serializer consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::terms::resolve_terms;

use super::fieldset::FieldSet;
use super::term::{TermSet, TermSpec};

/// Programmatic options supplied by a controller (or as process-wide defaults).
///
/// Keys left unset fall back to the request parameters, then to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SerializeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<TermSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<TermSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<Value>,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include(mut self, include: impl Into<TermSpec>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn with_exclude(mut self, exclude: impl Into<TermSpec>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_jsonapi(mut self, jsonapi: Value) -> Self {
        self.jsonapi = Some(jsonapi);
        self
    }
}

/// Selection parameters parsed from the request's query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<TermSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<TermSpec>,
    #[serde(default, skip_serializing_if = "FieldSet::is_empty")]
    pub fields: FieldSet,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse decoded query pairs.
    ///
    /// Accepts `include`, `exclude` (comma-delimited, repeatable) and
    /// `fields[<type>]`. Other keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut include: Vec<String> = Vec::new();
        let mut exclude: Vec<String> = Vec::new();
        let mut fields = FieldSet::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "include" => include.push(value.to_string()),
                "exclude" => exclude.push(value.to_string()),
                _ => {
                    let resource_type = key
                        .strip_prefix("fields[")
                        .and_then(|rest| rest.strip_suffix(']'));
                    let has_names = value.split(',').any(|f| !f.trim().is_empty());
                    if let (Some(resource_type), true) = (resource_type, has_names) {
                        fields.insert(resource_type, value);
                    }
                }
            }
        }

        let joined = |raw: Vec<String>| {
            let spec = TermSpec::Delimited(raw.join(","));
            (!spec.is_empty()).then_some(spec)
        };

        QueryParams {
            include: joined(include),
            exclude: joined(exclude),
            fields,
        }
    }

    fn include(&self) -> Option<&TermSpec> {
        self.include.as_ref().filter(|spec| !spec.is_empty())
    }

    fn exclude(&self) -> Option<&TermSpec> {
        self.exclude.as_ref().filter(|spec| !spec.is_empty())
    }

    fn fields(&self) -> Option<&FieldSet> {
        (!self.fields.is_empty()).then_some(&self.fields)
    }
}

/// The final, immutable selection for one serialization call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionOptions {
    include: Option<TermSet>,
    exclude: Option<TermSet>,
    fields: FieldSet,
    is_collection: bool,
    meta: Option<Value>,
    jsonapi: Option<Value>,
}

impl SelectionOptions {
    /// Start from the caller's programmatic options.
    pub fn builder(caller: &SerializeOptions) -> SelectionOptionsBuilder<'_> {
        SelectionOptionsBuilder {
            caller,
            params: None,
            defaults: None,
            is_collection: false,
        }
    }

    /// Resolved inclusion terms. `None` when nothing is to be included.
    pub fn include(&self) -> Option<&TermSet> {
        self.include.as_ref()
    }

    /// Exclusion terms as supplied, before reconciliation.
    pub fn exclude(&self) -> Option<&TermSet> {
        self.exclude.as_ref()
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    pub fn jsonapi(&self) -> Option<&Value> {
        self.jsonapi.as_ref()
    }
}

/// Merges caller options, request parameters and serializer defaults.
///
/// For each key the first source that sets it wins: caller, request, defaults.
pub struct SelectionOptionsBuilder<'a> {
    caller: &'a SerializeOptions,
    params: Option<&'a QueryParams>,
    defaults: Option<&'a SerializeOptions>,
    is_collection: bool,
}

impl<'a> SelectionOptionsBuilder<'a> {
    /// Fill gaps from the request's query parameters.
    pub fn with_params(mut self, params: &'a QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Fill remaining gaps from process-wide serializer defaults.
    pub fn with_defaults(mut self, defaults: &'a SerializeOptions) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn collection(mut self, is_collection: bool) -> Self {
        self.is_collection = is_collection;
        self
    }

    pub fn build(self) -> SelectionOptions {
        let params = self.params;
        let defaults = self.defaults;

        let include = self
            .caller
            .include
            .as_ref()
            .or_else(|| params.and_then(QueryParams::include));
        let default_include = defaults.and_then(|d| d.include.as_ref());
        let exclude = self
            .caller
            .exclude
            .as_ref()
            .or_else(|| params.and_then(QueryParams::exclude))
            .or_else(|| defaults.and_then(|d| d.exclude.as_ref()));
        let fields = self
            .caller
            .fields
            .as_ref()
            .or_else(|| params.and_then(QueryParams::fields))
            .or_else(|| defaults.and_then(|d| d.fields.as_ref()))
            .cloned()
            .unwrap_or_default();

        // Reconciliation only runs when both directives are present. A
        // configured default include is merged in afterwards and never filtered.
        let resolved_include = match (include, exclude) {
            (Some(include), Some(exclude)) => resolve_terms(include, exclude),
            (Some(include), None) => Some(include.to_term_set()).filter(|set| !set.is_empty()),
            (None, _) => default_include
                .map(TermSpec::to_term_set)
                .filter(|set| !set.is_empty()),
        };

        let options = SelectionOptions {
            include: resolved_include,
            exclude: exclude.map(TermSpec::to_term_set),
            fields,
            is_collection: self.is_collection,
            meta: self
                .caller
                .meta
                .clone()
                .or_else(|| defaults.and_then(|d| d.meta.clone())),
            jsonapi: self
                .caller
                .jsonapi
                .clone()
                .or_else(|| defaults.and_then(|d| d.jsonapi.clone())),
        };

        debug!(
            event = "Selection",
            phase = "Built",
            include = options.include.as_ref().map(ToString::to_string),
            collection = options.is_collection,
            meta = options.meta.is_some()
        );

        options
    }
}
