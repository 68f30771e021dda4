use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::config::SerializerConfig;
use crate::error::DocumentError;
use crate::normalizer::normalize;
use crate::traits::{JsonApiResource, Related};
use crate::types::{
    Document, ErrorDocument, ErrorObject, FieldSet, JSONAPI_MEDIA_TYPE, Linkage, Outcome,
    PrimaryData, QueryParams, RelationshipObject, ResourceIdentifier, ResourceObject, Response,
    ResponseContext, SelectionOptions, SerializeOptions,
};

/// Status used for an error response when the framework has not set one.
const FALLBACK_ERROR_STATUS: u16 = 500;

enum Primary<'a> {
    One(Option<&'a dyn JsonApiResource>),
    Many(Vec<&'a dyn JsonApiResource>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cardinality {
    One,
    Many,
}

/// The serialization handle. Cloneable and thread-safe; every call is a pure
/// transform of its inputs plus the frozen configuration.
#[derive(Debug, Clone)]
pub struct Serializer {
    config: Arc<SerializerConfig>,
}

impl Serializer {
    pub fn new(config: Arc<SerializerConfig>) -> Self {
        Serializer { config }
    }

    /// A serializer over the process-wide frozen configuration, if there is one.
    pub fn from_frozen() -> Option<Self> {
        crate::config::frozen().map(Serializer::new)
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Merge caller options, request parameters and configured defaults.
    pub fn selection(
        &self,
        options: &SerializeOptions,
        params: &QueryParams,
        is_collection: bool,
    ) -> SelectionOptions {
        SelectionOptions::builder(options)
            .with_params(params)
            .with_defaults(self.config.serializer_opts())
            .collection(is_collection)
            .build()
    }

    /// Serialize one entity into a document with `data` set to its resource object.
    pub fn serialize_model<R: JsonApiResource + ?Sized>(
        &self,
        entity: &R,
        options: &SerializeOptions,
        params: &QueryParams,
    ) -> Result<Document, DocumentError> {
        let selection = self.selection(options, params, false);
        build_document(Primary::One(Some(&entity)), &selection)
    }

    /// Serialize an optional entity.
    ///
    /// Without an entity, a caller-supplied `meta` yields `{data: null, meta}`;
    /// otherwise the outcome is no content.
    pub fn serialize_model_if<R: JsonApiResource + ?Sized>(
        &self,
        entity: Option<&R>,
        options: &SerializeOptions,
        params: &QueryParams,
    ) -> Result<Outcome, DocumentError> {
        match (entity, &options.meta) {
            (Some(entity), _) => self
                .serialize_model(entity, options, params)
                .map(Outcome::Document),
            (None, Some(meta)) => {
                let meta_only = SerializeOptions::new().with_meta(meta.clone());
                let selection = self.selection(&meta_only, params, false);
                build_document(Primary::One(None), &selection).map(Outcome::Document)
            }
            (None, None) => Ok(Outcome::NoContent),
        }
    }

    /// Serialize a homogeneous collection. `data` is always an array.
    pub fn serialize_models<R: JsonApiResource>(
        &self,
        entities: &[R],
        options: &SerializeOptions,
        params: &QueryParams,
    ) -> Result<Document, DocumentError> {
        let selection = self.selection(options, params, true);
        let primary = entities.iter().map(|e| e as &dyn JsonApiResource).collect();
        build_document(Primary::Many(primary), &selection)
    }

    /// Serialize a collection, mapping an empty one to no content unless the
    /// caller supplied `meta`.
    pub fn serialize_models_if<R: JsonApiResource>(
        &self,
        entities: &[R],
        options: &SerializeOptions,
        params: &QueryParams,
    ) -> Result<Outcome, DocumentError> {
        if !entities.is_empty() {
            return self
                .serialize_models(entities, options, params)
                .map(Outcome::Document);
        }

        match &options.meta {
            Some(meta) => {
                let meta_only = SerializeOptions::new().with_meta(meta.clone());
                let selection = self.selection(&meta_only, params, true);
                build_document(Primary::Many(Vec::new()), &selection).map(Outcome::Document)
            }
            None => Ok(Outcome::NoContent),
        }
    }

    /// A linkage-only document for a relationship endpoint.
    ///
    /// `meta` and `jsonapi` come from the caller's options, then the configured defaults.
    pub fn serialize_linkage(&self, linkage: Linkage, options: &SerializeOptions) -> Document {
        let defaults = self.config.serializer_opts();
        Document {
            data: PrimaryData::Linkage(linkage),
            included: None,
            meta: options.meta.clone().or_else(|| defaults.meta.clone()),
            jsonapi: options.jsonapi.clone().or_else(|| defaults.jsonapi.clone()),
        }
    }

    /// To-one relationship update: the new linkage if `updated`, else the
    /// no-op contract of [`Serializer::serialize_model_if`] with no entity.
    pub fn serialize_linkage_if(
        &self,
        updated: bool,
        linkage: Linkage,
        options: &SerializeOptions,
        params: &QueryParams,
    ) -> Result<Outcome, DocumentError> {
        self.linkage_outcome(updated, Cardinality::One, linkage, options, params)
    }

    /// To-many relationship update: the new linkage if `updated`, else the
    /// no-op contract of [`Serializer::serialize_models_if`] with no entities.
    pub fn serialize_linkages_if(
        &self,
        updated: bool,
        linkage: Linkage,
        options: &SerializeOptions,
        params: &QueryParams,
    ) -> Result<Outcome, DocumentError> {
        self.linkage_outcome(updated, Cardinality::Many, linkage, options, params)
    }

    fn linkage_outcome(
        &self,
        updated: bool,
        cardinality: Cardinality,
        linkage: Linkage,
        options: &SerializeOptions,
        params: &QueryParams,
    ) -> Result<Outcome, DocumentError> {
        debug!(
            event = "Linkage",
            phase = "Outcome",
            updated = updated,
            cardinality = ?cardinality
        );

        if updated {
            return Ok(Outcome::Document(self.serialize_linkage(linkage, options)));
        }

        match cardinality {
            Cardinality::One => {
                self.serialize_model_if(None::<&dyn JsonApiResource>, options, params)
            }
            Cardinality::Many => {
                self.serialize_models_if::<&dyn JsonApiResource>(&[], options, params)
            }
        }
    }

    /// Render a success body with the configured generator.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, DocumentError> {
        self.config.json_generator().render(value)
    }

    /// Turn an outcome into a response, echoing the framework's `status`.
    ///
    /// No content becomes an empty 204; a body that cannot be rendered becomes
    /// the fixed 400 response.
    pub fn respond(&self, outcome: &Outcome, status: u16) -> Response {
        match outcome {
            Outcome::NoContent => Response::no_content(),
            Outcome::Document(document) => match self.render(document) {
                Ok(body) => Response {
                    status,
                    content_type: None,
                    body: Some(body),
                },
                Err(err) => Response::from(err),
            },
        }
    }

    /// Build the error object for a failed response state.
    pub fn error_object(&self, ctx: &ResponseContext) -> ErrorObject {
        ErrorObject::new(normalize(ctx), ctx.status())
    }

    /// Normalize a failed response state into a logged `{errors: [...]}` response.
    pub fn serialize_error(&self, ctx: &ResponseContext) -> Response {
        let object = self.error_object(ctx);

        let logged = serde_json::to_string(&object).unwrap_or_else(|_| format!("{object:?}"));
        error!(
            event = "Error",
            phase = "Normalized",
            progname = self.config.logger_progname(),
            error = logged
        );

        let document = ErrorDocument::new(vec![object]);
        match self.config.json_error_generator().render(&document) {
            Ok(body) => Response {
                status: ctx.status().unwrap_or(FALLBACK_ERROR_STATUS),
                content_type: Some(JSONAPI_MEDIA_TYPE),
                body: Some(body),
            },
            Err(err) => Response::from(err),
        }
    }
}

fn build_document(
    primary: Primary<'_>,
    selection: &SelectionOptions,
) -> Result<Document, DocumentError> {
    let fields = selection.fields();
    let entities: Vec<&dyn JsonApiResource> = match &primary {
        Primary::One(one) => one.iter().copied().collect(),
        Primary::Many(many) => many.clone(),
    };

    let objects = entities
        .iter()
        .map(|entity| resource_object(*entity, fields))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen: HashSet<ResourceIdentifier> =
        objects.iter().map(ResourceObject::identifier).collect();
    let mut included = Vec::new();

    if let Some(terms) = selection.include() {
        for term in terms {
            let segments: Vec<&str> = term.segments().collect();
            for entity in &entities {
                walk(*entity, &segments, fields, &mut seen, &mut included)?;
            }
        }
    }

    let data = match primary {
        Primary::One(_) => PrimaryData::Resource(objects.into_iter().next().map(Box::new)),
        Primary::Many(_) => PrimaryData::Collection(objects),
    };

    debug!(
        event = "Document",
        phase = "Built",
        collection = selection.is_collection(),
        primary = entities.len(),
        included = included.len()
    );

    Ok(Document {
        data,
        included: (!included.is_empty()).then_some(included),
        meta: selection.meta().cloned(),
        jsonapi: selection.jsonapi().cloned(),
    })
}

/// Follow one term path from `entity`, adding every resource reached to `included`.
fn walk(
    entity: &dyn JsonApiResource,
    segments: &[&str],
    fields: &FieldSet,
    seen: &mut HashSet<ResourceIdentifier>,
    included: &mut Vec<ResourceObject>,
) -> Result<(), DocumentError> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(());
    };

    let relationships = entity.relationships();
    let Some((_, related)) = relationships.iter().find(|(name, _)| name == head) else {
        return Ok(());
    };

    let targets: Vec<&dyn JsonApiResource> = match related {
        Related::Unloaded | Related::ToOne(None) => Vec::new(),
        Related::ToOne(Some(one)) => vec![*one],
        Related::ToMany(many) => many.clone(),
    };

    for target in targets {
        if seen.insert(target.identifier()) {
            included.push(resource_object(target, fields)?);
        }
        walk(target, rest, fields, seen, included)?;
    }
    Ok(())
}

fn resource_object(
    entity: &dyn JsonApiResource,
    fields: &FieldSet,
) -> Result<ResourceObject, DocumentError> {
    let resource_type = entity.resource_type();

    let attributes = entity
        .attributes()?
        .into_iter()
        .filter(|(name, _)| fields.allows(resource_type, name))
        .collect();

    let relationships: BTreeMap<String, RelationshipObject> = entity
        .relationships()
        .into_iter()
        .filter(|(name, _)| fields.allows(resource_type, name))
        .map(|(name, related)| {
            let data = match related {
                Related::Unloaded => None,
                Related::ToOne(one) => Some(Linkage::ToOne(one.map(|r| r.identifier()))),
                Related::ToMany(many) => Some(Linkage::ToMany(
                    many.iter().map(|r| r.identifier()).collect(),
                )),
            };
            (name, RelationshipObject { data })
        })
        .collect();

    Ok(ResourceObject {
        resource_type: resource_type.to_string(),
        id: entity.resource_id(),
        attributes,
        relationships,
    })
}

#[cfg(test)]
mod tests;
