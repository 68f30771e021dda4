//! Data model types: selection directives, entities, and the wire shapes of
//! success and error documents.
//!
//! Wire conventions:
//! - Resource object: `{"type": "posts", "id": "1", "attributes": {..}, "relationships": {..}}`
//! - Relationship: `{"data": <linkage>}`, with `data` omitted when not loaded
//! - Error: `{"errors": [{"id": "<uuid>", "title": .., "detail": .., "status": "404"}]}`
//!
//! Empty sections and absent values are omitted rather than rendered as null,
//! except primary `data`, which is always present.

mod document;
mod entity;
mod error_object;
mod fieldset;
mod response;
mod selection;
mod term;

pub use document::{
    Document, Linkage, Outcome, PrimaryData, RelationshipObject, ResourceIdentifier,
    ResourceObject,
};
pub use entity::{Entity, Relation};
pub use error_object::{ErrorDocument, ErrorFields, ErrorObject};
pub use fieldset::FieldSet;
pub use response::{
    JSONAPI_MEDIA_TYPE, PLAIN_TEXT_MEDIA_TYPE, Response, ResponseBody, ResponseContext,
};
pub use selection::{QueryParams, SelectionOptions, SelectionOptionsBuilder, SerializeOptions};
pub use term::{Term, TermSet, TermSpec};
