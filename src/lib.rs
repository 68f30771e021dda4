// src/lib.rs
pub use config::{JsonGenerator, SerializerConfig, SerializerConfigBuilder};
pub use decoder::{decode_body, decode_body_as};
pub use error::{
    ConfigError, DocumentError, MALFORMED_INPUT_MESSAGE, UNSERIALIZABLE_OUTPUT_MESSAGE,
};
pub use normalizer::{ErrorTitle, NOT_FOUND_PLACEHOLDER, normalize};
pub use serializer::Serializer;
pub use terms::resolve_terms;
pub use traits::{JsonApiResource, Related, attributes_from};
pub use types::*;

pub mod config;
mod decoder;
mod error;
mod normalizer;
mod serializer;
mod terms;
mod traits;
pub mod types;

#[cfg(test)]
mod tests;
