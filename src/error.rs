use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed message returned to clients when the request body cannot be parsed.
pub const MALFORMED_INPUT_MESSAGE: &str = "Malformed JSON in the request body";

/// Fixed message returned to clients when the response body cannot be rendered.
pub const UNSERIALIZABLE_OUTPUT_MESSAGE: &str = "Unserializable entities in the response body";

/// The only failures the serialization core raises on its own.
///
/// Everything else (validation, persistence, missing resources) arrives as an
/// already-decided response state and goes through the error normalizer instead.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unserializable output: {0}")]
    UnserializableOutput(String),
}

impl DocumentError {
    /// HTTP status for the boundary response. Both kinds are client-facing 400s.
    pub fn status(&self) -> u16 {
        400
    }

    /// The fixed, human-readable message sent on the wire.
    ///
    /// The underlying parser or serializer message stays internal.
    pub fn public_message(&self) -> &'static str {
        match self {
            DocumentError::MalformedInput(_) => MALFORMED_INPUT_MESSAGE,
            DocumentError::UnserializableOutput(_) => UNSERIALIZABLE_OUTPUT_MESSAGE,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("serializer configuration is already frozen")]
    AlreadyFrozen,
}
