//! Process-wide serializer configuration.
//!
//! The configuration is built once at startup and then treated as read-only.
//! [`freeze`] publishes it process-wide; after that it can only be read.
//! Embedders that prefer injection can skip the global and hand an
//! `Arc<SerializerConfig>` straight to [`crate::Serializer::new`].

use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::info;

use crate::error::{ConfigError, DocumentError};
use crate::types::SerializeOptions;

/// How JSON bodies are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum JsonGenerator {
    #[default]
    Compact,
    Pretty,
}

impl JsonGenerator {
    /// Render `value` to a string.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, DocumentError> {
        let rendered = match self {
            JsonGenerator::Compact => serde_json::to_string(value),
            JsonGenerator::Pretty => serde_json::to_string_pretty(value),
        };
        rendered.map_err(|e| DocumentError::UnserializableOutput(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SerializerConfig {
    serializer_opts: SerializeOptions,
    json_generator: JsonGenerator,
    json_error_generator: JsonGenerator,
    logger_progname: String,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            serializer_opts: SerializeOptions::default(),
            json_generator: JsonGenerator::Compact,
            json_error_generator: JsonGenerator::Compact,
            logger_progname: "jsonapi".to_string(),
        }
    }
}

impl SerializerConfig {
    pub fn builder() -> SerializerConfigBuilder {
        SerializerConfigBuilder::default()
    }

    /// Defaults merged under every request's options.
    pub fn serializer_opts(&self) -> &SerializeOptions {
        &self.serializer_opts
    }

    pub fn json_generator(&self) -> JsonGenerator {
        self.json_generator
    }

    pub fn json_error_generator(&self) -> JsonGenerator {
        self.json_error_generator
    }

    /// Name attached to every logged error object.
    pub fn logger_progname(&self) -> &str {
        &self.logger_progname
    }
}

#[derive(Debug, Default)]
pub struct SerializerConfigBuilder {
    config: SerializerConfig,
}

impl SerializerConfigBuilder {
    pub fn serializer_opts(mut self, opts: SerializeOptions) -> Self {
        self.config.serializer_opts = opts;
        self
    }

    pub fn json_generator(mut self, generator: JsonGenerator) -> Self {
        self.config.json_generator = generator;
        self
    }

    pub fn json_error_generator(mut self, generator: JsonGenerator) -> Self {
        self.config.json_error_generator = generator;
        self
    }

    pub fn logger_progname(mut self, progname: impl Into<String>) -> Self {
        self.config.logger_progname = progname.into();
        self
    }

    pub fn build(self) -> Arc<SerializerConfig> {
        Arc::new(self.config)
    }
}

static FROZEN: OnceCell<Arc<SerializerConfig>> = OnceCell::new();

/// Publish `config` as the process-wide configuration.
///
/// Only the first call succeeds.
pub fn freeze(config: Arc<SerializerConfig>) -> Result<Arc<SerializerConfig>, ConfigError> {
    FROZEN
        .set(Arc::clone(&config))
        .map_err(|_| ConfigError::AlreadyFrozen)?;
    info!(
        event = "Config",
        phase = "Frozen",
        progname = config.logger_progname(),
        json_generator = config.json_generator().as_ref(),
        json_error_generator = config.json_error_generator().as_ref()
    );
    Ok(config)
}

/// The process-wide configuration, if one has been frozen.
pub fn frozen() -> Option<Arc<SerializerConfig>> {
    FROZEN.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_generator_from_str() {
        assert_eq!(JsonGenerator::from_str("pretty").unwrap(), JsonGenerator::Pretty);
        assert_eq!(JsonGenerator::from_str("compact").unwrap(), JsonGenerator::Compact);
        assert!(JsonGenerator::from_str("fast").is_err());
        assert_eq!(JsonGenerator::Pretty.to_string(), "pretty");
    }

    #[test]
    fn test_generator_render() {
        let value = json!({"a": 1});
        assert_eq!(JsonGenerator::Compact.render(&value).unwrap(), r#"{"a":1}"#);
        assert_eq!(JsonGenerator::Pretty.render(&value).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_builder_defaults() {
        let config = SerializerConfig::builder().build();
        assert_eq!(config.json_generator(), JsonGenerator::Compact);
        assert_eq!(config.json_error_generator(), JsonGenerator::Compact);
        assert_eq!(config.logger_progname(), "jsonapi");
        assert_eq!(config.serializer_opts(), &SerializeOptions::default());
    }

    #[test]
    fn test_freeze_only_once() {
        let first = SerializerConfig::builder().logger_progname("blog").build();
        let second = SerializerConfig::builder().logger_progname("other").build();

        freeze(first).unwrap();
        assert_eq!(freeze(second), Err(ConfigError::AlreadyFrozen));
        assert_eq!(frozen().unwrap().logger_progname(), "blog");
    }
}
