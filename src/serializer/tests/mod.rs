use std::io;
use std::sync::{Arc, Mutex};

use super::*;
use crate::attributes_from;
use crate::config::JsonGenerator;
use crate::types::{Entity, ErrorFields, FieldSet, Term};
use serde_json::{Value, json};
use yare::parameterized;

/// In-memory log sink; every clone appends to the same buffer.
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl LogSink {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a thread-local subscriber and return its result with the log text.
fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let sink = LogSink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tracing::callsite::rebuild_interest_cache();
        f()
    });
    (result, sink.contents())
}

/// A domain type that implements the resource trait directly.
struct Tag {
    id: u32,
    name: String,
}

#[derive(Serialize)]
struct TagAttributes<'a> {
    name: &'a str,
}

impl JsonApiResource for Tag {
    fn resource_type(&self) -> &str {
        "tags"
    }

    fn resource_id(&self) -> String {
        self.id.to_string()
    }

    fn attributes(&self) -> Result<serde_json::Map<String, Value>, DocumentError> {
        attributes_from(&TagAttributes { name: &self.name })
    }
}

/// Attributes that cannot be represented as a JSON object.
struct Broken;

impl JsonApiResource for Broken {
    fn resource_type(&self) -> &str {
        "broken"
    }

    fn resource_id(&self) -> String {
        "1".to_string()
    }

    fn attributes(&self) -> Result<serde_json::Map<String, Value>, DocumentError> {
        attributes_from("just a string")
    }
}

fn serializer() -> Serializer {
    Serializer::new(SerializerConfig::builder().build())
}

fn serializer_with(config: Arc<SerializerConfig>) -> Serializer {
    Serializer::new(config)
}

fn no_params() -> QueryParams {
    QueryParams::new()
}

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    QueryParams::from_pairs(pairs.iter().copied())
}

fn tag(id: &str, name: &str) -> Entity {
    Entity::new("tags", id).with_attr("name", name)
}

/// `posts:2`, written by `authors:9`, tagged `t1`.
fn second_post() -> Entity {
    Entity::new("posts", "2")
        .with_attr("title", "Second")
        .with_to_many("tags", vec![tag("t1", "rust")])
}

fn author() -> Entity {
    Entity::new("authors", "9")
        .with_attr("name", "Ann")
        .with_to_many("posts", vec![second_post()])
}

/// `posts:1` with a loaded author, comments and tags, and an unloaded editor.
fn post() -> Entity {
    Entity::new("posts", "1")
        .with_attr("title", "Hi")
        .with_attr("body", "Hello there")
        .with_to_one("author", Some(author()))
        .with_to_many(
            "comments",
            vec![
                Entity::new("comments", "c1")
                    .with_attr("body", "Nice")
                    .with_to_one("author", Some(author())),
            ],
        )
        .with_to_many("tags", vec![tag("t1", "rust")])
        .with_unloaded("editor")
}

fn included_ids(document: &Document) -> Vec<String> {
    document
        .included
        .iter()
        .flatten()
        .map(|r| format!("{}:{}", r.resource_type, r.id))
        .collect()
}

fn single(document: &Document) -> &ResourceObject {
    match &document.data {
        PrimaryData::Resource(Some(object)) => object,
        other => panic!("expected a single resource, got {other:?}"),
    }
}

include!("documents.rs");
include!("linkage.rs");
include!("errors.rs");
