fn author_linkage() -> Linkage {
    Linkage::ToOne(Some(ResourceIdentifier::new("authors", "9")))
}

fn tags_linkage() -> Linkage {
    Linkage::ToMany(vec![
        ResourceIdentifier::new("tags", "t1"),
        ResourceIdentifier::new("tags", "t2"),
    ])
}

#[test]
fn test_linkage_document_is_identifiers_only() {
    let document = serializer().serialize_linkage(author_linkage(), &SerializeOptions::new());

    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({"data": {"type": "authors", "id": "9"}})
    );
}

#[test]
fn test_linkage_carries_meta_and_jsonapi() {
    let config = SerializerConfig::builder()
        .serializer_opts(SerializeOptions::new().with_jsonapi(json!({"version": "1.0"})))
        .build();
    let options = SerializeOptions::new()
        .with_meta(json!({"updated": true}))
        .with_include("author");

    let document = serializer_with(config).serialize_linkage(tags_linkage(), &options);

    insta::assert_json_snapshot!(document, @r#"
    {
      "data": [
        {
          "type": "tags",
          "id": "t1"
        },
        {
          "type": "tags",
          "id": "t2"
        }
      ],
      "meta": {
        "updated": true
      },
      "jsonapi": {
        "version": "1.0"
      }
    }
    "#);
}

#[parameterized(
    to_one_updated = { true, Cardinality::One },
    to_many_updated = { true, Cardinality::Many },
)]
fn test_updated_linkage_is_rendered(updated: bool, cardinality: Cardinality) {
    let serializer = serializer();
    let (outcome, expected) = match cardinality {
        Cardinality::One => (
            serializer.serialize_linkage_if(updated, author_linkage(), &SerializeOptions::new(), &no_params()),
            PrimaryData::Linkage(author_linkage()),
        ),
        Cardinality::Many => (
            serializer.serialize_linkages_if(updated, tags_linkage(), &SerializeOptions::new(), &no_params()),
            PrimaryData::Linkage(tags_linkage()),
        ),
    };

    let outcome = outcome.unwrap();
    let document = outcome.document().unwrap();
    assert_eq!(document.data, expected);
    assert!(document.included.is_none());
}

#[test]
fn test_unchanged_to_one_without_meta_is_no_content() {
    let outcome = serializer()
        .serialize_linkage_if(false, author_linkage(), &SerializeOptions::new(), &no_params())
        .unwrap();
    assert!(outcome.is_no_content());
    assert_eq!(serializer().respond(&outcome, 200), Response::no_content());
}

#[test]
fn test_unchanged_to_many_without_meta_is_no_content() {
    let outcome = serializer()
        .serialize_linkages_if(false, tags_linkage(), &SerializeOptions::new(), &no_params())
        .unwrap();
    assert!(outcome.is_no_content());
}

#[test]
fn test_unchanged_to_one_with_meta_is_null_data() {
    let options = SerializeOptions::new().with_meta(json!({"noop": true}));
    let outcome = serializer()
        .serialize_linkage_if(false, author_linkage(), &options, &no_params())
        .unwrap();

    assert_eq!(
        serde_json::to_value(outcome.document().unwrap()).unwrap(),
        json!({"data": null, "meta": {"noop": true}})
    );
}

#[test]
fn test_unchanged_to_many_with_meta_is_empty_array() {
    let options = SerializeOptions::new().with_meta(json!({"noop": true}));
    let outcome = serializer()
        .serialize_linkages_if(false, tags_linkage(), &options, &no_params())
        .unwrap();

    assert_eq!(
        serde_json::to_value(outcome.document().unwrap()).unwrap(),
        json!({"data": [], "meta": {"noop": true}})
    );
}

#[test]
fn test_cleared_to_one_linkage_renders_null() {
    let outcome = serializer()
        .serialize_linkage_if(true, Linkage::ToOne(None), &SerializeOptions::new(), &no_params())
        .unwrap();
    let response = serializer().respond(&outcome, 200);
    assert_eq!(response.body.as_deref(), Some(r#"{"data":null}"#));
}
