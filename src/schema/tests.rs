//! Tests for schema declaration, default computation and missing-property resolution.

use super::{DefaultValue, EntityType, PropertyKind, Schema, SchemaBuilder, TypeSpec};
use crate::entity::{Entity, Properties};
use crate::error::{SchemaError, ValidationResult};
use serde_json::{Map, Value, json};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Tag(Properties);

impl Entity for Tag {
    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            let mut builder = SchemaBuilder::new("Tag");
            builder.declare_scalar("name").expect("valid declaration");
            builder.build()
        })
    }

    fn from_properties(properties: Properties) -> ValidationResult<Self> {
        properties.check_entity(Self::schema())?;
        Ok(Self(properties))
    }

    fn properties(&self) -> &Properties {
        &self.0
    }
}

fn post_schema() -> Schema {
    let mut builder = SchemaBuilder::new("Post");
    builder
        .declare_scalar("guid")
        .unwrap()
        .declare_scalar_with_default("text", DefaultValue::from(""))
        .unwrap()
        .declare_entity("main_tag", TypeSpec::one::<Tag>())
        .unwrap()
        .declare_entity_with_default("tags", TypeSpec::list_of::<Tag>(), json!([]).into())
        .unwrap()
        .declare_scalar("author")
        .unwrap();
    builder.build()
}

#[test]
fn test_declaration_order_is_preserved() {
    let schema = post_schema();
    assert_eq!(schema.entity_name(), "Post");
    assert_eq!(
        schema.property_names().collect::<Vec<_>>(),
        ["guid", "text", "main_tag", "tags", "author"]
    );
}

#[test]
fn test_invalid_property_name() {
    let mut builder = SchemaBuilder::new("Post");
    for name in ["", "1st", "has-dash", "has space", "naïve"] {
        let result = builder.declare_scalar(name);
        assert_eq!(
            result.unwrap_err(),
            SchemaError::InvalidName {
                entity: "Post".to_string(),
                name: name.to_string(),
            }
        );
    }
    assert!(builder.build().properties().is_empty());
}

#[test]
fn test_duplicate_property_is_rejected() {
    let mut builder = SchemaBuilder::new("Post");
    builder.declare_scalar("guid").unwrap();
    let result = builder.declare_entity("guid", TypeSpec::one::<Tag>());
    assert!(matches!(
        result,
        Err(SchemaError::DuplicateProperty { ref name, .. }) if name == "guid"
    ));
    assert_eq!(builder.build().properties().len(), 1);
}

#[test]
fn test_entity_list_must_name_exactly_one_type() {
    let mut builder = SchemaBuilder::new("Post");

    let two = TypeSpec::List(vec![EntityType::of::<Tag>(), EntityType::of::<Tag>()]);
    let result = builder.declare_entity("tags", two);
    assert!(matches!(result, Err(SchemaError::InvalidType { ref property, .. }) if property == "tags"));

    let none = TypeSpec::List(Vec::new());
    let result = builder.declare_entity_with_default("tags", none, json!([]).into());
    assert!(matches!(result, Err(SchemaError::InvalidType { .. })));

    builder.declare_entity("tags", TypeSpec::list_of::<Tag>()).unwrap();
    let schema = builder.build();
    assert!(matches!(
        schema.property("tags").unwrap().kind(),
        PropertyKind::EntityList(_)
    ));
}

#[test]
fn test_nested_properties() {
    let schema = post_schema();
    let nested: Vec<_> = schema.nested_properties().into_iter().map(|p| p.name()).collect();
    assert_eq!(nested, ["main_tag", "tags"]);

    let kind = schema.property("main_tag").unwrap().kind();
    assert_eq!(kind.entity_type().unwrap().name(), "Tag");
    assert!(schema.property("guid").unwrap().kind().entity_type().is_none());
}

#[test]
fn test_resolve_missing_reports_required_properties_in_order() {
    let schema = post_schema();
    let missing = schema.resolve_missing(&Map::new());
    assert_eq!(missing, ["guid", "main_tag", "author"]);

    let candidate = json!({"guid": "abc", "author": null});
    let missing = schema.resolve_missing(candidate.as_object().unwrap());
    assert_eq!(missing, ["main_tag", "author"]);

    let candidate = json!({"guid": "abc", "main_tag": {"name": "rust"}, "author": "alice"});
    assert!(schema.resolve_missing(candidate.as_object().unwrap()).is_empty());
}

#[test]
fn test_required_properties() {
    let schema = post_schema();
    let required: Vec<_> = schema.required_properties().map(|p| p.name()).collect();
    assert_eq!(required, ["guid", "main_tag", "author"]);
    assert!(!schema.property("text").unwrap().is_required());
}

#[test]
fn test_compute_defaults_static() {
    let defaults = post_schema().compute_defaults();
    assert_eq!(defaults.len(), 2);
    assert_eq!(defaults["text"], json!(""));
    assert_eq!(defaults["tags"], json!([]));
}

#[test]
fn test_compute_defaults_invokes_lazy_producers_every_call() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    let mut builder = SchemaBuilder::new("Counter");
    builder
        .declare_scalar_with_default(
            "sequence",
            DefaultValue::lazy(|| {
                let call = CALLS.fetch_add(1, Ordering::SeqCst);
                Value::String(call.to_string())
            }),
        )
        .unwrap();
    let schema = builder.build();

    let first = schema.compute_defaults();
    let second = schema.compute_defaults();
    assert_ne!(first["sequence"], second["sequence"]);
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}

#[test]
fn test_null_default_is_left_out() {
    let mut builder = SchemaBuilder::new("Optional");
    builder
        .declare_scalar_with_default("note", DefaultValue::Static(Value::Null))
        .unwrap();
    let schema = builder.build();

    assert!(schema.compute_defaults().is_empty());
    assert!(schema.resolve_missing(&Map::new()).is_empty());
}

#[test]
fn test_default_value_debug_hides_producer() {
    let lazy = DefaultValue::lazy(|| json!("x"));
    assert_eq!(format!("{:?}", lazy), "Lazy(..)");
    assert_eq!(format!("{:?}", DefaultValue::from("a")), "Static(String(\"a\"))");
}
