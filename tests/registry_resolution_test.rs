//! Tests for capability registration order and override resolution.

use std::sync::Arc;

use serde_json::json;

use schemaform::{
    AttrList, CapabilityRegistry, DataType, Field, Fragment, Predicate, Renderer, Result, Schema,
    SchemaFormError, TypeRenderArgs,
};

/// A behavior that emits a fixed marker so tests can see which one won
fn tagged(
    tag: &'static str,
) -> impl Fn(&Renderer<'_>, &TypeRenderArgs<'_>) -> Result<Fragment> + Send + Sync + 'static {
    move |_renderer: &Renderer<'_>, _args: &TypeRenderArgs<'_>| Ok(Fragment::Raw(tag.to_string()))
}

fn single_field_schema(data_type: Arc<DataType>) -> Schema {
    Schema::new("probe")
        .with_field(Field::scalar("value", data_type))
        .unwrap()
}

#[test]
fn test_later_matching_registration_wins() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_type_capability("render", None, tagged("general"))
        .unwrap();
    registry
        .register_type_capability(
            "render",
            Some(Predicate::has_trait("control")),
            tagged("specific"),
        )
        .unwrap();
    registry.seal();

    let ty = Arc::new(DataType::new("string").with_trait("control", json!({"element": "input"})));
    let schema = single_field_schema(ty);
    let renderer = Renderer::with_defaults(&registry);

    let markup = renderer
        .render_fields(&schema, &json!({}), "")
        .unwrap()
        .to_markup();
    assert_eq!(markup, "specific");
}

#[test]
fn test_swapped_registration_order_flips_the_winner() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_type_capability(
            "render",
            Some(Predicate::has_trait("control")),
            tagged("specific"),
        )
        .unwrap();
    registry
        .register_type_capability("render", None, tagged("general"))
        .unwrap();
    registry.seal();

    // The predicate still matches, but the unconditional registration came
    // later, so declared order decides, not predicate strength.
    let ty = Arc::new(DataType::new("string").with_trait("control", json!({"element": "input"})));
    let schema = single_field_schema(ty);
    let renderer = Renderer::with_defaults(&registry);

    let markup = renderer
        .render_fields(&schema, &json!({}), "")
        .unwrap()
        .to_markup();
    assert_eq!(markup, "general");
}

#[test]
fn test_structural_predicate_separates_element_shapes() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_type_capability(
            "render",
            Some(Predicate::trait_value("control", "element", "input")),
            tagged("input"),
        )
        .unwrap();
    registry
        .register_type_capability(
            "render",
            Some(Predicate::trait_value("control", "element", "textarea")),
            tagged("textarea"),
        )
        .unwrap();
    registry.seal();

    let renderer = Renderer::with_defaults(&registry);

    let text = Arc::new(DataType::new("text").with_trait("control", json!({"element": "textarea"})));
    let markup = renderer
        .render_fields(&single_field_schema(text), &json!({}), "")
        .unwrap()
        .to_markup();
    assert_eq!(markup, "textarea");

    let string = Arc::new(DataType::new("string").with_trait("control", json!({"element": "input"})));
    let markup = renderer
        .render_fields(&single_field_schema(string), &json!({}), "")
        .unwrap()
        .to_markup();
    assert_eq!(markup, "input");
}

#[test]
fn test_inherited_trait_satisfies_predicate() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_type_capability(
            "render",
            Some(Predicate::trait_value("control", "element", "input")),
            tagged("input"),
        )
        .unwrap();
    registry.seal();

    let base = Arc::new(DataType::new("string").with_trait("control", json!({"element": "input"})));
    let email = Arc::new(DataType::new("email").with_base(base));

    let renderer = Renderer::with_defaults(&registry);
    let markup = renderer
        .render_fields(&single_field_schema(email), &json!({}), "")
        .unwrap()
        .to_markup();
    assert_eq!(markup, "input");
}

#[test]
fn test_missing_type_capability_fails_the_render() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_type_capability(
            "render",
            Some(Predicate::has_trait("control")),
            tagged("specific"),
        )
        .unwrap();
    registry.seal();

    let plain = Arc::new(DataType::new("blob"));
    let schema = single_field_schema(plain);
    let renderer = Renderer::with_defaults(&registry);

    let result = renderer.render_fields(&schema, &json!({}), "");
    match result {
        Err(SchemaFormError::UndefinedCapability {
            capability,
            type_name,
        }) => {
            assert_eq!(capability, "render");
            assert_eq!(type_name, "blob");
        }
        other => panic!("Expected UndefinedCapability, got {other:?}"),
    }
}

#[test]
fn test_field_capability_redefinition_replaces() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_field_capability("label", |_renderer: &Renderer<'_>, _field: &Field, _name: &str| {
            Ok(Fragment::Raw("first".to_string()))
        })
        .unwrap();
    registry
        .register_field_capability("label", |_renderer: &Renderer<'_>, _field: &Field, _name: &str| {
            Ok(Fragment::Raw("second".to_string()))
        })
        .unwrap();
    registry.seal();

    let label = registry.field_capability("label").unwrap();
    let renderer = Renderer::with_defaults(&registry);
    let field = Field::scalar("title", Arc::new(DataType::new("string")));
    let fragment = label(&renderer, &field, "title").unwrap();
    assert_eq!(fragment.to_markup(), "second");
}

#[test]
fn test_registration_after_seal_is_rejected() {
    let mut registry = CapabilityRegistry::new();
    registry.seal();
    registry.seal(); // idempotent

    let result = registry.register_type_capability("render", None, tagged("late"));
    assert!(matches!(result, Err(SchemaFormError::RegistrySealed { .. })));

    let result = registry.register_schema_capability(
        "render",
        |_r: &Renderer<'_>, _s: &Schema, _o: &AttrList, _d: &serde_json::Value| {
            Ok(Fragment::empty())
        },
    );
    assert!(matches!(result, Err(SchemaFormError::RegistrySealed { .. })));
}
