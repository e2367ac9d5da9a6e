//! Default markup behavior set
//!
//! The concrete tag and attribute vocabulary for the primitive types. This
//! module is data handed to the dispatch engine, not engine logic: it
//! installs its behaviors through the same registration calls a plugin
//! would, general-to-specific, and can be replaced wholesale by registering
//! more specific behaviors after it.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::error::Result;
use crate::registry::{CapabilityRegistry, Predicate, TypeRenderArgs};
use crate::render::enumerate::render_enumeration;
use crate::render::fragment::{AttrList, Element, Fragment};
use crate::render::{
    ATTRS_TRAIT, CONTAINER_CAPABILITY, LABEL_CAPABILITY, RENDER_CAPABILITY, Renderer, value_text,
};
use crate::schema::{DataType, Field, Schema};

/// Trait key describing which markup element a type renders as
pub const CONTROL_TRAIT: &str = "control";

/// Entry inside the control trait naming the element
pub const ELEMENT_ENTRY: &str = "element";

/// Install the default behavior set into a registry
///
/// Registration order is the override chain: the unconditional text input
/// first, then the input- and textarea-shaped behaviors. Install your own
/// behaviors after this call to override any of them.
pub fn install_defaults(registry: &mut CapabilityRegistry) -> Result<()> {
    registry.register_schema_capability(RENDER_CAPABILITY, render_form)?;
    registry.register_field_capability(LABEL_CAPABILITY, render_label)?;
    registry.register_field_capability(CONTAINER_CAPABILITY, render_container)?;

    registry.register_type_capability(RENDER_CAPABILITY, None, render_fallback)?;
    registry.register_type_capability(
        RENDER_CAPABILITY,
        Some(Predicate::trait_value(CONTROL_TRAIT, ELEMENT_ENTRY, "input")),
        render_input,
    )?;
    registry.register_type_capability(
        RENDER_CAPABILITY,
        Some(Predicate::trait_value(CONTROL_TRAIT, ELEMENT_ENTRY, "textarea")),
        render_textarea,
    )?;

    Ok(())
}

/// Schema wrapper: a form envelope around the rendered fields
fn render_form(
    renderer: &Renderer<'_>,
    schema: &Schema,
    options: &AttrList,
    default_data: &Value,
) -> Result<Fragment> {
    let form = Element::new("form")
        .with_attr("method", "post")
        .with_attrs(options)
        .with_child(renderer.render_fields(schema, default_data, "")?);
    Ok(form.into())
}

/// Field label tied to its control name
fn render_label(_renderer: &Renderer<'_>, field: &Field, control_name: &str) -> Result<Fragment> {
    let label = Element::new("label")
        .with_attr("for", control_name)
        .with_text(field.label());
    Ok(label.into())
}

/// Container wrapping a nested schema's label and controls
fn render_container(
    _renderer: &Renderer<'_>,
    _field: &Field,
    _control_name: &str,
) -> Result<Fragment> {
    Ok(Element::new("fieldset").into())
}

/// Unconditional fallback: a bare text input
///
/// Types with no control trait land here; enumerated types divert into the
/// presentation sub-protocol first.
fn render_fallback(renderer: &Renderer<'_>, args: &TypeRenderArgs<'_>) -> Result<Fragment> {
    if let Some(values) = args.data_type.enumeration() {
        return render_enumeration(renderer, args, values);
    }
    let name = renderer.control_name(args.name_prefix, args.field);
    let mut input = Element::new("input")
        .with_attr("type", "text")
        .with_attr("name", name);
    if let Some(default) = args.default {
        // A null default coerces to empty text; an empty value attribute
        // would render bare, so leave the control unset instead.
        let text = value_text(default);
        if !text.is_empty() {
            input = input.with_attr("value", text);
        }
    }
    if args.field.is_required() {
        input = input.with_attr("required", "");
    }
    Ok(input.void().into())
}

/// Input-shaped types: the merged options decide the input type and extras
fn render_input(renderer: &Renderer<'_>, args: &TypeRenderArgs<'_>) -> Result<Fragment> {
    if let Some(values) = args.data_type.enumeration() {
        return render_enumeration(renderer, args, values);
    }
    let name = renderer.control_name(args.name_prefix, args.field);
    let kind = args.options.get("type").unwrap_or("text").to_string();
    let mut input = Element::new("input")
        .with_attr("type", &kind)
        .with_attr("name", name)
        .with_attrs(args.options);

    if kind == "checkbox" {
        input = input.with_attr("value", "true");
        if args.default.map(value_text).as_deref() == Some("true") {
            input = input.with_attr("checked", "");
        }
    } else if let Some(default) = args.default {
        let text = value_text(default);
        if !text.is_empty() {
            input = input.with_attr("value", text);
        }
    }
    if args.field.is_required() {
        input = input.with_attr("required", "");
    }
    Ok(input.void().into())
}

/// Textarea-shaped types: default value as escaped element content
fn render_textarea(renderer: &Renderer<'_>, args: &TypeRenderArgs<'_>) -> Result<Fragment> {
    if let Some(values) = args.data_type.enumeration() {
        return render_enumeration(renderer, args, values);
    }
    let name = renderer.control_name(args.name_prefix, args.field);
    let mut textarea = Element::new("textarea")
        .with_attr("name", name)
        .with_attrs(args.options);
    if args.field.is_required() {
        textarea = textarea.with_attr("required", "");
    }
    if let Some(default) = args.default {
        textarea = textarea.with_text(value_text(default));
    }
    Ok(textarea.into())
}

/// General single-line string type
#[must_use]
pub fn string_type() -> Arc<DataType> {
    Arc::new(
        DataType::new("string")
            .with_trait(CONTROL_TRAIT, json!({"element": "input"}))
            .with_trait(ATTRS_TRAIT, json!({"type": "text"})),
    )
}

/// Password input, specializing a string type
#[must_use]
pub fn password_type(string: Arc<DataType>) -> Arc<DataType> {
    Arc::new(
        DataType::new("password")
            .with_base(string)
            .with_trait(ATTRS_TRAIT, json!({"type": "password"})),
    )
}

/// Email input, specializing a string type
#[must_use]
pub fn email_type(string: Arc<DataType>) -> Arc<DataType> {
    Arc::new(
        DataType::new("email")
            .with_base(string)
            .with_trait(ATTRS_TRAIT, json!({"type": "email"})),
    )
}

/// Multi-line text type rendered as a textarea
#[must_use]
pub fn text_type() -> Arc<DataType> {
    Arc::new(
        DataType::new("text")
            .with_trait(CONTROL_TRAIT, json!({"element": "textarea"}))
            .with_trait(ATTRS_TRAIT, json!({"cols": 40, "rows": 6})),
    )
}

/// Date input
#[must_use]
pub fn date_type() -> Arc<DataType> {
    Arc::new(
        DataType::new("date")
            .with_trait(CONTROL_TRAIT, json!({"element": "input"}))
            .with_trait(ATTRS_TRAIT, json!({"type": "date"})),
    )
}

/// Plain boolean rendered as a checkbox
#[must_use]
pub fn boolean_type() -> Arc<DataType> {
    Arc::new(
        DataType::new("boolean")
            .with_trait(CONTROL_TRAIT, json!({"element": "input"}))
            .with_trait(ATTRS_TRAIT, json!({"type": "checkbox"})),
    )
}

/// An enumerated type with labeled values in declaration order
#[must_use]
pub fn enum_type<V, L>(name: impl Into<String>, values: Vec<(V, L)>) -> Arc<DataType>
where
    V: Into<String>,
    L: Into<String>,
{
    Arc::new(DataType::new(name).with_enumeration(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sealed_registry() -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        install_defaults(&mut registry).unwrap();
        registry.seal();
        registry
    }

    #[test]
    fn test_password_inherits_input_element() {
        let registry = sealed_registry();
        let renderer = Renderer::with_defaults(&registry);

        let password = password_type(string_type());
        let schema = Schema::new("login")
            .with_field(Field::scalar("secret", password).required())
            .unwrap();

        let markup = renderer
            .render_fields(&schema, &json!({}), "")
            .unwrap()
            .to_markup();
        assert_eq!(
            markup,
            "<input type=\"password\" name=\"secret\" required/>"
        );
    }

    #[test]
    fn test_textarea_puts_default_in_content() {
        let registry = sealed_registry();
        let renderer = Renderer::with_defaults(&registry);

        let schema = Schema::new("article")
            .with_field(Field::scalar("body", text_type()))
            .unwrap();

        let markup = renderer
            .render_fields(&schema, &json!({"body": "Hello <world>"}), "")
            .unwrap()
            .to_markup();
        assert_eq!(
            markup,
            "<textarea name=\"body\" cols=\"40\" rows=\"6\">Hello &lt;world&gt;</textarea>"
        );
    }

    #[test]
    fn test_unknown_type_uses_fallback_input() {
        let registry = sealed_registry();
        let renderer = Renderer::with_defaults(&registry);

        let blob = Arc::new(DataType::new("blob"));
        let schema = Schema::new("misc")
            .with_field(Field::scalar("payload", blob))
            .unwrap();

        let markup = renderer
            .render_fields(&schema, &json!({}), "")
            .unwrap()
            .to_markup();
        assert_eq!(markup, "<input type=\"text\" name=\"payload\"/>");
    }

    #[test]
    fn test_form_wrapper_merges_caller_options() {
        let registry = sealed_registry();
        let renderer = Renderer::with_defaults(&registry);

        let schema = Schema::new("empty");
        let options = AttrList::new().with("action", "/save");
        let markup = renderer
            .render_schema(&schema, &options, &json!({}))
            .unwrap();
        assert_eq!(markup, "<form method=\"post\" action=\"/save\"></form>");
    }
}
