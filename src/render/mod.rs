//! Rendering composition
//!
//! The composer orchestrates a render pass: schema wrapper, then each field
//! in declaration order, recursing into nested schemas with dotted name
//! prefixes. Every step is a pure function of the definitions, the options,
//! and the default data; the fragment tree is flattened to markup text once
//! at the top.

pub mod enumerate;
pub mod fragment;

pub use fragment::{AttrList, Element, Fragment};

use itertools::Itertools;
use serde_json::Value;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::registry::{CapabilityRegistry, TypeRenderArgs};
use crate::schema::{DataType, Field, FieldKind, Schema};

/// Capability name for schema wrappers and type-level control rendering
pub const RENDER_CAPABILITY: &str = "render";

/// Capability name for field label fragments
pub const LABEL_CAPABILITY: &str = "label";

/// Capability name for nested-schema container fragments
pub const CONTAINER_CAPABILITY: &str = "container";

/// Reserved trait key holding a type's default presentation attributes
pub const ATTRS_TRAIT: &str = "attrs";

/// Coerce a default value to the text representation controls compare against
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Renders schemas against a sealed capability registry
///
/// Holds no mutable state; independent render calls over the same registry
/// may run concurrently.
#[derive(Debug)]
pub struct Renderer<'a> {
    registry: &'a CapabilityRegistry,
    config: RenderConfig,
}

impl<'a> Renderer<'a> {
    /// Create a renderer with an explicit configuration
    #[must_use]
    pub fn new(registry: &'a CapabilityRegistry, config: RenderConfig) -> Self {
        Self { registry, config }
    }

    /// Create a renderer with the default configuration
    #[must_use]
    pub fn with_defaults(registry: &'a CapabilityRegistry) -> Self {
        Self::new(registry, RenderConfig::default())
    }

    /// The renderer configuration
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The registry behaviors are resolved against
    #[must_use]
    pub fn registry(&self) -> &CapabilityRegistry {
        self.registry
    }

    /// Render a whole schema to markup text
    ///
    /// Resolves the schema-level wrapper capability and hands it the options
    /// and default data; the wrapper invokes [`render_fields`](Self::render_fields).
    /// A missing wrapper is an optional-capability skip: the fields render
    /// bare.
    pub fn render_schema(
        &self,
        schema: &Schema,
        options: &AttrList,
        default_data: &Value,
    ) -> Result<String> {
        log::debug!(
            "Rendering schema '{}' with fields: {}",
            schema.name(),
            schema.field_names().join(", ")
        );
        let rendered = match self.registry.schema_capability(RENDER_CAPABILITY) {
            Some(wrapper) => wrapper(self, schema, options, default_data)?,
            None => self.render_fields(schema, default_data, "")?,
        };
        Ok(rendered.to_markup())
    }

    /// Render every field of a schema in declaration order
    ///
    /// Excluded fields are skipped; each remaining field picks its default
    /// value by name from `default_data`.
    pub fn render_fields(
        &self,
        schema: &Schema,
        default_data: &Value,
        name_prefix: &str,
    ) -> Result<Fragment> {
        let mut parts = Vec::with_capacity(schema.fields().len());
        for field in schema.fields() {
            if field.is_excluded() {
                log::debug!("Skipping excluded field '{}'", field.name());
                continue;
            }
            let default = default_data.get(field.name());
            parts.push(self.render_field(field, default, name_prefix)?);
        }
        Ok(Fragment::Group(parts))
    }

    /// Render a single field
    ///
    /// Nested composite fields recurse into [`render_fields`](Self::render_fields)
    /// with an extended dotted prefix; the field-level container capability
    /// supplies their wrapper and the label capability their caption, both
    /// optional. Scalar fields resolve their type behavior and invoke it with
    /// the merged options.
    pub fn render_field(
        &self,
        field: &Field,
        default: Option<&Value>,
        name_prefix: &str,
    ) -> Result<Fragment> {
        let control_name = self.control_name(name_prefix, field);
        match field.kind() {
            FieldKind::Nested(inner) => {
                let inner_prefix =
                    format!("{control_name}{}", self.config.name_separator);
                let inner_default = default.unwrap_or(&Value::Null);
                let body = self.render_fields(inner, inner_default, &inner_prefix)?;

                let mut parts = Vec::new();
                if let Some(label) = self.registry.field_capability(LABEL_CAPABILITY) {
                    parts.push(label(self, field, &control_name)?);
                }
                parts.push(body);
                let content = Fragment::Group(parts);

                match self.registry.field_capability(CONTAINER_CAPABILITY) {
                    Some(container) => {
                        let wrapper = container(self, field, &control_name)?;
                        Ok(wrapper.with_content(content))
                    }
                    None => Ok(content),
                }
            }
            FieldKind::Scalar(data_type) => {
                let options = self.merged_options(field, data_type);
                let registration = self
                    .registry
                    .resolve_type_capability(RENDER_CAPABILITY, data_type)?;
                let args = TypeRenderArgs {
                    field,
                    data_type,
                    options: &options,
                    default,
                    name_prefix,
                };
                let control = (registration.behavior)(self, &args)?;

                if self.config.emit_field_labels {
                    if let Some(label) = self.registry.field_capability(LABEL_CAPABILITY) {
                        let fragment = label(self, field, &control_name)?;
                        return Ok(Fragment::Group(vec![fragment, control]));
                    }
                }
                Ok(control)
            }
        }
    }

    /// The flattened control name for a field under a prefix
    #[must_use]
    pub fn control_name(&self, name_prefix: &str, field: &Field) -> String {
        format!("{name_prefix}{}", field.name())
    }

    /// Merge a type's declared attribute defaults under the field's hints
    ///
    /// The reserved `attrs` trait supplies type defaults; field hints other
    /// than the presentation hint override them, so the call site wins over
    /// the type, mirroring predicate specificity at the instance layer.
    fn merged_options(&self, field: &Field, data_type: &DataType) -> AttrList {
        let mut options = AttrList::new();
        if let Some(defaults) = data_type.trait_value(ATTRS_TRAIT) {
            options.extend_from_json(defaults);
        }
        for (name, value) in field.hints().iter() {
            if name != enumerate::PRESENTATION_HINT {
                options.set(name, value);
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_value_text_coercion() {
        assert_eq!(value_text(&json!("live")), "live");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&Value::Null), "");
    }

    #[test]
    fn test_merged_options_field_hints_win() {
        let ty = Arc::new(
            DataType::new("string").with_trait("attrs", json!({"type": "text", "size": 30})),
        );
        let field = Field::scalar("title", ty.clone()).with_hint("size", "60");

        let registry = CapabilityRegistry::new();
        let renderer = Renderer::with_defaults(&registry);
        let options = renderer.merged_options(&field, &ty);

        assert_eq!(options.get("type"), Some("text"));
        assert_eq!(options.get("size"), Some("60"));
    }
}
