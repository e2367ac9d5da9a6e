//! Field definitions for the schema system
//!
//! A field belongs to exactly one schema. It is created at schema-definition
//! time and immutable afterwards; UI hints are set through the builder only.

use std::sync::Arc;

use crate::render::fragment::AttrList;
use crate::schema::Schema;
use crate::schema::data_type::DataType;

/// What a field holds: a scalar data type or a nested schema
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A value described by a data type
    Scalar(Arc<DataType>),
    /// A composite value described by another schema
    Nested(Arc<Schema>),
}

/// A named member of a schema
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    label: String,
    kind: FieldKind,
    required: bool,
    excluded: bool,
    hints: AttrList,
}

impl Field {
    /// Create a scalar field
    ///
    /// The display label defaults to the humanized field name
    /// (`zip_code` becomes `Zip code`).
    pub fn scalar(name: impl Into<String>, data_type: Arc<DataType>) -> Self {
        Self::with_kind(name.into(), FieldKind::Scalar(data_type))
    }

    /// Create a nested composite field
    pub fn nested(name: impl Into<String>, schema: Arc<Schema>) -> Self {
        Self::with_kind(name.into(), FieldKind::Nested(schema))
    }

    fn with_kind(name: String, kind: FieldKind) -> Self {
        let label = humanize(&name);
        Self {
            name,
            label,
            kind,
            required: false,
            excluded: false,
            hints: AttrList::new(),
        }
    }

    /// Override the display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark the field required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Suppress the field from generated output
    #[must_use]
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Attach a UI hint
    ///
    /// Hints other than the presentation hint are treated as per-field
    /// attribute overrides and win over the type's declared defaults.
    #[must_use]
    pub fn with_hint(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.hints.set(name, value);
        self
    }

    /// Field name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// What the field holds
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether a value is required
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the field is suppressed from output
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Look up a single UI hint
    #[must_use]
    pub fn hint(&self, name: &str) -> Option<&str> {
        self.hints.get(name)
    }

    /// All UI hints in declaration order
    #[must_use]
    pub fn hints(&self) -> &AttrList {
        &self.hints
    }
}

/// Derive a display label from a field name
fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label_is_humanized() {
        let ty = Arc::new(DataType::new("string"));
        let field = Field::scalar("zip_code", ty);
        assert_eq!(field.label(), "Zip code");
    }

    #[test]
    fn test_builder_flags() {
        let ty = Arc::new(DataType::new("string"));
        let field = Field::scalar("title", ty)
            .with_label("Headline")
            .required()
            .with_hint("size", "40");

        assert_eq!(field.label(), "Headline");
        assert!(field.is_required());
        assert!(!field.is_excluded());
        assert_eq!(field.hint("size"), Some("40"));
    }
}
