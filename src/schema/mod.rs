//! Schema, field, and data type definitions
//!
//! These are the plain data the dispatch engine operates on: ordered,
//! introspectable definitions with no rendering behavior of their own.

pub mod data_type;
pub mod field;

pub use data_type::{DataType, EnumValue, TraitMap};
pub use field::{Field, FieldKind};

use crate::error::{Result, SchemaFormError};

/// A named, ordered collection of fields
///
/// Insertion order is render order. Field names are unique within a schema;
/// inserting a duplicate is a definition-time error.
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, rejecting duplicate names
    pub fn with_field(mut self, field: Field) -> Result<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Append a field in place, rejecting duplicate names
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        if self.field(field.name()).is_some() {
            return Err(SchemaFormError::duplicate_field(&self.name, field.name()));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Schema name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }
}
