//! Error handling for the schema form renderer.

use std::fmt;

use crate::utils::paths::PathParseError;

/// Specialized error type for schema form rendering
#[derive(Debug)]
pub enum SchemaFormError {
    /// No registered type behavior matched a required capability
    UndefinedCapability {
        /// Name of the capability that failed to resolve
        capability: String,
        /// Name of the data type that had no matching registration
        type_name: String,
    },
    /// A behavior was registered after the registry was sealed
    RegistrySealed {
        /// Name of the capability that was being registered
        capability: String,
    },
    /// A field name was used twice within one schema
    DuplicateField {
        /// Name of the schema being defined
        schema: String,
        /// The repeated field name
        field: String,
    },
    /// Error reconstructing nested data from dotted paths
    PathError(PathParseError),
}

impl SchemaFormError {
    /// Create an undefined-capability error for a type-level lookup
    pub fn undefined_capability(
        capability: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UndefinedCapability {
            capability: capability.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a sealed-registry error
    pub fn registry_sealed(capability: impl Into<String>) -> Self {
        Self::RegistrySealed {
            capability: capability.into(),
        }
    }

    /// Create a duplicate-field error
    pub fn duplicate_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            schema: schema.into(),
            field: field.into(),
        }
    }
}

impl From<PathParseError> for SchemaFormError {
    fn from(error: PathParseError) -> Self {
        Self::PathError(error)
    }
}

impl fmt::Display for SchemaFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedCapability {
                capability,
                type_name,
            } => write!(f, "No '{capability}' behavior matches type '{type_name}'"),
            Self::RegistrySealed { capability } => {
                write!(f, "Cannot register '{capability}': registry is sealed")
            }
            Self::DuplicateField { schema, field } => {
                write!(f, "Duplicate field '{field}' in schema '{schema}'")
            }
            Self::PathError(e) => write!(f, "Path error: {e}"),
        }
    }
}

impl std::error::Error for SchemaFormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PathError(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for schema form operations
pub type Result<T> = std::result::Result<T, SchemaFormError>;
