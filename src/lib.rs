//! A Rust library for rendering schema-defined forms with capability
//! dispatch, predicate-based override resolution, and recursive composition
//! for nested schemas.

pub mod config;
pub mod error;
pub mod markup;
pub mod registry;
pub mod render;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::RenderConfig;
pub use error::{Result, SchemaFormError};
pub use schema::{DataType, EnumValue, Field, FieldKind, Schema, TraitMap};

// Dispatch engine
pub use registry::{CapabilityRegistry, Predicate, TargetKind, TypeRenderArgs};

// Rendering
pub use render::enumerate::{EnumPresentation, PRESENTATION_HINT};
pub use render::{
    AttrList, CONTAINER_CAPABILITY, Element, Fragment, LABEL_CAPABILITY, RENDER_CAPABILITY,
    Renderer,
};

// Dotted-path utilities
pub use utils::{expand_paths, flatten_value};
