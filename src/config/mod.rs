//! Configuration for the form renderer.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Renderer`](crate::render::Renderer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Separator between nested control name segments
    pub name_separator: String,
    /// Whether to emit a label fragment before every scalar control
    pub emit_field_labels: bool,
    /// Log at warn level instead of debug when an inapplicable
    /// presentation hint falls back to the default encoding
    pub warn_on_hint_fallback: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            name_separator: ".".to_string(),
            emit_field_labels: false,
            warn_on_hint_fallback: false,
        }
    }
}
