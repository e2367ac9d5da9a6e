//! Logging utilities
//!
//! This module provides standardized logging functions for capability
//! resolution and presentation fallback events.

/// Log which registration won a type-capability resolution
///
/// # Arguments
/// * `capability` - Name of the capability being resolved
/// * `type_name` - Name of the concrete data type
/// * `order` - Order index of the winning registration
pub fn log_resolution(capability: &str, type_name: &str, order: u32) {
    log::debug!("Resolved '{capability}' for type '{type_name}' to registration #{order}");
}

/// Log a presentation hint that did not apply to the field's value shape
///
/// Falls back silently by default; callers can opt into a warning via
/// configuration.
pub fn log_hint_fallback(field: &str, hint: &str, warn: bool) {
    if warn {
        log::warn!("Presentation hint '{hint}' does not apply to field '{field}', using default");
    } else {
        log::debug!("Presentation hint '{hint}' does not apply to field '{field}', using default");
    }
}
