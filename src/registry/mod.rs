//! Capability registry and override resolution
//!
//! Behaviors attach to three target kinds: schema, field, and data type.
//! Type-level registrations form an ordered candidate list per capability
//! name; registration order is the specificity order, and the last matching
//! candidate wins. The contract for plugin authors is register
//! general-to-specific.
//!
//! The registry is mutated only during a one-shot initialization phase.
//! [`CapabilityRegistry::seal`] ends that phase; registering afterwards is
//! an error. Rendering takes the registry by shared reference, so concurrent
//! renders over a sealed registry are safe by construction.

pub mod predicate;

pub use predicate::Predicate;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;
use smallvec::SmallVec;

use crate::error::{Result, SchemaFormError};
use crate::render::Renderer;
use crate::render::fragment::{AttrList, Fragment};
use crate::schema::{DataType, Field, Schema};
use crate::utils::logging;

/// The three levels a behavior can attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Schema-level wrapper behaviors
    Schema,
    /// Field-level behaviors (labels, containers)
    Field,
    /// Type-level behaviors with optional predicates
    Type,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "schema"),
            Self::Field => write!(f, "field"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// Arguments handed to a type-level behavior
#[derive(Debug)]
pub struct TypeRenderArgs<'a> {
    /// The field being rendered
    pub field: &'a Field,
    /// The field's data type
    pub data_type: &'a DataType,
    /// Merged presentation options: type defaults under field overrides
    pub options: &'a AttrList,
    /// Default value for the control, absent when the caller supplied none
    pub default: Option<&'a Value>,
    /// Dotted name prefix accumulated by nested schemas
    pub name_prefix: &'a str,
}

/// Schema-level behavior: wraps a whole schema render
pub type SchemaBehavior =
    Arc<dyn Fn(&Renderer<'_>, &Schema, &AttrList, &Value) -> Result<Fragment> + Send + Sync>;

/// Field-level behavior: label or container fragments for one field
pub type FieldBehavior =
    Arc<dyn Fn(&Renderer<'_>, &Field, &str) -> Result<Fragment> + Send + Sync>;

/// Type-level behavior: renders one scalar control
pub type TypeBehavior =
    Arc<dyn Fn(&Renderer<'_>, &TypeRenderArgs<'_>) -> Result<Fragment> + Send + Sync>;

/// One type-level registration in the candidate list
pub struct TypeRegistration {
    /// Specificity test, `None` matches every type
    pub predicate: Option<Predicate>,
    /// The behavior to invoke when this registration wins
    pub behavior: TypeBehavior,
    /// Monotonic order index; higher wins among matching candidates
    pub order: u32,
}

impl fmt::Debug for TypeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistration")
            .field("predicate", &self.predicate)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Stores registered behaviors per target kind and capability name
///
/// Schema and field capabilities hold at most one unconditional behavior per
/// name; redefinition replaces. Type capabilities append, and duplicates are
/// the intended override mechanism. There is no removal operation.
#[derive(Default)]
pub struct CapabilityRegistry {
    schema_caps: FxHashMap<String, SchemaBehavior>,
    field_caps: FxHashMap<String, FieldBehavior>,
    type_caps: FxHashMap<String, Vec<TypeRegistration>>,
    next_order: u32,
    sealed: bool,
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("schema_caps", &self.schema_caps.keys().collect::<Vec<_>>())
            .field("field_caps", &self.field_caps.keys().collect::<Vec<_>>())
            .field("type_caps", &self.type_caps)
            .field("sealed", &self.sealed)
            .finish_non_exhaustive()
    }
}

impl CapabilityRegistry {
    /// Create an empty, unsealed registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the schema-level behavior for a capability
    ///
    /// Redefinition replaces the previous behavior rather than layering.
    pub fn register_schema_capability<F>(&mut self, name: &str, behavior: F) -> Result<()>
    where
        F: Fn(&Renderer<'_>, &Schema, &AttrList, &Value) -> Result<Fragment>
            + Send
            + Sync
            + 'static,
    {
        self.check_unsealed(name)?;
        if self
            .schema_caps
            .insert(name.to_string(), Arc::new(behavior))
            .is_some()
        {
            log::debug!("Replaced {} capability '{name}'", TargetKind::Schema);
        }
        Ok(())
    }

    /// Register the field-level behavior for a capability
    ///
    /// Redefinition replaces the previous behavior rather than layering.
    pub fn register_field_capability<F>(&mut self, name: &str, behavior: F) -> Result<()>
    where
        F: Fn(&Renderer<'_>, &Field, &str) -> Result<Fragment> + Send + Sync + 'static,
    {
        self.check_unsealed(name)?;
        if self
            .field_caps
            .insert(name.to_string(), Arc::new(behavior))
            .is_some()
        {
            log::debug!("Replaced {} capability '{name}'", TargetKind::Field);
        }
        Ok(())
    }

    /// Append a type-level registration for a capability
    ///
    /// Later registrations win over earlier ones whenever both predicates
    /// match, so install general behaviors first and specific ones after.
    pub fn register_type_capability<F>(
        &mut self,
        name: &str,
        predicate: Option<Predicate>,
        behavior: F,
    ) -> Result<()>
    where
        F: Fn(&Renderer<'_>, &TypeRenderArgs<'_>) -> Result<Fragment> + Send + Sync + 'static,
    {
        self.check_unsealed(name)?;
        let order = self.next_order;
        self.next_order += 1;
        log::debug!(
            "Registered {} capability '{name}' #{order} ({})",
            TargetKind::Type,
            predicate
                .as_ref()
                .map_or_else(|| "unconditional".to_string(), ToString::to_string)
        );
        self.type_caps
            .entry(name.to_string())
            .or_default()
            .push(TypeRegistration {
                predicate,
                behavior: Arc::new(behavior),
                order,
            });
        Ok(())
    }

    /// End the registration phase
    ///
    /// Idempotent; any registration afterwards returns
    /// [`SchemaFormError::RegistrySealed`].
    pub fn seal(&mut self) {
        if !self.sealed {
            self.sealed = true;
            log::info!(
                "Sealed capability registry: {} schema, {} field, {} type registrations",
                self.schema_caps.len(),
                self.field_caps.len(),
                self.type_caps.values().map(Vec::len).sum::<usize>()
            );
        }
    }

    /// Whether the registration phase has ended
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// The registered schema-level behavior for a capability, if any
    ///
    /// Absence is a silent skip for optional capabilities.
    #[must_use]
    pub fn schema_capability(&self, name: &str) -> Option<&SchemaBehavior> {
        self.schema_caps.get(name)
    }

    /// The registered field-level behavior for a capability, if any
    #[must_use]
    pub fn field_capability(&self, name: &str) -> Option<&FieldBehavior> {
        self.field_caps.get(name)
    }

    /// The ordered candidate list for a type-level capability
    ///
    /// Empty means the capability is undefined for every type.
    #[must_use]
    pub fn lookup_type_candidates(&self, name: &str) -> &[TypeRegistration] {
        self.type_caps.get(name).map_or(&[], Vec::as_slice)
    }

    /// Resolve the effective type-level behavior for a concrete data type
    ///
    /// Walks the candidate list in registration order and keeps the last
    /// candidate whose predicate matches the type's resolved trait map. No
    /// match is a hard error: silently skipping a field would corrupt the
    /// dotted-name addressing downstream consumers rely on.
    pub fn resolve_type_capability(
        &self,
        name: &str,
        data_type: &DataType,
    ) -> Result<&TypeRegistration> {
        let traits = data_type.resolved_traits();
        let mut matched: SmallVec<[&TypeRegistration; 4]> = SmallVec::new();
        for registration in self.lookup_type_candidates(name) {
            let applies = registration
                .predicate
                .as_ref()
                .is_none_or(|predicate| predicate.matches(&traits));
            if applies {
                matched.push(registration);
            }
        }

        match matched.last().copied() {
            Some(winner) => {
                logging::log_resolution(name, data_type.name(), winner.order);
                Ok(winner)
            }
            None => Err(SchemaFormError::undefined_capability(
                name,
                data_type.name(),
            )),
        }
    }

    fn check_unsealed(&self, capability: &str) -> Result<()> {
        if self.sealed {
            return Err(SchemaFormError::registry_sealed(capability));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop_behavior(
        _renderer: &Renderer<'_>,
        _args: &TypeRenderArgs<'_>,
    ) -> Result<Fragment> {
        Ok(Fragment::empty())
    }

    #[test]
    fn test_last_matching_registration_wins() {
        let mut registry = CapabilityRegistry::new();
        registry
            .register_type_capability("render", None, noop_behavior)
            .unwrap();
        registry
            .register_type_capability(
                "render",
                Some(Predicate::has_trait("control")),
                noop_behavior,
            )
            .unwrap();

        let ty = DataType::new("string").with_trait("control", json!({"element": "input"}));
        let winner = registry.resolve_type_capability("render", &ty).unwrap();
        assert_eq!(winner.order, 1);

        let plain = DataType::new("blob");
        let fallback = registry.resolve_type_capability("render", &plain).unwrap();
        assert_eq!(fallback.order, 0);
    }

    #[test]
    fn test_unmatched_capability_is_an_error() {
        let mut registry = CapabilityRegistry::new();
        registry
            .register_type_capability(
                "render",
                Some(Predicate::has_trait("control")),
                noop_behavior,
            )
            .unwrap();

        let plain = DataType::new("blob");
        let result = registry.resolve_type_capability("render", &plain);
        assert!(matches!(
            result,
            Err(SchemaFormError::UndefinedCapability { .. })
        ));
    }

    #[test]
    fn test_sealed_registry_rejects_registration() {
        let mut registry = CapabilityRegistry::new();
        registry.seal();
        assert!(registry.is_sealed());

        let result = registry.register_type_capability("render", None, noop_behavior);
        assert!(matches!(
            result,
            Err(SchemaFormError::RegistrySealed { .. })
        ));
    }
}
