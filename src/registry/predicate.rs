//! Predicate matching for type-level capability registrations
//!
//! A predicate is a pure test over a type's resolved trait map. Matching
//! inspects only the map it is given, never registry state, so the same
//! predicate gives the same answer for the same type everywhere.

use std::fmt;

use serde_json::Value;

use crate::schema::data_type::TraitMap;

/// A specificity test attached to a type-level registration
///
/// A registration without a predicate matches every type; more specific
/// registrations carry one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The type declares the named trait, own or inherited
    HasTrait(String),
    /// The type declares a trait object whose entry equals a literal value
    TraitValue {
        /// Trait name to look up in the resolved map
        trait_key: String,
        /// Entry inside the trait object
        entry: String,
        /// Literal the entry must equal
        value: Value,
    },
}

impl Predicate {
    /// Key predicate: the type declares trait `key`
    pub fn has_trait(key: impl Into<String>) -> Self {
        Self::HasTrait(key.into())
    }

    /// Structural predicate: trait `trait_key` is an object whose `entry`
    /// equals `value`
    pub fn trait_value(
        trait_key: impl Into<String>,
        entry: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::TraitValue {
            trait_key: trait_key.into(),
            entry: entry.into(),
            value: value.into(),
        }
    }

    /// Whether the predicate is satisfied by the given resolved trait map
    #[must_use]
    pub fn matches(&self, traits: &TraitMap) -> bool {
        match self {
            Self::HasTrait(key) => traits.contains_key(key),
            Self::TraitValue {
                trait_key,
                entry,
                value,
            } => traits
                .get(trait_key)
                .and_then(|declared| declared.get(entry))
                .is_some_and(|declared| declared == value),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasTrait(key) => write!(f, "has trait '{key}'"),
            Self::TraitValue {
                trait_key,
                entry,
                value,
            } => write!(f, "trait '{trait_key}.{entry}' == {value}"),
        }
    }
}
