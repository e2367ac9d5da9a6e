//! Data type definitions for the schema system
//!
//! A data type is a named, potentially hierarchical description of a value
//! kind. A specialized type inherits the declared traits of its base type;
//! its own declarations shadow identically-named base traits.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form declared traits of a data type, keyed by trait name
///
/// Values may be arbitrary JSON structures; behaviors and predicates agree
/// on the meaning of individual keys.
pub type TraitMap = FxHashMap<String, Value>;

/// One labeled value of an enumerated type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Raw value, compared as text against submitted defaults
    pub value: String,
    /// Display label
    pub label: String,
}

impl EnumValue {
    /// Create an enumerated value
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A named description of a value kind
///
/// Types form a specialization hierarchy: `password` may specialize a
/// general `string` type, inheriting its traits and overriding only what
/// differs.
#[derive(Debug)]
pub struct DataType {
    name: String,
    base: Option<Arc<DataType>>,
    traits: TraitMap,
    enumeration: Option<Vec<EnumValue>>,
}

impl DataType {
    /// Create a root data type with no base
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            traits: TraitMap::default(),
            enumeration: None,
        }
    }

    /// Set the base type this type specializes
    #[must_use]
    pub fn with_base(mut self, base: Arc<DataType>) -> Self {
        self.base = Some(base);
        self
    }

    /// Declare a trait on this type
    #[must_use]
    pub fn with_trait(mut self, key: impl Into<String>, value: Value) -> Self {
        self.traits.insert(key.into(), value);
        self
    }

    /// Declare the ordered list of enumerated values for this type
    #[must_use]
    pub fn with_enumeration<V, L>(mut self, values: Vec<(V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        self.enumeration = Some(
            values
                .into_iter()
                .map(|(value, label)| EnumValue::new(value, label))
                .collect(),
        );
        self
    }

    /// Name of this type
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base type this type specializes, if any
    #[must_use]
    pub fn base(&self) -> Option<&Arc<DataType>> {
        self.base.as_ref()
    }

    /// The resolved trait map: base traits merged under own traits
    ///
    /// Own values win on conflict. Merging replaces whole trait values;
    /// nested structures are not merged key by key.
    #[must_use]
    pub fn resolved_traits(&self) -> TraitMap {
        let mut resolved = match &self.base {
            Some(base) => base.resolved_traits(),
            None => TraitMap::default(),
        };
        for (key, value) in &self.traits {
            resolved.insert(key.clone(), value.clone());
        }
        resolved
    }

    /// Look up a single trait value, walking the base chain
    ///
    /// Returns the most specific declaration without cloning the whole map.
    #[must_use]
    pub fn trait_value(&self, key: &str) -> Option<&Value> {
        match self.traits.get(key) {
            Some(value) => Some(value),
            None => self.base.as_ref().and_then(|base| base.trait_value(key)),
        }
    }

    /// Whether the resolved trait map declares the given key
    #[must_use]
    pub fn has_trait(&self, key: &str) -> bool {
        self.trait_value(key).is_some()
    }

    /// The enumerated values of this type, walking the base chain
    #[must_use]
    pub fn enumeration(&self) -> Option<&[EnumValue]> {
        match &self.enumeration {
            Some(values) => Some(values),
            None => self.base.as_ref().and_then(|base| base.enumeration()),
        }
    }
}
