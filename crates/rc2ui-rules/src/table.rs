//! Composite property rule tables.

use indexmap::IndexMap;
use rc2ui_core::{ConfigError, PropertyValue};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Output properties produced by one recognized source value.
pub type OutputSet = SmallVec<[OutputProperty; 3]>;

/// A single target property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputProperty {
    pub name: String,
    pub value: PropertyValue,
}

impl OutputProperty {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Recognized values of one composite property, each with its output set.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CompositeRule {
    #[cfg_attr(feature = "serde", serde(with = "serde_outputs"))]
    values: IndexMap<String, OutputSet>,
}

impl CompositeRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a source value to an ordered set of output properties.
    ///
    /// Mapping the same value again replaces its outputs.
    pub fn map<I>(mut self, value: impl Into<String>, outputs: I) -> Self
    where
        I: IntoIterator<Item = OutputProperty>,
    {
        self.values.insert(value.into(), outputs.into_iter().collect());
        self
    }

    /// Outputs for a recognized value.
    pub fn get(&self, value: &str) -> Option<&OutputSet> {
        self.values.get(value)
    }

    /// Recognized source values, in configuration order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Composite property name to rule mapping.
///
/// Tables are plain data: build one with [`RuleTable::with_rule`], start from
/// [`RuleTable::frame_styles`], or deserialize one, then hand it to a
/// translator.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RuleTable {
    rules: IndexMap<String, CompositeRule>,
}

impl RuleTable {
    /// Create an empty table; every property translates to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame style table used for dialog conversion.
    ///
    /// `frame` tokens from the resource file expand into `frameShape`, an
    /// optional `frameShadow` and an optional `lineWidth`.
    pub fn frame_styles() -> Self {
        let shape = |token: &str| OutputProperty::new("frameShape", PropertyValue::enumeration(token));
        let shadow = |token: &str| OutputProperty::new("frameShadow", PropertyValue::enumeration(token));
        let line_width = |width: i64| OutputProperty::new("lineWidth", width);

        let frame = CompositeRule::new()
            .map(
                "ClientEdge",
                [shape("QFrame::Panel"), shadow("QFrame::Sunken"), line_width(2)],
            )
            .map("StaticEdge", [shape("QFrame::Panel"), shadow("QFrame::Sunken")])
            .map(
                "ModalFrame",
                [shape("QFrame::Panel"), shadow("QFrame::Raised"), line_width(2)],
            )
            .map("Border", [shape("QFrame::Box")])
            .map("Panel", [shape("QFrame::Panel")])
            .map("BlackFrame", [shape("QFrame::Box")])
            .map("Sunken", [shape("QFrame::Panel"), shadow("QFrame::Sunken")]);

        Self::new().with_rule("frame", frame)
    }

    /// Add or replace the rule of a composite property.
    pub fn with_rule(mut self, property: impl Into<String>, rule: CompositeRule) -> Self {
        self.insert(property, rule);
        self
    }

    /// Add or replace the rule of a composite property in place.
    pub fn insert(&mut self, property: impl Into<String>, rule: CompositeRule) -> Option<CompositeRule> {
        self.rules.insert(property.into(), rule)
    }

    /// Rule for a composite property.
    pub fn get(&self, property: &str) -> Option<&CompositeRule> {
        self.rules.get(property)
    }

    pub fn is_composite(&self, property: &str) -> bool {
        self.rules.contains_key(property)
    }

    /// Composite property names, in configuration order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check the table for configuration defects.
    ///
    /// An empty output set is allowed: it explicitly suppresses the property.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (property, rule) in &self.rules {
            if rule.is_empty() {
                return Err(ConfigError::EmptyRule {
                    property: property.clone(),
                });
            }

            for (value, outputs) in &rule.values {
                let mut seen = HashSet::new();
                for output in outputs {
                    if output.name.is_empty() {
                        return Err(ConfigError::EmptyOutputName {
                            property: property.clone(),
                            value: value.clone(),
                        });
                    }
                    if !seen.insert(output.name.as_str()) {
                        return Err(ConfigError::DuplicateOutput {
                            property: property.clone(),
                            value: value.clone(),
                            output: output.name.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Output sets are written as JSON objects (`{"frameShape": "QFrame::Box"}`),
/// keeping key order.
#[cfg(feature = "serde")]
mod serde_outputs {
    use super::{OutputProperty, OutputSet};
    use indexmap::IndexMap;
    use rc2ui_core::PropertyValue;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(values: &IndexMap<String, OutputSet>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let objects: IndexMap<&str, IndexMap<&str, &PropertyValue>> = values
            .iter()
            .map(|(value, outputs)| {
                let object = outputs.iter().map(|o| (o.name.as_str(), &o.value)).collect();
                (value.as_str(), object)
            })
            .collect();
        objects.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<IndexMap<String, OutputSet>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let objects = IndexMap::<String, IndexMap<String, PropertyValue>>::deserialize(deserializer)?;
        Ok(objects
            .into_iter()
            .map(|(value, object)| {
                let outputs = object
                    .into_iter()
                    .map(|(name, value)| OutputProperty { name, value })
                    .collect();
                (value, outputs)
            })
            .collect())
    }
}
