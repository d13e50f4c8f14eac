//! Class name resolvers.

use indexmap::IndexMap;
use rc2ui_core::CustomWidget;

use crate::CustomWidgetRegistry;

/// Maps source class names to target class names.
///
/// Resolution must depend only on the class name and the resolver's own
/// configuration. Registering custom widgets on `registry` is the only
/// permitted side effect.
pub trait ClassNameResolver {
    fn resolve(&self, class_name: &str, registry: &mut CustomWidgetRegistry) -> String;
}

/// Passes every class name through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl ClassNameResolver for IdentityResolver {
    fn resolve(&self, class_name: &str, _registry: &mut CustomWidgetRegistry) -> String {
        class_name.to_string()
    }
}

/// How one source class is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ClassMapping {
    /// Emit under another class name.
    Rename(String),
    /// Emit as a custom widget and declare it on the registry.
    Custom(CustomWidget),
}

impl ClassMapping {
    /// Class name emitted for this mapping.
    pub fn target(&self) -> &str {
        match self {
            ClassMapping::Rename(target) => target,
            ClassMapping::Custom(widget) => &widget.class_name,
        }
    }
}

/// Resolver driven by explicit per-class mappings; unmapped classes pass through.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MappingResolver {
    mappings: IndexMap<String, ClassMapping>,
}

impl MappingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `source` as `target`.
    pub fn rename(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(source, ClassMapping::Rename(target.into()));
        self
    }

    /// Emit `source` as the custom widget `widget`.
    pub fn custom(mut self, source: impl Into<String>, widget: CustomWidget) -> Self {
        self.insert(source, ClassMapping::Custom(widget));
        self
    }

    /// Add or replace the mapping of a source class.
    pub fn insert(&mut self, source: impl Into<String>, mapping: ClassMapping) -> Option<ClassMapping> {
        self.mappings.insert(source.into(), mapping)
    }

    pub fn get(&self, source: &str) -> Option<&ClassMapping> {
        self.mappings.get(source)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl FromIterator<(String, ClassMapping)> for MappingResolver {
    fn from_iter<I: IntoIterator<Item = (String, ClassMapping)>>(iter: I) -> Self {
        Self {
            mappings: iter.into_iter().collect(),
        }
    }
}

impl ClassNameResolver for MappingResolver {
    fn resolve(&self, class_name: &str, registry: &mut CustomWidgetRegistry) -> String {
        match self.mappings.get(class_name) {
            Some(ClassMapping::Rename(target)) => {
                tracing::trace!("Resolved {} as {}", class_name, target);
                target.clone()
            }
            Some(ClassMapping::Custom(widget)) => {
                tracing::trace!("Resolved {} as custom widget {}", class_name, widget.class_name);
                registry.register(widget.clone());
                widget.class_name.clone()
            }
            None => class_name.to_string(),
        }
    }
}
