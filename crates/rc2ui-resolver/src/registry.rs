//! Registry of custom widget declarations for one conversion session.

use indexmap::{IndexMap, IndexSet};
use rc2ui_core::CustomWidget;

/// Custom widgets registered during class resolution.
///
/// Keyed by custom class name, ordered by first registration. Registering a
/// class again replaces its descriptor in place (last registration wins).
#[derive(Debug, Clone, Default)]
pub struct CustomWidgetRegistry {
    widgets: IndexMap<String, CustomWidget>,
    /// Classes registered since the last drain, identical re-registrations
    /// included.
    pending: IndexSet<String>,
}

impl CustomWidgetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom widget, returning the descriptor it replaced.
    ///
    /// Registering a descriptor identical to the current one leaves the
    /// registry unchanged, but the class is still reported by the next
    /// [`drain_pending`](Self::drain_pending).
    pub fn register(&mut self, widget: CustomWidget) -> Option<CustomWidget> {
        if self.widgets.get(&widget.class_name) == Some(&widget) {
            self.pending.insert(widget.class_name);
            return None;
        }

        tracing::debug!(
            "Registering custom widget {} extends {} ({})",
            widget.class_name,
            widget.base_class_name,
            widget.header
        );
        self.pending.insert(widget.class_name.clone());
        self.widgets.insert(widget.class_name.clone(), widget)
    }

    /// Get a custom widget by class name.
    pub fn get(&self, class_name: &str) -> Option<&CustomWidget> {
        self.widgets.get(class_name)
    }

    /// Check if a custom widget exists.
    pub fn contains(&self, class_name: &str) -> bool {
        self.widgets.contains_key(class_name)
    }

    /// Base class of a registered custom widget.
    pub fn base_class_of(&self, class_name: &str) -> Option<&str> {
        self.widgets.get(class_name).map(|w| w.base_class_name.as_str())
    }

    /// All registered widgets, in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CustomWidget> {
        self.widgets.values()
    }

    /// Take the current descriptors of every class registered since the
    /// last call.
    pub fn drain_pending(&mut self) -> Vec<CustomWidget> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .iter()
            .filter_map(|name| self.widgets.get(name).cloned())
            .collect()
    }

    /// Whether registrations are waiting to be drained.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
