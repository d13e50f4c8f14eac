//! Property translation.
//!
//! Lowers one source `(name, value)` pair into the target properties:
//! 1. Names without a composite rule pass through unchanged
//! 2. Recognized composite values expand into their configured outputs
//! 3. Unrecognized composite values produce nothing

use rc2ui_core::PropertyValue;
use smallvec::SmallVec;

use crate::table::{OutputProperty, RuleTable};

/// Ordered target properties produced for one source property.
pub type Translation = SmallVec<[OutputProperty; 3]>;

/// Lowers source properties to target properties.
///
/// Implementations must be pure: the same input always yields the same
/// output, in the same order.
pub trait PropertyTranslator {
    fn translate(&self, name: &str, value: &PropertyValue) -> Translation;
}

/// What to do with a composite property whose value has no rule.
///
/// Both policies drop the property; they differ only in how loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnrecognizedValuePolicy {
    /// Drop silently (logged at debug level).
    #[default]
    Drop,
    /// Drop and log a warning.
    Warn,
}

/// Table-driven [`PropertyTranslator`].
#[derive(Debug, Clone, Default)]
pub struct RuleTranslator {
    table: RuleTable,
    policy: UnrecognizedValuePolicy,
}

impl RuleTranslator {
    pub fn new(table: RuleTable) -> Self {
        Self {
            table,
            policy: UnrecognizedValuePolicy::Drop,
        }
    }

    /// Translator over [`RuleTable::frame_styles`].
    pub fn frame_styles() -> Self {
        Self::new(RuleTable::frame_styles())
    }

    pub fn with_policy(mut self, policy: UnrecognizedValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn policy(&self) -> UnrecognizedValuePolicy {
        self.policy
    }
}

impl PropertyTranslator for RuleTranslator {
    fn translate(&self, name: &str, value: &PropertyValue) -> Translation {
        let Some(rule) = self.table.get(name) else {
            let mut identity = Translation::new();
            identity.push(OutputProperty::new(name, value.clone()));
            return identity;
        };

        if let Some(outputs) = value.as_str().and_then(|token| rule.get(token)) {
            return outputs.clone();
        }

        match self.policy {
            UnrecognizedValuePolicy::Drop => {
                tracing::debug!("Dropping unrecognized value '{}' of composite property '{}'", value, name);
            }
            UnrecognizedValuePolicy::Warn => {
                tracing::warn!("Dropping unrecognized value '{}' of composite property '{}'", value, name);
            }
        }
        Translation::new()
    }
}
