//! Converter configuration.
//!
//! ```json
//! {
//!   "properties": {"frame": {"Border": {"frameShape": "QFrame::Box"}}},
//!   "classes": {
//!     "Button": {"rename": "QPushButton"},
//!     "Picker": {"custom": {"className": "ColorPicker", "baseClassName": "QWidget", "header": "<colorpicker.h>"}}
//!   },
//!   "unrecognizedValues": "warn"
//! }
//! ```
//!
//! Every key is optional; `properties` defaults to the frame style table.

use std::io::Read;

use rc2ui_resolver::MappingResolver;
use rc2ui_rules::{RuleTable, RuleTranslator, UnrecognizedValuePolicy};
use rc2ui_walker::ConversionSession;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Rule table and class mappings for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverterConfig {
    #[serde(default = "RuleTable::frame_styles")]
    pub properties: RuleTable,
    #[serde(default)]
    pub classes: MappingResolver,
    #[serde(default)]
    pub unrecognized_values: UnrecognizedValuePolicy,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            properties: RuleTable::frame_styles(),
            classes: MappingResolver::new(),
            unrecognized_values: UnrecognizedValuePolicy::Drop,
        }
    }
}

impl ConverterConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Check the rule table. Header includes are already checked on load.
    pub fn validate(&self) -> Result<()> {
        self.properties.validate()?;
        Ok(())
    }

    /// Validate and build a session.
    pub fn into_session(self) -> Result<ConversionSession> {
        self.validate()?;
        tracing::debug!(
            "Converter configured with {} composite properties and {} class mappings",
            self.properties.len(),
            self.classes.len()
        );
        let translator = RuleTranslator::new(self.properties).with_policy(self.unrecognized_values);
        Ok(ConversionSession::new(self.classes, translator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoError;
    use rc2ui_core::ConfigError;
    use rc2ui_resolver::ClassMapping;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ConverterConfig::from_json("{}").unwrap();
        assert_eq!(config, ConverterConfig::default());
        assert!(config.properties.is_composite("frame"));
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "properties": {"style": {"Flat": {"flat": true}}},
            "classes": {
                "Button": {"rename": "QPushButton"},
                "Picker": {"custom": {"className": "ColorPicker", "baseClassName": "QWidget", "header": "<colorpicker.h>", "isContainer": true}}
            },
            "unrecognizedValues": "warn"
        }"#;
        let config = ConverterConfig::from_json(json).unwrap();

        assert!(config.properties.is_composite("style"));
        assert!(!config.properties.is_composite("frame"));
        assert_eq!(config.classes.get("Button"), Some(&ClassMapping::Rename("QPushButton".into())));
        assert_eq!(config.classes.get("Picker").map(ClassMapping::target), Some("ColorPicker"));
        assert_eq!(config.unrecognized_values, UnrecognizedValuePolicy::Warn);

        let session = config.into_session().unwrap();
        assert_eq!(session.translator().policy(), UnrecognizedValuePolicy::Warn);
    }

    #[test]
    fn test_malformed_header_rejected_on_load() {
        let json = r#"{"classes": {"Picker": {"custom": {"className": "ColorPicker", "baseClassName": "QWidget", "header": "colorpicker.h"}}}}"#;
        assert!(matches!(ConverterConfig::from_json(json), Err(IoError::Json(_))));
    }

    #[test]
    fn test_invalid_rule_table_rejected() {
        let config = ConverterConfig::from_json(r#"{"properties": {"frame": {}}}"#).unwrap();
        assert!(matches!(
            config.into_session(),
            Err(IoError::Config(ConfigError::EmptyRule { .. }))
        ));
    }
}
