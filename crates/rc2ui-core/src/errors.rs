//! Error types shared across rc2ui crates.

use thiserror::Error;

/// Configuration defects, reported when a rule table or class mapping is
/// validated, never while a tree is being converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Malformed header include '{header}', expected '<foo.h>' or '\"foo.h\"'")]
    MalformedHeader { header: String },

    #[error("Composite property '{property}' has no recognized values")]
    EmptyRule { property: String },

    #[error("Rule '{property}' = '{value}' has an output property with an empty name")]
    EmptyOutputName { property: String, value: String },

    #[error("Rule '{property}' = '{value}' sets '{output}' more than once")]
    DuplicateOutput {
        property: String,
        value: String,
        output: String,
    },

    #[error("Property number {value} is not a 64-bit integer")]
    NonIntegerNumber { value: String },
}
