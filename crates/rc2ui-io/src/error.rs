//! Error types for rc2ui-io.

use rc2ui_core::ConfigError;
use rc2ui_walker::{StructureError, WalkError};
use thiserror::Error;

/// Result type for rc2ui-io operations.
pub type Result<T> = std::result::Result<T, IoError>;

/// Errors raised by the `.ui` writer sink.
#[derive(Debug, Error)]
pub enum UiError {
    /// The underlying XML writer failed.
    #[error("xml write error: {0}")]
    Xml(String),

    /// `end_widget` without a matching `start_widget`.
    #[error("end_widget called with no open widget")]
    UnbalancedEnd,
}

impl UiError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        UiError::Xml(err.to_string())
    }
}

/// Errors that can occur while reading input or writing output.
#[derive(Debug, Error)]
pub enum IoError {
    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid converter configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid widget tree.
    #[error("invalid widget tree: {0}")]
    Structure(#[from] StructureError),

    /// Output sink failure.
    #[error("ui output error: {0}")]
    Ui(#[from] UiError),

    /// Output was not valid UTF-8.
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<WalkError<UiError>> for IoError {
    fn from(err: WalkError<UiError>) -> Self {
        match err {
            WalkError::Structure(e) => IoError::Structure(e),
            WalkError::Sink(e) => IoError::Ui(e),
        }
    }
}
