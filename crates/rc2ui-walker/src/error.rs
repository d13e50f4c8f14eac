//! Error types for widget tree walks.

use thiserror::Error;

/// Result type alias for walks into a sink with error type `E`.
pub type Result<T, E> = std::result::Result<T, WalkError<E>>;

/// Child-index path from the root to a widget (`[]` is the root itself).
pub type WidgetPath = Vec<usize>;

/// Structural defects found before any event is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("Widget at {} has no class name", display_path(.path))]
    MissingClassName { path: WidgetPath },

    #[error("Widget of class '{class_name}' at {} has no id", display_path(.path))]
    MissingId { class_name: String, path: WidgetPath },
}

/// Errors returned by a walk.
#[derive(Debug, Error)]
pub enum WalkError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// The sink failed; its error is passed through unchanged.
    #[error(transparent)]
    Sink(E),
}

impl<E> WalkError<E>
where
    E: std::error::Error + 'static,
{
    /// The sink's own error, if the sink failed.
    pub fn sink_error(&self) -> Option<&E> {
        match self {
            WalkError::Sink(e) => Some(e),
            WalkError::Structure(_) => None,
        }
    }
}

fn display_path(path: &[usize]) -> String {
    let mut out = String::from("root");
    for index in path {
        out.push('/');
        out.push_str(&index.to_string());
    }
    out
}
