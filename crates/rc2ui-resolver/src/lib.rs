//! Class name resolution for converted widgets.
//!
//! This crate resolves:
//! - Source class names to target class names (pass-through by default)
//! - Custom widget declarations, registered on an explicit registry

mod registry;
mod resolver;

pub use registry::CustomWidgetRegistry;
pub use resolver::{ClassMapping, ClassNameResolver, IdentityResolver, MappingResolver};
