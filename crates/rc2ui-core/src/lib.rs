//! Core types for the rc2ui dialog converter.
//!
//! This crate provides the foundational types shared by the other rc2ui crates:
//! - The widget tree produced by the resource parser
//! - Property values carried by widgets and emitted to sinks
//! - Custom widget descriptors registered during class resolution
//! - Configuration error types

pub mod ast;
pub mod errors;
pub mod types;

pub use ast::*;
pub use errors::*;
pub use types::*;
