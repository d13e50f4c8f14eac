//! Property lowering for converted widgets.
//!
//! This crate handles:
//! - Composite property rule tables (`frame` style tokens and the like)
//! - Translating one source property into zero or more target properties
//! - Validation of rule tables before a conversion starts

mod table;
mod translator;

pub use table::{CompositeRule, OutputProperty, OutputSet, RuleTable};
pub use translator::{PropertyTranslator, RuleTranslator, Translation, UnrecognizedValuePolicy};
