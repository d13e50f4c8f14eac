//! Input and output formats for the rc2ui dialog converter.
//!
//! Supported formats:
//! - Qt Designer `.ui` (output, through the [`UiWriter`] sink)
//! - JSON widget trees (input)
//! - JSON converter configuration

pub mod config;
pub mod error;
pub mod json;
pub mod ui;

pub use config::ConverterConfig;
pub use error::{IoError, Result, UiError};
pub use json::{read_widget_tree, read_widget_tree_from, read_widget_trees, write_widget_tree};
pub use ui::UiWriter;

use rc2ui_core::WidgetNode;
use rc2ui_resolver::ClassNameResolver;
use rc2ui_rules::PropertyTranslator;
use rc2ui_walker::ConversionSession;

/// Convert one dialog to a `.ui` document.
pub fn convert_to_ui<R, T>(
    root: &WidgetNode,
    session: &mut ConversionSession<R, T>,
    form_class: Option<&str>,
) -> Result<String>
where
    R: ClassNameResolver,
    T: PropertyTranslator,
{
    let mut writer = match form_class {
        Some(class_name) => UiWriter::with_form_class(Vec::new(), class_name)?,
        None => UiWriter::new(Vec::new())?,
    };
    session.convert(root, &mut writer)?;
    let bytes = writer.finish()?;
    Ok(String::from_utf8(bytes)?)
}
