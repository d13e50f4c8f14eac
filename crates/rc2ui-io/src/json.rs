//! JSON widget trees.
//!
//! The layout mirrors [`WidgetNode`]: `className`, `id`, `geometry`,
//! `properties` and `children`. Only `className` and `id` are required for a
//! tree to convert; they are checked by the walker, not here.

use std::io::Read;

use rc2ui_core::WidgetNode;

use crate::error::Result;

/// Read one widget tree.
pub fn read_widget_tree(json: &str) -> Result<WidgetNode> {
    Ok(serde_json::from_str(json)?)
}

/// Read one widget tree from a reader.
pub fn read_widget_tree_from<R: Read>(reader: R) -> Result<WidgetNode> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read a JSON array of dialogs.
pub fn read_widget_trees(json: &str) -> Result<Vec<WidgetNode>> {
    Ok(serde_json::from_str(json)?)
}

/// Write a widget tree as pretty-printed JSON.
pub fn write_widget_tree(node: &WidgetNode) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}
