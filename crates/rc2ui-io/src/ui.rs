//! Qt Designer `.ui` output.
//!
//! [`UiWriter`] is a [`WriterSink`] that serializes the walker's events as a
//! Designer form. Custom widget declarations are collected during the walk and
//! written by [`UiWriter::finish`].

use std::collections::HashMap;
use std::io::Write;

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rc2ui_core::{is_enum_token, CustomWidget, PropertyValue, WidgetNode};
use rc2ui_walker::WriterSink;

use crate::error::UiError;

const MAIN_WINDOW_CLASS: &str = "QMainWindow";

/// Writes a Designer `.ui` document.
pub struct UiWriter<W: Write> {
    writer: Writer<W>,
    custom_widgets: IndexMap<String, CustomWidget>,
    /// Times each widget id has been used, for unique object names.
    name_counts: HashMap<String, usize>,
    /// One entry per open widget: whether it wraps a central widget.
    open: Vec<bool>,
    current_id: String,
}

impl<W: Write> UiWriter<W> {
    /// Start a document: XML declaration and the `<ui>` root.
    pub fn new(inner: W) -> Result<Self, UiError> {
        let mut ui = Self {
            writer: Writer::new_with_indent(inner, b' ', 1),
            custom_widgets: IndexMap::new(),
            name_counts: HashMap::new(),
            open: Vec::new(),
            current_id: String::new(),
        };
        ui.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut root = BytesStart::new("ui");
        root.push_attribute(("version", "4.0"));
        ui.write(Event::Start(root))?;
        Ok(ui)
    }

    /// Start a document for the form class `class_name`.
    pub fn with_form_class(inner: W, class_name: &str) -> Result<Self, UiError> {
        let mut ui = Self::new(inner)?;
        ui.text_element("class", class_name)?;
        Ok(ui)
    }

    /// Number of widgets currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Close open widgets, write custom widget declarations and the trailer,
    /// and return the underlying writer.
    pub fn finish(mut self) -> Result<W, UiError> {
        while !self.open.is_empty() {
            self.end_widget()?;
        }

        if !self.custom_widgets.is_empty() {
            let widgets = std::mem::take(&mut self.custom_widgets);
            self.start("customwidgets")?;
            for widget in widgets.values() {
                self.start("customwidget")?;
                self.text_element("class", &widget.class_name)?;
                self.text_element("extends", &widget.base_class_name)?;

                let mut header = BytesStart::new("header");
                if widget.header.is_global() {
                    header.push_attribute(("location", "global"));
                }
                self.write(Event::Start(header))?;
                self.write(Event::Text(BytesText::new(&widget.header.path)))?;
                self.end("header")?;

                if widget.is_container {
                    self.text_element("container", "1")?;
                }
                self.end("customwidget")?;
            }
            self.end("customwidgets")?;
        }

        self.write(Event::Empty(BytesStart::new("resources")))?;
        self.write(Event::Empty(BytesStart::new("connections")))?;
        self.end("ui")?;
        Ok(self.writer.into_inner())
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), UiError> {
        self.writer.write_event(event).map_err(UiError::xml)
    }

    fn start(&mut self, name: &str) -> Result<(), UiError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), UiError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), UiError> {
        self.start(name)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn start_property(&mut self, name: &str) -> Result<(), UiError> {
        let mut property = BytesStart::new("property");
        property.push_attribute(("name", name));
        self.write(Event::Start(property))
    }

    /// Object name for `id`; repeated ids (typically `IDC_STATIC`) get a
    /// numeric suffix starting at 2.
    fn unique_name(&mut self, id: &str) -> String {
        let count = self.name_counts.entry(id.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            id.to_string()
        } else {
            format!("{}{}", id, count)
        }
    }

    fn is_main_window(&self, class_name: &str) -> bool {
        class_name == MAIN_WINDOW_CLASS
            || self
                .custom_widgets
                .get(class_name)
                .is_some_and(|w| w.base_class_name == MAIN_WINDOW_CLASS)
    }

    /// Text and enum values are typed by property name first: `alignment` is a
    /// flag set and `text` a translatable string, whatever the value looks like.
    fn write_text_value(&mut self, name: &str, text: &str, is_enum: bool) -> Result<(), UiError> {
        if name == "alignment" {
            self.text_element("set", text)
        } else if name == "text" {
            let mut string = BytesStart::new("string");
            string.push_attribute(("comment", self.current_id.as_str()));
            self.write(Event::Start(string))?;
            self.write(Event::Text(BytesText::new(text)))?;
            self.end("string")
        } else if is_enum {
            self.text_element("enum", text)
        } else {
            self.text_element("string", text)
        }
    }
}

impl<W: Write> WriterSink for UiWriter<W> {
    type Error = UiError;

    fn start_widget(&mut self, class_name: &str, node: &WidgetNode) -> Result<(), UiError> {
        let is_main_window = self.is_main_window(class_name);
        self.open.push(is_main_window);
        self.current_id = node.id.clone();
        let object_name = self.unique_name(&node.id);

        let mut widget = BytesStart::new("widget");
        widget.push_attribute(("class", class_name));
        widget.push_attribute(("name", object_name.as_str()));
        self.write(Event::Start(widget))?;

        // Keep the resource id, object names may have been made unique
        let mut property = BytesStart::new("property");
        property.push_attribute(("name", "idString"));
        property.push_attribute(("stdset", "0"));
        self.write(Event::Start(property))?;
        let mut string = BytesStart::new("string");
        string.push_attribute(("notr", "true"));
        self.write(Event::Start(string))?;
        self.write(Event::Text(BytesText::new(&node.id)))?;
        self.end("string")?;
        self.end("property")?;

        let geometry = node.geometry;
        self.start_property("geometry")?;
        self.start("rect")?;
        self.text_element("x", &geometry.x.to_string())?;
        self.text_element("y", &geometry.y.to_string())?;
        self.text_element("width", &geometry.width.to_string())?;
        self.text_element("height", &geometry.height.to_string())?;
        self.end("rect")?;
        self.end("property")?;

        if is_main_window {
            let mut central = BytesStart::new("widget");
            central.push_attribute(("class", "QWidget"));
            central.push_attribute(("name", "centralwidget"));
            self.write(Event::Start(central))?;
        }
        Ok(())
    }

    fn add_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), UiError> {
        match value {
            PropertyValue::Boolean(b) => {
                self.start_property(name)?;
                self.text_element("bool", if *b { "true" } else { "false" })?;
                self.end("property")
            }
            PropertyValue::Number(n) => {
                self.start_property(name)?;
                self.text_element("number", &n.to_string())?;
                self.end("property")
            }
            PropertyValue::Enum(token) => {
                self.start_property(name)?;
                self.write_text_value(name, token, true)?;
                self.end("property")
            }
            PropertyValue::Text(text) => {
                self.start_property(name)?;
                self.write_text_value(name, text, is_enum_token(text))?;
                self.end("property")
            }
            PropertyValue::TextList(items) => {
                for item in items {
                    self.start("item")?;
                    self.start_property(name)?;
                    self.text_element("string", item)?;
                    self.end("property")?;
                    self.end("item")?;
                }
                Ok(())
            }
        }
    }

    fn add_custom_widget(&mut self, widget: &CustomWidget) -> Result<(), UiError> {
        self.custom_widgets
            .insert(widget.class_name.clone(), widget.clone());
        Ok(())
    }

    fn end_widget(&mut self) -> Result<(), UiError> {
        let is_main_window = self.open.pop().ok_or(UiError::UnbalancedEnd)?;
        if is_main_window {
            self.end("widget")?;
        }
        self.end("widget")
    }
}
