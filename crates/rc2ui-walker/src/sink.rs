//! Sink trait for structural widget events.

use std::convert::Infallible;

use rc2ui_core::{CustomWidget, PropertyValue, WidgetNode};

/// Consumer of the event stream produced by a walk.
///
/// Every call takes effect immediately; sinks must not defer or batch
/// anything observable across calls.
pub trait WriterSink {
    /// Error raised by the sink itself (I/O and the like).
    type Error: std::error::Error + 'static;

    /// Open a widget. `node` carries the id and geometry of the source widget.
    fn start_widget(&mut self, class_name: &str, node: &WidgetNode) -> Result<(), Self::Error>;

    /// Set a property on the innermost open widget.
    fn add_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), Self::Error>;

    /// Declare a custom widget class.
    fn add_custom_widget(&mut self, widget: &CustomWidget) -> Result<(), Self::Error>;

    /// Close the innermost open widget.
    fn end_widget(&mut self) -> Result<(), Self::Error>;
}

impl<S: WriterSink + ?Sized> WriterSink for &mut S {
    type Error = S::Error;

    fn start_widget(&mut self, class_name: &str, node: &WidgetNode) -> Result<(), Self::Error> {
        (**self).start_widget(class_name, node)
    }

    fn add_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), Self::Error> {
        (**self).add_property(name, value)
    }

    fn add_custom_widget(&mut self, widget: &CustomWidget) -> Result<(), Self::Error> {
        (**self).add_custom_widget(widget)
    }

    fn end_widget(&mut self) -> Result<(), Self::Error> {
        (**self).end_widget()
    }
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    StartWidget { class_name: String, id: String },
    AddProperty { name: String, value: PropertyValue },
    AddCustomWidget(CustomWidget),
    EndWidget,
}

/// Sink that records every call, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SinkEvent> {
        self.events
    }
}

impl WriterSink for RecordingSink {
    type Error = Infallible;

    fn start_widget(&mut self, class_name: &str, node: &WidgetNode) -> Result<(), Self::Error> {
        self.events.push(SinkEvent::StartWidget {
            class_name: class_name.to_string(),
            id: node.id.clone(),
        });
        Ok(())
    }

    fn add_property(&mut self, name: &str, value: &PropertyValue) -> Result<(), Self::Error> {
        self.events.push(SinkEvent::AddProperty {
            name: name.to_string(),
            value: value.clone(),
        });
        Ok(())
    }

    fn add_custom_widget(&mut self, widget: &CustomWidget) -> Result<(), Self::Error> {
        self.events.push(SinkEvent::AddCustomWidget(widget.clone()));
        Ok(())
    }

    fn end_widget(&mut self) -> Result<(), Self::Error> {
        self.events.push(SinkEvent::EndWidget);
        Ok(())
    }
}
