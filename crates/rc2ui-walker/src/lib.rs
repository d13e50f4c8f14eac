//! Widget tree walking for the rc2ui dialog converter.
//!
//! This crate turns a widget tree into a stream of sink events:
//! - Pre-order `start_widget` / `add_property` / `end_widget` emission
//! - Class resolution and property lowering per widget
//! - Custom widget declarations forwarded to the sink
//! - Fail-fast structural checks before anything is emitted
//!
//! # Example
//!
//! ```
//! use rc2ui_core::WidgetNode;
//! use rc2ui_walker::{ConversionSession, RecordingSink};
//!
//! let dialog = WidgetNode::new("Dialog", "dlgMain")
//!     .with_property("frame", "Border")
//!     .with_child(WidgetNode::new("Static", "Label1"));
//!
//! let mut session: ConversionSession = ConversionSession::default();
//! let mut sink = RecordingSink::new();
//! session.convert(&dialog, &mut sink).unwrap();
//! assert_eq!(sink.events().len(), 5);
//! ```

pub mod error;
pub mod session;
pub mod sink;
pub mod walker;

pub use error::{Result, StructureError, WalkError, WidgetPath};
pub use session::ConversionSession;
pub use sink::{RecordingSink, SinkEvent, WriterSink};
pub use walker::{check_structure, traverse, WidgetTreeWalker};
