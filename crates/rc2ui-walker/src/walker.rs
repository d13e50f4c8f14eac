//! Depth-first widget tree walk.
//!
//! Drives the resolver and translator over a widget tree and emits the
//! structural events to a sink:
//! 1. Check every widget for a class name and an id
//! 2. For each widget in pre-order: custom widget declarations, `start_widget`,
//!    translated properties, children, `end_widget`
//!
//! The walk uses an explicit stack, so tree depth is bounded by memory rather
//! than by the call stack.

use std::collections::HashMap;

use rc2ui_core::{CustomWidget, WidgetNode};
use rc2ui_resolver::{ClassNameResolver, CustomWidgetRegistry};
use rc2ui_rules::PropertyTranslator;

use crate::error::{StructureError, WalkError, WidgetPath};
use crate::sink::WriterSink;

/// Walk `node` into `sink`, resolving classes with `resolver` and lowering
/// properties with `translator`.
pub fn traverse<S, R, T>(
    node: &WidgetNode,
    sink: &mut S,
    resolver: &R,
    translator: &T,
    registry: &mut CustomWidgetRegistry,
) -> Result<(), WalkError<S::Error>>
where
    S: WriterSink + ?Sized,
    R: ClassNameResolver + ?Sized,
    T: PropertyTranslator + ?Sized,
{
    WidgetTreeWalker::new(resolver, translator).traverse(node, registry, sink)
}

/// Check that every widget in the tree has a class name and an id.
pub fn check_structure(root: &WidgetNode) -> Result<(), StructureError> {
    let mut path: WidgetPath = Vec::new();
    let mut stack = vec![(root, 0usize, 0usize)];

    while let Some((node, depth, index)) = stack.pop() {
        if depth > 0 {
            path.truncate(depth - 1);
            path.push(index);
        }

        if node.class_name.is_empty() {
            return Err(StructureError::MissingClassName { path });
        }
        if node.id.is_empty() {
            return Err(StructureError::MissingId {
                class_name: node.class_name.clone(),
                path,
            });
        }

        stack.extend(
            node.children
                .iter()
                .enumerate()
                .rev()
                .map(|(i, child)| (child, depth + 1, i)),
        );
    }
    Ok(())
}

enum Step<'n> {
    Enter(&'n WidgetNode),
    Leave,
}

/// Walks widget trees with a fixed resolver and translator.
pub struct WidgetTreeWalker<'a, R: ?Sized, T: ?Sized> {
    resolver: &'a R,
    translator: &'a T,
}

impl<'a, R, T> WidgetTreeWalker<'a, R, T>
where
    R: ClassNameResolver + ?Sized,
    T: PropertyTranslator + ?Sized,
{
    pub fn new(resolver: &'a R, translator: &'a T) -> Self {
        Self { resolver, translator }
    }

    /// Walk one tree. Nothing is emitted if the tree is structurally invalid.
    pub fn traverse<S>(
        &self,
        root: &WidgetNode,
        registry: &mut CustomWidgetRegistry,
        sink: &mut S,
    ) -> Result<(), WalkError<S::Error>>
    where
        S: WriterSink + ?Sized,
    {
        check_structure(root)?;
        tracing::debug!("Converting widget tree {} ({} widgets)", root.id, root.widget_count());

        // Declarations already sent to this sink during this walk
        let mut declared: HashMap<String, CustomWidget> = HashMap::new();
        let mut stack = vec![Step::Enter(root)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => {
                    self.open_widget(node, registry, &mut declared, sink)?;
                    stack.push(Step::Leave);
                    stack.extend(node.children.iter().rev().map(Step::Enter));
                }
                Step::Leave => sink.end_widget().map_err(WalkError::Sink)?,
            }
        }
        Ok(())
    }

    fn open_widget<S>(
        &self,
        node: &WidgetNode,
        registry: &mut CustomWidgetRegistry,
        declared: &mut HashMap<String, CustomWidget>,
        sink: &mut S,
    ) -> Result<(), WalkError<S::Error>>
    where
        S: WriterSink + ?Sized,
    {
        let class_name = self.resolver.resolve(&node.class_name, registry);
        tracing::trace!("Widget {} ({} -> {})", node.id, node.class_name, class_name);

        let mut pending = registry.drain_pending();
        if let Some(widget) = registry.get(&class_name) {
            pending.push(widget.clone());
        }
        for widget in pending {
            if declared.get(&widget.class_name) != Some(&widget) {
                sink.add_custom_widget(&widget).map_err(WalkError::Sink)?;
                declared.insert(widget.class_name.clone(), widget);
            }
        }

        sink.start_widget(&class_name, node).map_err(WalkError::Sink)?;

        for (name, value) in &node.properties {
            for output in self.translator.translate(name, value) {
                sink.add_property(&output.name, &output.value)
                    .map_err(WalkError::Sink)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkEvent};
    use proptest::prelude::*;
    use rc2ui_core::PropertyValue;
    use rc2ui_resolver::{IdentityResolver, MappingResolver};
    use rc2ui_rules::RuleTranslator;
    use std::fmt;

    fn start(class_name: &str, id: &str) -> SinkEvent {
        SinkEvent::StartWidget {
            class_name: class_name.into(),
            id: id.into(),
        }
    }

    fn prop(name: &str, value: PropertyValue) -> SinkEvent {
        SinkEvent::AddProperty {
            name: name.into(),
            value,
        }
    }

    fn record(root: &WidgetNode, resolver: &dyn ClassNameResolver, registry: &mut CustomWidgetRegistry) -> Vec<SinkEvent> {
        let translator = RuleTranslator::frame_styles();
        let mut sink = RecordingSink::new();
        match traverse(root, &mut sink, resolver, &translator, registry) {
            Ok(()) => sink.into_events(),
            Err(e) => panic!("walk failed: {e}"),
        }
    }

    #[test]
    fn test_dialog_with_label() {
        let root = WidgetNode::new("Dialog", "dlgMain")
            .with_property("frame", "Border")
            .with_child(WidgetNode::new("Static", "Label1"));

        let events = record(&root, &IdentityResolver, &mut CustomWidgetRegistry::new());
        assert_eq!(
            events,
            vec![
                start("Dialog", "dlgMain"),
                prop("frameShape", PropertyValue::enumeration("QFrame::Box")),
                start("Static", "Label1"),
                SinkEvent::EndWidget,
                SinkEvent::EndWidget,
            ]
        );
    }

    #[test]
    fn test_properties_keep_order_across_expansion() {
        let root = WidgetNode::new("Static", "IDC_FRAME")
            .with_property("text", "Preview")
            .with_property("frame", "ClientEdge")
            .with_property("frame2", "x")
            .with_property("enabled", false);

        let events = record(&root, &IdentityResolver, &mut CustomWidgetRegistry::new());
        let names: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::AddProperty { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["text", "frameShape", "frameShadow", "lineWidth", "frame2", "enabled"]);
    }

    #[test]
    fn test_unknown_frame_emits_nothing() {
        let root = WidgetNode::new("Static", "IDC_FRAME").with_property("frame", "UnknownStyle42");
        let events = record(&root, &IdentityResolver, &mut CustomWidgetRegistry::new());
        assert_eq!(events, vec![start("Static", "IDC_FRAME"), SinkEvent::EndWidget]);
    }

    #[test]
    fn test_children_in_order() {
        let root = WidgetNode::new("Dialog", "IDD")
            .with_child(WidgetNode::new("GroupBox", "IDC_GROUP").with_child(WidgetNode::new("Button", "IDC_RADIO1")))
            .with_child(WidgetNode::new("Button", "IDOK"))
            .with_child(WidgetNode::new("Button", "IDCANCEL"));

        let events = record(&root, &IdentityResolver, &mut CustomWidgetRegistry::new());
        assert_eq!(
            events,
            vec![
                start("Dialog", "IDD"),
                start("GroupBox", "IDC_GROUP"),
                start("Button", "IDC_RADIO1"),
                SinkEvent::EndWidget,
                SinkEvent::EndWidget,
                start("Button", "IDOK"),
                SinkEvent::EndWidget,
                start("Button", "IDCANCEL"),
                SinkEvent::EndWidget,
                SinkEvent::EndWidget,
            ]
        );
    }

    #[test]
    fn test_custom_widget_declared_once_per_walk() {
        let widget = CustomWidget::new("MyLabel", "QLabel", "\"mylabel.h\"", false).unwrap();
        let resolver = MappingResolver::new().custom("Static", widget.clone());
        let root = WidgetNode::new("Dialog", "IDD")
            .with_child(WidgetNode::new("Static", "IDC_A"))
            .with_child(WidgetNode::new("Static", "IDC_B"));

        let mut registry = CustomWidgetRegistry::new();
        let events = record(&root, &resolver, &mut registry);
        assert_eq!(
            events,
            vec![
                start("Dialog", "IDD"),
                SinkEvent::AddCustomWidget(widget.clone()),
                start("MyLabel", "IDC_A"),
                SinkEvent::EndWidget,
                start("MyLabel", "IDC_B"),
                SinkEvent::EndWidget,
                SinkEvent::EndWidget,
            ]
        );

        // A second walk with the same registry declares it again for the new sink
        let events = record(&root, &resolver, &mut registry);
        assert_eq!(events[1], SinkEvent::AddCustomWidget(widget));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_id_emits_nothing() {
        let root = WidgetNode::new("Dialog", "IDD")
            .with_child(WidgetNode::new("Static", "IDC_A"))
            .with_child(WidgetNode::new("GroupBox", "IDC_G").with_child(WidgetNode::new("Edit", "")));

        let translator = RuleTranslator::frame_styles();
        let mut sink = RecordingSink::new();
        let err = traverse(&root, &mut sink, &IdentityResolver, &translator, &mut CustomWidgetRegistry::new())
            .unwrap_err();

        assert!(matches!(
            err,
            WalkError::Structure(StructureError::MissingId { ref class_name, ref path })
                if class_name == "Edit" && path == &vec![1, 0]
        ));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_missing_class_name() {
        let root = WidgetNode::new("", "IDD");
        assert_eq!(
            check_structure(&root),
            Err(StructureError::MissingClassName { path: vec![] })
        );
    }

    #[derive(Debug)]
    struct DiskFull;

    impl fmt::Display for DiskFull {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("disk full")
        }
    }

    impl std::error::Error for DiskFull {}

    /// Fails on the n-th call.
    struct FailingSink {
        calls: usize,
        fail_at: usize,
    }

    impl FailingSink {
        fn tick(&mut self) -> Result<(), DiskFull> {
            self.calls += 1;
            if self.calls == self.fail_at {
                Err(DiskFull)
            } else {
                Ok(())
            }
        }
    }

    impl WriterSink for FailingSink {
        type Error = DiskFull;

        fn start_widget(&mut self, _: &str, _: &WidgetNode) -> Result<(), DiskFull> {
            self.tick()
        }
        fn add_property(&mut self, _: &str, _: &PropertyValue) -> Result<(), DiskFull> {
            self.tick()
        }
        fn add_custom_widget(&mut self, _: &CustomWidget) -> Result<(), DiskFull> {
            self.tick()
        }
        fn end_widget(&mut self) -> Result<(), DiskFull> {
            self.tick()
        }
    }

    #[test]
    fn test_sink_error_propagates() {
        let root = WidgetNode::new("Dialog", "IDD")
            .with_property("text", "Hello")
            .with_child(WidgetNode::new("Static", "IDC_A"));
        let mut sink = FailingSink { calls: 0, fail_at: 3 };

        let err = traverse(
            &root,
            &mut sink,
            &IdentityResolver,
            &RuleTranslator::frame_styles(),
            &mut CustomWidgetRegistry::new(),
        )
        .unwrap_err();

        assert!(err.sink_error().is_some());
        assert_eq!(err.to_string(), "disk full");
        // no retry, nothing after the failure
        assert_eq!(sink.calls, 3);
    }

    #[test]
    fn test_deep_tree() {
        const DEPTH: usize = 10_000;
        let mut root = WidgetNode::new("Frame", format!("f{}", DEPTH - 1));
        for i in (0..DEPTH - 1).rev() {
            root = WidgetNode::new("Frame", format!("f{}", i)).with_child(root);
        }

        let events = record(&root, &IdentityResolver, &mut CustomWidgetRegistry::new());
        assert_eq!(events.len(), DEPTH * 2);
        assert_eq!(events[0], start("Frame", "f0"));
        assert_eq!(events[DEPTH - 1], start("Frame", &format!("f{}", DEPTH - 1)));
        assert!(events[DEPTH..].iter().all(|e| *e == SinkEvent::EndWidget));
    }

    fn arb_tree() -> impl Strategy<Value = WidgetNode> {
        let leaf = ("[A-Z][a-z]{1,6}", "[A-Z_]{1,8}", prop::sample::select(vec!["Border", "ClientEdge", "Odd"]))
            .prop_map(|(class, id, frame)| WidgetNode::new(class, id).with_property("frame", frame));
        leaf.prop_recursive(4, 32, 4, |inner| {
            ("[A-Z][a-z]{1,6}", "[A-Z_]{1,8}", prop::collection::vec(inner, 0..4)).prop_map(|(class, id, children)| {
                let mut node = WidgetNode::new(class, id).with_property("text", "t");
                node.children = children;
                node
            })
        })
    }

    /// Replays the events and checks they mirror the tree exactly.
    fn check_mirror(node: &WidgetNode, events: &[SinkEvent], pos: &mut usize) {
        assert_eq!(events[*pos], start(&node.class_name, &node.id));
        *pos += 1;
        while matches!(events[*pos], SinkEvent::AddProperty { .. }) {
            *pos += 1;
        }
        for child in &node.children {
            check_mirror(child, events, pos);
        }
        assert_eq!(events[*pos], SinkEvent::EndWidget);
        *pos += 1;
    }

    proptest! {
        #[test]
        fn events_mirror_tree(root in arb_tree()) {
            let events = record(&root, &IdentityResolver, &mut CustomWidgetRegistry::new());

            let mut depth = 0i64;
            for event in &events {
                match event {
                    SinkEvent::StartWidget { .. } => depth += 1,
                    SinkEvent::EndWidget => depth -= 1,
                    _ => prop_assert!(depth > 0),
                }
                prop_assert!(depth >= 0);
            }
            prop_assert_eq!(depth, 0);

            let starts = events.iter().filter(|e| matches!(e, SinkEvent::StartWidget { .. })).count();
            prop_assert_eq!(starts, root.widget_count());

            let mut pos = 0;
            check_mirror(&root, &events, &mut pos);
            prop_assert_eq!(pos, events.len());
        }
    }
}
