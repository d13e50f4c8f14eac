//! Walker benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rc2ui_core::{Geometry, WidgetNode};
use rc2ui_walker::{ConversionSession, RecordingSink};

fn wide_dialog(controls: usize) -> WidgetNode {
    let mut dialog = WidgetNode::new("Dialog", "IDD_SETTINGS").with_property("frame", "ModalFrame");
    for i in 0..controls {
        dialog = dialog.with_child(
            WidgetNode::new("Static", format!("IDC_LABEL{}", i))
                .with_geometry(Geometry::new(7, 7 + i as i32 * 14, 120, 12))
                .with_property("text", "Label:")
                .with_property("frame", "ClientEdge"),
        );
    }
    dialog
}

fn deep_dialog(depth: usize) -> WidgetNode {
    let mut node = WidgetNode::new("Static", "IDC_LEAF");
    for i in 0..depth {
        node = WidgetNode::new("GroupBox", format!("IDC_GROUP{}", i)).with_child(node);
    }
    node
}

fn walk_wide(c: &mut Criterion) {
    let dialog = wide_dialog(200);
    c.bench_function("walk_wide", |b| {
        b.iter(|| {
            let mut session: ConversionSession = ConversionSession::default();
            let mut sink = RecordingSink::new();
            session.convert(black_box(&dialog), &mut sink).unwrap();
            sink
        })
    });
}

fn walk_deep(c: &mut Criterion) {
    let dialog = deep_dialog(1_000);
    c.bench_function("walk_deep", |b| {
        b.iter(|| {
            let mut session: ConversionSession = ConversionSession::default();
            let mut sink = RecordingSink::new();
            session.convert(black_box(&dialog), &mut sink).unwrap();
            sink
        })
    });
}

criterion_group!(benches, walk_wide, walk_deep);
criterion_main!(benches);
