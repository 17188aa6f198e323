#![no_main]

use arbitrary::Arbitrary;
use dockframe_core::geometry::Rect;
use dockframe_layout::{
    LayoutConfig, NodeBlueprint, NodeId, PanelBlueprint, PanelTree, SizeAttr,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Panel {
    row: bool,
    sizes: [Option<u16>; 6],
    children: Vec<Child>,
}

#[derive(Debug, Arbitrary)]
enum Child {
    Panel(Panel),
    Opaque,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Append { parent: u8, row: bool, width: Option<u16> },
    Remove { node: u8 },
    Render { width: u16, height: u16 },
    Drag { separator: u8, delta: i16 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    spacing: u8,
    root: Panel,
    ops: Vec<Op>,
}

const MAX_DEPTH: usize = 4;

fn blueprint(panel: &Panel, depth: usize) -> PanelBlueprint {
    let mut bp = if panel.row {
        PanelBlueprint::row()
    } else {
        PanelBlueprint::column()
    };
    for (attr, size) in SizeAttr::ALL.iter().zip(panel.sizes) {
        if let Some(size) = size {
            bp = bp.size(*attr, size.to_string());
        }
    }
    if depth < MAX_DEPTH {
        for child in panel.children.iter().take(6) {
            bp = bp.child(match child {
                Child::Panel(inner) => NodeBlueprint::from(blueprint(inner, depth + 1)),
                Child::Opaque => NodeBlueprint::Opaque { label: None },
            });
        }
    }
    bp
}

fn pick(ids: &[NodeId], index: u8) -> Option<NodeId> {
    (!ids.is_empty()).then(|| ids[usize::from(index) % ids.len()])
}

fn check(tree: &PanelTree) {
    for (id, record) in tree.iter() {
        let Some(panel) = record.node().as_panel() else {
            continue;
        };
        assert!(panel.computed().is_well_formed(), "{id} inverted bounds");
        let sizable = tree.sizable_children(id).count();
        let separators = tree.separators(id).count();
        if panel.needs_sizing() {
            assert_eq!(separators, sizable.saturating_sub(1), "{id} separator count");
            let weights: Vec<f64> = tree
                .sizable_children(id)
                .filter_map(|child| tree.panel(child).ok()?.directive()?.weight())
                .collect();
            if weights.len() == sizable && sizable > 0 && !tree.reflow_pending() {
                let total: f64 = weights.iter().sum();
                assert!((total - 1.0).abs() < 1e-6, "{id} weights sum to {total}");
            }
        } else {
            assert_eq!(separators, 0, "{id} separators on non-sizing panel");
        }
    }
}

fuzz_target!(|input: Input| {
    let config = LayoutConfig::default().with_separator_spacing(u32::from(input.spacing % 16));
    let mut tree = PanelTree::from_blueprint(&blueprint(&input.root, 0), config);
    check(&tree);

    let mut layout = None;
    for op in input.ops.iter().take(64) {
        let ids: Vec<NodeId> = tree.iter().map(|(id, _)| id).collect();
        match *op {
            Op::Append { parent, row, width } => {
                let Some(parent) = pick(&ids, parent) else { continue };
                let mut child = if row { PanelBlueprint::row() } else { PanelBlueprint::column() };
                if let Some(width) = width {
                    child = child.attr("width", width.to_string());
                }
                if tree.append_child(parent, &NodeBlueprint::from(child)).is_ok() {
                    layout = None;
                }
            }
            Op::Remove { node } => {
                let Some(node) = pick(&ids, node) else { continue };
                if tree.remove_subtree(node).is_ok() {
                    layout = None;
                }
            }
            Op::Render { width, height } => {
                let solved = tree.solve_layout(Rect::from_size(f64::from(width), f64::from(height)));
                tree.reflow(&solved).expect("every node of a solved layout is measured");
                layout = Some(solved);
            }
            Op::Drag { separator, delta } => {
                let Some(layout) = layout.as_ref() else { continue };
                let separators: Vec<NodeId> = ids
                    .iter()
                    .copied()
                    .filter(|id| tree.node(*id).is_some_and(|node| node.is_separator()))
                    .collect();
                let Some(separator) = pick(&separators, separator) else { continue };
                let Ok(mut drag) = tree.begin_drag(separator, layout) else { continue };
                let outcome = drag
                    .update(&mut tree, f64::from(delta))
                    .expect("drag on a rendered pair");
                assert!(outcome.first_extent >= -1e-9 && outcome.second_extent >= -1e-9);
                let _ = drag.commit();
            }
        }
        check(&tree);
        let root = tree.panel(tree.root()).expect("root is a panel");
        assert!(root.directive().is_none(), "root never carries a directive");
    }
});
