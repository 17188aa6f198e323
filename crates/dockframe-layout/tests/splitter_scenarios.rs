//! End-to-end splitter scenarios: construction, style synthesis, render via
//! the reference host, reflow, and resize of the container.

use dockframe_core::geometry::Rect;
use dockframe_layout::{
    DiagnosticCode, FlexDirective, LayoutConfig, NodeBlueprint, NodeId, PanelBlueprint,
    PanelTree, SizeValue,
};

fn approx(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

fn labelled(tree: &PanelTree, label: &str) -> NodeId {
    tree.find_by_label(label)
        .unwrap_or_else(|| panic!("no node labelled {label}"))
}

// ============================================================================
// Scenario A: fixed + auto siblings
// ============================================================================

#[test]
fn fixed_and_auto_siblings() {
    let blueprint = PanelBlueprint::row()
        .child(
            PanelBlueprint::column()
                .label("fixed")
                .attr("width", "100")
                .attr("min-width", "0"),
        )
        .child(PanelBlueprint::column().label("auto").attr("min-width", "0"));
    let tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    let root = tree.panel(tree.root()).unwrap();

    // Only the children's computed minimums and the separator count.
    assert_eq!(root.computed().min.width, 3);
    assert_eq!(root.computed().preferred.width, SizeValue::Auto);

    let fixed = tree.panel(labelled(&tree, "fixed")).unwrap();
    assert_eq!(fixed.directive(), Some(FlexDirective::Fixed { basis: 100 }));
    let auto = tree.panel(labelled(&tree, "auto")).unwrap();
    assert_eq!(auto.directive(), Some(FlexDirective::Fill));
}

#[test]
fn auto_child_resolves_from_its_own_subtree() {
    let blueprint = PanelBlueprint::row()
        .child(PanelBlueprint::column().attr("width", "100"))
        .child(
            PanelBlueprint::column()
                .label("auto")
                .child(PanelBlueprint::column().attr("width", "40"))
                .child(PanelBlueprint::column().attr("width", "60")),
        );
    let tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());

    // A column takes its widest child.
    let auto = tree.panel(labelled(&tree, "auto")).unwrap();
    assert_eq!(auto.computed().preferred.width, SizeValue::px(60));
    assert_eq!(auto.directive(), Some(FlexDirective::Fixed { basis: 60 }));

    let root = tree.panel(tree.root()).unwrap();
    assert_eq!(root.computed().min.width, 3);
    assert_eq!(root.computed().preferred.width, SizeValue::px(163));
}

#[test]
fn auto_child_makes_container_preferred_auto_even_when_last() {
    let blueprint = PanelBlueprint::row()
        .child(PanelBlueprint::column().attr("width", "100"))
        .child(PanelBlueprint::column().attr("width", "50"))
        .child(PanelBlueprint::column());
    let tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    assert_eq!(
        tree.panel(tree.root()).unwrap().computed().preferred.width,
        SizeValue::Auto
    );
}

// ============================================================================
// Scenario B: declared max below declared min
// ============================================================================

#[test]
fn declared_max_below_min_is_corrected() {
    let blueprint = PanelBlueprint::column()
        .attr("min-width", "50")
        .attr("max-width", "30");
    let tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    let root = tree.panel(tree.root()).unwrap();

    assert_eq!(root.computed().max.width, SizeValue::px(50));
    assert_eq!(root.bounds().max.width, Some(50));
    let findings: Vec<_> = tree
        .diagnostics()
        .with_code(DiagnosticCode::MaxBelowMin)
        .collect();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].node, Some(tree.root()));
}

#[test]
fn corrected_child_max_feeds_the_parent() {
    let blueprint = PanelBlueprint::row()
        .child(
            PanelBlueprint::column()
                .attr("min-width", "50")
                .attr("max-width", "30"),
        )
        .child(PanelBlueprint::column().attr("max-width", "70"));
    let tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    let root = tree.panel(tree.root()).unwrap();
    assert_eq!(root.computed().max.width, SizeValue::px(50 + 70));
    assert_eq!(root.computed().min.width, 50 + 3);
    assert!(root.computed().is_well_formed());
}

// ============================================================================
// Scenario C: single sizable child
// ============================================================================

#[test]
fn single_child_always_fills() {
    let blueprint = PanelBlueprint::row().child(
        PanelBlueprint::column()
            .label("only")
            .attr("width", "320"),
    );
    let tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    let only = tree.panel(labelled(&tree, "only")).unwrap();
    assert_eq!(only.directive(), Some(FlexDirective::Fill));
    assert_eq!(tree.separators(tree.root()).count(), 0);
}

#[test]
fn removing_a_sibling_turns_survivor_into_fill() {
    let blueprint = PanelBlueprint::row()
        .child(PanelBlueprint::column().label("a").attr("width", "100"))
        .child(PanelBlueprint::column().label("b").attr("width", "200"));
    let mut tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    let b = labelled(&tree, "b");
    tree.remove_subtree(b).unwrap();
    let a = tree.panel(labelled(&tree, "a")).unwrap();
    assert_eq!(a.directive(), Some(FlexDirective::Fill));
}

// ============================================================================
// Scenario D: reflow then container resize
// ============================================================================

#[test]
fn reflow_preserves_proportions_on_container_resize() {
    let blueprint = PanelBlueprint::row()
        .child(PanelBlueprint::column().label("a").attr("width", "100"))
        .child(PanelBlueprint::column().label("b").attr("width", "200"))
        .child(PanelBlueprint::column().label("c").attr("width", "300"));
    let mut tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    let ids = ["a", "b", "c"].map(|label| labelled(&tree, label));

    // Initial render: fixed bases, 600px of panels plus two 3px separators.
    let first = tree.solve_layout(Rect::from_size(606.0, 400.0));
    for (id, width) in ids.iter().zip([100.0, 200.0, 300.0]) {
        approx(first.rect(*id).unwrap().width, width, 1e-9);
    }

    tree.reflow(&first).unwrap();
    let weights: Vec<f64> = ids
        .iter()
        .map(|id| {
            tree.panel(*id)
                .unwrap()
                .directive()
                .and_then(FlexDirective::weight)
                .unwrap()
        })
        .collect();
    approx(weights[0], 0.1667, 1e-4);
    approx(weights[1], 0.3333, 1e-4);
    approx(weights[2], 0.5, 1e-12);

    // Container doubles: the panels share 1200px proportionally.
    let second = tree.solve_layout(Rect::from_size(1206.0, 400.0));
    for (id, width) in ids.iter().zip([200.0, 400.0, 600.0]) {
        approx(second.rect(*id).unwrap().width, width, 1e-6);
    }
}

#[test]
fn nested_reflow_weights_every_level() {
    let blueprint = PanelBlueprint::row()
        .child(
            PanelBlueprint::column()
                .label("left")
                .child(PanelBlueprint::column().label("top"))
                .child(PanelBlueprint::column().label("bottom")),
        )
        .child(PanelBlueprint::column().label("right"));
    let mut tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    let layout = tree.solve_layout(Rect::from_size(803.0, 603.0));
    let summary = tree.reflow(&layout).unwrap();

    let left = labelled(&tree, "left");
    assert_eq!(summary.containers, vec![left, tree.root()]);
    for label in ["left", "right", "top", "bottom"] {
        let directive = tree.panel(labelled(&tree, label)).unwrap().directive();
        approx(directive.and_then(FlexDirective::weight).unwrap(), 0.5, 1e-9);
    }
}

#[test]
fn structural_change_requires_a_new_reflow() {
    let blueprint = PanelBlueprint::row()
        .child(PanelBlueprint::column())
        .child(PanelBlueprint::column());
    let mut tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
    let layout = tree.solve_layout(Rect::from_size(403.0, 100.0));
    tree.reflow(&layout).unwrap();
    assert!(!tree.reflow_pending());

    let root = tree.root();
    tree.append_child(root, &NodeBlueprint::from(PanelBlueprint::column()))
        .unwrap();
    assert!(tree.reflow_pending());
    // The new child was never rendered.
    assert!(tree.reflow(&layout).is_err());

    let layout = tree.solve_layout(Rect::from_size(606.0, 100.0));
    tree.reflow(&layout).unwrap();
    assert!(!tree.reflow_pending());
}

#[test]
fn custom_spacing_is_threaded_through() {
    let blueprint = PanelBlueprint::column()
        .child(PanelBlueprint::column().attr("min-height", "10"))
        .child(PanelBlueprint::column().attr("min-height", "10"))
        .child(PanelBlueprint::column().attr("min-height", "10"));
    let config = LayoutConfig::default().with_separator_spacing(8);
    let tree = PanelTree::from_blueprint(&blueprint, config);
    assert_eq!(tree.panel(tree.root()).unwrap().computed().min.height, 30 + 16);

    let layout = tree.solve_layout(Rect::from_size(100.0, 316.0));
    let separator = tree.separators(tree.root()).next().unwrap();
    approx(layout.rect(separator).unwrap().height, 8.0, 1e-9);
}
