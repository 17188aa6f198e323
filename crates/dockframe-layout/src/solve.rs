//! Reference host: realise directives and bounds as rectangles.
//!
//! Hosts normally apply [`FlexDirective`]s and [`StyleBounds`] through their
//! own layout mechanism and feed measurements back into reflow. This module
//! does the same headlessly, which makes end-to-end runs and tests possible
//! without a rendering surface.
//!
//! [`StyleBounds`]: crate::style::StyleBounds

use std::collections::BTreeMap;

use dockframe_core::geometry::{Rect, Size};

use crate::flex::{FlexItem, resolve_flexible_lengths};
use crate::reflow::MeasureHost;
use crate::size::Axis;
use crate::style::FlexDirective;
use crate::tree::{NodeId, PanelNode, PanelTree, TreeNode};

/// Solved rectangles for every node of a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelLayout {
    area: Rect,
    rects: BTreeMap<NodeId, Rect>,
}

impl PanelLayout {
    /// Area the root was laid out in.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    #[must_use]
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    /// Rectangles in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.rects.iter().map(|(id, rect)| (*id, *rect))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl MeasureHost for PanelLayout {
    fn measured_size(&self, node: NodeId) -> Option<Size> {
        self.rect(node).map(|rect| rect.size())
    }
}

fn start(rect: Rect, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => rect.x,
        Axis::Vertical => rect.y,
    }
}

fn place(parent: Rect, axis: Axis, offset: f64, main: f64, cross: f64) -> Rect {
    match axis {
        Axis::Horizontal => Rect::new(offset, parent.y, main, cross),
        Axis::Vertical => Rect::new(parent.x, offset, cross, main),
    }
}

/// Flex item for a panel child under directive `directive`.
///
/// An `auto` basis is the content size: the preferred size when one
/// resolved, otherwise nothing. Computed bounds only clamp.
fn panel_item(panel: &PanelNode, axis: Axis, directive: FlexDirective) -> FlexItem {
    let computed = panel.computed();
    let basis = directive
        .basis()
        .unwrap_or_else(|| computed.preferred[axis].as_px().map_or(0.0, f64::from));
    FlexItem::new(basis, directive.grow(), directive.shrink())
        .with_bounds(f64::from(computed.min[axis]), computed.max[axis].or_unbounded())
}

impl PanelTree {
    /// Lay the whole tree out inside `area`.
    ///
    /// Separators are rigid items of the configured spacing, panels follow
    /// their directive (fill when they have none) within their computed
    /// bounds, opaque nodes fill, and the cross axis stretches to the
    /// parent's extent clamped to each panel's bounds.
    #[must_use]
    pub fn solve_layout(&self, area: Rect) -> PanelLayout {
        let mut layout = PanelLayout {
            area,
            rects: BTreeMap::new(),
        };
        layout.rects.insert(self.root, area);

        let mut stack = vec![(self.root, area)];
        while let Some((id, rect)) = stack.pop() {
            let Some(TreeNode::Panel(panel)) = self.node(id) else {
                continue;
            };
            if panel.children.is_empty() {
                continue;
            }
            let main = panel.main_axis();
            let cross = main.cross();
            let spacing = f64::from(self.config.separator_spacing);

            let items: Vec<FlexItem> = panel
                .children
                .iter()
                .map(|child| match self.node(*child) {
                    Some(TreeNode::Separator(_)) => FlexItem::rigid(spacing),
                    Some(TreeNode::Panel(child_panel)) => panel_item(
                        child_panel,
                        main,
                        child_panel.directive.unwrap_or(FlexDirective::Fill),
                    ),
                    _ => FlexItem::new(0.0, 1.0, 1.0),
                })
                .collect();
            let sizes = resolve_flexible_lengths(main.extent(rect.size()), &items);

            let mut offset = start(rect, main);
            for (child, size) in panel.children.iter().zip(sizes) {
                let cross_extent = match self.node(*child) {
                    Some(TreeNode::Panel(child_panel)) => child_panel
                        .computed()
                        .clamp_extent(cross, cross.extent(rect.size())),
                    _ => cross.extent(rect.size()),
                };
                let child_rect = place(rect, main, offset, size, cross_extent);
                layout.rects.insert(*child, child_rect);
                stack.push((*child, child_rect));
                offset += size;
            }
        }

        layout
    }
}
