//! Constraint propagation: the min/max pass and the preferred-size pass.
//!
//! Both passes run depth-first, children before parents, and only touch
//! panels that need sizing. Panels that do not are reset to their declared
//! values, which is what their external layout sees.
//!
//! Aggregation rules (row shown; column is the transpose):
//!
//! ```text
//! min.width   = Σ child.min.width  + spacing × (n − 1)     then ≥ declared min
//! min.height  = max child.min.height                       then ≥ declared min
//! max.width   = Σ child.max.width                          (auto absorbs)
//! max.height  = max child.max.height                       (auto absorbs)
//! pref.width  = declared, or Σ child.pref.width + spacing  (auto absorbs)
//! pref.height = declared, or max child.pref.height         (auto absorbs)
//! ```
//!
//! A child's declared width/height never enters the min/max pass; only its
//! computed bounds do.

use crate::config::LayoutConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::size::{Axis, AxisPair, ComputedSize, DeclaredSize, Orientation, Px, SizeValue};
use crate::tree::{NodeId, PanelTree, TreeNode};

/// What the min/max pass reads from one sizable child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildBounds {
    pub min: AxisPair<Px>,
    pub max: AxisPair<SizeValue>,
}

impl ChildBounds {
    #[must_use]
    pub fn new(min: AxisPair<Px>, max: AxisPair<SizeValue>) -> Self {
        Self { min, max }
    }
}

/// Result of the min/max aggregation for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinMax {
    pub min: AxisPair<Px>,
    pub max: AxisPair<SizeValue>,
}

/// Aggregate the children's computed min/max into the parent's.
///
/// `children` are the sizable children in order. Separator spacing counts
/// towards the main-axis min only. Any axis where the aggregated max ends up
/// below the min is raised to the min and reported as
/// [`DiagnosticCode::ComputedMaxBelowMin`].
#[must_use]
pub fn aggregate_min_max(
    orientation: Orientation,
    declared: &DeclaredSize,
    children: &[ChildBounds],
    config: &LayoutConfig,
    node: Option<NodeId>,
    diagnostics: &mut Diagnostics,
) -> MinMax {
    let main = orientation.main_axis();
    let cross = orientation.cross_axis();
    let spacing = config.separators_extent(children.len());

    let mut min = AxisPair::splat(0);
    let mut max = AxisPair::splat(SizeValue::Auto);

    min[main] = children
        .iter()
        .fold(spacing, |acc, child| acc.saturating_add(child.min[main]));
    min[cross] = children
        .iter()
        .map(|child| child.min[cross])
        .max()
        .unwrap_or(0);

    max[main] = children
        .iter()
        .fold(SizeValue::Px(0), |acc, child| acc.absorbing_add(child.max[main]));
    max[cross] = children
        .iter()
        .map(|child| child.max[cross])
        .reduce(SizeValue::absorbing_max)
        .unwrap_or(SizeValue::Auto);

    for axis in [Axis::Horizontal, Axis::Vertical] {
        min[axis] = min[axis].max(declared.min[axis]);
        if let Some(limit) = max[axis].as_px()
            && limit < min[axis]
        {
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::ComputedMaxBelowMin,
                node,
                format!(
                    "children allow at most {limit}px of {} but the minimum is {}px; raising max",
                    axis.dimension(),
                    min[axis]
                ),
            ));
            max[axis] = SizeValue::Px(min[axis]);
        }
    }

    MinMax { min, max }
}

/// Resolve the parent's preferred size from its children's.
///
/// Declared (non-auto) values are used as-is.
#[must_use]
pub fn aggregate_preferred(
    orientation: Orientation,
    declared: &DeclaredSize,
    children: &[AxisPair<SizeValue>],
    config: &LayoutConfig,
) -> AxisPair<SizeValue> {
    let main = orientation.main_axis();
    let cross = orientation.cross_axis();
    let mut preferred = declared.size;

    if preferred[main].is_auto() {
        let spacing = config.separators_extent(children.len());
        preferred[main] = children
            .iter()
            .fold(SizeValue::Px(spacing), |acc, child| acc.absorbing_add(child[main]));
    }
    if preferred[cross].is_auto() {
        preferred[cross] = children
            .iter()
            .map(|child| child[cross])
            .reduce(SizeValue::absorbing_max)
            .unwrap_or(SizeValue::Auto);
    }
    preferred
}

// ============================================================================
// Tree passes
// ============================================================================

impl PanelTree {
    /// Computed sizes of the sizable children of `id`, in order.
    fn child_computed(&self, id: NodeId) -> Vec<ComputedSize> {
        self.sizable_children(id)
            .filter_map(|child| self.panel(child).ok())
            .map(|panel| panel.computed)
            .collect()
    }

    fn child_bounds(&self, id: NodeId) -> Vec<ChildBounds> {
        self.sizable_children(id)
            .filter_map(|child| self.panel(child).ok())
            .map(|panel| ChildBounds::new(panel.computed.min, panel.computed.max))
            .collect()
    }

    /// Children of `id` in post-order (children before parents), panels only.
    pub(crate) fn panels_post_order(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![(id, false)];
        while let Some((current, expanded)) = stack.pop() {
            let Some(TreeNode::Panel(panel)) = self.node(current) else {
                continue;
            };
            if expanded {
                order.push(current);
            } else {
                stack.push((current, true));
                stack.extend(panel.children.iter().rev().map(|child| (*child, false)));
            }
        }
        order
    }

    /// Min/max pass over the subtree rooted at `id`.
    pub fn propagate_min_max(&mut self, id: NodeId) {
        let _span = dockframe_core::debug_span!("layout.min_max", root = %id).entered();
        self.min_max_subtree(id);
    }

    /// Preferred-size pass over the subtree rooted at `id`.
    ///
    /// Reads computed values only for aggregation, so it may run after the
    /// min/max pass without invalidating it.
    pub fn propagate_preferred(&mut self, id: NodeId) {
        let _span = dockframe_core::debug_span!("layout.preferred", root = %id).entered();
        self.preferred_subtree(id);
    }

    pub(crate) fn min_max_subtree(&mut self, id: NodeId) {
        for node in self.panels_post_order(id) {
            self.min_max_node(node);
        }
    }

    pub(crate) fn preferred_subtree(&mut self, id: NodeId) {
        for node in self.panels_post_order(id) {
            self.preferred_node(node);
        }
    }

    /// Recompute min/max of one panel from its (already computed) children.
    pub(crate) fn min_max_node(&mut self, id: NodeId) {
        let Ok(panel) = self.panel(id) else {
            return;
        };
        let (orientation, declared, needs_sizing) =
            (panel.orientation, panel.declared, panel.needs_sizing);

        let result = if needs_sizing {
            let children = self.child_bounds(id);
            aggregate_min_max(
                orientation,
                &declared,
                &children,
                &self.config,
                Some(id),
                &mut self.diagnostics,
            )
        } else {
            MinMax {
                min: declared.min,
                max: declared.max,
            }
        };

        if let Ok(panel) = self.panel_mut(id) {
            panel.computed.min = result.min;
            panel.computed.max = result.max;
        }
        dockframe_core::trace!(
            node = %id,
            min_width = result.min.width,
            min_height = result.min.height,
            max_width = %result.max.width,
            max_height = %result.max.height,
            "min/max"
        );
    }

    /// Recompute the preferred size of one panel from its children.
    pub(crate) fn preferred_node(&mut self, id: NodeId) {
        let Ok(panel) = self.panel(id) else {
            return;
        };
        let (orientation, declared, needs_sizing) =
            (panel.orientation, panel.declared, panel.needs_sizing);

        let preferred = if needs_sizing {
            let children: Vec<AxisPair<SizeValue>> = self
                .child_computed(id)
                .into_iter()
                .map(|computed| computed.preferred)
                .collect();
            aggregate_preferred(orientation, &declared, &children, &self.config)
        } else {
            declared.size
        };

        if let Ok(panel) = self.panel_mut(id) {
            panel.computed.preferred = preferred;
        }
        dockframe_core::trace!(
            node = %id,
            width = %preferred.width,
            height = %preferred.height,
            "preferred"
        );
    }
}
