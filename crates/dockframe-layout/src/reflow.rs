//! Reflow: measured extents to proportional weights.
//!
//! Once the host has rendered the tree, every sizable child of a sizing
//! panel gets `FlexDirective::Weighted { weight }` with
//! `weight = extent / Σ sizable extents`. Separators take space on screen
//! but never receive a weight and are not part of the denominator, so the
//! weights of one container always sum to 1.
//!
//! A full reflow validates every measurement before writing anything: a
//! tree is either completely reflowed or left as it was.

use std::collections::BTreeMap;

use dockframe_core::geometry::Size;
use rustc_hash::FxHashMap;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::error::LayoutError;
use crate::size::Axis;
use crate::style::FlexDirective;
use crate::tree::{NodeId, PanelTree};

// ============================================================================
// MeasureHost
// ============================================================================

/// Source of rendered sizes.
pub trait MeasureHost {
    /// Rendered size of `node`, or `None` if it has not been laid out.
    fn measured_size(&self, node: NodeId) -> Option<Size>;
}

impl<H: MeasureHost + ?Sized> MeasureHost for &H {
    fn measured_size(&self, node: NodeId) -> Option<Size> {
        (**self).measured_size(node)
    }
}

impl MeasureHost for BTreeMap<NodeId, Size> {
    fn measured_size(&self, node: NodeId) -> Option<Size> {
        self.get(&node).copied()
    }
}

impl MeasureHost for FxHashMap<NodeId, Size> {
    fn measured_size(&self, node: NodeId) -> Option<Size> {
        self.get(&node).copied()
    }
}

/// Adapter turning a closure into a [`MeasureHost`].
#[derive(Debug, Clone, Copy)]
pub struct MeasureFn<F>(pub F);

impl<F> MeasureHost for MeasureFn<F>
where
    F: Fn(NodeId) -> Option<Size>,
{
    fn measured_size(&self, node: NodeId) -> Option<Size> {
        (self.0)(node)
    }
}

/// Main-axis extent of `node`, validated.
pub(crate) fn measure_extent(
    host: &(impl MeasureHost + ?Sized),
    node: NodeId,
    axis: Axis,
) -> Result<f64, LayoutError> {
    let size = host
        .measured_size(node)
        .ok_or(LayoutError::NotRendered { node })?;
    validate_extent(node, axis.extent(size))
}

pub(crate) fn validate_extent(node: NodeId, extent: f64) -> Result<f64, LayoutError> {
    if extent.is_finite() && extent >= 0.0 {
        Ok(extent)
    } else {
        Err(LayoutError::InvalidMeasurement {
            node,
            value: extent,
        })
    }
}

/// Share of the total for each extent.
///
/// Returns equal shares when the total is zero, and an empty vector for no
/// extents.
#[must_use]
pub fn proportional_weights(extents: &[f64]) -> Vec<f64> {
    let total: f64 = extents.iter().sum();
    if total > 0.0 {
        extents.iter().map(|extent| extent / total).collect()
    } else {
        let share = 1.0 / extents.len().max(1) as f64;
        vec![share; extents.len()]
    }
}

/// Weights for one container, computed before anything is written.
#[derive(Debug)]
struct ContainerPlan {
    container: NodeId,
    weights: Vec<(NodeId, f64)>,
    degenerate: bool,
}

/// What a full reflow did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReflowSummary {
    /// Sizing containers whose children were reweighted, children first.
    pub containers: Vec<NodeId>,
    /// Containers whose children all measured zero.
    pub degenerate: Vec<NodeId>,
}

impl PanelTree {
    /// Full reflow of the whole tree.
    pub fn reflow(&mut self, host: &(impl MeasureHost + ?Sized)) -> Result<ReflowSummary, LayoutError> {
        let root = self.root;
        self.reflow_subtree(root, host)
    }

    /// Full reflow of the subtree rooted at `id`.
    ///
    /// Fails with [`LayoutError::NotRendered`] if any sizable child in the
    /// subtree has no measurement; nothing is changed in that case.
    pub fn reflow_subtree(
        &mut self,
        id: NodeId,
        host: &(impl MeasureHost + ?Sized),
    ) -> Result<ReflowSummary, LayoutError> {
        let _span = dockframe_core::debug_span!("layout.reflow", root = %id).entered();
        self.panel(id)?;

        let mut plans = Vec::new();
        for container in self.panels_post_order(id) {
            let panel = self.panel(container)?;
            if !panel.needs_sizing {
                continue;
            }
            let axis = panel.main_axis();
            let children: Vec<NodeId> = self.sizable_children(container).collect();
            let extents = children
                .iter()
                .map(|child| measure_extent(host, *child, axis))
                .collect::<Result<Vec<f64>, LayoutError>>()?;
            let degenerate = extents.iter().sum::<f64>() <= 0.0;
            let weights = children
                .into_iter()
                .zip(proportional_weights(&extents))
                .collect();
            plans.push(ContainerPlan {
                container,
                weights,
                degenerate,
            });
        }

        let mut summary = ReflowSummary::default();
        for plan in plans {
            if plan.degenerate {
                self.diagnostics.push(Diagnostic::warning(
                    DiagnosticCode::DegenerateExtent,
                    Some(plan.container),
                    "every sizable child measured 0px; splitting evenly",
                ));
                summary.degenerate.push(plan.container);
            }
            for (child, weight) in plan.weights {
                self.panel_mut(child)?.directive = Some(FlexDirective::Weighted { weight });
                dockframe_core::trace!(node = %child, weight, "weight");
            }
            summary.containers.push(plan.container);
        }

        if id == self.root {
            self.reflow_pending = false;
        }
        Ok(summary)
    }

    /// Reweight two adjacent sizable siblings from fresh measurements.
    ///
    /// The pair's combined weight is kept and split by the new extents, so
    /// the other siblings' shares are untouched. Requires a prior full reflow.
    pub fn reflow_pair(
        &mut self,
        first: NodeId,
        second: NodeId,
        host: &(impl MeasureHost + ?Sized),
    ) -> Result<(f64, f64), LayoutError> {
        let parent = self.adjacent_parent(first, second)?;
        let axis = self.panel(parent)?.main_axis();
        let first_extent = measure_extent(host, first, axis)?;
        let second_extent = measure_extent(host, second, axis)?;
        self.reweight_pair(parent, first, second, first_extent, second_extent)
    }

    /// Parent of two neighbouring sizable siblings (in either order).
    pub(crate) fn adjacent_parent(&self, first: NodeId, second: NodeId) -> Result<NodeId, LayoutError> {
        self.panel(first)?;
        self.panel(second)?;
        let not_adjacent = LayoutError::NotAdjacent { first, second };
        let parent = self.parent(first).ok_or_else(|| not_adjacent.clone())?;
        if self.parent(second) != Some(parent) || !self.panel(parent)?.needs_sizing {
            return Err(not_adjacent);
        }
        let sizable: Vec<NodeId> = self.sizable_children(parent).collect();
        let adjacent = sizable
            .windows(2)
            .any(|pair| (pair[0], pair[1]) == (first, second) || (pair[0], pair[1]) == (second, first));
        if adjacent { Ok(parent) } else { Err(not_adjacent) }
    }

    /// Split the pair's combined weight by the two extents.
    pub(crate) fn reweight_pair(
        &mut self,
        parent: NodeId,
        first: NodeId,
        second: NodeId,
        first_extent: f64,
        second_extent: f64,
    ) -> Result<(f64, f64), LayoutError> {
        let first_extent = validate_extent(first, first_extent)?;
        let second_extent = validate_extent(second, second_extent)?;
        let first_weight = self
            .panel(first)?
            .directive
            .and_then(FlexDirective::weight)
            .ok_or(LayoutError::NotRendered { node: first })?;
        let second_weight = self
            .panel(second)?
            .directive
            .and_then(FlexDirective::weight)
            .ok_or(LayoutError::NotRendered { node: second })?;

        let combined = first_weight + second_weight;
        let split = proportional_weights(&[first_extent, second_extent]);
        if first_extent + second_extent <= 0.0 {
            self.diagnostics.push(Diagnostic::warning(
                DiagnosticCode::DegenerateExtent,
                Some(parent),
                format!("{first} and {second} both measured 0px; splitting their share evenly"),
            ));
        }
        let weights = (combined * split[0], combined * split[1]);
        self.panel_mut(first)?.directive = Some(FlexDirective::Weighted { weight: weights.0 });
        self.panel_mut(second)?.directive = Some(FlexDirective::Weighted { weight: weights.1 });
        dockframe_core::trace!(
            first = %first,
            second = %second,
            first_weight = weights.0,
            second_weight = weights.1,
            "pair reweighted"
        );
        Ok(weights)
    }
}
