//! Drag-resize contract between the engine and a resizer widget.
//!
//! A drag moves one separator by `delta` pixels along its parent's main axis.
//! Positive deltas grow the sibling before the separator and shrink the one
//! after it. The delta is clamped so both siblings stay inside their computed
//! min/max, the pair's combined extent is conserved, and only the two
//! siblings are reweighted.

use crate::error::LayoutError;
use crate::reflow::{MeasureHost, measure_extent, validate_extent};
use crate::style::FlexDirective;
use crate::tree::{NodeId, PanelTree};

/// One side of a resize pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSide {
    pub extent: f64,
    pub min: f64,
    /// May be `f64::INFINITY`.
    pub max: f64,
}

/// Clamp `delta` into the range that keeps both sides within their bounds.
///
/// Returns 0 when no delta satisfies both sides, or when `delta` is not finite.
#[must_use]
pub fn clamp_pair_delta(delta: f64, first: PairSide, second: PairSide) -> f64 {
    let lo = (first.min - first.extent).max(second.extent - second.max);
    let hi = (first.max - first.extent).min(second.extent - second.min);
    if lo > hi || !delta.is_finite() {
        return 0.0;
    }
    delta.max(lo).min(hi)
}

/// Result of one resize step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub separator: NodeId,
    pub first: NodeId,
    pub second: NodeId,
    pub requested: f64,
    pub applied: f64,
    pub first_extent: f64,
    pub second_extent: f64,
    /// New weights of the pair.
    pub weights: (f64, f64),
}

impl ResizeOutcome {
    /// True when the requested delta had to be reduced.
    #[must_use]
    pub fn was_clamped(&self) -> bool {
        (self.requested - self.applied).abs() > f64::EPSILON
    }
}

impl PanelTree {
    /// The two sizable siblings a separator sits between.
    pub fn separator_neighbours(&self, separator: NodeId) -> Result<(NodeId, NodeId), LayoutError> {
        let node = self.separator(separator)?;
        Ok((node.before(), node.after()))
    }

    fn pair_side(&self, node: NodeId, extent: f64, parent: NodeId) -> Result<PairSide, LayoutError> {
        let axis = self.panel(parent)?.main_axis();
        let computed = self.panel(node)?.computed();
        Ok(PairSide {
            extent: validate_extent(node, extent)?,
            min: f64::from(computed.min[axis]),
            max: computed.max[axis].or_unbounded(),
        })
    }

    /// Move `separator` by `delta` given the pair's current extents.
    ///
    /// Requires a prior full reflow (the pair must carry weights).
    pub fn resize_pair(
        &mut self,
        separator: NodeId,
        delta: f64,
        extents: (f64, f64),
    ) -> Result<ResizeOutcome, LayoutError> {
        let (first, second) = self.separator_neighbours(separator)?;
        let parent = self.adjacent_parent(first, second)?;
        let first_side = self.pair_side(first, extents.0, parent)?;
        let second_side = self.pair_side(second, extents.1, parent)?;

        let applied = clamp_pair_delta(delta, first_side, second_side);
        let first_extent = first_side.extent + applied;
        let second_extent = second_side.extent - applied;
        let weights = self.reweight_pair(parent, first, second, first_extent, second_extent)?;

        dockframe_core::debug!(
            separator = %separator,
            requested = delta,
            applied,
            "resize pair"
        );
        Ok(ResizeOutcome {
            separator,
            first,
            second,
            requested: delta,
            applied,
            first_extent,
            second_extent,
            weights,
        })
    }

    /// Start a drag on `separator`, snapshotting the pair.
    pub fn begin_drag(
        &self,
        separator: NodeId,
        host: &(impl MeasureHost + ?Sized),
    ) -> Result<DragSession, LayoutError> {
        let (first, second) = self.separator_neighbours(separator)?;
        let parent = self.adjacent_parent(first, second)?;
        let axis = self.panel(parent)?.main_axis();
        let snapshot = (self.panel(first)?.directive, self.panel(second)?.directive);
        if snapshot.0.and_then(FlexDirective::weight).is_none() {
            return Err(LayoutError::NotRendered { node: first });
        }
        if snapshot.1.and_then(FlexDirective::weight).is_none() {
            return Err(LayoutError::NotRendered { node: second });
        }
        Ok(DragSession {
            separator,
            first,
            second,
            start: (
                measure_extent(host, first, axis)?,
                measure_extent(host, second, axis)?,
            ),
            snapshot,
            last: None,
        })
    }
}

/// An in-progress drag of one separator.
///
/// Deltas passed to [`update`](Self::update) are relative to where the drag
/// started. [`cancel`](Self::cancel) puts the pair's directives back exactly
/// as they were at [`PanelTree::begin_drag`].
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    separator: NodeId,
    first: NodeId,
    second: NodeId,
    start: (f64, f64),
    snapshot: (Option<FlexDirective>, Option<FlexDirective>),
    last: Option<ResizeOutcome>,
}

impl DragSession {
    #[must_use]
    pub fn separator(&self) -> NodeId {
        self.separator
    }

    #[must_use]
    pub fn pair(&self) -> (NodeId, NodeId) {
        (self.first, self.second)
    }

    #[must_use]
    pub fn start_extents(&self) -> (f64, f64) {
        self.start
    }

    #[must_use]
    pub fn last(&self) -> Option<&ResizeOutcome> {
        self.last.as_ref()
    }

    /// Apply the total pointer movement since the drag started.
    pub fn update(&mut self, tree: &mut PanelTree, delta: f64) -> Result<ResizeOutcome, LayoutError> {
        let outcome = tree.resize_pair(self.separator, delta, self.start)?;
        self.last = Some(outcome);
        Ok(outcome)
    }

    /// Abort the drag and restore the pre-drag directives.
    pub fn cancel(self, tree: &mut PanelTree) -> Result<(), LayoutError> {
        tree.panel_mut(self.first)?.directive = self.snapshot.0;
        tree.panel_mut(self.second)?.directive = self.snapshot.1;
        dockframe_core::debug!(separator = %self.separator, "drag cancelled");
        Ok(())
    }

    /// Finish the drag, keeping the last applied step.
    #[must_use]
    pub fn commit(self) -> Option<ResizeOutcome> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use dockframe_core::geometry::Size;

    use super::*;
    use crate::blueprint::PanelBlueprint;
    use crate::config::LayoutConfig;

    fn side(extent: f64, min: f64, max: f64) -> PairSide {
        PairSide { extent, min, max }
    }

    fn rendered() -> (PanelTree, Vec<NodeId>, BTreeMap<NodeId, Size>) {
        let blueprint = PanelBlueprint::row()
            .child(PanelBlueprint::column().label("a").attr("min-width", "50"))
            .child(PanelBlueprint::column().label("b").attr("max-width", "250"))
            .child(PanelBlueprint::column().label("c"));
        let mut tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
        let ids: Vec<NodeId> = tree.sizable_children(tree.root()).collect();
        let host: BTreeMap<NodeId, Size> = ids
            .iter()
            .zip([100.0, 200.0, 300.0])
            .map(|(id, width)| (*id, Size::new(width, 40.0)))
            .collect();
        tree.reflow(&host).unwrap();
        (tree, ids, host)
    }

    #[test]
    fn clamp_keeps_both_sides_in_bounds() {
        let a = side(100.0, 50.0, f64::INFINITY);
        let b = side(200.0, 0.0, 250.0);
        assert_eq!(clamp_pair_delta(30.0, a, b), 30.0);
        assert_eq!(clamp_pair_delta(-80.0, a, b), -50.0);
        assert_eq!(clamp_pair_delta(1000.0, a, b), 200.0);
        assert_eq!(clamp_pair_delta(f64::NAN, a, b), 0.0);
    }

    #[test]
    fn overconstrained_pair_does_not_move() {
        let a = side(100.0, 150.0, f64::INFINITY);
        let b = side(200.0, 250.0, f64::INFINITY);
        assert_eq!(clamp_pair_delta(10.0, a, b), 0.0);
    }

    #[test]
    fn resize_conserves_pair_total_and_weight() {
        let (mut tree, ids, _) = rendered();
        let separator = tree.separators(tree.root()).next().unwrap();
        let outcome = tree.resize_pair(separator, -80.0, (100.0, 200.0)).unwrap();
        assert_eq!(outcome.applied, -50.0);
        assert!(outcome.was_clamped());
        assert_eq!((outcome.first_extent, outcome.second_extent), (50.0, 250.0));
        assert!((outcome.weights.0 - 0.5 / 6.0).abs() < 1e-9);
        assert!((outcome.weights.1 - 2.5 / 6.0).abs() < 1e-9);
        let c = tree.panel(ids[2]).unwrap().directive().unwrap();
        assert_eq!(c, FlexDirective::Weighted { weight: 0.5 });
    }

    #[test]
    fn resize_rejects_non_separators() {
        let (mut tree, ids, _) = rendered();
        assert_eq!(
            tree.resize_pair(ids[0], 10.0, (100.0, 200.0)),
            Err(LayoutError::NotASeparator { node: ids[0] })
        );
    }

    #[test]
    fn drag_updates_are_relative_to_start() {
        let (mut tree, ids, host) = rendered();
        let separator = tree.separators(tree.root()).nth(1).unwrap();
        let mut drag = tree.begin_drag(separator, &host).unwrap();
        assert_eq!(drag.pair(), (ids[1], ids[2]));
        drag.update(&mut tree, 20.0).unwrap();
        let outcome = drag.update(&mut tree, 40.0).unwrap();
        assert_eq!((outcome.first_extent, outcome.second_extent), (240.0, 260.0));
        let committed = drag.commit().unwrap();
        assert_eq!(committed.applied, 40.0);
    }

    #[test]
    fn cancel_restores_snapshot() {
        let (mut tree, ids, host) = rendered();
        let before = tree.state_hash();
        let separator = tree.separators(tree.root()).next().unwrap();
        let mut drag = tree.begin_drag(separator, &host).unwrap();
        drag.update(&mut tree, 35.0).unwrap();
        assert_ne!(tree.state_hash(), before);
        drag.cancel(&mut tree).unwrap();
        assert_eq!(tree.state_hash(), before);
        assert!(tree.panel(ids[0]).unwrap().directive().is_some());
    }

    #[test]
    fn drag_requires_reflow() {
        let blueprint = PanelBlueprint::row()
            .child(PanelBlueprint::column())
            .child(PanelBlueprint::column());
        let tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
        let separator = tree.separators(tree.root()).next().unwrap();
        let first = tree.separator_neighbours(separator).unwrap().0;
        assert_eq!(
            tree.begin_drag(separator, &BTreeMap::<NodeId, Size>::new()),
            Err(LayoutError::NotRendered { node: first })
        );
    }
}
