//! Style synthesis: computed constraints to host sizing directives.
//!
//! Runs breadth-first so every parent is styled before its children. Each
//! panel gets [`StyleBounds`] from its computed min/max; every sizable child
//! of a sizing panel gets a [`FlexDirective`].

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::size::{Axis, AxisPair, ComputedSize, Px, SizeValue};
use crate::tree::{NodeId, PanelTree, TreeNode};

/// How a child takes its share of the parent's main axis.
///
/// The three variants correspond to the flex shorthands `1 1 auto`,
/// `0 0 <basis>px` and `<w> <w> 0px`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlexDirective {
    /// Grow and shrink to fill the remaining space.
    Fill,
    /// Start at exactly `basis` pixels.
    Fixed { basis: Px },
    /// Purely proportional share, assigned by reflow.
    Weighted { weight: f64 },
}

impl FlexDirective {
    #[must_use]
    pub fn grow(self) -> f64 {
        match self {
            Self::Fill => 1.0,
            Self::Fixed { .. } => 0.0,
            Self::Weighted { weight } => weight,
        }
    }

    #[must_use]
    pub fn shrink(self) -> f64 {
        self.grow()
    }

    /// Fixed basis in pixels; `None` means `auto`.
    #[must_use]
    pub fn basis(self) -> Option<f64> {
        match self {
            Self::Fill => None,
            Self::Fixed { basis } => Some(f64::from(basis)),
            Self::Weighted { .. } => Some(0.0),
        }
    }

    /// Weight assigned by reflow, if any.
    #[must_use]
    pub fn weight(self) -> Option<f64> {
        match self {
            Self::Weighted { weight } => Some(weight),
            _ => None,
        }
    }
}

impl fmt::Display for FlexDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fill => f.write_str("1 1 auto"),
            Self::Fixed { basis } => write!(f, "0 0 {basis}px"),
            Self::Weighted { weight } => write!(f, "{weight} {weight} 0px"),
        }
    }
}

/// Min/max box bounds for one panel. `None` max means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StyleBounds {
    pub min: AxisPair<Px>,
    pub max: AxisPair<Option<Px>>,
}

impl StyleBounds {
    #[must_use]
    pub fn from_computed(computed: &ComputedSize) -> Self {
        Self {
            min: computed.min,
            max: computed.max.map(SizeValue::as_px),
        }
    }

    /// Minimum on `axis` as `f64`.
    #[must_use]
    pub fn min_extent(&self, axis: Axis) -> f64 {
        f64::from(self.min[axis])
    }

    /// Maximum on `axis` as `f64`, infinite when unbounded.
    #[must_use]
    pub fn max_extent(&self, axis: Axis) -> f64 {
        self.max[axis].map_or(f64::INFINITY, f64::from)
    }
}

/// Directive for one sizable child of a sizing panel.
#[must_use]
pub fn directive_for(sizable_siblings: usize, preferred_main: SizeValue) -> FlexDirective {
    if sizable_siblings == 1 {
        return FlexDirective::Fill;
    }
    match preferred_main {
        SizeValue::Auto => FlexDirective::Fill,
        SizeValue::Px(basis) => FlexDirective::Fixed { basis },
    }
}

impl PanelTree {
    /// Style pass over the subtree rooted at `id`.
    pub fn synthesize_styles(&mut self, id: NodeId) {
        let _span = dockframe_core::debug_span!("layout.style", root = %id).entered();
        self.style_from(id);
    }

    pub(crate) fn style_from(&mut self, id: NodeId) {
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            let Ok(panel) = self.panel_mut(current) else {
                continue;
            };
            panel.bounds = StyleBounds::from_computed(&panel.computed);
            let main = panel.main_axis();
            let needs_sizing = panel.needs_sizing;
            let children: Vec<NodeId> = self.sizable_children(current).collect();

            for child in &children {
                if let Ok(child_panel) = self.panel_mut(*child) {
                    let preferred = child_panel.computed.preferred[main];
                    child_panel.directive =
                        needs_sizing.then(|| directive_for(children.len(), preferred));
                    dockframe_core::trace!(
                        node = %child,
                        directive = ?child_panel.directive,
                        "directive"
                    );
                }
            }
            queue.extend(
                children
                    .into_iter()
                    .filter(|child| matches!(self.node(*child), Some(TreeNode::Panel(_)))),
            );
        }
    }
}
