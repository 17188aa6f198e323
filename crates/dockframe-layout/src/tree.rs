//! Panel tree: ownership structure the layout passes run over.
//!
//! Nodes live in an arena keyed by [`NodeId`] (a `BTreeMap`, so every walk
//! over "all nodes" is deterministic). Each panel owns an ordered vector of
//! child ids; the only back-pointer is the parent id, used to walk up to the
//! root after a composition change.
//!
//! # Node kinds
//!
//! | Variant     | Size model | Receives a directive | Counted as sizable |
//! |-------------|------------|----------------------|--------------------|
//! | `Panel`     | yes        | yes                  | yes                |
//! | `Separator` | no         | no                   | no                 |
//! | `Opaque`    | no         | no                   | no (blocks sizing) |
//!
//! A panel *needs sizing* when it has at least one non-separator child and
//! every such child is a `Panel`. Only those panels get separators inserted
//! between their children and take part in propagation and reflow.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attrs::{parse_declared, parse_orientation};
use crate::blueprint::{NodeBlueprint, PanelBlueprint};
use crate::config::LayoutConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::LayoutError;
use crate::size::{Axis, ComputedSize, DeclaredSize, Orientation};
use crate::style::{FlexDirective, StyleBounds};

// ============================================================================
// NodeId
// ============================================================================

/// Handle to a node in a [`PanelTree`].
///
/// Ids are allocated monotonically starting at 1 and never reused within a
/// tree. Composition changes that would run past `u32::MAX` fail with
/// [`LayoutError::IdOverflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a NodeId from a raw u32 value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// A sizable container panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelNode {
    pub(crate) label: Option<String>,
    pub(crate) orientation: Orientation,
    pub(crate) declared: DeclaredSize,
    pub(crate) computed: ComputedSize,
    pub(crate) needs_sizing: bool,
    pub(crate) bounds: StyleBounds,
    pub(crate) directive: Option<FlexDirective>,
    pub(crate) children: Vec<NodeId>,
}

impl PanelNode {
    fn new(label: Option<String>, orientation: Orientation, declared: DeclaredSize) -> Self {
        let computed = ComputedSize::from_declared(&declared);
        Self {
            label,
            orientation,
            declared,
            computed,
            needs_sizing: false,
            bounds: StyleBounds::from_computed(&computed),
            directive: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Axis the children are laid out along.
    #[must_use]
    pub fn main_axis(&self) -> Axis {
        self.orientation.main_axis()
    }

    /// Attributes as parsed at attach time.
    #[must_use]
    pub fn declared(&self) -> &DeclaredSize {
        &self.declared
    }

    /// Values derived by the propagation passes.
    #[must_use]
    pub fn computed(&self) -> &ComputedSize {
        &self.computed
    }

    /// True when this panel's children are governed by the engine.
    #[must_use]
    pub fn needs_sizing(&self) -> bool {
        self.needs_sizing
    }

    /// Min/max bounds emitted by the style pass.
    #[must_use]
    pub fn bounds(&self) -> &StyleBounds {
        &self.bounds
    }

    /// Sizing directive assigned by the parent, if the parent is a sizing panel.
    #[must_use]
    pub fn directive(&self) -> Option<FlexDirective> {
        self.directive
    }

    /// Children in order, separators included.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Resizer handle between two sizable siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorNode {
    pub(crate) before: NodeId,
    pub(crate) after: NodeId,
}

impl SeparatorNode {
    /// The sibling to the left of (or above) the separator.
    #[must_use]
    pub fn before(&self) -> NodeId {
        self.before
    }

    /// The sibling to the right of (or below) the separator.
    #[must_use]
    pub fn after(&self) -> NodeId {
        self.after
    }
}

/// A foreign node sized by some other layout mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpaqueNode {
    pub(crate) label: Option<String>,
}

impl OpaqueNode {
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Panel(PanelNode),
    Separator(SeparatorNode),
    Opaque(OpaqueNode),
}

impl TreeNode {
    #[must_use]
    pub fn as_panel(&self) -> Option<&PanelNode> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub(crate) fn as_panel_mut(&mut self) -> Option<&mut PanelNode> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_separator(&self) -> Option<&SeparatorNode> {
        match self {
            Self::Separator(separator) => Some(separator),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator(_))
    }

    /// Short kind name used in dumps and reports.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Panel(_) => "panel",
            Self::Separator(_) => "separator",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Label of a panel or opaque node.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Panel(panel) => panel.label(),
            Self::Opaque(opaque) => opaque.label(),
            Self::Separator(_) => None,
        }
    }
}

/// Arena entry: a node plus its parent link.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub(crate) parent: Option<NodeId>,
    pub(crate) node: TreeNode,
}

impl NodeRecord {
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn node(&self) -> &TreeNode {
        &self.node
    }
}

// ============================================================================
// PanelTree
// ============================================================================

/// Upper bound on the ids inserting `blueprint` allocates: one per node and
/// at most one separator per node.
fn id_demand(blueprint: &NodeBlueprint) -> usize {
    match blueprint {
        NodeBlueprint::Panel(panel) => panel
            .children
            .iter()
            .map(id_demand)
            .fold(2, usize::saturating_add),
        NodeBlueprint::Opaque { .. } => 1,
    }
}

/// A tree of splitter panels with derived sizing state.
#[derive(Debug, Clone)]
pub struct PanelTree {
    pub(crate) config: LayoutConfig,
    pub(crate) root: NodeId,
    pub(crate) nodes: BTreeMap<NodeId, NodeRecord>,
    next_id: u32,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) reflow_pending: bool,
}

impl PanelTree {
    /// Build a tree from a blueprint and run the propagation and style passes.
    ///
    /// Reflow stays pending until the host has rendered the tree and can
    /// supply measurements.
    #[must_use]
    pub fn from_blueprint(blueprint: &PanelBlueprint, config: LayoutConfig) -> Self {
        let mut tree = Self {
            config,
            root: NodeId(1),
            nodes: BTreeMap::new(),
            next_id: 1,
            diagnostics: Diagnostics::new(),
            reflow_pending: true,
        };
        tree.root = tree.insert_panel(None, blueprint);
        tree.recompute();
        tree
    }

    /// Re-run min/max, preferred and style passes over the whole tree.
    pub fn recompute(&mut self) {
        let root = self.root;
        self.propagate_min_max(root);
        self.propagate_preferred(root);
        self.synthesize_styles(root);
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, separators included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root panel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id).map(|record| &record.node)
    }

    #[must_use]
    pub fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|record| record.parent)
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeRecord)> + '_ {
        self.nodes.iter().map(|(id, record)| (*id, record))
    }

    /// The panel at `id`.
    pub fn panel(&self, id: NodeId) -> Result<&PanelNode, LayoutError> {
        self.node(id)
            .ok_or(LayoutError::MissingNode { node: id })?
            .as_panel()
            .ok_or(LayoutError::NotAPanel { node: id })
    }

    pub(crate) fn panel_mut(&mut self, id: NodeId) -> Result<&mut PanelNode, LayoutError> {
        self.nodes
            .get_mut(&id)
            .ok_or(LayoutError::MissingNode { node: id })?
            .node
            .as_panel_mut()
            .ok_or(LayoutError::NotAPanel { node: id })
    }

    /// The separator at `id`.
    pub fn separator(&self, id: NodeId) -> Result<&SeparatorNode, LayoutError> {
        self.node(id)
            .ok_or(LayoutError::MissingNode { node: id })?
            .as_separator()
            .ok_or(LayoutError::NotASeparator { node: id })
    }

    /// Children of `id` in order; empty for leaves and non-panels.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(TreeNode::Panel(panel)) => &panel.children,
            _ => &[],
        }
    }

    /// Non-separator children of `id`, in order.
    pub fn sizable_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| !self.node(*child).is_some_and(TreeNode::is_separator))
    }

    /// Separators directly under `id`, in order.
    pub fn separators(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.node(*child).is_some_and(TreeNode::is_separator))
    }

    /// First node in id order carrying `label`.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, record)| record.node.label() == Some(label))
            .map(|(id, _)| *id)
    }

    /// Findings recorded since construction (or the last `take_diagnostics`).
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Drain recorded findings.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// True until a full reflow succeeds after construction or a composition change.
    #[must_use]
    pub fn reflow_pending(&self) -> bool {
        self.reflow_pending
    }

    // ── Composition changes ─────────────────────────────────────────

    /// Attach a new child (and its subtree) as the last child of `parent`.
    ///
    /// Separators of `parent` are rebuilt, the propagation passes re-run on
    /// the new subtree and on every ancestor up to the root, styles are
    /// re-synthesized from the root, and a full reflow becomes pending.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        blueprint: &NodeBlueprint,
    ) -> Result<NodeId, LayoutError> {
        let existing = self.panel(parent)?.children.len();
        self.reserve_ids(id_demand(blueprint).saturating_add(existing).saturating_add(1))?;
        let child = self.insert_node(Some(parent), blueprint);
        self.panel_mut(parent)?.children.push(child);
        self.propagate_min_max(child);
        self.propagate_preferred(child);
        self.composition_changed(parent);
        dockframe_core::debug!(parent = %parent, child = %child, "appended child");
        Ok(child)
    }

    /// Detach `node` and drop its whole subtree.
    ///
    /// Removing a separator only triggers a rebuild of its parent's
    /// separators, so it reappears under a fresh id.
    pub fn remove_subtree(&mut self, node: NodeId) -> Result<(), LayoutError> {
        if node == self.root {
            return Err(LayoutError::RootRemoval { node });
        }
        let parent = self
            .nodes
            .get(&node)
            .ok_or(LayoutError::MissingNode { node })?
            .parent
            .ok_or(LayoutError::MissingNode { node })?;
        self.reserve_ids(self.panel(parent)?.children.len())?;
        self.panel_mut(parent)?.children.retain(|child| *child != node);
        self.drop_subtree(node);
        self.composition_changed(parent);
        dockframe_core::debug!(parent = %parent, node = %node, "removed subtree");
        Ok(())
    }

    /// Visit `from` and every descendant panel in pre-order.
    ///
    /// Hosts use this to dispatch resize notifications after a reflow or a
    /// drag.
    pub fn notify_resize(
        &self,
        from: NodeId,
        mut visit: impl FnMut(NodeId, &PanelNode),
    ) -> Result<(), LayoutError> {
        self.panel(from)?;
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if let Some(TreeNode::Panel(panel)) = self.node(id) {
                visit(id, panel);
                stack.extend(panel.children.iter().rev().copied());
            }
        }
        Ok(())
    }

    fn composition_changed(&mut self, parent: NodeId) {
        self.rebuild_separators(parent);
        let chain = self.ancestors_inclusive(parent);
        {
            let _span = dockframe_core::debug_span!("layout.min_max", root = %parent).entered();
            for id in &chain {
                self.min_max_node(*id);
            }
        }
        {
            let _span = dockframe_core::debug_span!("layout.preferred", root = %parent).entered();
            for id in &chain {
                self.preferred_node(*id);
            }
        }
        self.synthesize_styles(self.root);
        self.reflow_pending = true;
    }

    /// `id` followed by its ancestors, up to and including the root.
    fn ancestors_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    // ── Construction helpers ────────────────────────────────────────

    /// Fail unless `count` more ids can be allocated.
    fn reserve_ids(&self, count: usize) -> Result<(), LayoutError> {
        u32::try_from(count)
            .ok()
            .and_then(|count| self.next_id.checked_add(count))
            .map(|_| ())
            .ok_or(LayoutError::IdOverflow {
                current: NodeId(self.next_id),
            })
    }

    /// Composition changes call `reserve_ids` first. A single blueprint
    /// cannot hold anywhere near `u32::MAX` nodes, so construction never wraps.
    fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn insert_node(&mut self, parent: Option<NodeId>, blueprint: &NodeBlueprint) -> NodeId {
        match blueprint {
            NodeBlueprint::Panel(panel) => self.insert_panel(parent, panel),
            NodeBlueprint::Opaque { label } => {
                let id = self.allocate();
                self.nodes.insert(
                    id,
                    NodeRecord {
                        parent,
                        node: TreeNode::Opaque(OpaqueNode {
                            label: label.clone(),
                        }),
                    },
                );
                id
            }
        }
    }

    fn insert_panel(&mut self, parent: Option<NodeId>, blueprint: &PanelBlueprint) -> NodeId {
        let id = self.allocate();
        let declared = parse_declared(blueprint, Some(id), &mut self.diagnostics);
        let orientation = if blueprint.row {
            Orientation::Row
        } else {
            parse_orientation(blueprint)
        };
        self.nodes.insert(
            id,
            NodeRecord {
                parent,
                node: TreeNode::Panel(PanelNode::new(
                    blueprint.label.clone(),
                    orientation,
                    declared,
                )),
            },
        );

        let children: Vec<NodeId> = blueprint
            .children
            .iter()
            .map(|child| self.insert_node(Some(id), child))
            .collect();
        if let Some(panel) = self.nodes.get_mut(&id).and_then(|r| r.node.as_panel_mut()) {
            panel.children = children;
        }
        self.rebuild_separators(id);
        id
    }

    /// Re-derive `needs_sizing` for `id` and re-insert its separators.
    fn rebuild_separators(&mut self, id: NodeId) {
        let Some(TreeNode::Panel(panel)) = self.node(id) else {
            return;
        };
        let mut stale = Vec::new();
        let mut content = Vec::new();
        for child in &panel.children {
            match self.node(*child) {
                Some(TreeNode::Separator(_)) => stale.push(*child),
                Some(_) => content.push(*child),
                None => {}
            }
        }
        let needs_sizing = !content.is_empty()
            && content
                .iter()
                .all(|child| matches!(self.node(*child), Some(TreeNode::Panel(_))));

        for separator in stale {
            self.nodes.remove(&separator);
        }

        let mut children = Vec::with_capacity(content.len() * 2);
        if needs_sizing && content.len() > 1 {
            for pair in content.windows(2) {
                children.push(pair[0]);
                let separator = self.allocate();
                self.nodes.insert(
                    separator,
                    NodeRecord {
                        parent: Some(id),
                        node: TreeNode::Separator(SeparatorNode {
                            before: pair[0],
                            after: pair[1],
                        }),
                    },
                );
                children.push(separator);
            }
            children.extend(content.last().copied());
        } else {
            children = content;
        }

        if let Some(panel) = self.nodes.get_mut(&id).and_then(|r| r.node.as_panel_mut()) {
            panel.needs_sizing = needs_sizing;
            panel.children = children;
        }
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(record) = self.nodes.remove(&id)
                && let TreeNode::Panel(panel) = record.node
            {
                stack.extend(panel.children);
            }
        }
    }
}
