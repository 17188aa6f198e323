//! Introspection: text dumps, Graphviz export, serializable reports and a
//! state hash.
//!
//! # Usage
//!
//! ```ignore
//! let tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::default());
//! println!("{}", tree.dump());
//! std::fs::write("tree.dot", tree.export_dot())?;
//! let json = serde_json::to_string_pretty(&tree.report())?;
//! ```

use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::size::{AxisPair, ComputedSize, Orientation, Px, SizeValue};
use crate::style::{FlexDirective, StyleBounds};
use crate::tree::{NodeId, PanelTree, TreeNode};

/// Snapshot of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeReport {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub needs_sizing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed: Option<ComputedSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<StyleBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<FlexDirective>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
}

/// Snapshot of a whole tree, nodes in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub root: NodeId,
    pub separator_spacing: Px,
    pub reflow_pending: bool,
    pub diagnostics: usize,
    pub nodes: Vec<NodeReport>,
}

impl LayoutReport {
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeReport> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

fn pair(values: AxisPair<SizeValue>) -> String {
    format!("({}, {})", values.width, values.height)
}

fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '"' | '{' | '}' | '|' | '<' | '>' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn hash_directive(directive: Option<FlexDirective>, hasher: &mut impl Hasher) {
    match directive {
        None => 0u8.hash(hasher),
        Some(FlexDirective::Fill) => 1u8.hash(hasher),
        Some(FlexDirective::Fixed { basis }) => {
            2u8.hash(hasher);
            basis.hash(hasher);
        }
        Some(FlexDirective::Weighted { weight }) => {
            3u8.hash(hasher);
            weight.to_bits().hash(hasher);
        }
    }
}

impl PanelTree {
    /// Indented text dump, one line per node.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            let indent = "  ".repeat(depth);
            match node {
                TreeNode::Panel(panel) => {
                    let computed = panel.computed();
                    let _ = write!(out, "{indent}{id} panel");
                    if let Some(label) = panel.label() {
                        let _ = write!(out, " {label:?}");
                    }
                    let _ = write!(
                        out,
                        " {} {} min=({}px, {}px) max={} pref={}",
                        panel.orientation(),
                        if panel.needs_sizing() { "sizing" } else { "external" },
                        computed.min.width,
                        computed.min.height,
                        pair(computed.max),
                        pair(computed.preferred),
                    );
                    if let Some(directive) = panel.directive() {
                        let _ = write!(out, " flex={directive}");
                    }
                    out.push('\n');
                    stack.extend(panel.children().iter().rev().map(|child| (*child, depth + 1)));
                }
                TreeNode::Separator(separator) => {
                    let _ = writeln!(
                        out,
                        "{indent}{id} separator {}|{}",
                        separator.before(),
                        separator.after()
                    );
                }
                TreeNode::Opaque(opaque) => {
                    let _ = write!(out, "{indent}{id} opaque");
                    if let Some(label) = opaque.label() {
                        let _ = write!(out, " {label:?}");
                    }
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Graphviz DOT export. Sizing panels are green, external ones grey.
    #[must_use]
    pub fn export_dot(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "digraph PanelTree {{");
        let _ = writeln!(s, "  rankdir=TB;");
        let _ = writeln!(s, "  node [shape=record];");

        for (id, record) in self.iter() {
            match record.node() {
                TreeNode::Panel(panel) => {
                    let color = if panel.needs_sizing() { "green" } else { "gray" };
                    let computed = panel.computed();
                    let label = format!(
                        "{id} {}|{}|min {}x{}|max {}|flex {}",
                        panel.label().map(escape_record).unwrap_or_default(),
                        panel.orientation(),
                        computed.min.width,
                        computed.min.height,
                        escape_record(&pair(computed.max)),
                        panel
                            .directive()
                            .map_or_else(|| "-".to_string(), |d| d.to_string()),
                    );
                    let _ = writeln!(s, "  {id} [label=\"{{{label}}}\", color=\"{color}\"];");
                }
                TreeNode::Separator(_) => {
                    let _ = writeln!(s, "  {id} [shape=point];");
                }
                TreeNode::Opaque(opaque) => {
                    let label = opaque.label().map(escape_record).unwrap_or_default();
                    let _ = writeln!(
                        s,
                        "  {id} [label=\"{id} {label}\", shape=box, style=dashed];"
                    );
                }
            }
            if let Some(parent) = record.parent() {
                let _ = writeln!(s, "  {parent} -> {id};");
            }
        }

        let _ = writeln!(s, "}}");
        s
    }

    /// Serializable snapshot of the whole tree.
    #[must_use]
    pub fn report(&self) -> LayoutReport {
        let nodes = self
            .iter()
            .map(|(id, record)| {
                let mut report = NodeReport {
                    id,
                    parent: record.parent(),
                    kind: record.node().kind_name().to_string(),
                    label: record.node().label().map(str::to_string),
                    orientation: None,
                    needs_sizing: false,
                    computed: None,
                    bounds: None,
                    directive: None,
                    children: Vec::new(),
                };
                if let TreeNode::Panel(panel) = record.node() {
                    report.orientation = Some(panel.orientation());
                    report.needs_sizing = panel.needs_sizing();
                    report.computed = Some(*panel.computed());
                    report.bounds = Some(*panel.bounds());
                    report.directive = panel.directive();
                    report.children = panel.children().to_vec();
                }
                report
            })
            .collect();
        LayoutReport {
            root: self.root,
            separator_spacing: self.config.separator_spacing,
            reflow_pending: self.reflow_pending,
            diagnostics: self.diagnostics.len(),
            nodes,
        }
    }

    /// Deterministic hash of structure and every derived value.
    ///
    /// Diagnostics and the reflow-pending flag are not included.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.root.hash(&mut hasher);
        self.config.hash(&mut hasher);
        for (id, record) in self.iter() {
            id.hash(&mut hasher);
            record.parent().hash(&mut hasher);
            record.node().kind_name().hash(&mut hasher);
            match record.node() {
                TreeNode::Panel(panel) => {
                    panel.orientation().hash(&mut hasher);
                    panel.needs_sizing().hash(&mut hasher);
                    panel.computed().hash(&mut hasher);
                    panel.bounds().hash(&mut hasher);
                    hash_directive(panel.directive(), &mut hasher);
                    panel.children().hash(&mut hasher);
                }
                TreeNode::Separator(separator) => {
                    separator.before().hash(&mut hasher);
                    separator.after().hash(&mut hasher);
                }
                TreeNode::Opaque(_) => {}
            }
        }
        hasher.finish()
    }
}
