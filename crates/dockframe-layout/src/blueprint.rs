//! Declarative tree descriptions.
//!
//! A blueprint is what a host hands over to build a [`PanelTree`](crate::PanelTree):
//! panels with raw attribute strings, nested children, and opaque leaves for
//! anything the engine does not size. Blueprints round-trip through serde,
//! internally tagged by `kind`:
//!
//! ```json
//! { "kind": "panel", "row": true,
//!   "attributes": { "min-width": "200" },
//!   "children": [ { "kind": "panel", "label": "editor" },
//!                 { "kind": "opaque", "label": "status-bar" } ] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attrs::{AttributeSource, SizeAttr};

/// Any child node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeBlueprint {
    Panel(PanelBlueprint),
    Opaque {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl NodeBlueprint {
    /// An opaque leaf.
    #[must_use]
    pub fn opaque(label: impl Into<String>) -> Self {
        Self::Opaque {
            label: Some(label.into()),
        }
    }
}

impl From<PanelBlueprint> for NodeBlueprint {
    fn from(panel: PanelBlueprint) -> Self {
        Self::Panel(panel)
    }
}

/// A panel and its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelBlueprint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Lay children out left to right. The `row` attribute has the same effect.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub row: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeBlueprint>,
}

impl PanelBlueprint {
    /// A panel laying children out left to right.
    #[must_use]
    pub fn row() -> Self {
        Self {
            row: true,
            ..Self::default()
        }
    }

    /// A panel stacking children top to bottom.
    #[must_use]
    pub fn column() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set a raw attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set one of the size attributes.
    #[must_use]
    pub fn size(self, attr: SizeAttr, value: impl Into<String>) -> Self {
        self.attr(attr.name(), value)
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<NodeBlueprint>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = impl Into<NodeBlueprint>>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

impl AttributeSource for PanelBlueprint {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
