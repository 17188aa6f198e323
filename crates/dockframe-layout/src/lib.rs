#![forbid(unsafe_code)]

//! Layout and resize engine for nested splitter panels.
//!
//! A [`PanelTree`] is built from a [`PanelBlueprint`]. Construction parses
//! each panel's declared size attributes once, inserts separators between
//! sizable siblings, and runs three passes:
//!
//! 1. **min/max** ([`propagate`]): children's bounds aggregate into the
//!    parent's, depth first.
//! 2. **preferred** ([`propagate`]): `auto` sizes resolve from children.
//! 3. **style** ([`style`]): breadth first, each panel gets
//!    [`StyleBounds`] and each sizable child a [`FlexDirective`].
//!
//! After the host renders, [`PanelTree::reflow`] turns measured extents into
//! proportional weights ([`reflow`]), and drags on a separator reweight only
//! the two neighbours ([`resize`]).
//!
//! ```ignore
//! use dockframe_layout::{LayoutConfig, PanelBlueprint, PanelTree};
//! use dockframe_core::Rect;
//!
//! let blueprint = PanelBlueprint::row()
//!     .child(PanelBlueprint::column().label("files").attr("width", "240"))
//!     .child(PanelBlueprint::column().label("editor"));
//! let mut tree = PanelTree::from_blueprint(&blueprint, LayoutConfig::from_env());
//!
//! let layout = tree.solve_layout(Rect::from_size(1280.0, 800.0));
//! tree.reflow(&layout)?;
//! ```
//!
//! # Feature flags
//! - `tracing` (default): diagnostics are emitted as `warn` events and each
//!   pass runs inside a `debug` span (`layout.min_max`, `layout.preferred`,
//!   `layout.style`, `layout.reflow`).

pub mod attrs;
pub mod blueprint;
pub mod config;
pub mod debug;
pub mod diagnostics;
pub mod error;
pub mod flex;
pub mod propagate;
pub mod reflow;
pub mod resize;
pub mod size;
pub mod solve;
pub mod style;
pub mod tree;

pub use attrs::{AttributeSource, SizeAttr, SizeParseError, parse_declared, parse_size_value};
pub use blueprint::{NodeBlueprint, PanelBlueprint};
pub use config::{DEFAULT_SEPARATOR_SPACING, LayoutConfig};
pub use debug::{LayoutReport, NodeReport};
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use error::LayoutError;
pub use flex::{FlexItem, resolve_flexible_lengths};
pub use reflow::{MeasureFn, MeasureHost, ReflowSummary, proportional_weights};
pub use resize::{DragSession, PairSide, ResizeOutcome, clamp_pair_delta};
pub use size::{Axis, AxisPair, ComputedSize, DeclaredSize, Orientation, Px, SizeValue};
pub use solve::PanelLayout;
pub use style::{FlexDirective, StyleBounds};
pub use tree::{NodeId, NodeRecord, OpaqueNode, PanelNode, PanelTree, SeparatorNode, TreeNode};
