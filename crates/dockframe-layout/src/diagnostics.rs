//! Recoverable layout findings.
//!
//! Configuration conflicts and malformed attribute values never fail a
//! layout pass. They are repaired locally and recorded here, one
//! [`Diagnostic`] per repair, and each one is also emitted as a `warn`
//! event through the logging facade.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::NodeId;

/// Severity for one finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
}

/// Stable code for diagnostic findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A size attribute was not `auto` or a pixel count; the default was used.
    MalformedValue,
    /// `auto` on an attribute that does not accept it; the default was used.
    AutoNotAllowed,
    /// Declared max below declared min; max was raised to min.
    MaxBelowMin,
    /// Aggregated max below the aggregated min; max was raised to min.
    ComputedMaxBelowMin,
    /// All sizable children measured zero along the main axis; ratios were split evenly.
    DegenerateExtent,
    /// A configuration value could not be used; the default was kept.
    InvalidConfig,
}

impl DiagnosticCode {
    /// Snake-case identifier, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedValue => "malformed_value",
            Self::AutoNotAllowed => "auto_not_allowed",
            Self::MaxBelowMin => "max_below_min",
            Self::ComputedMaxBelowMin => "computed_max_below_min",
            Self::DegenerateExtent => "degenerate_extent",
            Self::InvalidConfig => "invalid_config",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One actionable finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub node: Option<NodeId>,
    /// Attribute the finding is about, when there is one.
    pub attribute: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// A warning-level finding.
    #[must_use]
    pub fn warning(code: DiagnosticCode, node: Option<NodeId>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            node,
            attribute: None,
            message: message.into(),
        }
    }

    /// Attach the attribute name.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code)?;
        if let Some(node) = self.node {
            write!(f, " {node}")?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, " `{attribute}`")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Ordered collection of findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding and emit it as a log event.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        dockframe_core::warn!(
            code = diagnostic.code.as_str(),
            node = diagnostic.node.map(NodeId::raw),
            attribute = diagnostic.attribute.as_deref(),
            "{}",
            diagnostic.message
        );
        self.entries.push(diagnostic);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter()
    }

    /// True if any entry carries `code`.
    #[must_use]
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.entries.iter().any(|entry| entry.code == code)
    }

    /// Entries carrying `code`, in recording order.
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter().filter(move |entry| entry.code == code)
    }

    /// Remove and return every entry.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
