//! Engine configuration.
//!
//! The separator spacing is threaded explicitly into every pass that needs
//! it; there is no process-wide default to mutate.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::size::Px;

/// Pixel length reserved for each resizer handle between two sizable siblings.
pub const DEFAULT_SEPARATOR_SPACING: Px = 3;

/// Environment variable read by [`LayoutConfig::from_env`].
pub const SEPARATOR_SPACING_ENV: &str = "DOCKFRAME_SEPARATOR_SPACING";

/// Layout engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Main-axis length of one separator.
    pub separator_spacing: Px,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            separator_spacing: DEFAULT_SEPARATOR_SPACING,
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator spacing.
    #[must_use]
    pub fn with_separator_spacing(mut self, spacing: Px) -> Self {
        self.separator_spacing = spacing;
        self
    }

    /// Spacing taken by the separators between `sizable` children.
    #[must_use]
    pub fn separators_extent(&self, sizable: usize) -> Px {
        let gaps = Px::try_from(sizable.saturating_sub(1)).unwrap_or(Px::MAX);
        self.separator_spacing.saturating_mul(gaps)
    }

    /// Create from environment configuration.
    ///
    /// Reads `DOCKFRAME_SEPARATOR_SPACING`. Unparsable values are ignored
    /// (with a warning) and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        let mut diagnostics = Diagnostics::new();
        Self::from_lookup(|key| std::env::var(key).ok(), &mut diagnostics)
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(SEPARATOR_SPACING_ENV) {
            match raw.trim().parse::<Px>() {
                Ok(spacing) => config.separator_spacing = spacing,
                Err(_) => diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::InvalidConfig,
                        None,
                        format!(
                            "expected a pixel count, got {raw:?}; keeping {DEFAULT_SEPARATOR_SPACING}"
                        ),
                    )
                    .with_attribute(SEPARATOR_SPACING_ENV),
                ),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spacing_is_three() {
        assert_eq!(LayoutConfig::default().separator_spacing, 3);
    }

    #[test]
    fn separators_extent_counts_gaps() {
        let config = LayoutConfig::new().with_separator_spacing(4);
        assert_eq!(config.separators_extent(0), 0);
        assert_eq!(config.separators_extent(1), 0);
        assert_eq!(config.separators_extent(2), 4);
        assert_eq!(config.separators_extent(5), 16);
    }

    #[test]
    fn lookup_reads_spacing() {
        let mut diags = Diagnostics::new();
        let config = LayoutConfig::from_lookup(
            |key| (key == SEPARATOR_SPACING_ENV).then(|| " 8 ".to_string()),
            &mut diags,
        );
        assert_eq!(config.separator_spacing, 8);
        assert!(diags.is_empty());
    }

    #[test]
    fn lookup_rejects_garbage() {
        let mut diags = Diagnostics::new();
        let config = LayoutConfig::from_lookup(|_| Some("wide".to_string()), &mut diags);
        assert_eq!(config, LayoutConfig::default());
        assert!(diags.has_code(DiagnosticCode::InvalidConfig));
    }

    #[test]
    fn lookup_missing_keeps_default() {
        let mut diags = Diagnostics::new();
        let config = LayoutConfig::from_lookup(|_| None, &mut diags);
        assert_eq!(config, LayoutConfig::default());
        assert!(diags.is_empty());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: LayoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LayoutConfig::default());
        let config: LayoutConfig = serde_json::from_str(r#"{"separator_spacing": 6}"#).unwrap();
        assert_eq!(config.separator_spacing, 6);
    }
}
