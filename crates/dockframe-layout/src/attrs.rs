//! Declared-attribute parsing.
//!
//! Hosts hand over loosely typed attribute strings (`width="120"`,
//! `max-height="auto"`). They are parsed exactly once, when a panel is
//! attached, into a [`DeclaredSize`]. Anything unusable falls back to the
//! field's default and leaves a diagnostic behind.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::size::{Axis, DeclaredSize, Orientation, Px, SizeValue};
use crate::tree::NodeId;

/// Name of the boolean attribute selecting [`Orientation::Row`].
pub const ROW_ATTR: &str = "row";

// ============================================================================
// AttributeSource
// ============================================================================

/// Read-only view of a node's raw attributes.
pub trait AttributeSource {
    /// Raw value of `name`, or `None` when the attribute is absent.
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl<S: AttributeSource + ?Sized> AttributeSource for &S {
    fn attribute(&self, name: &str) -> Option<&str> {
        (**self).attribute(name)
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<H: BuildHasher> AttributeSource for HashMap<String, String, H> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeSource for [(&str, &str)] {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

impl<const N: usize> AttributeSource for [(&str, &str); N] {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.as_slice().attribute(name)
    }
}

// ============================================================================
// SizeAttr
// ============================================================================

/// The recognised size attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeAttr {
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
}

impl SizeAttr {
    pub const ALL: [Self; 6] = [
        Self::Width,
        Self::Height,
        Self::MinWidth,
        Self::MinHeight,
        Self::MaxWidth,
        Self::MaxHeight,
    ];

    /// Attribute name as written by hosts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::MinWidth => "min-width",
            Self::MinHeight => "min-height",
            Self::MaxWidth => "max-width",
            Self::MaxHeight => "max-height",
        }
    }

    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Width | Self::MinWidth | Self::MaxWidth => Axis::Horizontal,
            Self::Height | Self::MinHeight | Self::MaxHeight => Axis::Vertical,
        }
    }

    /// Minimums are always concrete.
    #[must_use]
    pub const fn accepts_auto(self) -> bool {
        !matches!(self, Self::MinWidth | Self::MinHeight)
    }

    /// Value used when the attribute is absent or unusable.
    #[must_use]
    pub const fn default_value(self) -> SizeValue {
        if self.accepts_auto() {
            SizeValue::Auto
        } else {
            SizeValue::Px(0)
        }
    }
}

impl fmt::Display for SizeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Why a raw attribute string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeParseError {
    Empty,
    NotAPixelCount { raw: String },
}

impl fmt::Display for SizeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty value"),
            Self::NotAPixelCount { raw } => {
                write!(f, "expected `auto` or a non-negative pixel count, got {raw:?}")
            }
        }
    }
}

impl std::error::Error for SizeParseError {}

/// Parse `auto`, `120` or `120px` (surrounding whitespace allowed).
pub fn parse_size_value(raw: &str) -> Result<SizeValue, SizeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SizeParseError::Empty);
    }
    if trimmed.eq_ignore_ascii_case("auto") {
        return Ok(SizeValue::Auto);
    }
    let digits = trimmed
        .strip_suffix("px")
        .or_else(|| trimmed.strip_suffix("PX"))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SizeParseError::NotAPixelCount {
            raw: raw.to_string(),
        });
    }
    digits
        .parse::<Px>()
        .map(SizeValue::Px)
        .map_err(|_| SizeParseError::NotAPixelCount {
            raw: raw.to_string(),
        })
}

/// Read one attribute, substituting its default on failure.
fn read_attr(
    source: &(impl AttributeSource + ?Sized),
    attr: SizeAttr,
    node: Option<NodeId>,
    diagnostics: &mut Diagnostics,
) -> SizeValue {
    let Some(raw) = source.attribute(attr.name()) else {
        return attr.default_value();
    };
    match parse_size_value(raw) {
        Ok(SizeValue::Auto) if !attr.accepts_auto() => {
            diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::AutoNotAllowed,
                    node,
                    format!("`{attr}` cannot be auto; using {}", attr.default_value()),
                )
                .with_attribute(attr.name()),
            );
            attr.default_value()
        }
        Ok(value) => value,
        Err(err) => {
            diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::MalformedValue,
                    node,
                    format!("{err}; using {}", attr.default_value()),
                )
                .with_attribute(attr.name()),
            );
            attr.default_value()
        }
    }
}

/// Parse the six size attributes and repair `max < min` conflicts.
pub fn parse_declared(
    source: &(impl AttributeSource + ?Sized),
    node: Option<NodeId>,
    diagnostics: &mut Diagnostics,
) -> DeclaredSize {
    let mut declared = DeclaredSize::default();
    for attr in SizeAttr::ALL {
        let value = read_attr(source, attr, node, diagnostics);
        let axis = attr.axis();
        match attr {
            SizeAttr::Width | SizeAttr::Height => declared.size[axis] = value,
            SizeAttr::MinWidth | SizeAttr::MinHeight => {
                declared.min[axis] = value.as_px().unwrap_or(0);
            }
            SizeAttr::MaxWidth | SizeAttr::MaxHeight => declared.max[axis] = value,
        }
    }

    for axis in [Axis::Horizontal, Axis::Vertical] {
        let min = declared.min[axis];
        if let Some(max) = declared.max[axis].as_px()
            && max < min
        {
            let dim = axis.dimension();
            diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::MaxBelowMin,
                    node,
                    format!("\"max-{dim}\" is less than \"min-{dim}\" ({max} < {min}); clamping max to {min}"),
                )
                .with_attribute(format!("max-{dim}")),
            );
            declared.max[axis] = SizeValue::Px(min);
        }
    }

    declared
}

/// Orientation from the boolean `row` attribute.
#[must_use]
pub fn parse_orientation(source: &(impl AttributeSource + ?Sized)) -> Orientation {
    match source.attribute(ROW_ATTR) {
        Some(value) if !value.trim().eq_ignore_ascii_case("false") => Orientation::Row,
        _ => Orientation::Column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::AxisPair;

    fn parse(attrs: &[(&str, &str)]) -> (DeclaredSize, Diagnostics) {
        let mut diags = Diagnostics::new();
        let declared = parse_declared(attrs, None, &mut diags);
        (declared, diags)
    }

    // ── Value grammar ───────────────────────────────────────────────

    #[test]
    fn value_grammar() {
        assert_eq!(parse_size_value("auto"), Ok(SizeValue::Auto));
        assert_eq!(parse_size_value(" AUTO "), Ok(SizeValue::Auto));
        assert_eq!(parse_size_value("120"), Ok(SizeValue::px(120)));
        assert_eq!(parse_size_value("120px"), Ok(SizeValue::px(120)));
        assert_eq!(parse_size_value(" 0 "), Ok(SizeValue::px(0)));
        assert_eq!(parse_size_value(""), Err(SizeParseError::Empty));
        assert!(parse_size_value("px").is_err());
        assert!(parse_size_value("-4").is_err());
        assert!(parse_size_value("12.5").is_err());
        assert!(parse_size_value("wide").is_err());
        assert!(parse_size_value("99999999999").is_err());
    }

    // ── Declared sizes ──────────────────────────────────────────────

    #[test]
    fn absent_attributes_use_defaults_silently() {
        let (declared, diags) = parse(&[]);
        assert_eq!(declared, DeclaredSize::default());
        assert!(diags.is_empty());
    }

    #[test]
    fn reads_every_field() {
        let (declared, diags) = parse(&[
            ("width", "100"),
            ("height", "auto"),
            ("min-width", "10"),
            ("min-height", "20px"),
            ("max-width", "300"),
            ("max-height", "auto"),
        ]);
        assert!(diags.is_empty());
        assert_eq!(
            declared.size,
            AxisPair::new(SizeValue::px(100), SizeValue::Auto)
        );
        assert_eq!(declared.min, AxisPair::new(10, 20));
        assert_eq!(
            declared.max,
            AxisPair::new(SizeValue::px(300), SizeValue::Auto)
        );
    }

    #[test]
    fn malformed_values_fall_back_with_diagnostic() {
        let (declared, diags) = parse(&[("width", "wide"), ("min-height", "-3")]);
        assert_eq!(declared.size.width, SizeValue::Auto);
        assert_eq!(declared.min.height, 0);
        assert_eq!(diags.with_code(DiagnosticCode::MalformedValue).count(), 2);
        let first = diags.iter().next().unwrap();
        assert_eq!(first.attribute.as_deref(), Some("width"));
    }

    #[test]
    fn auto_minimum_is_rejected() {
        let (declared, diags) = parse(&[("min-width", "auto")]);
        assert_eq!(declared.min.width, 0);
        assert!(diags.has_code(DiagnosticCode::AutoNotAllowed));
    }

    #[test]
    fn max_below_min_is_clamped() {
        let (declared, diags) = parse(&[("min-width", "50"), ("max-width", "30")]);
        assert_eq!(declared.max.width, SizeValue::px(50));
        assert_eq!(diags.with_code(DiagnosticCode::MaxBelowMin).count(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.attribute.as_deref(), Some("max-width"));
    }

    #[test]
    fn max_equal_to_min_is_fine() {
        let (declared, diags) = parse(&[("min-height", "40"), ("max-height", "40")]);
        assert_eq!(declared.max.height, SizeValue::px(40));
        assert!(diags.is_empty());
    }

    #[test]
    fn diagnostics_carry_node() {
        let mut diags = Diagnostics::new();
        let _ = parse_declared(&[("width", "x")], Some(NodeId::from_raw(3)), &mut diags);
        assert_eq!(diags.iter().next().unwrap().node, Some(NodeId::from_raw(3)));
    }

    // ── Sources ─────────────────────────────────────────────────────

    #[test]
    fn map_sources() {
        let mut map = BTreeMap::new();
        map.insert("width".to_string(), "64".to_string());
        let mut diags = Diagnostics::new();
        let declared = parse_declared(&map, None, &mut diags);
        assert_eq!(declared.size.width, SizeValue::px(64));

        let hash: HashMap<String, String> = map.into_iter().collect();
        let declared = parse_declared(&hash, None, &mut diags);
        assert_eq!(declared.size.width, SizeValue::px(64));
    }

    #[test]
    fn orientation_from_row_attribute() {
        assert_eq!(parse_orientation(&[("row", "")]), Orientation::Row);
        assert_eq!(parse_orientation(&[("row", "true")]), Orientation::Row);
        assert_eq!(parse_orientation(&[("row", "false")]), Orientation::Column);
        assert_eq!(parse_orientation(&[]), Orientation::Column);
    }
}
