//! Size model: declared and computed width/height constraints.
//!
//! Every value is either a whole number of pixels or [`SizeValue::Auto`].
//! Aggregation across children treats `Auto` as absorbing: once an operand
//! is `Auto` the result stays `Auto`, whatever comes after it.

use std::fmt;
use std::ops::{Index, IndexMut};

use dockframe_core::geometry::Size;
use serde::{Deserialize, Serialize};

/// Whole pixels.
pub type Px = u32;

// ============================================================================
// SizeValue
// ============================================================================

/// A fixed pixel length or the `auto` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeValue {
    /// No fixed value; resolve from children or fill the available space.
    #[default]
    Auto,
    /// A fixed length in pixels.
    Px(Px),
}

impl SizeValue {
    /// Shorthand for `SizeValue::Px`.
    #[must_use]
    pub const fn px(value: Px) -> Self {
        Self::Px(value)
    }

    /// True for the `auto` sentinel.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The pixel value, if fixed.
    #[must_use]
    pub const fn as_px(self) -> Option<Px> {
        match self {
            Self::Auto => None,
            Self::Px(value) => Some(value),
        }
    }

    /// Sum with `auto` absorbing.
    #[must_use]
    pub const fn absorbing_add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Px(a), Self::Px(b)) => Self::Px(a.saturating_add(b)),
            _ => Self::Auto,
        }
    }

    /// Maximum with `auto` absorbing.
    #[must_use]
    pub const fn absorbing_max(self, other: Self) -> Self {
        match (self, other) {
            (Self::Px(a), Self::Px(b)) => Self::Px(if a > b { a } else { b }),
            _ => Self::Auto,
        }
    }

    /// Pixel value as `f64`, with `auto` mapped to positive infinity.
    ///
    /// Used where `auto` means "no upper bound".
    #[must_use]
    pub fn or_unbounded(self) -> f64 {
        self.as_px().map_or(f64::INFINITY, f64::from)
    }
}

impl From<Px> for SizeValue {
    fn from(value: Px) -> Self {
        Self::Px(value)
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Px(value) => write!(f, "{value}px"),
        }
    }
}

// ============================================================================
// Axis / Orientation
// ============================================================================

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Widths.
    Horizontal,
    /// Heights.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    #[must_use]
    pub const fn extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Attribute-style dimension name (`width` / `height`).
    #[must_use]
    pub const fn dimension(self) -> &'static str {
        match self {
            Self::Horizontal => "width",
            Self::Vertical => "height",
        }
    }
}

/// How a panel arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Children side by side, left to right.
    Row,
    /// Children stacked, top to bottom.
    #[default]
    Column,
}

impl Orientation {
    /// The axis children are placed along.
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Row => Axis::Horizontal,
            Self::Column => Axis::Vertical,
        }
    }

    /// The axis perpendicular to the main axis.
    #[must_use]
    pub const fn cross_axis(self) -> Axis {
        self.main_axis().cross()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Column => f.write_str("column"),
        }
    }
}

// ============================================================================
// AxisPair
// ============================================================================

/// One value per axis, indexable by [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxisPair<T> {
    pub width: T,
    pub height: T,
}

impl<T> AxisPair<T> {
    /// Build from width and height.
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// Apply `f` to both components.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> AxisPair<U> {
        AxisPair {
            width: f(self.width),
            height: f(self.height),
        }
    }
}

impl<T: Copy> AxisPair<T> {
    /// Same value on both axes.
    pub const fn splat(value: T) -> Self {
        Self {
            width: value,
            height: value,
        }
    }
}

impl<T> Index<Axis> for AxisPair<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::Horizontal => &self.width,
            Axis::Vertical => &self.height,
        }
    }
}

impl<T> IndexMut<Axis> for AxisPair<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Horizontal => &mut self.width,
            Axis::Vertical => &mut self.height,
        }
    }
}

// ============================================================================
// DeclaredSize / ComputedSize
// ============================================================================

/// Size attributes as declared on a panel, after parsing and repair.
///
/// Parsed once when the panel is attached and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredSize {
    /// `width` / `height`.
    pub size: AxisPair<SizeValue>,
    /// `min-width` / `min-height`; never `auto`.
    pub min: AxisPair<Px>,
    /// `max-width` / `max-height`; `auto` means unbounded.
    pub max: AxisPair<SizeValue>,
}

impl Default for DeclaredSize {
    fn default() -> Self {
        Self {
            size: AxisPair::splat(SizeValue::Auto),
            min: AxisPair::splat(0),
            max: AxisPair::splat(SizeValue::Auto),
        }
    }
}

impl DeclaredSize {
    /// Fixed width/height, everything else default.
    #[must_use]
    pub fn fixed(width: SizeValue, height: SizeValue) -> Self {
        Self {
            size: AxisPair::new(width, height),
            ..Self::default()
        }
    }
}

/// Derived constraints, recomputed whenever the tree's composition changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComputedSize {
    pub min: AxisPair<Px>,
    pub max: AxisPair<SizeValue>,
    pub preferred: AxisPair<SizeValue>,
}

impl ComputedSize {
    /// Computed values before any children are taken into account.
    #[must_use]
    pub fn from_declared(declared: &DeclaredSize) -> Self {
        Self {
            min: declared.min,
            max: declared.max,
            preferred: declared.size,
        }
    }

    /// Clamp a length into `[min, max]` on `axis`.
    ///
    /// The minimum wins when the range is inverted.
    #[must_use]
    pub fn clamp_extent(&self, axis: Axis, extent: f64) -> f64 {
        let min = f64::from(self.min[axis]);
        let max = self.max[axis].or_unbounded();
        extent.min(max).max(min)
    }

    /// True when `max` is `auto` or not below `min` on both axes.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .all(|axis| self.max[axis].as_px().is_none_or(|max| max >= self.min[axis]))
    }
}
