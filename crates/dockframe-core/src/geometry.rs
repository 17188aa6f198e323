#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All lengths are CSS-style pixels. Layout results are fractional, so both
//! types carry `f64` components; hosts that render on an integer grid round
//! at the edge.

/// A width/height pair, as measured by a host after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A placed rectangle. Origin at top-left, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given extents at the origin.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn from_size_sits_at_origin() {
        let r = Rect::from_size(1206.0, 400.0);
        assert_eq!((r.x, r.y), (0.0, 0.0));
        assert_eq!(r.right(), 1206.0);
    }

    proptest::proptest! {
        #[test]
        fn edges_enclose_extent(
            x in -500.0f64..500.0, y in -500.0f64..500.0,
            w in 0.0f64..2000.0, h in 0.0f64..2000.0,
        ) {
            let r = Rect::new(x, y, w, h);
            proptest::prop_assert!((r.right() - r.x - w).abs() < 1e-9);
            proptest::prop_assert!((r.bottom() - r.y - h).abs() < 1e-9);
            proptest::prop_assert_eq!(r.size(), Size::new(w, h));
        }
    }
}
