#![forbid(unsafe_code)]

//! Floating-point rectangles in surface pixel space.
//!
//! Canvas APIs take `f64` coordinates, and the minimap's geometry (visor
//! centering, proportional scroll offsets) produces fractional pixels, so the
//! rectangle type stays in floats until a concrete surface snaps it.

use serde::Serialize;
use std::ops::Range;

/// An axis-aligned rectangle with origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
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

    /// Rectangle at the origin covering a `width × height` surface.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, f64::from(width), f64::from(height))
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the rectangle covers no area (or has NaN extents).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whether a point lies inside the half-open rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Snap the horizontal extent to whole pixels inside `0..limit`.
    #[inline]
    pub fn column_span(&self, limit: u32) -> Range<u32> {
        snap_span(self.x, self.width, limit)
    }

    /// Snap the vertical extent to whole pixels inside `0..limit`.
    #[inline]
    pub fn row_span(&self, limit: u32) -> Range<u32> {
        snap_span(self.y, self.height, limit)
    }
}

/// Round `start..start+len` to pixel boundaries and clip it to `0..limit`.
///
/// Returns an empty range for non-finite or non-positive extents.
pub fn snap_span(start: f64, len: f64, limit: u32) -> Range<u32> {
    if !start.is_finite() || !len.is_finite() || len <= 0.0 {
        return 0..0;
    }
    let limit_f = f64::from(limit);
    let lo = start.round().clamp(0.0, limit_f);
    let hi = (start + len).round().clamp(0.0, limit_f);
    if hi <= lo {
        return 0..0;
    }
    (lo as u32)..(hi as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_extent() {
        let r = Rect::new(2.0, 3.0, 10.0, 4.0);
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.bottom(), 7.0);
    }

    #[test]
    fn zero_or_negative_extent_is_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 5.0, -1.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 1.0).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(1.9, 1.9));
        assert!(!r.contains(2.0, 1.0));
    }

    #[test]
    fn spans_are_clipped_to_limit() {
        let r = Rect::new(-5.0, 8.0, 20.0, 10.0);
        assert_eq!(r.column_span(10), 0..10);
        assert_eq!(r.row_span(12), 8..12);
    }

    #[test]
    fn fractional_spans_round_to_nearest_pixel() {
        assert_eq!(snap_span(1.4, 2.2, 100), 1..4);
        assert_eq!(snap_span(1.6, 0.2, 100), 0..0);
    }

    #[test]
    fn span_outside_limit_is_empty() {
        assert_eq!(snap_span(50.0, 10.0, 20), 0..0);
        assert_eq!(snap_span(f64::INFINITY, 10.0, 20), 0..0);
    }
}
