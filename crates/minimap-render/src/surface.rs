#![forbid(unsafe_code)]

//! The drawing-surface contract.
//!
//! This is the smallest slice of a 2D canvas API the minimap needs. Every
//! method is infallible: surfaces clip out-of-range geometry silently, the
//! way an HTML canvas does, so callers never branch on draw errors.

use crate::color::PackedRgba;
use crate::geometry::Rect;

/// A pixel surface that can be drawn into and used as an image source.
///
/// Implementations:
/// - [`Pixmap`](crate::Pixmap): software RGBA buffer.
/// - [`RecordingSurface`](crate::RecordingSurface): records calls for tests.
/// - `CanvasSurface` in `minimap-web`: an `HtmlCanvasElement` 2D context.
pub trait Surface: Sized {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Resize the surface. Like assigning `canvas.width`/`canvas.height`, this
    /// discards the current contents.
    fn set_size(&mut self, width: u32, height: u32);

    /// Allocate a new, transparent offscreen surface of the same kind.
    fn create_offscreen(&self, width: u32, height: u32) -> Self;

    /// Fill `rect` with `color`, blending source-over.
    fn fill_rect(&mut self, rect: Rect, color: PackedRgba);

    /// Reset `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Draw `text` left-aligned at `x` with its alphabetic baseline at
    /// `baseline`, using a monospace face `font_px` pixels tall.
    fn fill_text(&mut self, text: &str, x: f64, baseline: f64, font_px: u32, color: PackedRgba);

    /// Copy the `src_rect` region of `src` into `dst_rect`, scaling as needed.
    fn draw_image(&mut self, src: &Self, src_rect: Rect, dst_rect: Rect);

    /// Full-surface rectangle.
    #[inline]
    fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    /// True when either dimension is zero.
    #[inline]
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
