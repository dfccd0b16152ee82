#![forbid(unsafe_code)]

//! Document lines to an offscreen bitmap.

use minimap_render::{PackedRgba, Surface};

/// Renders document lines into a fresh offscreen surface, one row per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rasterizer {
    line_height: u32,
    text_color: PackedRgba,
}

impl Rasterizer {
    #[must_use]
    pub const fn new(line_height: u32, text_color: PackedRgba) -> Self {
        Self {
            line_height,
            text_color,
        }
    }

    #[inline]
    #[must_use]
    pub const fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Bitmap height for `line_count` lines.
    #[must_use]
    pub fn bitmap_height(&self, line_count: usize) -> u32 {
        u32::try_from(line_count)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.line_height)
    }

    /// Allocate a `width × lines.len() × line_height` surface compatible with
    /// `like` and draw every line into it.
    ///
    /// Row `i` holds line `i`, left-aligned at x = 0 with its baseline at
    /// `(i + 1) × line_height`. Text past `width` is clipped by the surface.
    /// An empty `lines` yields a zero-height surface.
    pub fn rasterize<S, L>(&self, like: &S, width: u32, lines: &[L]) -> S
    where
        S: Surface,
        L: AsRef<str>,
    {
        let mut bitmap = like.create_offscreen(width, self.bitmap_height(lines.len()));
        let lh = f64::from(self.line_height);
        for (i, line) in lines.iter().enumerate() {
            let text = line.as_ref();
            if text.is_empty() {
                continue;
            }
            let baseline = i as f64 * lh + lh;
            bitmap.fill_text(text, 0.0, baseline, self.line_height, self.text_color);
        }
        bitmap
    }
}
