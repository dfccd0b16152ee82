#![forbid(unsafe_code)]

//! Software RGBA surface.
//!
//! `Pixmap` is the headless backend: a row-major buffer of [`PackedRgba`]
//! pixels with canvas-like semantics (source-over blending, silent clipping,
//! nearest-neighbour image scaling). It backs unit tests, golden-frame
//! checksums and native hosts that upload the pixels themselves.
//!
//! # Example
//!
//! ```
//! use minimap_render::{PackedRgba, Pixmap, Rect, Surface};
//!
//! let mut px = Pixmap::new(8, 4);
//! px.fill_rect(Rect::new(0.0, 0.0, 8.0, 4.0), PackedRgba::BLACK);
//! px.fill_text("Hi", 0.0, 4.0, 4, PackedRgba::WHITE);
//! assert_eq!(px.pixel(0, 3), Some(PackedRgba::WHITE));
//! assert_eq!(px.pixel(7, 3), Some(PackedRgba::BLACK));
//! ```

use crate::color::PackedRgba;
use crate::geometry::Rect;
use crate::glyph;
use crate::surface::Surface;

const FNV64_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01B3;

/// A software RGBA raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl Pixmap {
    /// Create a transparent pixmap. Zero dimensions are allowed and produce
    /// an empty buffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![PackedRgba::TRANSPARENT; area(width, height)],
        }
    }

    /// Pixel at `(x, y)`, or `None` out of bounds.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<PackedRgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Row-major pixel slice.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// One row of pixels, or an empty slice out of bounds.
    #[must_use]
    pub fn row(&self, y: u32) -> &[PackedRgba] {
        if y >= self.height {
            return &[];
        }
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Whether any pixel in row `y` differs from `background`.
    #[must_use]
    pub fn row_has_ink(&self, y: u32, background: PackedRgba) -> bool {
        self.row(y).iter().any(|&p| p != background)
    }

    /// Count of pixels equal to `color`.
    #[must_use]
    pub fn count(&self, color: PackedRgba) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// FNV-1a 64 hash over dimensions and pixel data, for frame-equality checks.
    #[must_use]
    pub fn checksum(&self) -> u64 {
        let mut hash = FNV64_OFFSET_BASIS;
        let mut feed = |bytes: &[u8]| {
            for &b in bytes {
                hash ^= u64::from(b);
                hash = hash.wrapping_mul(FNV64_PRIME);
            }
        };
        feed(&self.width.to_le_bytes());
        feed(&self.height.to_le_bytes());
        for p in &self.pixels {
            feed(&p.0.to_be_bytes());
        }
        hash
    }

    /// Raw RGBA bytes, e.g. for uploading as a texture.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.0.to_be_bytes()).collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: PackedRgba) {
        let idx = self.index(x, y);
        self.pixels[idx] = color.over(self.pixels[idx]);
    }
}

#[inline]
fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl Surface for Pixmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(area(width, height), PackedRgba::TRANSPARENT);
    }

    fn create_offscreen(&self, width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    fn fill_rect(&mut self, rect: Rect, color: PackedRgba) {
        if color.is_transparent() {
            return;
        }
        let cols = rect.column_span(self.width);
        for y in rect.row_span(self.height) {
            for x in cols.clone() {
                self.blend(x, y, color);
            }
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        let cols = rect.column_span(self.width);
        for y in rect.row_span(self.height) {
            let start = self.index(cols.start, y);
            let end = start + cols.len();
            self.pixels[start..end].fill(PackedRgba::TRANSPARENT);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, baseline: f64, font_px: u32, color: PackedRgba) {
        if text.is_empty() || font_px == 0 {
            return;
        }
        for glyph in glyph::layout(text, font_px) {
            let left = x + f64::from(glyph.x);
            if left >= f64::from(self.width) {
                break;
            }
            let top = baseline - f64::from(glyph.height);
            self.fill_rect(
                Rect::new(left, top, f64::from(glyph.width), f64::from(glyph.height)),
                color,
            );
        }
    }

    fn draw_image(&mut self, src: &Self, src_rect: Rect, dst_rect: Rect) {
        if src_rect.is_empty() || dst_rect.is_empty() || src.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            src_y = src_rect.y,
            src_h = src_rect.height,
            dst_w = dst_rect.width,
            dst_h = dst_rect.height,
            "pixmap draw_image"
        );
        let scale_x = src_rect.width / dst_rect.width;
        let scale_y = src_rect.height / dst_rect.height;
        let src_left = src_rect.x.max(0.0);
        let src_top = src_rect.y.max(0.0);
        let src_right = src_rect.right().min(f64::from(src.width));
        let src_bottom = src_rect.bottom().min(f64::from(src.height));
        let cols = dst_rect.column_span(self.width);
        for y in dst_rect.row_span(self.height) {
            let v = src_rect.y + (f64::from(y) + 0.5 - dst_rect.y) * scale_y;
            if v < src_top || v >= src_bottom {
                continue;
            }
            let sy = v.floor() as u32;
            for x in cols.clone() {
                let u = src_rect.x + (f64::from(x) + 0.5 - dst_rect.x) * scale_x;
                if u < src_left || u >= src_right {
                    continue;
                }
                let sx = u.floor() as u32;
                let color = src.pixels[src.index(sx, sy)];
                if !color.is_transparent() {
                    self.blend(x, y, color);
                }
            }
        }
    }
}
