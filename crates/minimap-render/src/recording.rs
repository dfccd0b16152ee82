#![forbid(unsafe_code)]

//! Draw-call recorder.
//!
//! `RecordingSurface` implements [`Surface`] by appending a [`DrawOp`] for
//! every call instead of touching pixels. Tests use it to assert on the exact
//! blit rectangles and text placements the widget issues, independent of any
//! raster backend.

use crate::color::PackedRgba;
use crate::geometry::Rect;
use crate::surface::Surface;
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};

static SURFACE_ID_COUNTER: AtomicU32 = AtomicU32::new(0);

fn next_surface_id() -> SurfaceId {
    SurfaceId(SURFACE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Identity of a recording surface, so image draws can name their source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SurfaceId(pub u32);

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    SetSize {
        width: u32,
        height: u32,
    },
    FillRect {
        rect: Rect,
        color: PackedRgba,
    },
    ClearRect {
        rect: Rect,
    },
    FillText {
        text: String,
        x: f64,
        baseline: f64,
        font_px: u32,
        color: PackedRgba,
    },
    DrawImage {
        src: SurfaceId,
        src_size: (u32, u32),
        src_rect: Rect,
        dst_rect: Rect,
    },
}

/// A surface that records draw calls.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    id: SurfaceId,
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: next_surface_id(),
            width,
            height,
            ops: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// All calls recorded so far, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded calls.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Recorded image draws, in order.
    pub fn image_draws(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::DrawImage { .. }))
    }

    /// Recorded text lines, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ops.push(DrawOp::SetSize { width, height });
    }

    fn create_offscreen(&self, width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    fn fill_rect(&mut self, rect: Rect, color: PackedRgba) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::ClearRect { rect });
    }

    fn fill_text(&mut self, text: &str, x: f64, baseline: f64, font_px: u32, color: PackedRgba) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            baseline,
            font_px,
            color,
        });
    }

    fn draw_image(&mut self, src: &Self, src_rect: Rect, dst_rect: Rect) {
        self.ops.push(DrawOp::DrawImage {
            src: src.id,
            src_size: (src.width, src.height),
            src_rect,
            dst_rect,
        });
    }
}
