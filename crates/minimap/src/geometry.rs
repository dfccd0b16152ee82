#![forbid(unsafe_code)]

//! Pure minimap geometry.
//!
//! Everything here is a total function of its inputs: zero and negative
//! denominators are guarded, NaN collapses to zero, and positions are clamped
//! into range. Event handlers in [`crate::widget`] are thin adapters over these
//! functions, so the interesting arithmetic is testable without a surface.
//!
//! # Layout cases
//!
//! | Case | Condition | Bitmap source | Visor | Pushed offset |
//! |------|-----------|---------------|-------|---------------|
//! | [`FitsCanvas`](LayoutCase::FitsCanvas) | bitmap < canvas, visor < canvas | `0` | clamped to `[0, canvas − visor]` | clamped visor top |
//! | [`FitsVisor`](LayoutCase::FitsVisor) | otherwise, visor taller than the drawable height | `0` | `0` | `0` |
//! | [`Scrolling`](LayoutCase::Scrolling) | bitmap ≥ canvas, visor fits | `top − visorTop` | clamped | `normal × (bitmap − visor)` |

use minimap_render::Rect;
use serde::Serialize;

/// Pixel height of `lines` document lines.
#[inline]
#[must_use]
pub fn to_height(lines: usize, line_height: u32) -> f64 {
    lines as f64 * f64::from(line_height)
}

/// Document line for a pixel offset into the bitmap, rounding up.
///
/// Negative and non-finite offsets map to line 0.
#[must_use]
pub fn to_line(y: f64, line_height: u32) -> usize {
    if !y.is_finite() || y <= 0.0 || line_height == 0 {
        return 0;
    }
    (y / f64::from(line_height)).ceil() as usize
}

#[inline]
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Normalized scroll position for a visor top: `visor_top / (canvas − visor)`
/// clamped to `[0, 1]`. A non-positive travel yields 0.
#[must_use]
pub fn normalize(visor_top: f64, canvas_height: f64, visor_height: f64) -> f64 {
    let travel = canvas_height - visor_height;
    if travel.is_nan() || travel <= 0.0 {
        return 0.0;
    }
    clamp_unit(visor_top / travel)
}

/// Normalized scroll position for an editor whose first visible row is
/// `top_line`. A document no longer than the viewport yields 0.
#[must_use]
pub fn normal_from_scroll(top_line: usize, total_lines: usize, visible_lines: usize) -> f64 {
    let scrollable = total_lines as f64 - visible_lines as f64;
    if scrollable <= 0.0 {
        return 0.0;
    }
    clamp_unit(top_line as f64 / scrollable)
}

/// Visor top that corresponds to a normalized position.
#[must_use]
pub fn visor_top_for_normal(normal: f64, canvas_height: f64, visor_height: f64) -> f64 {
    clamp_unit(normal) * (canvas_height - visor_height).max(0.0)
}

/// Clamp a visor top so the visor stays inside `0..limit`.
#[must_use]
pub fn clamp_visor_top(visor_top: f64, limit: f64, visor_height: f64) -> f64 {
    let max = (limit - visor_height).max(0.0);
    if visor_top.is_nan() {
        return 0.0;
    }
    visor_top.clamp(0.0, max)
}

/// Whether `y` falls strictly inside the visor.
#[inline]
#[must_use]
pub fn hit_visor(y: f64, visor_top: f64, visor_height: f64) -> bool {
    visor_top < y && y < visor_top + visor_height
}

/// Visor top that centers the visor on `y`.
#[inline]
#[must_use]
pub fn jump_visor_top(y: f64, visor_height: f64) -> f64 {
    y - visor_height / 2.0
}

/// Which relationship between bitmap, canvas, and visor applies to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCase {
    /// The visor covers the whole drawable height; nothing scrolls.
    FitsVisor,
    /// The whole bitmap fits on the canvas; the visor moves over it.
    FitsCanvas,
    /// The bitmap is taller than the canvas; a window of it scrolls with the visor.
    Scrolling,
}

impl LayoutCase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FitsVisor => "fits_visor",
            Self::FitsCanvas => "fits_canvas",
            Self::Scrolling => "scrolling",
        }
    }
}

/// Inputs to [`resolve_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub canvas_height: f64,
    pub bitmap_height: f64,
    pub visor_height: f64,
    /// Requested visor top, possibly out of range.
    pub visor_top: f64,
    /// Current normalized scroll position.
    pub normal: f64,
}

/// A resolved frame layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub case: LayoutCase,
    /// Bitmap row drawn at the top of the canvas, before blit clamping.
    pub source_y: f64,
    /// Visor top after clamping.
    pub visor_top: f64,
    /// Pixel offset into the bitmap that the host should scroll to.
    pub scroll_top: f64,
}

/// Decide the layout case and the offsets for one frame.
#[must_use]
pub fn resolve_layout(input: LayoutInput) -> Layout {
    let LayoutInput {
        canvas_height: ch,
        bitmap_height: bh,
        visor_height: vh,
        visor_top,
        normal,
    } = input;

    let fits_visor = Layout {
        case: LayoutCase::FitsVisor,
        source_y: 0.0,
        visor_top: 0.0,
        scroll_top: 0.0,
    };

    if bh < ch {
        if vh >= ch {
            return fits_visor;
        }
        let clamped = clamp_visor_top(visor_top, ch, vh);
        return Layout {
            case: LayoutCase::FitsCanvas,
            source_y: 0.0,
            visor_top: clamped,
            scroll_top: clamped,
        };
    }

    if vh > ch {
        return fits_visor;
    }
    let clamped = clamp_visor_top(visor_top, ch.min(bh), vh);
    let scroll_top = clamp_unit(normal) * (bh - vh).max(0.0);
    Layout {
        case: LayoutCase::Scrolling,
        source_y: scroll_top - clamped,
        visor_top: clamped,
        scroll_top,
    }
}

/// Source and destination rectangles for the bitmap blit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlitPlan {
    pub src: Rect,
    pub dst: Rect,
}

/// Plan the bitmap-to-canvas copy for a frame starting at bitmap row `y`.
///
/// Returns `None` when the bitmap has no area.
#[must_use]
pub fn plan_blit(
    canvas_width: u32,
    canvas_height: u32,
    bitmap_width: u32,
    bitmap_height: u32,
    y: f64,
    margin_right: u32,
) -> Option<BlitPlan> {
    if bitmap_width == 0 || bitmap_height == 0 {
        return None;
    }
    let bh = f64::from(bitmap_height);
    let w = f64::from(canvas_width.min(bitmap_width));
    let mut h = f64::from(canvas_height.min(bitmap_height));
    if bh < y + h {
        h -= y + h - bh;
    }
    let dw = (w - f64::from(margin_right)).max(1.0);
    let h = h.max(1.0);
    let w = w.max(1.0);
    let y = if y.is_nan() { 0.0 } else { y.max(0.0) };
    Some(BlitPlan {
        src: Rect::new(0.0, y, w, h),
        dst: Rect::new(0.0, 0.0, dw, h),
    })
}
