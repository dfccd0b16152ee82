#![forbid(unsafe_code)]

//! Frame composition: background, bitmap window, visor.

use crate::geometry::{self, BlitPlan, Layout, LayoutCase, LayoutInput};
use crate::visor::VisorTracker;
use minimap_render::{PackedRgba, Rect, Surface};
use serde::Serialize;

/// What one render pass drew.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub case: LayoutCase,
    /// First bitmap row copied to the canvas.
    pub source_y: f64,
    /// Bitmap rows copied, or 0 when nothing was blitted.
    pub source_height: f64,
    /// Visor top as drawn.
    pub visor_top: f64,
    pub visor_height: f64,
    pub normal: f64,
    /// Bitmap pixel offset the host was (or would be) scrolled to.
    pub scroll_top: f64,
    /// Line pushed to the host editor, when the frame was user-driven.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrolled_to_line: Option<usize>,
}

impl FrameReport {
    /// One JSON object per line, for test and replay logs.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Paints frames onto the on-screen surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compositor {
    margin_right: u32,
    background: PackedRgba,
}

impl Compositor {
    #[must_use]
    pub const fn new(margin_right: u32, background: PackedRgba) -> Self {
        Self {
            margin_right,
            background,
        }
    }

    /// Resolve the layout for the current geometry and draw one frame.
    pub fn composite<S: Surface>(
        &self,
        canvas: &mut S,
        bitmap: Option<&S>,
        visor: &VisorTracker<S>,
        normal: f64,
    ) -> FrameReport {
        let layout = geometry::resolve_layout(LayoutInput {
            canvas_height: f64::from(canvas.height()),
            bitmap_height: f64::from(bitmap.map_or(0, |b| b.height())),
            visor_height: visor.height(),
            visor_top: visor.top(),
            normal,
        });

        let bounds = canvas.bounds();
        canvas.fill_rect(bounds, self.background);

        let blit = bitmap.and_then(|bitmap| {
            let plan = geometry::plan_blit(
                canvas.width(),
                canvas.height(),
                bitmap.width(),
                bitmap.height(),
                layout.source_y,
                self.margin_right,
            )?;
            canvas.draw_image(bitmap, plan.src, plan.dst);
            Some(plan)
        });

        let overlay = visor.overlay();
        if !overlay.is_empty() {
            let src = overlay.bounds();
            let dst = Rect::new(0.0, layout.visor_top, src.width, src.height);
            canvas.draw_image(overlay, src, dst);
        }

        report(layout, blit, visor.height(), normal)
    }
}

fn report(layout: Layout, blit: Option<BlitPlan>, visor_height: f64, normal: f64) -> FrameReport {
    let (source_y, source_height) = blit.map_or((0.0, 0.0), |plan| (plan.src.y, plan.src.height));
    FrameReport {
        case: layout.case,
        source_y,
        source_height,
        visor_top: layout.visor_top,
        visor_height,
        normal,
        scroll_top: layout.scroll_top,
        scrolled_to_line: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimap_render::{DrawOp, RecordingSurface};

    fn setup(
        canvas_h: u32,
        bitmap_h: u32,
        visible_rows: usize,
    ) -> (RecordingSurface, RecordingSurface, VisorTracker<RecordingSurface>) {
        let canvas = RecordingSurface::new(200, canvas_h);
        let bitmap = canvas.create_offscreen(200, bitmap_h);
        let visor = VisorTracker::new(&canvas, 200, visible_rows, 4, PackedRgba::WHITE);
        (canvas, bitmap, visor)
    }

    #[test]
    fn frame_draws_background_bitmap_then_visor() {
        let (mut canvas, bitmap, visor) = setup(600, 20000, 50);
        let report = Compositor::new(2, PackedRgba::BLACK).composite(&mut canvas, Some(&bitmap), &visor, 0.0);
        let ops = canvas.ops();
        assert_eq!(ops.len(), 3);
        assert!(matches!(ops[0], DrawOp::FillRect { color: PackedRgba::BLACK, .. }));
        match &ops[1] {
            DrawOp::DrawImage { src, src_rect, dst_rect, .. } => {
                assert_eq!(*src, bitmap.id());
                assert_eq!(*src_rect, Rect::new(0.0, 0.0, 200.0, 600.0));
                assert_eq!(*dst_rect, Rect::new(0.0, 0.0, 198.0, 600.0));
            }
            other => panic!("expected bitmap blit, got {other:?}"),
        }
        match &ops[2] {
            DrawOp::DrawImage { src, dst_rect, .. } => {
                assert_eq!(*src, visor.overlay().id());
                assert_eq!(*dst_rect, Rect::new(0.0, 0.0, 200.0, 200.0));
            }
            other => panic!("expected visor draw, got {other:?}"),
        }
        assert_eq!(report.case, LayoutCase::Scrolling);
        assert_eq!(report.source_height, 600.0);
    }

    #[test]
    fn empty_bitmap_skips_blit() {
        let (mut canvas, bitmap, visor) = setup(600, 0, 50);
        let report = Compositor::new(2, PackedRgba::BLACK).composite(&mut canvas, Some(&bitmap), &visor, 0.0);
        assert_eq!(canvas.image_draws().count(), 1);
        assert_eq!(report.source_height, 0.0);
        assert_eq!(report.case, LayoutCase::FitsCanvas);
    }

    #[test]
    fn missing_bitmap_draws_background_and_visor() {
        let (mut canvas, _, visor) = setup(600, 0, 50);
        let report = Compositor::new(2, PackedRgba::BLACK).composite(&mut canvas, None, &visor, 0.0);
        assert_eq!(canvas.ops().len(), 2);
        assert_eq!(report.source_height, 0.0);
        assert_eq!(report.visor_top, 0.0);
    }

    #[test]
    fn zero_row_visor_is_not_drawn() {
        let (mut canvas, bitmap, visor) = setup(600, 40, 0);
        Compositor::new(2, PackedRgba::BLACK).composite(&mut canvas, Some(&bitmap), &visor, 0.0);
        assert_eq!(canvas.image_draws().count(), 1);
    }

    #[test]
    fn report_serializes_to_one_line() {
        let (mut canvas, bitmap, visor) = setup(600, 40, 50);
        let report = Compositor::new(2, PackedRgba::BLACK).composite(&mut canvas, Some(&bitmap), &visor, 0.0);
        let line = report.to_jsonl().unwrap();
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["case"], "fits_canvas");
        assert!(value.get("scrolled_to_line").is_none());
    }
}
