#![forbid(unsafe_code)]

//! [`Surface`] over an HTML canvas 2D context.

use minimap_render::{PackedRgba, Rect, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// An `HtmlCanvasElement` and its 2D context.
///
/// A surface whose canvas or context could not be created is *detached*: it
/// keeps its logical size and ignores draw calls, like a canvas that is never
/// attached to the page.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: Option<HtmlCanvasElement>,
    ctx: Option<CanvasRenderingContext2d>,
    width: u32,
    height: u32,
}

impl CanvasSurface {
    /// Wrap an existing canvas. Fails when the 2D context is unavailable.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, wasm_bindgen::JsValue> {
        let ctx = context_2d(&canvas)
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("canvas 2d context unavailable"))?;
        Ok(Self {
            width: canvas.width(),
            height: canvas.height(),
            canvas: Some(canvas),
            ctx: Some(ctx),
        })
    }

    fn detached(width: u32, height: u32) -> Self {
        Self {
            canvas: None,
            ctx: None,
            width,
            height,
        }
    }

    /// The underlying element, unless detached.
    #[must_use]
    pub fn element(&self) -> Option<&HtmlCanvasElement> {
        self.canvas.as_ref()
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn create_canvas(width: u32, height: u32) -> Option<HtmlCanvasElement> {
    let document = web_sys::window()?.document()?;
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    canvas.set_width(width);
    canvas.set_height(height);
    Some(canvas)
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if let Some(canvas) = &self.canvas {
            canvas.set_width(width);
            canvas.set_height(height);
        }
    }

    fn create_offscreen(&self, width: u32, height: u32) -> Self {
        let Some(canvas) = create_canvas(width, height) else {
            return Self::detached(width, height);
        };
        match context_2d(&canvas) {
            Some(ctx) => Self {
                canvas: Some(canvas),
                ctx: Some(ctx),
                width,
                height,
            },
            None => Self::detached(width, height),
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: PackedRgba) {
        if let Some(ctx) = &self.ctx {
            ctx.set_fill_style_str(&color.to_css());
            ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        if let Some(ctx) = &self.ctx {
            ctx.clear_rect(rect.x, rect.y, rect.width, rect.height);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, baseline: f64, font_px: u32, color: PackedRgba) {
        if let Some(ctx) = &self.ctx {
            ctx.set_font(&format!("{font_px}px monospace"));
            ctx.set_text_baseline("alphabetic");
            ctx.set_fill_style_str(&color.to_css());
            let _ = ctx.fill_text(text, x, baseline);
        }
    }

    fn draw_image(&mut self, src: &Self, src_rect: Rect, dst_rect: Rect) {
        let (Some(ctx), Some(image)) = (&self.ctx, &src.canvas) else {
            return;
        };
        if src.is_empty() {
            // Drawing a zero-sized canvas throws InvalidStateError.
            return;
        }
        let _ = ctx.draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            image,
            src_rect.x,
            src_rect.y,
            src_rect.width,
            src_rect.height,
            dst_rect.x,
            dst_rect.y,
            dst_rect.width,
            dst_rect.height,
        );
    }
}
