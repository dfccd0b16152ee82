#![forbid(unsafe_code)]

//! The minimap widget.
//!
//! # Lifecycle
//! `Constructed → Active → Destroyed`. The constructor captures the document,
//! builds the bitmap and visor, renders once, then marks the instance active.
//! After [`Minimap::destroy`] every operation fails with
//! [`MinimapError::Destroyed`]; destroying twice is a logged no-op.
//!
//! # Render flow
//! Every entry point updates geometry and then calls the private `render`,
//! which composites one frame and, for user-driven frames, scrolls the host
//! editor to the line under the composited top.

use crate::compositor::{Compositor, FrameReport};
use crate::config::MinimapConfig;
use crate::error::MinimapError;
use crate::event::{Listeners, PointerEvent, PointerPhase, PointerTarget};
use crate::geometry;
use crate::host::{EditorHost, TextSession};
use crate::rasterizer::Rasterizer;
use crate::visor::{Interaction, VisorTracker};
use minimap_render::Surface;
use tracing::{debug, debug_span, field, trace, warn};

/// Where a [`Minimap`] is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Being built; the first frame has not been drawn.
    Constructed,
    /// Subscribed and rendering.
    Active,
    /// Resources released.
    Destroyed,
}

/// A minimap attached to an editor and drawing onto `S`.
#[derive(Debug)]
pub struct Minimap<S: Surface, E: EditorHost> {
    editor: E,
    canvas: S,
    config: MinimapConfig,
    rasterizer: Rasterizer,
    compositor: Compositor,
    lines: Vec<String>,
    bitmap: Option<S>,
    visor: VisorTracker<S>,
    normal: f64,
    visible_lines: usize,
    listeners: Listeners,
    lifecycle: Lifecycle,
    last_frame: Option<FrameReport>,
}

impl<S: Surface, E: EditorHost> Minimap<S, E> {
    /// Attach with the default configuration.
    pub fn new(editor: E, canvas: S) -> Result<Self, MinimapError> {
        Self::with_config(editor, canvas, MinimapConfig::default())
    }

    /// Attach with an explicit configuration.
    pub fn with_config(editor: E, canvas: S, config: MinimapConfig) -> Result<Self, MinimapError> {
        config.validate()?;
        let rasterizer = Rasterizer::new(config.line_height, config.text_color);
        let compositor = Compositor::new(config.margin_right, config.background);
        let visible_lines = editor.visible_row_count();
        let visor = VisorTracker::new(
            &canvas,
            canvas.width(),
            visible_lines,
            config.line_height,
            config.visor_color,
        );
        let mut map = Self {
            editor,
            canvas,
            config,
            rasterizer,
            compositor,
            lines: Vec::new(),
            bitmap: None,
            visor,
            normal: 0.0,
            visible_lines,
            listeners: Listeners::empty(),
            lifecycle: Lifecycle::Constructed,
            last_frame: None,
        };
        let lines = map.editor.session().snapshot();
        map.install_lines(lines);
        map.lifecycle = Lifecycle::Active;
        map.listeners = Listeners::ACTIVE;
        debug!(
            width = map.canvas.width(),
            height = map.canvas.height(),
            visible_lines,
            "minimap attached"
        );
        Ok(map)
    }

    fn ensure_active(&self, operation: &'static str) -> Result<(), MinimapError> {
        if self.lifecycle == Lifecycle::Destroyed {
            return Err(MinimapError::Destroyed { operation });
        }
        Ok(())
    }

    /// Resize the on-screen surface and rebuild the visor for the editor's
    /// current viewport.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<FrameReport, MinimapError> {
        self.ensure_active("resize")?;
        self.canvas.set_size(width, height);
        self.visible_lines = self.editor.visible_row_count();
        self.visor.resize(
            &self.canvas,
            width,
            self.visible_lines,
            self.config.line_height,
            self.config.visor_color,
        );
        debug!(width, height, visible_lines = self.visible_lines, "minimap resized");
        Ok(self.render(false))
    }

    /// Replace the document snapshot with `session` and re-rasterize.
    pub fn update_source<T>(&mut self, session: &T) -> Result<FrameReport, MinimapError>
    where
        T: TextSession + ?Sized,
    {
        self.ensure_active("update_source")?;
        let lines = session.snapshot();
        Ok(self.install_lines(lines))
    }

    /// Re-read the host editor's current session.
    pub fn refresh_source(&mut self) -> Result<FrameReport, MinimapError> {
        self.ensure_active("refresh_source")?;
        let lines = self.editor.session().snapshot();
        Ok(self.install_lines(lines))
    }

    fn install_lines(&mut self, lines: Vec<String>) -> FrameReport {
        let bitmap = self
            .rasterizer
            .rasterize(&self.canvas, self.canvas.width(), &lines);
        debug!(
            line_count = lines.len(),
            bitmap_height = bitmap.height(),
            "minimap source updated"
        );
        self.bitmap = Some(bitmap);
        self.lines = lines;
        self.render(false)
    }

    /// Feed a pointer event. Returns the frame drawn, if the event moved the
    /// visor.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Option<FrameReport>, MinimapError> {
        self.ensure_active("handle_pointer")?;
        let moved = match event.phase {
            PointerPhase::Press if event.target == PointerTarget::Minimap => {
                self.visor.press(event.y);
                trace!(y = event.y, interaction = ?self.visor.interaction(), "minimap press");
                false
            }
            PointerPhase::Move if event.target == PointerTarget::Minimap => {
                let moved = self.visor.drag_to(event.y);
                trace!(y = event.y, moved, "minimap move");
                moved
            }
            PointerPhase::Press | PointerPhase::Move => false,
            PointerPhase::Release => {
                let jumped = self.visor.release(&event);
                if jumped {
                    debug!(y = event.y, visor_top = self.visor.top(), "minimap jump");
                } else {
                    trace!(y = event.y, "minimap release");
                }
                jumped
            }
        };
        if !moved {
            return Ok(None);
        }
        self.normal = geometry::normalize(
            self.visor.top(),
            f64::from(self.canvas.height()),
            self.visor.height(),
        );
        Ok(Some(self.render(true)))
    }

    /// The host editor scrolled. Moves the visor to match without scrolling
    /// the host back. Ignored while a gesture is in progress.
    pub fn on_host_scroll(&mut self) -> Result<Option<FrameReport>, MinimapError> {
        self.ensure_active("on_host_scroll")?;
        if !self.visor.interaction().is_idle() {
            debug!("host scroll suppressed during gesture");
            return Ok(None);
        }
        let top_line = self.editor.first_visible_row();
        self.normal = geometry::normal_from_scroll(top_line, self.lines.len(), self.visible_lines);
        let top = geometry::visor_top_for_normal(
            self.normal,
            f64::from(self.canvas.height()),
            self.visor.height(),
        );
        self.visor.set_top(top);
        trace!(top_line, normal = self.normal, "host scrolled");
        Ok(Some(self.render(false)))
    }

    /// Release the bitmap, the document snapshot, and all subscriptions, and
    /// clear the on-screen surface. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            warn!("minimap destroyed twice");
            return;
        }
        let bounds = self.canvas.bounds();
        self.canvas.clear_rect(bounds);
        self.bitmap = None;
        self.lines = Vec::new();
        self.visor.cancel();
        self.listeners = Listeners::empty();
        self.last_frame = None;
        self.lifecycle = Lifecycle::Destroyed;
        debug!("minimap destroyed");
    }

    fn render(&mut self, push: bool) -> FrameReport {
        let span = debug_span!("minimap_render", push, case = field::Empty);
        let _guard = span.enter();

        let mut report = self
            .compositor
            .composite(&mut self.canvas, self.bitmap.as_ref(), &self.visor, self.normal);
        span.record("case", report.case.as_str());
        self.visor.set_top(report.visor_top);

        if push {
            let line = geometry::to_line(report.scroll_top, self.config.line_height);
            self.editor.scroll_to_line(line);
            report.scrolled_to_line = Some(line);
        }
        debug!(
            source_y = report.source_y,
            visor_top = report.visor_top,
            normal = report.normal,
            scrolled_to_line = ?report.scrolled_to_line,
            "frame composited"
        );
        self.last_frame = Some(report.clone());
        report
    }

    #[inline]
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Event sources the host should keep delivering. Empty once destroyed.
    #[inline]
    #[must_use]
    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    #[must_use]
    pub fn editor(&self) -> &E {
        &self.editor
    }

    #[must_use]
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// The on-screen surface.
    #[must_use]
    pub fn canvas(&self) -> &S {
        &self.canvas
    }

    /// The rasterized document. `None` once destroyed.
    #[must_use]
    pub fn bitmap(&self) -> Option<&S> {
        self.bitmap.as_ref()
    }

    #[must_use]
    pub fn visor(&self) -> &VisorTracker<S> {
        &self.visor
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.visor.interaction()
    }

    /// Current visor top. Clamped after every frame.
    #[must_use]
    pub fn visor_top(&self) -> f64 {
        self.visor.top()
    }

    #[must_use]
    pub fn visor_height(&self) -> f64 {
        self.visor.height()
    }

    /// Normalized scroll position in `[0, 1]`.
    #[must_use]
    pub fn normal(&self) -> f64 {
        self.normal
    }

    #[must_use]
    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    /// The captured document lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Pixel height of the captured document.
    #[must_use]
    pub fn actual_height(&self) -> f64 {
        geometry::to_height(self.lines.len(), self.config.line_height)
    }

    #[must_use]
    pub fn config(&self) -> &MinimapConfig {
        &self.config
    }

    /// The most recent frame, if any has been drawn since construction.
    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameReport> {
        self.last_frame.as_ref()
    }
}
