#![forbid(unsafe_code)]

//! The visor: a translucent overlay marking the editor's visible rows, and
//! the press / move / release state machine that drags it.
//!
//! ```text
//! Idle ──press──▶ Pressed ──move (grabbed)──▶ DraggingVisor
//!                  │  ▲                           │
//!                  │  └──move (missed)            │
//!                  └──────release──────▶ Idle ◀───┘ release
//!                         (jump if never grabbed)
//! ```
//!
//! The tracker only moves the requested visor top. Clamping happens when a
//! frame is composited, and the widget feeds the clamped value back through
//! [`VisorTracker::set_top`], so the next hit test matches what
//! is on screen.

use crate::event::PointerEvent;
use crate::geometry;
use minimap_render::{PackedRgba, Surface};

/// Drag interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// No button held.
    #[default]
    Idle,
    /// Button held, visor not moved yet. A press that missed the visor
    /// stays here until release.
    Pressed {
        /// Pointer Y at press.
        y: f64,
        /// Offset from the visor top when the press landed inside the visor.
        grab: Option<f64>,
    },
    /// Button held over a grabbed visor that has moved.
    DraggingVisor {
        /// Offset from the visor top to the pointer.
        grab: f64,
    },
}

impl Interaction {
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Grab offset if the current gesture holds the visor.
    #[must_use]
    pub fn grab(&self) -> Option<f64> {
        match *self {
            Self::Pressed { grab, .. } => grab,
            Self::DraggingVisor { grab } => Some(grab),
            Self::Idle => None,
        }
    }
}

/// Visor overlay, position, and drag state.
#[derive(Debug)]
pub struct VisorTracker<S> {
    overlay: S,
    height: f64,
    top: f64,
    interaction: Interaction,
}

impl<S: Surface> VisorTracker<S> {
    /// Build the overlay for `visible_rows` editor rows over a `width`-wide canvas.
    pub fn new(like: &S, width: u32, visible_rows: usize, line_height: u32, color: PackedRgba) -> Self {
        let (overlay, height) = build_overlay(like, width, visible_rows, line_height, color);
        Self {
            overlay,
            height,
            top: 0.0,
            interaction: Interaction::Idle,
        }
    }

    /// Rebuild the overlay after the canvas or viewport changed size.
    /// The visor keeps its top; the next frame re-clamps it.
    pub fn resize(&mut self, like: &S, width: u32, visible_rows: usize, line_height: u32, color: PackedRgba) {
        (self.overlay, self.height) = build_overlay(like, width, visible_rows, line_height, color);
    }

    #[inline]
    #[must_use]
    pub fn overlay(&self) -> &S {
        &self.overlay
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Requested visor top. Out of range while a drag overshoots.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[inline]
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Move the visor to `top` without touching the interaction.
    pub fn set_top(&mut self, top: f64) {
        self.top = top;
    }

    /// Begin a gesture at `y`. Grabs the visor when `y` is strictly inside it.
    pub fn press(&mut self, y: f64) {
        let grab = geometry::hit_visor(y, self.top, self.height).then(|| y - self.top);
        self.interaction = Interaction::Pressed { y, grab };
    }

    /// Pointer moved to `y`. Returns `true` when the visor moved.
    pub fn drag_to(&mut self, y: f64) -> bool {
        match self.interaction {
            Interaction::Idle | Interaction::Pressed { grab: None, .. } => false,
            Interaction::Pressed {
                grab: Some(grab), ..
            }
            | Interaction::DraggingVisor { grab } => {
                self.top = y - grab;
                self.interaction = Interaction::DraggingVisor { grab };
                true
            }
        }
    }

    /// End the gesture. Returns `true` when the release jumped the visor:
    /// the visor was never grabbed and the release landed on the minimap.
    pub fn release(&mut self, event: &PointerEvent) -> bool {
        let grabbed = self.interaction.grab().is_some();
        self.interaction = Interaction::Idle;
        if grabbed || !event.on_minimap() {
            return false;
        }
        self.top = geometry::jump_visor_top(event.y, self.height);
        true
    }

    /// Drop any gesture in progress.
    pub fn cancel(&mut self) {
        self.interaction = Interaction::Idle;
    }
}

fn build_overlay<S: Surface>(
    like: &S,
    width: u32,
    visible_rows: usize,
    line_height: u32,
    color: PackedRgba,
) -> (S, f64) {
    let height = u32::try_from(visible_rows)
        .unwrap_or(u32::MAX)
        .saturating_mul(line_height);
    let mut overlay = like.create_offscreen(width, height);
    let bounds = overlay.bounds();
    overlay.fill_rect(bounds, color);
    (overlay, f64::from(height))
}
