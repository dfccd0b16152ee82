#![forbid(unsafe_code)]

//! Host-agnostic input events and listener bookkeeping.
//!
//! Adapters translate their native pointer events into [`PointerEvent`]s with
//! a Y coordinate relative to the minimap surface. Whether the event landed on
//! the minimap or elsewhere in the document matters only for release: a
//! release outside the minimap cancels a click-to-jump.

use bitflags::bitflags;

/// Pointer gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
}

/// Where the pointer event was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerTarget {
    /// The minimap surface itself.
    #[default]
    Minimap,
    /// Anywhere else (document-level listener).
    Elsewhere,
}

/// A pointer event in minimap surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Vertical position in pixels from the top of the minimap surface.
    pub y: f64,
    pub target: PointerTarget,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(phase: PointerPhase, y: f64, target: PointerTarget) -> Self {
        Self { phase, y, target }
    }

    /// Press on the minimap.
    #[must_use]
    pub const fn press(y: f64) -> Self {
        Self::new(PointerPhase::Press, y, PointerTarget::Minimap)
    }

    /// Move over the minimap.
    #[must_use]
    pub const fn move_to(y: f64) -> Self {
        Self::new(PointerPhase::Move, y, PointerTarget::Minimap)
    }

    /// Release on the minimap.
    #[must_use]
    pub const fn release(y: f64) -> Self {
        Self::new(PointerPhase::Release, y, PointerTarget::Minimap)
    }

    /// Release delivered by the document, outside the minimap.
    #[must_use]
    pub const fn release_outside(y: f64) -> Self {
        Self::new(PointerPhase::Release, y, PointerTarget::Elsewhere)
    }

    #[inline]
    #[must_use]
    pub fn on_minimap(&self) -> bool {
        self.target == PointerTarget::Minimap
    }
}

bitflags! {
    /// Event sources a live minimap is subscribed to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        const POINTER_PRESS    = 0b0000_0001;
        const POINTER_MOVE     = 0b0000_0010;
        const POINTER_RELEASE  = 0b0000_0100;
        /// Release anywhere in the document, to end drags that leave the surface.
        const DOCUMENT_RELEASE = 0b0000_1000;
        const HOST_SCROLL      = 0b0001_0000;
    }
}

impl Listeners {
    /// Every subscription an active minimap holds.
    pub const ACTIVE: Self = Self::all();
}
