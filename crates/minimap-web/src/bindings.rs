#![forbid(unsafe_code)]

//! Which DOM listeners back each minimap subscription.
//!
//! Pointer release is observed once, on the document: the listener checks
//! whether the event target is the canvas, which covers both the
//! on-minimap release and the release anywhere else.

use minimap::Listeners;

/// Where a DOM listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomTarget {
    Canvas,
    Document,
    /// Registered through the editor's `addScrollListener`.
    Editor,
}

/// One DOM (or editor) listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomBinding {
    pub target: DomTarget,
    pub event: &'static str,
}

/// Listener registrations needed to deliver `listeners`.
#[must_use]
pub fn dom_bindings(listeners: Listeners) -> Vec<DomBinding> {
    let mut out = Vec::with_capacity(4);
    if listeners.contains(Listeners::POINTER_PRESS) {
        out.push(DomBinding {
            target: DomTarget::Canvas,
            event: "mousedown",
        });
    }
    if listeners.contains(Listeners::POINTER_MOVE) {
        out.push(DomBinding {
            target: DomTarget::Canvas,
            event: "mousemove",
        });
    }
    if listeners.contains(Listeners::DOCUMENT_RELEASE) {
        out.push(DomBinding {
            target: DomTarget::Document,
            event: "mouseup",
        });
    } else if listeners.contains(Listeners::POINTER_RELEASE) {
        out.push(DomBinding {
            target: DomTarget::Canvas,
            event: "mouseup",
        });
    }
    if listeners.contains(Listeners::HOST_SCROLL) {
        out.push(DomBinding {
            target: DomTarget::Editor,
            event: "scroll",
        });
    }
    out
}
