#![forbid(unsafe_code)]

//! Drawing surfaces for the minimap widget.
//!
//! # Role in the workspace
//! `minimap-render` is the raster layer. The widget crate (`minimap`) never
//! talks to a canvas API directly: it draws through the [`Surface`] trait, so
//! the same rasterizer and compositor code runs against a browser canvas, a
//! software [`Pixmap`], or a [`RecordingSurface`] in tests.
//!
//! # Primary responsibilities
//! - **Surface**: the minimal canvas contract (create offscreen, fill rect,
//!   clear rect, fill text, draw image region, get/set size).
//! - **Pixmap**: software RGBA surface with source-over blending and a
//!   procedural micro-glyph text rasterizer.
//! - **RecordingSurface**: a fake that logs every draw call for assertions.
//! - **PackedRgba / Rect**: the color and float-rectangle value types shared
//!   by all of the above.

pub mod color;
pub mod geometry;
pub mod glyph;
pub mod pixmap;
pub mod recording;
pub mod surface;

pub use color::PackedRgba;
pub use geometry::Rect;
pub use pixmap::Pixmap;
pub use recording::{DrawOp, RecordingSurface, SurfaceId};
pub use surface::Surface;
