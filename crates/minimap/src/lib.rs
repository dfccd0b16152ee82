#![forbid(unsafe_code)]

//! Editor minimap: a rasterized overview of a document with a draggable
//! viewport indicator (the *visor*), kept in sync with the editor's scroll
//! position in both directions.
//!
//! # Primary responsibilities
//! - **Rasterizer**: document lines → offscreen bitmap, one fixed-height row
//!   per line ([`rasterizer`]).
//! - **Visor tracker**: visor height, overlay surface, and the press / move /
//!   release interaction state machine ([`visor`]).
//! - **Compositor**: resolves the layout case, blits the visible slice of the
//!   bitmap, draws the visor, and reports what it drew ([`compositor`]).
//!
//! # How it fits together
//! [`Minimap`] owns all state. The host forwards raw events to it
//! ([`Minimap::handle_pointer`], [`Minimap::on_host_scroll`],
//! [`Minimap::resize`], [`Minimap::update_source`]); each entry point mutates
//! geometry and funnels into one render pass that draws through the
//! [`Surface`](minimap_render::Surface) trait. The host editor is reached only
//! through [`EditorHost`].
//!
//! ```
//! use minimap::{EditorHost, Minimap, PointerEvent};
//! use minimap_render::Pixmap;
//!
//! struct Editor {
//!     lines: Vec<String>,
//!     top: usize,
//! }
//!
//! impl EditorHost for Editor {
//!     type Session = Vec<String>;
//!     fn visible_row_count(&self) -> usize { 50 }
//!     fn first_visible_row(&self) -> usize { self.top }
//!     fn scroll_to_line(&mut self, line: usize) { self.top = line; }
//!     fn session(&self) -> &Vec<String> { &self.lines }
//! }
//!
//! let editor = Editor { lines: vec!["fn main() {}".to_string(); 1000], top: 0 };
//! let mut map = Minimap::new(editor, Pixmap::new(200, 600))?;
//!
//! // Click below the visor: the visor re-centers on the click point and the
//! // editor scrolls to match.
//! map.handle_pointer(PointerEvent::press(500.0))?;
//! map.handle_pointer(PointerEvent::release(500.0))?;
//! assert!(map.editor().top > 0);
//! # Ok::<(), minimap::MinimapError>(())
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod rasterizer;
pub mod visor;
pub mod widget;

pub use compositor::{Compositor, FrameReport};
pub use config::{ConfigError, MinimapConfig};
pub use error::MinimapError;
pub use event::{Listeners, PointerEvent, PointerPhase, PointerTarget};
pub use geometry::LayoutCase;
pub use host::{EditorHost, TextSession};
pub use rasterizer::Rasterizer;
pub use visor::{Interaction, VisorTracker};
pub use widget::{Lifecycle, Minimap};
