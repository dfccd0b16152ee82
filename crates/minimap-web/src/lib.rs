#![forbid(unsafe_code)]

//! Browser host for the minimap widget.
//!
//! # Role in the workspace
//! `minimap-web` adapts [`minimap::Minimap`] to a web page: drawing goes to an
//! `HtmlCanvasElement` through `CanvasSurface`, pointer input comes from DOM
//! mouse listeners, and the editor is any JS object implementing the
//! `MinimapEditor` contract below. The JS-facing class is `MinimapWeb`.
//!
//! ```text
//! interface MinimapEditor {
//!   visibleRowCount(): number;
//!   firstVisibleRow(): number;
//!   scrollToLine(line: number): void;
//!   lines(): string[];
//!   addScrollListener(listener: () => void): void;
//!   removeScrollListener(listener: () => void): void;
//! }
//! ```
//!
//! Browser-only modules compile for `wasm32` only. Coordinate extraction,
//! option parsing, and the listener-to-DOM mapping are plain Rust and tested
//! natively.

pub mod bindings;
pub mod options;
pub mod pointer;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use wasm::MinimapWeb;

pub use bindings::{DomBinding, DomTarget, dom_bindings};
pub use options::{OptionsError, config_from_json};
pub use pointer::{pointer_y, row_from_js};
