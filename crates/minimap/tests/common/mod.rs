#![allow(dead_code)]

//! Shared fixtures for minimap integration tests.

use minimap::{EditorHost, FrameReport, Minimap, MinimapConfig};
use minimap_render::{Pixmap, RecordingSurface};
use tracing::Level;

pub const CANVAS_WIDTH: u32 = 200;
pub const CANVAS_HEIGHT: u32 = 600;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn jsonl_enabled() -> bool {
    std::env::var("E2E_JSONL").is_ok() || std::env::var("CI").is_ok()
}

/// Print a frame report as one JSON line when JSONL logging is on.
pub fn log_frame(step: &str, frame: &FrameReport) {
    if !jsonl_enabled() {
        return;
    }
    if let Ok(line) = frame.to_jsonl() {
        eprintln!("{{\"step\":\"{step}\",\"frame\":{line}}}");
    }
}

/// An editor stand-in that records every scroll request.
#[derive(Debug, Clone)]
pub struct FakeEditor {
    pub lines: Vec<String>,
    pub visible: usize,
    pub top: usize,
    pub scrolls: Vec<usize>,
}

impl FakeEditor {
    pub fn new(line_count: usize, visible: usize) -> Self {
        Self {
            lines: (0..line_count)
                .map(|i| format!("    fn line_{i}() -> usize {{ {i} }}"))
                .collect(),
            visible,
            top: 0,
            scrolls: Vec::new(),
        }
    }
}

impl EditorHost for FakeEditor {
    type Session = Vec<String>;

    fn visible_row_count(&self) -> usize {
        self.visible
    }

    fn first_visible_row(&self) -> usize {
        self.top
    }

    fn scroll_to_line(&mut self, line: usize) {
        self.top = line;
        self.scrolls.push(line);
    }

    fn session(&self) -> &Vec<String> {
        &self.lines
    }
}

pub fn recording_map(line_count: usize, visible: usize) -> Minimap<RecordingSurface, FakeEditor> {
    Minimap::new(
        FakeEditor::new(line_count, visible),
        RecordingSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT),
    )
    .expect("default config is valid")
}

pub fn pixmap_map(line_count: usize, visible: usize) -> Minimap<Pixmap, FakeEditor> {
    Minimap::with_config(
        FakeEditor::new(line_count, visible),
        Pixmap::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        MinimapConfig::default(),
    )
    .expect("default config is valid")
}
