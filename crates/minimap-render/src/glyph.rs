#![forbid(unsafe_code)]

//! Procedural micro-glyphs for minimap-scale text.
//!
//! At 3–6 px per line no real font is legible, so the software surface draws
//! each grapheme as a solid ink bar whose height follows the character's
//! shape class (caps and digits full height, lowercase three quarters,
//! punctuation half). Layout is monospace: every grapheme advances by its
//! display width times a cell advance of roughly 0.6 em.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One inked glyph box, relative to the text origin and baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBox {
    /// Left edge in pixels from the text origin.
    pub x: u32,
    /// Ink width in pixels.
    pub width: u32,
    /// Ink height in pixels above the baseline.
    pub height: u32,
}

/// Horizontal advance of a single-width cell at `font_px`.
#[inline]
#[must_use]
pub fn cell_advance(font_px: u32) -> u32 {
    (font_px.saturating_mul(3).saturating_add(2) / 5).max(1)
}

/// Ink height for one grapheme, or 0 for blanks.
#[must_use]
pub fn ink_height(grapheme: &str, font_px: u32) -> u32 {
    let Some(first) = grapheme.chars().next() else {
        return 0;
    };
    if first.is_whitespace() || first.is_control() {
        return 0;
    }
    let full = font_px.max(1);
    if first.is_ascii_lowercase() {
        return (full * 3).div_ceil(4).max(1);
    }
    if first.is_ascii_punctuation() && !matches!(first, '(' | ')' | '[' | ']' | '{' | '}' | '|' | '/' | '\\') {
        return full.div_ceil(2).max(1);
    }
    full
}

/// Lay out `text` as glyph boxes. Blank graphemes advance without ink.
#[must_use]
pub fn layout(text: &str, font_px: u32) -> Vec<GlyphBox> {
    let advance = cell_advance(font_px);
    let mut boxes = Vec::with_capacity(text.len());
    let mut pen = 0u32;
    for grapheme in text.graphemes(true) {
        let cells = u32::try_from(grapheme.width()).unwrap_or(1).max(1);
        let span = advance.saturating_mul(cells);
        let height = ink_height(grapheme, font_px);
        if height > 0 {
            // Leave a one-pixel gutter between neighbours when there is room.
            let width = if span > 1 { span - 1 } else { span };
            boxes.push(GlyphBox {
                x: pen,
                width,
                height,
            });
        }
        pen = pen.saturating_add(span);
    }
    boxes
}

/// Total advance of `text` in pixels.
#[must_use]
pub fn text_advance(text: &str, font_px: u32) -> u32 {
    let advance = cell_advance(font_px);
    text.graphemes(true)
        .map(|g| u32::try_from(g.width()).unwrap_or(1).max(1))
        .fold(0u32, |acc, cells| acc.saturating_add(advance.saturating_mul(cells)))
}
