#![forbid(unsafe_code)]

//! Contracts with the host editor.
//!
//! The minimap never owns the editor. It reads scroll state and the current
//! document through [`EditorHost`], and pushes scroll positions back through
//! [`EditorHost::scroll_to_line`].

use std::ops::Range;

/// Read access to an ordered sequence of document lines.
pub trait TextSession {
    /// Number of lines in the document.
    fn line_count(&self) -> usize;

    /// Raw text of the lines in `range`, without line terminators.
    ///
    /// Indices past the end are ignored.
    fn line_range(&self, range: Range<usize>) -> Vec<String>;

    /// Every line of the document.
    fn snapshot(&self) -> Vec<String> {
        self.line_range(0..self.line_count())
    }
}

impl<S: AsRef<str>> TextSession for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_range(&self, range: Range<usize>) -> Vec<String> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self[start..end]
            .iter()
            .map(|line| line.as_ref().to_string())
            .collect()
    }
}

impl<S: AsRef<str>> TextSession for Vec<S> {
    fn line_count(&self) -> usize {
        self.as_slice().line_count()
    }

    fn line_range(&self, range: Range<usize>) -> Vec<String> {
        self.as_slice().line_range(range)
    }
}

/// A flat string is split on `\n`; a trailing `\r` on each line is dropped.
/// The empty string is one empty line, matching an editor's empty buffer.
impl TextSession for str {
    fn line_count(&self) -> usize {
        self.split('\n').count()
    }

    fn line_range(&self, range: Range<usize>) -> Vec<String> {
        self.split('\n')
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    }
}

impl TextSession for String {
    fn line_count(&self) -> usize {
        self.as_str().line_count()
    }

    fn line_range(&self, range: Range<usize>) -> Vec<String> {
        self.as_str().line_range(range)
    }
}

#[cfg(feature = "ropey")]
impl TextSession for ropey::Rope {
    fn line_count(&self) -> usize {
        self.len_lines()
    }

    fn line_range(&self, range: Range<usize>) -> Vec<String> {
        let end = range.end.min(self.len_lines());
        (range.start.min(end)..end)
            .map(|idx| {
                let mut line = self.line(idx).to_string();
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                line
            })
            .collect()
    }
}

/// The editor the minimap is attached to.
pub trait EditorHost {
    /// Document type exposed by the editor.
    type Session: TextSession + ?Sized;

    /// Number of rows the editor shows at once.
    fn visible_row_count(&self) -> usize;

    /// Index of the first row currently shown.
    fn first_visible_row(&self) -> usize;

    /// Scroll so that `line` becomes the first visible row.
    fn scroll_to_line(&mut self, line: usize);

    /// The document currently loaded in the editor.
    fn session(&self) -> &Self::Session;
}
