//! Host text-control abstraction layer.
//!
//! Provides a `TextControl` trait for the widget that owns the text and
//! selection, and two in-memory implementations:
//! - `MemoryControl`, an honest host whose offsets index the stored text
//!   one-for-one
//! - `QuirkyControl`, which reproduces a host whose selection API reports
//!   offsets as if every two-character line ending were a single character

use ropey::Rope;

use crate::text;

/// Line-ending conventions a host may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Cr,
    Lf,
    CrLf,
}

impl LineEnding {
    /// The literal terminator string for this convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Cr => "\r",
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Parse a literal terminator string, if it is one we recognize.
    pub fn from_terminator(s: &str) -> Option<Self> {
        match s {
            "\r" => Some(LineEnding::Cr),
            "\n" => Some(LineEnding::Lf),
            "\r\n" => Some(LineEnding::CrLf),
            _ => None,
        }
    }
}

/// Capability set the engine needs from its host text widget.
///
/// Selection offsets are in the host's own reporting units, which need not
/// match offsets into `get_text` (see [`EditBox`](crate::EditBox), which
/// translates between the two). Hosts clamp out-of-range selection values
/// to their own bounds, as real text widgets do.
pub trait TextControl {
    /// Full buffer contents.
    fn get_text(&self) -> String;

    /// Replace the buffer contents, collapsing the selection to the start.
    fn set_text(&mut self, text: &str);

    fn selection_start(&self) -> usize;

    fn set_selection_start(&mut self, start: usize);

    fn selection_length(&self) -> usize;

    fn set_selection_length(&mut self, length: usize);

    /// The text currently covered by the selection, as the host reports it.
    fn selected_text(&self) -> String;

    /// Replace the selected range with `text`. Afterwards the selection
    /// covers exactly the text just inserted.
    fn set_selected_text(&mut self, text: &str);

    /// The literal terminator string of the host's convention.
    fn line_ending(&self) -> String;
}

/// An honest in-memory host: selection offsets index the stored text
/// one-for-one.
#[derive(Debug, Clone)]
pub struct MemoryControl {
    rope: Rope,
    start: usize,
    length: usize,
    ending: LineEnding,
}

impl MemoryControl {
    pub fn new(text: &str, ending: LineEnding) -> Self {
        Self {
            rope: Rope::from_str(text),
            start: 0,
            length: 0,
            ending,
        }
    }

    fn clamp(&mut self) {
        let len = self.rope.len_chars();
        self.start = self.start.min(len);
        self.length = self.length.min(len - self.start);
    }
}

impl TextControl for MemoryControl {
    fn get_text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.start = 0;
        self.length = 0;
    }

    fn selection_start(&self) -> usize {
        self.start
    }

    fn set_selection_start(&mut self, start: usize) {
        self.start = start;
        self.clamp();
    }

    fn selection_length(&self) -> usize {
        self.length
    }

    fn set_selection_length(&mut self, length: usize) {
        self.length = length;
        self.clamp();
    }

    fn selected_text(&self) -> String {
        self.rope.slice(self.start..self.start + self.length).to_string()
    }

    fn set_selected_text(&mut self, text: &str) {
        self.rope.remove(self.start..self.start + self.length);
        self.rope.insert(self.start, text);
        self.length = text.chars().count();
    }

    fn line_ending(&self) -> String {
        self.ending.as_str().to_string()
    }
}

/// Reproduces a host text widget whose selection API reports offsets as if
/// every `\r\n` were a single character, while `get_text` still returns the
/// two-character form. Useful for exercising the engine's position
/// translation, and as a template for binding real hosts that behave this
/// way.
#[derive(Debug, Clone)]
pub struct QuirkyControl {
    text: String,
    // Selection bookkeeping in the host's collapsed units.
    start: usize,
    length: usize,
}

impl QuirkyControl {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            start: 0,
            length: 0,
        }
    }

    /// Reported length of the whole buffer, `\r\n` counted once.
    fn collapsed_len(&self) -> usize {
        text::char_len(&text::normalize_newlines(&self.text))
    }

    /// Byte offset into the stored text for a collapsed-unit offset.
    fn byte_for_unit(&self, unit: usize) -> usize {
        let mut seen = 0usize;
        let mut iter = self.text.char_indices().peekable();
        while let Some((byte, ch)) = iter.next() {
            if seen == unit {
                return byte;
            }
            if ch == '\r' && matches!(iter.peek(), Some((_, '\n'))) {
                iter.next();
            }
            seen += 1;
        }
        self.text.len()
    }

    fn clamp(&mut self) {
        let len = self.collapsed_len();
        self.start = self.start.min(len);
        self.length = self.length.min(len - self.start);
    }
}

impl TextControl for QuirkyControl {
    fn get_text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.start = 0;
        self.length = 0;
    }

    fn selection_start(&self) -> usize {
        self.start
    }

    fn set_selection_start(&mut self, start: usize) {
        self.start = start;
        self.clamp();
    }

    fn selection_length(&self) -> usize {
        self.length
    }

    fn set_selection_length(&mut self, length: usize) {
        self.length = length;
        self.clamp();
    }

    fn selected_text(&self) -> String {
        let from = self.byte_for_unit(self.start);
        let to = self.byte_for_unit(self.start + self.length);
        text::normalize_newlines(&self.text[from..to])
    }

    fn set_selected_text(&mut self, text: &str) {
        let from = self.byte_for_unit(self.start);
        let to = self.byte_for_unit(self.start + self.length);
        self.text.replace_range(from..to, text);
        self.length = text::char_len(&text::normalize_newlines(text));
    }

    fn line_ending(&self) -> String {
        LineEnding::CrLf.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_control_clamps_selection() {
        let mut control = MemoryControl::new("hello", LineEnding::Lf);
        control.set_selection_start(99);
        assert_eq!(control.selection_start(), 5);
        control.set_selection_start(2);
        control.set_selection_length(99);
        assert_eq!(control.selection_length(), 3);
    }

    #[test]
    fn test_memory_control_replacement_selects_inserted_text() {
        let mut control = MemoryControl::new("hello world", LineEnding::Lf);
        control.set_selection_start(6);
        control.set_selection_length(5);
        control.set_selected_text("there");
        assert_eq!(control.get_text(), "hello there");
        assert_eq!(control.selection_start(), 6);
        assert_eq!(control.selected_text(), "there");
    }

    #[test]
    fn test_quirky_control_reports_collapsed_offsets() {
        let mut control = QuirkyControl::new("aa\r\nbb");
        // "b" is at reported offset 3, not 4.
        control.set_selection_start(3);
        control.set_selection_length(2);
        assert_eq!(control.selected_text(), "bb");
    }

    #[test]
    fn test_quirky_control_normalizes_selected_newlines() {
        let mut control = QuirkyControl::new("aa\r\nbb");
        control.set_selection_start(1);
        control.set_selection_length(3);
        // The reported sample collapses the ending to a lone '\r'.
        assert_eq!(control.selected_text(), "a\rb");
        assert_eq!(control.selection_length(), 3);
    }

    #[test]
    fn test_quirky_control_select_all_under_reports() {
        let mut control = QuirkyControl::new("aa\r\nbb");
        let true_len = control.get_text().chars().count();
        control.set_selection_start(0);
        control.set_selection_length(true_len);
        assert_eq!(control.selection_length(), true_len - 1);
    }

    #[test]
    fn test_quirky_control_replacement() {
        let mut control = QuirkyControl::new("aa\r\nbb");
        control.set_selection_start(3);
        control.set_selection_length(2);
        control.set_selected_text("xyz");
        assert_eq!(control.get_text(), "aa\r\nxyz");
        assert_eq!(control.selection_length(), 3);
        assert_eq!(control.selected_text(), "xyz");
    }
}
