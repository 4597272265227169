//! Current-line lookup and whole-line selection.

use crate::error::EditError;
use crate::host::TextControl;
use crate::text;

use super::EditBox;

/// The text before and after the cursor on the current logical line.
///
/// `leading + trailing` is the full line content without its terminator.
/// Recomputed per call, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineView {
    pub leading: String,
    pub trailing: String,
}

impl LineView {
    /// The full line content, terminator excluded.
    pub fn full_line(&self) -> String {
        format!("{}{}", self.leading, self.trailing)
    }
}

/// Line-oriented lookups driven by the current selection.
pub trait LineCommands {
    /// The current line split at the selection start, or the line
    /// `lines_back` lines earlier. A previous line's `trailing` is always
    /// empty: the cursor is not on it, so only its completed lead is
    /// meaningful. Walking back past the first line yields an empty view.
    fn current_line(&mut self, lines_back: usize) -> Result<LineView, EditError>;

    /// Select the whole of the current line, without its terminator.
    fn select_current_line(&mut self) -> Result<(), EditError>;
}

impl<C: TextControl> LineCommands for EditBox<C> {
    fn current_line(&mut self, lines_back: usize) -> Result<LineView, EditError> {
        let contents = self.control.get_text();
        let point = self.checked_logical_start()?;
        current_line_at(lines_back, &contents, point)
    }

    fn select_current_line(&mut self) -> Result<(), EditError> {
        let view = self.current_line(0)?;
        let lead_len = text::char_len(&view.leading);
        let start = self.control.selection_start();
        self.control.set_selection_start(start.saturating_sub(lead_len));
        self.control
            .set_selection_length(lead_len + text::char_len(&view.trailing));
        Ok(())
    }
}

/// Line lookup against explicit content and a logical point; the seam the
/// selection-driven form goes through.
pub fn current_line_at(
    lines_back: usize,
    contents: &str,
    logical_point: usize,
) -> Result<LineView, EditError> {
    let total = text::char_len(contents);
    if logical_point > total {
        return Err(EditError::InvalidSelection {
            start: logical_point,
            len: total,
        });
    }

    let mut leading_ctx = text::normalize_newlines(text::char_prefix(contents, logical_point));

    // Only walked when asked for a line previous to the current one.
    for _ in 0..lines_back {
        match leading_ctx.rfind('\r') {
            Some(cut) => leading_ctx.truncate(cut),
            // Ran out of lines; not an error.
            None => return Ok(LineView::default()),
        }
    }

    let leading = match leading_ctx.rfind('\r') {
        Some(cut) => leading_ctx[cut + 1..].to_string(),
        None => leading_ctx,
    };

    if lines_back == 0 {
        let trailing_ctx = text::normalize_newlines(text::char_suffix(contents, logical_point));
        let trailing = match trailing_ctx.find('\r') {
            Some(cut) => trailing_ctx[..cut].to_string(),
            None => trailing_ctx,
        };
        Ok(LineView { leading, trailing })
    } else {
        Ok(LineView {
            leading,
            trailing: String::new(),
        })
    }
}
