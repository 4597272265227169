//! Selection expansion to line boundaries.
//!
//! Both walks are read-only on the buffer and mutate only the selection.
//! They return the number of characters the selection grew by, so callers
//! can later give back exactly that much.

use log::trace;

use crate::error::EditError;
use crate::host::TextControl;
use crate::text;

use super::EditBox;

impl<C: TextControl> EditBox<C> {
    /// Grow the selection backward to the start of its first line.
    /// A no-op returning 0 when already at a terminator or buffer start.
    pub fn expand_to_prev_line_break(&mut self) -> Result<usize, EditError> {
        let contents: Vec<char> = self.control.get_text().chars().collect();
        let logical_start = self.checked_logical_start()?;

        let mut offset = 0usize;
        while offset < logical_start && !text::is_terminator(contents[logical_start - offset - 1]) {
            offset += 1;
        }

        if offset > 0 {
            trace!("selection expanded back {offset} chars to line start");
            let start = self.control.selection_start();
            let length = self.control.selection_length();
            self.control.set_selection_start(start.saturating_sub(offset));
            self.control.set_selection_length(length + offset);
        }
        Ok(offset)
    }

    /// Grow the selection forward to the end of its last line.
    /// A no-op when the selection already ends on a terminator.
    pub fn expand_to_next_line_break(&mut self) -> Result<usize, EditError> {
        let selected = self.control.selected_text();
        if self.control.selection_length() > 0
            && selected.chars().last().is_some_and(text::is_terminator)
        {
            return Ok(0);
        }

        let contents = self.control.get_text();
        let end = self.logical_selection_end()?;
        let grown = text::char_suffix(&contents, end)
            .chars()
            .take_while(|&c| !text::is_terminator(c))
            .count();

        let length = self.control.selection_length();
        self.control.set_selection_length(length + grown);
        Ok(grown)
    }
}
