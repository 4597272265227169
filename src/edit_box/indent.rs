//! The tab-key contract: insert a tab unit, or indent/outdent a block.

use itertools::Itertools;

use crate::error::EditError;
use crate::host::TextControl;
use crate::text;

use super::EditBox;

/// The single-shot decision tree evaluated per tab press.
pub trait IndentCommands {
    /// Apply one tab-key press. A collapsed cursor without shift inserts
    /// one tab unit. Otherwise the selection is expanded back to its line
    /// start and every touched line is indented, or outdented when
    /// `shift` is held; afterwards only the user's original selection
    /// appears highlighted again.
    fn handle_tab_press(&mut self, shift: bool) -> Result<(), EditError>;
}

impl<C: TextControl> IndentCommands for EditBox<C> {
    fn handle_tab_press(&mut self, shift: bool) -> Result<(), EditError> {
        // Tab without shift or selection: the easy case.
        if self.control.selection_length() == 0 && !shift {
            let unit = self.tab_unit.clone();
            self.control.set_selected_text(&unit);
            let start = self.control.selection_start();
            self.control.set_selection_start(start + text::char_len(&unit));
            self.control.set_selection_length(0);
            return Ok(());
        }

        let mut added = self.expand_to_prev_line_break()?;

        if shift {
            // Make up for unsetting the expansion below: spaces removed
            // from the first line were part of what the expansion added,
            // so subtracting all of `added` back out would leave the
            // selection short by that many characters.
            let removed_from_first_line = self.outdent_selection()?;
            added = added.saturating_sub(removed_from_first_line);
        } else {
            self.indent_selection()?;
        }

        let length = self.control.selection_length();
        self.control.set_selection_length(length.saturating_sub(added));
        let start = self.control.selection_start();
        self.control.set_selection_start(start + added);
        Ok(())
    }
}

impl<C: TextControl> EditBox<C> {
    /// Prepend one tab unit to every line inside the selection: once at
    /// the very start and once after each internal terminator. A trailing
    /// terminator run is split off first so nothing lands after the final
    /// line break.
    fn indent_selection(&mut self) -> Result<(), EditError> {
        let sep = self.selection_line_ending()?;
        let unit = self.tab_unit.clone();
        let unit_len = text::char_len(&unit);

        let selected = self.control.selected_text();
        let suffix_len = selected
            .chars()
            .rev()
            .take_while(|&c| text::is_terminator(c))
            .count();
        let body_len = text::char_len(&selected) - suffix_len;
        let body = text::char_prefix(&selected, body_len);
        let suffix = text::char_suffix(&selected, body_len);

        let indented = body.replace(sep, &format!("{sep}{unit}"));
        self.control
            .set_selected_text(&format!("{unit}{indented}{suffix}"));

        // Exclude the newly added leading unit from the selection.
        let length = self.control.selection_length();
        self.control.set_selection_length(length.saturating_sub(unit_len));
        let start = self.control.selection_start();
        self.control.set_selection_start(start + unit_len);
        Ok(())
    }

    /// Remove up to one tab unit of leading whitespace from every line in
    /// the selection. Returns how many spaces came off the first line,
    /// capped at the tab-unit length.
    fn outdent_selection(&mut self) -> Result<usize, EditError> {
        let sep = self.selection_line_ending()?;
        let unit_len = text::char_len(&self.tab_unit);

        let selected = text::normalize_newlines(&self.control.selected_text());
        let lines: Vec<&str> = selected.split('\r').collect();

        let outdented = lines
            .iter()
            .map(|line| delete_tab_worth_of_leading_space(line, unit_len))
            .join(sep);
        self.control.set_selected_text(&outdented);

        Ok(text::leading_spaces(lines[0]).min(unit_len))
    }
}

/// Remove up to one tab unit of leading whitespace from `line`: a literal
/// tab character is removed whole; otherwise up to `unit_len` leading
/// spaces go, fewer if fewer exist. Never touches non-whitespace.
fn delete_tab_worth_of_leading_space(line: &str, unit_len: usize) -> &str {
    if let Some(rest) = line.strip_prefix('\t') {
        return rest;
    }
    &line[text::leading_spaces(line).min(unit_len)..]
}
