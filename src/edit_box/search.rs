//! Find-next with a single wraparound.

use log::debug;

use crate::error::EditError;
use crate::host::TextControl;
use crate::text;

use super::EditBox;

/// The result of a find-next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindResult {
    /// A match; carries the logical index of its first character.
    Found(usize),
    NotFound,
}

impl FindResult {
    pub fn found(&self) -> bool {
        matches!(self, FindResult::Found(_))
    }

    pub fn logical_index(&self) -> Option<usize> {
        match self {
            FindResult::Found(at) => Some(*at),
            FindResult::NotFound => None,
        }
    }
}

/// Literal text search driven by the current selection.
pub trait SearchCommands {
    /// Find the next occurrence of `target` after the current selection,
    /// wrapping to the buffer start at most once. A hit moves the
    /// selection onto the match; a miss after wrapping restores the
    /// selection that was current when the search began.
    fn find_next(&mut self, target: &str, case_sensitive: bool) -> Result<FindResult, EditError>;
}

impl<C: TextControl> SearchCommands for EditBox<C> {
    fn find_next(&mut self, target: &str, case_sensitive: bool) -> Result<FindResult, EditError> {
        self.found_next_loc(target, case_sensitive, false)
    }
}

impl<C: TextControl> EditBox<C> {
    fn found_next_loc(
        &mut self,
        target: &str,
        case_sensitive: bool,
        wrapped: bool,
    ) -> Result<FindResult, EditError> {
        let contents = self.control.get_text();
        let from =
            self.checked_logical_start()? + text::char_len(&self.control.selected_text());

        if let Some(found) = index_of(&contents, target, from, case_sensitive) {
            let raw = self.raw_index_for_logical(found)?;
            self.control.set_selection_start(raw);
            self.control
                .set_selection_length(text::char_len(&text::normalize_newlines(target)));
            return Ok(FindResult::Found(found));
        }

        if wrapped {
            return Ok(FindResult::NotFound);
        }

        debug!("search for {target:?} wrapped to buffer start");
        self.notify_search_wrapped();

        let keep_start = self.control.selection_start();
        let keep_length = self.control.selection_length();
        self.control.set_selection_start(0);
        self.control.set_selection_length(0);

        let retried = self.found_next_loc(target, case_sensitive, true)?;
        if !retried.found() {
            // A failed wrap-around search must not leave the cursor at 0.
            self.control.set_selection_start(keep_start);
            self.control.set_selection_length(keep_length);
        }
        Ok(retried)
    }
}

/// Char index of the first occurrence of `target` at or after `from`.
fn index_of(haystack: &str, target: &str, from: usize, case_sensitive: bool) -> Option<usize> {
    let hay: Vec<char> = haystack.chars().collect();
    let pat: Vec<char> = target.chars().collect();
    if pat.is_empty() || hay.len() < pat.len() {
        return None;
    }

    (from..=hay.len() - pat.len()).find(|&at| {
        pat.iter().enumerate().all(|(i, &pc)| {
            let hc = hay[at + i];
            if case_sensitive {
                hc == pc
            } else {
                case_eq(hc, pc)
            }
        })
    })
}

/// Unicode-aware, case-insensitive equality for single scalar values.
///
/// Compares lowercase expansions, so it handles mappings where a single
/// character lowercases to multiple code points.
fn case_eq(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}
