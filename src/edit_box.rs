//! The main EditBox type: one engine instance bound to one host control.

use crate::clipboard::ClipboardProvider;
use crate::error::EditError;
use crate::host::{LineEnding, TextControl};
use crate::text;

mod expand;
mod indent;
mod kludge;
mod line;
mod search;

pub use indent::IndentCommands;
pub use kludge::KludgeState;
pub use line::{LineCommands, LineView, current_line_at};
pub use search::{FindResult, SearchCommands};

/// The tab unit inserted or removed per indent level, unless overridden.
pub const DEFAULT_TAB_UNIT: &str = "    ";

/// A selection-aware editing engine over one host text control.
///
/// The engine owns the host adapter, the lazily resolved kludge state for
/// the host's selection reporting, and the search-wrapped notification.
/// One instance per editing session; nothing here is shared across
/// sessions.
pub struct EditBox<C: TextControl> {
    control: C,
    tab_unit: String,
    kludge: KludgeState,
    search_wrapped: Option<Box<dyn FnMut()>>,
}

impl<C: TextControl> EditBox<C> {
    pub fn new(control: C) -> Self {
        Self {
            control,
            tab_unit: DEFAULT_TAB_UNIT.to_string(),
            kludge: KludgeState::Unknown,
            search_wrapped: None,
        }
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Direct access to the host control, for host-side wiring that needs
    /// to move the selection itself.
    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    pub fn into_control(self) -> C {
        self.control
    }

    pub fn tab_unit(&self) -> &str {
        &self.tab_unit
    }

    pub fn set_tab_unit(&mut self, unit: impl Into<String>) {
        self.tab_unit = unit.into();
    }

    /// Register the callback raised exactly once per search wrap attempt.
    pub fn on_search_wrapped(&mut self, callback: impl FnMut() + 'static) {
        self.search_wrapped = Some(Box::new(callback));
    }

    pub(crate) fn notify_search_wrapped(&mut self) {
        if let Some(callback) = self.search_wrapped.as_mut() {
            callback();
        }
    }

    /// The host's line-ending convention, parsed.
    pub fn host_line_ending(&self) -> Result<LineEnding, EditError> {
        let raw = self.control.line_ending();
        LineEnding::from_terminator(&raw).ok_or(EditError::UnsupportedLineEnding(raw))
    }

    /// The terminator to splice into replacement text: a kludged host
    /// round-trips single carriage returns; otherwise the host convention
    /// applies.
    pub fn selection_line_ending(&mut self) -> Result<&'static str, EditError> {
        if self.kludged()? {
            Ok("\r")
        } else {
            Ok(self.host_line_ending()?.as_str())
        }
    }

    /// First phase of a paste: ask the clipboard for text, then apply it.
    /// A failing clipboard surfaces [`EditError::ClipboardUnavailable`]
    /// and leaves the buffer and selection untouched.
    pub fn paste_from(&mut self, clipboard: &mut dyn ClipboardProvider) -> Result<(), EditError> {
        let pasted = clipboard.read_text()?;
        self.apply_paste(&pasted);
        Ok(())
    }

    /// Second phase of a paste: replace the selection and collapse the
    /// cursor just past the inserted text.
    pub fn apply_paste(&mut self, pasted: &str) {
        self.control.set_selected_text(pasted);
        let inserted = self.control.selection_length();
        let start = self.control.selection_start();
        self.control.set_selection_start(start + inserted);
        self.control.set_selection_length(0);
    }

    /// Normalized length of the terminator run immediately before the
    /// selection.
    pub fn count_newlines_preceding_selection(&mut self) -> Result<usize, EditError> {
        let contents = self.control.get_text();
        let point = self.checked_logical_start()?;
        let leading = text::char_prefix(&contents, point);
        let run_len = leading
            .chars()
            .rev()
            .take_while(|&c| text::is_terminator(c))
            .count();
        let run = text::char_suffix(leading, text::char_len(leading) - run_len);
        Ok(text::char_len(&text::normalize_newlines(run)))
    }

    /// Normalized length of the terminator run immediately after the
    /// selection.
    pub fn count_newlines_following_selection(&mut self) -> Result<usize, EditError> {
        let contents = self.control.get_text();
        let end = self.logical_selection_end()?;
        let run: String = text::char_suffix(&contents, end)
            .chars()
            .take_while(|&c| text::is_terminator(c))
            .collect();
        Ok(text::char_len(&text::normalize_newlines(&run)))
    }

    /// Up to `num_chars` of context on each side of the selection.
    pub fn text_surrounding_selection(
        &mut self,
        num_chars: usize,
    ) -> Result<(String, String), EditError> {
        let contents = self.control.get_text();
        let total = text::char_len(&contents);
        let start = self.checked_logical_start()?;
        let end = self.logical_selection_end()?;

        let leading = text::char_slice(&contents, start.saturating_sub(num_chars), start);
        let trailing = text::char_slice(&contents, end, (end + num_chars).min(total));
        Ok((leading.to_string(), trailing.to_string()))
    }
}
