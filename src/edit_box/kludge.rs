//! Position translation between host-reported selection offsets and
//! buffer-text offsets.
//!
//! Some hosts report selection offsets as if every two-character line
//! ending were a single character, while their text property keeps the
//! two-character form. Whether a host does this is detected once per
//! session ("kludge" resolution) and frozen; every translation afterwards
//! compensates accordingly. Callers translate a reported value exactly
//! once; re-translating an already-logical offset overshoots.

use log::debug;

use crate::error::EditError;
use crate::host::{LineEnding, TextControl};
use crate::text;

use super::EditBox;

/// Whether the host's selection reporting can be trusted.
///
/// Resolved lazily on first use and never changed afterwards for the
/// lifetime of the engine instance: a host's reporting behavior does not
/// change mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KludgeState {
    Unknown,
    Kludged,
    Clean,
}

impl<C: TextControl> EditBox<C> {
    /// Resolve (or recall) whether the host's selection offsets need
    /// compensation.
    ///
    /// Single-character host conventions never kludge. For a two-character
    /// convention: a reported selection sample containing an orphaned `\r`
    /// settles it immediately; otherwise, if the buffer contains the
    /// two-character ending at all, a select-the-world probe compares the
    /// reported selection length against the true character count. A
    /// buffer with only one kind of terminator never kludges.
    pub fn resolve_kludge(&mut self) -> Result<KludgeState, EditError> {
        if self.kludge != KludgeState::Unknown {
            return Ok(self.kludge);
        }

        let kludged = match self.host_line_ending()? {
            LineEnding::Cr | LineEnding::Lf => false,
            LineEnding::CrLf => {
                let sample = self.control.selected_text();
                if orphan_cr_count(&sample) > 0 {
                    true
                } else if self.control.get_text().contains("\r\n") {
                    self.probe_selection_reporting()
                } else {
                    false
                }
            }
        };

        self.kludge = if kludged {
            KludgeState::Kludged
        } else {
            KludgeState::Clean
        };
        debug!("host selection reporting resolved: {:?}", self.kludge);
        Ok(self.kludge)
    }

    /// The resolved state, without forcing resolution.
    pub fn kludge_state(&self) -> KludgeState {
        self.kludge
    }

    pub(crate) fn kludged(&mut self) -> Result<bool, EditError> {
        Ok(self.resolve_kludge()? == KludgeState::Kludged)
    }

    /// Select the entire buffer and compare the reported selection length
    /// against the true character count, restoring the selection
    /// afterwards. A mismatch settles the question once and for all.
    fn probe_selection_reporting(&mut self) -> bool {
        let keep_start = self.control.selection_start();
        let keep_length = self.control.selection_length();

        let true_len = text::char_len(&self.control.get_text());
        self.control.set_selection_start(0);
        self.control.set_selection_length(true_len);
        let mismatch = self.control.selection_length() != true_len;

        self.control.set_selection_start(keep_start);
        self.control.set_selection_length(keep_length);
        mismatch
    }

    /// A selection start that meshes with the buffer text.
    ///
    /// For a kludged host, the reported offset is widened by consuming
    /// each two-character terminator whole, so a reported offset can never
    /// land between the two characters of a collapsed pair. Clean hosts
    /// pass through unchanged.
    pub fn to_logical_start(&mut self, raw_start: usize) -> Result<usize, EditError> {
        if self.kludged()? {
            Ok(widen_reported_offset(&self.control.get_text(), raw_start))
        } else {
            Ok(raw_start)
        }
    }

    /// A selection length that meshes with the buffer text: each orphaned
    /// `\r` in the reported sample means the host under-counted by one.
    pub fn to_logical_length(
        &mut self,
        raw_selected_text: &str,
        raw_length: usize,
    ) -> Result<usize, EditError> {
        if self.kludged()? {
            Ok(raw_length + orphan_cr_count(raw_selected_text))
        } else {
            Ok(raw_length)
        }
    }

    /// The inverse mapping, used when placing the cursor at a computed
    /// buffer offset (e.g. after a search hit): a kludged host counts each
    /// two-character terminator before the offset only once.
    pub fn raw_index_for_logical(&mut self, logical_index: usize) -> Result<usize, EditError> {
        if self.kludged()? {
            let contents = self.control.get_text();
            Ok(logical_index - crlf_pairs_before(&contents, logical_index))
        } else {
            Ok(logical_index)
        }
    }

    /// Translated selection start, bounds-checked against the buffer.
    pub(crate) fn checked_logical_start(&mut self) -> Result<usize, EditError> {
        let raw = self.control.selection_start();
        let start = self.to_logical_start(raw)?;
        let len = text::char_len(&self.control.get_text());
        if start > len {
            return Err(EditError::InvalidSelection { start, len });
        }
        Ok(start)
    }

    /// Translated end of the selection, bounds-checked against the buffer.
    pub(crate) fn logical_selection_end(&mut self) -> Result<usize, EditError> {
        let start = self.checked_logical_start()?;
        let sample = self.control.selected_text();
        let length = self.to_logical_length(&sample, self.control.selection_length())?;
        let len = text::char_len(&self.control.get_text());
        let end = start + length;
        if end > len {
            return Err(EditError::InvalidSelection { start: end, len });
        }
        Ok(end)
    }
}

/// Count of `\r` characters not immediately followed by `\n`.
fn orphan_cr_count(s: &str) -> usize {
    let mut count = 0;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' && chars.peek() != Some(&'\n') {
            count += 1;
        }
    }
    count
}

/// Buffer-text char offset reached after consuming `raw` reported units,
/// two-character terminators taken whole.
fn widen_reported_offset(contents: &str, raw: usize) -> usize {
    let mut widened = 0usize;
    let mut seen = 0usize;
    let mut chars = contents.chars().peekable();
    while seen < raw {
        match chars.next() {
            Some('\r') if chars.peek() == Some(&'\n') => {
                chars.next();
                widened += 2;
            }
            Some(_) => widened += 1,
            None => break,
        }
        seen += 1;
    }
    widened
}

/// Count of complete `\r\n` pairs within the first `logical` chars.
fn crlf_pairs_before(contents: &str, logical: usize) -> usize {
    let mut pairs = 0;
    let mut prev = None;
    for ch in contents.chars().take(logical) {
        if prev == Some('\r') && ch == '\n' {
            pairs += 1;
            prev = None;
        } else {
            prev = Some(ch);
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphan_cr_count() {
        assert_eq!(orphan_cr_count("a\rb"), 1);
        assert_eq!(orphan_cr_count("a\r\nb"), 0);
        assert_eq!(orphan_cr_count("\r\r\n\r"), 2);
        assert_eq!(orphan_cr_count(""), 0);
    }

    #[test]
    fn test_widen_reported_offset() {
        // "ab\r\ncd": reported units a b (\r\n) c d.
        assert_eq!(widen_reported_offset("ab\r\ncd", 0), 0);
        assert_eq!(widen_reported_offset("ab\r\ncd", 2), 2);
        assert_eq!(widen_reported_offset("ab\r\ncd", 3), 4);
        assert_eq!(widen_reported_offset("ab\r\ncd", 5), 6);
        // Offsets past the end stop at the end.
        assert_eq!(widen_reported_offset("ab\r\ncd", 9), 6);
    }

    #[test]
    fn test_crlf_pairs_before() {
        assert_eq!(crlf_pairs_before("ab\r\ncd", 2), 0);
        // The pair only counts once both characters are inside the prefix.
        assert_eq!(crlf_pairs_before("ab\r\ncd", 3), 0);
        assert_eq!(crlf_pairs_before("ab\r\ncd", 4), 1);
        assert_eq!(crlf_pairs_before("\r\r\n", 3), 1);
    }
}
