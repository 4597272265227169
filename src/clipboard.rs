//! Clipboard capability consumed by the paste pipeline.

use crate::error::EditError;

/// A host-supplied, single-shot clipboard read.
///
/// An async host satisfies the read in its own runtime and then drives
/// [`EditBox::apply_paste`](crate::EditBox::apply_paste) itself; the
/// engine only ever asks once per paste and treats failure as "no text
/// available".
pub trait ClipboardProvider {
    fn read_text(&mut self) -> Result<String, EditError>;
}

/// A clipboard with fixed text contents.
#[derive(Debug, Clone)]
pub struct StaticClipboard(pub String);

impl ClipboardProvider for StaticClipboard {
    fn read_text(&mut self) -> Result<String, EditError> {
        Ok(self.0.clone())
    }
}

/// A clipboard with nothing pasteable on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyClipboard;

impl ClipboardProvider for EmptyClipboard {
    fn read_text(&mut self) -> Result<String, EditError> {
        Err(EditError::ClipboardUnavailable)
    }
}
