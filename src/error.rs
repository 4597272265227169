//! Error taxonomy for engine operations.

use thiserror::Error;

/// Errors surfaced by [`EditBox`](crate::EditBox) operations.
///
/// Running out of lines to walk back over, or a search missing after its
/// wrap, are ordinary results rather than errors; only genuinely broken
/// states end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A selection offset violates the buffer-bounds invariant. Never
    /// silently clamped: clamping would corrupt later index arithmetic.
    #[error("selection offset {start} is out of bounds for a buffer of {len} chars")]
    InvalidSelection { start: usize, len: usize },

    /// The host reported a line-ending convention outside CR/LF/CRLF.
    /// Fatal to position translation, so surfaced immediately.
    #[error("unsupported host line ending {0:?}")]
    UnsupportedLineEnding(String),

    /// The clipboard failed or held no usable text. A paste built on this
    /// becomes a no-op; the error only exists for user-facing display.
    #[error("clipboard does not contain pasteable text")]
    ClipboardUnavailable,
}
