//! A selection-aware, line-oriented plain-text editing engine.
//!
//! One [`EditBox`] binds to one host text control and turns a flat buffer
//! plus a single selection into line-oriented operations: current-line
//! lookup, whole-line selection, block indent/outdent, and find-next with
//! wraparound. Hosts whose selection APIs count two-character line endings
//! as a single character are detected once per session and compensated for
//! transparently.
//!
//! # Example
//!
//! ```rust
//! use linebox::{EditBox, IndentCommands, LineCommands, LineEnding, MemoryControl, SearchCommands, TextControl};
//!
//! let control = MemoryControl::new("alpha\nbeta\ngamma", LineEnding::Lf);
//! let mut editbox = EditBox::new(control);
//!
//! // Find "beta" and select the whole of its line.
//! assert!(editbox.find_next("beta", true).unwrap().found());
//! editbox.select_current_line().unwrap();
//! assert_eq!(editbox.control().selected_text(), "beta");
//!
//! // Indent it.
//! editbox.handle_tab_press(false).unwrap();
//! assert_eq!(editbox.control().get_text(), "alpha\n    beta\ngamma");
//! ```

mod clipboard;
mod edit_box;
mod error;
mod host;
pub mod parse_cmd;
mod text;

pub use clipboard::{ClipboardProvider, EmptyClipboard, StaticClipboard};
pub use edit_box::{
    DEFAULT_TAB_UNIT, EditBox, FindResult, IndentCommands, KludgeState, LineCommands, LineView,
    SearchCommands, current_line_at,
};
pub use error::EditError;
pub use host::{LineEnding, MemoryControl, QuirkyControl, TextControl};
