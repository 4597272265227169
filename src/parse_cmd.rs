//! Parser and executor for the batch driver's command strings.
//!
//! A script is a whitespace-separated sequence of commands, each an
//! optional leading count, a one- or two-letter name, and (for `f`) a
//! delimited trailing parameter: `6g 4x t f/needle/ sl`.

use anyhow::{Result, bail};
use phf::{Map, phf_map};

use crate::clipboard::ClipboardProvider;
use crate::edit_box::{EditBox, IndentCommands, LineCommands, SearchCommands};
use crate::error::EditError;
use crate::host::TextControl;

/// A delimited trailing parameter. The delimiter is significant: `"`
/// makes a find case-sensitive, anything else case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailParam {
    pub delim: char,
    pub content: String,
}

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Collapse the cursor to a host offset.
    Goto(usize),
    /// Set the selection length.
    Extend(usize),
    /// Tab key.
    Tab,
    /// Shift-tab.
    Untab,
    /// Select the whole current line.
    SelectLine,
    /// Report the line `n` lines before the current one.
    Show(usize),
    /// Find the next occurrence of the trailing parameter.
    Find(TrailParam),
    /// Paste the session clipboard over the selection.
    Paste,
}

#[derive(Debug, Clone, Copy)]
enum OpKind {
    Goto,
    Extend,
    Tab,
    Untab,
    SelectLine,
    Show,
    Find,
    Paste,
}

#[derive(Debug, Clone, Copy)]
struct CmdInfo {
    kind: OpKind,
    takes_count: bool,
    takes_tpar: bool,
}

static NAME_TO_OP: Map<&'static str, CmdInfo> = phf_map! {
    "g" => CmdInfo { kind: OpKind::Goto, takes_count: true, takes_tpar: false },
    "x" => CmdInfo { kind: OpKind::Extend, takes_count: true, takes_tpar: false },
    "t" => CmdInfo { kind: OpKind::Tab, takes_count: false, takes_tpar: false },
    "u" => CmdInfo { kind: OpKind::Untab, takes_count: false, takes_tpar: false },
    "sl" => CmdInfo { kind: OpKind::SelectLine, takes_count: false, takes_tpar: false },
    "sh" => CmdInfo { kind: OpKind::Show, takes_count: true, takes_tpar: false },
    "f" => CmdInfo { kind: OpKind::Find, takes_count: false, takes_tpar: true },
    "p" => CmdInfo { kind: OpKind::Paste, takes_count: false, takes_tpar: false },
};

/// Parse a whole script into commands.
pub fn parse_commands(input: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        // Optional leading count.
        let mut digits = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                chars.next();
            } else {
                break;
            }
        }
        let count: Option<usize> = if digits.is_empty() {
            None
        } else {
            Some(digits.parse()?)
        };

        // Command name: grow until it matches a known command.
        let mut name = String::new();
        let mut info: Option<CmdInfo> = None;
        for _ in 0..2 {
            let Some(c) = chars.next() else {
                bail!("Syntax error: incomplete command.");
            };
            name.push(c.to_ascii_lowercase());
            if let Some(found) = NAME_TO_OP.get(name.as_str()) {
                info = Some(*found);
                break;
            }
        }
        let Some(info) = info else {
            bail!("Syntax error: unknown command {name:?}.");
        };
        if count.is_some() && !info.takes_count {
            bail!("Syntax error: {name:?} does not take a count.");
        }

        let tpar = if info.takes_tpar {
            let Some(delim) = chars.next() else {
                bail!("Syntax error: {name:?} needs a delimited parameter.");
            };
            if !delim.is_ascii_punctuation() {
                bail!("Syntax error: bad delimiter {delim:?}.");
            }
            let mut content = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == delim {
                    closed = true;
                    break;
                }
                content.push(c);
            }
            if !closed {
                bail!("Syntax error: unterminated parameter after {name:?}.");
            }
            Some(TrailParam { delim, content })
        } else {
            None
        };

        commands.push(match (info.kind, count, tpar) {
            (OpKind::Goto, count, _) => Command::Goto(count.unwrap_or(0)),
            (OpKind::Extend, count, _) => Command::Extend(count.unwrap_or(0)),
            (OpKind::Tab, ..) => Command::Tab,
            (OpKind::Untab, ..) => Command::Untab,
            (OpKind::SelectLine, ..) => Command::SelectLine,
            (OpKind::Show, count, _) => Command::Show(count.unwrap_or(0)),
            (OpKind::Find, _, Some(tpar)) => Command::Find(tpar),
            (OpKind::Find, _, None) => unreachable!("find always parses a parameter"),
            (OpKind::Paste, ..) => Command::Paste,
        });
    }

    Ok(commands)
}

impl Command {
    /// Apply this command to an edit box, appending report lines to
    /// `output`.
    pub fn execute<C: TextControl>(
        &self,
        editbox: &mut EditBox<C>,
        clipboard: &mut dyn ClipboardProvider,
        output: &mut Vec<String>,
    ) -> Result<(), EditError> {
        match self {
            Command::Goto(at) => {
                let control = editbox.control_mut();
                control.set_selection_start(*at);
                control.set_selection_length(0);
            }
            Command::Extend(len) => editbox.control_mut().set_selection_length(*len),
            Command::Tab => editbox.handle_tab_press(false)?,
            Command::Untab => editbox.handle_tab_press(true)?,
            Command::SelectLine => editbox.select_current_line()?,
            Command::Show(lines_back) => {
                let view = editbox.current_line(*lines_back)?;
                output.push(format!("{}|{}", view.leading, view.trailing));
            }
            Command::Find(tpar) => {
                let case_sensitive = tpar.delim == '"';
                let result = editbox.find_next(&tpar.content, case_sensitive)?;
                if !result.found() {
                    output.push(format!("Not found: {}", tpar.content));
                }
            }
            Command::Paste => editbox.paste_from(clipboard)?,
        }
        Ok(())
    }
}

/// Run a parsed script start to finish, collecting report lines.
pub fn apply_commands<C: TextControl>(
    commands: &[Command],
    editbox: &mut EditBox<C>,
    clipboard: &mut dyn ClipboardProvider,
) -> Result<Vec<String>, EditError> {
    let mut output = Vec::new();
    for command in commands {
        command.execute(editbox, clipboard, &mut output)?;
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::StaticClipboard;
    use crate::host::{LineEnding, MemoryControl};

    #[test]
    fn test_parse_commands() {
        let commands = parse_commands("6g 4x t f/needle/ sl 2sh").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Goto(6),
                Command::Extend(4),
                Command::Tab,
                Command::Find(TrailParam {
                    delim: '/',
                    content: "needle".to_string()
                }),
                Command::SelectLine,
                Command::Show(2),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(parse_commands("qq").is_err());
        assert!(parse_commands("3t").is_err());
        assert!(parse_commands("f/unterminated").is_err());
        assert!(parse_commands("f").is_err());
    }

    #[test]
    fn test_parse_empty_script() {
        assert!(parse_commands("").unwrap().is_empty());
        assert!(parse_commands("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_script_end_to_end() {
        let control = MemoryControl::new("alpha\nbeta\ngamma", LineEnding::Lf);
        let mut editbox = EditBox::new(control);
        let mut clipboard = StaticClipboard("delta".to_string());

        let commands = parse_commands("f/beta/ sl t").unwrap();
        let output = apply_commands(&commands, &mut editbox, &mut clipboard).unwrap();
        assert!(output.is_empty());
        assert_eq!(editbox.control().get_text(), "alpha\n    beta\ngamma");
    }

    #[test]
    fn test_script_reports_misses() {
        let control = MemoryControl::new("alpha", LineEnding::Lf);
        let mut editbox = EditBox::new(control);
        let mut clipboard = StaticClipboard(String::new());

        let commands = parse_commands("f/zz/ sh").unwrap();
        let output = apply_commands(&commands, &mut editbox, &mut clipboard).unwrap();
        assert_eq!(output, vec!["Not found: zz".to_string(), "|alpha".to_string()]);
    }
}
