use std::fs;
use std::io::{self, Read};

use anyhow::Context;
use clap::Parser;

use linebox::parse_cmd;
use linebox::{ClipboardProvider, EditBox, EmptyClipboard, LineEnding, MemoryControl, StaticClipboard, TextControl};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to edit (empty buffer when omitted)
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Command script (read from stdin when omitted)
    #[arg(short = 'e', long, value_name = "SCRIPT")]
    script: Option<String>,

    /// Clipboard text made available to paste commands
    #[arg(short = 'c', long, value_name = "TEXT")]
    clipboard: Option<String>,

    /// Line-ending convention of the buffer
    #[arg(short = 'n', long, value_enum, default_value = "lf")]
    newline: EndingArg,

    /// Write the result back to FILE instead of stdout
    #[arg(short = 'w', long)]
    write: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum EndingArg {
    Cr,
    Lf,
    Crlf,
}

impl From<EndingArg> for LineEnding {
    fn from(arg: EndingArg) -> Self {
        match arg {
            EndingArg::Cr => LineEnding::Cr,
            EndingArg::Lf => LineEnding::Lf,
            EndingArg::Crlf => LineEnding::CrLf,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let contents = match args.file.as_deref() {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
        None => String::new(),
    };

    let script = match args.script {
        Some(script) => script,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read script from stdin")?;
            buffer
        }
    };
    let commands = parse_cmd::parse_commands(&script)?;

    let control = MemoryControl::new(&contents, args.newline.into());
    let mut editbox = EditBox::new(control);
    editbox.on_search_wrapped(|| eprintln!("Search wrapped."));

    let mut clipboard: Box<dyn ClipboardProvider> = match args.clipboard {
        Some(clip) => Box::new(StaticClipboard(clip)),
        None => Box::new(EmptyClipboard),
    };

    let output = parse_cmd::apply_commands(&commands, &mut editbox, clipboard.as_mut())?;
    for line in output {
        eprintln!("{line}");
    }

    let result = editbox.control().get_text();
    if args.write {
        let path = args.file.as_deref().context("--write requires FILE")?;
        fs::write(path, &result).with_context(|| format!("failed to write {path}"))?;
        let lines = result.lines().count();
        eprintln!(
            "{} written ({} line{}).",
            path,
            lines,
            if lines == 1 { "" } else { "s" }
        );
    } else {
        print!("{result}");
    }
    Ok(())
}
