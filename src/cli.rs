use std::ffi::OsStr;
use std::path::Path;

/// Basename suffixes that select a mode without an explicit subcommand,
/// typically set up as hard links to the main executable.
pub const COPY_ALIAS_SUFFIX: &str = "wcopy";
pub const PASTE_ALIAS_SUFFIX: &str = "wpaste";

const EXECUTABLE_SUFFIX: &str = ".exe";


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Copy,
    Paste,
    Help,
}

/// A fully resolved invocation, threaded unchanged through the actions.
#[derive(Debug)]
pub struct Opts {
    pub mode: Mode,
    pub message: String,
    pub utf8: bool,
    pub newline: bool,
}

/// Turn a raw argument list, program name included, into an action plan.
pub fn parse<I>(args: I) -> Opts
where
    I: IntoIterator<Item = String>,
{
    let mut args: Vec<String> = args.into_iter().collect();

    if let Some(sub_command) = alias_sub_command(args.first().map(String::as_str).unwrap_or("")) {
        args.insert(1, sub_command.to_string());
    }

    if args.len() <= 1 {
        return Opts {
            mode: Mode::Help,
            message: String::new(),
            utf8: false,
            newline: false,
        };
    }

    let mut help = false;
    let mut utf8 = false;
    let mut newline = false;
    let mut message = String::new();

    let mut index = 2;
    while index < args.len() {
        match args[index].as_str() {
            "-h" => help = true,
            "-u" => utf8 = true,
            "-n" => newline = true,
            // Greedy: everything after -m is message text, never flags.
            "-m" => {
                message = args[index + 1..].join(" ");
                break;
            }
            // Unrecognised tokens are ignored.
            _ => {}
        }
        index += 1;
    }

    let mode = if help {
        Mode::Help
    } else {
        match args[1].as_str() {
            "copy" => Mode::Copy,
            "paste" => Mode::Paste,
            _ => Mode::Help,
        }
    };

    Opts {
        mode,
        message,
        utf8,
        newline,
    }
}

/// Pick an implicit subcommand from the name the program was invoked under.
fn alias_sub_command(program: &str) -> Option<&'static str> {
    let name = Path::new(program)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(program);
    // Windows file names compare case insensitively.
    let name = name.to_ascii_lowercase();
    let name = name.strip_suffix(EXECUTABLE_SUFFIX).unwrap_or(&name);

    if name.ends_with(COPY_ALIAS_SUFFIX) {
        Some("copy")
    } else if name.ends_with(PASTE_ALIAS_SUFFIX) {
        Some("paste")
    } else {
        None
    }
}

/// The fixed usage text printed by the help action.
pub fn help_text() -> &'static str {
    "wclip: copy text to and paste text from the system clipboard.
Usage: wclip [MODE] [OPTION] ...
modes:
copy\t place text on the system clipboard, from -m or from stdin.
paste\t print the latest text from the system clipboard.
options:
-h\t display this help and exit.
-n\t print the clipboard text with a trailing newline in `paste` mode.
-m\t copy the remaining arguments, joined by single spaces, in `copy` mode.
-u\t treat the text as UTF-8 instead of the ANSI code page, in both modes.

example:
wclip -h \t display help.
wclip copy -m hello world \t copy 'hello world' to the system clipboard.
wclip copy \t copy the message read from stdin to the system clipboard.
or: echo hello world | wclip copy \t copy hello world to the system clipboard.

wclip paste \t print the latest message from the system clipboard.
wclip paste -n \t the same, with a trailing newline.

wclip also dispatches on its own name, so you can hard or soft link it to an alias name and use it this way:

> mklink.exe /H wcopy.exe wclip.exe
> mklink.exe /H wpaste.exe wclip.exe

wcopy == wclip copy and wpaste == wclip paste
echo hello world | wcopy
wcopy -m hello world
wpaste [-h]
"
}
