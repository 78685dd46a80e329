pub mod cli;
pub mod clipboard;
pub mod codec;
#[cfg(windows)]
pub mod system_clipboard;
#[cfg(windows)]
pub mod winapi_functions;

use std::io::{self, Read, Write};

use cli::{Mode, Opts};
use clipboard::Clipboard;
use codec::Encoding;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::FakeClipboard;

    fn opts(mode: Mode, message: &str, utf8: bool, newline: bool) -> Opts {
        Opts {
            mode,
            message: message.to_string(),
            utf8,
            newline,
        }
    }

    #[test]
    fn copy_then_paste_round_trips_legacy_text() {
        let mut fake = FakeClipboard::empty();
        assert_eq!(
            copy(&mut fake, io::empty(), &opts(Mode::Copy, "a b c", false, false)),
            0
        );

        let mut output = Vec::new();
        assert_eq!(
            paste(&mut fake, &mut output, &opts(Mode::Paste, "", false, false)),
            0
        );
        assert_eq!(output, b"a b c");
    }

    #[test]
    fn copy_then_paste_round_trips_utf8_text() {
        let mut fake = FakeClipboard::empty();
        let text = "grüße ✓";
        assert_eq!(
            copy(&mut fake, io::empty(), &opts(Mode::Copy, text, true, false)),
            0
        );

        let mut output = Vec::new();
        assert_eq!(
            paste(&mut fake, &mut output, &opts(Mode::Paste, "", true, false)),
            0
        );
        assert_eq!(output, text.as_bytes());
    }

    #[test]
    fn empty_message_copies_stdin() {
        let mut fake = FakeClipboard::empty();
        assert_eq!(
            copy(&mut fake, &b"from stdin"[..], &opts(Mode::Copy, "", false, false)),
            0
        );
        assert_eq!(fake.legacy.as_deref(), Some(&b"from stdin"[..]));
    }

    #[test]
    fn message_wins_over_stdin() {
        let mut fake = FakeClipboard::empty();
        assert_eq!(
            copy(&mut fake, &b"ignored"[..], &opts(Mode::Copy, "msg", false, false)),
            0
        );
        assert_eq!(fake.legacy.as_deref(), Some(&b"msg"[..]));
    }

    #[test]
    fn empty_message_and_empty_stdin_copy_empty_text() {
        let mut fake = FakeClipboard::empty();
        assert_eq!(
            copy(&mut fake, io::empty(), &opts(Mode::Copy, "", false, false)),
            0
        );
        assert_eq!(fake.legacy.as_deref(), Some(&b""[..]));
    }

    #[test]
    fn paste_newline_appends_exactly_one_newline() {
        let mut fake = FakeClipboard::empty();
        fake.legacy = Some(b"text".to_vec());

        let mut plain = Vec::new();
        assert_eq!(
            paste(&mut fake, &mut plain, &opts(Mode::Paste, "", false, false)),
            0
        );
        let mut with_newline = Vec::new();
        assert_eq!(
            paste(&mut fake, &mut with_newline, &opts(Mode::Paste, "", false, true)),
            0
        );

        assert_eq!(with_newline, [plain, b"\n".to_vec()].concat());
    }

    #[test]
    fn paste_prefers_wide_text() {
        let mut fake = FakeClipboard::empty();
        fake.wide = Some("wide".encode_utf16().collect());
        fake.legacy = Some(b"narrow".to_vec());

        let mut output = Vec::new();
        assert_eq!(
            paste(&mut fake, &mut output, &opts(Mode::Paste, "", true, false)),
            0
        );
        assert_eq!(output, b"wide");
    }

    #[test]
    fn single_byte_fallback_ignores_utf8_flag() {
        let mut fake = FakeClipboard::empty();
        fake.legacy = Some(vec![0x66, 0xff]);

        let mut output = Vec::new();
        assert_eq!(
            paste(&mut fake, &mut output, &opts(Mode::Paste, "", true, false)),
            0
        );
        assert_eq!(output, vec![0x66, 0xff]);
    }

    #[test]
    fn paste_from_empty_clipboard_still_succeeds() {
        let mut fake = FakeClipboard::empty();
        let mut output = Vec::new();
        assert_eq!(
            paste(&mut fake, &mut output, &opts(Mode::Paste, "", false, true)),
            0
        );
        // The trailing newline is still emitted.
        assert_eq!(output, b"\n");
    }

    #[test]
    fn copy_failure_exits_nonzero() {
        let mut fake = FakeClipboard::empty();
        fake.fail_open = true;
        assert_eq!(
            copy(&mut fake, io::empty(), &opts(Mode::Copy, "x", false, false)),
            1
        );
    }

    #[test]
    fn paste_failure_still_exits_zero() {
        let mut fake = FakeClipboard::empty();
        fake.fail_open = true;
        let mut output = Vec::new();
        assert_eq!(
            paste(&mut fake, &mut output, &opts(Mode::Paste, "", false, false)),
            0
        );
        assert!(output.is_empty());
    }
}

/// Dispatch a parsed invocation, returning the process exit code.
pub fn run(opts: Opts) -> i32 {
    match opts.mode {
        Mode::Help => {
            print!("{}", cli::help_text());
            let _ = io::stdout().flush();
            0
        }
        #[cfg(windows)]
        Mode::Copy => {
            let stdin = io::stdin();
            let input = stdin.lock();
            copy(&mut system_clipboard::SystemClipboard::new(), input, &opts)
        }
        #[cfg(windows)]
        Mode::Paste => {
            let stdout = io::stdout();
            let output = stdout.lock();
            paste(&mut system_clipboard::SystemClipboard::new(), output, &opts)
        }
        #[cfg(not(windows))]
        Mode::Copy | Mode::Paste => {
            eprintln!("The system clipboard is only available on Windows.");
            1
        }
    }
}

/// Place text on the clipboard, from the parsed message or, when that is
/// empty, from `input` read to end of stream.
pub fn copy<C, R>(clipboard: &mut C, mut input: R, opts: &Opts) -> i32
where
    C: Clipboard,
    R: Read,
{
    let mut text = Vec::new();
    if opts.message.is_empty() {
        if let Err(error) = input.read_to_end(&mut text) {
            eprintln!("Failed to read standard input: {}", error);
            return 1;
        }
    } else {
        text.extend_from_slice(opts.message.as_bytes());
    }

    match clipboard.write_text(&text, encoding(opts)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    }
}

/// Print the clipboard text to `output`. Failures are reported on stderr but
/// never change the exit code.
pub fn paste<C, W>(clipboard: &mut C, mut output: W, opts: &Opts) -> i32
where
    C: Clipboard,
    W: Write,
{
    match clipboard.read_text(encoding(opts)) {
        Ok(Some(text)) => {
            let _ = output.write_all(&text);
        }
        Ok(None) => eprintln!("There is no text in the clipboard."),
        Err(error) => eprintln!("{}", error),
    }

    if opts.newline {
        let _ = output.write_all(b"\n");
    }
    let _ = output.flush();
    0
}

fn encoding(opts: &Opts) -> Encoding {
    if opts.utf8 {
        Encoding::Utf8
    } else {
        Encoding::Legacy
    }
}
