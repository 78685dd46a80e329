use std::fmt;

use crate::codec::Encoding;

pub type SystemError = error_code::ErrorCode<error_code::SystemCategory>;

/// Why a clipboard operation failed, one variant per failure point.
#[derive(Debug)]
pub enum Error {
    Open(SystemError),
    Alloc(SystemError),
    Lock(SystemError),
    SetData(SystemError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open(code) => write!(f, "Failed to open the clipboard: {}", code),
            Error::Alloc(code) => write!(f, "Failed to allocate memory: {}", code),
            Error::Lock(code) => write!(f, "Failed to lock memory: {}", code),
            Error::SetData(code) => write!(f, "Failed to set clipboard data: {}", code),
        }
    }
}

impl std::error::Error for Error {}

/// Exclusive access to the system clipboard's single text value.
///
/// Implementations acquire the clipboard for the duration of each call and
/// release it on every exit path, success or failure.
pub trait Clipboard {
    /// Read the clipboard text. Wide (Unicode) text is preferred and decoded
    /// into `encoding`; single-byte text is returned unmodified as a
    /// fallback. `Ok(None)` means the clipboard holds no text in either
    /// representation.
    fn read_text(&mut self, encoding: Encoding) -> Result<Option<Vec<u8>>, Error>;

    /// Replace the clipboard contents with `text`. Under `Encoding::Utf8`
    /// the bytes are re-encoded as wide text; under `Encoding::Legacy` they
    /// are stored as-is as single-byte text.
    fn write_text(&mut self, text: &[u8], encoding: Encoding) -> Result<(), Error>;
}

/// An in-memory clipboard with the same representation preference rules as
/// the real one.
#[cfg(test)]
pub(crate) struct FakeClipboard {
    pub wide: Option<Vec<u16>>,
    pub legacy: Option<Vec<u8>>,
    pub fail_open: bool,
}

#[cfg(test)]
impl FakeClipboard {
    pub fn empty() -> Self {
        FakeClipboard {
            wide: None,
            legacy: None,
            fail_open: false,
        }
    }

    fn locked_error() -> Error {
        // ERROR_ACCESS_DENIED, as when another process holds the clipboard.
        Error::Open(SystemError::new(5))
    }
}

#[cfg(test)]
impl Clipboard for FakeClipboard {
    fn read_text(&mut self, encoding: Encoding) -> Result<Option<Vec<u8>>, Error> {
        if self.fail_open {
            return Err(Self::locked_error());
        }
        if let Some(wide) = &self.wide {
            Ok(Some(crate::codec::from_native_wide(wide, encoding)))
        } else if let Some(bytes) = &self.legacy {
            Ok(Some(bytes.clone()))
        } else {
            Ok(None)
        }
    }

    fn write_text(&mut self, text: &[u8], encoding: Encoding) -> Result<(), Error> {
        if self.fail_open {
            return Err(Self::locked_error());
        }
        self.wide = None;
        self.legacy = None;
        match encoding {
            Encoding::Utf8 => {
                self.wide = Some(crate::codec::to_native_wide(text, Encoding::Utf8))
            }
            Encoding::Legacy => self.legacy = Some(text.to_vec()),
        }
        Ok(())
    }
}
