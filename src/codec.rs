//! Conversions between the process's byte-oriented I/O and the clipboard's
//! native wide-character (UTF-16) text.

#[cfg(windows)]
use crate::winapi_functions::{multi_byte_to_wide_char, wide_char_to_multi_byte};
#[cfg(windows)]
use winapi::um::winnls::CP_ACP;


/// How the byte side of a conversion is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// The platform's single-byte ANSI code page.
    Legacy,
    Utf8,
}

/// Encode bytes as clipboard wide text. A failed conversion yields an empty
/// result rather than an error.
pub fn to_native_wide(bytes: &[u8], encoding: Encoding) -> Vec<u16> {
    match encoding {
        Encoding::Utf8 => match std::str::from_utf8(bytes) {
            Ok(text) => text.encode_utf16().collect(),
            Err(_) => Vec::new(),
        },
        Encoding::Legacy => legacy_to_wide(bytes),
    }
}

/// Decode clipboard wide text into bytes in the requested encoding.
pub fn from_native_wide(wide: &[u16], encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => String::from_utf16(wide)
            .map(String::into_bytes)
            .unwrap_or_default(),
        Encoding::Legacy => wide_to_legacy(wide),
    }
}

#[cfg(windows)]
fn legacy_to_wide(bytes: &[u8]) -> Vec<u16> {
    multi_byte_to_wide_char(CP_ACP, bytes).unwrap_or_default()
}

#[cfg(windows)]
fn wide_to_legacy(wide: &[u16]) -> Vec<u8> {
    wide_char_to_multi_byte(CP_ACP, wide).unwrap_or_default()
}

// Narrow strings are UTF-8 on every non-Windows platform we build for.

#[cfg(not(windows))]
fn legacy_to_wide(bytes: &[u8]) -> Vec<u16> {
    to_native_wide(bytes, Encoding::Utf8)
}

#[cfg(not(windows))]
fn wide_to_legacy(wide: &[u16]) -> Vec<u8> {
    from_native_wide(wide, Encoding::Utf8)
}
