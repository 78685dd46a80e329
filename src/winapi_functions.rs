use std::ptr;

use winapi::ctypes::c_void;
use winapi::um::{stringapiset, winuser};

use crate::clipboard::SystemError;

/// Fetch a handle to the clipboard data in `format`, `None` when the
/// clipboard holds nothing in that format. The clipboard must be open.
pub fn get_clipboard_data(format: u32) -> Option<ptr::NonNull<c_void>> {
    ptr::NonNull::new(unsafe { winuser::GetClipboardData(format) })
}

pub fn multi_byte_to_wide_char(code_page: u32, bytes: &[u8]) -> Result<Vec<u16>, SystemError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let wide_len = unsafe {
        stringapiset::MultiByteToWideChar(
            code_page,
            0,
            bytes.as_ptr() as *const i8,
            bytes.len() as i32,
            ptr::null_mut(),
            0,
        )
    };
    if wide_len == 0 {
        return Err(SystemError::last());
    }

    let mut wide = vec![0u16; wide_len as usize];
    match unsafe {
        stringapiset::MultiByteToWideChar(
            code_page,
            0,
            bytes.as_ptr() as *const i8,
            bytes.len() as i32,
            wide.as_mut_ptr(),
            wide_len,
        )
    } {
        0 => Err(SystemError::last()),
        written => {
            wide.truncate(written as usize);
            Ok(wide)
        }
    }
}

pub fn wide_char_to_multi_byte(code_page: u32, wide: &[u16]) -> Result<Vec<u8>, SystemError> {
    if wide.is_empty() {
        return Ok(Vec::new());
    }

    let byte_len = unsafe {
        stringapiset::WideCharToMultiByte(
            code_page,
            0,
            wide.as_ptr(),
            wide.len() as i32,
            ptr::null_mut(),
            0,
            ptr::null(),
            ptr::null_mut(),
        )
    };
    if byte_len == 0 {
        return Err(SystemError::last());
    }

    let mut bytes = vec![0u8; byte_len as usize];
    match unsafe {
        stringapiset::WideCharToMultiByte(
            code_page,
            0,
            wide.as_ptr(),
            wide.len() as i32,
            bytes.as_mut_ptr() as *mut i8,
            byte_len,
            ptr::null(),
            ptr::null_mut(),
        )
    } {
        0 => Err(SystemError::last()),
        written => {
            bytes.truncate(written as usize);
            Ok(bytes)
        }
    }
}
