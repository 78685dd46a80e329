use core::{mem, ptr};

use clipboard_win::empty;
use winapi::ctypes::c_void;
use winapi::um::winbase;
use winapi::um::winuser::{SetClipboardData, CF_TEXT, CF_UNICODETEXT};

use crate::clipboard::{Clipboard, Error, SystemError};
use crate::codec::{self, Encoding};
use crate::winapi_functions::get_clipboard_data;

const GHND: winapi::ctypes::c_uint = 0x42;

#[inline]
fn noop(_: *mut c_void) {}

#[inline]
fn unlock_data(data: *mut c_void) {
    unsafe {
        winbase::GlobalUnlock(data);
    }
}

#[inline]
fn free_global_mem(data: *mut c_void) {
    unsafe {
        winbase::GlobalFree(data);
    }
}

pub struct Scope<T: Copy>(pub T, pub fn(T));

impl<T: Copy> Drop for Scope<T> {
    #[inline(always)]
    fn drop(&mut self) {
        (self.1)(self.0)
    }
}

/// A movable global memory block, freed on drop unless released to the
/// clipboard or merely borrowed from it.
struct GlobalMem(Scope<*mut c_void>);

impl GlobalMem {
    fn alloc(size: usize) -> Result<Self, SystemError> {
        let mem = unsafe { winbase::GlobalAlloc(GHND, size) };
        if mem.is_null() {
            Err(SystemError::last())
        } else {
            Ok(Self(Scope(mem, free_global_mem)))
        }
    }

    fn from_borrowed(ptr: ptr::NonNull<c_void>) -> Self {
        Self(Scope(ptr.as_ptr(), noop))
    }

    fn get(&self) -> *mut c_void {
        (self.0).0
    }

    /// Forget the block so the clipboard can take ownership of it.
    fn release(self) {
        mem::forget(self)
    }

    fn lock(&self) -> Result<(ptr::NonNull<c_void>, Scope<*mut c_void>), SystemError> {
        let ptr = unsafe { winbase::GlobalLock(self.get()) };

        match ptr::NonNull::new(ptr) {
            Some(ptr) => Ok((ptr, Scope(self.get(), unlock_data))),
            None => Err(SystemError::last()),
        }
    }

    fn size(&self) -> usize {
        unsafe { winbase::GlobalSize(self.get()) }
    }
}

/// The real Windows clipboard.
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        SystemClipboard
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `data` into global memory and hand it to the open clipboard.
fn install_data(format: u32, data: &[u8]) -> Result<(), Error> {
    debug_assert!(!data.is_empty());

    let mem = GlobalMem::alloc(data.len()).map_err(Error::Alloc)?;

    {
        let (ptr, _lock) = mem.lock().map_err(Error::Lock)?;
        unsafe { ptr::copy_nonoverlapping(data.as_ptr(), ptr.as_ptr() as _, data.len()) };
    }

    if unsafe { !SetClipboardData(format, mem.get()).is_null() } {
        // SetClipboardData takes ownership.
        mem.release();
        Ok(())
    } else {
        Err(Error::SetData(SystemError::last()))
    }
}

/// Read a NUL-terminated wide string out of a clipboard handle, bounded by
/// the size of its allocation.
fn read_wide(handle: ptr::NonNull<c_void>) -> Result<Vec<u16>, Error> {
    let mem = GlobalMem::from_borrowed(handle);
    let (ptr, _lock) = mem.lock().map_err(Error::Lock)?;
    let len = mem.size() / mem::size_of::<u16>();
    let units = unsafe { std::slice::from_raw_parts(ptr.as_ptr() as *const u16, len) };
    let end = units.iter().position(|&unit| unit == 0).unwrap_or(len);
    Ok(units[..end].to_vec())
}

fn read_narrow(handle: ptr::NonNull<c_void>) -> Result<Vec<u8>, Error> {
    let mem = GlobalMem::from_borrowed(handle);
    let (ptr, _lock) = mem.lock().map_err(Error::Lock)?;
    let len = mem.size();
    let bytes = unsafe { std::slice::from_raw_parts(ptr.as_ptr() as *const u8, len) };
    let end = bytes.iter().position(|&byte| byte == 0).unwrap_or(len);
    Ok(bytes[..end].to_vec())
}

impl Clipboard for SystemClipboard {
    fn read_text(&mut self, encoding: Encoding) -> Result<Option<Vec<u8>>, Error> {
        // Single attempt; if another process holds the clipboard we fail
        // rather than wait. Closed again when the guard drops.
        let _clip = clipboard_win::Clipboard::new().map_err(Error::Open)?;

        // Prefer the wide representation. The single-byte fallback is
        // passed through without re-encoding.
        if let Some(handle) = get_clipboard_data(CF_UNICODETEXT) {
            let wide = read_wide(handle)?;
            Ok(Some(codec::from_native_wide(&wide, encoding)))
        } else if let Some(handle) = get_clipboard_data(CF_TEXT) {
            read_narrow(handle).map(Some)
        } else {
            Ok(None)
        }
    }

    fn write_text(&mut self, text: &[u8], encoding: Encoding) -> Result<(), Error> {
        let (format, payload) = match encoding {
            Encoding::Utf8 => {
                let mut wide = codec::to_native_wide(text, Encoding::Utf8);
                wide.push(0);
                let mut bytes = Vec::with_capacity(wide.len() * mem::size_of::<u16>());
                for unit in wide {
                    bytes.extend_from_slice(&unit.to_ne_bytes());
                }
                (CF_UNICODETEXT, bytes)
            }
            Encoding::Legacy => {
                let mut bytes = text.to_vec();
                bytes.push(0);
                (CF_TEXT, bytes)
            }
        };

        let _clip = clipboard_win::Clipboard::new().map_err(Error::Open)?;
        let _ = empty();
        install_data(format, &payload)
    }
}
