//!
//! C ABI Surface
//!
//! Entry points for host integration layers that are not written in Rust.
//! Names arrive as pointer + length, addresses as pointer-width integers.
//!
//! Every registration returns `0` on success or the `ErrorKind::code` of the
//! failure:
//! - 1: invalid argument
//! - 2: unsupported operation
//! - 3: engine registration failure
//!
//! The failure message is kept in a thread-local slot readable through
//! `udfbridge_last_error` until the next call on the same thread.
//!

use std::cell::RefCell;
use std::ffi::{CString, c_char, c_int, c_void};

use crate::constants;
use crate::error::Error;
use crate::registrar;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
    static LAST_ERROR_KIND: RefCell<c_int> = const { RefCell::new(0) };
}

#[unsafe(no_mangle)]
pub static UDFBRIDGE_SQLITE_INTEGER: c_int = constants::SQLITE_INTEGER;
#[unsafe(no_mangle)]
pub static UDFBRIDGE_SQLITE_FLOAT: c_int = constants::SQLITE_FLOAT;
#[unsafe(no_mangle)]
pub static UDFBRIDGE_SQLITE_TEXT: c_int = constants::SQLITE_TEXT;
#[unsafe(no_mangle)]
pub static UDFBRIDGE_SQLITE_BLOB: c_int = constants::SQLITE_BLOB;
#[unsafe(no_mangle)]
pub static UDFBRIDGE_SQLITE_NULL: c_int = constants::SQLITE_NULL;
#[unsafe(no_mangle)]
pub static UDFBRIDGE_SQLITE_UTF8: c_int = constants::SQLITE_UTF8;
#[unsafe(no_mangle)]
pub static UDFBRIDGE_SQLITE_DETERMINISTIC: c_int = constants::SQLITE_DETERMINISTIC;
#[unsafe(no_mangle)]
pub static UDFBRIDGE_MAX_FUNCTION_ARG: c_int = constants::MAX_FUNCTION_ARG;

fn record(result: Result<(), Error>) -> c_int {
    match result {
        Ok(()) => {
            udfbridge_clear_error();
            0
        }
        Err(err) => {
            let code = err.kind().code();
            let message = CString::new(err.to_string().replace('\0', "\\0"))
                .unwrap_or_default();
            LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
            LAST_ERROR_KIND.with(|kind| *kind.borrow_mut() = code);
            code
        }
    }
}

unsafe fn name_from_raw(name: *const u8, len: usize) -> Result<String, Error> {
    if name.is_null() {
        return Err(Error::InvalidName {
            name: String::new(),
            reason: "name pointer is null",
        });
    }
    let bytes = unsafe { std::slice::from_raw_parts(name, len) };
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(_) => Err(Error::InvalidName {
            name: String::from_utf8_lossy(bytes).into_owned(),
            reason: "not valid UTF-8",
        }),
    }
}

/// Register a scalar function
///
/// # Safety
///
/// `con` must be a live host connection object, `name` must point to
/// `name_len` readable bytes, and `scalar` must satisfy the contract of
/// [`registrar::register_scalar`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn udfbridge_register_scalar(
    con: *const c_void,
    name: *const u8,
    name_len: usize,
    arity: c_int,
    scalar: isize,
) -> c_int {
    record(unsafe {
        name_from_raw(name, name_len)
            .and_then(|name| registrar::register_scalar(con, &name, arity, scalar))
    })
}

/// Register an aggregate function
///
/// # Safety
///
/// As [`udfbridge_register_scalar`], with `step` and `finalize` satisfying
/// [`registrar::register_aggregate`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn udfbridge_register_aggregate(
    con: *const c_void,
    name: *const u8,
    name_len: usize,
    arity: c_int,
    step: isize,
    finalize: isize,
) -> c_int {
    record(unsafe {
        name_from_raw(name, name_len)
            .and_then(|name| registrar::register_aggregate(con, &name, arity, step, finalize))
    })
}

/// Register a window function
///
/// # Safety
///
/// As [`udfbridge_register_scalar`], with the four addresses satisfying
/// [`registrar::register_window`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn udfbridge_register_window(
    con: *const c_void,
    name: *const u8,
    name_len: usize,
    arity: c_int,
    step: isize,
    finalize: isize,
    value: isize,
    inverse: isize,
) -> c_int {
    if !constants::window_supported() {
        return record(unsafe {
            registrar::register_window(con, "", arity, step, finalize, value, inverse)
        });
    }
    record(unsafe {
        name_from_raw(name, name_len).and_then(|name| {
            registrar::register_window(con, &name, arity, step, finalize, value, inverse)
        })
    })
}

/// Message of the last failure on this thread (null if none)
#[unsafe(no_mangle)]
pub extern "C" fn udfbridge_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |message| message.as_ptr())
    })
}

/// Kind code of the last failure on this thread (0 if none)
#[unsafe(no_mangle)]
pub extern "C" fn udfbridge_last_error_kind() -> c_int {
    LAST_ERROR_KIND.with(|kind| *kind.borrow())
}

/// Clear the last failure on this thread
#[unsafe(no_mangle)]
pub extern "C" fn udfbridge_clear_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
    LAST_ERROR_KIND.with(|kind| *kind.borrow_mut() = 0);
}

/// Version string of the linked SQLite library
#[unsafe(no_mangle)]
pub extern "C" fn udfbridge_sqlite_version() -> *const c_char {
    unsafe { rusqlite::ffi::sqlite3_libversion() }
}

/// 1 if window functions can be registered, 0 otherwise
#[unsafe(no_mangle)]
pub extern "C" fn udfbridge_window_supported() -> c_int {
    if constants::window_supported() { 1 } else { 0 }
}
