//!
//! Exported Engine Constants
//!
//! Read-only values callers need to build portable registrations and
//! callbacks: value type tags, function flags, argument limits and the
//! version of the SQLite library actually linked into the process.
//!

use std::ffi::{CStr, c_int};

use rusqlite::ffi;
use serde::Serialize;

pub const SQLITE_INTEGER: c_int = ffi::SQLITE_INTEGER;
pub const SQLITE_FLOAT: c_int = ffi::SQLITE_FLOAT;
pub const SQLITE_TEXT: c_int = ffi::SQLITE_TEXT;
pub const SQLITE_BLOB: c_int = ffi::SQLITE_BLOB;
pub const SQLITE_NULL: c_int = ffi::SQLITE_NULL;

pub const SQLITE_UTF8: c_int = ffi::SQLITE_UTF8;
pub const SQLITE_DETERMINISTIC: c_int = ffi::SQLITE_DETERMINISTIC;
pub const SQLITE_DIRECTONLY: c_int = ffi::SQLITE_DIRECTONLY;
pub const SQLITE_INNOCUOUS: c_int = ffi::SQLITE_INNOCUOUS;

/// Compile-time `SQLITE_MAX_FUNCTION_ARG` of the bundled library.
pub const MAX_FUNCTION_ARG: c_int = 127;

/// First release with `sqlite3_create_window_function`.
pub const WINDOW_MIN_VERSION: &str = "3.25.0";
pub const WINDOW_MIN_VERSION_NUMBER: c_int = 3_025_000;

#[cfg(feature = "window")]
const _: () = assert!(
    ffi::SQLITE_VERSION_NUMBER >= WINDOW_MIN_VERSION_NUMBER,
    "the `window` feature needs SQLite bindings for 3.25.0 or later"
);

/// Version string of the SQLite library linked at runtime
pub fn sqlite_version() -> &'static str {
    unsafe { CStr::from_ptr(ffi::sqlite3_libversion()) }
        .to_str()
        .unwrap_or("unknown")
}

/// Version number of the SQLite library linked at runtime, e.g. 3045000
pub fn sqlite_version_number() -> c_int {
    unsafe { ffi::sqlite3_libversion_number() }
}

/// Whether this build can register window functions
pub const fn window_supported() -> bool {
    cfg!(feature = "window")
}

/// Snapshot of every exported constant, for dumping
#[derive(Debug, Clone, Serialize)]
pub struct ExportedConstants {
    pub sqlite_integer: c_int,
    pub sqlite_float: c_int,
    pub sqlite_text: c_int,
    pub sqlite_blob: c_int,
    pub sqlite_null: c_int,
    pub sqlite_utf8: c_int,
    pub sqlite_deterministic: c_int,
    pub sqlite_directonly: c_int,
    pub sqlite_innocuous: c_int,
    pub max_function_arg: c_int,
    pub sqlite_version: &'static str,
    pub sqlite_version_number: c_int,
    pub window_min_version: &'static str,
    pub window_supported: bool,
}

impl ExportedConstants {
    pub fn collect() -> Self {
        Self {
            sqlite_integer: SQLITE_INTEGER,
            sqlite_float: SQLITE_FLOAT,
            sqlite_text: SQLITE_TEXT,
            sqlite_blob: SQLITE_BLOB,
            sqlite_null: SQLITE_NULL,
            sqlite_utf8: SQLITE_UTF8,
            sqlite_deterministic: SQLITE_DETERMINISTIC,
            sqlite_directonly: SQLITE_DIRECTONLY,
            sqlite_innocuous: SQLITE_INNOCUOUS,
            max_function_arg: MAX_FUNCTION_ARG,
            sqlite_version: sqlite_version(),
            sqlite_version_number: sqlite_version_number(),
            window_min_version: WINDOW_MIN_VERSION,
            window_supported: window_supported(),
        }
    }
}
