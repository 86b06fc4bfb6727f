//!
//! Function Registrar
//!
//! Three registration entry points, one per SQLite function flavor:
//!
//! - `register_scalar`: one callback invoked per row
//! - `register_aggregate`: step per row, finalize once per group
//! - `register_window`: aggregate plus value and inverse for sliding frames
//!
//! Each validates its arguments before touching the host connection, then
//! resolves the native handle, converts the addresses and makes exactly one
//! SQLite call. A non-OK status becomes `Error::Engine` carrying SQLite's
//! own message. Nothing is retried and no state is kept between calls.
//!
//! Every entry point registers with `SQLITE_UTF8`, no user data pointer and
//! no destructor. The `_with` variants additionally OR in the flags from
//! `RegisterOptions`.
//!

mod aggregate;
mod scalar;
mod window;

use std::ffi::{CStr, c_int, c_void};

use rusqlite::ffi;
use tracing::{debug, warn};

use crate::callback::CallbackRole;
use crate::config::RegisterOptions;
use crate::error::Error;

pub use aggregate::{register_aggregate, register_aggregate_with};
pub use scalar::{register_scalar, register_scalar_with};
pub use window::{register_window, register_window_with};

/// Callback addresses of an aggregate, with the optional window pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateAddresses {
    pub step: isize,
    pub finalize: isize,
    pub value: Option<isize>,
    pub inverse: Option<isize>,
}

impl AggregateAddresses {
    pub fn aggregate(step: isize, finalize: isize) -> Self {
        Self {
            step,
            finalize,
            value: None,
            inverse: None,
        }
    }

    pub fn window(step: isize, finalize: isize, value: isize, inverse: isize) -> Self {
        Self {
            step,
            finalize,
            value: Some(value),
            inverse: Some(inverse),
        }
    }
}

/// Register a scalar function with `options`.
///
/// # Safety
///
/// See [`register_scalar`].
pub unsafe fn create_function(
    connection: *const c_void,
    name: &str,
    arity: c_int,
    address: isize,
    options: &RegisterOptions,
) -> Result<(), Error> {
    unsafe { register_scalar_with(connection, name, arity, address, options) }
}

/// Register an aggregate, or a window function when both `value` and
/// `inverse` are supplied.
///
/// # Safety
///
/// See [`register_aggregate`] and [`register_window`].
pub unsafe fn create_aggregate(
    connection: *const c_void,
    name: &str,
    arity: c_int,
    addresses: AggregateAddresses,
    options: &RegisterOptions,
) -> Result<(), Error> {
    let AggregateAddresses {
        step,
        finalize,
        value,
        inverse,
    } = addresses;

    unsafe {
        match (value, inverse) {
            (None, None) => register_aggregate_with(connection, name, arity, step, finalize, options),
            (Some(value), Some(inverse)) => {
                register_window_with(connection, name, arity, step, finalize, value, inverse, options)
            }
            (Some(_), None) => Err(Error::MissingCallback {
                role: CallbackRole::Inverse,
            }),
            (None, Some(_)) => Err(Error::MissingCallback {
                role: CallbackRole::Value,
            }),
        }
    }
}

/// Turn a registration status into a result, logging either way.
unsafe fn finish(
    db: *mut ffi::sqlite3,
    rc: c_int,
    name: &str,
    arity: c_int,
    flavor: &'static str,
) -> Result<(), Error> {
    if rc == ffi::SQLITE_OK {
        debug!(name, arity, flavor, "registered function");
        return Ok(());
    }

    let err = unsafe { engine_error(db, rc) };
    warn!(name, arity, flavor, code = rc, error = %err, "function registration failed");
    Err(err)
}

/// SQLite reports some misuse (bad name length, bad arity) without setting
/// the handle's error state, so the handle message is used only when its
/// code matches the returned one.
unsafe fn engine_error(db: *mut ffi::sqlite3, rc: c_int) -> Error {
    let message = unsafe {
        if ffi::sqlite3_errcode(db) == rc {
            CStr::from_ptr(ffi::sqlite3_errmsg(db))
        } else {
            CStr::from_ptr(ffi::sqlite3_errstr(rc))
        }
    };
    Error::Engine {
        code: rc,
        message: message.to_string_lossy().into_owned(),
    }
}
