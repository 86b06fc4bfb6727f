//!
//! Window function registration.
//!
//! Built in two versions selected by the `window` cargo feature. With it,
//! the four callbacks go to `sqlite3_create_window_function`. Without it,
//! every call fails with `Error::Unsupported` before looking at its
//! arguments.
//!

use std::ffi::{c_int, c_void};

use crate::config::RegisterOptions;
use crate::error::Error;

/// Register step/finalize/value/inverse callbacks as window function `name`.
///
/// `step` adds a row to the frame, `inverse` removes the oldest one, `value`
/// reports the current result and `finalize` reports it for the last time.
/// Arity is checked first, then each address in the order step, finalize,
/// value, inverse.
///
/// # Safety
///
/// - `connection` must be a live host connection object (see
///   [`resolve`](crate::resolver::resolve)).
/// - `step` and `inverse` must be C-ABI `(sqlite3_context*, int,
///   sqlite3_value**)` functions, `finalize` and `value` C-ABI
///   `(sqlite3_context*)` functions, all outliving the connection.
pub unsafe fn register_window(
    connection: *const c_void,
    name: &str,
    arity: c_int,
    step: isize,
    finalize: isize,
    value: isize,
    inverse: isize,
) -> Result<(), Error> {
    unsafe {
        register_window_with(
            connection,
            name,
            arity,
            step,
            finalize,
            value,
            inverse,
            &RegisterOptions::default(),
        )
    }
}

/// [`register_window`] with extra function flags.
///
/// # Safety
///
/// See [`register_window`].
#[cfg(feature = "window")]
pub unsafe fn register_window_with(
    connection: *const c_void,
    name: &str,
    arity: c_int,
    step: isize,
    finalize: isize,
    value: isize,
    inverse: isize,
    options: &RegisterOptions,
) -> Result<(), Error> {
    use std::ptr;

    use rusqlite::ffi;

    use crate::callback::{
        CallbackRole, finalize_callback, inverse_callback, step_callback, value_callback,
    };
    use crate::resolver::resolve;
    use crate::validate::{check_address, check_arity, function_name};

    check_arity(arity)?;
    let step = check_address(CallbackRole::Step, step)?;
    let finalize = check_address(CallbackRole::Finalize, finalize)?;
    let value = check_address(CallbackRole::Value, value)?;
    let inverse = check_address(CallbackRole::Inverse, inverse)?;
    let c_name = function_name(name)?;

    unsafe {
        let db = resolve(connection);
        let rc = ffi::sqlite3_create_window_function(
            db,
            c_name.as_ptr(),
            arity,
            options.text_rep(),
            ptr::null_mut(),
            Some(step_callback(step)),
            Some(finalize_callback(finalize)),
            Some(value_callback(value)),
            Some(inverse_callback(inverse)),
            None,
        );
        super::finish(db, rc, name, arity, "window")
    }
}

/// [`register_window`] with extra function flags.
///
/// # Safety
///
/// Always fails without reading any argument.
#[cfg(not(feature = "window"))]
pub unsafe fn register_window_with(
    _connection: *const c_void,
    _name: &str,
    _arity: c_int,
    _step: isize,
    _finalize: isize,
    _value: isize,
    _inverse: isize,
    _options: &RegisterOptions,
) -> Result<(), Error> {
    Err(Error::Unsupported {
        required: crate::constants::WINDOW_MIN_VERSION,
        linked: crate::constants::sqlite_version().to_string(),
    })
}
