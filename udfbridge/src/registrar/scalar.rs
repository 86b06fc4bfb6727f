use std::ffi::{c_int, c_void};
use std::ptr;

use rusqlite::ffi;

use crate::callback::{CallbackRole, scalar_callback};
use crate::config::RegisterOptions;
use crate::error::Error;
use crate::resolver::resolve;
use crate::validate::{check_address, check_arity, function_name};

use super::finish;

/// Register the native function at `address` as scalar SQL function `name`.
///
/// Fails with an invalid-argument error, before the connection is read, when
/// `arity` is below -1 or above `MAX_FUNCTION_ARG`, or `address <= 0`.
///
/// # Safety
///
/// - `connection` must be a live host connection object (see [`resolve`]).
/// - `address` must be a C-ABI `(sqlite3_context*, int, sqlite3_value**)`
///   function that outlives the connection.
pub unsafe fn register_scalar(
    connection: *const c_void,
    name: &str,
    arity: c_int,
    address: isize,
) -> Result<(), Error> {
    unsafe { register_scalar_with(connection, name, arity, address, &RegisterOptions::default()) }
}

/// [`register_scalar`] with extra function flags.
///
/// # Safety
///
/// See [`register_scalar`].
pub unsafe fn register_scalar_with(
    connection: *const c_void,
    name: &str,
    arity: c_int,
    address: isize,
    options: &RegisterOptions,
) -> Result<(), Error> {
    check_arity(arity)?;
    let scalar = check_address(CallbackRole::Scalar, address)?;
    let c_name = function_name(name)?;

    unsafe {
        let db = resolve(connection);
        let rc = ffi::sqlite3_create_function_v2(
            db,
            c_name.as_ptr(),
            arity,
            options.text_rep(),
            ptr::null_mut(),
            Some(scalar_callback(scalar)),
            None,
            None,
            None,
        );
        finish(db, rc, name, arity, "scalar")
    }
}
