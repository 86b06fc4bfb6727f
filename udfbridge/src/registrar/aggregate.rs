use std::ffi::{c_int, c_void};
use std::ptr;

use rusqlite::ffi;

use crate::callback::{CallbackRole, finalize_callback, step_callback};
use crate::config::RegisterOptions;
use crate::error::Error;
use crate::resolver::resolve;
use crate::validate::{check_address, check_arity, function_name};

use super::finish;

/// Register a step/finalize pair as aggregate SQL function `name`.
///
/// SQLite calls `step` once per input row and `finalize` once per group.
/// Arity is checked first, then `step`, then `finalize`; each bad address is
/// reported with its role.
///
/// # Safety
///
/// - `connection` must be a live host connection object (see [`resolve`]).
/// - `step` must be a C-ABI `(sqlite3_context*, int, sqlite3_value**)`
///   function and `finalize` a C-ABI `(sqlite3_context*)` function, both
///   outliving the connection.
pub unsafe fn register_aggregate(
    connection: *const c_void,
    name: &str,
    arity: c_int,
    step: isize,
    finalize: isize,
) -> Result<(), Error> {
    unsafe {
        register_aggregate_with(
            connection,
            name,
            arity,
            step,
            finalize,
            &RegisterOptions::default(),
        )
    }
}

/// [`register_aggregate`] with extra function flags.
///
/// # Safety
///
/// See [`register_aggregate`].
pub unsafe fn register_aggregate_with(
    connection: *const c_void,
    name: &str,
    arity: c_int,
    step: isize,
    finalize: isize,
    options: &RegisterOptions,
) -> Result<(), Error> {
    check_arity(arity)?;
    let step = check_address(CallbackRole::Step, step)?;
    let finalize = check_address(CallbackRole::Finalize, finalize)?;
    let c_name = function_name(name)?;

    unsafe {
        let db = resolve(connection);
        let rc = ffi::sqlite3_create_function_v2(
            db,
            c_name.as_ptr(),
            arity,
            options.text_rep(),
            ptr::null_mut(),
            None,
            Some(step_callback(step)),
            Some(finalize_callback(finalize)),
            None,
        );
        finish(db, rc, name, arity, "aggregate")
    }
}
