//!
//! Callback Shapes and Address Conversion
//!
//! SQLite calls user functions through four callback roles with two C
//! signatures between them:
//!
//! - scalar, step, inverse: `void (*)(sqlite3_context*, int, sqlite3_value**)`
//! - finalize, value:       `void (*)(sqlite3_context*)`
//!
//! Callers hand the bridge plain integers. The helpers below are the only
//! place those integers become function pointers. Nothing here can verify
//! that the code at an address really has the expected signature; a wrong
//! signature is undefined behavior the moment SQLite calls it.
//!

use std::ffi::{c_int, c_void};
use std::fmt;
use std::num::NonZeroUsize;

use rusqlite::ffi::{sqlite3_context, sqlite3_value};

/// `xFunc`, `xStep` and `xInverse`
pub type ArgsCallback =
    unsafe extern "C" fn(ctx: *mut sqlite3_context, argc: c_int, argv: *mut *mut sqlite3_value);

/// `xFinal` and `xValue`
pub type ContextCallback = unsafe extern "C" fn(ctx: *mut sqlite3_context);

/// Role a callback address plays in a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackRole {
    Scalar,
    Step,
    Finalize,
    Value,
    Inverse,
}

impl CallbackRole {
    pub fn as_str(self) -> &'static str {
        match self {
            CallbackRole::Scalar => "scalar",
            CallbackRole::Step => "step",
            CallbackRole::Finalize => "finalize",
            CallbackRole::Value => "value",
            CallbackRole::Inverse => "inverse",
        }
    }
}

impl fmt::Display for CallbackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A callback address that passed validation (strictly positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeAddress(NonZeroUsize);

impl CodeAddress {
    /// Accepts only addresses greater than zero.
    pub fn new(address: isize) -> Option<Self> {
        if address <= 0 {
            return None;
        }
        NonZeroUsize::new(address as usize).map(CodeAddress)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    fn as_code_ptr(self) -> *const c_void {
        self.0.get() as *const c_void
    }
}

/// Reinterpret `address` as a scalar callback.
///
/// # Safety
///
/// `address` must be the entry point of a C-ABI function with the
/// `(sqlite3_context*, int, sqlite3_value**) -> void` signature that stays
/// mapped for as long as SQLite may call it.
pub unsafe fn scalar_callback(address: CodeAddress) -> ArgsCallback {
    unsafe { args_callback(address) }
}

/// Reinterpret `address` as a step callback.
///
/// # Safety
///
/// Same contract as [`scalar_callback`].
pub unsafe fn step_callback(address: CodeAddress) -> ArgsCallback {
    unsafe { args_callback(address) }
}

/// Reinterpret `address` as an inverse callback.
///
/// # Safety
///
/// Same contract as [`scalar_callback`].
pub unsafe fn inverse_callback(address: CodeAddress) -> ArgsCallback {
    unsafe { args_callback(address) }
}

/// Reinterpret `address` as a finalize callback.
///
/// # Safety
///
/// `address` must be the entry point of a C-ABI function with the
/// `(sqlite3_context*) -> void` signature that stays mapped for as long as
/// SQLite may call it.
pub unsafe fn finalize_callback(address: CodeAddress) -> ContextCallback {
    unsafe { context_callback(address) }
}

/// Reinterpret `address` as a value callback.
///
/// # Safety
///
/// Same contract as [`finalize_callback`].
pub unsafe fn value_callback(address: CodeAddress) -> ContextCallback {
    unsafe { context_callback(address) }
}

unsafe fn args_callback(address: CodeAddress) -> ArgsCallback {
    unsafe { std::mem::transmute::<*const c_void, ArgsCallback>(address.as_code_ptr()) }
}

unsafe fn context_callback(address: CodeAddress) -> ContextCallback {
    unsafe { std::mem::transmute::<*const c_void, ContextCallback>(address.as_code_ptr()) }
}
