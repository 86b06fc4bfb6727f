//!
//! Input Validation
//!
//! Checks shared by every registration. All of them run before the host
//! connection object is touched, so a failure here never reaches SQLite.
//!

use std::ffi::{CString, c_int};

use crate::callback::{CallbackRole, CodeAddress};
use crate::constants::MAX_FUNCTION_ARG;
use crate::error::Error;

/// -1 (variadic) through `MAX_FUNCTION_ARG` inclusive.
pub fn check_arity(arity: c_int) -> Result<(), Error> {
    if arity < -1 {
        return Err(Error::ArityTooLow { arity });
    }
    if arity > MAX_FUNCTION_ARG {
        return Err(Error::ArityTooHigh {
            arity,
            max: MAX_FUNCTION_ARG,
        });
    }
    Ok(())
}

pub fn check_address(role: CallbackRole, address: isize) -> Result<CodeAddress, Error> {
    CodeAddress::new(address).ok_or(Error::InvalidAddress { role, address })
}

/// SQLite takes the name as a NUL-terminated UTF-8 string.
pub fn function_name(name: &str) -> Result<CString, Error> {
    CString::new(name).map_err(|_| Error::InvalidName {
        name: name.to_string(),
        reason: "contains a NUL byte",
    })
}
