///
/// Registration error types.
///
/// Every failure a registration can report: arity and address validation,
/// bad names, missing window support in the build, and non-OK statuses
/// returned by the engine itself.
///

use std::ffi::c_int;

use thiserror::Error;

use crate::callback::CallbackRole;

#[derive(Debug, Error)]
pub enum Error {
    #[error("arity {arity} is out of range: must be at least -1")]
    ArityTooLow { arity: c_int },

    #[error("arity {arity} is out of range: must be at most {max}")]
    ArityTooHigh { arity: c_int, max: c_int },

    #[error("invalid {role} callback address {address}: must be greater than 0")]
    InvalidAddress { role: CallbackRole, address: isize },

    #[error("{role} callback address is required when registering a window function")]
    MissingCallback { role: CallbackRole },

    #[error("invalid function name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// The crate was built without the `window` feature. The versions are
    /// informational only.
    #[error(
        "window functions are not compiled into this build (enable the `window` feature; \
         requires SQLite {required} or later, linked version is {linked})"
    )]
    Unsupported { required: &'static str, linked: String },

    #[error("{message}")]
    Engine { code: c_int, message: String },
}

/// Coarse classification of an `Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Unsupported,
    Engine,
}

impl ErrorKind {
    /// Status code reported through the C ABI
    pub fn code(self) -> c_int {
        match self {
            ErrorKind::InvalidArgument => 1,
            ErrorKind::Unsupported => 2,
            ErrorKind::Engine => 3,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ArityTooLow { .. }
            | Error::ArityTooHigh { .. }
            | Error::InvalidAddress { .. }
            | Error::MissingCallback { .. }
            | Error::InvalidName { .. } => ErrorKind::InvalidArgument,
            Error::Unsupported { .. } => ErrorKind::Unsupported,
            Error::Engine { .. } => ErrorKind::Engine,
        }
    }
}
