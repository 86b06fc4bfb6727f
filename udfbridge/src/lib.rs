///
/// udfbridge - SQLite Function Registration Bridge
///
/// Registers natively compiled callbacks (typically produced by a JIT) as
/// SQLite user-defined functions on a connection the host already opened.
///
/// - resolver: reads the native sqlite3 handle out of a host connection object
/// - callback: integer address to typed callback pointer conversions
/// - validate: arity and address checks shared by all registrations
/// - registrar: scalar, aggregate and window registration
/// - ffi: C ABI entry points and the per-thread last-error slot
/// - constants: engine constants exported to callers
/// - config: registration options loadable from TOML
///
/// Entry points:
/// - `register_scalar`, `register_aggregate`, `register_window`
/// - `create_function`, `create_aggregate` for option-carrying registration
///

pub mod callback;
pub mod config;
pub mod constants;
pub mod error;
pub mod ffi;
pub mod registrar;
pub mod resolver;
pub mod validate;

pub use callback::CallbackRole;
pub use config::{ConfigError, RegisterOptions};
pub use error::{Error, ErrorKind};
pub use registrar::{
    AggregateAddresses, create_aggregate, create_function, register_aggregate,
    register_aggregate_with, register_scalar, register_scalar_with, register_window,
    register_window_with,
};
pub use resolver::resolve;
