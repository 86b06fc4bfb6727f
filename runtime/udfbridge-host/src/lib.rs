//!
//! udfbridge-host - Host Object Model
//!
//! This crate declares the heap objects a host integration layer passes to
//! the registration bridge:
//!
//! - `HeapHeader` and `HeapTag`, the generic header every host object starts with
//! - `ConnectionObject`, a header followed immediately by a native `sqlite3*`
//!
//! The bridge never inspects the header. It relies only on the position of the
//! `db` field, which is fixed by the `#[repr(C)]` declarations here.
//!

pub mod connection;
pub mod header;

pub use connection::*;
pub use header::*;
