//!
//! Connection Resolver
//!
//! Hosts pass their connection as an opaque pointer. The only thing the
//! bridge knows about it is that the native `sqlite3*` sits at
//! `DB_FIELD_OFFSET`, directly after the generic `HeapHeader`, as declared
//! by `udfbridge_host::ConnectionObject`.
//!
//! The layout holds for every `udfbridge-host` 0.1.x object. Nothing is
//! checked at runtime: no tag, no null test, no reference counting. A host
//! whose objects are laid out differently will be misread silently.
//!

use std::ffi::c_void;

use rusqlite::ffi;
use udfbridge_host::{CONNECTION_DB_OFFSET, ConnectionObject, HeapHeader};

/// Offset of the native handle from the start of a host connection object.
pub const DB_FIELD_OFFSET: usize = std::mem::size_of::<HeapHeader>();

const _: () = assert!(DB_FIELD_OFFSET == CONNECTION_DB_OFFSET);
const _: () = assert!(
    std::mem::size_of::<ConnectionObject>()
        == DB_FIELD_OFFSET + std::mem::size_of::<*mut ffi::sqlite3>()
);

/// Read the native database handle out of a host connection object.
///
/// # Safety
///
/// `connection` must point to a live `ConnectionObject` (or an object with an
/// identical prefix) created by the host integration layer, and must stay
/// alive for the duration of the call.
pub unsafe fn resolve(connection: *const c_void) -> *mut ffi::sqlite3 {
    unsafe {
        connection
            .cast::<u8>()
            .add(DB_FIELD_OFFSET)
            .cast::<*mut ffi::sqlite3>()
            .read()
    }
}
