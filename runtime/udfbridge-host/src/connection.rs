//!
//! Host Connection Objects
//!
//! A `ConnectionObject` is what a host hands to the bridge as an opaque
//! pointer. Its layout is `HeapHeader` followed immediately by the native
//! database handle:
//!
//! ```text
//! offset 0                      HeapHeader (refcount, tag, pad)
//! offset size_of::<HeapHeader>  db: *mut sqlite3
//! ```
//!
//! The object borrows the handle. Releasing the last reference frees the
//! object but never closes the database; the host owns that lifetime.
//!

use std::alloc::{alloc, dealloc, Layout};
use std::ffi::c_void;

use crate::header::{HeapHeader, HeapTag};

/// A host connection object wrapping a native `sqlite3*`
#[repr(C)]
pub struct ConnectionObject {
    pub header: HeapHeader,
    pub db: *mut c_void,
}

/// Byte offset of the `db` field from the start of a `ConnectionObject`.
pub const CONNECTION_DB_OFFSET: usize = std::mem::offset_of!(ConnectionObject, db);

const _: () = assert!(CONNECTION_DB_OFFSET == std::mem::size_of::<HeapHeader>());

/// Allocate a new connection object holding `db`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn udfbridge_connection_new(db: *mut c_void) -> *mut ConnectionObject {
    unsafe {
        let layout = Layout::new::<ConnectionObject>();
        let ptr = alloc(layout) as *mut ConnectionObject;
        if ptr.is_null() {
            panic!("Failed to allocate connection object");
        }

        ptr.write(ConnectionObject {
            header: HeapHeader::new(HeapTag::Connection),
            db,
        });

        ptr
    }
}

/// Increment reference count of a connection object
#[unsafe(no_mangle)]
pub unsafe extern "C" fn udfbridge_connection_incref(con: *mut ConnectionObject) {
    if !con.is_null() {
        unsafe { (*con).header.incref(); }
    }
}

/// Decrement reference count and free if zero
#[unsafe(no_mangle)]
pub unsafe extern "C" fn udfbridge_connection_decref(con: *mut ConnectionObject) {
    if !con.is_null() {
        unsafe {
            if (*con).header.decref() {
                dealloc(con as *mut u8, Layout::new::<ConnectionObject>());
            }
        }
    }
}

/// Get the native handle stored in a connection object (null if none)
#[unsafe(no_mangle)]
pub unsafe extern "C" fn udfbridge_connection_db(con: *const ConnectionObject) -> *mut c_void {
    if con.is_null() {
        std::ptr::null_mut()
    } else {
        unsafe { (*con).db }
    }
}
