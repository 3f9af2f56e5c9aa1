//! Segment extender: the only place that calls into the program-break
//! primitive (`sbrk`, via `libc`).
//!
//! `grow` itself takes no lock — the program break is a process-wide
//! resource, and serializing access to it is the caller's job. The lock
//! facade already holds its one global mutex across the whole `malloc`/
//! `free` call, so it can call `grow` directly. The nolock facade has
//! no lock protecting its own per-thread list, so it calls
//! `grow_serialized`, which acquires [`crate::state::BREAK_LOCK`] for
//! the duration of the `sbrk` call only, then releases it before
//! touching the header — the returned address range is already
//! exclusively owned by the calling thread once the break has advanced.

use std::ptr;

use libc::{intptr_t, sbrk};

use crate::header::Header;
use crate::state;

unsafe fn init_header(raw: *mut libc::c_void, payload_size: usize) -> *mut Header {
  unsafe {
    let header = raw as *mut Header;
    (*header).size = payload_size;
    (*header).in_use = true;
    (*header).prev_free = ptr::null_mut();
    (*header).next_free = ptr::null_mut();
    header
  }
}

/// Extends the program break by `header_size + payload_size` bytes and
/// initializes the new region as an allocated block of `payload_size`
/// bytes. Returns `None` if `sbrk` fails; no state changes in that case.
///
/// # Safety
///
/// The caller must ensure no other thread can be advancing the program
/// break concurrently with this call.
pub(crate) unsafe fn grow(payload_size: usize) -> Option<*mut Header> {
  unsafe {
    let total = Header::header_size() + payload_size;
    let raw = sbrk(total as intptr_t);
    if raw as isize == -1 {
      return None;
    }
    let header = init_header(raw, payload_size);
    state::add_segment_bytes(total);
    Some(header)
  }
}

/// `grow`, but with the `sbrk` call itself serialized by the global
/// break mutex. For facades that don't already hold a lock covering
/// this call.
///
/// # Safety
///
/// Same as `grow`.
pub(crate) unsafe fn grow_serialized(payload_size: usize) -> Option<*mut Header> {
  let total = Header::header_size() + payload_size;
  let raw = {
    let _guard = state::BREAK_LOCK.lock().unwrap();
    unsafe { sbrk(total as intptr_t) }
  };
  if raw as isize == -1 {
    return None;
  }
  let header = unsafe { init_header(raw, payload_size) };
  state::add_segment_bytes(total);
  Some(header)
}
