//! Block metadata: the fixed-size prefix that precedes every payload.
//!
//! A `Header` is the sole source of truth for a block's size and state.
//! All address arithmetic the engine performs — finding a block from a
//! payload pointer, computing where a physically adjacent block would
//! start, carving a sibling out of a split — goes through the handful
//! of functions here so raw pointer math never leaks into `engine.rs`.

use std::mem;

/// Fixed-size metadata prefix stored immediately before a block's
/// payload. Every block, free or allocated, carries exactly one of
/// these at its starting address.
///
/// `prev_free`/`next_free` are only meaningful while the block sits on
/// a free list; by convention they are null otherwise.
#[repr(C)]
pub(crate) struct Header {
  pub size: usize,
  pub in_use: bool,
  pub prev_free: *mut Header,
  pub next_free: *mut Header,
}

impl Header {
  /// Size of the metadata prefix itself. The header's natural alignment
  /// (driven by its `usize`/pointer fields) is the only alignment
  /// guarantee the allocator makes about returned payloads.
  pub(crate) const fn header_size() -> usize {
    mem::size_of::<Header>()
  }

  /// The address immediately following this block's payload — where a
  /// physically adjacent next block, if any, would begin. Used by the
  /// engine to decide whether two free blocks can be coalesced.
  pub(crate) unsafe fn end_addr(this: *mut Header) -> usize {
    unsafe { this as usize + Self::header_size() + (*this).size }
  }

  /// The payload address a caller should receive for this header.
  pub(crate) unsafe fn payload_ptr(this: *mut Header) -> *mut u8 {
    unsafe { (this as *mut u8).add(Self::header_size()) }
  }

  /// Recovers the header address from a payload pointer previously
  /// returned by `payload_ptr`.
  pub(crate) unsafe fn from_payload(payload: *mut u8) -> *mut Header {
    unsafe { payload.sub(Self::header_size()) as *mut Header }
  }
}
