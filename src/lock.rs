//! Coarse-grained facade: one process-wide free list guarded by one
//! mutex. Every public method here holds [`state::BREAK_LOCK`] for its
//! entire body, so the engine, the segment extender, and the counters
//! are all linearized at acquire/release of that single lock.

use std::ptr;

use crate::extend;
use crate::header::Header;
use crate::state::{self, BREAK_LOCK};

/// Handle to the process-wide lock-facade allocator. Zero-sized: all
/// state lives in the statics under [`crate::state`]; this type exists
/// only to give that state a method-call API. See [`crate::LOCK`] for
/// the single instance callers should use.
pub struct LockAllocator(());

impl LockAllocator {
  pub(crate) const fn new() -> Self {
    Self(())
  }

  /// Returns a pointer to `size` usable bytes, or null if `size == 0`
  /// or the segment could not be extended. Best-fit against the shared
  /// free list first; only extends the break on a miss.
  pub fn malloc(&self, size: usize) -> *mut u8 {
    if size == 0 {
      return ptr::null_mut();
    }

    let mut domain = BREAK_LOCK.lock().unwrap();
    let header = unsafe { domain.list.acquire(size) };
    let header = if !header.is_null() {
      header
    } else {
      match unsafe { extend::grow(size) } {
        Some(header) => header,
        None => return ptr::null_mut(),
      }
    };

    unsafe { Header::payload_ptr(header) }
  }

  /// Returns `ptr` to the free list, coalescing with physically
  /// adjacent neighbors. Null is a no-op. `ptr` must have been returned
  /// by this facade's `malloc` and not yet freed.
  pub fn free(&self, ptr: *mut u8) {
    if ptr.is_null() {
      return;
    }
    let mut domain = BREAK_LOCK.lock().unwrap();
    unsafe { domain.list.release(ptr) };
  }

  /// Cumulative bytes ever obtained from the OS (shared with the nolock
  /// facade — the program break is one resource).
  pub fn segment_size(&self) -> usize {
    state::segment_size()
  }

  /// Current bytes (header + payload) resident on the shared free list.
  pub fn free_space_size(&self) -> usize {
    BREAK_LOCK.lock().unwrap().list.free_bytes()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // Tests against the shared global LockAllocator state must not run
  // concurrently with each other or they'll observe one another's
  // extensions; `GUARD` forces the whole module to run serially.
  static GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

  #[test]
  fn malloc_zero_is_null_and_stateless() {
    let _g = GUARD.lock().unwrap();
    let before = state::segment_size();
    assert!(crate::LOCK.malloc(0).is_null());
    assert_eq!(state::segment_size(), before);
  }

  #[test]
  fn free_of_null_is_noop() {
    let _g = GUARD.lock().unwrap();
    let before = state::segment_size();
    crate::LOCK.free(ptr::null_mut());
    assert_eq!(state::segment_size(), before);
  }

  // Precise placement/split/coalesce scenarios (best-fit tie-breaking,
  // split remainders, right-then-left merges) are tested against an
  // isolated, hand-built arena in `engine.rs`, not here: this facade's
  // state is one process-wide singleton (`crate::LOCK`), so anything a
  // prior test left on the free list is still there — and since `sbrk`
  // only ever grows the heap contiguously, a leftover free block can
  // physically coalesce with blocks this test allocates, silently
  // invalidating assumptions like "this request must extend the
  // segment" or "these two addresses must differ". The checks below are
  // written to hold regardless of what earlier tests left behind.

  #[test]
  fn free_then_realloc_round_trips_without_crashing() {
    let _g = GUARD.lock().unwrap();
    let p = crate::LOCK.malloc(12_345);
    assert!(!p.is_null());
    crate::LOCK.free(p);
    let q = crate::LOCK.malloc(12_345);
    assert!(!q.is_null());
    crate::LOCK.free(q);
  }

  #[test]
  fn malloc_returns_writable_non_null_memory() {
    let _g = GUARD.lock().unwrap();
    let p = crate::LOCK.malloc(64);
    assert!(!p.is_null());
    unsafe {
      for i in 0..64u8 {
        p.add(i as usize).write(i);
      }
      for i in 0..64u8 {
        assert_eq!(p.add(i as usize).read(), i);
      }
    }
    crate::LOCK.free(p);
  }

  #[test]
  fn segment_size_never_shrinks_across_an_alloc_free_cycle() {
    let _g = GUARD.lock().unwrap();
    let before = state::segment_size();
    let p = crate::LOCK.malloc(1000);
    crate::LOCK.free(p);
    assert!(state::segment_size() >= before);
  }
}
