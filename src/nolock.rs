//! Per-thread facade: each thread owns a private free list in thread-
//! local storage, so ordinary `malloc`/`free` traffic needs no lock at
//! all. Only segment extension touches shared state, and it does so
//! through [`extend::grow_serialized`], which holds the global break
//! mutex for the duration of the `sbrk` call only.
//!
//! Freeing a pointer on a thread other than the one that allocated it
//! is accepted, not rejected: the block is simply inserted into the
//! freeing thread's list, where it may be permanently non-adjacent to
//! that thread's other blocks. This crate does not attempt to fix that
//! — callers doing cross-thread handoff should use [`crate::LockAllocator`]
//! instead. See `DESIGN.md` for the reasoning.

use std::cell::RefCell;
use std::ptr;

use crate::engine::FreeList;
use crate::extend;
use crate::header::Header;
use crate::state;

thread_local! {
  static LIST: RefCell<FreeList> = RefCell::new(FreeList::new());
}

/// Handle to the per-thread nolock allocator. See [`crate::NOLOCK`] for
/// the single instance callers should use.
pub struct NolockAllocator(());

impl NolockAllocator {
  pub(crate) const fn new() -> Self {
    Self(())
  }

  /// Returns a pointer to `size` usable bytes from the calling thread's
  /// private free list, or null if `size == 0` or the segment could not
  /// be extended.
  pub fn malloc(&self, size: usize) -> *mut u8 {
    if size == 0 {
      return ptr::null_mut();
    }

    let header = LIST.with(|list| unsafe { list.borrow_mut().acquire(size) });
    let header = if !header.is_null() {
      header
    } else {
      match unsafe { extend::grow_serialized(size) } {
        Some(header) => header,
        None => return ptr::null_mut(),
      }
    };

    unsafe { Header::payload_ptr(header) }
  }

  /// Returns `ptr` to the calling thread's free list. Null is a no-op.
  /// `ptr` must have been returned by this facade's `malloc` (on any
  /// thread) and not yet freed.
  pub fn free(&self, ptr: *mut u8) {
    if ptr.is_null() {
      return;
    }
    LIST.with(|list| unsafe { list.borrow_mut().release(ptr) });
  }

  /// Cumulative bytes ever obtained from the OS, process-wide (shared
  /// with the lock facade — there is only one program break).
  pub fn segment_size(&self) -> usize {
    state::segment_size()
  }

  /// Current bytes (header + payload) resident on the *calling
  /// thread's* free list. Other threads' free space is not included.
  pub fn free_space_size(&self) -> usize {
    LIST.with(|list| list.borrow().free_bytes())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::header::Header;

  fn h() -> usize {
    Header::header_size()
  }

  static GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

  #[test]
  fn malloc_zero_is_null() {
    let _g = GUARD.lock().unwrap();
    assert!(crate::NOLOCK.malloc(0).is_null());
  }

  #[test]
  fn free_then_realloc_same_size_reuses_address() {
    let _g = GUARD.lock().unwrap();
    let p = crate::NOLOCK.malloc(80);
    assert!(!p.is_null());
    crate::NOLOCK.free(p);
    assert_eq!(crate::NOLOCK.free_space_size(), h() + 80);

    let q = crate::NOLOCK.malloc(80);
    assert_eq!(p, q);
    assert_eq!(crate::NOLOCK.free_space_size(), 0);
  }

  #[test]
  fn each_thread_has_an_independent_list() {
    let _g = GUARD.lock().unwrap();
    let p = crate::NOLOCK.malloc(48);
    crate::NOLOCK.free(p);
    let main_thread_free = crate::NOLOCK.free_space_size();
    assert!(main_thread_free >= h() + 48);

    let spawned_free = std::thread::spawn(|| crate::NOLOCK.free_space_size()).join().unwrap();
    assert_eq!(spawned_free, 0);
  }

  #[test]
  fn freeing_on_a_different_thread_lands_on_that_threads_list() {
    let _g = GUARD.lock().unwrap();
    let p = crate::NOLOCK.malloc(64) as usize;

    std::thread::spawn(move || {
      crate::NOLOCK.free(p as *mut u8);
      assert_eq!(crate::NOLOCK.free_space_size(), h() + 64);
    })
    .join()
    .unwrap();
  }
}
