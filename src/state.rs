//! Process-wide state shared by both facades.
//!
//! `BREAK_LOCK` plays two roles at once, mirroring the single mutex of
//! the design this crate is based on: it is the lock facade's own
//! global free-list guard, *and* the serialization point the nolock
//! facade's segment extension borrows for the duration of its `sbrk`
//! call. There is exactly one mutex governing the program break no
//! matter which facade is growing it.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::FreeList;

/// The lock facade's sole allocator domain: one free list for the
/// entire process, guarded by `BREAK_LOCK`.
pub(crate) struct LockDomain {
  pub(crate) list: FreeList,
}

impl LockDomain {
  const fn new() -> Self {
    Self { list: FreeList::new() }
  }
}

pub(crate) static BREAK_LOCK: Mutex<LockDomain> = Mutex::new(LockDomain::new());

/// Cumulative bytes ever obtained from the OS, across both facades.
/// Process-global by design (see `free_space_size`'s per-facade, and in
/// the nolock case per-thread, counterpart).
static SEGMENT_SIZE: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn segment_size() -> usize {
  SEGMENT_SIZE.load(Ordering::SeqCst)
}

pub(crate) fn add_segment_bytes(n: usize) {
  SEGMENT_SIZE.fetch_add(n, Ordering::SeqCst);
}
