//! # tsmalloc — a thread-safe `malloc`/`free` pair over `sbrk`
//!
//! This crate implements a general-purpose dynamic memory allocator
//! directly on top of the program break (`sbrk(2)`), in two concurrency
//! flavors that share the same block layout, best-fit placement, split
//! rule, and adjacency-based coalescing:
//!
//! - [`LockAllocator`] (exposed as [`LOCK`]) — one process-wide free
//!   list behind one mutex. Simple, and safe for cross-thread handoff
//!   of allocated pointers.
//! - [`NolockAllocator`] (exposed as [`NOLOCK`]) — each thread owns a
//!   private free list; only the call that grows the program break is
//!   serialized. Faster under thread-local allocation patterns, but a
//!   block freed on a different thread than the one that allocated it
//!   lands on the freeing thread's list (see `nolock`'s module docs).
//!
//! ## Block layout
//!
//! ```text
//!   ┌────────────────────┬────────────────────────────────┐
//!   │    Block Header    │           Payload              │
//!   │  size, in_use,      │                                │
//!   │  prev_free,         │      `size` usable bytes       │
//!   │  next_free          │                                │
//!   └────────────────────┴────────────────────────────────┘
//!                        ▲
//!                        └── pointer returned to the caller
//! ```
//!
//! Every byte ever obtained from the OS belongs to exactly one block at
//! all times; blocks never overlap, and the concatenation of all blocks
//! in address order equals everything the segment extender has ever
//! produced. Free blocks additionally sit on a strictly address-ordered
//! doubly-linked list, which is what makes adjacency-based coalescing
//! possible: in address order, a block's only candidates for merging
//! are its immediate list neighbors.
//!
//! ## Placement
//!
//! Both facades use **best fit**: an exact size match short-circuits
//! the search; otherwise the smallest free block still large enough to
//! satisfy the request is chosen. If a candidate is larger than needed
//! by more than one header's worth of bytes, it is split and the
//! remainder stays on the free list — never into a zero-payload block.
//!
//! ## What this crate does not do
//!
//! No alignment beyond the header's own natural alignment. No release
//! of memory back to the OS — the break never shrinks. No size classes
//! or segregated lists. No memory poisoning or red zones. `malloc(0)`
//! and `free(null)` are defined no-ops; passing a pointer that wasn't
//! returned by the same facade's `malloc`, or freeing one twice, is
//! undefined behavior exactly as it would be for the C `malloc`/`free`
//! this crate is modeled on.

mod engine;
mod extend;
mod header;
mod lock;
mod nolock;
mod state;

pub use lock::LockAllocator;
pub use nolock::NolockAllocator;

/// The coarse-grained, single-free-list allocator instance. Safe to
/// share pointers across threads.
pub static LOCK: LockAllocator = LockAllocator::new();

/// The per-thread allocator instance. Cheaper under thread-confined
/// allocation patterns; see [`NolockAllocator`]'s docs for the
/// cross-thread-free caveat.
pub static NOLOCK: NolockAllocator = NolockAllocator::new();
